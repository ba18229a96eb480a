pub mod config;
pub mod database;
pub mod doc;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use crate::database::store::OfferStore;
use crate::services::offer_service::OfferService;

#[derive(Clone)]
pub struct AppState {
    pub offer_service: OfferService,
}

impl AppState {
    pub fn new(store: Arc<dyn OfferStore>) -> Self {
        Self {
            offer_service: OfferService::new(store),
        }
    }
}
