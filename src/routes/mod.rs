pub mod docs;
pub mod health;
pub mod job_offer;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/docs/openapi.json", get(docs::openapi_json))
        .route("/add_job_offer", post(job_offer::create_job_offer))
        .route("/get_job_offer_details", post(job_offer::get_job_offer_details))
        .route("/sign_job_offer", patch(job_offer::sign_job_offer))
        .with_state(state)
}
