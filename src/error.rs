use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use serde_json::json;

use crate::database::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid request body: {}", .0.body_text())]
    JsonRejection(#[from] JsonRejection),

    #[error(
        "Wrong start date provided. Start date should be between {min} and {max}, provided: {provided}."
    )]
    StartDateOutOfRange {
        min: NaiveDate,
        max: NaiveDate,
        provided: NaiveDate,
    },

    #[error("At least one candidate phone number is required.")]
    EmptyRoster,

    #[error("No employer with id: {0} has been found.")]
    UnknownEmployer(i32),

    #[error("Users with these phone numbers have been not found.")]
    UnmatchedPhones(Vec<String>),

    #[error("No job offer has been found with id: {0}.")]
    OfferNotFound(i32),

    #[error("User with phone number: {phone} is not a candidate for job offer with id: {job_offer_id}.")]
    NotInvited { job_offer_id: i32, phone: String },

    #[error("Offer is not longer active.")]
    OfferTaken(i32),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::JsonRejection(_)
            | Error::StartDateOutOfRange { .. }
            | Error::EmptyRoster
            | Error::UnknownEmployer(_)
            | Error::UnmatchedPhones(_)
            | Error::OfferNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotInvited { .. } => StatusCode::FORBIDDEN,
            Error::OfferTaken(_) => StatusCode::UNAUTHORIZED,
            Error::Config(_) | Error::Store(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = match &self {
            Error::UnmatchedPhones(phones) => {
                tracing::info!(?phones, "rejecting offer with unmatched phones");
                json!({
                    "error": "Users with these phone numbers have been not found.",
                    "phoneList": phones,
                })
            }
            Error::Config(_) | Error::Store(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                json!({ "error": "An unexpected error occurred" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Store(StoreError::Database(err))
    }
}
