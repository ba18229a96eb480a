use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::offer_view::OfferView;
use crate::services::offer_service::{AcceptedOffer, CreatedOffer};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobOfferPayload {
    #[validate(range(min = 1, message = "employer_id must be bigger than 0."))]
    pub employer_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub department: String,
    #[validate(length(min = 1, max = 50))]
    pub manager: String,
    #[validate(range(min = 0))]
    pub salary: i32,
    #[serde(rename = "phoneList")]
    #[validate(length(min = 1, message = "At least one candidate phone is required."))]
    pub phone_list: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShowJobOfferPayload {
    #[validate(range(min = 1))]
    pub job_offer_id: i32,
    #[validate(length(min = 1))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignJobOfferPayload {
    #[validate(range(min = 1))]
    pub job_offer_id: i32,
    #[validate(length(min = 1))]
    pub phone: String,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJobOfferResponse {
    pub message: String,
    pub job_offer_id: i32,
    pub candidates: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobOfferDetailsResponse {
    pub department: String,
    pub manager: String,
    pub salary: i32,
    pub create_date: DateTime<Utc>,
    pub employer_name: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignJobOfferResponse {
    pub message: String,
    pub start_date: NaiveDate,
}

/// Error body shared by every failing route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "phoneList", skip_serializing_if = "Option::is_none")]
    pub phone_list: Option<Vec<String>>,
}

impl From<CreatedOffer> for CreateJobOfferResponse {
    fn from(value: CreatedOffer) -> Self {
        Self {
            message: "Successful.".to_string(),
            job_offer_id: value.offer.id,
            candidates: value.candidate_ids.len(),
        }
    }
}

impl From<OfferView> for JobOfferDetailsResponse {
    fn from(value: OfferView) -> Self {
        Self {
            active: value.is_open(),
            department: value.department,
            manager: value.manager,
            salary: value.salary,
            create_date: value.create_date,
            employer_name: value.employer_name,
            start_date: value.start_date,
        }
    }
}

impl From<AcceptedOffer> for SignJobOfferResponse {
    fn from(value: AcceptedOffer) -> Self {
        Self {
            message: format!(
                "Offer was signed successfully. Start date: {}.",
                value.start_date
            ),
            start_date: value.start_date,
        }
    }
}
