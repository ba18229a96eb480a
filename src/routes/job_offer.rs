use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::job_offer_dto::{
        CreateJobOfferPayload, CreateJobOfferResponse, JobOfferDetailsResponse,
        ShowJobOfferPayload, SignJobOfferPayload, SignJobOfferResponse,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/add_job_offer",
    tag = "job_offer",
    request_body = CreateJobOfferPayload,
    responses(
        (status = 200, description = "Job offer created", body = CreateJobOfferResponse),
        (status = 422, description = "Unknown employer, unmatched phones or invalid payload", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn create_job_offer(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateJobOfferPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let created = state.offer_service.create_offer(payload).await?;
    Ok(Json(CreateJobOfferResponse::from(created)))
}

#[utoipa::path(
    post,
    path = "/get_job_offer_details",
    tag = "job_offer",
    request_body = ShowJobOfferPayload,
    responses(
        (status = 200, description = "Offer terms for an invited candidate", body = JobOfferDetailsResponse),
        (status = 403, description = "Phone is not a candidate for this offer", body = ErrorResponse),
        (status = 422, description = "No such offer or invalid payload", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_job_offer_details(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShowJobOfferPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let view = state
        .offer_service
        .offer_details(payload.job_offer_id, &payload.phone)
        .await?;
    Ok(Json(JobOfferDetailsResponse::from(view)))
}

#[utoipa::path(
    patch,
    path = "/sign_job_offer",
    tag = "job_offer",
    request_body = SignJobOfferPayload,
    responses(
        (status = 200, description = "Offer accepted", body = SignJobOfferResponse),
        (status = 401, description = "Offer is no longer active", body = ErrorResponse),
        (status = 403, description = "Phone is not a candidate for this offer", body = ErrorResponse),
        (status = 422, description = "No such offer, start date out of range or invalid payload", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn sign_job_offer(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SignJobOfferPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let accepted = state
        .offer_service
        .accept_offer(payload.job_offer_id, &payload.phone, payload.start_date)
        .await?;
    Ok(Json(SignJobOfferResponse::from(accepted)))
}
