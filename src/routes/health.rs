use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Greeting", body = String))
)]
#[axum::debug_handler]
pub async fn index() -> &'static str {
    "Hello! This is Super Job App!"
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}
