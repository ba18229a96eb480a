use axum::Json;
use utoipa::OpenApi;

use crate::doc::ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
