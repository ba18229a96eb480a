use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use great_job_backend::{
    database::memory::MemoryOfferStore, routes, utils::time::today, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

async fn app() -> Router {
    let store = MemoryOfferStore::with_sample_data()
        .await
        .expect("sample data");
    routes::router(AppState::new(Arc::new(store)))
}

async fn send(app: &Router, method: &str, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

fn in_days(days: i64) -> String {
    (today() + Duration::days(days)).to_string()
}

#[tokio::test]
async fn index_and_health_respond() {
    let app = app().await;

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], b"Hello! This is Super Job App!");

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app().await;
    let req = Request::builder()
        .uri("/docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let doc: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/sign_job_offer"].is_object());
}

#[tokio::test]
async fn offer_lifecycle_over_http() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/add_job_offer",
        json!({
            "employer_id": 1,
            "department": "department_3",
            "manager": "manager_3",
            "salary": 250000,
            "phoneList": ["+111111111", "+333333333"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successful.");
    assert_eq!(body["candidates"], 2);
    let offer_id = body["job_offer_id"].as_i64().expect("offer id");

    let (status, body) = send(
        &app,
        "POST",
        "/get_job_offer_details",
        json!({ "job_offer_id": offer_id, "phone": "+333333333" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "department_3");
    assert_eq!(body["employer_name"], "sberbank");
    assert_eq!(body["active"], true);

    let (status, body) = send(
        &app,
        "PATCH",
        "/sign_job_offer",
        json!({ "job_offer_id": offer_id, "phone": "+333333333", "start_date": in_days(5) }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_date"], in_days(5));

    let (status, body) = send(
        &app,
        "PATCH",
        "/sign_job_offer",
        json!({ "job_offer_id": offer_id, "phone": "+111111111", "start_date": in_days(6) }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Offer is not longer active.");

    let (status, body) = send(
        &app,
        "POST",
        "/get_job_offer_details",
        json!({ "job_offer_id": offer_id, "phone": "+111111111" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn unmatched_phones_are_listed() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/add_job_offer",
        json!({
            "employer_id": 2,
            "department": "d",
            "manager": "m",
            "salary": 1,
            "phoneList": ["+444444444", "+000000000"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["phoneList"], json!(["+000000000"]));
}

#[tokio::test]
async fn invalid_payloads_are_unprocessable() {
    let app = app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/add_job_offer",
        json!({
            "employer_id": 1,
            "department": "d",
            "manager": "m",
            "salary": 1,
            "phoneList": []
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        "POST",
        "/add_job_offer",
        json!({
            "employer_id": 3,
            "department": "d",
            "manager": "m",
            "salary": 1,
            "phoneList": ["+111111111"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "No employer with id: 3 has been found.");
}

#[tokio::test]
async fn eligibility_errors_use_distinct_statuses() {
    let app = app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/get_job_offer_details",
        json!({ "job_offer_id": 1, "phone": "+333333333" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/get_job_offer_details",
        json!({ "job_offer_id": 99, "phone": "+111111111" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "No job offer has been found with id: 99.");
}

#[tokio::test]
async fn start_date_outside_window_is_rejected() {
    let app = app().await;
    for days in [0, 31] {
        let (status, body) = send(
            &app,
            "PATCH",
            "/sign_job_offer",
            json!({ "job_offer_id": 2, "phone": "+444444444", "start_date": in_days(days) }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Wrong start date provided."));
    }
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/sign_job_offer",
        json!({ "job_offer_id": 1, "phone": "+111111111" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .contains("start_date"));

    let req = Request::builder()
        .method("PATCH")
        .uri("/sign_job_offer")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"job_offer_id":1,"#))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).expect("json error body");
    assert!(body["error"].is_string());
}
