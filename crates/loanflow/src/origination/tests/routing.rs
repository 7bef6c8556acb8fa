use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use super::common::*;
use crate::origination::router::loan_router;
use crate::origination::service::LoanOriginationService;

fn build_router() -> axum::Router {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(LoanOriginationService::new(
        Arc::new(directory()),
        repository,
    ));
    loan_router(service, Arc::new(TokenGate(ADMIN_TOKEN.to_string())))
}

fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize")))
        .expect("request")
}

fn admin_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
        .header("content-type", "application/json");
    match body {
        Some(value) => builder
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn submit_returns_the_score_breakdown() {
    let router = build_router();

    let response = router
        .oneshot(json_request("POST", "/api/v1/loans", &submission()))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = json_body(response).await;
    assert_eq!(
        payload.pointer("/score/total_score").and_then(Value::as_i64),
        Some(840)
    );
    assert_eq!(
        payload
            .pointer("/score/factors")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(8)
    );
    assert_eq!(
        payload
            .pointer("/application/admin_final_status")
            .and_then(Value::as_str),
        Some("Pending")
    );
    assert_eq!(
        payload
            .pointer("/application/approval_status")
            .and_then(Value::as_str),
        Some("Pre-Approved")
    );
}

#[tokio::test]
async fn pan_mismatch_is_unprocessable() {
    let router = build_router();
    let mut bad = submission();
    bad.pan_number = Some("ZZZZZ9999Z".to_string());

    let response = router
        .oneshot(json_request("POST", "/api/v1/loans", &bad))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("PAN"));
}

#[tokio::test]
async fn missing_field_is_a_bad_request() {
    let router = build_router();
    let mut bad = submission();
    bad.user_email = None;

    let response = router
        .oneshot(json_request("POST", "/api/v1/loans", &bad))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verify_endpoint_round_trips() {
    let router = build_router();

    let request = json_request(
        "POST",
        "/api/v1/loans/verify",
        &serde_json::json!({
            "name": "Asha Verma",
            "email": "asha.verma@example.com",
            "bank_id": "7",
        }),
    );
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(
        payload.pointer("/user/id").and_then(Value::as_u64),
        Some(7)
    );

    let unknown = json_request(
        "POST",
        "/api/v1/loans/verify",
        &serde_json::json!({
            "name": "Nobody",
            "email": "nobody@example.com",
            "bank_id": "7",
        }),
    );
    let response = router.oneshot(unknown).await.expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_listing_is_open_and_scoped() {
    let router = build_router();

    router
        .clone()
        .oneshot(json_request("POST", "/api/v1/loans", &submission()))
        .await
        .expect("submit dispatch");

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/loans/user/7")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    let listings = payload.as_array().expect("array body");
    assert_eq!(listings.len(), 1);
    assert_eq!(
        listings[0].get("bank_id").and_then(Value::as_u64),
        Some(7)
    );
}

#[tokio::test]
async fn admin_routes_require_a_valid_token() {
    let router = build_router();

    let bare = Request::builder()
        .method("GET")
        .uri("/api/v1/admin/loans")
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(bare).await.expect("dispatch");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let wrong = Request::builder()
        .method("GET")
        .uri("/api/v1/admin/loans")
        .header("authorization", "Bearer not-the-token")
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(wrong).await.expect("dispatch");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .oneshot(admin_request("GET", "/api/v1/admin/loans", None))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_decision_lifecycle_over_http() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/loans", &submission()))
        .await
        .expect("submit dispatch");
    let payload = json_body(response).await;
    let id = payload
        .pointer("/application/application_id")
        .and_then(Value::as_str)
        .expect("application id")
        .to_string();

    let uri = format!("/api/v1/admin/loans/{id}/decision");

    let response = router
        .clone()
        .oneshot(admin_request(
            "PUT",
            &uri,
            Some(serde_json::json!({ "decision": "Maybe" })),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .clone()
        .oneshot(admin_request(
            "PUT",
            &uri,
            Some(serde_json::json!({ "decision": "Approved" })),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(
        payload
            .pointer("/application/admin_final_status")
            .and_then(Value::as_str),
        Some("Approved")
    );

    // One-way transition: a second decision conflicts.
    let response = router
        .clone()
        .oneshot(admin_request(
            "PUT",
            &uri,
            Some(serde_json::json!({ "decision": "Rejected" })),
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = router
        .oneshot(admin_request(
            "GET",
            "/api/v1/admin/loans/status/approved",
            None,
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let router = build_router();

    let response = router
        .oneshot(admin_request(
            "GET",
            "/api/v1/admin/loans/status/weird",
            None,
        ))
        .await
        .expect("dispatch");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
