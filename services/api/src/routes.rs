use crate::infra::AppState;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use loanflow::origination::{
    loan_router, AdminGate, BankDirectory, DocumentError, DocumentStore,
    LoanApplicationRepository, LoanOriginationService, MAX_DOCUMENT_BYTES,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_portal_routes<R, B, G>(
    service: Arc<LoanOriginationService<R, B>>,
    admin: Arc<G>,
    documents: Arc<dyn DocumentStore>,
) -> Router
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
    G: AdminGate + 'static,
{
    loan_router(service, admin)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/loans/documents/:file_name",
            post(upload_document_endpoint)
                .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES + 1024)),
        )
        .layer(Extension(documents))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Accept one supporting document as a raw body and hand back the stable
/// stored reference the applicant submits with the loan form.
pub(crate) async fn upload_document_endpoint(
    Extension(store): Extension<Arc<dyn DocumentStore>>,
    Path(file_name): Path<String>,
    body: Bytes,
) -> Response {
    match store.store(&file_name, &body) {
        Ok(document) => (StatusCode::CREATED, Json(json!({ "document": document }))).into_response(),
        Err(err) => {
            let status = match &err {
                DocumentError::Empty => StatusCode::BAD_REQUEST,
                DocumentError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                DocumentError::UnsupportedType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                DocumentError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}
