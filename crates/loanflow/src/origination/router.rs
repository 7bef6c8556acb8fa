use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::bank::BankDirectory;
use super::domain::{
    AdminFinalStatus, ApplicationId, LoanApplicationView,
};
use super::intake::{BusinessRejection, IdentityRequest, LoanSubmission};
use super::repository::{LoanApplicationRepository, RepositoryError};
use super::scoring::ScoreResult;
use super::service::{LoanOriginationService, OriginationError};

/// Pass/fail gate in front of the admin-only routes. Credential storage and
/// token issuance live outside this system.
pub trait AdminGate: Send + Sync {
    fn authorize(&self, bearer_token: &str) -> bool;
}

/// Shared state behind the portal routes.
pub struct PortalState<R, B, G> {
    pub service: Arc<LoanOriginationService<R, B>>,
    pub admin: Arc<G>,
}

/// Router builder exposing the applicant and admin HTTP endpoints.
pub fn loan_router<R, B, G>(
    service: Arc<LoanOriginationService<R, B>>,
    admin: Arc<G>,
) -> Router
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
    G: AdminGate + 'static,
{
    let state = Arc::new(PortalState { service, admin });

    Router::new()
        .route("/api/v1/loans/verify", post(verify_handler::<R, B, G>))
        .route("/api/v1/loans", post(submit_handler::<R, B, G>))
        .route(
            "/api/v1/loans/user/:bank_id",
            get(user_loans_handler::<R, B, G>),
        )
        .route("/api/v1/admin/loans", get(admin_list_handler::<R, B, G>))
        .route(
            "/api/v1/admin/loans/status/:status",
            get(admin_status_handler::<R, B, G>),
        )
        .route(
            "/api/v1/admin/loans/:application_id/decision",
            put(admin_decision_handler::<R, B, G>),
        )
        .with_state(state)
}

/// Submission response: the persisted record plus the full score breakdown.
/// Later retrieval of the same application does not reproduce this payload.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub message: &'static str,
    pub application: LoanApplicationView,
    pub score: ScoreResult,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub decision: String,
}

pub(crate) async fn verify_handler<R, B, G>(
    State(state): State<Arc<PortalState<R, B, G>>>,
    Json(request): Json<IdentityRequest>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
    G: AdminGate + 'static,
{
    match state.service.verify_identity(request) {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "message": "User verified successfully",
                "user": record,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<R, B, G>(
    State(state): State<Arc<PortalState<R, B, G>>>,
    Json(submission): Json<LoanSubmission>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
    G: AdminGate + 'static,
{
    match state.service.submit(submission) {
        Ok(outcome) => {
            let response = SubmissionResponse {
                message: "Loan application submitted",
                application: outcome.application.view(),
                score: outcome.score,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn user_loans_handler<R, B, G>(
    State(state): State<Arc<PortalState<R, B, G>>>,
    Path(bank_id): Path<u32>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
    G: AdminGate + 'static,
{
    match state.service.applications_for(bank_id) {
        Ok(applications) => list_response(applications),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn admin_list_handler<R, B, G>(
    State(state): State<Arc<PortalState<R, B, G>>>,
    headers: HeaderMap,
) -> Response
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
    G: AdminGate + 'static,
{
    if let Some(denied) = require_admin(&state, &headers) {
        return denied;
    }
    match state.service.list_all() {
        Ok(applications) => list_response(applications),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn admin_status_handler<R, B, G>(
    State(state): State<Arc<PortalState<R, B, G>>>,
    headers: HeaderMap,
    Path(status): Path<String>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
    G: AdminGate + 'static,
{
    if let Some(denied) = require_admin(&state, &headers) {
        return denied;
    }
    let Some(status) = AdminFinalStatus::from_label(&status) else {
        let payload = json!({ "error": format!("unknown status '{status}'") });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    };
    match state.service.list_by_status(status) {
        Ok(applications) => list_response(applications),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn admin_decision_handler<R, B, G>(
    State(state): State<Arc<PortalState<R, B, G>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    Json(request): Json<DecisionRequest>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
    G: AdminGate + 'static,
{
    if let Some(denied) = require_admin(&state, &headers) {
        return denied;
    }
    let id = ApplicationId(application_id);
    match state.service.finalize(&id, &request.decision) {
        Ok(updated) => (
            StatusCode::OK,
            Json(json!({
                "message": "Updated",
                "application": updated.view(),
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn list_response(applications: Vec<super::domain::LoanApplication>) -> Response {
    let views: Vec<LoanApplicationView> = applications
        .iter()
        .map(super::domain::LoanApplication::view)
        .collect();
    (StatusCode::OK, Json(views)).into_response()
}

fn require_admin<R, B, G>(
    state: &PortalState<R, B, G>,
    headers: &HeaderMap,
) -> Option<Response>
where
    G: AdminGate,
{
    let authorized = bearer_token(headers)
        .map(|token| state.admin.authorize(token))
        .unwrap_or(false);

    if authorized {
        None
    } else {
        let payload = json!({ "error": "admin authorization required" });
        Some((StatusCode::UNAUTHORIZED, Json(payload)).into_response())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

fn error_response(err: OriginationError) -> Response {
    let status = match &err {
        OriginationError::Precondition(_) => StatusCode::BAD_REQUEST,
        OriginationError::Rejection(BusinessRejection::BankRecordNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        OriginationError::Rejection(_) => StatusCode::UNPROCESSABLE_ENTITY,
        OriginationError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        OriginationError::Repository(RepositoryError::AlreadyDecided { .. }) => {
            StatusCode::CONFLICT
        }
        OriginationError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
