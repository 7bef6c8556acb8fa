use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::bank::BankDirectory;
use super::domain::{
    AdminFinalStatus, ApplicationId, BankRecord, LoanApplication,
};
use super::intake::{
    BusinessRejection, IdentityRequest, IntakeError, IntakeGuard, LoanSubmission,
    PreconditionViolation,
};
use super::repository::{LoanApplicationRepository, RepositoryError};
use super::scoring::{ScoreResult, ScoringEngine};

/// Service composing the bank directory, intake guard, scoring engine, and
/// application repository. This is the only caller of the scoring engine.
pub struct LoanOriginationService<R, B> {
    directory: Arc<B>,
    repository: Arc<R>,
    guard: IntakeGuard,
    engine: ScoringEngine,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("loan-{id:06}"))
}

/// The persisted record plus the full breakdown. Submission time is the only
/// point at which the caller receives the ordered factor trail directly.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub application: LoanApplication,
    pub score: ScoreResult,
}

impl<R, B> LoanOriginationService<R, B>
where
    R: LoanApplicationRepository + 'static,
    B: BankDirectory + 'static,
{
    pub fn new(directory: Arc<B>, repository: Arc<R>) -> Self {
        Self {
            directory,
            repository,
            guard: IntakeGuard,
            engine: ScoringEngine,
        }
    }

    /// Check applicant-declared identity against the bank directory.
    pub fn verify_identity(
        &self,
        request: IdentityRequest,
    ) -> Result<BankRecord, OriginationError> {
        let (name, email, bank_id) = self.guard.validate_identity(request)?;
        self.directory
            .lookup_by_identity(&name, &email, bank_id)
            .ok_or_else(|| BusinessRejection::BankRecordNotFound(bank_id).into())
    }

    /// Validate, cross-check, score, and persist a new application. The
    /// stored record starts with `admin_final_status = Pending`.
    pub fn submit(
        &self,
        submission: LoanSubmission,
    ) -> Result<SubmissionOutcome, OriginationError> {
        let validated = self.guard.validate(submission, self.directory.as_ref())?;
        let score = self.engine.evaluate(&validated.input, &validated.bank_record);

        let application = LoanApplication {
            id: next_application_id(),
            bank_id: validated.bank_record.id,
            user_name: validated.user_name,
            user_email: validated.user_email,
            phone_number: validated.phone_number,
            pan_number: validated.pan_number,
            salary: validated.input.salary,
            requested_amount: validated.input.requested_amount,
            loan_purpose: validated.input.loan_purpose,
            marital_status: validated.input.marital_status,
            age: validated.input.age,
            dependents: validated.input.dependents,
            system_decision: score.decision,
            admin_final_status: AdminFinalStatus::Pending,
            score: score.clone(),
            documents: validated.documents,
            submitted_at: Utc::now(),
        };

        let stored = self.repository.insert(application)?;
        info!(
            application_id = %stored.id.0,
            total_score = score.total_score,
            decision = score.decision.label(),
            "loan application scored"
        );

        Ok(SubmissionOutcome {
            application: stored,
            score,
        })
    }

    /// Applications previously submitted under a bank id, newest-first.
    pub fn applications_for(&self, bank_id: u32) -> Result<Vec<LoanApplication>, OriginationError> {
        Ok(self.repository.for_bank(bank_id)?)
    }

    pub fn list_all(&self) -> Result<Vec<LoanApplication>, OriginationError> {
        Ok(self.repository.all()?)
    }

    pub fn list_by_status(
        &self,
        status: AdminFinalStatus,
    ) -> Result<Vec<LoanApplication>, OriginationError> {
        Ok(self.repository.with_status(status)?)
    }

    /// Record the administrator's final call. The raw decision value is
    /// parsed here so an invalid value never reaches the store; scoring is
    /// not re-run.
    pub fn finalize(
        &self,
        id: &ApplicationId,
        decision_value: &str,
    ) -> Result<LoanApplication, OriginationError> {
        let decision = super::domain::FinalDecision::from_form(decision_value).ok_or_else(|| {
            PreconditionViolation::InvalidDecision {
                value: decision_value.to_string(),
            }
        })?;

        let updated = self.repository.finalize(id, decision)?;
        info!(
            application_id = %updated.id.0,
            status = updated.admin_final_status.label(),
            "loan application finalized"
        );
        Ok(updated)
    }
}

/// Error raised by the origination service: caller bugs, expected business
/// rejections, and storage failures.
#[derive(Debug, thiserror::Error)]
pub enum OriginationError {
    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),
    #[error(transparent)]
    Rejection(#[from] BusinessRejection),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<IntakeError> for OriginationError {
    fn from(value: IntakeError) -> Self {
        match value {
            IntakeError::Precondition(err) => Self::Precondition(err),
            IntakeError::Rejection(err) => Self::Rejection(err),
        }
    }
}
