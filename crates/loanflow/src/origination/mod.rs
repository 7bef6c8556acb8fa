//! Loan application intake, rule-based credit scoring, and admin decisioning.
//!
//! The scoring engine is a pure function over the applicant's declared input
//! and the matched bank record; everything around it is orchestration. The
//! bank directory and the application repository are trait seams so the
//! workflow can be driven entirely in-memory in tests.

pub mod bank;
pub mod documents;
pub mod domain;
pub mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use bank::{BankDirectory, StaticBankDirectory};
pub use documents::{
    sanitize_file_name, DocumentError, DocumentStore, StoredDocument, ALLOWED_CONTENT_TYPES,
    MAX_DOCUMENT_BYTES,
};
pub use domain::{
    AdminFinalStatus, ApplicationId, ApplicationInput, BankRecord, CreditRating, DocumentRefs,
    ExistingLoan, FinalDecision, LoanApplication, LoanApplicationView, LoanPurpose, MaritalStatus,
    SystemDecision,
};
pub use intake::{
    BusinessRejection, IdentityRequest, IntakeError, IntakeGuard, LoanSubmission,
    PreconditionViolation, ValidatedSubmission,
};
pub use repository::{LoanApplicationRepository, RepositoryError};
pub use router::{loan_router, AdminGate, DecisionRequest, PortalState, SubmissionResponse};
pub use scoring::{
    decision_for, rating_for, ScoreFactor, ScoreFactorKind, ScoreResult, ScoringEngine,
    APPROVAL_THRESHOLD, BASE_SCORE, MAX_SCORE, MIN_SCORE,
};
pub use service::{LoanOriginationService, OriginationError, SubmissionOutcome};
