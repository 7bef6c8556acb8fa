use super::domain::{AdminFinalStatus, ApplicationId, FinalDecision, LoanApplication};

/// Storage abstraction so the origination service can be exercised in
/// isolation. Listing methods return records newest-first by submission time.
pub trait LoanApplicationRepository: Send + Sync {
    fn insert(&self, application: LoanApplication) -> Result<LoanApplication, RepositoryError>;

    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, RepositoryError>;

    fn for_bank(&self, bank_id: u32) -> Result<Vec<LoanApplication>, RepositoryError>;

    fn all(&self) -> Result<Vec<LoanApplication>, RepositoryError>;

    fn with_status(
        &self,
        status: AdminFinalStatus,
    ) -> Result<Vec<LoanApplication>, RepositoryError>;

    /// Atomic per-record read-modify-write of the admin status. The
    /// transition is one-way: only a `Pending` application may be decided,
    /// and a second decision fails without mutating the record.
    fn finalize(
        &self,
        id: &ApplicationId,
        decision: FinalDecision,
    ) -> Result<LoanApplication, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("application already exists")]
    Conflict,
    #[error("application not found")]
    NotFound,
    #[error("application already decided as {current}")]
    AlreadyDecided { current: &'static str },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
