use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use loanflow::origination::{
    sanitize_file_name, AdminFinalStatus, ApplicationId, DocumentError, DocumentStore,
    FinalDecision, LoanApplication, LoanApplicationRepository, RepositoryError, StoredDocument,
    ALLOWED_CONTENT_TYPES, MAX_DOCUMENT_BYTES,
};
use loanflow::origination::router::AdminGate;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Vec-backed store: insertion order is submission order, so newest-first
/// listings just walk it in reverse.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanRepository {
    records: Arc<Mutex<Vec<LoanApplication>>>,
}

impl LoanApplicationRepository for InMemoryLoanRepository {
    fn insert(&self, application: LoanApplication) -> Result<LoanApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn for_bank(&self, bank_id: u32) -> Result<Vec<LoanApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| record.bank_id == bank_id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<LoanApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn with_status(
        &self,
        status: AdminFinalStatus,
    ) -> Result<Vec<LoanApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| record.admin_final_status == status)
            .cloned()
            .collect())
    }

    fn finalize(
        &self,
        id: &ApplicationId,
        decision: FinalDecision,
    ) -> Result<LoanApplication, RepositoryError> {
        // Single lock for the read-modify-write keeps the transition atomic
        // per record.
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if record.admin_final_status != AdminFinalStatus::Pending {
            return Err(RepositoryError::AlreadyDecided {
                current: record.admin_final_status.label(),
            });
        }
        record.admin_final_status = decision.as_status();
        Ok(record.clone())
    }
}

/// Shared-secret gate standing in for the external admin identity provider.
pub(crate) struct StaticAdminToken {
    token: String,
}

impl StaticAdminToken {
    pub(crate) fn new(token: String) -> Self {
        Self { token }
    }
}

impl AdminGate for StaticAdminToken {
    fn authorize(&self, bearer_token: &str) -> bool {
        bearer_token == self.token
    }
}

/// Disk-backed document store: uploads land under one directory with a
/// millisecond-timestamp prefix on the sanitized original name.
pub(crate) struct DiskDocumentStore {
    root: PathBuf,
}

impl DiskDocumentStore {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl DocumentStore for DiskDocumentStore {
    fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredDocument, DocumentError> {
        if bytes.is_empty() {
            return Err(DocumentError::Empty);
        }
        if bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(DocumentError::TooLarge);
        }

        let content_type = mime_guess::from_path(original_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(DocumentError::UnsupportedType {
                detected: content_type,
            });
        }

        std::fs::create_dir_all(&self.root)
            .map_err(|err| DocumentError::Unavailable(err.to_string()))?;

        let stored_as = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        std::fs::write(self.root.join(&stored_as), bytes)
            .map_err(|err| DocumentError::Unavailable(err.to_string()))?;

        Ok(StoredDocument {
            stored_as,
            content_type,
            size_bytes: bytes.len() as u64,
        })
    }
}
