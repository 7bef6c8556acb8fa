use std::sync::{Arc, Mutex};

use crate::origination::bank::StaticBankDirectory;
use crate::origination::domain::{
    AdminFinalStatus, ApplicationId, ApplicationInput, BankRecord, ExistingLoan, FinalDecision,
    LoanApplication, LoanPurpose, MaritalStatus,
};
use crate::origination::intake::LoanSubmission;
use crate::origination::repository::{LoanApplicationRepository, RepositoryError};
use crate::origination::router::AdminGate;
use crate::origination::service::LoanOriginationService;

pub(super) const ADMIN_TOKEN: &str = "test-admin-token";

pub(super) fn bank_record() -> BankRecord {
    BankRecord {
        id: 7,
        name: "Asha Verma".to_string(),
        email: "asha.verma@example.com".to_string(),
        pan: "AAAPV1111A".to_string(),
        salary: 50_000.0,
        existing_loans: Vec::new(),
    }
}

pub(super) fn bank_record_with_loans(count: usize) -> BankRecord {
    let mut record = bank_record();
    record.id = 8;
    record.pan = "BBBPV2222B".to_string();
    record.salary = 20_000.0;
    record.existing_loans = (0..count)
        .map(|index| ExistingLoan {
            purpose: format!("Personal #{index}"),
            outstanding_amount: 40_000.0,
        })
        .collect();
    record
}

pub(super) fn directory() -> StaticBankDirectory {
    StaticBankDirectory::new(vec![bank_record(), bank_record_with_loans(2)])
}

pub(super) fn input(
    requested_amount: f64,
    salary: f64,
    age: u8,
    dependents: u8,
    marital_status: MaritalStatus,
    loan_purpose: LoanPurpose,
) -> ApplicationInput {
    ApplicationInput {
        requested_amount,
        salary,
        age,
        dependents,
        marital_status,
        loan_purpose,
    }
}

/// Submission matching `bank_record()` that scores 840 (concrete scenario A).
pub(super) fn submission() -> LoanSubmission {
    LoanSubmission {
        bank_id: Some("7".to_string()),
        user_name: Some("Asha Verma".to_string()),
        user_email: Some("asha.verma@example.com".to_string()),
        phone_number: Some("+91-98765-43210".to_string()),
        pan_number: Some("aaapv1111a".to_string()),
        salary: Some("50000".to_string()),
        requested_amount: Some("500000".to_string()),
        age: Some("30".to_string()),
        dependents: Some("0".to_string()),
        marital_status: Some("Married".to_string()),
        loan_purpose: Some("Education".to_string()),
        pan_document: Some("1724-pan.pdf".to_string()),
        salary_slip: Some("1724-salary-slip.pdf".to_string()),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<LoanApplication>>>,
}

impl LoanApplicationRepository for MemoryRepository {
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

pub(super) struct TokenGate(pub(super) String);

impl AdminGate for TokenGate {
    fn authorize(&self, bearer_token: &str) -> bool {
        bearer_token == self.0
    }
}

pub(super) fn build_service() -> (
    LoanOriginationService<MemoryRepository, StaticBankDirectory>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LoanOriginationService::new(Arc::new(directory()), repository.clone());
    (service, repository)
}
