use serde::{Deserialize, Serialize};

use super::bank::BankDirectory;
use super::domain::{
    ApplicationInput, BankRecord, DocumentRefs, LoanPurpose, MaritalStatus,
};

/// Raw, form-shaped loan request as it arrives over the wire. Every field is
/// optional text here; the intake guard decides what is required and how it
/// coerces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanSubmission {
    #[serde(default)]
    pub bank_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub pan_number: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub requested_amount: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub dependents: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub loan_purpose: Option<String>,
    #[serde(default)]
    pub pan_document: Option<String>,
    #[serde(default)]
    pub salary_slip: Option<String>,
}

/// Identity verification request against the bank directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bank_id: Option<String>,
}

/// Caller bugs: malformed requests rejected before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionViolation {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be a finite, non-negative number")]
    OutOfRange { field: &'static str },
    #[error("salary must be greater than zero")]
    NonPositiveSalary,
    #[error("decision must be Approved or Rejected, got '{value}'")]
    InvalidDecision { value: String },
}

/// Expected, user-visible rejections raised by cross-checking declared data
/// against the matched bank record. None of these reach the scoring engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BusinessRejection {
    #[error("no bank record found for id {0}")]
    BankRecordNotFound(u32),
    #[error("PAN does not match bank records")]
    PanMismatch,
    #[error("declared salary {declared} is below the bank record salary {on_record}")]
    SalaryBelowBankRecord { declared: f64, on_record: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),
    #[error(transparent)]
    Rejection(#[from] BusinessRejection),
}

/// A submission that survived validation: normalized input, the matched bank
/// record, and the applicant-declared contact fields ready to persist.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub bank_record: BankRecord,
    pub input: ApplicationInput,
    pub user_name: String,
    pub user_email: String,
    pub phone_number: String,
    pub pan_number: String,
    pub documents: DocumentRefs,
}

/// Guard converting raw submissions into scoring-ready profiles. Precondition
/// checks run first; the bank-record cross-checks only see coerced values.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn validate<B: BankDirectory + ?Sized>(
        &self,
        submission: LoanSubmission,
        directory: &B,
    ) -> Result<ValidatedSubmission, IntakeError> {
        let bank_id = parse_bank_id("bank_id", submission.bank_id)?;
        let user_name = require_text("user_name", submission.user_name)?;
        let user_email = require_text("user_email", submission.user_email)?;
        let phone_number = require_text("phone_number", submission.phone_number)?;
        let pan_number = require_text("pan_number", submission.pan_number)?.to_uppercase();

        let salary = parse_amount("salary", require_text("salary", submission.salary)?)?;
        if salary <= 0.0 {
            return Err(PreconditionViolation::NonPositiveSalary.into());
        }
        let requested_amount = parse_amount(
            "requested_amount",
            require_text("requested_amount", submission.requested_amount)?,
        )?;

        let age = parse_count("age", submission.age, 25)?;
        let dependents = parse_count("dependents", submission.dependents, 0)?;
        let marital_status = submission
            .marital_status
            .as_deref()
            .map(MaritalStatus::from_form)
            .unwrap_or(MaritalStatus::Single);
        let loan_purpose = submission
            .loan_purpose
            .as_deref()
            .map(LoanPurpose::from_form)
            .unwrap_or(LoanPurpose::Unspecified);

        let documents = DocumentRefs {
            pan_document: require_text("pan_document", submission.pan_document)?,
            salary_slip: require_text("salary_slip", submission.salary_slip)?,
        };

        let bank_record = directory
            .lookup_by_id(bank_id)
            .ok_or(BusinessRejection::BankRecordNotFound(bank_id))?;

        if !bank_record.pan.eq_ignore_ascii_case(&pan_number) {
            return Err(BusinessRejection::PanMismatch.into());
        }

        // Anti-fraud floor: income cannot be declared below what the bank
        // already knows.
        if salary < bank_record.salary {
            return Err(BusinessRejection::SalaryBelowBankRecord {
                declared: salary,
                on_record: bank_record.salary,
            }
            .into());
        }

        Ok(ValidatedSubmission {
            bank_record,
            input: ApplicationInput {
                requested_amount,
                salary,
                age,
                dependents,
                marital_status,
                loan_purpose,
            },
            user_name,
            user_email,
            phone_number,
            pan_number,
            documents,
        })
    }

    pub fn validate_identity(
        &self,
        request: IdentityRequest,
    ) -> Result<(String, String, u32), PreconditionViolation> {
        let name = require_text("name", request.name)?;
        let email = require_text("email", request.email)?;
        let bank_id = parse_bank_id("bank_id", request.bank_id)?;
        Ok((name, email, bank_id))
    }
}

fn require_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, PreconditionViolation> {
    match value {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(PreconditionViolation::MissingField(field))
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => Err(PreconditionViolation::MissingField(field)),
    }
}

fn parse_bank_id(
    field: &'static str,
    value: Option<String>,
) -> Result<u32, PreconditionViolation> {
    let raw = require_text(field, value)?;
    raw.parse::<u32>()
        .map_err(|_| PreconditionViolation::NotANumber { field, value: raw })
}

fn parse_amount(field: &'static str, raw: String) -> Result<f64, PreconditionViolation> {
    let parsed = raw
        .parse::<f64>()
        .map_err(|_| PreconditionViolation::NotANumber {
            field,
            value: raw.clone(),
        })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(PreconditionViolation::OutOfRange { field });
    }
    Ok(parsed)
}

fn parse_count(
    field: &'static str,
    value: Option<String>,
    default: u8,
) -> Result<u8, PreconditionViolation> {
    match value {
        Some(raw) if !raw.trim().is_empty() => {
            let raw = raw.trim();
            raw.parse::<u8>()
                .map_err(|_| PreconditionViolation::NotANumber {
                    field,
                    value: raw.to_string(),
                })
        }
        _ => Ok(default),
    }
}
