use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::ScoreResult;

/// Identifier wrapper for persisted loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Ground-truth customer profile held by the bank. Records are externally
/// supplied, looked up by id, and never mutated by this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub pan: String,
    pub salary: f64,
    pub existing_loans: Vec<ExistingLoan>,
}

/// Reference to a loan the bank already holds for a customer. Scoring only
/// counts these; the amounts exist for audit display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingLoan {
    pub purpose: String,
    pub outstanding_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
        }
    }

    /// Form values other than `Married` fall back to `Single`, matching the
    /// permissive intake the scoring rules expect.
    pub fn from_form(value: &str) -> Self {
        if value.trim() == "Married" {
            MaritalStatus::Married
        } else {
            MaritalStatus::Single
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanPurpose {
    Education,
    Medical,
    Home,
    Business,
    Personal,
    Unspecified,
}

impl LoanPurpose {
    pub const fn label(self) -> &'static str {
        match self {
            LoanPurpose::Education => "Education",
            LoanPurpose::Medical => "Medical",
            LoanPurpose::Home => "Home",
            LoanPurpose::Business => "Business",
            LoanPurpose::Personal => "Personal",
            LoanPurpose::Unspecified => "Unspecified",
        }
    }

    /// Unknown purposes are kept as `Unspecified` rather than rejected; the
    /// rule table scores them as a zero-point factor.
    pub fn from_form(value: &str) -> Self {
        match value.trim() {
            "Education" => LoanPurpose::Education,
            "Medical" => LoanPurpose::Medical,
            "Home" => LoanPurpose::Home,
            "Business" => LoanPurpose::Business,
            "Personal" => LoanPurpose::Personal,
            _ => LoanPurpose::Unspecified,
        }
    }
}

/// Normalized applicant profile handed to the scoring engine. Intake
/// guarantees `salary > 0` before one of these is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub requested_amount: f64,
    pub salary: f64,
    pub age: u8,
    pub dependents: u8,
    pub marital_status: MaritalStatus,
    pub loan_purpose: LoanPurpose,
}

/// Qualitative band derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CreditRating {
    pub const fn label(self) -> &'static str {
        match self {
            CreditRating::Poor => "Poor",
            CreditRating::Fair => "Fair",
            CreditRating::Good => "Good",
            CreditRating::Excellent => "Excellent",
        }
    }
}

/// Automated outcome computed at submission time, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemDecision {
    #[serde(rename = "Pre-Approved")]
    PreApproved,
    Rejected,
}

impl SystemDecision {
    pub const fn label(self) -> &'static str {
        match self {
            SystemDecision::PreApproved => "Pre-Approved",
            SystemDecision::Rejected => "Rejected",
        }
    }
}

/// Human-in-the-loop status, independent of the system decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminFinalStatus {
    Pending,
    Approved,
    Rejected,
}

impl AdminFinalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AdminFinalStatus::Pending => "Pending",
            AdminFinalStatus::Approved => "Approved",
            AdminFinalStatus::Rejected => "Rejected",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(AdminFinalStatus::Pending),
            "approved" => Some(AdminFinalStatus::Approved),
            "rejected" => Some(AdminFinalStatus::Rejected),
            _ => None,
        }
    }
}

/// The only values an administrator may finalize with. Anything else is a
/// caller error and must be rejected before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalDecision {
    Approved,
    Rejected,
}

impl FinalDecision {
    pub fn from_form(value: &str) -> Option<Self> {
        match value.trim() {
            "Approved" => Some(FinalDecision::Approved),
            "Rejected" => Some(FinalDecision::Rejected),
            _ => None,
        }
    }

    pub const fn as_status(self) -> AdminFinalStatus {
        match self {
            FinalDecision::Approved => AdminFinalStatus::Approved,
            FinalDecision::Rejected => AdminFinalStatus::Rejected,
        }
    }
}

/// Stable references to the two supporting documents stored alongside an
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRefs {
    pub pan_document: String,
    pub salary_slip: String,
}

/// Persistent application record. `admin_final_status` is the only field that
/// changes after creation; records are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub id: ApplicationId,
    pub bank_id: u32,
    pub user_name: String,
    pub user_email: String,
    pub phone_number: String,
    pub pan_number: String,
    pub salary: f64,
    pub requested_amount: f64,
    pub loan_purpose: LoanPurpose,
    pub marital_status: MaritalStatus,
    pub age: u8,
    pub dependents: u8,
    pub score: ScoreResult,
    pub system_decision: SystemDecision,
    pub admin_final_status: AdminFinalStatus,
    pub documents: DocumentRefs,
    pub submitted_at: DateTime<Utc>,
}

impl LoanApplication {
    pub fn credit_score(&self) -> i32 {
        self.score.total_score
    }

    pub fn view(&self) -> LoanApplicationView {
        LoanApplicationView {
            application_id: self.id.0.clone(),
            bank_id: self.bank_id,
            user_name: self.user_name.clone(),
            user_email: self.user_email.clone(),
            phone_number: self.phone_number.clone(),
            pan_number: self.pan_number.clone(),
            salary: self.salary,
            requested_amount: self.requested_amount,
            loan_purpose: self.loan_purpose.label(),
            marital_status: self.marital_status.label(),
            age: self.age,
            dependents: self.dependents,
            credit_score: self.score.total_score,
            rating: self.score.rating.label(),
            approval_status: self.system_decision.label(),
            admin_final_status: self.admin_final_status.label(),
            documents: self.documents.clone(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Flattened representation returned by list and status endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct LoanApplicationView {
    pub application_id: String,
    pub bank_id: u32,
    pub user_name: String,
    pub user_email: String,
    pub phone_number: String,
    pub pan_number: String,
    pub salary: f64,
    pub requested_amount: f64,
    pub loan_purpose: &'static str,
    pub marital_status: &'static str,
    pub age: u8,
    pub dependents: u8,
    pub credit_score: i32,
    pub rating: &'static str,
    pub approval_status: &'static str,
    pub admin_final_status: &'static str,
    pub documents: DocumentRefs,
    pub submitted_at: DateTime<Utc>,
}
