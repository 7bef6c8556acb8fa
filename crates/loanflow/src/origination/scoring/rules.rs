use super::super::domain::{ApplicationInput, BankRecord, LoanPurpose, MaritalStatus};
use super::{ScoreFactor, ScoreFactorKind};

/// Every evaluation starts from this score before any factor is applied.
pub const BASE_SCORE: i32 = 500;

/// Apply the eight-factor rule table in its fixed order, returning the
/// ordered factor trail and the signed sum of all deltas (unclamped).
pub(crate) fn apply_rule_table(
    input: &ApplicationInput,
    record: &BankRecord,
) -> (Vec<ScoreFactor>, i32) {
    let mut factors = Vec::with_capacity(8);
    let mut delta_sum = 0;

    let mut push = |factors: &mut Vec<ScoreFactor>, kind, delta: i32, reason: &str| {
        factors.push(ScoreFactor {
            factor: kind,
            delta,
            reason: reason.to_string(),
        });
        delta_sum += delta;
    };

    // Factor 1: loan-to-salary ratio. Intake guarantees salary > 0.
    let ratio = input.requested_amount / input.salary;
    let (delta, reason) = if ratio <= 1.0 {
        (150, "Excellent: Loan amount is less than your salary")
    } else if ratio <= 2.0 {
        (100, "Good: Loan amount is less than 2 times your salary")
    } else if ratio <= 3.0 {
        (50, "Average: Loan amount is 2-3 times your salary")
    } else if ratio <= 5.0 {
        (10, "Fair: Loan amount is 3-5 times your salary")
    } else {
        (-50, "Poor: Loan amount is more than 5 times your salary")
    };
    push(&mut factors, ScoreFactorKind::LoanToSalaryRatio, delta, reason);

    // Factor 2: marital status.
    let (delta, reason) = match input.marital_status {
        MaritalStatus::Married => (50, "Good: Married applicants are more stable"),
        MaritalStatus::Single => (20, "Average: Single applicant"),
    };
    push(&mut factors, ScoreFactorKind::MaritalStatus, delta, reason);

    // Factor 3: existing loans held at the bank.
    let (delta, reason) = match record.existing_loans.len() {
        0 => (60, "Excellent: No existing loans"),
        1 => (-20, "Fair: You have 1 existing loan"),
        _ => (-80, "Poor: You have multiple existing loans"),
    };
    push(&mut factors, ScoreFactorKind::ExistingLoans, delta, reason);

    // Factor 4: age band.
    let (delta, reason) = match input.age {
        28..=45 => (80, "Excellent: Prime age for loans (28-45 years)"),
        25..=27 => (50, "Good: Young professional"),
        46..=60 => (40, "Good: Experienced professional"),
        0..=24 => (30, "Fair: Young but starting career"),
        _ => (10, "Average: Approaching retirement"),
    };
    push(&mut factors, ScoreFactorKind::Age, delta, reason);

    // Factor 5: dependents.
    let (delta, reason) = match input.dependents {
        0 => (40, "Excellent: No dependents"),
        1 => (30, "Good: One dependent"),
        2 => (20, "Good: Two dependents"),
        3..=4 => (10, "Average: Moderate dependents"),
        _ => (-30, "Poor: Many dependents"),
    };
    push(&mut factors, ScoreFactorKind::Dependents, delta, reason);

    // Factor 6: declared purpose of the loan.
    let (delta, reason) = match input.loan_purpose {
        LoanPurpose::Education => (80, "Excellent: Education loans have lowest risk"),
        LoanPurpose::Home => (70, "Excellent: Home loans are secured and low risk"),
        LoanPurpose::Medical => (60, "Good: Medical loans are necessary expenses"),
        LoanPurpose::Business => (20, "Average: Business loans have moderate risk"),
        LoanPurpose::Personal => (10, "Fair: Personal loans have higher risk"),
        LoanPurpose::Unspecified => (0, "No specific purpose"),
    };
    push(&mut factors, ScoreFactorKind::LoanPurpose, delta, reason);

    // Factor 7: absolute monthly income.
    let (delta, reason) = if input.salary >= 200_000.0 {
        (100, "Excellent: High income earner")
    } else if input.salary >= 100_000.0 {
        (60, "Good: Above average income")
    } else if input.salary >= 50_000.0 {
        (30, "Average: Moderate income")
    } else if input.salary >= 30_000.0 {
        (10, "Fair: Basic income")
    } else {
        (-20, "Poor: Low income")
    };
    push(&mut factors, ScoreFactorKind::IncomeLevel, delta, reason);

    // Factor 8: employment stability, banded by age independently of factor 4.
    let (delta, reason) = match input.age {
        30..=50 => (50, "Excellent: Most stable employment period"),
        25..=29 | 51..=60 => (30, "Good: Stable employment"),
        _ => (10, "Average: Less stable employment period"),
    };
    push(
        &mut factors,
        ScoreFactorKind::EmploymentStability,
        delta,
        reason,
    );

    (factors, delta_sum)
}
