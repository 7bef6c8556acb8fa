mod policy;
mod rules;

pub use policy::{decision_for, rating_for, APPROVAL_THRESHOLD, MAX_SCORE, MIN_SCORE};
pub use rules::BASE_SCORE;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationInput, BankRecord, CreditRating, SystemDecision};

/// The factors evaluated by the rule table, listed in evaluation order. The
/// order is load-bearing: the breakdown shown to applicants preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFactorKind {
    LoanToSalaryRatio,
    MaritalStatus,
    ExistingLoans,
    Age,
    Dependents,
    LoanPurpose,
    IncomeLevel,
    EmploymentStability,
}

impl ScoreFactorKind {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactorKind::LoanToSalaryRatio => "Loan vs Salary Ratio",
            ScoreFactorKind::MaritalStatus => "Marital Status",
            ScoreFactorKind::ExistingLoans => "Existing Loans",
            ScoreFactorKind::Age => "Age Factor",
            ScoreFactorKind::Dependents => "Dependents",
            ScoreFactorKind::LoanPurpose => "Loan Purpose",
            ScoreFactorKind::IncomeLevel => "Income Level",
            ScoreFactorKind::EmploymentStability => "Employment Stability",
        }
    }
}

/// Single contribution to a score, allowing a transparent audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub factor: ScoreFactorKind,
    pub delta: i32,
    pub reason: String,
}

/// Output of the scoring engine, immutable once produced.
///
/// Invariants: `total_score == clamp(base_score + sum(deltas), 300, 900)`;
/// `decision` is `Pre-Approved` exactly when `total_score >= 500`; `rating`
/// is a step function of `total_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub base_score: i32,
    pub factors: Vec<ScoreFactor>,
    pub total_score: i32,
    pub rating: CreditRating,
    pub decision: SystemDecision,
}

/// Stateless evaluator applying the hand-authored rule table.
///
/// The evaluation is a total, deterministic function of its two inputs. It
/// never fails for in-range business values; malformed input is the intake
/// guard's problem, upstream of this type.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn evaluate(&self, input: &ApplicationInput, record: &BankRecord) -> ScoreResult {
        let (factors, delta_sum) = rules::apply_rule_table(input, record);
        let total_score = policy::clamp_score(rules::BASE_SCORE + delta_sum);

        ScoreResult {
            base_score: rules::BASE_SCORE,
            factors,
            total_score,
            rating: policy::rating_for(total_score),
            decision: policy::decision_for(total_score),
        }
    }
}
