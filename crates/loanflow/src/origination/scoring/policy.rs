use super::super::domain::{CreditRating, SystemDecision};

/// Score floor and ceiling applied after summing the factor deltas.
pub const MIN_SCORE: i32 = 300;
pub const MAX_SCORE: i32 = 900;

/// Scores at or above this are pre-approved.
pub const APPROVAL_THRESHOLD: i32 = 500;

pub(crate) fn clamp_score(raw: i32) -> i32 {
    raw.clamp(MIN_SCORE, MAX_SCORE)
}

/// Monotonic step function from total score to the qualitative band.
pub fn rating_for(total_score: i32) -> CreditRating {
    if total_score >= 700 {
        CreditRating::Excellent
    } else if total_score >= 600 {
        CreditRating::Good
    } else if total_score >= 500 {
        CreditRating::Fair
    } else {
        CreditRating::Poor
    }
}

/// A low score is a normal outcome, not an error; the binary decision is
/// derived here and nowhere else.
pub fn decision_for(total_score: i32) -> SystemDecision {
    if total_score >= APPROVAL_THRESHOLD {
        SystemDecision::PreApproved
    } else {
        SystemDecision::Rejected
    }
}
