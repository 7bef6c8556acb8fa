use super::common::*;
use crate::origination::domain::{CreditRating, LoanPurpose, MaritalStatus, SystemDecision};
use crate::origination::scoring::{
    decision_for, rating_for, ScoreFactorKind, ScoringEngine, BASE_SCORE, MAX_SCORE,
};

const FACTOR_ORDER: [ScoreFactorKind; 8] = [
    ScoreFactorKind::LoanToSalaryRatio,
    ScoreFactorKind::MaritalStatus,
    ScoreFactorKind::ExistingLoans,
    ScoreFactorKind::Age,
    ScoreFactorKind::Dependents,
    ScoreFactorKind::LoanPurpose,
    ScoreFactorKind::IncomeLevel,
    ScoreFactorKind::EmploymentStability,
];

#[test]
fn strong_profile_scores_840() {
    let engine = ScoringEngine;
    let result = engine.evaluate(
        &input(
            500_000.0,
            50_000.0,
            30,
            0,
            MaritalStatus::Married,
            LoanPurpose::Education,
        ),
        &bank_record(),
    );

    let deltas: Vec<i32> = result.factors.iter().map(|factor| factor.delta).collect();
    assert_eq!(deltas, vec![-50, 50, 60, 80, 40, 80, 30, 50]);
    assert_eq!(result.base_score, BASE_SCORE);
    assert_eq!(result.total_score, 840);
    assert_eq!(result.rating, CreditRating::Excellent);
    assert_eq!(result.decision, SystemDecision::PreApproved);
}

#[test]
fn weak_profile_scores_400() {
    let engine = ScoringEngine;
    let result = engine.evaluate(
        &input(
            3_000_000.0,
            20_000.0,
            65,
            6,
            MaritalStatus::Married,
            LoanPurpose::Personal,
        ),
        &bank_record_with_loans(2),
    );

    let deltas: Vec<i32> = result.factors.iter().map(|factor| factor.delta).collect();
    assert_eq!(deltas, vec![-50, 50, -80, 10, -30, 10, -20, 10]);
    assert_eq!(result.total_score, 400);
    assert_eq!(result.rating, CreditRating::Poor);
    assert_eq!(result.decision, SystemDecision::Rejected);
}

#[test]
fn breakdown_preserves_evaluation_order() {
    let engine = ScoringEngine;
    let result = engine.evaluate(
        &input(
            100_000.0,
            60_000.0,
            40,
            2,
            MaritalStatus::Single,
            LoanPurpose::Home,
        ),
        &bank_record(),
    );

    let kinds: Vec<ScoreFactorKind> = result.factors.iter().map(|factor| factor.factor).collect();
    assert_eq!(kinds, FACTOR_ORDER);
    assert!(result
        .factors
        .iter()
        .all(|factor| !factor.reason.is_empty()));
}

#[test]
fn ratio_exactly_two_takes_the_middle_tier() {
    let engine = ScoringEngine;
    let result = engine.evaluate(
        &input(
            100_000.0,
            50_000.0,
            30,
            0,
            MaritalStatus::Single,
            LoanPurpose::Unspecified,
        ),
        &bank_record(),
    );

    assert_eq!(result.factors[0].delta, 100);
    assert!(result.factors[0].reason.contains("2 times"));
}

#[test]
fn total_is_clamped_at_the_ceiling() {
    let engine = ScoringEngine;
    // Every factor at its maximum sums past 900 before clamping.
    let result = engine.evaluate(
        &input(
            200_000.0,
            250_000.0,
            30,
            0,
            MaritalStatus::Married,
            LoanPurpose::Education,
        ),
        &bank_record(),
    );

    let delta_sum: i32 = result.factors.iter().map(|factor| factor.delta).sum();
    assert!(BASE_SCORE + delta_sum > MAX_SCORE);
    assert_eq!(result.total_score, MAX_SCORE);
}

#[test]
fn score_of_exactly_500_is_pre_approved() {
    let engine = ScoringEngine;
    // Deltas: +10, +20, -80, +30, +30, 0, -20, +10 sum to zero.
    let result = engine.evaluate(
        &input(
            80_000.0,
            20_000.0,
            22,
            1,
            MaritalStatus::Single,
            LoanPurpose::Unspecified,
        ),
        &bank_record_with_loans(2),
    );

    assert_eq!(result.total_score, 500);
    assert_eq!(result.rating, CreditRating::Fair);
    assert_eq!(result.decision, SystemDecision::PreApproved);
}

#[test]
fn evaluation_is_deterministic() {
    let engine = ScoringEngine;
    let profile = input(
        350_000.0,
        95_000.0,
        47,
        3,
        MaritalStatus::Married,
        LoanPurpose::Business,
    );
    let record = bank_record_with_loans(1);

    let first = engine.evaluate(&profile, &record);
    let second = engine.evaluate(&profile, &record);
    assert_eq!(first, second);
}

#[test]
fn total_matches_clamped_factor_sum() {
    let engine = ScoringEngine;
    let inputs = [
        input(10_000.0, 40_000.0, 19, 5, MaritalStatus::Single, LoanPurpose::Medical),
        input(900_000.0, 30_000.0, 55, 0, MaritalStatus::Married, LoanPurpose::Home),
        input(75_000.0, 150_000.0, 33, 2, MaritalStatus::Single, LoanPurpose::Personal),
    ];

    for profile in &inputs {
        let result = engine.evaluate(profile, &bank_record());
        let delta_sum: i32 = result.factors.iter().map(|factor| factor.delta).sum();
        assert_eq!(
            result.total_score,
            (result.base_score + delta_sum).clamp(300, 900)
        );
        assert!((300..=900).contains(&result.total_score));
    }
}

#[test]
fn rating_thresholds_are_exact() {
    assert_eq!(rating_for(700), CreditRating::Excellent);
    assert_eq!(rating_for(699), CreditRating::Good);
    assert_eq!(rating_for(600), CreditRating::Good);
    assert_eq!(rating_for(599), CreditRating::Fair);
    assert_eq!(rating_for(500), CreditRating::Fair);
    assert_eq!(rating_for(499), CreditRating::Poor);
}

#[test]
fn decision_threshold_is_exact() {
    assert_eq!(decision_for(500), SystemDecision::PreApproved);
    assert_eq!(decision_for(499), SystemDecision::Rejected);
}
