use crate::infra::InMemoryLoanRepository;
use clap::Args;
use loanflow::error::AppError;
use loanflow::origination::{
    BankDirectory, IdentityRequest, LoanOriginationService, LoanSubmission, StaticBankDirectory,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Bank id of the seeded customer to run the demo as
    #[arg(long, default_value_t = 101)]
    pub(crate) bank_id: u32,
    /// Requested loan amount
    #[arg(long, default_value_t = 400_000.0)]
    pub(crate) amount: f64,
    /// Declared purpose of the loan
    #[arg(long, default_value = "Education")]
    pub(crate) purpose: String,
    /// Applicant age
    #[arg(long, default_value_t = 32)]
    pub(crate) age: u8,
    /// Number of dependents
    #[arg(long, default_value_t = 1)]
    pub(crate) dependents: u8,
    /// Marital status (Single or Married)
    #[arg(long, default_value = "Married")]
    pub(crate) marital_status: String,
}

/// Walk one application through the whole portal against in-memory
/// infrastructure: verify identity, submit, print the breakdown, finalize.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let directory = Arc::new(StaticBankDirectory::seeded());
    let repository = Arc::new(InMemoryLoanRepository::default());

    let Some(record) = directory.lookup_by_id(args.bank_id) else {
        println!("no seeded bank record with id {}", args.bank_id);
        return Ok(());
    };

    let service = LoanOriginationService::new(directory, repository);

    let verified = service.verify_identity(IdentityRequest {
        name: Some(record.name.clone()),
        email: Some(record.email.clone()),
        bank_id: Some(record.id.to_string()),
    })?;
    println!(
        "verified {} <{}> against bank record {} ({} existing loan(s))",
        verified.name,
        verified.email,
        verified.id,
        verified.existing_loans.len()
    );

    let submission = LoanSubmission {
        bank_id: Some(record.id.to_string()),
        user_name: Some(record.name.clone()),
        user_email: Some(record.email.clone()),
        phone_number: Some("+91-99999-00000".to_string()),
        pan_number: Some(record.pan.clone()),
        salary: Some(record.salary.to_string()),
        requested_amount: Some(args.amount.to_string()),
        age: Some(args.age.to_string()),
        dependents: Some(args.dependents.to_string()),
        marital_status: Some(args.marital_status.clone()),
        loan_purpose: Some(args.purpose.clone()),
        pan_document: Some("demo-pan.pdf".to_string()),
        salary_slip: Some("demo-salary-slip.pdf".to_string()),
    };

    let outcome = service.submit(submission)?;

    println!();
    println!(
        "application {} | requested {:.0} against salary {:.0}",
        outcome.application.id.0, outcome.application.requested_amount, outcome.application.salary
    );
    println!("{:-<72}", "");
    for factor in &outcome.score.factors {
        println!(
            "{:<22} {:>5}  {}",
            factor.factor.label(),
            format_delta(factor.delta),
            factor.reason
        );
    }
    println!("{:-<72}", "");
    println!(
        "base {} -> total {} | rating {} | system decision {}",
        outcome.score.base_score,
        outcome.score.total_score,
        outcome.score.rating.label(),
        outcome.score.decision.label()
    );

    let updated = service.finalize(&outcome.application.id, "Approved")?;
    println!(
        "admin finalized {} as {}",
        updated.id.0,
        updated.admin_final_status.label()
    );

    Ok(())
}

fn format_delta(delta: i32) -> String {
    if delta >= 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}
