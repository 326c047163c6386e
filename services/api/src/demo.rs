use crate::infra::{
    default_engine_config, seed_sample_claims, InMemoryAssessmentStore, InMemoryClaimStore,
};
use chrono::Local;
use clap::Args;
use claims_triage::error::AppError;
use claims_triage::scoring::{ClaimId, RiskAssessmentService, Variance};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Apply seeded model-variance simulation to the demo run
    #[arg(long)]
    pub(crate) variance_seed: Option<u64>,
}

/// Score the seeded sample claims plus one unknown id and print the per-claim
/// outcomes, demonstrating batch isolation on the command line.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let claims = Arc::new(InMemoryClaimStore::default());
    seed_sample_claims(&claims);
    let assessments = Arc::new(InMemoryAssessmentStore::default());

    let variance = match args.variance_seed {
        Some(seed) => Variance::Seeded(seed),
        None => Variance::Disabled,
    };
    let service = RiskAssessmentService::with_variance(
        claims,
        assessments.clone(),
        default_engine_config(),
        variance,
    )?;

    let ids: Vec<ClaimId> = ["claim-0001", "claim-0002", "claim-0003", "claim-9999"]
        .into_iter()
        .map(|id| ClaimId(id.to_string()))
        .collect();

    let now = Local::now().naive_local();
    let outcomes = service
        .assess_batch(&ids, now)
        .expect("demo batch is below the size cap");

    println!("assessed {} claim(s) at {now}", outcomes.len());
    for (id, outcome) in &outcomes {
        match outcome {
            Ok(result) => {
                println!(
                    "  {id}: score {} ({}), confidence {:.2}",
                    result.score,
                    result.category.label(),
                    result.ensemble.confidence
                );
                println!("    {}", result.explanation.summary);
                for recommendation in &result.explanation.recommendations {
                    println!("    - {recommendation}");
                }
            }
            Err(err) => println!("  {id}: failed ({err})"),
        }
    }
    println!("{} assessment(s) persisted", assessments.records().len());

    Ok(())
}
