//! Claim fraud risk scoring: feature extraction, three deterministic
//! scoring strategies, fixed-weight ensemble, category classification, and
//! explanation generation.
//!
//! The engine is stateless per call; the only shared state is the read-only
//! [`EngineConfig`] injected at construction.

pub mod classify;
pub mod config;
pub mod domain;
pub mod ensemble;
pub mod explain;
pub mod factors;
pub mod repository;
pub mod router;
pub mod service;
pub mod strategies;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, EngineConfig};
pub use domain::{
    ClaimAttributes, ClaimHistorySummary, ClaimId, ClaimType, ClaimantHistory, ClaimantId,
    EnsembleResult, Explanation, FactorContribution, RiskAssessmentResult, RiskCategory,
    RiskFactors, RiskSignal, StrategyKind, StrategyOutput, StrategyWeights, UrbanDensity,
    VehicleRisk,
};
pub use repository::{AssessmentStore, ClaimStore, StoreError};
pub use router::assessment_router;
pub use service::{AssessmentError, RiskAssessmentService};
pub use strategies::Variance;

use chrono::NaiveDateTime;
use strategies::{
    LinearStrategy, RuleAccumulationStrategy, ScoringStrategy, StagedIncrementStrategy,
};

/// Stateless engine running the full per-claim pipeline: extract factors,
/// score with each strategy, combine, classify, explain.
#[derive(Debug)]
pub struct RiskScoringEngine {
    config: EngineConfig,
    rule_accumulation: RuleAccumulationStrategy,
    staged_increment: StagedIncrementStrategy,
    linear: LinearStrategy,
    variance: Variance,
}

impl RiskScoringEngine {
    /// Build an engine, rejecting invalid configuration before any request
    /// can be served.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_variance(config, Variance::Disabled)
    }

    /// Variant for demos that want simulated model variance; the source is
    /// seeded so results stay reproducible.
    pub fn with_variance(config: EngineConfig, variance: Variance) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rule_accumulation: RuleAccumulationStrategy,
            staged_increment: StagedIncrementStrategy,
            linear: LinearStrategy,
            variance,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assess a single claim. `now` is the assessment time, injected rather
    /// than read from the clock so the pipeline is deterministic.
    pub fn assess(
        &self,
        claim: &ClaimAttributes,
        history: &ClaimantHistory,
        now: NaiveDateTime,
    ) -> Result<RiskAssessmentResult, AssessmentError> {
        let factors = factors::extract(claim, history, &self.config, now)?;

        let mut outputs = vec![
            self.rule_accumulation.score(&factors),
            self.staged_increment.score(&factors),
            self.linear.score(&factors),
        ];
        self.variance.apply(&mut outputs);

        let ensemble = ensemble::combine(
            &outputs[0],
            &outputs[1],
            &outputs[2],
            self.config.strategy_weights,
        );
        let category = classify::classify(ensemble.score);
        let explanation = explain::explain(&factors, category);

        Ok(RiskAssessmentResult {
            claim_id: claim.claim_id.clone(),
            score: ensemble.score,
            category,
            ensemble,
            strategy_outputs: outputs,
            factors,
            explanation,
            assessed_at: now,
        })
    }
}
