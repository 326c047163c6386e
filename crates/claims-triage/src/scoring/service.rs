use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use super::config::EngineConfig;
use super::domain::{ClaimId, RiskAssessmentResult};
use super::repository::{AssessmentStore, ClaimStore, StoreError};
use super::{ConfigError, RiskScoringEngine, Variance};

/// Service composing the claim store, the assessment sink, and the engine.
///
/// The claimant-history lookup happens here, before the pure scoring
/// pipeline runs; the engine itself performs no I/O.
pub struct RiskAssessmentService<C, A> {
    claims: Arc<C>,
    assessments: Arc<A>,
    engine: RiskScoringEngine,
}

/// Per-id outcome map for a batch run. Every requested id appears exactly
/// once unless the batch was cancelled part-way.
pub type BatchOutcome = BTreeMap<ClaimId, Result<RiskAssessmentResult, AssessmentError>>;

impl<C, A> RiskAssessmentService<C, A>
where
    C: ClaimStore + 'static,
    A: AssessmentStore + 'static,
{
    pub fn new(claims: Arc<C>, assessments: Arc<A>, config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_variance(claims, assessments, config, Variance::Disabled)
    }

    pub fn with_variance(
        claims: Arc<C>,
        assessments: Arc<A>,
        config: EngineConfig,
        variance: Variance,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            claims,
            assessments,
            engine: RiskScoringEngine::with_variance(config, variance)?,
        })
    }

    pub fn engine(&self) -> &RiskScoringEngine {
        &self.engine
    }

    /// Assess one claim by id and persist the result through the sink.
    pub fn assess(
        &self,
        claim_id: &ClaimId,
        now: NaiveDateTime,
    ) -> Result<RiskAssessmentResult, AssessmentError> {
        let claim = self
            .claims
            .claim(claim_id)?
            .ok_or_else(|| AssessmentError::NotFound(claim_id.clone()))?;
        let history = self.claims.claimant_history(&claim.claimant_id.0)?;

        let result = self.engine.assess(&claim, &history, now)?;
        self.assessments.record(&result)?;

        debug!(claim_id = %claim_id, score = result.score, category = result.category.label(), "claim assessed");
        Ok(result)
    }

    /// Assess a batch of claim ids, isolating failures per id.
    ///
    /// Oversized batches are rejected before any work starts; each id then
    /// appears exactly once in the outcome map, as a success or an error.
    pub fn assess_batch(
        &self,
        ids: &[ClaimId],
        now: NaiveDateTime,
    ) -> Result<BatchOutcome, AssessmentError> {
        let never_cancelled = AtomicBool::new(false);
        self.assess_batch_with_cancel(ids, now, &never_cancelled)
    }

    /// Batch variant honoring a cancellation flag: once raised, no further
    /// per-id assessment is launched and the partial outcome map is returned.
    pub fn assess_batch_with_cancel(
        &self,
        ids: &[ClaimId],
        now: NaiveDateTime,
        cancel: &AtomicBool,
    ) -> Result<BatchOutcome, AssessmentError> {
        let max = self.engine.config().max_batch_size;
        if ids.len() > max {
            return Err(AssessmentError::BatchTooLarge {
                requested: ids.len(),
                max,
            });
        }

        let mut outcomes = BatchOutcome::new();
        for id in ids {
            if cancel.load(Ordering::Acquire) {
                warn!(remaining = ids.len() - outcomes.len(), "batch cancelled, returning partial results");
                break;
            }
            if outcomes.contains_key(id) {
                continue;
            }
            let outcome = self.assess(id, now);
            if let Err(err) = &outcome {
                debug!(claim_id = %id, error = %err, "claim assessment failed");
            }
            outcomes.insert(id.clone(), outcome);
        }
        Ok(outcomes)
    }
}

/// Error raised while assessing a claim.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid {field} for claim {claim_id}: {detail}")]
    InvalidInput {
        claim_id: ClaimId,
        field: &'static str,
        detail: String,
    },
    #[error("claim {0} not found")]
    NotFound(ClaimId),
    #[error("batch of {requested} ids exceeds the maximum of {max}")]
    BatchTooLarge { requested: usize, max: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}
