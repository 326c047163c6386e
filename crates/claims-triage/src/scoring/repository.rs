use super::domain::{ClaimAttributes, ClaimId, ClaimantHistory, RiskAssessmentResult};

/// Read-only view of the external claim store. The engine only ever consumes
/// claims and histories; it never writes through this trait.
pub trait ClaimStore: Send + Sync {
    fn claim(&self, id: &ClaimId) -> Result<Option<ClaimAttributes>, StoreError>;
    fn claimant_history(&self, claimant_id: &str) -> Result<ClaimantHistory, StoreError>;
}

/// Sink for finished assessments so the service module can be exercised with
/// in-memory fakes.
pub trait AssessmentStore: Send + Sync {
    fn record(&self, assessment: &RiskAssessmentResult) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store rejected the record: {0}")]
    Rejected(String),
}
