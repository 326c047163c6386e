//! Deterministic scoring policies.
//!
//! Each strategy maps extracted risk factors to a clamped score, a
//! confidence, and a factor importance map. Strategies perform no I/O and
//! hold no mutable state; variance simulation is available only through the
//! explicit seeded [`Variance`] source and is disabled by default.

mod linear;
mod rule_accumulation;
mod staged_increment;

pub use linear::LinearStrategy;
pub use rule_accumulation::RuleAccumulationStrategy;
pub use staged_increment::StagedIncrementStrategy;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::domain::{RiskFactors, StrategyOutput};

/// One independent deterministic scoring policy.
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, factors: &RiskFactors) -> StrategyOutput;
}

/// Clamp a raw strategy score into the documented [1, 100] band.
pub(crate) fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(1.0, 100.0) as u8
}

pub(crate) fn clamp_confidence(raw: f64) -> f64 {
    raw.clamp(0.0, 1.0)
}

/// Optional simulated model variance for demos. Seeded so that the same seed
/// always produces the same perturbation; `Disabled` leaves outputs untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variance {
    Disabled,
    Seeded(u64),
}

impl Variance {
    pub(crate) fn apply(self, outputs: &mut [StrategyOutput]) {
        let Variance::Seeded(seed) = self else {
            return;
        };

        let mut rng = StdRng::seed_from_u64(seed);
        for output in outputs {
            let score_jitter: i32 = rng.gen_range(-2..=2);
            output.score = clamp_score(f64::from(output.score) + f64::from(score_jitter));
            let confidence_jitter: f64 = rng.gen_range(-0.02..=0.02);
            output.confidence = clamp_confidence(output.confidence + confidence_jitter);
        }
    }
}
