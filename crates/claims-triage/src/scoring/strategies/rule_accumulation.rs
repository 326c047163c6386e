use std::collections::BTreeMap;

use super::{clamp_confidence, clamp_score, ScoringStrategy};
use crate::scoring::domain::{RiskFactors, RiskSignal, StrategyKind, StrategyOutput};

const BASE_SCORE: f64 = 50.0;
const BASE_CONFIDENCE: f64 = 0.75;
const CONFIDENCE_STEP: f64 = 0.03;
const MAX_CONFIDENCE: f64 = 0.95;

/// Threshold rules with their increments and static importance weights.
/// The importance weights sum to 0.90, below the documented cap of 1.
const RULES: [(RiskSignal, f64, f64); 6] = [
    (RiskSignal::PriorFraud, 25.0, 0.25),
    (RiskSignal::AmountAnomaly, 20.0, 0.20),
    (RiskSignal::NightIncident, 15.0, 0.15),
    (RiskSignal::SuspiciousTiming, 12.0, 0.12),
    (RiskSignal::HighRiskArea, 10.0, 0.10),
    (RiskSignal::NearNewVehicle, 8.0, 0.08),
];

/// Rule-accumulation policy: base 50 plus a fixed increment per crossed
/// threshold, clamped to [1, 100].
#[derive(Debug, Default)]
pub struct RuleAccumulationStrategy;

impl RuleAccumulationStrategy {
    fn rule_fires(signal: RiskSignal, factors: &RiskFactors) -> bool {
        match signal {
            RiskSignal::PriorFraud => factors.prior_fraud(),
            RiskSignal::AmountAnomaly => factors.ratio_above(1.5),
            RiskSignal::NightIncident => factors.night_time(),
            RiskSignal::SuspiciousTiming => factors.suspicious_timing,
            RiskSignal::HighRiskArea => factors.high_risk_area,
            RiskSignal::NearNewVehicle => factors.near_new_vehicle(),
            _ => false,
        }
    }
}

impl ScoringStrategy for RuleAccumulationStrategy {
    fn score(&self, factors: &RiskFactors) -> StrategyOutput {
        let mut raw = BASE_SCORE;
        let mut fired = 0u32;
        let mut importance = BTreeMap::new();

        for (signal, increment, weight) in RULES {
            if Self::rule_fires(signal, factors) {
                raw += increment;
                fired += 1;
                importance.insert(signal, weight);
            }
        }

        StrategyOutput {
            strategy: StrategyKind::RuleAccumulation,
            score: clamp_score(raw),
            confidence: clamp_confidence(
                (BASE_CONFIDENCE + CONFIDENCE_STEP * f64::from(fired)).min(MAX_CONFIDENCE),
            ),
            importance,
        }
    }
}
