use std::collections::BTreeMap;

use super::{clamp_confidence, clamp_score, ScoringStrategy};
use crate::scoring::domain::{RiskFactors, RiskSignal, StrategyKind, StrategyOutput};

const BASE_SCORE: f64 = 45.0;
const BASE_CONFIDENCE: f64 = 0.72;
const CONFIDENCE_STEP: f64 = 0.03;
const MAX_CONFIDENCE: f64 = 0.92;

const TOP_WEIGHT: f64 = 0.8;
const TAIL_WEIGHT: f64 = 0.5;
const BOOSTED_COUNT: usize = 3;

/// Staged-increment ("boosted") policy.
///
/// Candidate increments are sorted descending; the top three are applied at
/// 80% weight, the remainder at 50%. The sort-then-split weighting is the
/// point of this policy: the strongest few signals dominate while weaker
/// ones still count partially, which changes outcomes versus a flat sum.
#[derive(Debug, Default)]
pub struct StagedIncrementStrategy;

impl ScoringStrategy for StagedIncrementStrategy {
    fn score(&self, factors: &RiskFactors) -> StrategyOutput {
        let mut candidates: Vec<(RiskSignal, f64)> = Vec::new();
        if factors.prior_fraud() {
            candidates.push((RiskSignal::PriorFraud, 30.0));
        }
        if factors.ratio_above(2.0) {
            candidates.push((RiskSignal::AmountAnomaly, 25.0));
        }
        if factors.suspicious_timing {
            candidates.push((RiskSignal::SuspiciousTiming, 18.0));
        }
        if factors.repeat_location {
            candidates.push((RiskSignal::RepeatLocation, 15.0));
        }
        if factors.near_new_vehicle() {
            candidates.push((RiskSignal::NearNewVehicle, 12.0));
        }

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut raw = BASE_SCORE;
        let mut importance = BTreeMap::new();
        for (rank, (signal, increment)) in candidates.iter().enumerate() {
            let weight = if rank < BOOSTED_COUNT {
                TOP_WEIGHT
            } else {
                TAIL_WEIGHT
            };
            raw += increment * weight;
            importance.insert(*signal, increment * weight / 100.0);
        }

        let confidence =
            (BASE_CONFIDENCE + CONFIDENCE_STEP * candidates.len() as f64).min(MAX_CONFIDENCE);

        StrategyOutput {
            strategy: StrategyKind::StagedIncrement,
            score: clamp_score(raw),
            confidence: clamp_confidence(confidence),
            importance,
        }
    }
}
