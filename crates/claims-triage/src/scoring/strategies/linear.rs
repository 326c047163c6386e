use std::collections::BTreeMap;

use super::{clamp_confidence, clamp_score, ScoringStrategy};
use crate::scoring::domain::{RiskFactors, RiskSignal, StrategyKind, StrategyOutput};

const INTERCEPT: f64 = -2.0;
const COEF_LOG_AMOUNT: f64 = 0.30;
const COEF_NIGHT: f64 = 0.80;
const COEF_PRIOR_FRAUD: f64 = 0.90;
const COEF_VEHICLE_AGE: f64 = -0.04;
const COEF_HIGH_RISK_AREA: f64 = 0.60;
const COEF_RATIO_ANOMALY: f64 = 0.70;

const BASE_CONFIDENCE: f64 = 0.70;
const MAX_CONFIDENCE: f64 = 0.95;

/// Linear/logit policy: fixed coefficients over a handful of terms pushed
/// through the logistic function and scaled to [1, 100].
#[derive(Debug, Default)]
pub struct LinearStrategy;

impl ScoringStrategy for LinearStrategy {
    fn score(&self, factors: &RiskFactors) -> StrategyOutput {
        // Non-positive claimed amounts contribute 0 to the log term rather
        // than failing; they are expected data variation.
        let log_amount = if factors.claimed_amount > 0.0 {
            (factors.claimed_amount / 1000.0).ln()
        } else {
            0.0
        };

        let mut logit = INTERCEPT + COEF_LOG_AMOUNT * log_amount;
        let mut importance = BTreeMap::new();

        if factors.night_time() {
            logit += COEF_NIGHT;
            importance.insert(RiskSignal::NightIncident, COEF_NIGHT);
        }
        if factors.prior_fraud() {
            let term = COEF_PRIOR_FRAUD * f64::from(factors.history.prior_fraud_count);
            logit += term;
            importance.insert(RiskSignal::PriorFraud, term);
        }
        logit += COEF_VEHICLE_AGE * f64::from(factors.vehicle_age);
        if factors.high_risk_area {
            logit += COEF_HIGH_RISK_AREA;
            importance.insert(RiskSignal::HighRiskArea, COEF_HIGH_RISK_AREA);
        }
        if factors.ratio_above(1.5) {
            logit += COEF_RATIO_ANOMALY;
            importance.insert(RiskSignal::AmountAnomaly, COEF_RATIO_ANOMALY);
        }

        let probability = 1.0 / (1.0 + (-logit).exp());
        let score = clamp_score(probability * 100.0);

        // Deterministic stand-in for jitter: further from the 50 midpoint
        // means a more decided model, so confidence rises with distance.
        let distance = (f64::from(score) - 50.0).abs() / 50.0;
        let confidence = (BASE_CONFIDENCE + 0.25 * distance).min(MAX_CONFIDENCE);

        StrategyOutput {
            strategy: StrategyKind::Linear,
            score,
            confidence: clamp_confidence(confidence),
            importance,
        }
    }
}
