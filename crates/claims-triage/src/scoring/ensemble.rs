use super::domain::{EnsembleResult, StrategyOutput, StrategyWeights};
use super::strategies::{clamp_confidence, clamp_score};

/// Combine the three strategy outputs with the fixed ensemble weights.
///
/// The weights are validated at engine construction; by the time this runs
/// they sum to 1.0, so the weighted score stays inside [1, 100].
pub fn combine(
    rule_accumulation: &StrategyOutput,
    staged_increment: &StrategyOutput,
    linear: &StrategyOutput,
    weights: StrategyWeights,
) -> EnsembleResult {
    let score = weights.rule_accumulation * f64::from(rule_accumulation.score)
        + weights.staged_increment * f64::from(staged_increment.score)
        + weights.linear * f64::from(linear.score);

    let confidence = weights.rule_accumulation * rule_accumulation.confidence
        + weights.staged_increment * staged_increment.confidence
        + weights.linear * linear.confidence;

    EnsembleResult {
        score: clamp_score(score),
        confidence: clamp_confidence(confidence),
        weights,
    }
}
