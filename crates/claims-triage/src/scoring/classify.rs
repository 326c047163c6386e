use super::domain::RiskCategory;

/// Map an ensemble score to its risk bucket: ≤30 LOW, 31–70 MEDIUM, >70 HIGH.
///
/// Scores outside [1, 100] violate the caller contract (every upstream path
/// clamps) and panic rather than being clamped a second time.
pub fn classify(score: u8) -> RiskCategory {
    assert!(
        (1..=100).contains(&score),
        "ensemble score {score} outside [1, 100]"
    );

    match score {
        1..=30 => RiskCategory::Low,
        31..=70 => RiskCategory::Medium,
        _ => RiskCategory::High,
    }
}
