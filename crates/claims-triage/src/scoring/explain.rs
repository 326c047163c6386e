use super::domain::{Explanation, FactorContribution, RiskCategory, RiskFactors, RiskSignal};

const MAX_FACTORS: usize = 5;
const MAX_RECOMMENDATIONS: usize = 5;

/// Build the human-readable explanation for an assessment.
///
/// Contributions come from the same predicates the strategies score with, so
/// the explanation cannot drift from the scoring behavior. Impact magnitudes
/// mirror the rule-accumulation increments.
pub fn explain(factors: &RiskFactors, category: RiskCategory) -> Explanation {
    let mut candidates = contributions(factors);
    candidates.sort_by(|a, b| {
        b.impact
            .partial_cmp(&a.impact)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(MAX_FACTORS);

    Explanation {
        summary: summary(category, &candidates),
        recommendations: recommendations(category, factors),
        top_factors: candidates,
    }
}

fn contributions(factors: &RiskFactors) -> Vec<FactorContribution> {
    let mut entries = Vec::new();

    if factors.prior_fraud() {
        entries.push(FactorContribution {
            signal: RiskSignal::PriorFraud,
            impact: 25.0,
            description: format!(
                "claimant has {} prior confirmed fraud case(s)",
                factors.history.prior_fraud_count
            ),
        });
    }
    if factors.ratio_above(1.5) {
        let ratio = factors.amount_ratio.unwrap_or_default();
        entries.push(FactorContribution {
            signal: RiskSignal::AmountAnomaly,
            impact: 20.0,
            description: format!("claimed amount is {ratio:.1}x the estimated damage"),
        });
    }
    if factors.night_time() {
        entries.push(FactorContribution {
            signal: RiskSignal::NightIncident,
            impact: 15.0,
            description: format!("incident reported at {:02}:00", factors.incident_hour),
        });
    }
    if factors.repeat_location {
        entries.push(FactorContribution {
            signal: RiskSignal::RepeatLocation,
            impact: 15.0,
            description: "claimant has prior incidents in the same city".to_string(),
        });
    }
    if factors.suspicious_timing {
        entries.push(FactorContribution {
            signal: RiskSignal::SuspiciousTiming,
            impact: 12.0,
            description: "incident falls in the 02:00-05:00 window".to_string(),
        });
    }
    if factors.high_risk_area {
        entries.push(FactorContribution {
            signal: RiskSignal::HighRiskArea,
            impact: 10.0,
            description: "incident city is on the high-risk area list".to_string(),
        });
    }
    if factors.similar_vehicle_pattern {
        entries.push(FactorContribution {
            signal: RiskSignal::SimilarVehiclePattern,
            impact: 10.0,
            description: "claimant previously claimed on the same vehicle make".to_string(),
        });
    }
    if factors.near_new_vehicle() {
        entries.push(FactorContribution {
            signal: RiskSignal::NearNewVehicle,
            impact: 8.0,
            description: format!("vehicle is {} year(s) old", factors.vehicle_age),
        });
    }

    entries
}

fn summary(category: RiskCategory, top: &[FactorContribution]) -> String {
    let names: Vec<&str> = top
        .iter()
        .take(3)
        .map(|entry| entry.signal.label())
        .collect();
    let names = names.join(", ");

    match category {
        RiskCategory::High => {
            format!("High fraud risk driven by {names}; immediate investigation recommended.")
        }
        RiskCategory::Medium if names.is_empty() => {
            "Moderate fraud risk with no single dominant factor; standard review applies."
                .to_string()
        }
        RiskCategory::Medium => {
            format!("Moderate fraud risk driven by {names}; additional verification advised.")
        }
        RiskCategory::Low if names.is_empty() => {
            "Low fraud risk; no significant anomalies detected.".to_string()
        }
        RiskCategory::Low => format!("Low fraud risk; minor signals noted: {names}."),
    }
}

fn recommendations(category: RiskCategory, factors: &RiskFactors) -> Vec<String> {
    let mut items: Vec<String> = vec![
        "Verify supporting documentation".to_string(),
        "Cross-check claimant claim history".to_string(),
    ];

    if category == RiskCategory::High {
        items.push("Assign a senior investigator".to_string());
        items.push("Request further evidence from the claimant".to_string());
        items.push("Schedule an on-site inspection".to_string());
    }

    if factors.ratio_above(1.5) {
        items.push("Verify reasonableness of the claimed amount".to_string());
    }
    if factors.suspicious_timing {
        items.push("Investigate the incident circumstances".to_string());
    }
    if factors.near_new_vehicle() {
        items.push("Check vehicle maintenance records".to_string());
    }
    if factors.high_risk_area {
        items.push("Consult area crime statistics".to_string());
    }

    // First occurrence wins, capped at five entries.
    let mut deduped: Vec<String> = Vec::new();
    for item in items {
        if deduped.len() == MAX_RECOMMENDATIONS {
            break;
        }
        if !deduped.contains(&item) {
            deduped.push(item);
        }
    }
    deduped
}
