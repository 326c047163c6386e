use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};

use super::config::EngineConfig;
use super::domain::{
    ClaimAttributes, ClaimHistorySummary, ClaimantHistory, RiskFactors, UrbanDensity, VehicleRisk,
};
use super::AssessmentError;

/// Derive normalized risk factors from a raw claim and its claimant history.
///
/// `now` is the assessment time, passed explicitly so extraction is
/// reproducible in tests. Fails with `InvalidInput` on negative amounts, a
/// future-dated incident, or an unparseable incident time; a zero estimated
/// damage is expected data variation and yields an undefined ratio instead.
pub fn extract(
    claim: &ClaimAttributes,
    history: &ClaimantHistory,
    config: &EngineConfig,
    now: NaiveDateTime,
) -> Result<RiskFactors, AssessmentError> {
    if claim.claimed_amount < 0.0 {
        return Err(AssessmentError::InvalidInput {
            claim_id: claim.claim_id.clone(),
            field: "claimed_amount",
            detail: format!("negative amount {}", claim.claimed_amount),
        });
    }
    if claim.estimated_damage < 0.0 {
        return Err(AssessmentError::InvalidInput {
            claim_id: claim.claim_id.clone(),
            field: "estimated_damage",
            detail: format!("negative amount {}", claim.estimated_damage),
        });
    }
    if claim.incident_date > now.date() {
        return Err(AssessmentError::InvalidInput {
            claim_id: claim.claim_id.clone(),
            field: "incident_date",
            detail: format!("incident date {} is in the future", claim.incident_date),
        });
    }

    let incident_hour = parse_incident_hour(claim)?;

    let amount_ratio = if claim.estimated_damage > 0.0 {
        Some(claim.claimed_amount / claim.estimated_damage)
    } else {
        None
    };

    let vehicle_age = (now.date().year() - claim.vehicle_year).max(0) as u32;
    let luxury_vehicle = config
        .luxury_makes
        .iter()
        .any(|make| make.eq_ignore_ascii_case(&claim.vehicle_make));

    Ok(RiskFactors {
        incident_hour,
        day_of_week: claim.incident_date.weekday(),
        month: claim.incident_date.month(),
        days_since_incident: (now.date() - claim.incident_date).num_days(),
        claimed_amount: claim.claimed_amount,
        amount_ratio,
        high_risk_area: config
            .high_risk_cities
            .iter()
            .any(|city| city.eq_ignore_ascii_case(&claim.incident_city)),
        urban_density: config
            .province_density
            .get(claim.incident_province.trim().to_ascii_uppercase().as_str())
            .copied()
            .unwrap_or(UrbanDensity::Low),
        vehicle_age,
        luxury_vehicle,
        vehicle_risk: vehicle_risk(vehicle_age, luxury_vehicle),
        history: ClaimHistorySummary {
            previous_claim_count: history.previous_claim_count,
            prior_fraud_count: history.prior_fraud_count,
            average_claim_amount: history.average_claim_amount,
        },
        repeat_location: history
            .prior_incident_cities
            .iter()
            .any(|city| city.eq_ignore_ascii_case(&claim.incident_city)),
        similar_vehicle_pattern: history
            .prior_vehicle_makes
            .iter()
            .any(|make| make.eq_ignore_ascii_case(&claim.vehicle_make)),
        suspicious_timing: (2..=5).contains(&incident_hour),
    })
}

fn parse_incident_hour(claim: &ClaimAttributes) -> Result<u32, AssessmentError> {
    let raw = claim.incident_time.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map(|time| time.hour())
        .map_err(|_| AssessmentError::InvalidInput {
            claim_id: claim.claim_id.clone(),
            field: "incident_time",
            detail: format!("'{raw}' is not a valid HH:MM time"),
        })
}

fn vehicle_risk(vehicle_age: u32, luxury_vehicle: bool) -> VehicleRisk {
    if luxury_vehicle || vehicle_age < 2 {
        VehicleRisk::High
    } else if vehicle_age > 12 {
        VehicleRisk::Medium
    } else {
        VehicleRisk::Low
    }
}
