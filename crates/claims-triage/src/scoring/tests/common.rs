use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde_json::Value;

use crate::scoring::config::EngineConfig;
use crate::scoring::domain::{
    ClaimAttributes, ClaimHistorySummary, ClaimId, ClaimType, ClaimantHistory, ClaimantId,
    RiskAssessmentResult, RiskFactors, UrbanDensity, VehicleRisk,
};
use crate::scoring::repository::{AssessmentStore, ClaimStore, StoreError};
use crate::scoring::service::RiskAssessmentService;

pub(super) fn assessment_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 15)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

pub(super) fn engine_config() -> EngineConfig {
    EngineConfig::italian_market_default()
}

/// THEFT claim matching the worst-case triage scenario: inflated amount,
/// 03:15 incident, prior fraud, high-risk city, near-new vehicle.
pub(super) fn high_risk_claim() -> ClaimAttributes {
    ClaimAttributes {
        claim_id: ClaimId("claim-9001".to_string()),
        claimant_id: ClaimantId("claimant-77".to_string()),
        claim_type: ClaimType::Theft,
        incident_date: NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date"),
        incident_time: "03:15".to_string(),
        claimed_amount: 20_000.0,
        estimated_damage: 8_000.0,
        incident_city: "Napoli".to_string(),
        incident_province: "NA".to_string(),
        vehicle_make: "Alfa Romeo".to_string(),
        vehicle_model: "Giulia".to_string(),
        vehicle_year: 2025,
    }
}

pub(super) fn high_risk_history() -> ClaimantHistory {
    ClaimantHistory {
        previous_claim_count: 3,
        prior_fraud_count: 1,
        average_claim_amount: 6_500.0,
        prior_incident_cities: vec!["Roma".to_string()],
        prior_vehicle_makes: vec!["Fiat".to_string()],
    }
}

/// Unremarkable afternoon collision with no anomaly signals.
pub(super) fn benign_claim() -> ClaimAttributes {
    ClaimAttributes {
        claim_id: ClaimId("claim-1002".to_string()),
        claimant_id: ClaimantId("claimant-12".to_string()),
        claim_type: ClaimType::Collision,
        incident_date: NaiveDate::from_ymd_opt(2026, 3, 12).expect("valid date"),
        incident_time: "14:30".to_string(),
        claimed_amount: 1_000.0,
        estimated_damage: 1_000.0,
        incident_city: "Udine".to_string(),
        incident_province: "UD".to_string(),
        vehicle_make: "Fiat".to_string(),
        vehicle_model: "Panda".to_string(),
        vehicle_year: 2018,
    }
}

pub(super) fn clean_history() -> ClaimantHistory {
    ClaimantHistory::default()
}

/// Factor set with every signal quiet, for strategy tests that flip one
/// predicate at a time.
pub(super) fn quiet_factors() -> RiskFactors {
    RiskFactors {
        incident_hour: 14,
        day_of_week: Weekday::Thu,
        month: 3,
        days_since_incident: 3,
        claimed_amount: 1_000.0,
        amount_ratio: Some(1.0),
        high_risk_area: false,
        urban_density: UrbanDensity::Low,
        vehicle_age: 8,
        luxury_vehicle: false,
        vehicle_risk: VehicleRisk::Low,
        history: ClaimHistorySummary::default(),
        repeat_location: false,
        similar_vehicle_pattern: false,
        suspicious_timing: false,
    }
}

#[derive(Default)]
pub(super) struct MemoryClaimStore {
    claims: Mutex<HashMap<ClaimId, ClaimAttributes>>,
    histories: Mutex<HashMap<String, ClaimantHistory>>,
}

impl MemoryClaimStore {
    pub(super) fn seed(&self, claim: ClaimAttributes, history: ClaimantHistory) {
        self.histories
            .lock()
            .expect("history mutex poisoned")
            .insert(claim.claimant_id.0.clone(), history);
        self.claims
            .lock()
            .expect("claim mutex poisoned")
            .insert(claim.claim_id.clone(), claim);
    }
}

impl ClaimStore for MemoryClaimStore {
    fn claim(&self, id: &ClaimId) -> Result<Option<ClaimAttributes>, StoreError> {
        Ok(self
            .claims
            .lock()
            .expect("claim mutex poisoned")
            .get(id)
            .cloned())
    }

    fn claimant_history(&self, claimant_id: &str) -> Result<ClaimantHistory, StoreError> {
        Ok(self
            .histories
            .lock()
            .expect("history mutex poisoned")
            .get(claimant_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub(super) struct MemoryAssessmentStore {
    records: Mutex<Vec<RiskAssessmentResult>>,
}

impl MemoryAssessmentStore {
    pub(super) fn records(&self) -> Vec<RiskAssessmentResult> {
        self.records.lock().expect("record mutex poisoned").clone()
    }
}

impl AssessmentStore for MemoryAssessmentStore {
    fn record(&self, assessment: &RiskAssessmentResult) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("record mutex poisoned")
            .push(assessment.clone());
        Ok(())
    }
}

pub(super) struct UnavailableClaimStore;

impl ClaimStore for UnavailableClaimStore {
    fn claim(&self, _id: &ClaimId) -> Result<Option<ClaimAttributes>, StoreError> {
        Err(StoreError::Unavailable("claim database offline".to_string()))
    }

    fn claimant_history(&self, _claimant_id: &str) -> Result<ClaimantHistory, StoreError> {
        Err(StoreError::Unavailable("claim database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    RiskAssessmentService<MemoryClaimStore, MemoryAssessmentStore>,
    Arc<MemoryClaimStore>,
    Arc<MemoryAssessmentStore>,
) {
    let claims = Arc::new(MemoryClaimStore::default());
    let assessments = Arc::new(MemoryAssessmentStore::default());
    let service = RiskAssessmentService::new(claims.clone(), assessments.clone(), engine_config())
        .expect("default config is valid");
    (service, claims, assessments)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
