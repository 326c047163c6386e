use chrono::NaiveDate;
use claims_triage::scoring::{
    AssessmentStore, ClaimAttributes, ClaimId, ClaimStore, ClaimType, ClaimantHistory, ClaimantId,
    EngineConfig, RiskAssessmentResult, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryClaimStore {
    claims: Mutex<HashMap<ClaimId, ClaimAttributes>>,
    histories: Mutex<HashMap<String, ClaimantHistory>>,
}

impl InMemoryClaimStore {
    pub(crate) fn seed(&self, claim: ClaimAttributes, history: ClaimantHistory) {
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

impl ClaimStore for InMemoryClaimStore {
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
pub(crate) struct InMemoryAssessmentStore {
    records: Mutex<Vec<RiskAssessmentResult>>,
}

impl InMemoryAssessmentStore {
    pub(crate) fn records(&self) -> Vec<RiskAssessmentResult> {
        self.records.lock().expect("record mutex poisoned").clone()
    }
}

impl AssessmentStore for InMemoryAssessmentStore {
    fn record(&self, assessment: &RiskAssessmentResult) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("record mutex poisoned")
            .push(assessment.clone());
        Ok(())
    }
}

pub(crate) fn default_engine_config() -> EngineConfig {
    EngineConfig::italian_market_default()
}

/// Seed a handful of representative claims so the service and the demo have
/// something to score out of the box.
pub(crate) fn seed_sample_claims(store: &InMemoryClaimStore) {
    store.seed(
        ClaimAttributes {
            claim_id: ClaimId("claim-0001".to_string()),
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
        },
        ClaimantHistory {
            previous_claim_count: 3,
            prior_fraud_count: 1,
            average_claim_amount: 6_500.0,
            prior_incident_cities: vec!["Roma".to_string()],
            prior_vehicle_makes: vec!["Fiat".to_string()],
        },
    );

    store.seed(
        ClaimAttributes {
            claim_id: ClaimId("claim-0002".to_string()),
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
        },
        ClaimantHistory::default(),
    );

    store.seed(
        ClaimAttributes {
            claim_id: ClaimId("claim-0003".to_string()),
            claimant_id: ClaimantId("claimant-31".to_string()),
            claim_type: ClaimType::Vandalism,
            incident_date: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            incident_time: "23:40".to_string(),
            claimed_amount: 7_500.0,
            estimated_damage: 4_000.0,
            incident_city: "Milano".to_string(),
            incident_province: "MI".to_string(),
            vehicle_make: "Porsche".to_string(),
            vehicle_model: "Macan".to_string(),
            vehicle_year: 2024,
        },
        ClaimantHistory {
            previous_claim_count: 1,
            prior_fraud_count: 0,
            average_claim_amount: 3_200.0,
            prior_incident_cities: vec!["Milano".to_string()],
            prior_vehicle_makes: Vec::new(),
        },
    );
}
