use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier wrapper for claims held in the external claim store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClaimId(pub String);

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for the claimant whose history is consulted during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimantId(pub String);

/// Loss categories tracked by the triage dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimType {
    Collision,
    Theft,
    Vandalism,
    NaturalDisaster,
    Other,
}

/// Raw claim record as read from the claim store.
///
/// `incident_time` is kept as the raw `HH:MM` field so extraction can reject
/// unparseable values with the offending field named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimAttributes {
    pub claim_id: ClaimId,
    pub claimant_id: ClaimantId,
    pub claim_type: ClaimType,
    pub incident_date: NaiveDate,
    pub incident_time: String,
    pub claimed_amount: f64,
    pub estimated_damage: f64,
    pub incident_city: String,
    pub incident_province: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
}

/// Claimant history summary supplied by the claim store; the engine never
/// fetches this itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimantHistory {
    pub previous_claim_count: u32,
    pub prior_fraud_count: u32,
    pub average_claim_amount: f64,
    pub prior_incident_cities: Vec<String>,
    pub prior_vehicle_makes: Vec<String>,
}

/// The per-claim slice of history carried into `RiskFactors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimHistorySummary {
    pub previous_claim_count: u32,
    pub prior_fraud_count: u32,
    pub average_claim_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrbanDensity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleRisk {
    Low,
    Medium,
    High,
}

/// Risk bucket derived from the ensemble score. Ordered LOW < MEDIUM < HIGH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub const fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }
}

/// Named risk signals shared between the scoring strategies and the
/// explanation generator so both sides read the same predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignal {
    PriorFraud,
    AmountAnomaly,
    NightIncident,
    SuspiciousTiming,
    HighRiskArea,
    NearNewVehicle,
    RepeatLocation,
    SimilarVehiclePattern,
}

impl RiskSignal {
    pub const fn label(self) -> &'static str {
        match self {
            RiskSignal::PriorFraud => "prior confirmed fraud",
            RiskSignal::AmountAnomaly => "claimed amount anomaly",
            RiskSignal::NightIncident => "night-time incident",
            RiskSignal::SuspiciousTiming => "suspicious incident timing",
            RiskSignal::HighRiskArea => "high-risk area",
            RiskSignal::NearNewVehicle => "near-new vehicle",
            RiskSignal::RepeatLocation => "repeat incident location",
            RiskSignal::SimilarVehiclePattern => "similar vehicle pattern",
        }
    }
}

/// The three deterministic scoring policies combined by the ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    RuleAccumulation,
    StagedIncrement,
    Linear,
}

impl StrategyKind {
    pub const fn label(self) -> &'static str {
        match self {
            StrategyKind::RuleAccumulation => "rule_accumulation",
            StrategyKind::StagedIncrement => "staged_increment",
            StrategyKind::Linear => "linear",
        }
    }
}

/// Output of one scoring strategy: a clamped score, a confidence, and the
/// strategy-specific factor importance map (values need not sum to 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutput {
    pub strategy: StrategyKind,
    pub score: u8,
    pub confidence: f64,
    pub importance: BTreeMap<RiskSignal, f64>,
}

/// Fixed-weight combination of the three strategy outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleResult {
    pub score: u8,
    pub confidence: f64,
    pub weights: StrategyWeights,
}

/// Ensemble policy weights; must sum to 1.0 and are fixed per engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    pub rule_accumulation: f64,
    pub staged_increment: f64,
    pub linear: f64,
}

impl StrategyWeights {
    pub fn sum(&self) -> f64 {
        self.rule_accumulation + self.staged_increment + self.linear
    }
}

/// Normalized signals extracted from a raw claim, immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub incident_hour: u32,
    pub day_of_week: Weekday,
    pub month: u32,
    pub days_since_incident: i64,
    pub claimed_amount: f64,
    /// `claimed_amount / estimated_damage`; `None` when estimated damage is
    /// zero, in which case ratio-based rules see no anomaly signal.
    pub amount_ratio: Option<f64>,
    pub high_risk_area: bool,
    pub urban_density: UrbanDensity,
    pub vehicle_age: u32,
    pub luxury_vehicle: bool,
    pub vehicle_risk: VehicleRisk,
    pub history: ClaimHistorySummary,
    pub repeat_location: bool,
    pub similar_vehicle_pattern: bool,
    pub suspicious_timing: bool,
}

impl RiskFactors {
    /// Incident occurred between 22:00 and 05:59.
    pub fn night_time(&self) -> bool {
        self.incident_hour >= 22 || self.incident_hour < 6
    }

    /// Ratio strictly above `threshold`; an undefined ratio never fires.
    pub fn ratio_above(&self, threshold: f64) -> bool {
        self.amount_ratio
            .map(|ratio| ratio > threshold)
            .unwrap_or(false)
    }

    pub fn prior_fraud(&self) -> bool {
        self.history.prior_fraud_count >= 1
    }

    pub fn near_new_vehicle(&self) -> bool {
        self.vehicle_age < 2
    }
}

/// One ranked entry in the explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub signal: RiskSignal,
    pub impact: f64,
    pub description: String,
}

/// Human-readable explanation attached to every assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub top_factors: Vec<FactorContribution>,
    pub recommendations: Vec<String>,
}

/// Full assessment emitted by the engine; callers decide persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    pub claim_id: ClaimId,
    pub score: u8,
    pub category: RiskCategory,
    pub ensemble: EnsembleResult,
    pub strategy_outputs: Vec<StrategyOutput>,
    pub factors: RiskFactors,
    pub explanation: Explanation,
    pub assessed_at: NaiveDateTime,
}
