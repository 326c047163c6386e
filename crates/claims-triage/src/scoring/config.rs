use super::domain::{StrategyWeights, UrbanDensity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Policy configuration for the scoring engine: lookup tables, ensemble
/// weights, and the batch cap. Constructed once at startup and injected;
/// there is no module-level mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cities flagged as high fraud-incidence areas (matched case-insensitively).
    pub high_risk_cities: Vec<String>,
    /// Province code to urban-density bucket; unlisted provinces are LOW.
    pub province_density: BTreeMap<String, UrbanDensity>,
    /// Makes treated as luxury vehicles (matched case-insensitively).
    pub luxury_makes: Vec<String>,
    pub strategy_weights: StrategyWeights,
    pub max_batch_size: usize,
}

impl EngineConfig {
    /// Compiled default tables for the Italian market. Callers serving other
    /// regions should supply their own tables rather than extend these.
    pub fn italian_market_default() -> Self {
        let mut province_density = BTreeMap::new();
        for code in ["NA", "MI", "RM", "TO", "PA"] {
            province_density.insert(code.to_string(), UrbanDensity::High);
        }
        for code in ["BO", "FI", "BA", "CT", "GE"] {
            province_density.insert(code.to_string(), UrbanDensity::Medium);
        }

        Self {
            high_risk_cities: ["Napoli", "Caserta", "Catania", "Palermo", "Bari", "Foggia"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            province_density,
            luxury_makes: [
                "Ferrari",
                "Lamborghini",
                "Maserati",
                "Porsche",
                "Bentley",
                "Rolls-Royce",
                "Aston Martin",
                "Jaguar",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            strategy_weights: StrategyWeights {
                rule_accumulation: 0.40,
                staged_increment: 0.35,
                linear: 0.25,
            },
            max_batch_size: 100,
        }
    }

    /// Startup validation; a failing config must prevent the engine from
    /// serving any request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.strategy_weights.sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::WeightSum { actual: sum });
        }
        if self.high_risk_cities.is_empty() {
            return Err(ConfigError::EmptyTable {
                table: "high_risk_cities",
            });
        }
        if self.province_density.is_empty() {
            return Err(ConfigError::EmptyTable {
                table: "province_density",
            });
        }
        if self.luxury_makes.is_empty() {
            return Err(ConfigError::EmptyTable {
                table: "luxury_makes",
            });
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::EmptyTable {
                table: "max_batch_size",
            });
        }
        Ok(())
    }
}

/// Fatal startup misconfiguration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("strategy weights sum to {actual}, expected 1.0")]
    WeightSum { actual: f64 },
    #[error("engine lookup table '{table}' is empty")]
    EmptyTable { table: &'static str },
}
