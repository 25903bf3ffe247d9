//! # Engine Configuration
//!
//! Tunable values for the simulation, grouped by concern.
//!
//! ```rust
//! use fse_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let quiet = EngineConfig::test();
//! assert!(!quiet.rules.offside_enabled);
//! ```

mod decision_config;
mod physics_config;
mod rules_config;

pub use decision_config::DecisionConfig;
pub use physics_config::PhysicsConfig;
pub use rules_config::{RulesConfig, TackleRules};

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl EngineConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    /// No random injuries and no offside, for focused tests.
    pub fn test() -> Self {
        let mut cfg = Self::default();
        cfg.rules.iteration_injury_odds = i64::MAX;
        for tackle in [&mut cfg.rules.standing_tackle, &mut cfg.rules.slide_tackle] {
            tackle.injury_high = i64::MAX;
            tackle.injury_low = i64::MAX;
        }
        cfg.rules.offside_enabled = false;
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
