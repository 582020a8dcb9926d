//! Bay rules with documented constants
//!
//! All magic numbers for bay throughput live here. A bay copies the rules it
//! was built with, so changing the global rules never alters an existing bay.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{BayError, Result};

/// Rules governing doors, recovery slots and vehicle weight classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayRules {
    // === RECOVERY ===
    /// Rounds a recovery slot stays closed after a unit is recovered through it
    ///
    /// A slot consumed this round reopens after exactly this many round advances.
    pub recovery_cooldown_rounds: u8,

    /// Recovery slots contributed by each functional door
    pub slots_per_door: u32,

    /// Most doors a single bay may be built with
    pub max_doors_per_bay: u32,

    // === LAUNCH ===
    /// Units that can launch through a single door in one round
    pub launches_per_door: u32,

    // === VEHICLE CLASSES ===
    /// Heaviest vehicle (tons) a light vehicle bay accepts
    pub light_vehicle_limit: f64,

    /// Heaviest vehicle (tons) a heavy vehicle bay accepts
    pub heavy_vehicle_limit: f64,

    /// Heaviest vehicle (tons) a super-heavy vehicle bay accepts
    pub super_heavy_vehicle_limit: f64,
}

impl Default for BayRules {
    fn default() -> Self {
        Self {
            recovery_cooldown_rounds: 5,
            slots_per_door: 2,
            max_doors_per_bay: 64,
            launches_per_door: 2,
            light_vehicle_limit: 50.0,
            heavy_vehicle_limit: 100.0,
            super_heavy_vehicle_limit: 200.0,
        }
    }
}

impl BayRules {
    /// Create rules with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate rules for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.recovery_cooldown_rounds == 0 {
            return Err(BayError::Config(
                "recovery_cooldown_rounds must be at least 1".into(),
            ));
        }

        if self.slots_per_door == 0 {
            return Err(BayError::Config("slots_per_door must be at least 1".into()));
        }

        if self.max_doors_per_bay == 0 {
            return Err(BayError::Config("max_doors_per_bay must be at least 1".into()));
        }

        let limits = [
            self.light_vehicle_limit,
            self.heavy_vehicle_limit,
            self.super_heavy_vehicle_limit,
        ];
        if limits.iter().any(|l| !l.is_finite() || *l <= 0.0) {
            return Err(BayError::Config("Vehicle limits must be positive".into()));
        }
        if !(limits[0] <= limits[1] && limits[1] <= limits[2]) {
            return Err(BayError::Config(format!(
                "Vehicle limits must ascend: light {} <= heavy {} <= super-heavy {}",
                limits[0], limits[1], limits[2]
            )));
        }

        Ok(())
    }

    /// Parse and validate rules from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rules: BayRules = toml::from_str(content)
            .map_err(|e| BayError::Config(format!("Failed to parse bay rules TOML: {}", e)))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// === GLOBAL RULES ACCESS ===

use std::sync::OnceLock;

static RULES: OnceLock<BayRules> = OnceLock::new();

/// Get the global bay rules (initializes with defaults if not set)
pub fn rules() -> &'static BayRules {
    RULES.get_or_init(BayRules::default)
}

/// Set the global bay rules (can only be called once)
///
/// Returns Err if rules were already set.
pub fn set_rules(rules: BayRules) -> std::result::Result<(), BayRules> {
    RULES.set(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_validate() {
        assert!(BayRules::default().validate().is_ok());
    }

    #[test]
    fn test_zero_cooldown_rejected() {
        let rules = BayRules {
            recovery_cooldown_rounds: 0,
            ..BayRules::default()
        };
        assert!(matches!(rules.validate(), Err(BayError::Config(_))));
    }

    #[test]
    fn test_descending_vehicle_limits_rejected() {
        let rules = BayRules {
            heavy_vehicle_limit: 40.0,
            ..BayRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let rules = BayRules::from_toml_str("recovery_cooldown_rounds = 3\n").unwrap();
        assert_eq!(rules.recovery_cooldown_rounds, 3);
        assert_eq!(rules.slots_per_door, 2);
        assert_eq!(rules.heavy_vehicle_limit, 100.0);
    }

    #[test]
    fn test_invalid_toml_reports_config_error() {
        let err = BayRules::from_toml_str("slots_per_door = \"two\"").unwrap_err();
        assert!(matches!(err, BayError::Config(_)));
    }
}
