//! Configurable species parameters.
//!
//! These values correspond to the `predator` and `prey` sections of
//! `predation-config.yaml`. The [`EcosystemConfig`] struct bundles every
//! tunable so that callers (tick coordinator, tests) can override defaults.
//! All durations are counted in eligible ticks.

use predation_types::Species;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Parameters shared by both species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesTraits {
    /// Age at which the agent dies.
    pub max_age: u32,
    /// Eligible ticks between breeding attempts.
    pub breed_rate: u32,
    /// Relocations attempted per tick.
    pub move_speed: u32,
}

/// Predator parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredatorConfig {
    /// Predators placed by the initial spawn (default: 5).
    #[serde(default = "default_predator_initial_count")]
    pub initial_count: u32,

    /// Lifespan in eligible ticks (default: 40).
    #[serde(default = "default_predator_max_age")]
    pub max_age: u32,

    /// Eligible ticks between breeding attempts (default: 15).
    #[serde(default = "default_predator_breed_rate")]
    pub breed_rate: u32,

    /// Cells moved per tick (default: 2).
    #[serde(default = "default_predator_move_speed")]
    pub move_speed: u32,

    /// Eligible ticks a predator survives without a kill (default: 10).
    #[serde(default = "default_starvation_time")]
    pub starvation_time: u32,

    /// Sleep countdown set by a kill (default: 3).
    #[serde(default = "default_sleep_time")]
    pub sleep_time: u32,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            initial_count: default_predator_initial_count(),
            max_age: default_predator_max_age(),
            breed_rate: default_predator_breed_rate(),
            move_speed: default_predator_move_speed(),
            starvation_time: default_starvation_time(),
            sleep_time: default_sleep_time(),
        }
    }
}

/// Prey parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreyConfig {
    /// Prey placed by the initial spawn (default: 15).
    #[serde(default = "default_prey_initial_count")]
    pub initial_count: u32,

    /// Lifespan in eligible ticks (default: 20).
    #[serde(default = "default_prey_max_age")]
    pub max_age: u32,

    /// Eligible ticks between breeding attempts (default: 9).
    #[serde(default = "default_prey_breed_rate")]
    pub breed_rate: u32,

    /// Cells moved per tick (default: 1).
    #[serde(default = "default_prey_move_speed")]
    pub move_speed: u32,
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            initial_count: default_prey_initial_count(),
            max_age: default_prey_max_age(),
            breed_rate: default_prey_breed_rate(),
            move_speed: default_prey_move_speed(),
        }
    }
}

/// Both species' parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemConfig {
    /// Predator parameters.
    #[serde(default)]
    pub predator: PredatorConfig,

    /// Prey parameters.
    #[serde(default)]
    pub prey: PreyConfig,
}

impl EcosystemConfig {
    /// Return the shared traits for `species`.
    pub const fn traits(&self, species: Species) -> SpeciesTraits {
        match species {
            Species::Predator => SpeciesTraits {
                max_age: self.predator.max_age,
                breed_rate: self.predator.breed_rate,
                move_speed: self.predator.move_speed,
            },
            Species::Prey => SpeciesTraits {
                max_age: self.prey.max_age,
                breed_rate: self.prey.breed_rate,
                move_speed: self.prey.move_speed,
            },
        }
    }

    /// Return the number of agents of `species` placed at startup.
    pub const fn initial_count(&self, species: Species) -> u32 {
        match species {
            Species::Predator => self.predator.initial_count,
            Species::Prey => self.prey.initial_count,
        }
    }

    /// Check that every duration is at least one tick.
    ///
    /// A zero lifespan or starvation time would remove agents before they
    /// could ever act; a zero breed rate would make every tick a breeding
    /// tick with no reset.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AgentError> {
        let checks = [
            ("predator.max_age", self.predator.max_age),
            ("predator.breed_rate", self.predator.breed_rate),
            ("predator.starvation_time", self.predator.starvation_time),
            ("prey.max_age", self.prey.max_age),
            ("prey.breed_rate", self.prey.breed_rate),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(AgentError::InvalidConfig {
                    reason: format!("{field} must be at least 1"),
                });
            }
        }
        Ok(())
    }
}

const fn default_predator_initial_count() -> u32 {
    5
}

const fn default_predator_max_age() -> u32 {
    40
}

const fn default_predator_breed_rate() -> u32 {
    15
}

const fn default_predator_move_speed() -> u32 {
    2
}

const fn default_starvation_time() -> u32 {
    10
}

const fn default_sleep_time() -> u32 {
    3
}

const fn default_prey_initial_count() -> u32 {
    15
}

const fn default_prey_max_age() -> u32 {
    20
}

const fn default_prey_breed_rate() -> u32 {
    9
}

const fn default_prey_move_speed() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = EcosystemConfig::default();
        assert_eq!(cfg.predator.initial_count, 5);
        assert_eq!(cfg.predator.max_age, 40);
        assert_eq!(cfg.predator.breed_rate, 15);
        assert_eq!(cfg.predator.move_speed, 2);
        assert_eq!(cfg.predator.starvation_time, 10);
        assert_eq!(cfg.predator.sleep_time, 3);
        assert_eq!(cfg.prey.initial_count, 15);
        assert_eq!(cfg.prey.max_age, 20);
        assert_eq!(cfg.prey.breed_rate, 9);
        assert_eq!(cfg.prey.move_speed, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn traits_follow_species() {
        let cfg = EcosystemConfig::default();
        assert_eq!(cfg.traits(Species::Predator).move_speed, 2);
        assert_eq!(cfg.traits(Species::Prey).max_age, 20);
        assert_eq!(cfg.initial_count(Species::Prey), 15);
    }

    #[test]
    fn zero_starvation_time_is_rejected() {
        let mut cfg = EcosystemConfig::default();
        cfg.predator.starvation_time = 0;
        let err = cfg.validate();
        assert!(matches!(err, Err(AgentError::InvalidConfig { .. })));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: Result<EcosystemConfig, _> =
            serde_json::from_str(r#"{"prey": {"breed_rate": 4}}"#);
        assert!(cfg.is_ok());
        let cfg = cfg.unwrap_or_default();
        assert_eq!(cfg.prey.breed_rate, 4);
        assert_eq!(cfg.prey.max_age, 20);
        assert_eq!(cfg.predator.sleep_time, 3);
    }
}
