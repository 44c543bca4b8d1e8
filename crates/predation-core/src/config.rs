//! Configuration loading and typed config structures for the Predation simulation.
//!
//! The canonical configuration lives in `predation-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty document is a valid config.

use std::path::Path;

use predation_agents::{EcosystemConfig, PredatorConfig, PreyConfig};
use serde::Deserialize;

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV: &str = "PREDATION_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible run.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `predation-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Grid size and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Predator parameters.
    #[serde(default)]
    pub predator: PredatorConfig,

    /// Prey parameters.
    #[serde(default)]
    pub prey: PreyConfig,

    /// Run loop pacing and end-of-run reporting.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if `PREDATION_SEED` is not a `u64`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.world.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if `PREDATION_SEED` is not a `u64`.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.world.apply_env_overrides()?;
        Ok(config)
    }

    /// Bundle the species sections for the agent layer.
    pub fn ecosystem(&self) -> EcosystemConfig {
        EcosystemConfig {
            predator: self.predator.clone(),
            prey: self.prey.clone(),
        }
    }

    /// Reject configurations the simulation cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero dimension, a zero
    /// lifespan, breed rate or starvation time, a zero tick multiple, or
    /// initial populations that do not fit on the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.dimension == 0 {
            return Err(ConfigError::Invalid {
                reason: "world.dimension must be at least 1".to_owned(),
            });
        }
        self.ecosystem()
            .validate()
            .map_err(|err| ConfigError::Invalid {
                reason: err.to_string(),
            })?;
        if self.run.tick_multiple == 0 {
            return Err(ConfigError::Invalid {
                reason: "run.tick_multiple must be at least 1".to_owned(),
            });
        }

        let capacity = u64::from(self.world.dimension)
            .checked_mul(u64::from(self.world.dimension))
            .ok_or_else(|| ConfigError::Invalid {
                reason: "world.dimension is too large".to_owned(),
            })?;
        let requested = u64::from(self.predator.initial_count)
            .saturating_add(u64::from(self.prey.initial_count));
        if requested > capacity {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "initial population {requested} exceeds the {capacity} cells of the grid"
                ),
            });
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Cells per grid side.
    #[serde(default = "default_dimension")]
    pub dimension: u32,

    /// RNG seed. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl WorldConfig {
    /// Override fields from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PREDATION_SEED` is set but is
    /// not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let value = std::env::var(SEED_ENV).ok();
        self.apply_seed_override(value.as_deref())
    }

    /// Apply a `PREDATION_SEED` value, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `value` is not a `u64`.
    pub fn apply_seed_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        let Some(raw) = value else {
            return Ok(());
        };
        let seed = raw.trim().parse::<u64>().map_err(|err| ConfigError::Invalid {
            reason: format!("{SEED_ENV}={raw:?} is not a u64 seed: {err}"),
        })?;
        self.seed = Some(seed);
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            seed: None,
        }
    }
}

/// Run loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Ticks run between two renders.
    #[serde(default = "default_tick_multiple")]
    pub tick_multiple: u32,

    /// Milliseconds between renders.
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,

    /// Milliseconds the initial grid stays on screen.
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,

    /// Stop after this many ticks even if both species survive.
    #[serde(default)]
    pub max_ticks: Option<u64>,

    /// Columns in the end-of-run histogram.
    #[serde(default = "default_histogram_width")]
    pub histogram_width: u32,

    /// Rows in the end-of-run histogram.
    #[serde(default = "default_histogram_height")]
    pub histogram_height: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_multiple: default_tick_multiple(),
            refresh_rate_ms: default_refresh_rate_ms(),
            start_delay_ms: default_start_delay_ms(),
            max_ticks: None,
            histogram_width: default_histogram_width(),
            histogram_height: default_histogram_height(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG`
    /// is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format written to stderr.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

const fn default_dimension() -> u32 {
    10
}

const fn default_tick_multiple() -> u32 {
    5
}

const fn default_refresh_rate_ms() -> u64 {
    500
}

const fn default_start_delay_ms() -> u64 {
    400
}

const fn default_histogram_width() -> u32 {
    50
}

const fn default_histogram_height() -> u32 {
    20
}

fn default_log_level() -> String {
    "info".to_owned()
}
