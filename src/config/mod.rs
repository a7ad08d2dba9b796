//! Planner configuration with YAML loading and validation.
//!
//! Replaces the process-wide tuning constants of classic Erlang
//! calculators with an explicit value that is passed to every solver.
//! Two configurations (say a 30-minute and a 60-minute dashboard) can be
//! used side by side without interfering with each other.
//!
//! ```yaml
//! max_accuracy: 1.0e-6
//! max_loops: 1000
//! time_interval: 3600.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{ErlangError, ErlangResult};

/// Half an hour, the default averaging window.
pub const HALF_HOUR_SECS: f64 = 1800.0;

/// One hour.
pub const HOUR_SECS: f64 = 3600.0;

/// Default cap on resource-count scans (2^16).
pub const DEFAULT_MAX_SEARCH: u32 = 1 << 16;

/// Numeric tuning and time-scale settings shared by all operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ErlangConfig {
    /// Convergence floor for the intensity refinement step.
    #[validate(range(min = 1e-15, max = 1.0))]
    #[serde(default = "default_max_accuracy")]
    pub max_accuracy: f64,

    /// Hard cap on refinement iterations.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_loops")]
    pub max_loops: u32,

    /// Averaging window in seconds. Defines the birth/death rate scale,
    /// so `calls_per_hour` arguments are really "calls per window".
    #[validate(range(min = 1.0, max = 86_400.0))]
    #[serde(default = "default_time_interval")]
    pub time_interval: f64,

    /// Upper bound on resource counts tried by linear scans.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_search")]
    pub max_search: u32,

    /// Fixed blocking threshold used by `number_trunks` and `servers`.
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    #[serde(default = "default_blocking_floor")]
    pub blocking_floor: f64,
}

const fn default_max_accuracy() -> f64 {
    1e-6
}

const fn default_max_loops() -> u32 {
    1000
}

const fn default_time_interval() -> f64 {
    HALF_HOUR_SECS
}

const fn default_max_search() -> u32 {
    DEFAULT_MAX_SEARCH
}

const fn default_blocking_floor() -> f64 {
    0.001
}

impl Default for ErlangConfig {
    fn default() -> Self {
        Self {
            max_accuracy: default_max_accuracy(),
            max_loops: default_max_loops(),
            time_interval: default_time_interval(),
            max_search: default_max_search(),
            blocking_floor: default_blocking_floor(),
        }
    }
}

impl ErlangConfig {
    /// Default settings over a 30-minute window.
    #[must_use]
    pub fn half_hour() -> Self {
        Self::default()
    }

    /// Default settings over a 60-minute window.
    #[must_use]
    pub fn hourly() -> Self {
        Self {
            time_interval: HOUR_SECS,
            ..Self::default()
        }
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> ErlangConfigBuilder {
        ErlangConfigBuilder::default()
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> ErlangResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> ErlangResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns error if any constraint is violated.
    pub fn check(&self) -> ErlangResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Constraints that span several fields.
    fn validate_semantic(&self) -> ErlangResult<()> {
        if self.max_accuracy >= self.blocking_floor {
            return Err(ErlangError::config(format!(
                "max_accuracy ({}) must be below blocking_floor ({})",
                self.max_accuracy, self.blocking_floor
            )));
        }
        Ok(())
    }

    /// Scan cap as a `u64`, for error reporting.
    #[must_use]
    pub const fn search_limit(&self) -> u64 {
        self.max_search as u64
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct ErlangConfigBuilder {
    max_accuracy: Option<f64>,
    max_loops: Option<u32>,
    time_interval: Option<f64>,
    max_search: Option<u32>,
    blocking_floor: Option<f64>,
}

impl ErlangConfigBuilder {
    /// Set the refinement convergence floor.
    #[must_use]
    pub const fn max_accuracy(mut self, value: f64) -> Self {
        self.max_accuracy = Some(value);
        self
    }

    /// Set the refinement iteration cap.
    #[must_use]
    pub const fn max_loops(mut self, value: u32) -> Self {
        self.max_loops = Some(value);
        self
    }

    /// Set the averaging window in seconds.
    #[must_use]
    pub const fn time_interval(mut self, secs: f64) -> Self {
        self.time_interval = Some(secs);
        self
    }

    /// Set the resource-count scan cap.
    #[must_use]
    pub const fn max_search(mut self, value: u32) -> Self {
        self.max_search = Some(value);
        self
    }

    /// Set the fixed blocking threshold.
    #[must_use]
    pub const fn blocking_floor(mut self, value: f64) -> Self {
        self.blocking_floor = Some(value);
        self
    }

    /// Build the configuration without validating it.
    #[must_use]
    pub fn build(self) -> ErlangConfig {
        let defaults = ErlangConfig::default();
        ErlangConfig {
            max_accuracy: self.max_accuracy.unwrap_or(defaults.max_accuracy),
            max_loops: self.max_loops.unwrap_or(defaults.max_loops),
            time_interval: self.time_interval.unwrap_or(defaults.time_interval),
            max_search: self.max_search.unwrap_or(defaults.max_search),
            blocking_floor: self.blocking_floor.unwrap_or(defaults.blocking_floor),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid.
    pub fn try_build(self) -> ErlangResult<ErlangConfig> {
        let config = self.build();
        config.check()?;
        Ok(config)
    }
}
