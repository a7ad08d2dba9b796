//! Birth/death rate arithmetic.
//!
//! ```text
//! birth rate   λ = calls offered per window
//! death rate   μ = window / AHT            (calls one agent handles per window)
//! traffic      A = λ / μ                   (Erlangs)
//! ```
//!
//! The window length comes from [`ErlangConfig::time_interval`]; callers
//! must quote call volumes in the same window.

use serde::{Deserialize, Serialize};

use crate::config::ErlangConfig;
use crate::engine::guard::{checked_div, ensure_non_negative, ensure_positive};
use crate::error::ErlangResult;

/// Utilisation used by the delay formulas once a group is overloaded.
pub const OVERLOAD_UTILISATION: f64 = 0.99;

/// Rates derived from a call volume and an average handling time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficRates {
    /// Calls offered per window (λ).
    pub birth_rate: f64,
    /// Calls completed per agent per window (μ).
    pub death_rate: f64,
    /// Offered load in Erlangs (A = λ/μ).
    pub traffic_rate: f64,
    /// Average handling time in seconds.
    pub aht: f64,
    /// Window length in seconds.
    pub window: f64,
}

impl TrafficRates {
    /// Derive rates for `calls_per_window` calls of `aht` seconds each.
    ///
    /// # Errors
    ///
    /// Returns a domain error if `aht` is not positive or the call volume
    /// is negative.
    pub fn new(config: &ErlangConfig, calls_per_window: f64, aht: f64) -> ErlangResult<Self> {
        const OP: &str = "traffic_rates";
        let birth_rate = ensure_non_negative(OP, "calls_per_hour", calls_per_window)?;
        let aht = ensure_positive(OP, "aht", aht)?;
        let window = ensure_positive(OP, "time_interval", config.time_interval)?;
        let death_rate = checked_div(OP, window, aht)?;
        let traffic_rate = checked_div(OP, birth_rate, death_rate)?;
        Ok(Self {
            birth_rate,
            death_rate,
            traffic_rate,
            aht,
            window,
        })
    }

    /// Offered load in Erlangs.
    #[must_use]
    pub const fn erlangs(&self) -> f64 {
        self.traffic_rate
    }

    /// Utilisation `A / N`, unclamped.
    ///
    /// # Errors
    ///
    /// Returns a domain error for zero agents.
    pub fn utilisation(&self, agents: f64) -> ErlangResult<f64> {
        checked_div("utilisation", self.traffic_rate, agents)
    }

    /// Utilisation as used by the queueing formulas: `A / N` while the
    /// group is stable, otherwise [`OVERLOAD_UTILISATION`].
    ///
    /// # Errors
    ///
    /// Returns a domain error for zero agents.
    pub fn delay_utilisation(&self, agents: f64) -> ErlangResult<f64> {
        if self.traffic_rate < agents {
            self.utilisation(agents)
        } else {
            Ok(OVERLOAD_UTILISATION)
        }
    }

    /// Mean time in queue for a call that waits, in windows:
    /// `1 / (N · μ · (1 - ρ))`.
    ///
    /// # Errors
    ///
    /// Returns a domain error for zero agents.
    pub fn queue_time_windows(&self, agents: f64) -> ErlangResult<f64> {
        let rho = self.delay_utilisation(agents)?;
        checked_div("queue_time", 1.0, agents * self.death_rate * (1.0 - rho))
    }

    /// Average speed of answer in windows for waiting probability `c`:
    /// `C / (N · μ · (1 - ρ))`.
    ///
    /// # Errors
    ///
    /// Returns a domain error for zero agents.
    pub fn answer_time_windows(&self, agents: f64, c: f64) -> ErlangResult<f64> {
        let rho = self.delay_utilisation(agents)?;
        checked_div("answer_time", c, agents * self.death_rate * (1.0 - rho))
    }

    /// Exponential waiting-time tail `e^{(A - N)·t / AHT}`.
    #[must_use]
    pub fn wait_tail(&self, agents: f64, seconds: f64) -> f64 {
        ((self.traffic_rate - agents) * seconds / self.aht).exp()
    }

    /// Convert a duration in windows to whole seconds, rounding half up.
    #[must_use]
    pub fn windows_to_seconds(&self, windows: f64) -> u64 {
        round_half_up(windows * self.window)
    }
}

/// Round a non-negative value half up to an integer; negative values and
/// NaN map to 0.
#[must_use]
pub fn round_half_up(value: f64) -> u64 {
    let rounded = (value + 0.5).floor();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else {
        rounded as u64
    }
}
