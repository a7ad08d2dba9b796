//! Fail-soft calculator.
//!
//! [`ErlangCalculator`] exposes every operation of the crate with the
//! legacy contract: any error (bad input, division by zero, search
//! exhaustion) collapses to `0` / `0.0`. The typed functions in
//! [`crate::engine`], [`crate::solvers`] and [`crate::metrics`] keep the
//! distinction; use them when "no answer" and "zero" must differ.
//!
//! # Example
//!
//! ```rust
//! use erlang_planner::prelude::*;
//!
//! let calc = ErlangCalculator::default();
//! assert_eq!(calc.agents(0.8, 20.0, 100.0, 300.0), 21);
//! assert_eq!(calc.erlang_c(0.0, 5.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ErlangConfig;
use crate::engine::recurrence;
use crate::error::ErlangResult;
use crate::metrics::{self, StaffingReport};
use crate::solvers;

/// Calculator bound to one [`ErlangConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErlangCalculator {
    config: ErlangConfig,
}

/// Collapse a typed result to its value or the type's zero.
fn or_zero<T: Default>(operation: &'static str, result: ErlangResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            debug!(operation, %error, "collapsed to zero");
            T::default()
        }
    }
}

impl ErlangCalculator {
    /// Calculator over `config`.
    #[must_use]
    pub const fn new(config: ErlangConfig) -> Self {
        Self { config }
    }

    /// Calculator over the one-hour window.
    #[must_use]
    pub fn hourly() -> Self {
        Self::new(ErlangConfig::hourly())
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ErlangConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Recurrences
    // ------------------------------------------------------------------

    /// Erlang B blocking probability.
    #[must_use]
    pub fn erlang_b(&self, servers: f64, intensity: f64) -> f64 {
        or_zero("erlang_b", recurrence::erlang_b(servers, intensity))
    }

    /// Erlang B with retries.
    #[must_use]
    pub fn erlang_b_ext(&self, servers: f64, intensity: f64, retry: f64) -> f64 {
        or_zero("erlang_b_ext", recurrence::erlang_b_ext(servers, intensity, retry))
    }

    /// Engset blocking probability.
    #[must_use]
    pub fn engset_b(&self, servers: f64, sources: f64, intensity: f64) -> f64 {
        or_zero("engset_b", recurrence::engset_b(servers, sources, intensity))
    }

    /// Erlang C waiting probability.
    #[must_use]
    pub fn erlang_c(&self, servers: f64, intensity: f64) -> f64 {
        or_zero("erlang_c", recurrence::erlang_c(servers, intensity))
    }

    // ------------------------------------------------------------------
    // Trunk and traffic solvers
    // ------------------------------------------------------------------

    /// Trunks for `intensity` starting the scan at `servers`.
    #[must_use]
    pub fn number_trunks(&self, servers: f64, intensity: f64) -> u32 {
        or_zero("number_trunks", solvers::number_trunks(&self.config, servers, intensity))
    }

    /// Trunks keeping blocking at or below `blocking`.
    #[must_use]
    pub fn nb_trunks(&self, intensity: f64, blocking: f64) -> u32 {
        or_zero("nb_trunks", solvers::nb_trunks(&self.config, intensity, blocking))
    }

    /// Servers reaching `blocking` via the incremental recurrence.
    #[must_use]
    pub fn servers(&self, blocking: f64, intensity: f64) -> u32 {
        or_zero("servers", solvers::servers(&self.config, blocking, intensity))
    }

    /// Offered load `servers` trunks carry at `blocking`.
    #[must_use]
    pub fn traffic(&self, servers: f64, blocking: f64) -> f64 {
        or_zero("traffic", solvers::traffic(&self.config, servers, blocking))
    }

    /// Digit refinement of the offered load.
    #[must_use]
    pub fn looping_traffic(
        &self,
        trunks: f64,
        blocking: f64,
        increment: f64,
        min_intensity: f64,
    ) -> f64 {
        or_zero(
            "looping_traffic",
            solvers::looping_traffic(&self.config, trunks, blocking, increment, min_intensity),
        )
    }

    // ------------------------------------------------------------------
    // Agent solvers
    // ------------------------------------------------------------------

    /// Agents meeting `sla` within `service_time` seconds.
    #[must_use]
    pub fn agents(&self, sla: f64, service_time: f64, calls_per_hour: f64, aht: f64) -> u32 {
        or_zero(
            "agents",
            solvers::agents(&self.config, sla, service_time, calls_per_hour, aht),
        )
    }

    /// Agents keeping the average speed of answer at or below `asa`.
    #[must_use]
    pub fn agents_asa(&self, asa: f64, calls_per_hour: f64, aht: f64) -> u32 {
        or_zero("agents_asa", solvers::agents_asa(&self.config, asa, calls_per_hour, aht))
    }

    /// Agents whose rounded ASA is at most `avg_sa` seconds.
    #[must_use]
    pub fn nb_agents(&self, calls_per_hour: f64, avg_sa: f64, aht: f64) -> u32 {
        or_zero(
            "nb_agents",
            solvers::nb_agents(&self.config, calls_per_hour, avg_sa, aht),
        )
    }

    /// Fractional headcount meeting `sla`.
    #[must_use]
    pub fn fractional_agents(
        &self,
        sla: f64,
        service_time: f64,
        calls_per_hour: f64,
        aht: f64,
    ) -> f64 {
        or_zero(
            "fractional_agents",
            solvers::fractional_agents(&self.config, sla, service_time, calls_per_hour, aht),
        )
    }

    /// Calls per window `no_agents` agents can handle at `sla`.
    #[must_use]
    pub fn call_capacity(&self, no_agents: f64, sla: f64, service_time: f64, aht: f64) -> u64 {
        or_zero(
            "call_capacity",
            solvers::call_capacity(&self.config, no_agents, sla, service_time, aht),
        )
    }

    /// As [`Self::call_capacity`] for a fractional headcount.
    #[must_use]
    pub fn fractional_call_capacity(
        &self,
        no_agents: f64,
        sla: f64,
        service_time: f64,
        aht: f64,
    ) -> u64 {
        or_zero(
            "fractional_call_capacity",
            solvers::fractional_call_capacity(&self.config, no_agents, sla, service_time, aht),
        )
    }

    /// Answer-time threshold at which `no_agents` reach `sla`.
    #[must_use]
    pub fn service_time(&self, no_agents: f64, sla: f64, calls_per_hour: f64, aht: f64) -> i64 {
        or_zero(
            "service_time",
            solvers::service_time(&self.config, no_agents, sla, calls_per_hour, aht),
        )
    }

    // ------------------------------------------------------------------
    // Metrics
    // ------------------------------------------------------------------

    /// Average speed of answer in seconds.
    #[must_use]
    pub fn asa(&self, agents: f64, calls_per_hour: f64, aht: f64) -> u64 {
        or_zero("asa", metrics::asa(&self.config, agents, calls_per_hour, aht))
    }

    /// Mean number of calls waiting.
    #[must_use]
    pub fn queue_size(&self, agents: f64, calls_per_hour: f64, aht: f64) -> u64 {
        or_zero("queue_size", metrics::queue_size(&self.config, agents, calls_per_hour, aht))
    }

    /// Mean wait of queued calls in seconds.
    #[must_use]
    pub fn queue_time(&self, agents: f64, calls_per_hour: f64, aht: f64) -> u64 {
        or_zero("queue_time", metrics::queue_time(&self.config, agents, calls_per_hour, aht))
    }

    /// Service level within `service_time` seconds.
    #[must_use]
    pub fn sla(&self, agents: f64, service_time: f64, calls_per_hour: f64, aht: f64) -> f64 {
        or_zero(
            "sla",
            metrics::sla(&self.config, agents, service_time, calls_per_hour, aht),
        )
    }

    /// Agent occupancy.
    #[must_use]
    pub fn utilisation(&self, agents: f64, calls_per_hour: f64, aht: f64) -> f64 {
        or_zero("utilisation", metrics::utilisation(&self.config, agents, calls_per_hour, aht))
    }

    /// Fraction of callers still waiting after `abandon_time` seconds.
    #[must_use]
    pub fn abandon(&self, agents: f64, abandon_time: f64, calls_per_hour: f64, aht: f64) -> f64 {
        or_zero(
            "abandon",
            metrics::abandon(&self.config, agents, abandon_time, calls_per_hour, aht),
        )
    }

    /// Probability of queueing.
    #[must_use]
    pub fn queued(&self, agents: f64, calls_per_hour: f64, aht: f64) -> f64 {
        or_zero("queued", metrics::queued(&self.config, agents, calls_per_hour, aht))
    }

    /// Trunks for conversation plus queue.
    #[must_use]
    pub fn trunks(&self, agents: f64, calls_per_hour: f64, aht: f64) -> u32 {
        or_zero("trunks", metrics::trunks(&self.config, agents, calls_per_hour, aht))
    }

    /// Full staffing report, or `None` if any metric fails.
    #[must_use]
    pub fn report(
        &self,
        agents: f64,
        service_time: f64,
        calls_per_hour: f64,
        aht: f64,
    ) -> Option<StaffingReport> {
        StaffingReport::evaluate(&self.config, agents, service_time, calls_per_hour, aht)
            .map_err(|error| debug!(%error, "report unavailable"))
            .ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrences_pass_through() {
        let calc = ErlangCalculator::default();
        assert!((calc.erlang_b(10.0, 5.0) - 0.018_384_570_336_648_14).abs() < 1e-12);
        assert!((calc.erlang_c(10.0, 5.0) - 0.036_105_359_158_320_2).abs() < 1e-12);
        assert!((calc.engset_b(2.0, 3.0, 1.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_domain_errors_collapse_to_zero() {
        let calc = ErlangCalculator::default();
        assert!(calc.erlang_c(-1.0, 5.0).abs() < f64::EPSILON);
        assert!(calc.erlang_c(0.0, 5.0).abs() < f64::EPSILON);
        assert!(calc.engset_b(5.0, 5.0, 0.5).abs() < f64::EPSILON);
        assert!(calc.erlang_b(f64::NAN, 5.0).abs() < f64::EPSILON);
        assert_eq!(calc.asa(0.0, 100.0, 300.0), 0);
        assert_eq!(calc.agents(0.8, 20.0, 100.0, 0.0), 0);
        assert_eq!(calc.service_time(0.0, 0.8, 100.0, 300.0), 0);
        assert!(calc.traffic(0.0, 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exhaustion_collapses_to_zero() {
        let calc = ErlangCalculator::new(ErlangConfig::builder().max_search(5).build());
        assert_eq!(calc.nb_trunks(50.0, 0.01), 0);
        assert!(solvers::nb_trunks(calc.config(), 50.0, 0.01)
            .unwrap_err()
            .is_search_exhausted());
    }

    #[test]
    fn test_solvers_pass_through() {
        let calc = ErlangCalculator::default();
        assert_eq!(calc.agents(0.8, 20.0, 100.0, 300.0), 21);
        assert_eq!(calc.agents_asa(20.0, 100.0, 300.0), 21);
        assert_eq!(calc.nb_agents(100.0, 20.0, 300.0), 21);
        assert_eq!(calc.call_capacity(20.0, 0.8, 20.0, 300.0), 96);
        assert_eq!(calc.service_time(18.0, 0.8, 100.0, 300.0), 158);
        assert_eq!(calc.service_time(30.0, 0.8, 100.0, 300.0), -2006);
        assert_eq!(calc.trunks(18.0, 100.0, 300.0), 41);
    }

    #[test]
    fn test_hourly_calculator_uses_hour_window() {
        let hourly = ErlangCalculator::hourly();
        let half = ErlangCalculator::default();
        assert_eq!(
            hourly.agents(0.8, 20.0, 200.0, 300.0),
            half.agents(0.8, 20.0, 100.0, 300.0)
        );
    }

    #[test]
    fn test_report() {
        let calc = ErlangCalculator::default();
        let report = calc.report(20.0, 20.0, 100.0, 300.0).unwrap();
        assert_eq!(report.asa_secs, 30);
        assert!(calc.report(0.0, 20.0, 100.0, 300.0).is_none());
    }
}
