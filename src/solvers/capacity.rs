//! Call-volume solvers: the inverse of the agent solvers.
//!
//! Start from the most calls the agents could possibly handle in one
//! window (`⌈window / AHT⌉` each) and remove one call at a time until the
//! agent solver says the given headcount is enough.

use tracing::debug;

use super::agents::{agents, fractional_agents};
use crate::config::ErlangConfig;
use crate::engine::guard::{ensure_non_negative, ensure_positive};
use crate::error::{ErlangError, ErlangResult};

/// Upper bound on the call volume `no_agents` could handle in a window.
fn ceiling_calls(operation: &'static str, calls: f64) -> ErlangResult<u64> {
    let calls = ensure_non_negative(operation, "calls", calls.ceil())?;
    if calls > u64::MAX as f64 {
        return Err(ErlangError::domain(operation, "call volume out of range"));
    }
    Ok(calls as u64)
}

/// Most calls per window that `no_agents` agents can take while meeting
/// `sla` within `service_time` seconds.
///
/// The agent count is truncated to a whole number.
///
/// # Errors
///
/// Domain error for invalid inputs; any error of [`agents`] is passed on.
pub fn call_capacity(
    config: &ErlangConfig,
    no_agents: f64,
    sla: f64,
    service_time: f64,
    aht: f64,
) -> ErlangResult<u64> {
    const OP: &str = "call_capacity";
    let staff = ensure_non_negative(OP, "no_agents", no_agents)?.trunc();
    let aht = ensure_positive(OP, "aht", aht)?;
    let per_agent = ceiling_calls(OP, config.time_interval / aht)?;
    let mut calls = per_agent.saturating_mul(staff as u64);

    let mut needed = agents(config, sla, service_time, calls as f64, aht)?;
    while f64::from(needed) > staff && calls > 0 {
        calls -= 1;
        needed = agents(config, sla, service_time, calls as f64, aht)?;
    }
    debug!(no_agents, sla, service_time, aht, calls, "call_capacity");
    Ok(calls)
}

/// As [`call_capacity`], but compares against [`fractional_agents`] so a
/// fractional headcount (e.g. 20.5 FTE) is honoured.
///
/// # Errors
///
/// Domain error for invalid inputs; any error of [`fractional_agents`]
/// is passed on.
pub fn fractional_call_capacity(
    config: &ErlangConfig,
    no_agents: f64,
    sla: f64,
    service_time: f64,
    aht: f64,
) -> ErlangResult<u64> {
    const OP: &str = "fractional_call_capacity";
    let staff = ensure_non_negative(OP, "no_agents", no_agents)?;
    let aht = ensure_positive(OP, "aht", aht)?;
    let mut calls = ceiling_calls(OP, config.time_interval / aht * staff)?;

    let mut needed = fractional_agents(config, sla, service_time, calls as f64, aht)?;
    while needed > staff && calls > 0 {
        calls -= 1;
        needed = fractional_agents(config, sla, service_time, calls as f64, aht)?;
    }
    debug!(no_agents, sla, service_time, aht, calls, "fractional_call_capacity");
    Ok(calls)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn cfg() -> ErlangConfig {
        ErlangConfig::default()
    }

    #[test]
    fn test_call_capacity() {
        assert_eq!(call_capacity(&cfg(), 20.0, 0.8, 20.0, 300.0).unwrap(), 96);
        assert_eq!(call_capacity(&cfg(), 100.0, 0.8, 20.0, 300.0).unwrap(), 554);
    }

    #[test]
    fn test_call_capacity_round_trips_through_agents() {
        let config = cfg();
        let calls = call_capacity(&config, 20.0, 0.8, 20.0, 300.0).unwrap();
        assert!(agents(&config, 0.8, 20.0, calls as f64, 300.0).unwrap() <= 20);
        assert!(agents(&config, 0.8, 20.0, (calls + 1) as f64, 300.0).unwrap() > 20);
    }

    #[test]
    fn test_call_capacity_truncates_headcount() {
        assert_eq!(
            call_capacity(&cfg(), 20.9, 0.8, 20.0, 300.0).unwrap(),
            call_capacity(&cfg(), 20.0, 0.8, 20.0, 300.0).unwrap()
        );
    }

    #[test]
    fn test_call_capacity_zero_agents() {
        assert_eq!(call_capacity(&cfg(), 0.0, 0.8, 20.0, 300.0).unwrap(), 0);
    }

    #[test]
    fn test_call_capacity_rejects_zero_aht() {
        assert!(call_capacity(&cfg(), 20.0, 0.8, 20.0, 0.0).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_fractional_call_capacity() {
        assert_eq!(fractional_call_capacity(&cfg(), 20.0, 0.8, 20.0, 300.0).unwrap(), 96);
        assert_eq!(fractional_call_capacity(&cfg(), 20.5, 0.8, 20.0, 300.0).unwrap(), 98);
    }

    #[test]
    fn test_fractional_capacity_grows_with_headcount() {
        let config = cfg();
        let low = fractional_call_capacity(&config, 20.0, 0.8, 20.0, 300.0).unwrap();
        let high = fractional_call_capacity(&config, 21.0, 0.8, 20.0, 300.0).unwrap();
        assert!(high > low);
    }
}
