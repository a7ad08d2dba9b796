//! Answer-time solver.

use tracing::debug;

use super::agents::agents;
use crate::config::ErlangConfig;
use crate::engine::guard::{checked_div, ensure_finite};
use crate::engine::rates::TrafficRates;
use crate::engine::recurrence::erlang_c;
use crate::error::ErlangResult;

/// Answer-time threshold (seconds) at which `no_agents` agents reach
/// service level `sla`.
///
/// The time is derived in closed form from the mean queue time `q`:
///
/// ```text
/// t = q · (1 - (1 - SL) / C)
/// ```
///
/// then checked once against [`agents`]: if the agent solver would staff
/// `trunc(t)` differently, or finds no count within its scan, one second
/// is added. The result is truncated
/// toward zero and is negative when the group meets `sla` before anyone
/// queues.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents, or when no call ever
/// waits (`C = 0`).
pub fn service_time(
    config: &ErlangConfig,
    no_agents: f64,
    sla: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<i64> {
    const OP: &str = "service_time";
    let sla = ensure_finite(OP, "sla", sla)?;
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;

    let c = erlang_c(no_agents, rates.traffic_rate)?;
    let queue_secs = rates.queue_time_windows(no_agents)? * rates.window;
    let secs = queue_secs * (1.0 - checked_div(OP, 1.0 - sla, c)?);

    // a check that finds no staffing at all counts as a mismatch
    let adjust = match agents(config, sla, secs.trunc(), calls_per_hour, aht) {
        Ok(staffed) if f64::from(staffed) == no_agents => 0.0,
        Ok(_) => 1.0,
        Err(error) => {
            debug!(no_agents, %error, "service_time check found no staffing");
            1.0
        }
    };
    let result = (secs + adjust).trunc() as i64;
    debug!(no_agents, sla, calls_per_hour, aht, service_time = result, "service_time");
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn cfg() -> ErlangConfig {
        ErlangConfig::default()
    }

    #[test]
    fn test_service_time_reference_values() {
        assert_eq!(service_time(&cfg(), 18.0, 0.8, 100.0, 300.0).unwrap(), 158);
        assert_eq!(service_time(&cfg(), 20.0, 0.8, 100.0, 300.0).unwrap(), 37);
        assert_eq!(service_time(&cfg(), 21.0, 0.8, 100.0, 300.0).unwrap(), 10);
        assert_eq!(service_time(&cfg(), 110.0, 0.8, 600.0, 300.0).unwrap(), 5);
    }

    #[test]
    fn test_service_time_shrinks_with_staff() {
        let config = cfg();
        let tight = service_time(&config, 18.0, 0.8, 100.0, 300.0).unwrap();
        let loose = service_time(&config, 21.0, 0.8, 100.0, 300.0).unwrap();
        assert!(loose < tight);
    }

    #[test]
    fn test_service_time_negative_when_overstaffed() {
        assert_eq!(service_time(&cfg(), 25.0, 0.8, 100.0, 300.0).unwrap(), -147);
    }

    #[test]
    fn test_service_time_far_overstaffed_still_corrects() {
        // the agent check cannot meet a large negative threshold; treated as a mismatch
        assert_eq!(service_time(&cfg(), 28.0, 0.8, 100.0, 300.0).unwrap(), -667);
        assert_eq!(service_time(&cfg(), 30.0, 0.8, 100.0, 300.0).unwrap(), -2006);
    }

    #[test]
    fn test_service_time_no_waiting_is_domain_error() {
        // zero traffic: C = 0
        let err = service_time(&cfg(), 5.0, 0.8, 0.0, 300.0).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_service_time_zero_agents() {
        let err = service_time(&cfg(), 0.0, 0.8, 100.0, 300.0).unwrap_err();
        assert!(err.is_domain_error());
    }
}
