//! Agent-count solvers for service-level and speed-of-answer targets.
//!
//! # Governing Equation
//!
//! ```text
//! SL(N, t) = 1 - C(N, A) · e^{-(N - A)·t / AHT}
//! ```
//!
//! Each solver starts from the offered load, adds agents until the group
//! is stable (A/N < 1), then scans upwards until the target is met. The
//! scan is capped at 100× the starting count.

use tracing::debug;

use super::{scan_first, to_count};
use crate::config::ErlangConfig;
use crate::engine::clamp::clamp;
use crate::engine::guard::{checked_div, ensure_finite};
use crate::engine::rates::TrafficRates;
use crate::engine::recurrence::erlang_c;
use crate::error::{ErlangError, ErlangResult};
use crate::metrics;

/// Scan length relative to the starting agent count.
const SCAN_FACTOR: u64 = 100;

/// Smallest agent count at or above `start` that keeps A/N below 1.
fn stable_start(operation: &'static str, rates: &TrafficRates, start: u32) -> ErlangResult<u32> {
    let mut agents = start.max(1);
    while rates.traffic_rate / f64::from(agents) >= 1.0 {
        agents = agents
            .checked_add(1)
            .ok_or_else(|| ErlangError::domain(operation, "agent count overflow"))?;
    }
    Ok(agents)
}

/// Service level reached by `agents` on the given rates, floored at 0.
fn service_level(rates: &TrafficRates, agents: u32, service_time: f64) -> ErlangResult<f64> {
    let servers = f64::from(agents);
    let c = erlang_c(servers, rates.traffic_rate)?;
    Ok((1.0 - c * rates.wait_tail(servers, service_time)).max(0.0))
}

/// Run `meets` on `start, start + 1, ...` for at most `SCAN_FACTOR ×
/// start` candidates.
fn scan_from<F>(operation: &'static str, start: u32, meets: F) -> ErlangResult<u32>
where
    F: FnMut(u32) -> ErlangResult<bool>,
{
    let span = u64::from(start) * SCAN_FACTOR;
    let end = u64::from(start) + span - 1;
    let end = u32::try_from(end).unwrap_or(u32::MAX);
    scan_first(operation, start..=end, meets)
}

/// Minimum agents answering a fraction `sla` of calls within
/// `service_time` seconds.
///
/// `calls_per_hour` is the call volume per configured window. A service
/// level within [`ErlangConfig::max_accuracy`] of 1 counts as met.
///
/// # Errors
///
/// Domain error for invalid rates; `SearchExhausted` if the scan ends
/// without meeting the target.
pub fn agents(
    config: &ErlangConfig,
    sla: f64,
    service_time: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<u32> {
    const OP: &str = "agents";
    let sla = clamp(ensure_finite(OP, "sla", sla)?);
    let service_time = ensure_finite(OP, "service_time", service_time)?;
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;

    let erlangs = rates.erlangs();
    let start = if erlangs < 1.0 { 1 } else { to_count(OP, erlangs.ceil())? };
    let start = stable_start(OP, &rates, start)?;

    let agents = scan_from(OP, start, |n| {
        let level = service_level(&rates, n, service_time)?;
        Ok(level >= sla || level > 1.0 - config.max_accuracy)
    })?;
    debug!(sla, service_time, calls_per_hour, aht, agents, "agents");
    Ok(agents)
}

/// Minimum agents keeping the average speed of answer at or below `asa`
/// seconds. A negative target is read as one second.
///
/// # Errors
///
/// Domain error for invalid rates; `SearchExhausted` if the scan ends
/// without meeting the target.
pub fn agents_asa(
    config: &ErlangConfig,
    asa: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<u32> {
    const OP: &str = "agents_asa";
    let asa = ensure_finite(OP, "asa", asa)?;
    let asa = if asa < 0.0 { 1.0 } else { asa };
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;

    let erlangs = rates.erlangs();
    let start = if erlangs < 1.0 { 1 } else { to_count(OP, erlangs.floor())? };
    let start = stable_start(OP, &rates, start)?;

    let agents = scan_from(OP, start, |n| {
        let servers = f64::from(n);
        let c = erlang_c(servers, rates.traffic_rate)?;
        let answer = rates.answer_time_windows(servers, c)?;
        Ok(answer * rates.window <= asa)
    })?;
    debug!(asa, calls_per_hour, aht, agents, "agents_asa");
    Ok(agents)
}

/// Minimum agents whose rounded ASA is at most `avg_sa` seconds,
/// scanning from one agent.
///
/// Unlike [`agents_asa`] this evaluates overloaded groups too, through
/// [`metrics::asa`].
///
/// # Errors
///
/// Domain error unless all inputs are positive; `SearchExhausted` if no
/// count up to [`ErlangConfig::max_search`] qualifies.
pub fn nb_agents(
    config: &ErlangConfig,
    calls_per_hour: f64,
    avg_sa: f64,
    aht: f64,
) -> ErlangResult<u32> {
    const OP: &str = "nb_agents";
    let calls_per_hour = ensure_finite(OP, "calls_per_hour", calls_per_hour)?;
    let avg_sa = ensure_finite(OP, "avg_sa", avg_sa)?;
    let aht = ensure_finite(OP, "aht", aht)?;
    if calls_per_hour <= 0.0 || avg_sa <= 0.0 || aht <= 0.0 {
        return Err(ErlangError::domain(OP, "all inputs must be positive"));
    }

    let agents = scan_first(OP, 1..=config.max_search, |n| {
        let asa = metrics::asa(config, f64::from(n), calls_per_hour, aht)?;
        Ok(asa as f64 <= avg_sa)
    })?;
    debug!(calls_per_hour, avg_sa, aht, agents, "nb_agents");
    Ok(agents)
}

/// Agent requirement as a real number.
///
/// Finds the first integer count that meets `sla`, then interpolates
/// linearly between it and the count below using their service levels.
/// If the target is only met through the `1 - max_accuracy` shortcut the
/// integer count is returned.
///
/// # Errors
///
/// Domain error for invalid rates; `SearchExhausted` if the scan ends
/// without meeting the target.
pub fn fractional_agents(
    config: &ErlangConfig,
    sla: f64,
    service_time: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<f64> {
    const OP: &str = "fractional_agents";
    let sla = clamp(ensure_finite(OP, "sla", sla)?);
    let service_time = ensure_finite(OP, "service_time", service_time)?;
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;

    let erlangs = rates.erlangs();
    let start = if erlangs < 1.0 {
        1
    } else {
        to_count(OP, (erlangs + 0.5).trunc())?
    };
    let start = stable_start(OP, &rates, start)?;

    let mut level = 0.0;
    let mut previous = 0.0;
    let agents = scan_from(OP, start, |n| {
        previous = level;
        level = clamp(service_level(&rates, n, service_time)?);
        Ok(level >= sla || level > 1.0 - config.max_accuracy)
    })?;

    let result = if level >= sla && level > previous {
        checked_div(OP, sla - previous, level - previous)? + f64::from(agents - 1)
    } else {
        f64::from(agents)
    };
    debug!(sla, service_time, calls_per_hour, aht, agents = result, "fractional_agents");
    Ok(result)
}
