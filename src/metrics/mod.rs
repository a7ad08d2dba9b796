//! Derived queue metrics.
//!
//! Closed-form post-processing of the Erlang C probability for an agent
//! group handling `calls_per_hour` calls per window, each lasting `aht`
//! seconds on average.
//!
//! # Governing Equations
//!
//! ```text
//! ρ      = A / N                    (0.99 once A >= N)
//! ASA    = C / (N·μ·(1 - ρ))        windows
//! Lq     = ρ·C / (1 - ρ)            calls
//! Wq     = 1 / (N·μ·(1 - ρ))        windows, for calls that wait
//! SL(t)  = 1 - C·e^{(A - N)·t/AHT}
//! Ab(t)  = C·e^{(A - N)·t/AHT}
//! ```
//!
//! Integer-valued metrics are rounded half up.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ErlangConfig;
use crate::engine::clamp::clamp;
use crate::engine::guard::{checked_div, ensure_finite};
use crate::engine::rates::{round_half_up, TrafficRates};
use crate::engine::recurrence::erlang_c;
use crate::error::ErlangResult;
use crate::solvers::trunks::number_trunks;

/// Average speed of answer in whole seconds.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents.
pub fn asa(config: &ErlangConfig, agents: f64, calls_per_hour: f64, aht: f64) -> ErlangResult<u64> {
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;
    let c = erlang_c(agents, rates.traffic_rate)?;
    let answer = rates.answer_time_windows(agents, c)?;
    Ok(rates.windows_to_seconds(answer))
}

/// Mean number of calls waiting, rounded to a whole call.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents.
pub fn queue_size(
    config: &ErlangConfig,
    agents: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<u64> {
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;
    let rho = rates.delay_utilisation(agents)?;
    let c = erlang_c(agents, rates.traffic_rate)?;
    let size = checked_div("queue_size", rho * c, 1.0 - rho)?;
    Ok(round_half_up(size))
}

/// Mean wait, in whole seconds, of the calls that do queue.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents.
pub fn queue_time(
    config: &ErlangConfig,
    agents: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<u64> {
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;
    let wait = rates.queue_time_windows(agents)?;
    Ok(rates.windows_to_seconds(wait))
}

/// Fraction of calls answered within `service_time` seconds.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents.
pub fn sla(
    config: &ErlangConfig,
    agents: f64,
    service_time: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<f64> {
    let service_time = ensure_finite("sla", "service_time", service_time)?;
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;
    let c = erlang_c(agents, rates.traffic_rate)?;
    Ok(clamp(1.0 - c * rates.wait_tail(agents, service_time)))
}

/// Agent occupancy `A / N`, clamped to `[0, 1]`.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents.
pub fn utilisation(
    config: &ErlangConfig,
    agents: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<f64> {
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;
    Ok(clamp(rates.utilisation(agents)?))
}

/// Fraction of calls still waiting after `abandon_time` seconds, i.e.
/// the callers lost if everyone hangs up at that point.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents.
pub fn abandon(
    config: &ErlangConfig,
    agents: f64,
    abandon_time: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<f64> {
    let abandon_time = ensure_finite("abandon", "abandon_time", abandon_time)?;
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;
    let c = erlang_c(agents, rates.traffic_rate)?;
    Ok(clamp(c * rates.wait_tail(agents, abandon_time)))
}

/// Probability that a call has to queue at all.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents.
pub fn queued(
    config: &ErlangConfig,
    agents: f64,
    calls_per_hour: f64,
    aht: f64,
) -> ErlangResult<f64> {
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;
    Ok(clamp(erlang_c(agents, rates.traffic_rate)?))
}

/// Trunks needed to carry both the calls in conversation and the calls
/// held in queue.
///
/// Each call occupies a trunk for `AHT + ASA` seconds; the resulting
/// load is sized with [`number_trunks`] starting from `agents`. At least
/// one trunk is returned whenever there is traffic.
///
/// # Errors
///
/// Domain error for invalid rates or zero agents; `SearchExhausted` from
/// the trunk scan.
pub fn trunks(config: &ErlangConfig, agents: f64, calls_per_hour: f64, aht: f64) -> ErlangResult<u32> {
    let rates = TrafficRates::new(config, calls_per_hour, aht)?;
    let c = erlang_c(agents, rates.traffic_rate)?;
    let answer_secs = rates.windows_to_seconds(rates.answer_time_windows(agents, c)?);
    let holding = checked_div("trunks", rates.window, aht + answer_secs as f64)?;
    let load = checked_div("trunks", rates.birth_rate, holding)?;

    let n = number_trunks(config, agents, load)?;
    let n = if n < 1 && rates.traffic_rate > 0.0 { 1 } else { n };
    debug!(agents, calls_per_hour, aht, answer_secs, load, trunks = n, "trunks");
    Ok(n)
}

/// All derived metrics for one staffing level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingReport {
    /// Agents evaluated.
    pub agents: f64,
    /// Calls offered per window.
    pub calls_per_hour: f64,
    /// Average handling time in seconds.
    pub aht: f64,
    /// Answer-time threshold used for the service level, in seconds.
    pub service_time: f64,
    /// Offered load in Erlangs.
    pub traffic_erlangs: f64,
    /// Occupancy.
    pub utilisation: f64,
    /// Probability of queueing.
    pub queued: f64,
    /// Service level at `service_time`.
    pub service_level: f64,
    /// Average speed of answer in seconds.
    pub asa_secs: u64,
    /// Mean wait of queued calls in seconds.
    pub queue_time_secs: u64,
    /// Mean queue length.
    pub queue_size: u64,
    /// Trunks required.
    pub trunks: u32,
}

impl StaffingReport {
    /// Evaluate every metric for `agents` agents.
    ///
    /// # Errors
    ///
    /// Returns the first error any metric reports.
    pub fn evaluate(
        config: &ErlangConfig,
        agents: f64,
        service_time: f64,
        calls_per_hour: f64,
        aht: f64,
    ) -> ErlangResult<Self> {
        let rates = TrafficRates::new(config, calls_per_hour, aht)?;
        Ok(Self {
            agents,
            calls_per_hour,
            aht,
            service_time,
            traffic_erlangs: rates.erlangs(),
            utilisation: utilisation(config, agents, calls_per_hour, aht)?,
            queued: queued(config, agents, calls_per_hour, aht)?,
            service_level: sla(config, agents, service_time, calls_per_hour, aht)?,
            asa_secs: asa(config, agents, calls_per_hour, aht)?,
            queue_time_secs: queue_time(config, agents, calls_per_hour, aht)?,
            queue_size: queue_size(config, agents, calls_per_hour, aht)?,
            trunks: trunks(config, agents, calls_per_hour, aht)?,
        })
    }
}
