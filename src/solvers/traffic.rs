//! Offered-load solver.
//!
//! Finds the largest traffic a fixed trunk group can carry at a target
//! blocking probability. The search is a decimal-digit refinement, not a
//! bisection:
//!
//! ```text
//! 1. bracket: A = N, 2N, 4N, ... until B(N, A) >= target
//! 2. step:    smallest power of ten above 1% of the bracket
//! 3. refine:  walk up from the last good A by `step`; on overshoot,
//!             divide `step` by 10 and restart from the last good A
//! ```
//!
//! Refinement stops when the step falls below
//! [`ErlangConfig::max_accuracy`] or after [`ErlangConfig::max_loops`]
//! probes.

use tracing::{debug, trace, warn};

use crate::config::ErlangConfig;
use crate::engine::guard::{ensure_finite, ensure_non_negative, ensure_positive};
use crate::engine::recurrence::erlang_b;
use crate::error::{ErlangError, ErlangResult};

/// Traffic (Erlangs) that `servers` trunks carry at `blocking`.
///
/// # Errors
///
/// Domain error if `servers < 1` or `blocking < 0`; `SearchExhausted` if
/// the bracket does not close within [`ErlangConfig::max_loops`]
/// doublings.
pub fn traffic(config: &ErlangConfig, servers: f64, blocking: f64) -> ErlangResult<f64> {
    const OP: &str = "traffic";
    let servers = ensure_finite(OP, "servers", servers)?;
    let blocking = ensure_finite(OP, "blocking", blocking)?;
    if servers < 1.0 || blocking < 0.0 {
        return Err(ErlangError::domain(
            OP,
            format!("need servers >= 1 and blocking >= 0, got {servers} and {blocking}"),
        ));
    }
    let trunks = servers.trunc();

    let mut bracket = trunks;
    let mut b = erlang_b(servers, bracket)?;
    let mut doublings = 0;
    while b < blocking {
        if doublings >= config.max_loops {
            return Err(ErlangError::exhausted(OP, u64::from(config.max_loops)));
        }
        bracket *= 2.0;
        b = erlang_b(servers, bracket)?;
        doublings += 1;
    }

    let mut step = 1.0;
    while step <= bracket / 100.0 {
        step *= 10.0;
    }
    debug!(servers, blocking, bracket, step, "traffic bracket");
    looping_traffic(config, trunks, blocking, step, 0.0)
}

/// Digit refinement of the offered load, starting from `min_intensity`
/// with step `increment`.
///
/// Returns the last intensity whose blocking did not exceed `blocking`.
/// Hitting [`ErlangConfig::max_loops`] is not an error: the best estimate
/// so far is returned.
///
/// # Errors
///
/// Domain error for a non-positive increment or negative start.
pub fn looping_traffic(
    config: &ErlangConfig,
    trunks: f64,
    blocking: f64,
    increment: f64,
    min_intensity: f64,
) -> ErlangResult<f64> {
    const OP: &str = "looping_traffic";
    let mut step = ensure_positive(OP, "increment", increment)?;
    let mut good = ensure_non_negative(OP, "min_intensity", min_intensity)?;

    if erlang_b(trunks, good)? == blocking {
        return Ok(good);
    }

    let mut intensity = good;
    let mut loops = 0;
    while step >= config.max_accuracy && loops < config.max_loops {
        if erlang_b(trunks, intensity)? > blocking {
            step /= 10.0;
            intensity = good;
        }
        good = intensity;
        intensity += step;
        loops += 1;
        trace!(loops, good, step, "looping_traffic");
    }
    if loops >= config.max_loops {
        warn!(trunks, blocking, step, "refinement stopped at loop cap");
    }
    debug!(trunks, blocking, intensity = good, loops, "looping_traffic");
    Ok(good)
}
