//! Inverse solvers.
//!
//! None of the Erlang formulas has a closed-form inverse, so every solver
//! here is a monotone search over one dimension:
//!
//! | Module | Searches | Strategy |
//! |---|---|---|
//! | [`trunks`] | trunk count | linear scan, incremental recurrence |
//! | [`traffic`] | offered load | doubling bracket + digit refinement |
//! | [`agents`] | agent count | stabilise, then linear scan |
//! | [`capacity`] | call volume | decrement until the agent solver fits |
//! | [`service_time`] | answer time | algebraic, one correction step |
//!
//! All searches are bounded by [`ErlangConfig`](crate::config::ErlangConfig)
//! caps and report an exhausted range as
//! [`ErlangError::SearchExhausted`], never as a silent zero.

pub mod agents;
pub mod capacity;
pub mod service_time;
pub mod traffic;
pub mod trunks;

use std::ops::RangeInclusive;

use tracing::warn;

use crate::engine::guard::ensure_non_negative;
use crate::error::{ErlangError, ErlangResult};

pub use agents::{agents, agents_asa, fractional_agents, nb_agents};
pub use capacity::{call_capacity, fractional_call_capacity};
pub use service_time::service_time;
pub use traffic::{looping_traffic, traffic};
pub use trunks::{nb_trunks, number_trunks, servers};

/// Return the first count in `range` for which `meets` holds.
///
/// An empty range is reported the same way as a range with no match.
pub(crate) fn scan_first<F>(
    operation: &'static str,
    range: RangeInclusive<u32>,
    mut meets: F,
) -> ErlangResult<u32>
where
    F: FnMut(u32) -> ErlangResult<bool>,
{
    let limit = u64::from(*range.end());
    for n in range {
        if meets(n)? {
            return Ok(n);
        }
    }
    warn!(operation, limit, "search range exhausted");
    Err(ErlangError::exhausted(operation, limit))
}

/// Convert a non-negative real to a resource count.
pub(crate) fn to_count(operation: &'static str, value: f64) -> ErlangResult<u32> {
    let value = ensure_non_negative(operation, "count", value)?;
    if value > f64::from(u32::MAX) {
        return Err(ErlangError::domain(
            operation,
            format!("resource count {value} is out of range"),
        ));
    }
    Ok(value as u32)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_first_finds_match() {
        let n = scan_first("test", 1..=10, |n| Ok(n * n >= 30)).unwrap();
        assert_eq!(n, 6);
    }

    #[test]
    fn test_scan_first_empty_range_is_exhausted() {
        #[allow(clippy::reversed_empty_ranges)]
        let err = scan_first("test", 5..=4, |_| Ok(true)).unwrap_err();
        assert!(err.is_search_exhausted());
    }

    #[test]
    fn test_scan_first_no_match() {
        let err = scan_first("test", 1..=3, |_| Ok(false)).unwrap_err();
        assert!(matches!(
            err,
            ErlangError::SearchExhausted {
                operation: "test",
                limit: 3
            }
        ));
    }

    #[test]
    fn test_scan_first_propagates_error() {
        let err = scan_first("test", 1..=3, |_| Err(ErlangError::domain("inner", "bad")))
            .unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count("test", 3.0).unwrap(), 3);
        assert!(to_count("test", -1.0).is_err());
        assert!(to_count("test", 1e12).is_err());
    }
}
