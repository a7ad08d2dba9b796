//! Trunk-count solvers.
//!
//! Smallest number of circuits whose Erlang B blocking drops below a
//! target. [`number_trunks`] and [`nb_trunks`] re-evaluate the recurrence
//! for every candidate (O(N²) overall); [`servers`] carries the recurrence
//! forward instead and finds the same kind of answer in a single O(N) pass.

use tracing::debug;

use super::{scan_first, to_count};
use crate::config::ErlangConfig;
use crate::engine::guard::{ensure_finite, ensure_non_negative};
use crate::engine::recurrence::erlang_b;
use crate::error::{ErlangError, ErlangResult};

/// Trunks needed to carry `intensity` with blocking strictly below
/// [`ErlangConfig::blocking_floor`], scanning upwards from `servers`.
///
/// The scan starts at `⌈servers⌉`; a start of `0` returns `0` because
/// `B(0, A)` is defined as `0`.
///
/// # Errors
///
/// Domain error for negative inputs; `SearchExhausted` if no count up to
/// [`ErlangConfig::max_search`] qualifies.
pub fn number_trunks(config: &ErlangConfig, servers: f64, intensity: f64) -> ErlangResult<u32> {
    const OP: &str = "number_trunks";
    let servers = ensure_non_negative(OP, "servers", servers)?;
    let intensity = ensure_non_negative(OP, "intensity", intensity)?;
    if servers.ceil() > f64::from(config.max_search) {
        return Err(ErlangError::exhausted(OP, config.search_limit()));
    }
    let start = to_count(OP, servers.ceil())?;

    let trunks = scan_first(OP, start..=config.max_search, |n| {
        Ok(erlang_b(f64::from(n), intensity)? < config.blocking_floor)
    })?;
    debug!(servers, intensity, trunks, "number_trunks");
    Ok(trunks)
}

/// Trunks needed to carry `intensity` with blocking at most `blocking`.
///
/// The scan starts at `⌈intensity⌉`, the smallest group that could
/// carry the load.
///
/// # Errors
///
/// Domain error unless both arguments are positive; `SearchExhausted` if
/// no count up to [`ErlangConfig::max_search`] qualifies.
pub fn nb_trunks(config: &ErlangConfig, intensity: f64, blocking: f64) -> ErlangResult<u32> {
    const OP: &str = "nb_trunks";
    let intensity = ensure_finite(OP, "intensity", intensity)?;
    let blocking = ensure_finite(OP, "blocking", blocking)?;
    if intensity <= 0.0 || blocking <= 0.0 {
        return Err(ErlangError::domain(
            OP,
            "intensity and blocking must be positive",
        ));
    }
    if intensity.ceil() > f64::from(config.max_search) {
        return Err(ErlangError::exhausted(OP, config.search_limit()));
    }
    let start = to_count(OP, intensity.ceil())?;

    let trunks = scan_first(OP, start..=config.max_search, |n| {
        Ok(erlang_b(f64::from(n), intensity)? <= blocking)
    })?;
    debug!(intensity, blocking, trunks, "nb_trunks");
    Ok(trunks)
}

/// Servers needed to bring blocking down to `blocking`, running the Erlang
/// B recurrence incrementally.
///
/// The search also stops once blocking falls to
/// [`ErlangConfig::blocking_floor`], so targets below the floor are
/// answered at the floor.
///
/// # Errors
///
/// Domain error for negative inputs; `SearchExhausted` after
/// [`ErlangConfig::max_search`] steps.
pub fn servers(config: &ErlangConfig, blocking: f64, intensity: f64) -> ErlangResult<u32> {
    const OP: &str = "servers";
    let blocking = ensure_non_negative(OP, "blocking", blocking)?;
    let a = ensure_non_negative(OP, "intensity", intensity)?;

    let mut b = 1.0;
    let mut last = 1.0;
    let mut count: u32 = 0;
    while b > blocking && b > config.blocking_floor {
        if count >= config.max_search {
            return Err(ErlangError::exhausted(OP, config.search_limit()));
        }
        count += 1;
        b = (a * last) / (f64::from(count) + a * last);
        last = b;
    }
    debug!(blocking, intensity = a, servers = count, "servers");
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn cfg() -> ErlangConfig {
        ErlangConfig::default()
    }

    #[test]
    fn test_number_trunks_five_erlangs() {
        assert_eq!(number_trunks(&cfg(), 1.0, 5.0).unwrap(), 14);
        assert_eq!(number_trunks(&cfg(), 10.0, 5.0).unwrap(), 14);
    }

    #[test]
    fn test_number_trunks_is_minimal() {
        let config = cfg();
        let n = number_trunks(&config, 1.0, 5.0).unwrap();
        assert!(erlang_b(f64::from(n), 5.0).unwrap() < config.blocking_floor);
        assert!(erlang_b(f64::from(n - 1), 5.0).unwrap() >= config.blocking_floor);
    }

    #[test]
    fn test_number_trunks_zero_start() {
        assert_eq!(number_trunks(&cfg(), 0.0, 5.0).unwrap(), 0);
    }

    #[test]
    fn test_number_trunks_start_above_answer() {
        // already below the floor at the starting count
        assert_eq!(number_trunks(&cfg(), 30.0, 5.0).unwrap(), 30);
    }

    #[test]
    fn test_number_trunks_rejects_negative() {
        assert!(number_trunks(&cfg(), -1.0, 5.0).unwrap_err().is_domain_error());
        assert!(number_trunks(&cfg(), 1.0, -5.0).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_number_trunks_exhausted() {
        let config = ErlangConfig::builder().max_search(10).build();
        let err = number_trunks(&config, 1.0, 50.0).unwrap_err();
        assert!(err.is_search_exhausted());
    }

    #[test]
    fn test_number_trunks_start_past_cap() {
        let config = ErlangConfig::builder().max_search(10).build();
        let err = number_trunks(&config, 20.0, 5.0).unwrap_err();
        assert!(err.is_search_exhausted());
    }

    #[test]
    fn test_nb_trunks() {
        assert_eq!(nb_trunks(&cfg(), 5.0, 0.01).unwrap(), 11);
        assert_eq!(nb_trunks(&cfg(), 10.0, 0.02).unwrap(), 17);
    }

    #[test]
    fn test_nb_trunks_rejects_non_positive() {
        assert!(nb_trunks(&cfg(), 0.0, 0.01).unwrap_err().is_domain_error());
        assert!(nb_trunks(&cfg(), 5.0, 0.0).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_nb_trunks_huge_load_is_exhausted_not_unbound() {
        let err = nb_trunks(&cfg(), 1e6, 0.01).unwrap_err();
        assert!(err.is_search_exhausted());
    }

    #[test]
    fn test_servers_incremental() {
        assert_eq!(servers(&cfg(), 0.01, 5.0).unwrap(), 11);
        assert_eq!(servers(&cfg(), 0.02, 10.0).unwrap(), 17);
    }

    #[test]
    fn test_servers_floor_caps_tiny_targets() {
        // below the 0.001 floor the floor wins
        assert_eq!(servers(&cfg(), 0.0001, 5.0).unwrap(), 14);
        assert_eq!(
            servers(&cfg(), 0.0001, 5.0).unwrap(),
            number_trunks(&cfg(), 1.0, 5.0).unwrap()
        );
    }

    #[test]
    fn test_servers_agrees_with_nb_trunks() {
        for &(a, target) in &[(2.0, 0.05), (7.5, 0.01), (25.0, 0.02)] {
            assert_eq!(
                servers(&cfg(), target, a).unwrap(),
                nb_trunks(&cfg(), a, target).unwrap(),
                "A = {a}, target = {target}"
            );
        }
    }

    #[test]
    fn test_servers_zero_load() {
        assert_eq!(servers(&cfg(), 0.01, 0.0).unwrap(), 1);
    }

    #[test]
    fn test_servers_rejects_negative() {
        assert!(servers(&cfg(), -0.1, 5.0).unwrap_err().is_domain_error());
    }
}
