//! Forward evaluators: Erlang B, extended Erlang B, Engset B, Erlang C.
//!
//! # Governing Equations
//!
//! ```text
//! Erlang B (loss system), iterated from B(0) = 1:
//!
//!   B(k) = A·B(k-1) / (k + A·B(k-1))        k = 1..N
//!
//! Erlang C (delay system), from B = B(N):
//!
//!   C = B / (ρ·B + (1 - ρ))                  ρ = A / N
//! ```
//!
//! All evaluators are O(N) and return a probability already clamped to
//! `[0, 1]`. A zero server count or zero traffic yields `0`, not the
//! textbook `B(0, A) = 1`; the inverse solvers depend on that boundary.

use crate::engine::clamp::clamp;
use crate::engine::guard::{checked_div, ensure_finite, ensure_non_negative};
use crate::error::{ErlangError, ErlangResult};

/// Largest server count an evaluator will iterate over.
const MAX_SERVERS: f64 = u32::MAX as f64;

/// Validate a server count and return the number of recursion steps
/// (its integer part).
fn server_steps(operation: &'static str, servers: f64) -> ErlangResult<u32> {
    let servers = ensure_non_negative(operation, "servers", servers)?;
    if servers > MAX_SERVERS {
        return Err(ErlangError::domain(
            operation,
            format!("server count {servers} is too large"),
        ));
    }
    Ok(servers.trunc() as u32)
}

/// Probability that all `servers` are busy under pure-loss traffic
/// `intensity` (Erlangs).
///
/// Fractional server counts are truncated for the recursion.
///
/// # Errors
///
/// Returns a domain error for negative inputs, a non-finite error for
/// NaN or infinite ones.
pub fn erlang_b(servers: f64, intensity: f64) -> ErlangResult<f64> {
    const OP: &str = "erlang_b";
    ensure_finite(OP, "servers", servers)?;
    ensure_finite(OP, "intensity", intensity)?;
    if servers == 0.0 || intensity == 0.0 {
        return Ok(0.0);
    }
    let steps = server_steps(OP, servers)?;
    let a = ensure_non_negative(OP, "intensity", intensity)?;

    let mut last = 1.0;
    let mut b = 0.0;
    for k in 1..=steps {
        b = (a * last) / (f64::from(k) + a * last);
        last = b;
    }
    Ok(clamp(b))
}

/// Erlang B where a fraction `retry` of blocked callers immediately try
/// again.
///
/// At each step the offered load is inflated by `1 / (1 - B·retry)`
/// before B is recomputed. `retry` is clamped to `[0, 1]`; `retry = 0`
/// reduces to [`erlang_b`].
///
/// # Errors
///
/// As [`erlang_b`], plus a domain error if every caller retries into a
/// fully blocked group.
pub fn erlang_b_ext(servers: f64, intensity: f64, retry: f64) -> ErlangResult<f64> {
    const OP: &str = "erlang_b_ext";
    ensure_finite(OP, "servers", servers)?;
    ensure_finite(OP, "intensity", intensity)?;
    let retries = clamp(ensure_finite(OP, "retry", retry)?);
    if servers == 0.0 || intensity == 0.0 {
        return Ok(0.0);
    }
    let steps = server_steps(OP, servers)?;
    let a = ensure_non_negative(OP, "intensity", intensity)?;

    let mut last = 1.0;
    let mut b = 0.0;
    for k in 1..=steps {
        let k = f64::from(k);
        b = (a * last) / (k + a * last);
        let attempts = checked_div(OP, 1.0, 1.0 - b * retries)?;
        let offered = a * last * attempts;
        b = offered / (k + offered);
        last = b;
    }
    Ok(clamp(b))
}

/// Finite-source (Engset) blocking probability for `sources` traffic
/// generators offering `intensity` each.
///
/// The recursion runs on the reciprocal of the blocking probability:
///
/// ```text
/// b(k) = b(k-1) · k / ((S - k)·A) + 1,   B = 1 / b(N)
/// ```
///
/// # Errors
///
/// Returns a domain error unless `sources` exceeds the server count.
pub fn engset_b(servers: f64, sources: f64, intensity: f64) -> ErlangResult<f64> {
    const OP: &str = "engset_b";
    ensure_finite(OP, "servers", servers)?;
    ensure_finite(OP, "sources", sources)?;
    ensure_finite(OP, "intensity", intensity)?;
    if servers == 0.0 || intensity == 0.0 {
        return Ok(0.0);
    }
    let steps = server_steps(OP, servers)?;
    let a = ensure_non_negative(OP, "intensity", intensity)?;
    if sources <= f64::from(steps) {
        return Err(ErlangError::domain(
            OP,
            format!("sources ({sources}) must exceed servers ({steps})"),
        ));
    }

    let mut last = 1.0;
    let mut b = 0.0;
    for k in 1..=steps {
        let k = f64::from(k);
        b = last * checked_div(OP, k, (sources - k) * a)? + 1.0;
        last = b;
    }
    if b == 0.0 {
        return Ok(0.0);
    }
    Ok(clamp(checked_div(OP, 1.0, b)?))
}

/// Probability that an arriving call has to queue (Erlang C).
///
/// Derived from [`erlang_b`]; for overloaded groups (`intensity >=
/// servers`) the raw value leaves `[0, 1]` and is clamped.
///
/// # Errors
///
/// Returns a domain error for negative inputs or zero servers.
pub fn erlang_c(servers: f64, intensity: f64) -> ErlangResult<f64> {
    const OP: &str = "erlang_c";
    let servers = ensure_non_negative(OP, "servers", servers)?;
    let intensity = ensure_non_negative(OP, "intensity", intensity)?;
    let b = erlang_b(servers, intensity)?;
    let rho = checked_div(OP, intensity, servers)?;
    let c = checked_div(OP, b, rho * b + (1.0 - rho))?;
    Ok(clamp(c))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_erlang_b_table_value() {
        let b = erlang_b(10.0, 5.0).unwrap();
        assert!((b - 0.018_384_570_336_648_14).abs() < TOL, "B(10,5) = {b}");
    }

    #[test]
    fn test_erlang_b_small_groups() {
        assert!((erlang_b(1.0, 1.0).unwrap() - 0.5).abs() < TOL);
        assert!((erlang_b(2.0, 1.0).unwrap() - 0.2).abs() < TOL);
    }

    #[test]
    fn test_erlang_b_zero_edges() {
        assert!(erlang_b(0.0, 5.0).unwrap().abs() < f64::EPSILON);
        assert!(erlang_b(10.0, 0.0).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn test_erlang_b_fraction_below_one_server() {
        // no recursion step is taken
        assert!(erlang_b(0.5, 5.0).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn test_erlang_b_fractional_servers_truncate() {
        let whole = erlang_b(10.0, 5.0).unwrap();
        let frac = erlang_b(10.9, 5.0).unwrap();
        assert!((whole - frac).abs() < f64::EPSILON);
    }

    #[test]
    fn test_erlang_b_rejects_negative() {
        assert!(erlang_b(-1.0, 5.0).unwrap_err().is_domain_error());
        assert!(erlang_b(5.0, -1.0).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_erlang_b_rejects_nan() {
        let err = erlang_b(f64::NAN, 5.0).unwrap_err();
        assert!(matches!(err, ErlangError::NonFiniteValue { .. }));
    }

    #[test]
    fn test_erlang_b_ext_reduces_to_erlang_b() {
        let plain = erlang_b(10.0, 5.0).unwrap();
        let ext = erlang_b_ext(10.0, 5.0, 0.0).unwrap();
        assert!((plain - ext).abs() < TOL);
    }

    #[test]
    fn test_erlang_b_ext_retries_raise_blocking() {
        let half = erlang_b_ext(10.0, 5.0, 0.5).unwrap();
        let all = erlang_b_ext(10.0, 5.0, 1.0).unwrap();
        assert!((half - 0.026_743_977_540_662_18).abs() < TOL, "got {half}");
        assert!((all - 0.043_697_175_840_646_83).abs() < TOL, "got {all}");
    }

    #[test]
    fn test_erlang_b_ext_clamps_retry() {
        let over = erlang_b_ext(10.0, 5.0, 3.0).unwrap();
        let one = erlang_b_ext(10.0, 5.0, 1.0).unwrap();
        assert!((over - one).abs() < f64::EPSILON);
    }

    #[test]
    fn test_engset_b_values() {
        let b = engset_b(10.0, 20.0, 0.3).unwrap();
        assert!((b - 0.003_735_508_005_966_582_5).abs() < TOL, "got {b}");
        let b = engset_b(5.0, 10.0, 0.5).unwrap();
        assert!((b - 0.106_960_950_764_006_8).abs() < TOL, "got {b}");
        let b = engset_b(2.0, 3.0, 1.0).unwrap();
        assert!((b - 0.25).abs() < TOL, "got {b}");
    }

    #[test]
    fn test_engset_b_requires_more_sources_than_servers() {
        assert!(engset_b(10.0, 10.0, 0.5).unwrap_err().is_domain_error());
        assert!(engset_b(10.0, 4.0, 0.5).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_engset_b_zero_edges() {
        assert!(engset_b(0.0, 3.0, 1.0).unwrap().abs() < f64::EPSILON);
        assert!(engset_b(2.0, 3.0, 0.0).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn test_erlang_c_table_value() {
        let c = erlang_c(10.0, 5.0).unwrap();
        assert!((c - 0.036_105_359_158_320_2).abs() < TOL, "C(10,5) = {c}");
    }

    #[test]
    fn test_erlang_c_degenerate_inputs() {
        assert!(erlang_c(-1.0, 5.0).unwrap_err().is_domain_error());
        assert!(erlang_c(5.0, -1.0).unwrap_err().is_domain_error());
        assert!(erlang_c(0.0, 5.0).unwrap_err().is_domain_error());
        assert!(erlang_c(5.0, 0.0).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn test_erlang_c_overloaded_is_clamped() {
        let c = erlang_c(2.0, 5.0).unwrap();
        assert!((c - 1.0).abs() < f64::EPSILON);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_erlang_b_is_probability(n in 1u32..200, a in 0.0f64..300.0) {
            let b = erlang_b(f64::from(n), a).unwrap();
            prop_assert!((0.0..=1.0).contains(&b));
        }

        #[test]
        fn prop_erlang_b_non_increasing_in_servers(n in 1u32..150, a in 0.01f64..100.0) {
            let fewer = erlang_b(f64::from(n), a).unwrap();
            let more = erlang_b(f64::from(n + 1), a).unwrap();
            prop_assert!(more <= fewer + 1e-12, "B({},{a}) = {fewer} < B({},{a}) = {more}", n, n + 1);
        }

        #[test]
        fn prop_erlang_b_non_decreasing_in_load(n in 1u32..100, a in 0.01f64..100.0, da in 0.0f64..10.0) {
            let low = erlang_b(f64::from(n), a).unwrap();
            let high = erlang_b(f64::from(n), a + da).unwrap();
            prop_assert!(high + 1e-12 >= low);
        }

        #[test]
        fn prop_erlang_c_dominates_erlang_b(n in 1u32..150, frac in 0.01f64..0.99) {
            let servers = f64::from(n);
            let a = servers * frac;
            let b = erlang_b(servers, a).unwrap();
            let c = erlang_c(servers, a).unwrap();
            prop_assert!(c + 1e-12 >= b, "C = {c} < B = {b}");
        }

        #[test]
        fn prop_engset_is_probability(n in 1u32..50, extra in 1u32..100, a in 0.01f64..5.0) {
            let sources = f64::from(n + extra);
            let b = engset_b(f64::from(n), sources, a).unwrap();
            prop_assert!((0.0..=1.0).contains(&b));
        }

        #[test]
        fn prop_retry_never_lowers_blocking(n in 1u32..60, a in 0.1f64..60.0, r in 0.0f64..1.0) {
            let plain = erlang_b(f64::from(n), a).unwrap();
            let ext = erlang_b_ext(f64::from(n), a, r).unwrap();
            prop_assert!(ext + 1e-12 >= plain);
        }
    }
}
