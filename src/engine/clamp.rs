//! Bounding of probability-typed values.

/// Bound `x` into the closed interval `[low, high]`.
///
/// Total and branch-only: unlike [`f64::clamp`] it never panics when the
/// bounds are inverted, and a NaN input is returned unchanged so that the
/// finite-value guard upstream can report it.
#[must_use]
pub fn clamp_to(x: f64, low: f64, high: f64) -> f64 {
    if x > high {
        high
    } else if x < low {
        low
    } else {
        x
    }
}

/// Bound `x` into `[0, 1]`.
#[must_use]
pub fn clamp(x: f64) -> f64 {
    clamp_to(x, 0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside() {
        assert!((clamp(0.25) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_bounds() {
        assert!((clamp(1.5) - 1.0).abs() < f64::EPSILON);
        assert!(clamp(-0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_to_custom_interval() {
        assert!((clamp_to(12.0, 2.0, 10.0) - 10.0).abs() < f64::EPSILON);
        assert!((clamp_to(1.0, 2.0, 10.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_inverted_bounds_does_not_panic() {
        // x > high wins first
        assert!((clamp_to(5.0, 10.0, 2.0) - 2.0).abs() < f64::EPSILON);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_clamp_in_unit_interval(x in -1e6f64..1e6) {
            let y = clamp(x);
            prop_assert!((0.0..=1.0).contains(&y));
        }

        #[test]
        fn prop_clamp_idempotent(x in -10.0f64..10.0) {
            prop_assert_eq!(clamp(clamp(x)), clamp(x));
        }
    }
}
