//! Input guards.
//!
//! Every evaluator checks its inputs before the first arithmetic step and
//! every division goes through [`checked_div`], so a bad value surfaces as
//! a typed [`ErlangError`] at the point it appears instead of leaking a
//! NaN into the next formula.

use crate::error::{ErlangError, ErlangResult};

/// Reject NaN and infinities.
///
/// # Errors
///
/// Returns [`ErlangError::NonFiniteValue`] naming `operation.name`.
pub fn ensure_finite(operation: &'static str, name: &str, value: f64) -> ErlangResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ErlangError::non_finite(format!("{operation}.{name}")))
    }
}

/// Reject non-finite and negative values.
///
/// # Errors
///
/// Returns a non-finite or domain error.
pub fn ensure_non_negative(operation: &'static str, name: &str, value: f64) -> ErlangResult<f64> {
    let value = ensure_finite(operation, name, value)?;
    if value < 0.0 {
        return Err(ErlangError::domain(
            operation,
            format!("{name} must be non-negative, got {value}"),
        ));
    }
    Ok(value)
}

/// Reject non-finite, zero and negative values.
///
/// # Errors
///
/// Returns a non-finite or domain error.
pub fn ensure_positive(operation: &'static str, name: &str, value: f64) -> ErlangResult<f64> {
    let value = ensure_finite(operation, name, value)?;
    if value <= 0.0 {
        return Err(ErlangError::domain(
            operation,
            format!("{name} must be positive, got {value}"),
        ));
    }
    Ok(value)
}

/// Divide, failing on a zero denominator or a non-finite quotient.
///
/// # Errors
///
/// Returns a domain error for division by zero, a non-finite error
/// for overflow.
pub fn checked_div(operation: &'static str, numerator: f64, denominator: f64) -> ErlangResult<f64> {
    if denominator == 0.0 {
        return Err(ErlangError::domain(operation, "division by zero"));
    }
    ensure_finite(operation, "quotient", numerator / denominator)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("op", "x", 1.0).is_ok());
        let err = ensure_finite("op", "x", f64::NAN).unwrap_err();
        assert!(err.to_string().contains("op.x"));
        assert!(ensure_finite("op", "x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("op", "x", 0.0).is_ok());
        let err = ensure_non_negative("op", "x", -1.0).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("op", "x", 0.5).is_ok());
        assert!(ensure_positive("op", "x", 0.0).is_err());
    }

    #[test]
    fn test_checked_div() {
        assert!((checked_div("op", 1.0, 4.0).unwrap() - 0.25).abs() < f64::EPSILON);
        let err = checked_div("op", 1.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("division by zero"));
        assert!(checked_div("op", f64::MAX, f64::MIN_POSITIVE).is_err());
    }
}
