//! Error types for erlang-planner.
//!
//! Every typed operation returns `Result<T, ErlangError>` instead of
//! panicking. The legacy fail-soft behaviour (collapse to `0`) lives in
//! [`crate::calculator::ErlangCalculator`], not here.

use thiserror::Error;

/// Result type alias for erlang-planner operations.
pub type ErlangResult<T> = Result<T, ErlangError>;

/// Unified error type for all erlang-planner operations.
///
/// The arithmetic family (`Domain`, `NonFiniteValue`) is what the legacy
/// calculators swallowed and turned into `0`. `SearchExhausted` is kept
/// separate so that "no solution within the scan range" is not confused
/// with a genuine zero answer.
#[derive(Debug, Error)]
pub enum ErlangError {
    // ===== Arithmetic / domain errors =====
    /// Input outside the domain of the formula (division by zero,
    /// negative counts, unstable queue, ...).
    #[error("{operation}: domain error: {reason}")]
    Domain {
        /// Operation that rejected its input.
        operation: &'static str,
        /// What was wrong with the input.
        reason: String,
    },

    /// A NaN or infinity reached an evaluator.
    #[error("non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location of the non-finite value (e.g. `"erlang_b.intensity"`).
        location: String,
    },

    // ===== Search errors =====
    /// An iterative search hit its cap without meeting the target.
    #[error("{operation}: no solution within {limit} iterations")]
    SearchExhausted {
        /// Solver that gave up.
        operation: &'static str,
        /// Iteration cap that was reached.
        limit: u64,
    },

    // ===== Configuration errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErlangError {
    /// Create a domain error for `operation`.
    #[must_use]
    pub fn domain(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Domain {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a non-finite value error.
    #[must_use]
    pub fn non_finite(location: impl Into<String>) -> Self {
        Self::NonFiniteValue {
            location: location.into(),
        }
    }

    /// Create a search-exhausted error.
    #[must_use]
    pub const fn exhausted(operation: &'static str, limit: u64) -> Self {
        Self::SearchExhausted { operation, limit }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is an arithmetic/domain error (the class the legacy
    /// API collapsed to `0`).
    #[must_use]
    pub const fn is_domain_error(&self) -> bool {
        matches!(self, Self::Domain { .. } | Self::NonFiniteValue { .. })
    }

    /// Check if this error reports an exhausted search.
    #[must_use]
    pub const fn is_search_exhausted(&self) -> bool {
        matches!(self, Self::SearchExhausted { .. })
    }
}
