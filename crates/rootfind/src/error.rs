//! Error types for root-finding.

use thiserror::Error;

/// A specialized Result type for root-finding operations.
pub type RootResult<T> = Result<T, RootError>;

/// Errors raised by the value-only solver entry points.
///
/// The full-output entry points never raise; they encode the same conditions
/// in [`crate::ErrorCode`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootError {
    /// Tolerance or iteration settings are out of range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending setting.
        reason: String,
    },

    /// The endpoints of a bracketing method do not enclose a sign change.
    #[error("f(a) and f(b) must have opposite signs (a = {a}, b = {b})")]
    SignError {
        /// Lower bound of the bracket.
        a: f64,
        /// Upper bound of the bracket.
        b: f64,
    },

    /// The iteration cap was reached without meeting the tolerance test.
    #[error("Failed to converge after {iterations} iterations, value is {root}")]
    ConvergenceFailed {
        /// Number of iterations performed.
        iterations: u32,
        /// Last computed estimate.
        root: f64,
    },
}

impl RootError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, root: f64) -> Self {
        Self::ConvergenceFailed { iterations, root }
    }

    /// Creates a sign error for the bracket `[a, b]`.
    #[must_use]
    pub fn sign_error(a: f64, b: f64) -> Self {
        Self::SignError { a, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RootError::convergence_failed(50, 1.25);
        assert!(err.to_string().contains("50 iterations"));
        assert!(err.to_string().contains("1.25"));

        let err = RootError::sign_error(-1.0, 1.0);
        assert!(err.to_string().contains("opposite signs"));

        let err = RootError::invalid_config("xtol must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: xtol must be positive"
        );
    }
}
