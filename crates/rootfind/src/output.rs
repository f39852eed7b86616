//! Full-output diagnostics record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Terminal status of a solve.
///
/// The numeric codes match the C interface: `0` for success and negative
/// values for failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorCode {
    /// The tolerance test was met (possibly with a [`SolverWarning`]).
    Converged,
    /// The bracket endpoints do not have opposite signs.
    SignError,
    /// The iteration cap was reached without meeting the tolerance test.
    ConvergenceError,
    /// Tolerances or iteration cap were out of range; nothing was evaluated.
    InvalidConfig,
}

impl ErrorCode {
    /// Numeric code used by the C interface.
    pub const fn code(self) -> i32 {
        match self {
            Self::Converged => 0,
            Self::SignError => -1,
            Self::ConvergenceError => -2,
            Self::InvalidConfig => -3,
        }
    }

    /// Maps a numeric code back to a status. Unknown codes map to `None`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Converged),
            -1 => Some(Self::SignError),
            -2 => Some(Self::ConvergenceError),
            -3 => Some(Self::InvalidConfig),
            _ => None,
        }
    }

    /// Human-readable flag for this status.
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Converged => "Converged successfully",
            Self::SignError => "f(a) and f(b) must have opposite signs",
            Self::ConvergenceError => "Failed to converge",
            Self::InvalidConfig => "TOL and MAXITER must be positive",
        }
    }

    /// Returns `true` for [`ErrorCode::Converged`].
    pub const fn is_converged(self) -> bool {
        matches!(self, Self::Converged)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.flag())
    }
}

/// Recoverable conditions that stop an open method early.
///
/// The last valid iterate is returned as the root; callers decide whether it
/// is good enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverWarning {
    /// The derivative (or secant slope) vanished.
    ZeroDerivative,
    /// The Halley correction denominator vanished.
    ZeroDenominator,
}

impl SolverWarning {
    /// Human-readable description.
    pub const fn message(self) -> &'static str {
        match self {
            Self::ZeroDerivative => "Derivative was zero",
            Self::ZeroDenominator => "Halley denominator was zero",
        }
    }
}

impl std::fmt::Display for SolverWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Diagnostics record filled in by every solver.
///
/// Created with zero counters and the initial guess as `root`, updated once
/// per iteration, and finalised exactly once when the solver returns.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FullOutput {
    /// Best estimate of the root.
    pub root: f64,
    /// Number of iterations performed.
    pub iterations: u32,
    /// Number of primary function evaluations.
    pub function_calls: u32,
    /// Terminal status.
    pub error_code: ErrorCode,
    /// Recoverable condition that ended the solve, if any.
    pub warning: Option<SolverWarning>,
}

impl FullOutput {
    pub(crate) fn start(root: f64) -> Self {
        Self {
            root,
            iterations: 0,
            function_calls: 0,
            error_code: ErrorCode::Converged,
            warning: None,
        }
    }

    pub(crate) fn invalid_config(root: f64) -> Self {
        Self {
            error_code: ErrorCode::InvalidConfig,
            ..Self::start(root)
        }
    }

    /// Human-readable flag derived from [`FullOutput::error_code`].
    pub fn flag(&self) -> &'static str {
        self.error_code.flag()
    }

    /// Returns `true` if the solver met its tolerance test.
    pub fn converged(&self) -> bool {
        self.error_code.is_converged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert_eq!(ErrorCode::Converged.flag(), "Converged successfully");
        assert_eq!(ErrorCode::ConvergenceError.flag(), "Failed to converge");
        assert!(ErrorCode::SignError.flag().contains("opposite signs"));
        assert!(ErrorCode::InvalidConfig.flag().contains("must be positive"));
    }

    #[test]
    fn test_code_round_trip() {
        for code in [
            ErrorCode::Converged,
            ErrorCode::SignError,
            ErrorCode::ConvergenceError,
            ErrorCode::InvalidConfig,
        ] {
            assert_eq!(ErrorCode::from_code(code.code()), Some(code));
        }
        assert_eq!(ErrorCode::from_code(7), None);
    }

    #[test]
    fn test_fresh_record() {
        let out = FullOutput::start(1.5);

        assert_eq!(out.root, 1.5);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.function_calls, 0);
        assert!(out.converged());
        assert!(out.warning.is_none());

        let bad = FullOutput::invalid_config(1.5);
        assert!(!bad.converged());
        assert_eq!(bad.flag(), "TOL and MAXITER must be positive");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_record() {
        let out = FullOutput {
            root: 2.0,
            iterations: 3,
            function_calls: 5,
            error_code: ErrorCode::Converged,
            warning: Some(SolverWarning::ZeroDerivative),
        };

        let json = serde_json::to_string(&out).unwrap();
        let back: FullOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);
    }
}
