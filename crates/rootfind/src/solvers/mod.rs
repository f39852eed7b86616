//! Root-finding algorithms.
//!
//! This module provides numerical solvers for scalar equations `f(x, &args) = 0`:
//!
//! - [`newton`]: Quadratic convergence when the derivative is available
//! - [`secant`]: Derivative-free, superlinear, seeded from one or two points
//! - [`halley`]: Cubic convergence using first and second derivatives
//! - [`bisect`]: Simple and reliable bracketing method
//! - [`ridder`]: Bracketing with exponential midpoint correction
//! - [`brentq`]: Brent's method with inverse quadratic interpolation
//! - [`brenth`]: Brent's method with hyperbolic extrapolation
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fast (quadratic) | May diverge | Derivative |
//! | Halley | Fastest (cubic) | May diverge | Two derivatives |
//! | Secant | Fast (superlinear) | May diverge | Initial guess |
//! | Brent (q/h) | Fast (superlinear) | Guaranteed | Bracket |
//! | Ridder | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//!
//! # Call Shapes
//!
//! Each method exposes three entry points over one iteration routine:
//!
//! - `method(...)` returns the root or raises a [`RootError`]
//! - `method_full(...)` returns a [`FullOutput`] and never raises
//! - `method_observed(...)` is `method_full` with a per-iteration [`Observer`]
//!
//! A zero derivative is not an error: the value-only shape logs a warning and
//! returns the last iterate, the full-output shape sets
//! [`FullOutput::warning`].
//!
//! # Example: Solar Cell Current
//!
//! ```rust
//! use rootfind::solvers::{newton, OpenConfig};
//!
//! // Diode equation: I = IL - I0*(exp((V + I*Rs)/Vt) - 1) - (V + I*Rs)/Rsh
//! struct Cell { il: f64, i0: f64, rs: f64, rsh: f64, vt: f64, v: f64 }
//!
//! let f = |i: f64, c: &Cell| {
//!     let vd = c.v + i * c.rs;
//!     c.il - c.i0 * ((vd / c.vt).exp() - 1.0) - vd / c.rsh - i
//! };
//! let fprime = |i: f64, c: &Cell| {
//!     -c.i0 * c.rs / c.vt * ((c.v + i * c.rs) / c.vt).exp() - c.rs / c.rsh - 1.0
//! };
//!
//! let cell = Cell { il: 6.0, i0: 1e-9, rs: 0.004, rsh: 10.0, vt: 0.27456, v: 5.25 };
//! let current = newton(f, fprime, 7.0, &cell, &OpenConfig::default()).unwrap();
//! assert!(f(current, &cell).abs() < 1e-6);
//! ```

mod bisection;
mod brent;
mod halley;
mod newton;
mod ridder;
mod secant;

pub use bisection::{bisect, bisect_full, bisect_observed};
pub use brent::{brenth, brenth_full, brenth_observed, brentq, brentq_full, brentq_observed};
pub use halley::{halley, halley_full, halley_observed};
pub use newton::{newton, newton_full, newton_observed};
pub use ridder::{ridder, ridder_full, ridder_observed};
pub use secant::{secant, secant_full, secant_observed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::callback::{NoopObserver, Observer};
use crate::error::{RootError, RootResult};
use crate::output::{ErrorCode, FullOutput};

/// Default step tolerance for open methods.
pub const DEFAULT_TOL: f64 = 1.48e-8;

/// Default maximum iterations for open methods.
pub const DEFAULT_OPEN_MAX_ITERATIONS: u32 = 50;

/// Default absolute tolerance for bracketing methods.
pub const DEFAULT_XTOL: f64 = 1e-3;

/// Default relative tolerance for bracketing methods.
pub const DEFAULT_RTOL: f64 = 1e-3;

/// Default maximum iterations for bracketing methods.
pub const DEFAULT_BRACKET_MAX_ITERATIONS: u32 = 100;

/// Smallest relative tolerance accepted by bracketing methods.
pub const MIN_RTOL: f64 = 4.0 * f64::EPSILON;

/// Configuration for open methods (Newton, Secant, Halley).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpenConfig {
    /// Absolute step tolerance: stop when `|x_{n+1} - x_n| < tol`.
    pub tol: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for OpenConfig {
    fn default() -> Self {
        Self {
            tol: DEFAULT_TOL,
            max_iterations: DEFAULT_OPEN_MAX_ITERATIONS,
        }
    }
}

impl OpenConfig {
    /// Creates a new open-method configuration.
    #[must_use]
    pub fn new(tol: f64, max_iterations: u32) -> Self {
        Self {
            tol,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that `tol` is positive and finite and `max_iterations` is non-zero.
    pub fn validate(&self) -> RootResult<()> {
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(RootError::invalid_config(format!(
                "tol must be positive and finite (got {})",
                self.tol
            )));
        }
        if self.max_iterations == 0 {
            return Err(RootError::invalid_config("max_iterations must be positive"));
        }
        Ok(())
    }
}

/// Configuration for bracketing methods (Bisection, Ridder, Brent).
///
/// The convergence test blends both tolerances: a bracket is accepted once
/// its width drops below `xtol + rtol * |x|`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BracketConfig {
    /// Absolute tolerance.
    pub xtol: f64,
    /// Relative tolerance, at least [`MIN_RTOL`].
    pub rtol: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            xtol: DEFAULT_XTOL,
            rtol: DEFAULT_RTOL,
            max_iterations: DEFAULT_BRACKET_MAX_ITERATIONS,
        }
    }
}

impl BracketConfig {
    /// Creates a new bracketing configuration.
    #[must_use]
    pub fn new(xtol: f64, rtol: f64, max_iterations: u32) -> Self {
        Self {
            xtol,
            rtol,
            max_iterations,
        }
    }

    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_xtol(mut self, xtol: f64) -> Self {
        self.xtol = xtol;
        self
    }

    /// Sets the relative tolerance.
    #[must_use]
    pub fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks `xtol > 0`, `rtol >= MIN_RTOL` and `max_iterations > 0`.
    pub fn validate(&self) -> RootResult<()> {
        if !(self.xtol.is_finite() && self.xtol > 0.0) {
            return Err(RootError::invalid_config(format!(
                "xtol must be positive and finite (got {})",
                self.xtol
            )));
        }
        if !(self.rtol.is_finite() && self.rtol >= MIN_RTOL) {
            return Err(RootError::invalid_config(format!(
                "rtol too small ({} < {MIN_RTOL:e})",
                self.rtol
            )));
        }
        if self.max_iterations == 0 {
            return Err(RootError::invalid_config("max_iterations must be positive"));
        }
        Ok(())
    }
}

/// Bracketing methods with a uniform call signature.
///
/// # Example
///
/// ```rust
/// use rootfind::solvers::{BracketConfig, BracketMethod};
///
/// let f = |x: f64, _: &()| x * x - 2.0;
/// let config = BracketConfig::new(1e-12, 1e-12, 100);
///
/// for method in BracketMethod::ALL {
///     let root = method.solve(f, 1.0, 2.0, &(), &config).unwrap();
///     assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10, "{}", method.name());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BracketMethod {
    /// Bisection.
    Bisect,
    /// Ridder's method.
    Ridder,
    /// Brent's method with inverse quadratic interpolation.
    Brentq,
    /// Brent's method with hyperbolic extrapolation.
    Brenth,
}

impl BracketMethod {
    /// Every bracketing method.
    pub const ALL: [Self; 4] = [Self::Bisect, Self::Ridder, Self::Brentq, Self::Brenth];

    /// Returns the name of the method.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bisect => "Bisection",
            Self::Ridder => "Ridder",
            Self::Brentq => "Brent (inverse quadratic)",
            Self::Brenth => "Brent (hyperbolic)",
        }
    }

    /// Finds a root in `[a, b]`, raising on any failure.
    pub fn solve<F, A>(
        self,
        f: F,
        a: f64,
        b: f64,
        args: &A,
        config: &BracketConfig,
    ) -> RootResult<f64>
    where
        F: Fn(f64, &A) -> f64,
        A: ?Sized,
    {
        config.validate()?;
        settle(self.solve_full(f, a, b, args, config), Some((a, b)))
    }

    /// Finds a root in `[a, b]`, returning the full diagnostics record.
    pub fn solve_full<F, A>(
        self,
        f: F,
        a: f64,
        b: f64,
        args: &A,
        config: &BracketConfig,
    ) -> FullOutput
    where
        F: Fn(f64, &A) -> f64,
        A: ?Sized,
    {
        self.solve_observed(f, a, b, args, config, &mut NoopObserver)
    }

    /// Like [`BracketMethod::solve_full`], reporting each iteration to `observer`.
    pub fn solve_observed<F, A, O>(
        self,
        f: F,
        a: f64,
        b: f64,
        args: &A,
        config: &BracketConfig,
        observer: &mut O,
    ) -> FullOutput
    where
        F: Fn(f64, &A) -> f64,
        A: ?Sized,
        O: Observer + ?Sized,
    {
        match self {
            Self::Bisect => bisect_observed(f, a, b, args, config, observer),
            Self::Ridder => ridder_observed(f, a, b, args, config, observer),
            Self::Brentq => brentq_observed(f, a, b, args, config, observer),
            Self::Brenth => brenth_observed(f, a, b, args, config, observer),
        }
    }
}

impl std::fmt::Display for BracketMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unwraps a full-output record for the value-only call shape.
pub(crate) fn settle(output: FullOutput, bracket: Option<(f64, f64)>) -> RootResult<f64> {
    match output.error_code {
        ErrorCode::Converged => {
            if let Some(warning) = output.warning {
                log::warn!(
                    "{warning} after {} iterations; returning last iterate {}",
                    output.iterations,
                    output.root
                );
            }
            Ok(output.root)
        }
        ErrorCode::ConvergenceError => Err(RootError::convergence_failed(
            output.iterations,
            output.root,
        )),
        ErrorCode::SignError => {
            let (a, b) = bracket.unwrap_or((output.root, output.root));
            Err(RootError::sign_error(a, b))
        }
        ErrorCode::InvalidConfig => Err(RootError::invalid_config(output.flag())),
    }
}

/// `true` when `fa` and `fb` are non-zero with strictly opposite signs.
///
/// NaN on either side never brackets.
#[inline]
pub(crate) fn opposite_signs(fa: f64, fb: f64) -> bool {
    (fa < 0.0 && fb > 0.0) || (fa > 0.0 && fb < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_open_config() {
        let config = OpenConfig::default()
            .with_tol(1e-10)
            .with_max_iterations(20);

        assert!((config.tol - 1e-10).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_open_config_defaults() {
        let config = OpenConfig::default();

        assert_eq!(config.tol, 1.48e-8);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_open_config_rejects_bad_values() {
        assert!(OpenConfig::new(0.0, 10).validate().is_err());
        assert!(OpenConfig::new(-1e-8, 10).validate().is_err());
        assert!(OpenConfig::new(f64::NAN, 10).validate().is_err());
        assert!(OpenConfig::new(1e-8, 0).validate().is_err());
    }

    #[test]
    fn test_bracket_config_rejects_bad_values() {
        assert!(BracketConfig::default().validate().is_ok());
        assert!(BracketConfig::new(0.0, 1e-3, 10).validate().is_err());
        assert!(BracketConfig::new(1e-3, f64::EPSILON, 10).validate().is_err());
        assert!(BracketConfig::new(1e-3, MIN_RTOL, 10).validate().is_ok());
        assert!(BracketConfig::new(1e-3, 1e-3, 0).validate().is_err());
        assert!(BracketConfig::new(f64::INFINITY, 1e-3, 10).validate().is_err());
    }

    #[test]
    fn test_opposite_signs() {
        assert!(opposite_signs(-1.0, 2.0));
        assert!(opposite_signs(3.0, -1e-300));
        assert!(!opposite_signs(1.0, 2.0));
        assert!(!opposite_signs(0.0, 2.0));
        assert!(!opposite_signs(f64::NAN, 1.0));
        // product would underflow to zero
        assert!(opposite_signs(1e-200, -1e-200));
    }

    #[test]
    fn test_bracket_method_names() {
        assert_eq!(BracketMethod::Bisect.name(), "Bisection");
        assert_eq!(BracketMethod::Brenth.to_string(), "Brent (hyperbolic)");
        assert_eq!(BracketMethod::ALL.len(), 4);
    }

    #[test]
    fn test_bracket_method_dispatch() {
        let f = |x: f64, _: &()| x * x * x - x - 2.0;
        let config = BracketConfig::new(1e-12, MIN_RTOL, 100);

        for method in BracketMethod::ALL {
            let out = method.solve_full(f, 1.0, 2.0, &(), &config);
            assert!(out.converged(), "{method} did not converge");
            assert_relative_eq!(out.root, 1.521_379_706_804_568, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_value_shape_rejects_config_before_evaluating() {
        let calls = std::cell::Cell::new(0);
        let f = |x: f64, _: &()| {
            calls.set(calls.get() + 1);
            x
        };
        let config = BracketConfig::new(1e-3, 1e-3, 0);

        for method in BracketMethod::ALL {
            let err = method.solve(f, -1.0, 1.0, &(), &config).unwrap_err();
            assert!(matches!(err, RootError::InvalidConfig { .. }));
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_settle_maps_each_code() {
        let mut out = FullOutput::start(1.0);
        assert_eq!(settle(out, None), Ok(1.0));

        out.error_code = ErrorCode::ConvergenceError;
        out.iterations = 7;
        assert_eq!(
            settle(out, None),
            Err(RootError::convergence_failed(7, 1.0))
        );

        out.error_code = ErrorCode::SignError;
        assert_eq!(
            settle(out, Some((-2.0, 2.0))),
            Err(RootError::sign_error(-2.0, 2.0))
        );
    }
}
