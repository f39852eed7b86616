//! Newton-Raphson root-finding algorithm.

use crate::callback::{Evaluator, NoopObserver, Observer};
use crate::error::RootResult;
use crate::output::{FullOutput, SolverWarning};
use crate::solvers::{settle, OpenConfig};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near the root but requires
/// the derivative of the function. Only evaluations of `f` are counted
/// as function calls.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `fprime` - The derivative of the function
/// * `x0` - Starting point for the iteration
/// * `args` - Extra parameters passed to `f` and `fprime`
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root, or an error if the configuration is invalid or the iteration
/// cap is reached. A zero derivative is logged and the last iterate returned.
///
/// # Example
///
/// ```rust
/// use rootfind::solvers::{newton, OpenConfig};
///
/// // Find root of x^2 - c (i.e., sqrt(c))
/// let f = |x: f64, c: &f64| x * x - c;
/// let fprime = |x: f64, _: &f64| 2.0 * x;
///
/// let root = newton(f, fprime, 1.5, &2.0, &OpenConfig::default()).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton<F, DF, A>(
    f: F,
    fprime: DF,
    x0: f64,
    args: &A,
    config: &OpenConfig,
) -> RootResult<f64>
where
    F: Fn(f64, &A) -> f64,
    DF: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    config.validate()?;
    settle(newton_full(f, fprime, x0, args, config), None)
}

/// Newton-Raphson returning the full diagnostics record.
pub fn newton_full<F, DF, A>(
    f: F,
    fprime: DF,
    x0: f64,
    args: &A,
    config: &OpenConfig,
) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    DF: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    newton_observed(f, fprime, x0, args, config, &mut NoopObserver)
}

/// Newton-Raphson reporting every iterate to `observer`.
pub fn newton_observed<F, DF, A, O>(
    f: F,
    fprime: DF,
    x0: f64,
    args: &A,
    config: &OpenConfig,
    observer: &mut O,
) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    DF: Fn(f64, &A) -> f64,
    A: ?Sized,
    O: Observer + ?Sized,
{
    if let Err(e) = config.validate() {
        log::debug!("newton: {e}");
        return FullOutput::invalid_config(x0);
    }

    let mut eval = Evaluator::new(&f, args, observer, x0);
    let mut p0 = x0;

    for _ in 0..config.max_iterations {
        eval.next_iteration();

        let fval = eval.evaluate(p0);
        if fval == 0.0 {
            return eval.converged(p0);
        }

        let fder = fprime(p0, eval.args());
        if fder == 0.0 {
            return eval.warned(p0, SolverWarning::ZeroDerivative);
        }

        let p = p0 - fval / fder;
        if !p.is_finite() {
            return eval.exhausted(p0);
        }
        eval.observe(p, None);

        if (p - p0).abs() < config.tol {
            return eval.converged(p);
        }
        p0 = p;
    }

    eval.exhausted(p0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RootError;
    use crate::output::ErrorCode;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64, _: &()| x * x - 2.0;
        let df = |x: f64, _: &()| 2.0 * x;

        let out = newton_full(f, df, 1.5, &(), &OpenConfig::default());

        assert_eq!(out.error_code, ErrorCode::Converged);
        assert_relative_eq!(out.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(out.iterations < 10); // Should converge quickly
        assert_eq!(out.function_calls, out.iterations);
    }

    #[test]
    fn test_cube_root_with_args() {
        // Find cube root of 27 (should be 3)
        let f = |x: f64, c: &f64| x * x * x - c;
        let df = |x: f64, _: &f64| 3.0 * x * x;

        let root = newton(f, df, 2.0, &27.0, &OpenConfig::default()).unwrap();

        assert_relative_eq!(root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cubic_exhausts_iterations() {
        // x^3 from 1e-4 shrinks by 2/3 per step: far from the step tolerance
        let f = |x: f64, _: &()| x * x * x;
        let df = |x: f64, _: &()| 3.0 * x * x;
        let config = OpenConfig::default().with_max_iterations(3);

        let out = newton_full(f, df, 0.0001, &(), &config);

        assert_eq!(out.error_code, ErrorCode::ConvergenceError);
        assert_eq!(out.iterations, 3);
        assert_eq!(out.function_calls, 3);
        assert_relative_eq!(out.root, 0.0001 * (2.0f64 / 3.0).powi(3), epsilon = 1e-15);
        assert_eq!(out.flag(), "Failed to converge");

        let err = newton(f, df, 0.0001, &(), &config).unwrap_err();
        assert!(matches!(err, RootError::ConvergenceFailed { iterations: 3, .. }));
    }

    #[test]
    fn test_zero_derivative_returns_last_iterate() {
        // f'(0) = 0 on the first pass
        let f = |x: f64, _: &()| x * x * x - 1.0;
        let df = |x: f64, _: &()| 3.0 * x * x;

        let out = newton_full(f, df, 0.0, &(), &OpenConfig::default());

        assert_eq!(out.error_code, ErrorCode::Converged);
        assert_eq!(out.warning, Some(SolverWarning::ZeroDerivative));
        assert_eq!(out.root, 0.0);
        assert_eq!(out.iterations, 1);

        // Value-only shape returns rather than raises
        assert_eq!(newton(f, df, 0.0, &(), &OpenConfig::default()), Ok(0.0));
    }

    #[test]
    fn test_exact_root_stops_immediately() {
        let f = |x: f64, _: &()| x - 4.0;
        let df = |_: f64, _: &()| 1.0;

        let out = newton_full(f, df, 4.0, &(), &OpenConfig::default());

        assert_eq!(out.root, 4.0);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.function_calls, 1);
    }

    #[test]
    fn test_invalid_config_evaluates_nothing() {
        let f = |_: f64, _: &()| -> f64 { panic!("must not be called") };
        let df = |_: f64, _: &()| -> f64 { panic!("must not be called") };

        let out = newton_full(f, df, 1.0, &(), &OpenConfig::new(0.0, 10));
        assert_eq!(out.error_code, ErrorCode::InvalidConfig);
        assert_eq!(out.function_calls, 0);
        assert_eq!(out.root, 1.0);

        let err = newton(f, df, 1.0, &(), &OpenConfig::new(1e-8, 0)).unwrap_err();
        assert!(matches!(err, RootError::InvalidConfig { .. }));
    }

    #[test]
    fn test_observer_sees_each_iterate() {
        let f = |x: f64, _: &()| x * x - 2.0;
        let df = |x: f64, _: &()| 2.0 * x;
        let mut estimates = Vec::new();

        let out = newton_observed(
            f,
            df,
            1.0,
            &(),
            &OpenConfig::default(),
            &mut |s: &crate::callback::Step| estimates.push(s.estimate),
        );

        assert_eq!(estimates.len() as u32, out.iterations);
        assert_eq!(*estimates.last().unwrap(), out.root);
    }

    #[test]
    fn test_resolve_from_root_is_cheap() {
        let f = |x: f64, _: &()| x.exp() - 3.0;
        let df = |x: f64, _: &()| x.exp();
        let config = OpenConfig::default();

        let first = newton_full(f, df, 0.0, &(), &config);
        let again = newton_full(f, df, first.root, &(), &config);

        assert!(again.converged());
        assert!(again.iterations <= 1);
    }
}
