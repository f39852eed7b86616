//! Halley's root-finding algorithm.

use crate::callback::{Evaluator, NoopObserver, Observer};
use crate::error::RootResult;
use crate::output::{FullOutput, SolverWarning};
use crate::solvers::{settle, OpenConfig};

/// Halley's root-finding algorithm.
///
/// Adds a second-derivative correction to the Newton step:
/// `x_{n+1} = x_n - 2 f f' / (2 f'^2 - f f'')`
///
/// Converges cubically near a simple root. A vanishing `f'` or a vanishing
/// correction denominator stops the iteration with a warning and the last
/// iterate.
///
/// # Example
///
/// ```rust
/// use rootfind::solvers::{halley, OpenConfig};
///
/// let f = |x: f64, _: &()| x * x * x - 27.0;
/// let fprime = |x: f64, _: &()| 3.0 * x * x;
/// let fprime2 = |x: f64, _: &()| 6.0 * x;
///
/// let root = halley(f, fprime, fprime2, 2.0, &(), &OpenConfig::default()).unwrap();
/// assert!((root - 3.0).abs() < 1e-10);
/// ```
pub fn halley<F, DF, DF2, A>(
    f: F,
    fprime: DF,
    fprime2: DF2,
    x0: f64,
    args: &A,
    config: &OpenConfig,
) -> RootResult<f64>
where
    F: Fn(f64, &A) -> f64,
    DF: Fn(f64, &A) -> f64,
    DF2: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    config.validate()?;
    settle(halley_full(f, fprime, fprime2, x0, args, config), None)
}

/// Halley's method returning the full diagnostics record.
pub fn halley_full<F, DF, DF2, A>(
    f: F,
    fprime: DF,
    fprime2: DF2,
    x0: f64,
    args: &A,
    config: &OpenConfig,
) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    DF: Fn(f64, &A) -> f64,
    DF2: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    halley_observed(f, fprime, fprime2, x0, args, config, &mut NoopObserver)
}

/// Halley's method reporting every iterate to `observer`.
pub fn halley_observed<F, DF, DF2, A, O>(
    f: F,
    fprime: DF,
    fprime2: DF2,
    x0: f64,
    args: &A,
    config: &OpenConfig,
    observer: &mut O,
) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    DF: Fn(f64, &A) -> f64,
    DF2: Fn(f64, &A) -> f64,
    A: ?Sized,
    O: Observer + ?Sized,
{
    if let Err(e) = config.validate() {
        log::debug!("halley: {e}");
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

        let fder2 = fprime2(p0, eval.args());
        let denom = 2.0 * fder * fder - fval * fder2;
        if denom == 0.0 {
            return eval.warned(p0, SolverWarning::ZeroDenominator);
        }

        let p = p0 - 2.0 * fval * fder / denom;
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
    use crate::output::ErrorCode;
    use crate::solvers::newton_full;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64, _: &()| x * x - 2.0;
        let df = |x: f64, _: &()| 2.0 * x;
        let d2f = |_: f64, _: &()| 2.0;

        let root = halley(f, df, d2f, 1.5, &(), &OpenConfig::default()).unwrap();

        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_fewer_iterations_than_newton() {
        let f = |x: f64, _: &()| x.exp() - 10.0;
        let df = |x: f64, _: &()| x.exp();
        let config = OpenConfig::default().with_tol(1e-12);

        let h = halley_full(f, df, df, 0.0, &(), &config);
        let n = newton_full(f, df, 0.0, &(), &config);

        assert!(h.converged() && n.converged());
        assert_relative_eq!(h.root, 10f64.ln(), epsilon = 1e-12);
        assert!(h.iterations <= n.iterations);
    }

    #[test]
    fn test_zero_derivative() {
        let f = |x: f64, _: &()| x * x + 1.0;
        let df = |x: f64, _: &()| 2.0 * x;
        let d2f = |_: f64, _: &()| 2.0;

        let out = halley_full(f, df, d2f, 0.0, &(), &OpenConfig::default());

        assert_eq!(out.warning, Some(SolverWarning::ZeroDerivative));
        assert_eq!(out.root, 0.0);
    }

    #[test]
    fn test_zero_denominator() {
        // At x = 1: f = 1, f' = 1, f'' = 2 -> 2*1 - 1*2 = 0
        let f = |_: f64, _: &()| 1.0;
        let df = |_: f64, _: &()| 1.0;
        let d2f = |_: f64, _: &()| 2.0;

        let out = halley_full(f, df, d2f, 1.0, &(), &OpenConfig::default());

        assert_eq!(out.error_code, ErrorCode::Converged);
        assert_eq!(out.warning, Some(SolverWarning::ZeroDenominator));
        assert_eq!(out.root, 1.0);
        assert_eq!(out.iterations, 1);
    }

    #[test]
    fn test_counts_only_primary_calls() {
        let f = |x: f64, _: &()| x * x - 2.0;
        let df = |x: f64, _: &()| 2.0 * x;
        let d2f = |_: f64, _: &()| 2.0;

        let out = halley_full(f, df, d2f, 1.0, &(), &OpenConfig::default());

        assert_eq!(out.function_calls, out.iterations);
    }
}
