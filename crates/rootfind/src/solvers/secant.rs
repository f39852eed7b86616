//! Secant root-finding algorithm.

use crate::callback::{Evaluator, NoopObserver, Observer};
use crate::error::{RootError, RootResult};
use crate::output::{FullOutput, SolverWarning};
use crate::solvers::{settle, OpenConfig};

/// Relative and absolute perturbation used to build the second seed.
const SEED_PERTURBATION: f64 = 1e-4;

/// Secant root-finding algorithm.
///
/// Similar to Newton-Raphson but approximates the derivative with the
/// slope through the two most recent iterates. When `x1` is `None` the
/// second seed is `x0 * (1 + 1e-4) ± 1e-4`, moving away from zero.
///
/// Convergence rate is superlinear (order ~1.618, the golden ratio).
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Optional second initial guess; must differ from `x0`
/// * `args` - Extra parameters passed to `f`
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use rootfind::solvers::{secant, OpenConfig};
///
/// let f = |x: f64, _: &()| x * x - 2.0;
///
/// let root = secant(f, 1.0, None, &(), &OpenConfig::default()).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F, A>(
    f: F,
    x0: f64,
    x1: Option<f64>,
    args: &A,
    config: &OpenConfig,
) -> RootResult<f64>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    config.validate()?;
    check_seeds(x0, x1)?;
    settle(secant_full(f, x0, x1, args, config), None)
}

/// Secant method returning the full diagnostics record.
pub fn secant_full<F, A>(
    f: F,
    x0: f64,
    x1: Option<f64>,
    args: &A,
    config: &OpenConfig,
) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    secant_observed(f, x0, x1, args, config, &mut NoopObserver)
}

/// Secant method reporting every iterate to `observer`.
pub fn secant_observed<F, A, O>(
    f: F,
    x0: f64,
    x1: Option<f64>,
    args: &A,
    config: &OpenConfig,
    observer: &mut O,
) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
    O: Observer + ?Sized,
{
    if let Err(e) = config.validate().and_then(|()| check_seeds(x0, x1)) {
        log::debug!("secant: {e}");
        return FullOutput::invalid_config(x0);
    }

    let mut eval = Evaluator::new(&f, args, observer, x0);

    let mut p0 = x0;
    let mut p1 = x1.unwrap_or_else(|| second_seed(x0));
    let mut q0 = eval.evaluate(p0);
    let mut q1 = eval.evaluate(p1);
    let mut p = p1;

    for _ in 0..config.max_iterations {
        eval.next_iteration();

        if q1 == q0 {
            return eval.warned((p1 + p0) / 2.0, SolverWarning::ZeroDerivative);
        }

        p = p1 - q1 * (p1 - p0) / (q1 - q0);
        if !p.is_finite() {
            return eval.exhausted(p1);
        }
        eval.observe(p, None);

        if (p - p1).abs() < config.tol {
            return eval.converged(p);
        }

        p0 = p1;
        q0 = q1;
        p1 = p;
        q1 = eval.evaluate(p1);
    }

    eval.exhausted(p)
}

fn check_seeds(x0: f64, x1: Option<f64>) -> RootResult<()> {
    if x1 == Some(x0) {
        return Err(RootError::invalid_config("x1 and x0 must be different"));
    }
    Ok(())
}

fn second_seed(x0: f64) -> f64 {
    let step = if x0 >= 0.0 {
        SEED_PERTURBATION
    } else {
        -SEED_PERTURBATION
    };
    x0 * (1.0 + SEED_PERTURBATION) + step
}
