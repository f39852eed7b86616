//! Bisection root-finding algorithm.

use crate::callback::{Evaluator, NoopObserver, Observer};
use crate::error::RootResult;
use crate::output::FullOutput;
use crate::solvers::{opposite_signs, settle, BracketConfig};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
/// Stops when `f(m) == 0` or the half-width drops below `xtol + rtol * |m|`.
///
/// Requires: `f(a)` and `f(b)` of opposite signs (or one of them exactly zero)
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `args` - Extra parameters passed to `f`
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use rootfind::solvers::{bisect, BracketConfig};
///
/// let f = |x: f64, _: &()| x * x - 4.0;
/// let config = BracketConfig::new(1e-8, 1e-8, 100);
///
/// let root = bisect(f, 0.0, 10.0, &(), &config).unwrap();
/// assert!((root - 2.0).abs() < 1e-7);
/// ```
pub fn bisect<F, A>(f: F, a: f64, b: f64, args: &A, config: &BracketConfig) -> RootResult<f64>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    config.validate()?;
    settle(bisect_full(f, a, b, args, config), Some((a, b)))
}

/// Bisection returning the full diagnostics record.
pub fn bisect_full<F, A>(f: F, a: f64, b: f64, args: &A, config: &BracketConfig) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    bisect_observed(f, a, b, args, config, &mut NoopObserver)
}

/// Bisection reporting the bracket after every halving to `observer`.
pub fn bisect_observed<F, A, O>(
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
    if let Err(e) = config.validate() {
        log::debug!("bisect: {e}");
        return FullOutput::invalid_config(a);
    }

    let mut eval = Evaluator::new(&f, args, observer, a);

    let fa = eval.evaluate(a);
    let fb = eval.evaluate(b);
    if fa == 0.0 {
        return eval.converged(a);
    }
    if fb == 0.0 {
        return eval.converged(b);
    }
    if !opposite_signs(fa, fb) {
        return eval.sign_error(a, b);
    }

    // `lo` keeps the sign of `fa`; the other end is always `lo + 2 * dm`
    let mut lo = a;
    let mut dm = b - a;

    for _ in 0..config.max_iterations {
        eval.next_iteration();

        dm *= 0.5;
        let m = lo + dm;
        let fm = eval.evaluate(m);
        if !opposite_signs(fa, fm) {
            lo = m;
        }
        eval.observe(m, Some((lo, lo + dm)));

        if fm == 0.0 || dm.abs() < config.xtol + config.rtol * m.abs() {
            return eval.converged(m);
        }
    }

    eval.exhausted(lo)
}
