//! Brent's root-finding algorithms.
//!
//! Both variants share the same safeguarded iteration and differ only in how
//! they extrapolate from three points:
//!
//! - [`brentq`]: inverse quadratic interpolation
//! - [`brenth`]: hyperbolic extrapolation

use crate::callback::{Evaluator, NoopObserver, Observer};
use crate::error::RootResult;
use crate::output::FullOutput;
use crate::solvers::{opposite_signs, settle, BracketConfig};

/// Three-point extrapolation used when the last two iterates are distinct
/// from the contra-point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extrapolation {
    InverseQuadratic,
    Hyperbolic,
}

/// Brent's root-finding algorithm with inverse quadratic interpolation.
///
/// Combines the reliability of bisection with the speed of the secant method
/// and inverse quadratic interpolation. This is generally the best choice
/// when a derivative is not available.
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
/// use rootfind::solvers::{brentq, BracketConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64, _: &()| x * x * x - x - 2.0;
///
/// let root = brentq(f, 1.0, 2.0, &(), &BracketConfig::new(1e-12, 1e-12, 100)).unwrap();
/// assert!(f(root, &()).abs() < 1e-10);
/// ```
pub fn brentq<F, A>(f: F, a: f64, b: f64, args: &A, config: &BracketConfig) -> RootResult<f64>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    config.validate()?;
    settle(brentq_full(f, a, b, args, config), Some((a, b)))
}

/// [`brentq`] returning the full diagnostics record.
pub fn brentq_full<F, A>(f: F, a: f64, b: f64, args: &A, config: &BracketConfig) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    brentq_observed(f, a, b, args, config, &mut NoopObserver)
}

/// [`brentq`] reporting the bracket on every iteration to `observer`.
pub fn brentq_observed<F, A, O>(
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
    brent_core(&f, a, b, args, config, observer, Extrapolation::InverseQuadratic)
}

/// Brent's root-finding algorithm with hyperbolic extrapolation.
///
/// Same safeguards and convergence test as [`brentq`]; the three-point step
/// fits a hyperbola instead of an inverse quadratic. The two variants
/// usually need a similar number of evaluations.
///
/// # Example
///
/// ```rust
/// use rootfind::solvers::{brenth, BracketConfig};
///
/// let f = |x: f64, _: &()| x.cos() - x;
///
/// let root = brenth(f, 0.0, 1.0, &(), &BracketConfig::new(1e-12, 1e-12, 100)).unwrap();
/// assert!((root - 0.739_085_133_215_160_6).abs() < 1e-10);
/// ```
pub fn brenth<F, A>(f: F, a: f64, b: f64, args: &A, config: &BracketConfig) -> RootResult<f64>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    config.validate()?;
    settle(brenth_full(f, a, b, args, config), Some((a, b)))
}

/// [`brenth`] returning the full diagnostics record.
pub fn brenth_full<F, A>(f: F, a: f64, b: f64, args: &A, config: &BracketConfig) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    brenth_observed(f, a, b, args, config, &mut NoopObserver)
}

/// [`brenth`] reporting the bracket on every iteration to `observer`.
pub fn brenth_observed<F, A, O>(
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
    brent_core(&f, a, b, args, config, observer, Extrapolation::Hyperbolic)
}

/// Shared Brent iteration.
///
/// State: `xcur` is the best estimate, `xpre` the previous one and `xblk`
/// the contra-point, so `[xcur, xblk]` always brackets the root. `spre` and
/// `scur` are the two most recent step sizes used by the step safeguard.
///
/// Every accepted step lands strictly inside `[xcur, xblk]`, so the bracket
/// width never increases.
fn brent_core<F, A, O>(
    f: &F,
    a: f64,
    b: f64,
    args: &A,
    config: &BracketConfig,
    observer: &mut O,
    extrapolation: Extrapolation,
) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
    O: Observer + ?Sized,
{
    if let Err(e) = config.validate() {
        log::debug!("brent: {e}");
        return FullOutput::invalid_config(a);
    }

    let mut eval = Evaluator::new(f, args, observer, a);

    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = eval.evaluate(xpre);
    let mut fcur = eval.evaluate(xcur);
    if fpre == 0.0 {
        return eval.converged(xpre);
    }
    if fcur == 0.0 {
        return eval.converged(xcur);
    }
    if !opposite_signs(fpre, fcur) {
        return eval.sign_error(a, b);
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for _ in 0..config.max_iterations {
        eval.next_iteration();

        if opposite_signs(fpre, fcur) {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (config.xtol + config.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        eval.observe(xcur, Some((xcur, xblk)));

        if fcur == 0.0 || sbis.abs() < delta {
            return eval.converged(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // interpolate
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // extrapolate
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                match extrapolation {
                    Extrapolation::InverseQuadratic => {
                        -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
                    }
                    Extrapolation::Hyperbolic => {
                        -fcur * (fblk - fpre) / (fblk * dpre - fpre * dblk)
                    }
                }
            };

            // Accept only finite steps towards the contra-point that shrink fast enough
            if stry.is_finite()
                && stry * sbis > 0.0
                && 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta)
            {
                // good short step
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }

        fcur = eval.evaluate(xcur);
    }

    eval.exhausted(xcur)
}
