//! Ridder's root-finding algorithm.

use crate::callback::{Evaluator, NoopObserver, Observer};
use crate::error::RootResult;
use crate::output::FullOutput;
use crate::solvers::{opposite_signs, settle, BracketConfig};

/// Ridder's root-finding algorithm.
///
/// Each iteration evaluates the midpoint `m`, then refines it with an
/// exponential correction:
///
/// `x_new = m - sign(dn) * min(|dn|, |dm| - tol/2)`, with
/// `dn = sign(f(b) - f(a)) * dm * f(m) / sqrt(f(m)^2 - f(a) f(b))`
///
/// and keeps the half of the bracket that still changes sign. Two function
/// evaluations per iteration, superlinear convergence.
///
/// Requires: `f(a)` and `f(b)` of opposite signs (or one of them exactly zero)
///
/// # Example
///
/// ```rust
/// use rootfind::solvers::{ridder, BracketConfig};
///
/// let f = |x: f64, _: &()| x * x * x - x - 2.0;
///
/// let root = ridder(f, 1.0, 2.0, &(), &BracketConfig::new(1e-12, 1e-12, 100)).unwrap();
/// assert!(f(root, &()).abs() < 1e-10);
/// ```
pub fn ridder<F, A>(f: F, a: f64, b: f64, args: &A, config: &BracketConfig) -> RootResult<f64>
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    config.validate()?;
    settle(ridder_full(f, a, b, args, config), Some((a, b)))
}

/// Ridder's method returning the full diagnostics record.
pub fn ridder_full<F, A>(f: F, a: f64, b: f64, args: &A, config: &BracketConfig) -> FullOutput
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    ridder_observed(f, a, b, args, config, &mut NoopObserver)
}

/// Ridder's method reporting the bracket after every iteration to `observer`.
pub fn ridder_observed<F, A, O>(
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
        log::debug!("ridder: {e}");
        return FullOutput::invalid_config(a);
    }

    let mut eval = Evaluator::new(&f, args, observer, a);

    let (mut xa, mut xb) = (a, b);
    let mut fa = eval.evaluate(xa);
    let mut fb = eval.evaluate(xb);
    if fa == 0.0 {
        return eval.converged(xa);
    }
    if fb == 0.0 {
        return eval.converged(xb);
    }
    if !opposite_signs(fa, fb) {
        return eval.sign_error(a, b);
    }

    let mut tol = config.xtol + config.rtol * xa.abs().min(xb.abs());
    let mut xn = xa;

    for _ in 0..config.max_iterations {
        eval.next_iteration();

        let dm = 0.5 * (xb - xa);
        let xm = xa + dm;
        let fm = eval.evaluate(xm);

        let dn = correction(fa, fb, fm, dm);
        xn = if dn.is_finite() {
            // clamped at zero so xn never leaves the bracket
            let reach = dn.abs().min((dm.abs() - 0.5 * tol).max(0.0));
            xm - sign(dn) * reach
        } else {
            xm
        };
        let fn_ = eval.evaluate(xn);

        if opposite_signs(fn_, fm) {
            xa = xn;
            fa = fn_;
            xb = xm;
            fb = fm;
        } else if opposite_signs(fn_, fa) {
            xb = xn;
            fb = fn_;
        } else {
            xa = xn;
            fa = fn_;
        }
        eval.observe(xn, Some((xa, xb)));

        tol = config.xtol + config.rtol * xn.abs();
        if fn_ == 0.0 || (xb - xa).abs() < tol {
            return eval.converged(xn);
        }
    }

    eval.exhausted(xn)
}

/// Exponential correction `dn`, computed on values scaled by the largest
/// magnitude so neither `f(m)^2` nor `f(a) f(b)` underflows. Non-finite when
/// the radicand still vanishes.
fn correction(fa: f64, fb: f64, fm: f64, dm: f64) -> f64 {
    let scale = fa.abs().max(fb.abs()).max(fm.abs());
    let (ga, gb, gm) = (fa / scale, fb / scale, fm / scale);
    sign(fb - fa) * dm * gm / (gm * gm - ga * gb).sqrt()
}

#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        -1.0
    }
}
