//! Callback protocol shared by every solver.
//!
//! A user function has the shape `f(x, &args) -> f64`, where `args` is any
//! caller-owned parameter bundle. Solvers borrow both for the duration of one
//! solve and never mutate the bundle, so a single bundle can be shared across
//! threads solving independent equations.
//!
//! Three bundle flavours are supported without any runtime dispatch:
//!
//! - any struct or tuple, e.g. `f(x, &Params { .. })`
//! - the empty bundle `()`
//! - [`ArgArray`], a fixed-capacity array of up to [`MAX_ARGS`] doubles for
//!   callbacks written against a flat `&[f64]` (see [`array_callback`])
//!
//! Per-iteration diagnostics are available through an [`Observer`]; the
//! default [`NoopObserver`] is a zero-sized type and is compiled out.

use crate::error::{RootError, RootResult};
use crate::output::{ErrorCode, FullOutput, SolverWarning};

/// Maximum number of extra parameters held by an [`ArgArray`].
pub const MAX_ARGS: usize = 10;

/// Fixed-capacity parameter array for flat-array callbacks.
///
/// Slot 0 is reserved for the independent variable; the extra parameters
/// follow it. Copying an `ArgArray` never allocates.
///
/// # Example
///
/// ```rust
/// use rootfind::callback::{array_callback, ArgArray};
/// use rootfind::solvers::{brentq, BracketConfig};
///
/// // xs[0] is x, xs[1..] are the extra parameters
/// let f = array_callback(|xs: &[f64]| xs[1] - (-(xs[0] - xs[2])).exp());
/// let args = ArgArray::new(&[1.0, 0.7]).unwrap();
///
/// let root = brentq(f, 0.5, 1.0, &args, &BracketConfig::default()).unwrap();
/// assert!((root - 0.7).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgArray {
    frame: [f64; MAX_ARGS + 1],
    len: usize,
}

impl ArgArray {
    /// Creates a parameter array from a slice of at most [`MAX_ARGS`] values.
    pub fn new(params: &[f64]) -> RootResult<Self> {
        if params.len() > MAX_ARGS {
            return Err(RootError::invalid_config(format!(
                "at most {MAX_ARGS} extra parameters are supported, got {}",
                params.len()
            )));
        }

        let mut frame = [0.0; MAX_ARGS + 1];
        frame[1..=params.len()].copy_from_slice(params);
        Ok(Self {
            frame,
            len: params.len(),
        })
    }

    /// Returns the extra parameters.
    pub fn params(&self) -> &[f64] {
        &self.frame[1..=self.len]
    }

    /// Returns the number of extra parameters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no extra parameters.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a copy of the backing frame with `x` written into slot 0.
    ///
    /// Only the first `len() + 1` entries are meaningful.
    #[inline]
    pub fn frame(&self, x: f64) -> [f64; MAX_ARGS + 1] {
        let mut frame = self.frame;
        frame[0] = x;
        frame
    }
}

impl Default for ArgArray {
    fn default() -> Self {
        Self {
            frame: [0.0; MAX_ARGS + 1],
            len: 0,
        }
    }
}

/// Adapts a flat-array callback into the `f(x, &args)` protocol.
///
/// The wrapped function receives `[x, p1, p2, ..]` as one slice.
pub fn array_callback<G>(g: G) -> impl Fn(f64, &ArgArray) -> f64
where
    G: Fn(&[f64]) -> f64,
{
    move |x: f64, args: &ArgArray| {
        let frame = args.frame(x);
        g(&frame[..=args.len()])
    }
}

/// Diagnostics emitted once per solver iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// One-based iteration number.
    pub iteration: u32,
    /// Current best estimate of the root.
    pub estimate: f64,
    /// Current bracket `(lo, hi)` with `lo <= hi`, for bracketing methods.
    pub bracket: Option<(f64, f64)>,
}

impl Step {
    /// Width of the current bracket, if any.
    pub fn width(&self) -> Option<f64> {
        self.bracket.map(|(lo, hi)| hi - lo)
    }
}

/// Per-iteration diagnostics sink.
pub trait Observer {
    /// Called once per iteration with the solver state.
    fn on_step(&mut self, step: &Step);
}

/// Observer that ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    #[inline]
    fn on_step(&mut self, _step: &Step) {}
}

impl<F> Observer for F
where
    F: FnMut(&Step),
{
    #[inline]
    fn on_step(&mut self, step: &Step) {
        self(step);
    }
}

/// Invokes the primary function, counts calls, and owns the record for one solve.
pub(crate) struct Evaluator<'a, F: ?Sized, A: ?Sized, O: ?Sized> {
    func: &'a F,
    args: &'a A,
    observer: &'a mut O,
    output: FullOutput,
}

impl<'a, F, A, O> Evaluator<'a, F, A, O>
where
    F: Fn(f64, &A) -> f64 + ?Sized,
    A: ?Sized,
    O: Observer + ?Sized,
{
    pub(crate) fn new(func: &'a F, args: &'a A, observer: &'a mut O, initial: f64) -> Self {
        Self {
            func,
            args,
            observer,
            output: FullOutput::start(initial),
        }
    }

    /// The argument bundle, for derivative callbacks.
    #[inline]
    pub(crate) fn args(&self) -> &'a A {
        self.args
    }

    #[inline]
    pub(crate) fn evaluate(&mut self, x: f64) -> f64 {
        self.output.function_calls += 1;
        (self.func)(x, self.args)
    }

    #[inline]
    pub(crate) fn next_iteration(&mut self) {
        self.output.iterations += 1;
    }

    #[inline]
    pub(crate) fn observe(&mut self, estimate: f64, bracket: Option<(f64, f64)>) {
        let step = Step {
            iteration: self.output.iterations,
            estimate,
            bracket: bracket.map(|(a, b)| if a <= b { (a, b) } else { (b, a) }),
        };
        self.observer.on_step(&step);
    }

    pub(crate) fn converged(self, root: f64) -> FullOutput {
        self.finish(root, ErrorCode::Converged, None)
    }

    pub(crate) fn warned(self, root: f64, warning: SolverWarning) -> FullOutput {
        self.finish(root, ErrorCode::Converged, Some(warning))
    }

    pub(crate) fn exhausted(self, root: f64) -> FullOutput {
        log::debug!(
            "root-finding failed to converge after {} iterations (last estimate {root})",
            self.output.iterations
        );
        self.finish(root, ErrorCode::ConvergenceError, None)
    }

    /// The endpoint evaluations are not charged to the record on a sign error.
    pub(crate) fn sign_error(self, a: f64, b: f64) -> FullOutput {
        log::debug!("f({a}) and f({b}) do not bracket a root");
        FullOutput {
            root: a,
            iterations: 0,
            function_calls: 0,
            error_code: ErrorCode::SignError,
            warning: None,
        }
    }

    fn finish(
        mut self,
        root: f64,
        error_code: ErrorCode,
        warning: Option<SolverWarning>,
    ) -> FullOutput {
        self.output.root = root;
        self.output.error_code = error_code;
        self.output.warning = warning;
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_array_layout() {
        let args = ArgArray::new(&[1.0, 2.0, 3.0]).unwrap();

        assert_eq!(args.len(), 3);
        assert_eq!(args.params(), &[1.0, 2.0, 3.0]);

        let frame = args.frame(0.5);
        assert_eq!(&frame[..=args.len()], &[0.5, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_arg_array_capacity() {
        let ten = [1.0; MAX_ARGS];
        assert!(ArgArray::new(&ten).is_ok());

        let eleven = [1.0; MAX_ARGS + 1];
        assert!(matches!(
            ArgArray::new(&eleven),
            Err(RootError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_empty_arg_array() {
        let args = ArgArray::default();
        assert!(args.is_empty());
        assert!(args.params().is_empty());

        let f = array_callback(|xs: &[f64]| {
            assert_eq!(xs.len(), 1);
            xs[0] * 2.0
        });
        assert_eq!(f(1.5, &args), 3.0);
    }

    #[test]
    fn test_array_callback_passes_x_first() {
        let f = array_callback(|xs: &[f64]| xs[0] * xs[1] + xs[2]);
        let args = ArgArray::new(&[3.0, 1.0]).unwrap();

        assert_eq!(f(2.0, &args), 7.0);
    }

    #[test]
    fn test_evaluator_counts_calls() {
        let f = |x: f64, k: &f64| x * k;
        let mut observer = NoopObserver;
        let mut eval = Evaluator::new(&f, &2.0, &mut observer, 0.0);

        assert_eq!(eval.evaluate(1.0), 2.0);
        assert_eq!(eval.evaluate(3.0), 6.0);
        eval.next_iteration();

        let out = eval.converged(3.0);
        assert_eq!(out.function_calls, 2);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.error_code, ErrorCode::Converged);
    }

    #[test]
    fn test_closure_observer_orders_bracket() {
        let f = |x: f64, _: &()| x;
        let mut steps = Vec::new();
        let mut record = |s: &Step| steps.push(*s);
        let mut eval = Evaluator::new(&f, &(), &mut record, 0.0);

        eval.next_iteration();
        eval.observe(0.5, Some((1.0, 0.0)));
        let _ = eval.converged(0.5);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].bracket, Some((0.0, 1.0)));
        assert_eq!(steps[0].width(), Some(1.0));
    }

    #[test]
    fn test_sign_error_record() {
        let f = |x: f64, _: &()| x * x + 1.0;
        let mut observer = NoopObserver;
        let mut eval = Evaluator::new(&f, &(), &mut observer, -1.0);
        let _ = eval.evaluate(-1.0);
        let _ = eval.evaluate(1.0);

        let out = eval.sign_error(-1.0, 1.0);
        assert_eq!(out.error_code, ErrorCode::SignError);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.function_calls, 0);
    }
}
