//! Solvers taking `double (*)(int, double*)` callbacks.
//!
//! The callback receives `n`, the number of extra parameters, and a pointer
//! to `n + 1` doubles: the independent variable followed by the parameters.
//! Parameters are copied into a stack frame once per solve, so the caller's
//! array is only read at entry.

use libc::c_int;

use rootfind::callback::{ArgArray, MAX_ARGS};
use rootfind::solvers::BracketMethod;
use rootfind::{RootError, RootResult};

use crate::output::{reject, RootfindFullOutput};
use crate::solve;

/// Callback receiving the parameter count and the `[x, p1, .., pn]` frame.
pub type RootfindArrayCallback = Option<unsafe extern "C" fn(c_int, *mut f64) -> f64>;

/// Copies `n` caller parameters into an [`ArgArray`].
unsafe fn arg_array(n: c_int, args: *const f64) -> RootResult<ArgArray> {
    let len = usize::try_from(n)
        .map_err(|_| RootError::invalid_config(format!("n must be non-negative, got {n}")))?;
    if len > MAX_ARGS {
        return Err(RootError::invalid_config(format!(
            "at most {MAX_ARGS} extra parameters are supported, got {len}"
        )));
    }
    if len == 0 {
        return Ok(ArgArray::default());
    }
    if args.is_null() {
        return Err(RootError::invalid_config("args is null but n > 0"));
    }
    ArgArray::new(std::slice::from_raw_parts(args, len))
}

/// Evaluates `func` on a fresh frame with `x` in slot 0.
#[inline]
unsafe fn call(
    func: unsafe extern "C" fn(c_int, *mut f64) -> f64,
    x: f64,
    params: &ArgArray,
) -> f64 {
    let mut frame = params.frame(x);
    func(params.len() as c_int, frame.as_mut_ptr())
}

/// Newton-Raphson from `x0`.
///
/// # Safety
///
/// - `args` must point to `n` readable doubles when `n > 0`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_array_newton(
    func: RootfindArrayCallback,
    fprime: RootfindArrayCallback,
    x0: f64,
    n: c_int,
    args: *const f64,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    let name = "rootfind_array_newton";
    let (Some(func), Some(fprime)) = (func, fprime) else {
        let error = RootError::invalid_config("callback function pointer is null");
        return reject(name, &error, x0, full_output);
    };
    let params = match arg_array(n, args) {
        Ok(params) => params,
        Err(e) => return reject(name, &e, x0, full_output),
    };

    solve::newton(
        name,
        move |x: f64, p: &ArgArray| unsafe { call(func, x, p) },
        move |x: f64, p: &ArgArray| unsafe { call(fprime, x, p) },
        x0,
        &params,
        tol,
        maxiter,
        full_output,
    )
}

/// Secant method from `x0`, with the second seed chosen automatically.
///
/// # Safety
///
/// - `args` must point to `n` readable doubles when `n > 0`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_array_secant(
    func: RootfindArrayCallback,
    x0: f64,
    n: c_int,
    args: *const f64,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    let name = "rootfind_array_secant";
    let Some(func) = func else {
        let error = RootError::invalid_config("callback function pointer is null");
        return reject(name, &error, x0, full_output);
    };
    let params = match arg_array(n, args) {
        Ok(params) => params,
        Err(e) => return reject(name, &e, x0, full_output),
    };

    solve::secant(
        name,
        move |x: f64, p: &ArgArray| unsafe { call(func, x, p) },
        x0,
        &params,
        tol,
        maxiter,
        full_output,
    )
}

/// Halley's method from `x0`.
///
/// # Safety
///
/// - `args` must point to `n` readable doubles when `n > 0`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_array_halley(
    func: RootfindArrayCallback,
    fprime: RootfindArrayCallback,
    fprime2: RootfindArrayCallback,
    x0: f64,
    n: c_int,
    args: *const f64,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    let name = "rootfind_array_halley";
    let (Some(func), Some(fprime), Some(fprime2)) = (func, fprime, fprime2) else {
        let error = RootError::invalid_config("callback function pointer is null");
        return reject(name, &error, x0, full_output);
    };
    let params = match arg_array(n, args) {
        Ok(params) => params,
        Err(e) => return reject(name, &e, x0, full_output),
    };

    solve::halley(
        name,
        move |x: f64, p: &ArgArray| unsafe { call(func, x, p) },
        move |x: f64, p: &ArgArray| unsafe { call(fprime, x, p) },
        move |x: f64, p: &ArgArray| unsafe { call(fprime2, x, p) },
        x0,
        &params,
        tol,
        maxiter,
        full_output,
    )
}

unsafe fn bracket(
    name: &str,
    method: BracketMethod,
    func: RootfindArrayCallback,
    xa: f64,
    xb: f64,
    n: c_int,
    args: *const f64,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    let Some(func) = func else {
        let error = RootError::invalid_config("callback function pointer is null");
        return reject(name, &error, xa, full_output);
    };
    let params = match arg_array(n, args) {
        Ok(params) => params,
        Err(e) => return reject(name, &e, xa, full_output),
    };

    solve::bracket(
        name,
        method,
        move |x: f64, p: &ArgArray| unsafe { call(func, x, p) },
        xa,
        xb,
        &params,
        xtol,
        rtol,
        maxiter,
        full_output,
    )
}

/// Bisection on `[xa, xb]`.
///
/// # Safety
///
/// - `args` must point to `n` readable doubles when `n > 0`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_array_bisect(
    func: RootfindArrayCallback,
    xa: f64,
    xb: f64,
    n: c_int,
    args: *const f64,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    bracket(
        "rootfind_array_bisect",
        BracketMethod::Bisect,
        func,
        xa,
        xb,
        n,
        args,
        xtol,
        rtol,
        maxiter,
        full_output,
    )
}

/// Ridder's method on `[xa, xb]`.
///
/// # Safety
///
/// - `args` must point to `n` readable doubles when `n > 0`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_array_ridder(
    func: RootfindArrayCallback,
    xa: f64,
    xb: f64,
    n: c_int,
    args: *const f64,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    bracket(
        "rootfind_array_ridder",
        BracketMethod::Ridder,
        func,
        xa,
        xb,
        n,
        args,
        xtol,
        rtol,
        maxiter,
        full_output,
    )
}

/// Brent's method with inverse quadratic interpolation on `[xa, xb]`.
///
/// # Safety
///
/// - `args` must point to `n` readable doubles when `n > 0`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_array_brentq(
    func: RootfindArrayCallback,
    xa: f64,
    xb: f64,
    n: c_int,
    args: *const f64,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    bracket(
        "rootfind_array_brentq",
        BracketMethod::Brentq,
        func,
        xa,
        xb,
        n,
        args,
        xtol,
        rtol,
        maxiter,
        full_output,
    )
}

/// Brent's method with hyperbolic extrapolation on `[xa, xb]`.
///
/// # Safety
///
/// - `args` must point to `n` readable doubles when `n > 0`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_array_brenth(
    func: RootfindArrayCallback,
    xa: f64,
    xb: f64,
    n: c_int,
    args: *const f64,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    bracket(
        "rootfind_array_brenth",
        BracketMethod::Brenth,
        func,
        xa,
        xb,
        n,
        args,
        xtol,
        rtol,
        maxiter,
        full_output,
    )
}
