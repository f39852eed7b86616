//! Solvers taking `double (*)(double, void*)` callbacks.
//!
//! The `args` pointer is passed through to every callback untouched; the
//! library never reads, writes or frees it.

use std::ffi::c_void;

use libc::c_int;

use rootfind::solvers::BracketMethod;
use rootfind::RootError;

use crate::output::{reject, RootfindFullOutput};
use crate::solve;

/// Callback receiving the independent variable and the caller's `args` pointer.
pub type RootfindCallback = Option<unsafe extern "C" fn(f64, *mut c_void) -> f64>;

unsafe fn null_callback(name: &str, start: f64, full_output: *mut RootfindFullOutput) -> f64 {
    let error = RootError::invalid_config("callback function pointer is null");
    reject(name, &error, start, full_output)
}

/// Newton-Raphson from `x0`.
///
/// # Safety
///
/// - `func` and `fprime` must be safe to call with `args`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_newton(
    func: RootfindCallback,
    fprime: RootfindCallback,
    x0: f64,
    args: *mut c_void,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    let (Some(func), Some(fprime)) = (func, fprime) else {
        return null_callback("rootfind_newton", x0, full_output);
    };

    solve::newton(
        "rootfind_newton",
        move |x: f64, _: &()| unsafe { func(x, args) },
        move |x: f64, _: &()| unsafe { fprime(x, args) },
        x0,
        &(),
        tol,
        maxiter,
        full_output,
    )
}

/// Secant method from `x0`, with the second seed chosen automatically.
///
/// # Safety
///
/// - `func` must be safe to call with `args`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_secant(
    func: RootfindCallback,
    x0: f64,
    args: *mut c_void,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    let Some(func) = func else {
        return null_callback("rootfind_secant", x0, full_output);
    };

    solve::secant(
        "rootfind_secant",
        move |x: f64, _: &()| unsafe { func(x, args) },
        x0,
        &(),
        tol,
        maxiter,
        full_output,
    )
}

/// Halley's method from `x0`.
///
/// # Safety
///
/// - `func`, `fprime` and `fprime2` must be safe to call with `args`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_halley(
    func: RootfindCallback,
    fprime: RootfindCallback,
    fprime2: RootfindCallback,
    x0: f64,
    args: *mut c_void,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    let (Some(func), Some(fprime), Some(fprime2)) = (func, fprime, fprime2) else {
        return null_callback("rootfind_halley", x0, full_output);
    };

    solve::halley(
        "rootfind_halley",
        move |x: f64, _: &()| unsafe { func(x, args) },
        move |x: f64, _: &()| unsafe { fprime(x, args) },
        move |x: f64, _: &()| unsafe { fprime2(x, args) },
        x0,
        &(),
        tol,
        maxiter,
        full_output,
    )
}

unsafe fn bracket(
    name: &str,
    method: BracketMethod,
    func: RootfindCallback,
    xa: f64,
    xb: f64,
    args: *mut c_void,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    let Some(func) = func else {
        return null_callback(name, xa, full_output);
    };

    solve::bracket(
        name,
        method,
        move |x: f64, _: &()| unsafe { func(x, args) },
        xa,
        xb,
        &(),
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
/// - `func` must be safe to call with `args`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_bisect(
    func: RootfindCallback,
    xa: f64,
    xb: f64,
    args: *mut c_void,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    bracket(
        "rootfind_bisect",
        BracketMethod::Bisect,
        func,
        xa,
        xb,
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
/// - `func` must be safe to call with `args`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_ridder(
    func: RootfindCallback,
    xa: f64,
    xb: f64,
    args: *mut c_void,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    bracket(
        "rootfind_ridder",
        BracketMethod::Ridder,
        func,
        xa,
        xb,
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
/// - `func` must be safe to call with `args`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_brentq(
    func: RootfindCallback,
    xa: f64,
    xb: f64,
    args: *mut c_void,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    bracket(
        "rootfind_brentq",
        BracketMethod::Brentq,
        func,
        xa,
        xb,
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
/// - `func` must be safe to call with `args`.
/// - `full_output` must be null or valid and writable.
#[no_mangle]
pub unsafe extern "C" fn rootfind_brenth(
    func: RootfindCallback,
    xa: f64,
    xb: f64,
    args: *mut c_void,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    bracket(
        "rootfind_brenth",
        BracketMethod::Brenth,
        func,
        xa,
        xb,
        args,
        xtol,
        rtol,
        maxiter,
        full_output,
    )
}
