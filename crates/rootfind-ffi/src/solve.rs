//! Shared solve paths for both callback flavours.
//!
//! Each helper validates the configuration, runs the full-output routine and
//! hands the record to [`report`].

use libc::c_int;

use rootfind::solvers::{self, BracketMethod};

use crate::output::{bracket_config, open_config, reject, report, RootfindFullOutput};

pub(crate) unsafe fn newton<F, D, A>(
    name: &str,
    f: F,
    fprime: D,
    x0: f64,
    args: &A,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64
where
    F: Fn(f64, &A) -> f64,
    D: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    let config = open_config(tol, maxiter);
    if let Err(e) = config.validate() {
        return reject(name, &e, x0, full_output);
    }
    let out = solvers::newton_full(f, fprime, x0, args, &config);
    report(name, &out, None, full_output)
}

pub(crate) unsafe fn secant<F, A>(
    name: &str,
    f: F,
    x0: f64,
    args: &A,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    let config = open_config(tol, maxiter);
    if let Err(e) = config.validate() {
        return reject(name, &e, x0, full_output);
    }
    let out = solvers::secant_full(f, x0, None, args, &config);
    report(name, &out, None, full_output)
}

pub(crate) unsafe fn halley<F, D, D2, A>(
    name: &str,
    f: F,
    fprime: D,
    fprime2: D2,
    x0: f64,
    args: &A,
    tol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64
where
    F: Fn(f64, &A) -> f64,
    D: Fn(f64, &A) -> f64,
    D2: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    let config = open_config(tol, maxiter);
    if let Err(e) = config.validate() {
        return reject(name, &e, x0, full_output);
    }
    let out = solvers::halley_full(f, fprime, fprime2, x0, args, &config);
    report(name, &out, None, full_output)
}

pub(crate) unsafe fn bracket<F, A>(
    name: &str,
    method: BracketMethod,
    f: F,
    xa: f64,
    xb: f64,
    args: &A,
    xtol: f64,
    rtol: f64,
    maxiter: c_int,
    full_output: *mut RootfindFullOutput,
) -> f64
where
    F: Fn(f64, &A) -> f64,
    A: ?Sized,
{
    let config = bracket_config(xtol, rtol, maxiter);
    if let Err(e) = config.validate() {
        return reject(name, &e, xa, full_output);
    }
    let out = method.solve_full(f, xa, xb, args, &config);
    report(name, &out, Some((xa, xb)), full_output)
}
