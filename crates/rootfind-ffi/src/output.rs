//! C view of the diagnostics record and the shared result policy.

use libc::c_int;

use rootfind::solvers::{BracketConfig, OpenConfig};
use rootfind::{ErrorCode, FullOutput, RootError};

use crate::error::record_failure;

/// Full-output record written through the optional out-parameter.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootfindFullOutput {
    /// Number of primary function evaluations.
    pub funcalls: c_int,
    /// Number of iterations performed.
    pub iterations: c_int,
    /// Status code: 0 converged, -1 sign error, -2 convergence error, -3 invalid configuration.
    pub error_num: c_int,
    /// Best estimate of the root.
    pub root: f64,
}

impl From<&FullOutput> for RootfindFullOutput {
    fn from(out: &FullOutput) -> Self {
        Self {
            funcalls: saturate(out.function_calls),
            iterations: saturate(out.iterations),
            error_num: out.error_code.code(),
            root: out.root,
        }
    }
}

fn saturate(n: u32) -> c_int {
    c_int::try_from(n).unwrap_or(c_int::MAX)
}

/// Builds an open-method configuration. Negative caps fail validation.
pub(crate) fn open_config(tol: f64, maxiter: c_int) -> OpenConfig {
    OpenConfig::new(tol, u32::try_from(maxiter).unwrap_or(0))
}

/// Builds a bracketing configuration. Negative caps fail validation.
pub(crate) fn bracket_config(xtol: f64, rtol: f64, maxiter: c_int) -> BracketConfig {
    BracketConfig::new(xtol, rtol, u32::try_from(maxiter).unwrap_or(0))
}

/// Rejects a call before any evaluation.
///
/// Records the reason as the last error, writes an invalid-configuration
/// record at `start`, and returns NaN.
pub(crate) unsafe fn reject(
    method: &str,
    error: &RootError,
    start: f64,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    record_failure(method, ErrorCode::InvalidConfig, error);
    if !full_output.is_null() {
        *full_output = RootfindFullOutput {
            error_num: ErrorCode::InvalidConfig.code(),
            root: start,
            ..RootfindFullOutput::default()
        };
    }
    f64::NAN
}

/// Writes the record and maps the status to the C return value.
///
/// Converged solves return the root. Convergence failures return the last
/// iterate and set the last error. Sign and configuration errors return NaN.
pub(crate) unsafe fn report(
    method: &str,
    out: &FullOutput,
    bracket: Option<(f64, f64)>,
    full_output: *mut RootfindFullOutput,
) -> f64 {
    if !full_output.is_null() {
        *full_output = RootfindFullOutput::from(out);
    }

    match out.error_code {
        ErrorCode::Converged => {
            if let Some(warning) = out.warning {
                log::warn!("{method}: {warning}, returning {}", out.root);
            }
            out.root
        }
        ErrorCode::ConvergenceError => {
            let error = RootError::convergence_failed(out.iterations, out.root);
            record_failure(method, out.error_code, error);
            out.root
        }
        ErrorCode::SignError => {
            let (a, b) = bracket.unwrap_or((out.root, out.root));
            record_failure(method, out.error_code, RootError::sign_error(a, b));
            f64::NAN
        }
        ErrorCode::InvalidConfig => {
            record_failure(method, out.error_code, out.flag());
            f64::NAN
        }
    }
}
