//! # Rootfind FFI
//!
//! C-compatible Foreign Function Interface for the rootfind library.
//!
//! Every solver is exported in two callback flavours:
//!
//! - `rootfind_<method>` takes `double (*)(double x, void *args)`; the `args`
//!   pointer is handed back to the callback untouched
//! - `rootfind_array_<method>` takes `double (*)(int n, double *xargs)`, where
//!   `xargs[0]` is `x` and `xargs[1..=n]` are up to 10 extra parameters
//!
//! ## Safety
//!
//! All public functions in this crate are `unsafe` as they deal with raw pointers
//! and assume correct usage from the caller. The caller is responsible for:
//!
//! - Passing callbacks that are safe to invoke with the given arguments
//! - Passing `args` arrays holding at least `n` doubles
//! - Passing a null or writable `full_output` pointer
//!
//! Nothing is allocated on behalf of the caller, so there is nothing to free.
//!
//! ## Error Handling
//!
//! Solvers return the root. Sign and configuration errors return NaN;
//! convergence failures return the last iterate. In every failure case the
//! message can be retrieved with `rootfind_last_error_message`, the failing
//! entry point with `rootfind_last_error_method` and its status with
//! `rootfind_last_error_code`. The status is also written to
//! `full_output->error_num` when `full_output` is non-null.

#![allow(clippy::missing_safety_doc)]
#![allow(clippy::too_many_arguments)]

use libc::{c_char, c_int};

use rootfind::ErrorCode;

mod array_args;
mod error;
mod output;
mod solve;
mod struct_args;

pub use array_args::*;
pub use output::RootfindFullOutput;
pub use struct_args::*;

/// Status code for a converged solve.
pub const ROOTFIND_CONVERGED: c_int = 0;

/// Status code for a bracket whose endpoints share a sign.
pub const ROOTFIND_SIGN_ERROR: c_int = -1;

/// Status code for an exhausted iteration cap.
pub const ROOTFIND_CONVERGENCE_ERROR: c_int = -2;

/// Status code for rejected tolerances, caps, pointers or parameter counts.
pub const ROOTFIND_INVALID_CONFIG: c_int = -3;

// ============================================================================
// Status Flags
// ============================================================================

/// Returns the human-readable flag for a status code.
///
/// # Safety
///
/// The returned string is statically allocated and valid for the lifetime of the program.
#[no_mangle]
pub extern "C" fn rootfind_flag(error_num: c_int) -> *const c_char {
    let flag: &'static [u8] = match ErrorCode::from_code(error_num) {
        Some(ErrorCode::Converged) => b"Converged successfully\0",
        Some(ErrorCode::SignError) => b"f(a) and f(b) must have opposite signs\0",
        Some(ErrorCode::ConvergenceError) => b"Failed to converge\0",
        Some(ErrorCode::InvalidConfig) => b"TOL and MAXITER must be positive\0",
        None => b"Unknown error code\0",
    };
    flag.as_ptr().cast()
}

// ============================================================================
// Error Handling
// ============================================================================

/// Gets the last error message for the calling thread.
///
/// # Safety
///
/// The returned string is valid until the next failing call on this thread.
/// The caller must not free the returned string.
#[no_mangle]
pub unsafe extern "C" fn rootfind_last_error_message() -> *const c_char {
    error::last_error_message()
}

/// Gets the name of the entry point that failed last on the calling thread.
///
/// # Safety
///
/// Same lifetime rules as [`rootfind_last_error_message`].
#[no_mangle]
pub unsafe extern "C" fn rootfind_last_error_method() -> *const c_char {
    error::last_error_method()
}

/// Gets the status code of the last failure on the calling thread.
///
/// Returns `ROOTFIND_CONVERGED` when no failure is recorded.
#[no_mangle]
pub extern "C" fn rootfind_last_error_code() -> c_int {
    error::last_error_code()
}

/// Clears the last error message.
#[no_mangle]
pub extern "C" fn rootfind_clear_error() {
    error::clear_error();
}

// ============================================================================
// Version Information
// ============================================================================

/// Returns the library version string.
///
/// # Safety
///
/// The returned string is statically allocated and valid for the lifetime of the program.
#[no_mangle]
pub extern "C" fn rootfind_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast()
}
