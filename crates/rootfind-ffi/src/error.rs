//! Per-thread record of the last failed solve.

use std::cell::RefCell;
use std::ffi::CString;
use std::fmt::Display;

use libc::{c_char, c_int};
use rootfind::ErrorCode;

/// The failing entry point, its status code and the formatted message.
struct Failure {
    method: CString,
    code: ErrorCode,
    message: CString,
}

thread_local! {
    static LAST_FAILURE: RefCell<Option<Failure>> = const { RefCell::new(None) };
}

/// Records a failure of `method` for the calling thread.
///
/// The message reads `"<method>: <error>"`. Interior NUL bytes are dropped
/// so the record is never silently lost.
pub fn record_failure(method: &str, code: ErrorCode, error: impl Display) {
    let failure = Failure {
        method: c_string(method.to_owned()),
        code,
        message: c_string(format!("{method}: {error}")),
    };
    LAST_FAILURE.with(|cell| *cell.borrow_mut() = Some(failure));
}

fn c_string(s: String) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

/// Message of the last failure, or null if none is recorded.
pub fn last_error_message() -> *const c_char {
    LAST_FAILURE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |f| f.message.as_ptr())
    })
}

/// Name of the entry point that failed last, or null.
pub fn last_error_method() -> *const c_char {
    LAST_FAILURE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |f| f.method.as_ptr())
    })
}

/// Status code of the last failure; `0` when nothing is recorded.
pub fn last_error_code() -> c_int {
    LAST_FAILURE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(ErrorCode::Converged.code(), |f| f.code.code())
    })
}

/// Forgets the last failure.
pub fn clear_error() {
    LAST_FAILURE.with(|cell| *cell.borrow_mut() = None);
}
