//! # Rootfind
//!
//! Scalar root-finding for tight numerical loops.
//!
//! This crate provides:
//!
//! - **Open methods**: Newton-Raphson, Secant, Halley
//! - **Bracketing methods**: Bisection, Ridder, Brent (`brentq`) and
//!   Brent with hyperbolic extrapolation (`brenth`)
//! - **Callbacks**: user functions of the form `f(x, &args)`, where `args` is any
//!   caller-owned parameter bundle passed through untouched
//! - **Diagnostics**: a fixed-shape [`FullOutput`] record filled in identically
//!   by every method
//!
//! ## Call Shapes
//!
//! Every method has two entry points over one iteration routine:
//!
//! - `method(...)` returns the bare root and raises a [`RootError`] on failure
//! - `method_full(...)` returns a [`FullOutput`] and never raises
//!
//! ```rust
//! use rootfind::solvers::{brentq, brentq_full, BracketConfig};
//! use rootfind::ErrorCode;
//!
//! struct Params {
//!     c0: f64,
//!     c1: f64,
//! }
//!
//! let f = |x: f64, p: &Params| p.c0 - (-(x - p.c1)).exp();
//! let params = Params { c0: 1.0, c1: 0.7 };
//! let config = BracketConfig::default();
//!
//! let root = brentq(f, 0.5, 1.0, &params, &config).unwrap();
//! assert!((root - 0.7).abs() < 1e-3);
//!
//! let out = brentq_full(f, 0.5, 1.0, &params, &config);
//! assert_eq!(out.error_code, ErrorCode::Converged);
//! assert!(out.function_calls >= 2);
//! ```
//!
//! ## Design Philosophy
//!
//! - **No allocation per solve**: callbacks are generic, arguments are borrowed
//! - **Uniform diagnostics**: one record shape and error taxonomy for all methods
//! - **Reference semantics**: convergence tests follow the classical algorithms

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod callback;
pub mod error;
pub mod output;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::callback::{array_callback, ArgArray, NoopObserver, Observer, Step, MAX_ARGS};
    pub use crate::error::{RootError, RootResult};
    pub use crate::output::{ErrorCode, FullOutput, SolverWarning};
    pub use crate::solvers::{
        bisect, bisect_full, brenth, brenth_full, brentq, brentq_full, halley, halley_full,
        newton, newton_full, ridder, ridder_full, secant, secant_full, BracketConfig,
        BracketMethod, OpenConfig,
    };
}

pub use error::{RootError, RootResult};
pub use output::{ErrorCode, FullOutput, SolverWarning};
