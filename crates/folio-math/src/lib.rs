//! # Folio Math
//!
//! Numerical utilities for the Folio portfolio returns engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, Bisection, and a
//!   Newton-with-bisection-fallback hybrid)
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Domain floors, divergence checks, bracketing fallback
//! - **Explicit Failure**: Every non-convergence is a typed [`MathError`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, hybrid, newton_raphson, SolveMethod, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
