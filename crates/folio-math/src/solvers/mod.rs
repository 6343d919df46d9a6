//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: Quadratic convergence, takes value and derivative in one closure
//! - [`bisection`]: Slow but guaranteed once a root is bracketed
//! - [`hybrid`]: Newton-Raphson first, bisection over a fixed bracket if Newton fails
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Guess + bracket |
//!
//! *When the bracket actually contains a sign change.
//!
//! # Example: Rate of return over one year
//!
//! ```rust
//! use folio_math::solvers::{hybrid, SolverConfig};
//!
//! // Pay 100 today, receive 110 in one year: NPV(r) = -100 + 110 / (1 + r)
//! let npv = |r: f64| {
//!     let f = -100.0 + 110.0 / (1.0 + r);
//!     let df = -110.0 / (1.0 + r).powi(2);
//!     (f, df)
//! };
//!
//! let config = SolverConfig::default().with_lower_bound(-0.999999);
//! let result = hybrid(npv, 0.05, (-0.9999, 10.0), &config, &config).unwrap();
//! assert!((result.root - 0.10).abs() < 1e-9);
//! ```

mod bisection;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use hybrid::hybrid;
pub use newton::newton_raphson;

use serde::{Deserialize, Serialize};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Smallest admissible iterate. Newton steps that land below it are
    /// clamped back onto it.
    pub lower_bound: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            lower_bound: None,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the smallest admissible iterate.
    #[must_use]
    pub fn with_lower_bound(mut self, lower_bound: f64) -> Self {
        self.lower_bound = Some(lower_bound);
        self
    }

    /// Clamps `x` onto the admissible domain.
    #[must_use]
    pub fn clamp(&self, x: f64) -> f64 {
        match self.lower_bound {
            Some(lb) if x < lb => lb,
            _ => x,
        }
    }
}

/// The algorithm that produced a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMethod {
    /// Newton-Raphson iteration converged.
    NewtonRaphson,
    /// Bracketing bisection converged.
    Bisection,
}

impl std::fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveMethod::NewtonRaphson => write!(f, "Newton-Raphson"),
            SolveMethod::Bisection => write!(f, "Bisection"),
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// Algorithm that converged.
    pub method: SolveMethod,
}
