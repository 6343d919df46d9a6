//! Solver failures.

use thiserror::Error;

/// Result alias for the solvers.
pub type MathResult<T> = Result<T, MathError>;

/// Why a root finder stopped without a root.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The iteration cap was reached.
    #[error("no root after {iterations} iterations, |f| = {residual:.2e}")]
    ConvergenceFailed {
        /// Iterations performed.
        iterations: u32,
        /// `|f|` at the last iterate.
        residual: f64,
    },

    /// `f(a)` and `f(b)` do not straddle zero.
    #[error("[{a}, {b}] does not bracket a root: f(a) = {fa:.2e}, f(b) = {fb:.2e}")]
    InvalidBracket {
        /// Left end.
        a: f64,
        /// Right end.
        b: f64,
        /// `f(a)`.
        fa: f64,
        /// `f(b)`.
        fb: f64,
    },

    /// A derivative too small to divide by.
    #[error("derivative vanished ({value:.2e})")]
    DivisionByZero {
        /// The derivative.
        value: f64,
    },

    /// Bad arguments, or an iterate that is no longer a finite number.
    #[error("invalid solver input: {reason}")]
    InvalidInput {
        /// What went wrong.
        reason: String,
    },
}

impl MathError {
    /// Iteration cap reached at `residual`.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Invalid argument or iterate.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            MathError::convergence_failed(100, 1e-6).to_string(),
            "no root after 100 iterations, |f| = 1.00e-6"
        );

        let bracket = MathError::InvalidBracket {
            a: -0.5,
            b: 10.0,
            fa: 1.0,
            fb: 2.0,
        };
        assert!(bracket.to_string().starts_with("[-0.5, 10] does not bracket"));
    }
}
