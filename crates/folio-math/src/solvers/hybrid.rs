//! Hybrid root-finding algorithm.
//!
//! Newton-Raphson with a bisection fallback over a fixed bracket.

use log::debug;

use crate::error::MathResult;
use crate::solvers::{bisection, newton_raphson, SolverConfig, SolverResult};

/// Hybrid root-finding algorithm.
///
/// Starts with Newton-Raphson for fast quadratic convergence. If Newton
/// fails for any reason (iteration cap, vanishing derivative, runaway or
/// non-finite iterate, pinned on the lower bound) the root is searched for
/// again by bisection over `bounds`.
///
/// # Arguments
///
/// * `fdf` - Returns `(f(x), f'(x))`
/// * `initial_guess` - Starting point for Newton iteration
/// * `bounds` - Bracketing interval for the bisection fallback
/// * `newton` - Configuration for the Newton phase
/// * `fallback` - Configuration for the bisection phase
///
/// # Errors
///
/// Returns the bisection error when both phases fail; `InvalidBracket`
/// means `f` has the same sign at both ends of `bounds`.
///
/// # Example
///
/// ```rust
/// use folio_math::solvers::{hybrid, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let fdf = |x: f64| (x * x * x - x - 2.0, 3.0 * x * x - 1.0);
/// let config = SolverConfig::default();
///
/// let result = hybrid(fdf, 1.5, (1.0, 2.0), &config, &config).unwrap();
/// assert!((result.residual).abs() < 1e-10);
/// ```
pub fn hybrid<F>(
    fdf: F,
    initial_guess: f64,
    bounds: (f64, f64),
    newton: &SolverConfig,
    fallback: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> (f64, f64),
{
    match newton_raphson(&fdf, initial_guess, newton) {
        Ok(result) => Ok(result),
        Err(err) => {
            debug!(
                "Newton-Raphson from {} failed ({}); bisecting on [{}, {}]",
                initial_guess, err, bounds.0, bounds.1
            );
            bisection(|x| fdf(x).0, bounds.0, bounds.1, fallback)
        }
    }
}
