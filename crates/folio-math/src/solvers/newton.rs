//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolveMethod, SolverConfig, SolverResult};

/// Derivatives smaller than this are treated as zero.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Steps larger than this mean the iteration has run away.
const MAX_STEP: f64 = 1e10;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// `fdf` returns `(f(x), f'(x))` from a single evaluation, so sums that share
/// work between the value and the derivative (discount factors, for example)
/// are only computed once per iteration.
///
/// If `config.lower_bound` is set, an iterate that would fall below it is
/// clamped onto the bound before the next evaluation.
///
/// # Errors
///
/// - `DivisionByZero` when the derivative vanishes
/// - `InvalidInput` when an evaluation is not finite or a step runs away
/// - `ConvergenceFailed` when the iteration cap is hit, or when the iterate
///   is pinned on the lower bound
///
/// # Example
///
/// ```rust
/// use folio_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let fdf = |x: f64| (x * x - 2.0, 2.0 * x);
///
/// let result = newton_raphson(fdf, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F>(fdf: F, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> (f64, f64),
{
    let mut x = config.clamp(initial_guess);
    let mut last_residual = f64::NAN;

    for iteration in 0..config.max_iterations {
        let (fx, dfx) = fdf(x);
        last_residual = fx;

        if !fx.is_finite() || !dfx.is_finite() {
            return Err(MathError::invalid_input(format!(
                "non-finite evaluation at x = {x}"
            )));
        }

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                method: SolveMethod::NewtonRaphson,
            });
        }

        if dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        if step.abs() > MAX_STEP {
            return Err(MathError::invalid_input("Newton step too large"));
        }

        let unclamped = x - step;
        let next = config.clamp(unclamped);

        if next != unclamped && next == x {
            // Pushed below the floor twice in a row: no root in the domain
            // along this path.
            return Err(MathError::convergence_failed(iteration + 1, fx.abs()));
        }

        if next == unclamped && step.abs() < config.tolerance {
            let (final_fx, _) = fdf(next);
            return Ok(SolverResult {
                root: next,
                iterations: iteration + 1,
                residual: final_fx,
                method: SolveMethod::NewtonRaphson,
            });
        }

        x = next;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        last_residual.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let fdf = |x: f64| (x * x - 2.0, 2.0 * x);

        let result = newton_raphson(fdf, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
        assert_eq!(result.method, SolveMethod::NewtonRaphson);
    }

    #[test]
    fn test_cube_root() {
        let fdf = |x: f64| (x * x * x - 27.0, 3.0 * x * x);

        let result = newton_raphson(fdf, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_derivative_error() {
        let fdf = |x: f64| (x * x * x - 1.0, 3.0 * x * x);

        let result = newton_raphson(fdf, 0.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_iteration_cap() {
        // Converges, just not in two steps
        let fdf = |x: f64| (x.exp() - 10.0, x.exp());
        let config = SolverConfig::new(1e-12, 2);

        let result = newton_raphson(fdf, 0.0, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 2, .. })
        ));
    }

    #[test]
    fn test_lower_bound_clamps_overshoot() {
        // Root of 1/(1+r) - 2 is r = -0.5; the first step from 0.1 lands below -1.
        let fdf = |r: f64| (1.0 / (1.0 + r) - 2.0, -1.0 / (1.0 + r).powi(2));
        let config = SolverConfig::new(1e-12, 100).with_lower_bound(-0.999999);

        let result = newton_raphson(fdf, 3.0, &config).unwrap();

        assert_relative_eq!(result.root, -0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_pinned_on_lower_bound_fails() {
        // Strictly increasing with its root at -2, below the floor
        let fdf = |x: f64| (x + 2.0, 1.0);
        let config = SolverConfig::new(1e-12, 100).with_lower_bound(-1.0);

        let result = newton_raphson(fdf, 0.0, &config);

        assert!(matches!(result, Err(MathError::ConvergenceFailed { .. })));
    }

    #[test]
    fn test_non_finite_evaluation() {
        let fdf = |x: f64| (1.0 / x, -1.0 / (x * x));

        let result = newton_raphson(fdf, 0.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }
}
