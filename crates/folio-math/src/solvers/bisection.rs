//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolveMethod, SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the interval and keeps the half whose endpoints still
/// have opposite signs.
///
/// Requires: `f(a)` and `f(b)` of opposite signs. Infinite endpoint values
/// are fine (only their sign is used); NaN is rejected.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - Lower bound of the bracket
/// * `b` - Upper bound of the bracket
/// * `config` - Solver configuration (`lower_bound` is ignored)
///
/// # Example
///
/// ```rust
/// use folio_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo.is_nan() || f_hi.is_nan() {
        return Err(MathError::invalid_input(format!(
            "NaN at bracket endpoint: f({lo}) = {f_lo}, f({hi}) = {f_hi}"
        )));
    }

    if f_lo.abs() < config.tolerance {
        return Ok(done(lo, 0, f_lo));
    }
    if f_hi.abs() < config.tolerance {
        return Ok(done(hi, 0, f_hi));
    }

    // Compare signs rather than multiplying: the endpoint values can be huge.
    if (f_lo < 0.0) == (f_hi < 0.0) {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = (lo + hi) / 2.0;
        let f_mid = f(mid);

        if f_mid.is_nan() {
            return Err(MathError::invalid_input(format!("NaN at x = {mid}")));
        }

        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.tolerance {
            return Ok(done(mid, iteration + 1, f_mid));
        }

        if (f_mid < 0.0) == (f_lo < 0.0) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    let mid = (lo + hi) / 2.0;
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}

fn done(root: f64, iterations: u32, residual: f64) -> SolverResult {
    SolverResult {
        root,
        iterations,
        residual,
        method: SolveMethod::Bisection,
    }
}
