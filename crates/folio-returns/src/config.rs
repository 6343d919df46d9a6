//! Configuration for the returns engine.

use std::collections::BTreeMap;

use folio_core::daycounts::DayCountConvention;
use folio_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ReturnsError, ReturnsResult};

/// Solver settings for XIRR.
///
/// Defaults: Newton-Raphson from 10% with `|NPV| < 1e-7` and at most 100
/// iterations; iterates below `-0.999999` are clamped; on failure, bisection
/// over `(-0.9999, 10)` for at most 100 steps; ACT/365 Fixed year fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XirrConfig {
    /// Newton starting rate (decimal, 0.1 = 10%).
    pub initial_guess: f64,

    /// Convergence tolerance on `|NPV(r)|`.
    pub tolerance: f64,

    /// Newton iteration cap.
    pub max_iterations: u32,

    /// Lower end of the bisection bracket.
    pub bisection_lower: f64,

    /// Upper end of the bisection bracket.
    pub bisection_upper: f64,

    /// Bisection step cap.
    pub bisection_iterations: u32,

    /// Newton iterates below this rate are clamped onto it.
    /// Must stay above -1, where `(1 + r)^t` stops being defined.
    pub rate_floor: f64,

    /// Day count used for the discounting exponent.
    pub day_count: DayCountConvention,
}

impl Default for XirrConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.1,
            tolerance: 1e-7,
            max_iterations: 100,
            bisection_lower: -0.9999,
            bisection_upper: 10.0,
            bisection_iterations: 100,
            rate_floor: -0.999_999,
            day_count: DayCountConvention::Act365Fixed,
        }
    }
}

impl XirrConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Newton starting rate.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the Newton iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the bisection bracket.
    #[must_use]
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.bisection_lower = lower;
        self.bisection_upper = upper;
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Solver settings for the Newton phase.
    #[must_use]
    pub fn newton_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations).with_lower_bound(self.rate_floor)
    }

    /// Solver settings for the bisection phase.
    #[must_use]
    pub fn bisection_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.bisection_iterations)
    }

    /// Checks that the settings describe a solvable problem.
    ///
    /// # Errors
    ///
    /// Returns `ReturnsError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> ReturnsResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ReturnsError::invalid_config(
                "xirr.tolerance",
                format!("must be positive, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ReturnsError::invalid_config(
                "xirr.max_iterations",
                "must be at least 1",
            ));
        }
        if self.bisection_iterations == 0 {
            return Err(ReturnsError::invalid_config(
                "xirr.bisection_iterations",
                "must be at least 1",
            ));
        }
        if !(self.rate_floor > -1.0) {
            return Err(ReturnsError::invalid_config(
                "xirr.rate_floor",
                format!("must be greater than -1, got {}", self.rate_floor),
            ));
        }
        if !(self.bisection_lower > -1.0) {
            return Err(ReturnsError::invalid_config(
                "xirr.bisection_lower",
                format!("must be greater than -1, got {}", self.bisection_lower),
            ));
        }
        if !(self.bisection_upper.is_finite() && self.bisection_upper > self.bisection_lower) {
            return Err(ReturnsError::invalid_config(
                "xirr.bisection_upper",
                format!(
                    "must be finite and above bisection_lower ({}), got {}",
                    self.bisection_lower, self.bisection_upper
                ),
            ));
        }
        if !(self.initial_guess.is_finite() && self.initial_guess > -1.0) {
            return Err(ReturnsError::invalid_config(
                "xirr.initial_guess",
                format!("must be finite and greater than -1, got {}", self.initial_guess),
            ));
        }
        Ok(())
    }
}

/// Configuration for portfolio reconciliation.
///
/// Controls parallelism, symbol renames and the XIRR solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnsConfig {
    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum group count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Symbol renames applied before grouping, old symbol to new symbol.
    /// Renames are applied once, not chained.
    pub symbol_aliases: BTreeMap<String, String>,

    /// XIRR solver settings.
    pub xirr: XirrConfig,
}

impl Default for ReturnsConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
            symbol_aliases: BTreeMap::new(),
            xirr: XirrConfig::default(),
        }
    }
}

impl ReturnsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Adds a symbol rename.
    #[must_use]
    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.symbol_aliases.insert(from.into(), to.into());
        self
    }

    /// Sets the XIRR solver settings.
    #[must_use]
    pub fn with_xirr(mut self, xirr: XirrConfig) -> Self {
        self.xirr = xirr;
        self
    }

    /// Returns the symbol a trade is reported under.
    #[must_use]
    pub fn resolve_symbol<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.symbol_aliases
            .get(symbol)
            .map_or(symbol, String::as_str)
    }

    /// Returns the old symbols renamed to `symbol`.
    pub fn aliases_of<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.symbol_aliases
            .iter()
            .filter(move |(_, to)| to.as_str() == symbol)
            .map(|(from, _)| from.as_str())
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks the solver settings and aliases.
    ///
    /// # Errors
    ///
    /// Returns `ReturnsError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> ReturnsResult<()> {
        self.xirr.validate()?;

        if let Some((from, _)) = self
            .symbol_aliases
            .iter()
            .find(|(from, to)| from.trim().is_empty() || to.trim().is_empty())
        {
            return Err(ReturnsError::invalid_config(
                "symbol_aliases",
                format!("blank symbol in rename of '{from}'"),
            ));
        }
        Ok(())
    }
}
