//! Money-weighted annualized return (XIRR).
//!
//! XIRR is the rate `r` that zeroes the net present value of a set of dated
//! cash flows:
//!
//! ```text
//! NPV(r) = Σ a_i / (1 + r)^(t_i)
//! ```
//!
//! where `t_i` is the year fraction from the first flow to flow `i`. The
//! root is found with Newton-Raphson from a configured guess; if Newton
//! fails, bisection searches a fixed bracket.

use std::fmt;

use folio_core::daycounts::DayCount;
use folio_core::types::CashFlowSchedule;
use folio_math::error::MathError;
use folio_math::solvers::{hybrid, SolveMethod};
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cashflows::classify_cash_flows;
use crate::config::XirrConfig;

/// Why no XIRR exists for a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NotComputableReason {
    /// Fewer than two cash flows.
    InsufficientFlows {
        /// Number of flows present.
        count: usize,
    },
    /// All non-zero flows have the same sign.
    SameSignFlows,
    /// Every flow falls on the same date, so no time passes.
    ZeroTimeSpan,
    /// A cash flow amount does not fit in a `Decimal`.
    AmountOverflow,
    /// NPV has the same sign at both ends of the bisection bracket.
    NoBracket,
    /// Neither Newton-Raphson nor bisection converged.
    NoConvergence,
}

impl fmt::Display for NotComputableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotComputableReason::InsufficientFlows { count } => {
                write!(f, "need at least 2 cash flows, got {count}")
            }
            NotComputableReason::SameSignFlows => {
                write!(f, "cash flows need both an inflow and an outflow")
            }
            NotComputableReason::ZeroTimeSpan => write!(f, "all cash flows are on one date"),
            NotComputableReason::AmountOverflow => write!(f, "cash flow amount overflows"),
            NotComputableReason::NoBracket => write!(f, "no rate in the search bracket"),
            NotComputableReason::NoConvergence => write!(f, "solver did not converge"),
        }
    }
}

/// A computed XIRR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xirr {
    /// Annualized rate as a percentage (12.5 = 12.5%), unrounded.
    pub rate: f64,
    /// Iterations used by the method that converged.
    pub iterations: u32,
    /// Method that converged.
    pub method: SolveMethod,
}

/// The result of an XIRR calculation.
///
/// Not being able to compute a rate is an expected outcome for many real
/// positions (a single buy with no price, a position opened today), so it
/// is a value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum XirrOutcome {
    /// A rate was found.
    Computed(Xirr),
    /// No rate exists or none was found.
    NotComputable(NotComputableReason),
}

impl XirrOutcome {
    /// Returns the rate in percent, or `None` when not computable.
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        match self {
            XirrOutcome::Computed(xirr) => Some(xirr.rate),
            XirrOutcome::NotComputable(_) => None,
        }
    }

    /// Returns true if a rate was found.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self, XirrOutcome::Computed(_))
    }
}

impl fmt::Display for XirrOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XirrOutcome::Computed(xirr) => write!(f, "{:.2}%", xirr.rate),
            XirrOutcome::NotComputable(reason) => write!(f, "N/A ({reason})"),
        }
    }
}

/// Converts a schedule into `(year fraction, amount)` pairs measured from
/// its first flow.
fn time_amounts(flows: &CashFlowSchedule, day_count: &dyn DayCount) -> Vec<(f64, f64)> {
    let Some(start) = flows.first_date() else {
        return Vec::new();
    };

    flows
        .iter()
        .map(|cf| {
            (
                to_f64(day_count.year_fraction(start, cf.date())),
                to_f64(cf.amount()),
            )
        })
        .collect()
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// NPV and its derivative with respect to `r`, in one pass.
fn npv_and_derivative(points: &[(f64, f64)], r: f64) -> (f64, f64) {
    let growth = 1.0 + r;
    points.iter().fold((0.0, 0.0), |(npv, dnpv), &(t, a)| {
        let disc = growth.powf(-t);
        (npv + a * disc, dnpv - t * a * disc / growth)
    })
}

/// Net present value of a schedule at `rate` (decimal, 0.1 = 10%).
///
/// Flows are discounted to the date of the first flow.
#[must_use]
pub fn xnpv(flows: &CashFlowSchedule, rate: f64, day_count: &dyn DayCount) -> f64 {
    npv_and_derivative(&time_amounts(flows, day_count), rate).0
}

/// Solves for the XIRR of a schedule.
///
/// Flows are used in schedule order; the first flow is time zero.
///
/// # Example
///
/// ```rust
/// use folio_core::types::{CashFlow, CashFlowSchedule, CashFlowType, Date};
/// use folio_returns::config::XirrConfig;
/// use folio_returns::xirr::solve_xirr;
/// use rust_decimal_macros::dec;
///
/// let start = Date::from_ymd(2023, 1, 1).unwrap();
/// let mut flows = CashFlowSchedule::new();
/// flows.push(CashFlow::new(start, dec!(-100), CashFlowType::Buy));
/// flows.push(CashFlow::terminal(start.add_days(365), dec!(110)));
///
/// let rate = solve_xirr(&flows, &XirrConfig::default()).rate().unwrap();
/// assert!((rate - 10.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn solve_xirr(flows: &CashFlowSchedule, config: &XirrConfig) -> XirrOutcome {
    if let Some(reason) = classify_cash_flows(flows) {
        return XirrOutcome::NotComputable(reason);
    }

    let day_count = config.day_count.to_day_count();
    let points = time_amounts(flows, day_count.as_ref());

    let result = hybrid(
        |r| npv_and_derivative(&points, r),
        config.initial_guess,
        (config.bisection_lower, config.bisection_upper),
        &config.newton_config(),
        &config.bisection_config(),
    );

    match result {
        Ok(solution) => {
            debug!(
                "XIRR {:.6} via {} after {} iterations",
                solution.root, solution.method, solution.iterations
            );
            XirrOutcome::Computed(Xirr {
                rate: solution.root * 100.0,
                iterations: solution.iterations,
                method: solution.method,
            })
        }
        Err(MathError::InvalidBracket { fa, fb, .. }) => {
            debug!("XIRR not bracketed: NPV {fa:.4e} and {fb:.4e} at the bracket ends");
            XirrOutcome::NotComputable(NotComputableReason::NoBracket)
        }
        Err(err) => {
            debug!("XIRR did not converge: {err}");
            XirrOutcome::NotComputable(NotComputableReason::NoConvergence)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use folio_core::daycounts::{Act365Fixed, DayCountConvention};
    use folio_core::types::{CashFlow, CashFlowType, Date};
    use rust_decimal_macros::dec;

    fn schedule(flows: &[(i64, Decimal)]) -> CashFlowSchedule {
        let start = Date::from_ymd(2022, 1, 3).unwrap();
        flows
            .iter()
            .map(|&(days, amount)| {
                let kind = if amount < Decimal::ZERO {
                    CashFlowType::Buy
                } else {
                    CashFlowType::Sell
                };
                CashFlow::new(start.add_days(days), amount, kind)
            })
            .collect()
    }

    #[test]
    fn test_ten_percent() {
        let flows = schedule(&[(0, dec!(-100)), (365, dec!(110))]);

        let outcome = solve_xirr(&flows, &XirrConfig::default());

        let XirrOutcome::Computed(xirr) = outcome else {
            panic!("expected a rate, got {outcome:?}");
        };
        assert_relative_eq!(xirr.rate, 10.0, epsilon = 1e-6);
        assert_eq!(xirr.method, SolveMethod::NewtonRaphson);
    }

    #[test]
    fn test_half_year() {
        // 10% over 182 days annualizes to about 21.06%
        let flows = schedule(&[(0, dec!(-1000)), (182, dec!(1100))]);

        let rate = solve_xirr(&flows, &XirrConfig::default()).rate().unwrap();

        assert_relative_eq!(rate, 21.063_382, epsilon = 1e-4);
    }

    #[test]
    fn test_irregular_flows() {
        let flows = schedule(&[
            (0, dec!(-1000)),
            (100, dec!(-500)),
            (250, dec!(300)),
            (400, dec!(1400)),
        ]);

        let rate = solve_xirr(&flows, &XirrConfig::default()).rate().unwrap();

        assert_relative_eq!(rate, 14.381_429, epsilon = 1e-4);
    }

    #[test]
    fn test_large_loss_recovers_from_floor() {
        // The first Newton step lands below -100% and is clamped
        let flows = schedule(&[(0, dec!(-100)), (365, dec!(50))]);

        let outcome = solve_xirr(&flows, &XirrConfig::default());

        assert_relative_eq!(outcome.rate().unwrap(), -50.0, epsilon = 1e-6);
        assert!(outcome.is_computed());
    }

    #[test]
    fn test_bisection_fallback() {
        // NPV'(0.1) is exactly zero, so Newton cannot move from the guess.
        // The only rate inside the bracket is about -43.40%.
        let flows = schedule(&[(0, dec!(-10)), (365, dec!(200)), (730, dec!(-110))]);

        let outcome = solve_xirr(&flows, &XirrConfig::default());

        let XirrOutcome::Computed(xirr) = outcome else {
            panic!("expected a rate, got {outcome:?}");
        };
        assert_eq!(xirr.method, SolveMethod::Bisection);
        assert_relative_eq!(xirr.rate, -43.398_113, epsilon = 1e-4);
    }

    #[test]
    fn test_no_bracket() {
        // Rates are about -43% and 1843%, neither inside [0, 5], so NPV
        // is positive at both ends. Newton is stuck on a flat start.
        let flows = schedule(&[(0, dec!(-10)), (365, dec!(200)), (730, dec!(-110))]);
        let config = XirrConfig::default()
            .with_bracket(0.0, 5.0)
            .with_max_iterations(1);

        let outcome = solve_xirr(&flows, &config);

        assert_eq!(
            outcome,
            XirrOutcome::NotComputable(NotComputableReason::NoBracket)
        );
    }

    #[test]
    fn test_not_computable_inputs() {
        let single = schedule(&[(0, dec!(-100))]);
        assert_eq!(
            solve_xirr(&single, &XirrConfig::default()),
            XirrOutcome::NotComputable(NotComputableReason::InsufficientFlows { count: 1 })
        );

        let outflows = schedule(&[(0, dec!(-100)), (30, dec!(-50))]);
        assert_eq!(
            solve_xirr(&outflows, &XirrConfig::default()),
            XirrOutcome::NotComputable(NotComputableReason::SameSignFlows)
        );
    }

    #[test]
    fn test_round_trip_is_zero() {
        let flows = schedule(&[(0, dec!(-500)), (200, dec!(500))]);

        let rate = solve_xirr(&flows, &XirrConfig::default()).rate().unwrap();

        assert!(rate.abs() < 1e-6);
    }

    #[test]
    fn test_xnpv_at_solution_is_zero() {
        let flows = schedule(&[(0, dec!(-1000)), (90, dec!(-250)), (500, dec!(1500))]);
        let rate = solve_xirr(&flows, &XirrConfig::default()).rate().unwrap();

        let npv = xnpv(&flows, rate / 100.0, &Act365Fixed);

        assert!(npv.abs() < 1e-6);
    }

    #[test]
    fn test_act360_annualizes_differently() {
        let flows = schedule(&[(0, dec!(-100)), (360, dec!(110))]);
        let config = XirrConfig::default().with_day_count(DayCountConvention::Act360);

        let rate = solve_xirr(&flows, &config).rate().unwrap();

        assert_relative_eq!(rate, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_outcome_serde() {
        let computed = XirrOutcome::Computed(Xirr {
            rate: 12.5,
            iterations: 4,
            method: SolveMethod::NewtonRaphson,
        });
        let json = serde_json::to_value(computed).unwrap();
        assert_eq!(json["status"], "computed");
        assert_eq!(json["detail"]["method"], "newton_raphson");

        let missing = XirrOutcome::NotComputable(NotComputableReason::SameSignFlows);
        let json = serde_json::to_value(missing).unwrap();
        assert_eq!(json["status"], "not_computable");
        assert_eq!(json["detail"]["reason"], "same_sign_flows");
    }

    #[test]
    fn test_display() {
        let outcome = XirrOutcome::Computed(Xirr {
            rate: 9.876,
            iterations: 3,
            method: SolveMethod::NewtonRaphson,
        });
        assert_eq!(outcome.to_string(), "9.88%");

        let none = XirrOutcome::NotComputable(NotComputableReason::NoBracket);
        assert!(none.to_string().starts_with("N/A"));
    }
}
