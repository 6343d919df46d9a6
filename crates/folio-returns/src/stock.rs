//! Per-stock XIRR entry points.
//!
//! These functions take a single instrument's trades, the price the open
//! quantity is marked at, and the open quantity itself, and return the
//! annualized money-weighted return in percent.

use folio_core::types::{Date, Trade};
use rust_decimal::Decimal;

use crate::cashflows::build_cash_flows;
use crate::config::XirrConfig;
use crate::xirr::{solve_xirr, XirrOutcome};

/// Computes the full XIRR outcome for one instrument's trades.
///
/// `net_quantity` is taken as given; it is not re-derived from `trades`.
#[must_use]
pub fn xirr_for_trades(
    trades: &[Trade],
    current_price: Decimal,
    net_quantity: Decimal,
    valuation_date: Date,
    config: &XirrConfig,
) -> XirrOutcome {
    match build_cash_flows(trades, current_price, net_quantity, valuation_date) {
        Ok(flows) => solve_xirr(&flows, config),
        Err(reason) => XirrOutcome::NotComputable(reason),
    }
}

/// XIRR in percent with custom solver settings, or `None` if not computable.
#[must_use]
pub fn calculate_stock_xirr_with(
    trades: &[Trade],
    current_price: Decimal,
    net_quantity: Decimal,
    valuation_date: Date,
    config: &XirrConfig,
) -> Option<f64> {
    xirr_for_trades(trades, current_price, net_quantity, valuation_date, config).rate()
}

/// XIRR in percent as of `valuation_date`, or `None` if not computable.
///
/// # Example
///
/// ```rust
/// use folio_core::types::{Date, Trade, TradeSide};
/// use folio_returns::calculate_stock_xirr_as_of;
/// use rust_decimal_macros::dec;
///
/// let bought = Date::from_ymd(2023, 5, 1).unwrap();
/// let trades = vec![Trade::new("NVDA", bought, TradeSide::Buy, dec!(1), dec!(100)).unwrap()];
///
/// let xirr = calculate_stock_xirr_as_of(&trades, dec!(110), dec!(1), bought.add_days(365));
/// assert!((xirr.unwrap() - 10.0).abs() < 0.01);
///
/// // No price for an open position: nothing to compare the outlay with
/// let none = calculate_stock_xirr_as_of(&trades, dec!(0), dec!(1), bought.add_days(365));
/// assert!(none.is_none());
/// ```
#[must_use]
pub fn calculate_stock_xirr_as_of(
    trades: &[Trade],
    current_price: Decimal,
    net_quantity: Decimal,
    valuation_date: Date,
) -> Option<f64> {
    calculate_stock_xirr_with(
        trades,
        current_price,
        net_quantity,
        valuation_date,
        &XirrConfig::default(),
    )
}

/// XIRR in percent, valuing any open quantity today.
#[must_use]
pub fn calculate_stock_xirr(
    trades: &[Trade],
    current_price: Decimal,
    net_quantity: Decimal,
) -> Option<f64> {
    calculate_stock_xirr_as_of(trades, current_price, net_quantity, Date::today())
}
