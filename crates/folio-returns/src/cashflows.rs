//! Cash flow construction from trade history.

use folio_core::types::{CashFlow, CashFlowSchedule, Date, Trade};
use rust_decimal::Decimal;

use crate::xirr::NotComputableReason;

/// Returns the trades ordered by date.
///
/// The sort is stable: trades on the same day keep their input order,
/// whatever their side.
#[must_use]
pub fn sort_trades(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.date());
    sorted
}

/// Builds the cash flow schedule for one position.
///
/// Every trade contributes one flow in date order (buys negative, sells
/// positive). An open position (`net_quantity != 0`) adds a terminal flow of
/// `net_quantity * current_price` on `valuation_date`, as if liquidated at
/// that price. A short position therefore ends with a negative terminal flow.
///
/// # Errors
///
/// `AmountOverflow` if the terminal value does not fit in a `Decimal`.
///
/// # Example
///
/// ```rust
/// use folio_core::types::{CashFlowType, Date, Trade, TradeSide};
/// use folio_returns::cashflows::build_cash_flows;
/// use rust_decimal_macros::dec;
///
/// let bought = Date::from_ymd(2024, 1, 2).unwrap();
/// let trades = vec![Trade::new("AAPL", bought, TradeSide::Buy, dec!(10), dec!(100)).unwrap()];
///
/// let flows = build_cash_flows(&trades, dec!(110), dec!(10), bought.add_days(365)).unwrap();
///
/// assert_eq!(flows.len(), 2);
/// assert_eq!(flows.as_slice()[0].amount(), dec!(-1000));
/// assert_eq!(flows.as_slice()[1].amount(), dec!(1100));
/// assert_eq!(flows.as_slice()[1].kind(), CashFlowType::Terminal);
/// ```
pub fn build_cash_flows(
    trades: &[Trade],
    current_price: Decimal,
    net_quantity: Decimal,
    valuation_date: Date,
) -> Result<CashFlowSchedule, NotComputableReason> {
    let mut schedule = CashFlowSchedule::with_capacity(trades.len() + 1);

    for trade in sort_trades(trades) {
        schedule.push(CashFlow::from_trade(trade));
    }

    if !net_quantity.is_zero() {
        let value = net_quantity
            .checked_mul(current_price)
            .ok_or(NotComputableReason::AmountOverflow)?;
        schedule.push(CashFlow::terminal(valuation_date, value));
    }

    Ok(schedule)
}

/// Returns why a schedule has no XIRR, or `None` if one may exist.
///
/// A rate needs at least two flows, at least one strictly negative and at
/// least one strictly positive. Zero amounts count as neither. The flows
/// must also span more than one day: with every flow on the same date NPV
/// does not depend on the rate at all.
#[must_use]
pub fn classify_cash_flows(schedule: &CashFlowSchedule) -> Option<NotComputableReason> {
    if schedule.len() < 2 {
        return Some(NotComputableReason::InsufficientFlows {
            count: schedule.len(),
        });
    }
    if !(schedule.has_inflow() && schedule.has_outflow()) {
        return Some(NotComputableReason::SameSignFlows);
    }

    let mut dates = schedule.iter().map(CashFlow::date);
    let first = dates.next()?;
    if dates.all(|date| date == first) {
        return Some(NotComputableReason::ZeroTimeSpan);
    }
    None
}
