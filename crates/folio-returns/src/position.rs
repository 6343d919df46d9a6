//! Position reconciliation with average-cost accounting.
//!
//! Trades are replayed in date order against a signed position. Trades that
//! extend the position add to its cost basis; trades against it close
//! quantity at the running average cost and realize the difference. A trade
//! larger than the open quantity closes it and opens the opposite side at
//! the trade price.

use folio_core::types::{Date, Trade};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cashflows::sort_trades;
use crate::config::XirrConfig;
use crate::stock::xirr_for_trades;

/// Reconciled state of one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    /// Instrument symbol.
    pub symbol: String,
    /// Account, if any.
    pub account: Option<String>,
    /// Signed open quantity: positive long, negative short.
    pub net_quantity: Decimal,
    /// Average cost per unit of the open quantity (zero when flat).
    pub average_cost: Decimal,
    /// Cost of the open quantity.
    pub cost_basis: Decimal,
    /// P&L locked in by closing trades.
    pub realized_pnl: Decimal,
    /// Mark price, if known.
    pub current_price: Option<Decimal>,
    /// `net_quantity * current_price`, `None` when unpriced or when the
    /// product overflows `Decimal`.
    pub market_value: Option<Decimal>,
    /// `(current_price - average_cost) * net_quantity`.
    pub unrealized_pnl: Option<Decimal>,
    /// Units bought.
    pub total_bought: Decimal,
    /// Units sold.
    pub total_sold: Decimal,
    /// Number of trades.
    pub trade_count: usize,
    /// Earliest trade date.
    pub first_trade: Option<Date>,
    /// Latest trade date.
    pub last_trade: Option<Date>,
    /// Annualized money-weighted return in percent.
    pub xirr: Option<f64>,
}

impl PositionSummary {
    /// Returns true if quantity is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.net_quantity.is_zero()
    }

    /// Realized plus unrealized P&L; `None` for an open, unpriced position.
    #[must_use]
    pub fn total_pnl(&self) -> Option<Decimal> {
        match self.unrealized_pnl {
            Some(unrealized) => Some(self.realized_pnl + unrealized),
            None if !self.is_open() => Some(self.realized_pnl),
            None => None,
        }
    }
}

/// Running average-cost book for one position.
#[derive(Debug, Clone, Copy, Default)]
struct CostBook {
    quantity: Decimal,
    cost_basis: Decimal,
    realized: Decimal,
}

impl CostBook {
    fn apply(&mut self, trade: &Trade) {
        let signed = trade.signed_quantity();
        let price = trade.price();

        let extends = self.quantity.is_zero()
            || self.quantity.is_sign_positive() == signed.is_sign_positive();

        if extends {
            self.quantity += signed;
            self.cost_basis += trade.notional();
            return;
        }

        let open = self.quantity.abs();
        let closing = open.min(trade.quantity());
        let average = self.cost_basis / open;

        self.realized += if self.quantity > Decimal::ZERO {
            (price - average) * closing
        } else {
            (average - price) * closing
        };

        let remaining = trade.quantity() - closing;
        self.quantity += signed;

        if closing == open {
            // Flat, or flipped: whatever is left opens at the trade price
            self.cost_basis = remaining * price;
        } else {
            self.cost_basis -= average * closing;
        }
    }

    fn average_cost(&self) -> Decimal {
        if self.quantity.is_zero() {
            Decimal::ZERO
        } else {
            self.cost_basis / self.quantity.abs()
        }
    }
}

/// Sum of signed trade quantities.
#[must_use]
pub fn net_quantity(trades: &[Trade]) -> Decimal {
    trades.iter().map(Trade::signed_quantity).sum()
}

/// Reconciles one position's trades.
///
/// `trades` should all belong to the same symbol and account; the summary
/// takes both from the first trade in input order. An open position
/// without a price has no market value, unrealized P&L or XIRR.
///
/// # Example
///
/// ```rust
/// use folio_core::types::{Date, Trade, TradeSide};
/// use folio_returns::config::XirrConfig;
/// use folio_returns::position::reconcile_position;
/// use rust_decimal_macros::dec;
///
/// let d = Date::from_ymd(2024, 1, 2).unwrap();
/// let trades = vec![
///     Trade::new("AAPL", d, TradeSide::Buy, dec!(10), dec!(100)).unwrap(),
///     Trade::new("AAPL", d.add_days(30), TradeSide::Buy, dec!(10), dec!(120)).unwrap(),
///     Trade::new("AAPL", d.add_days(60), TradeSide::Sell, dec!(5), dec!(130)).unwrap(),
/// ];
///
/// let summary = reconcile_position(&trades, Some(dec!(140)), d.add_days(90), &XirrConfig::default());
///
/// assert_eq!(summary.net_quantity, dec!(15));
/// assert_eq!(summary.average_cost, dec!(110));
/// assert_eq!(summary.realized_pnl, dec!(100));
/// assert_eq!(summary.unrealized_pnl, Some(dec!(450)));
/// ```
#[must_use]
pub fn reconcile_position(
    trades: &[Trade],
    current_price: Option<Decimal>,
    valuation_date: Date,
    config: &XirrConfig,
) -> PositionSummary {
    let sorted = sort_trades(trades);

    let mut book = CostBook::default();
    let mut total_bought = Decimal::ZERO;
    let mut total_sold = Decimal::ZERO;

    for trade in &sorted {
        book.apply(trade);
        if trade.is_buy() {
            total_bought += trade.quantity();
        } else {
            total_sold += trade.quantity();
        }
    }

    let symbol = trades.first().map(|t| t.symbol().to_string()).unwrap_or_default();
    let account = trades.first().and_then(|t| t.account().map(str::to_string));
    let average_cost = book.average_cost();

    if book.quantity.is_zero() {
        debug!("{symbol}: position closed, realized {}", book.realized);
    } else if current_price.is_none() {
        warn!(
            "{symbol}: no price for open quantity {}, skipping valuation",
            book.quantity
        );
    }

    let market_value = current_price.and_then(|price| book.quantity.checked_mul(price));
    let unrealized_pnl = current_price
        .and_then(|price| price.checked_sub(average_cost))
        .and_then(|gain| gain.checked_mul(book.quantity));
    if current_price.is_some() && (market_value.is_none() || unrealized_pnl.is_none()) {
        warn!("{symbol}: valuation overflows at price {current_price:?}");
    }

    // An open position has no terminal value without a price
    let xirr = if current_price.is_some() || book.quantity.is_zero() {
        xirr_for_trades(
            trades,
            current_price.unwrap_or_default(),
            book.quantity,
            valuation_date,
            config,
        )
        .rate()
    } else {
        None
    };

    PositionSummary {
        symbol,
        account,
        net_quantity: book.quantity,
        average_cost,
        cost_basis: book.cost_basis,
        realized_pnl: book.realized,
        current_price,
        market_value,
        unrealized_pnl,
        total_bought,
        total_sold,
        trade_count: trades.len(),
        first_trade: sorted.first().map(|t| t.date()),
        last_trade: sorted.last().map(|t| t.date()),
        xirr,
    }
}
