//! Signed, dated cash flows derived from trade history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Date, Trade, TradeSide};

/// Origin of a cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Purchase of units (outflow)
    Buy,
    /// Sale of units (inflow)
    Sell,
    /// Mark-to-market value of a still-open position at the valuation date
    Terminal,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Buy => "Buy",
            CashFlowType::Sell => "Sell",
            CashFlowType::Terminal => "Terminal",
        };
        write!(f, "{name}")
    }
}

/// A dated, signed cash flow.
///
/// Outflows (money invested) are negative, inflows (proceeds or terminal
/// value) are positive.
///
/// # Example
///
/// ```rust
/// use folio_core::types::{CashFlow, CashFlowType, Date};
/// use rust_decimal_macros::dec;
///
/// let cf = CashFlow::new(
///     Date::from_ymd(2025, 6, 15).unwrap(),
///     dec!(-2500),
///     CashFlowType::Buy,
/// );
/// assert!(cf.is_outflow());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Flow date
    date: Date,
    /// Signed amount
    amount: Decimal,
    /// Origin of the flow
    kind: CashFlowType,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: Decimal, kind: CashFlowType) -> Self {
        Self { date, amount, kind }
    }

    /// Creates the cash flow produced by a trade.
    ///
    /// A buy pays `quantity * price`, a sell receives it.
    #[must_use]
    pub fn from_trade(trade: &Trade) -> Self {
        match trade.side() {
            TradeSide::Buy => Self::new(trade.date(), -trade.notional(), CashFlowType::Buy),
            TradeSide::Sell => Self::new(trade.date(), trade.notional(), CashFlowType::Sell),
        }
    }

    /// Creates a terminal (liquidation value) cash flow.
    #[must_use]
    pub fn terminal(date: Date, value: Decimal) -> Self {
        Self::new(date, value, CashFlowType::Terminal)
    }

    /// Returns the flow date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the signed amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the flow type.
    #[must_use]
    pub fn kind(&self) -> CashFlowType {
        self.kind
    }

    /// Returns true for strictly positive amounts.
    #[must_use]
    pub fn is_inflow(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true for strictly negative amounts.
    #[must_use]
    pub fn is_outflow(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.date, self.amount, self.kind)
    }
}

/// An ordered schedule of cash flows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    cash_flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Creates a new empty cash flow schedule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cash_flows: Vec::new(),
        }
    }

    /// Creates a schedule with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cash_flows: Vec::with_capacity(capacity),
        }
    }

    /// Appends a cash flow to the schedule.
    pub fn push(&mut self, cf: CashFlow) {
        self.cash_flows.push(cf);
    }

    /// Returns the cash flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashFlow] {
        &self.cash_flows
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cash_flows.len()
    }

    /// Returns true if there are no cash flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cash_flows.is_empty()
    }

    /// Returns an iterator over the cash flows.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlow> {
        self.cash_flows.iter()
    }

    /// Returns the undiscounted sum of all cash flows.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cash_flows.iter().map(|cf| cf.amount).sum()
    }

    /// Returns the date of the first flow in schedule order.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.cash_flows.first().map(|cf| cf.date)
    }

    /// Returns true if any flow is strictly positive.
    #[must_use]
    pub fn has_inflow(&self) -> bool {
        self.cash_flows.iter().any(CashFlow::is_inflow)
    }

    /// Returns true if any flow is strictly negative.
    #[must_use]
    pub fn has_outflow(&self) -> bool {
        self.cash_flows.iter().any(CashFlow::is_outflow)
    }

    /// Sorts cash flows by date, keeping same-day flows in insertion order.
    pub fn sort_by_date(&mut self) {
        self.cash_flows.sort_by_key(|cf| cf.date);
    }
}

impl IntoIterator for CashFlowSchedule {
    type Item = CashFlow;
    type IntoIter = std::vec::IntoIter<CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.cash_flows.into_iter()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.cash_flows.iter()
    }
}

impl FromIterator<CashFlow> for CashFlowSchedule {
    fn from_iter<I: IntoIterator<Item = CashFlow>>(iter: I) -> Self {
        Self {
            cash_flows: iter.into_iter().collect(),
        }
    }
}
