//! Domain types for trade and cash flow analytics.
//!
//! - [`Date`]: Calendar date of a trade or cash flow
//! - [`Trade`]: A validated buy or sell execution
//! - [`CashFlow`]: Signed, dated monetary event derived from trades
//! - [`CashFlowSchedule`]: Ordered collection of cash flows

mod cashflow;
mod date;
mod trade;

pub use cashflow::{CashFlow, CashFlowSchedule, CashFlowType};
pub use date::Date;
pub use trade::{Trade, TradeSide};
