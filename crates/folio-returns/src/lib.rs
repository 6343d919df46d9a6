//! # Folio Returns
//!
//! Trade reconciliation and money-weighted return analytics.
//!
//! Given a raw, unordered stream of buy/sell trades this crate produces, per
//! symbol and account:
//!
//! - **Positions**: net quantity, average cost, cost basis
//! - **P&L**: realized (average-cost method) and unrealized at a mark price
//! - **XIRR**: annualized money-weighted return consistent with the actual
//!   timing of every cash flow
//!
//! ## Design Philosophy
//!
//! - **Pure Functions**: Every input is a parameter, nothing is cached
//! - **Not Computable Is a Value**: Degenerate positions yield `None` or
//!   [`XirrOutcome::NotComputable`], never a panic or an error
//! - **Deterministic**: Same-day trades keep their input order
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_core::types::{Date, Trade, TradeSide};
//! use folio_returns::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let start = Date::from_ymd(2024, 1, 2).unwrap();
//! let trades = vec![
//!     Trade::new("VTI", start, TradeSide::Buy, dec!(10), dec!(100)).unwrap(),
//! ];
//!
//! let xirr = calculate_stock_xirr_as_of(&trades, dec!(110), dec!(10), start.add_days(365));
//! assert!((xirr.unwrap() - 10.0).abs() < 0.01);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Reconcile positions in parallel with rayon

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod cashflows;
pub mod config;
pub mod error;
pub mod parallel;
pub mod portfolio;
pub mod position;
pub mod stock;
pub mod xirr;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{build_cash_flows, classify_cash_flows, sort_trades};
    pub use crate::config::{ReturnsConfig, XirrConfig};
    pub use crate::error::{ReturnsError, ReturnsResult};
    pub use crate::portfolio::{reconcile_portfolio, PortfolioTotals, PriceSource};
    pub use crate::position::{net_quantity, reconcile_position, PositionSummary};
    pub use crate::stock::{
        calculate_stock_xirr, calculate_stock_xirr_as_of, calculate_stock_xirr_with,
        xirr_for_trades,
    };
    pub use crate::xirr::{solve_xirr, xnpv, NotComputableReason, Xirr, XirrOutcome};
}

pub use error::{ReturnsError, ReturnsResult};
pub use stock::{calculate_stock_xirr, calculate_stock_xirr_as_of, calculate_stock_xirr_with};
pub use xirr::{solve_xirr, XirrOutcome};
