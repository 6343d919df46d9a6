//! # Folio Core
//!
//! Core types and conventions for the Folio portfolio returns engine.
//!
//! This crate provides the foundational building blocks used throughout Folio:
//!
//! - **Types**: `Date`, `Trade`, `TradeSide`, `CashFlow`, `CashFlowSchedule`
//! - **Day Count Conventions**: Year fraction calculations for discounting
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes and validating constructors keep bad trades out
//! - **Decimal Money**: Quantities, prices and amounts are `rust_decimal::Decimal`
//! - **Explicit Over Implicit**: No ambient state, every input is a parameter
//!
//! ## Example
//!
//! ```rust
//! use folio_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let trade = Trade::new(
//!     "AAPL",
//!     Date::from_ymd(2024, 3, 1).unwrap(),
//!     TradeSide::Buy,
//!     dec!(10),
//!     dec!(172.50),
//! )
//! .unwrap();
//! assert_eq!(trade.notional(), dec!(1725.00));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{FolioError, FolioResult};
    pub use crate::types::{CashFlow, CashFlowSchedule, CashFlowType, Date, Trade, TradeSide};
}

// Re-export commonly used types at crate root
pub use error::{FolioError, FolioResult};
pub use types::{CashFlow, CashFlowSchedule, CashFlowType, Date, Trade, TradeSide};
