//! CLI command implementations.

pub mod reconcile;
pub mod xirr;

pub use reconcile::ReconcileArgs;
pub use xirr::XirrArgs;

use std::str::FromStr;

use folio_core::types::Date;
use rust_decimal::Decimal;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Returns the valuation date: the given one, or today.
pub fn valuation_date(as_of: Option<&str>) -> CliResult<Date> {
    as_of.map_or_else(|| Ok(Date::today()), parse_date)
}

/// Parses and validates a price.
pub fn parse_price(s: &str) -> CliResult<Decimal> {
    let price = Decimal::from_str(s.trim()).map_err(|_| CliError::InvalidPrice(s.to_string()))?;
    if price < Decimal::ZERO {
        return Err(CliError::InvalidPrice(s.to_string()));
    }
    Ok(price)
}
