//! Day count conventions for discounting irregular cash flows.
//!
//! A day count convention turns the distance between two dates into a year
//! fraction, which is the exponent used when discounting a cash flow.
//!
//! # Supported Conventions
//!
//! - [`Act365Fixed`]: Actual/365 Fixed, the XIRR standard
//! - [`Act360`]: Actual/360, money market basis
//!
//! # Usage
//!
//! ```rust
//! use folio_core::daycounts::{Act365Fixed, DayCount};
//! use folio_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let dc = Act365Fixed;
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2026, 1, 1).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 365);
//! assert_eq!(dc.year_fraction(start, end), dec!(1));
//! ```

mod actual;

pub use actual::{Act360, Act365Fixed};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`) so that one
/// convention can be shared by positions reconciled in parallel.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention (e.g. "ACT/365F").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Runtime-selectable day count convention.
///
/// # Example
///
/// ```rust
/// use folio_core::daycounts::{DayCount, DayCountConvention};
///
/// let convention: DayCountConvention = "ACT/360".parse().unwrap();
/// assert_eq!(convention.to_day_count().name(), "ACT/360");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360
    Act360,

    /// Actual/365 Fixed
    #[default]
    Act365Fixed,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
        }
    }

    /// Returns the year basis (denominator) in days.
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountConvention::Act360 => 360,
            DayCountConvention::Act365Fixed => 365,
        }
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = FolioError;

    /// Accepts market names ("ACT/365F") and enum-style names ("Act365Fixed").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365FIXED"
            | "ACT365" => Ok(DayCountConvention::Act365Fixed),
            _ => Err(FolioError::UnknownDayCount {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conventions() {
        assert_eq!(
            "act/365f".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert_eq!(
            "Act365Fixed".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert_eq!(
            "ACTUAL/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert!("30/360".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_default_is_act365() {
        let convention = DayCountConvention::default();
        assert_eq!(convention, DayCountConvention::Act365Fixed);
        assert_eq!(convention.basis(), 365);
        assert_eq!(convention.to_string(), "ACT/365F");
    }

    #[test]
    fn test_boxed_names_match() {
        for convention in [DayCountConvention::Act360, DayCountConvention::Act365Fixed] {
            assert_eq!(convention.to_day_count().name(), convention.name());
        }
    }
}
