//! Calendar dates at day resolution.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FolioError, FolioResult};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// A trade or cash flow date.
///
/// Wraps `chrono::NaiveDate`. Intraday time never matters for returns, so
/// there is none. Serializes as `"YYYY-MM-DD"`.
///
/// ```rust
/// use folio_core::types::Date;
///
/// let bought: Date = "2024-02-28".parse().unwrap();
/// assert_eq!(bought.days_between(&bought.add_days(2)), 2);
/// assert_eq!(bought.add_days(2).to_string(), "2024-03-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Builds a date from its parts.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> FolioResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| FolioError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses `YYYY-MM-DD`, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> FolioResult<Self> {
        NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
            .map(Date)
            .map_err(|_| FolioError::invalid_date(s.trim()))
    }

    /// Today in the local timezone.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Day of month.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The date `days` later (earlier if negative).
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + Duration::days(days))
    }

    /// Calendar days from `self` to `other`, negative when `other` is earlier.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl FromStr for Date {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(Date::from_ymd(2023, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
        assert!(Date::parse("2024-13-01").is_err());
        assert!(Date::parse("01/02/2024").is_err());
    }

    #[test]
    fn test_day_distance_spans_leap_day() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();

        assert_eq!(start.days_between(&end), 366);
        assert_eq!(end.days_between(&start), -366);
        assert_eq!(start.add_days(366), end);
    }

    #[test]
    fn test_text_forms() {
        let date: Date = " 2025-06-05 ".parse().unwrap();
        assert_eq!(date.to_string(), "2025-06-05");
        assert_eq!(date.day(), 5);

        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-06-05\"");
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), date);
    }
}
