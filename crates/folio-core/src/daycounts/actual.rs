//! Actual-day conventions over a fixed year basis.
//!
//! Both conventions count calendar days exactly and differ only in the
//! length of the year they divide by.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

fn actual_over_basis(start: Date, end: Date, basis: i64) -> Decimal {
    Decimal::from(start.days_between(&end)) / Decimal::from(basis)
}

/// Actual/365 Fixed: calendar days over 365, leap years included.
///
/// The basis spreadsheet XIRR functions use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        actual_over_basis(start, end, 365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/360: calendar days over 360.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        actual_over_basis(start, end, 360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
