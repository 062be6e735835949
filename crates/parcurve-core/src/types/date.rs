//! Date type for curve and instrument calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{CoreError, CoreResult};

/// A calendar date.
///
/// Newtype wrapper around `chrono::NaiveDate` providing the date
/// arithmetic instrument resolution needs (tenor offsets with month-end
/// clamping, day counting) while keeping `chrono` out of downstream
/// signatures.
///
/// # Example
///
/// ```rust
/// use parcurve_core::types::Date;
///
/// let trade = Date::from_ymd(2026, 3, 31).unwrap();
/// let maturity = trade.add_months(1).unwrap();
/// assert_eq!(maturity, Date::from_ymd(2026, 4, 30).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the combination is not a real date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 date string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("cannot parse '{s}'")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, January = 1.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, starting at 1.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks whether the date falls in a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Length of the containing month, in days.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        last_day_of_month(self.year(), self.month())
    }

    /// Adds a number of calendar days.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` when the result leaves the
    /// supported date range.
    pub fn add_days(&self, days: i64) -> CoreResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} {days:+} days out of range")))
    }

    /// Adds a number of calendar months.
    ///
    /// When the target month is shorter, the day is clamped to its last
    /// day (Jan 31 + 1M = Feb 28/29).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total = self.year() * 12 + self.month() as i32 - 1 + months;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u32;
        let day = self.day().min(last_day_of_month(year, month));

        Self::from_ymd(year, month, day)
    }

    /// Adds a number of calendar years, clamping Feb 29 when needed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        let year = self.year() + years;
        let day = self.day().min(last_day_of_month(year, self.month()));

        Self::from_ymd(year, self.month(), day)
    }

    /// Number of calendar days from `self` to `other` (signed).
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Weekday of this date.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks whether the date is a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Last calendar day of the containing month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        // The clamped day is always constructible.
        Date(
            NaiveDate::from_ymd_opt(self.year(), self.month(), self.days_in_month())
                .unwrap_or(self.0),
        )
    }

    /// Exposes the wrapped `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(inner: NaiveDate) -> Self {
        Date(inner)
    }
}

impl From<Date> for NaiveDate {
    fn from(wrapper: Date) -> Self {
        wrapper.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the result leaves the supported date range. Use
    /// [`Date::add_days`] for a fallible variant.
    fn add(self, days: i64) -> Self::Output {
        match self.add_days(days) {
            Ok(date) => date,
            Err(_) => panic!("date arithmetic out of range: {self} {days:+} days"),
        }
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// # Panics
    ///
    /// Panics when the result leaves the supported date range.
    fn sub(self, days: i64) -> Self::Output {
        self + days.saturating_neg()
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Days from `other` to `self`.
    fn sub(self, other: Date) -> Self::Output {
        self.0.signed_duration_since(other.0).num_days()
    }
}

/// Day number of the last day in `month` of `year`, via the first day
/// of the following month.
fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map_or(28, |first| first.pred_opt().map_or(28, |d| d.day()))
}
