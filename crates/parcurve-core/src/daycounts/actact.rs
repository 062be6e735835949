//! Actual/Actual ISDA day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// Splits the accrual period at calendar year boundaries and divides the
/// days in each calendar year by that year's actual length (365 or 366).
///
/// # Formula
///
/// For a period spanning years y1..y2:
///
/// days in y1 / basis(y1) + (whole years between) + days in y2 / basis(y2)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start == end {
            return Decimal::ZERO;
        }
        if end < start {
            return -self.year_fraction(end, start);
        }

        if start.year() == end.year() {
            let basis = year_basis(start.year());
            return Decimal::from(start.days_between(&end)) / Decimal::from(basis);
        }

        // Fraction of the start year, whole years, fraction of the end year.
        let start_year_end = first_of_year(start.year() + 1);
        let end_year_start = first_of_year(end.year());

        let head = Decimal::from(start.days_between(&start_year_end))
            / Decimal::from(year_basis(start.year()));
        let whole_years = Decimal::from(end.year() - start.year() - 1);
        let tail =
            Decimal::from(end_year_start.days_between(&end)) / Decimal::from(year_basis(end.year()));

        head + whole_years + tail
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

fn first_of_year(year: i32) -> Date {
    // Jan 1 exists for every supported year.
    Date::from_ymd(year, 1, 1).unwrap_or_else(|_| Date::today())
}

fn year_basis(year: i32) -> u32 {
    let leap = (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0);
    if leap {
        366
    } else {
        365
    }
}
