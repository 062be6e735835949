//! 30E/360 (Eurobond basis) day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30E/360 day count convention (Eurobond basis).
///
/// Both the start and end day-of-month are capped at 30; months count
/// as 30 days and years as 360.
///
/// # Formula
///
/// Days = 360·(y2 − y1) + 30·(m2 − m1) + (min(d2, 30) − min(d1, 30))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));

        360 * i64::from(end.year() - start.year())
            + 30 * (i64::from(end.month()) - i64::from(start.month()))
            + (d2 - d1)
    }
}
