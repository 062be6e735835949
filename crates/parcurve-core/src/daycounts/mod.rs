//! Day count conventions.
//!
//! Day count conventions turn a pair of dates into an accrual year
//! fraction. The calibration engine uses them twice: to compute
//! instrument accrual factors and to map cash-flow dates onto the
//! year-fraction time axis of a curve.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - money market instruments, FRAs, futures
//! - [`Act365Fixed`]: Actual/365 Fixed - GBP money markets, curve time axis
//! - [`ActActIsda`]: Actual/Actual ISDA - year-split convention for swaps
//! - [`Thirty360E`]: 30E/360 - Eurobond basis, EUR fixed legs
//!
//! # Usage
//!
//! ```rust
//! use parcurve_core::daycounts::{Act360, DayCount};
//! use parcurve_core::types::Date;
//!
//! let dc = Act360;
//! let start = Date::from_ymd(2026, 1, 15).unwrap();
//! let end = Date::from_ymd(2026, 7, 15).unwrap();
//! let tau = dc.year_fraction(start, end);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use thirty360::Thirty360E;

use crate::types::Date;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trait for day count conventions.
///
/// `year_fraction` is exact `Decimal` arithmetic; the [`year_fraction_f64`]
/// bridge exists for the floating-point pricing layer.
///
/// [`year_fraction_f64`]: DayCount::year_fraction_f64
pub trait DayCount: Send + Sync {
    /// Returns the conventional name (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end` precedes `start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates according to the
    /// convention (actual days for ACT conventions, adjusted days for
    /// 30/360 variants).
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction as `f64`, for the pricing layer.
    fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(0.0)
    }
}

/// Runtime-selectable day count convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360 - money market basis
    #[default]
    Act360,
    /// Actual/365 Fixed
    Act365Fixed,
    /// Actual/Actual ISDA
    ActActIsda,
    /// 30E/360 (Eurobond basis)
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Returns the conventional name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::Thirty360E => "30E/360",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360E,
        ]
    }

    /// Year fraction between two dates under this convention, as `f64`.
    #[must_use]
    pub fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.to_day_count().year_fraction_f64(start, end)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
