//! # Parcurve Core
//!
//! Core date and convention types for the Parcurve calibration library.
//!
//! This crate provides the building blocks the curve engine resolves
//! instruments with:
//!
//! - **Types**: `Date`, `Tenor`, `Frequency`
//! - **Day Count Conventions**: accrual year fractions (ACT/360, ACT/365F, ...)
//! - **Business Day Calendars**: weekend/holiday handling and date rolling
//!
//! ## Example
//!
//! ```rust
//! use parcurve_core::prelude::*;
//!
//! let valuation = Date::from_ymd(2026, 8, 24).unwrap();
//! let cal = WeekendCalendar;
//! let spot = cal.add_business_days(valuation, 2);
//! let tenor: Tenor = "3M".parse().unwrap();
//! let maturity = cal.adjust(
//!     tenor.apply(spot).unwrap(),
//!     BusinessDayConvention::ModifiedFollowing,
//! );
//! assert!(maturity > spot);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Frequency, Tenor, TenorUnit};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Frequency, Tenor};
