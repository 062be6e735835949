//! Market conventions for instrument resolution.
//!
//! A [`CurveConventions`] bundle answers every question the node
//! converter asks while turning a template into a dated instrument:
//! which day count accrues a deposit, how far spot sits from the
//! valuation date, how a maturity rolls off a weekend, and how swap
//! legs are scheduled. The default bundle mirrors a standard USD-style
//! single-currency setup.

use std::fmt;
use std::sync::Arc;

use parcurve_core::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
use parcurve_core::daycounts::DayCountConvention;
use parcurve_core::types::Frequency;

/// Conventions used to resolve instrument templates into dated trades.
///
/// | Field | Default |
/// |-------|---------|
/// | `deposit_day_count` | ACT/360 |
/// | `fra_day_count` | ACT/360 |
/// | `futures_day_count` | ACT/360 |
/// | `fixed_leg_day_count` | 30E/360 |
/// | `float_leg_day_count` | ACT/360 |
/// | `curve_day_count` | ACT/365F |
/// | `spot_lag_days` | 2 |
/// | `business_day_convention` | Modified Following |
/// | `fixed_leg_frequency` | Annual |
/// | `float_leg_months` | 3 |
/// | `futures_months` | 3 |
///
/// The curve day count maps cash-flow dates onto the year-fraction time
/// axis shared by every curve in the system; the others compute accrual
/// factors for their instrument family.
#[derive(Clone)]
pub struct CurveConventions {
    /// Accrual basis for deposits.
    pub deposit_day_count: DayCountConvention,
    /// Accrual basis for FRA periods.
    pub fra_day_count: DayCountConvention,
    /// Accrual basis for the futures underlying period.
    pub futures_day_count: DayCountConvention,
    /// Accrual basis for swap fixed legs.
    pub fixed_leg_day_count: DayCountConvention,
    /// Accrual basis for floating legs.
    pub float_leg_day_count: DayCountConvention,
    /// Day count mapping dates onto curve time.
    pub curve_day_count: DayCountConvention,
    /// Business days between valuation and spot.
    pub spot_lag_days: i32,
    /// Settlement calendar.
    pub calendar: Arc<dyn Calendar>,
    /// Roll rule for dates landing on non-business days.
    pub business_day_convention: BusinessDayConvention,
    /// Payment frequency of swap fixed legs.
    pub fixed_leg_frequency: Frequency,
    /// Floating leg payment period in months.
    pub float_leg_months: u32,
    /// Length of the futures underlying period in months.
    pub futures_months: u32,
}

impl CurveConventions {
    /// Creates the default convention bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the settlement calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the spot lag in business days.
    #[must_use]
    pub fn with_spot_lag(mut self, days: i32) -> Self {
        self.spot_lag_days = days;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = convention;
        self
    }

    /// Sets the fixed leg payment frequency.
    #[must_use]
    pub fn with_fixed_leg_frequency(mut self, frequency: Frequency) -> Self {
        self.fixed_leg_frequency = frequency;
        self
    }

    /// Sets the floating leg payment period in months.
    #[must_use]
    pub fn with_float_leg_months(mut self, months: u32) -> Self {
        self.float_leg_months = months;
        self
    }

    /// Sets the day count mapping dates onto curve time.
    #[must_use]
    pub fn with_curve_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.curve_day_count = day_count;
        self
    }
}

impl Default for CurveConventions {
    fn default() -> Self {
        Self {
            deposit_day_count: DayCountConvention::Act360,
            fra_day_count: DayCountConvention::Act360,
            futures_day_count: DayCountConvention::Act360,
            fixed_leg_day_count: DayCountConvention::Thirty360E,
            float_leg_day_count: DayCountConvention::Act360,
            curve_day_count: DayCountConvention::Act365Fixed,
            spot_lag_days: 2,
            calendar: Arc::new(WeekendCalendar),
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            fixed_leg_frequency: Frequency::Annual,
            float_leg_months: 3,
            futures_months: 3,
        }
    }
}

impl fmt::Debug for CurveConventions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveConventions")
            .field("deposit_day_count", &self.deposit_day_count)
            .field("fra_day_count", &self.fra_day_count)
            .field("futures_day_count", &self.futures_day_count)
            .field("fixed_leg_day_count", &self.fixed_leg_day_count)
            .field("float_leg_day_count", &self.float_leg_day_count)
            .field("curve_day_count", &self.curve_day_count)
            .field("spot_lag_days", &self.spot_lag_days)
            .field("calendar", &self.calendar.name())
            .field("business_day_convention", &self.business_day_convention)
            .field("fixed_leg_frequency", &self.fixed_leg_frequency)
            .field("float_leg_months", &self.float_leg_months)
            .field("futures_months", &self.futures_months)
            .finish()
    }
}
