//! Node template resolution.
//!
//! The [`NodeConverter`] turns market shorthand into time-space
//! instruments: it resolves tenors and month offsets into calendar
//! dates, rolls them onto business days, accrues them under the
//! per-family day counts, maps the dates onto the curve time axis, and
//! rescales quotes from market units into decimals. Everything
//! downstream of this module works purely in year fractions and
//! decimal rates.
//!
//! Quote units per family:
//!
//! | Family | Market unit | Stored as |
//! |--------|-------------|-----------|
//! | deposit, FRA, swap | percent (1.25 = 1.25%) | decimal rate |
//! | tenor swap | basis points (12.5 = 12.5bp) | decimal spread |
//! | future | price (98.60) | price, unscaled |

use parcurve_core::calendars::Calendar;
use parcurve_core::error::CoreError;
use parcurve_core::types::{Date, Tenor};

use crate::conventions::CurveConventions;
use crate::definition::NodeTemplate;
use crate::error::{EngineError, EngineResult};
use crate::instruments::{Cash, FixedLeg, FloatLeg, Fra, Future, Instrument, Swap, TenorSwap};

/// Divisor taking percent quotes to decimal rates.
const PERCENT: f64 = 100.0;

/// Divisor taking basis-point quotes to decimal spreads.
const BASIS_POINTS: f64 = 10_000.0;

/// Resolves node templates into dated, scaled instruments.
///
/// The converter is built once per calibration run: it pins the
/// valuation date, derives the spot date from the settlement calendar,
/// and records which curve names play the funding and forward roles.
#[derive(Debug, Clone)]
pub struct NodeConverter {
    conventions: CurveConventions,
    valuation_date: Date,
    spot: Date,
    funding_curve: String,
    forward_curve: String,
}

impl NodeConverter {
    /// Creates a converter for one valuation date.
    #[must_use]
    pub fn new(
        conventions: CurveConventions,
        valuation_date: Date,
        funding_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Self {
        let spot = conventions
            .calendar
            .add_business_days(valuation_date, conventions.spot_lag_days);
        Self {
            conventions,
            valuation_date,
            spot,
            funding_curve: funding_curve.into(),
            forward_curve: forward_curve.into(),
        }
    }

    /// The valuation date (the origin of curve time).
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// The spot date instruments settle on.
    #[must_use]
    pub fn spot_date(&self) -> Date {
        self.spot
    }

    /// Resolves a template and its raw quote into an instrument.
    ///
    /// `own_curve` names the curve the node belongs to; deposits accrue
    /// and discount on it, while the other families bind to the
    /// converter's funding and forward roles.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnsupportedInstrument`] for templates the
    ///   conventions cannot schedule (an FRA with no accrual period, a
    ///   swap tenor that is not a whole number of months)
    /// - [`EngineError::Core`] for date arithmetic that leaves the
    ///   supported range
    pub fn convert(
        &self,
        template: &NodeTemplate,
        quote: f64,
        own_curve: &str,
    ) -> EngineResult<Instrument> {
        match template {
            NodeTemplate::Deposit { tenor } => self.deposit(*tenor, quote, own_curve),
            NodeTemplate::Fra { start, end } => self.fra(*start, *end, quote),
            NodeTemplate::Future { start } => self.future(*start, quote),
            NodeTemplate::Swap { tenor } => self.swap(*tenor, quote),
            NodeTemplate::TenorSwap { tenor } => self.tenor_swap(*tenor, quote),
        }
    }

    fn deposit(&self, tenor: Tenor, quote: f64, own_curve: &str) -> EngineResult<Instrument> {
        let start = self.spot;
        let end = self.adjust(tenor.apply(start)?);
        let accrual = self
            .conventions
            .deposit_day_count
            .year_fraction_f64(start, end);
        Ok(Instrument::Cash(Cash::new(
            self.time_of(start),
            self.time_of(end),
            accrual,
            quote / PERCENT,
            own_curve,
        )))
    }

    fn fra(&self, start_months: u32, end_months: u32, quote: f64) -> EngineResult<Instrument> {
        if end_months <= start_months {
            return Err(EngineError::unsupported_instrument(format!(
                "fra {start_months}x{end_months} with an empty accrual period"
            )));
        }
        let start = self.adjust(self.spot.add_months(to_i32(start_months))?);
        let end = self.adjust(self.spot.add_months(to_i32(end_months))?);
        let accrual = self.conventions.fra_day_count.year_fraction_f64(start, end);
        Ok(Instrument::Fra(Fra::new(
            self.time_of(start),
            self.time_of(end),
            accrual,
            quote / PERCENT,
            self.funding_curve.clone(),
            self.forward_curve.clone(),
        )))
    }

    fn future(&self, start_months: u32, quote: f64) -> EngineResult<Instrument> {
        if self.conventions.futures_months == 0 {
            return Err(EngineError::unsupported_instrument(
                "future with a zero-length underlying period",
            ));
        }
        let start = self.adjust(self.spot.add_months(to_i32(start_months))?);
        let end = self.adjust(start.add_months(to_i32(self.conventions.futures_months))?);
        let accrual = self
            .conventions
            .futures_day_count
            .year_fraction_f64(start, end);
        Ok(Instrument::Future(Future::new(
            self.time_of(start),
            self.time_of(end),
            accrual,
            quote,
            self.forward_curve.clone(),
        )))
    }

    fn swap(&self, tenor: Tenor, quote: f64) -> EngineResult<Instrument> {
        let total_months = self.swap_months(tenor)?;
        let fixed_step = self.conventions.fixed_leg_frequency.months_per_period();
        let fixed_periods = self.month_schedule(total_months, fixed_step)?;
        let float_periods = self.month_schedule(total_months, self.conventions.float_leg_months)?;

        let fixed = FixedLeg::new(
            fixed_periods.iter().map(|&(_, e)| self.time_of(e)).collect(),
            fixed_periods
                .iter()
                .map(|&(s, e)| self.conventions.fixed_leg_day_count.year_fraction_f64(s, e))
                .collect(),
            quote / PERCENT,
        );
        let floating = self.float_leg(&float_periods, &self.forward_curve, 0.0);
        Ok(Instrument::Swap(Swap::new(
            fixed,
            floating,
            self.funding_curve.clone(),
        )))
    }

    fn tenor_swap(&self, tenor: Tenor, quote: f64) -> EngineResult<Instrument> {
        let total_months = self.swap_months(tenor)?;
        let periods = self.month_schedule(total_months, self.conventions.float_leg_months)?;
        let receive = self.float_leg(&periods, &self.forward_curve, quote / BASIS_POINTS);
        let pay = self.float_leg(&periods, &self.funding_curve, 0.0);
        Ok(Instrument::TenorSwap(TenorSwap::new(
            receive,
            pay,
            self.funding_curve.clone(),
        )))
    }

    fn float_leg(&self, periods: &[(Date, Date)], projection: &str, spread: f64) -> FloatLeg {
        FloatLeg::new(
            periods.iter().map(|&(s, _)| self.time_of(s)).collect(),
            periods.iter().map(|&(_, e)| self.time_of(e)).collect(),
            periods
                .iter()
                .map(|&(s, e)| self.conventions.float_leg_day_count.year_fraction_f64(s, e))
                .collect(),
            projection,
        )
        .with_spread(spread)
    }

    /// Rolls a month schedule forward from spot, back-stubbed: every
    /// period end is `min(i * step, total)` unadjusted months from
    /// spot, then rolled by the business day convention.
    fn month_schedule(&self, total_months: u32, step_months: u32) -> EngineResult<Vec<(Date, Date)>> {
        if step_months == 0 {
            return Err(CoreError::invalid_schedule("period step must be positive").into());
        }
        let mut periods = Vec::new();
        let mut prev = self.spot;
        let mut months = step_months;
        loop {
            let target = months.min(total_months);
            let end = self.adjust(self.spot.add_months(to_i32(target))?);
            periods.push((prev, end));
            if target == total_months {
                break;
            }
            prev = end;
            months += step_months;
        }
        Ok(periods)
    }

    fn swap_months(&self, tenor: Tenor) -> EngineResult<u32> {
        tenor.whole_months().ok_or_else(|| {
            EngineError::unsupported_instrument(format!("swap with sub-month tenor {tenor}"))
        })
    }

    fn adjust(&self, date: Date) -> Date {
        self.conventions
            .calendar
            .adjust(date, self.conventions.business_day_convention)
    }

    /// Maps a date onto the curve time axis.
    fn time_of(&self, date: Date) -> f64 {
        self.conventions
            .curve_day_count
            .year_fraction_f64(self.valuation_date, date)
    }
}

fn to_i32(months: u32) -> i32 {
    i32::try_from(months).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn converter() -> NodeConverter {
        // 2026-03-16 is a Monday; T+2 spot lands on Wednesday the 18th
        NodeConverter::new(
            CurveConventions::default(),
            Date::from_ymd(2026, 3, 16).unwrap(),
            "funding",
            "forward",
        )
    }

    fn tenor(s: &str) -> Tenor {
        s.parse().unwrap()
    }

    #[test]
    fn test_spot_date_applies_lag() {
        let conv = converter();
        assert_eq!(conv.spot_date(), Date::from_ymd(2026, 3, 18).unwrap());
        assert_eq!(conv.valuation_date(), Date::from_ymd(2026, 3, 16).unwrap());
    }

    #[test]
    fn test_deposit_dates_and_scaling() {
        let conv = converter();
        let template = NodeTemplate::Deposit { tenor: tenor("3M") };
        let instrument = conv.convert(&template, 1.25, "funding").unwrap();

        let Instrument::Cash(cash) = instrument else {
            panic!("expected a cash deposit");
        };
        // Spot 2026-03-18 to 2026-06-18: 92 days ACT/360 accrual,
        // curve times under ACT/365F
        assert_relative_eq!(cash.start_time, 2.0 / 365.0, epsilon = 1e-12);
        assert_relative_eq!(cash.end_time, 94.0 / 365.0, epsilon = 1e-12);
        assert_relative_eq!(cash.accrual, 92.0 / 360.0, epsilon = 1e-12);
        assert_relative_eq!(cash.rate, 0.0125, epsilon = 1e-15);
        assert_eq!(cash.curve, "funding");
    }

    #[test]
    fn test_fra_binds_both_curves() {
        let conv = converter();
        let template = NodeTemplate::Fra { start: 3, end: 6 };
        let instrument = conv.convert(&template, 1.30, "forward").unwrap();

        let Instrument::Fra(fra) = instrument else {
            panic!("expected an fra");
        };
        assert_eq!(fra.discount_curve, "funding");
        assert_eq!(fra.forward_curve, "forward");
        assert_relative_eq!(fra.rate, 0.013, epsilon = 1e-15);
        assert!(fra.start_time > 0.2 && fra.start_time < 0.3);
        assert!(fra.end_time > fra.start_time);
        assert_relative_eq!(fra.settlement_accrual, fra.accrual, epsilon = 1e-15);
    }

    #[test]
    fn test_fra_rejects_empty_period() {
        let conv = converter();
        let template = NodeTemplate::Fra { start: 6, end: 6 };
        let err = conv.convert(&template, 1.30, "forward").unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedInstrument { .. }));
    }

    #[test]
    fn test_future_price_stays_unscaled() {
        let conv = converter();
        let template = NodeTemplate::Future { start: 6 };
        let instrument = conv.convert(&template, 98.50, "forward").unwrap();

        let Instrument::Future(future) = instrument else {
            panic!("expected a future");
        };
        assert_relative_eq!(future.price, 98.50, epsilon = 1e-15);
        assert_eq!(future.forward_curve, "forward");
        // Three-month underlying period
        assert!(future.end_time - future.start_time > 0.2);
        assert!(future.end_time - future.start_time < 0.3);
    }

    #[test]
    fn test_swap_schedules_both_legs() {
        let conv = converter();
        let template = NodeTemplate::Swap { tenor: tenor("2Y") };
        let instrument = conv.convert(&template, 1.20, "funding").unwrap();

        let Instrument::Swap(swap) = instrument else {
            panic!("expected a swap");
        };
        // Annual fixed vs quarterly float over two years
        assert_eq!(swap.fixed.payment_times.len(), 2);
        assert_eq!(swap.floating.len(), 8);
        assert_relative_eq!(swap.fixed.rate, 0.012, epsilon = 1e-15);
        assert_eq!(swap.floating.projection_curve, "forward");
        assert_eq!(swap.discount_curve, "funding");

        // Both legs mature together
        assert_relative_eq!(
            swap.fixed.last_time(),
            swap.floating.last_time(),
            epsilon = 1e-12
        );
        // 30E/360 annual coupons accrue close to one year each
        for accrual in &swap.fixed.accruals {
            assert_relative_eq!(*accrual, 1.0, max_relative = 0.02);
        }
        // Float periods chain without gaps
        for j in 1..swap.floating.len() {
            assert_relative_eq!(
                swap.floating.start_times[j],
                swap.floating.end_times[j - 1],
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_swap_short_tenor_gets_stub_period() {
        let conv = converter();
        let template = NodeTemplate::Swap { tenor: tenor("6M") };
        let instrument = conv.convert(&template, 1.00, "funding").unwrap();

        let Instrument::Swap(swap) = instrument else {
            panic!("expected a swap");
        };
        // Six months against an annual fixed frequency: one short coupon
        assert_eq!(swap.fixed.payment_times.len(), 1);
        assert_eq!(swap.floating.len(), 2);
        assert!(swap.fixed.accruals[0] < 0.6);
    }

    #[test]
    fn test_swap_rejects_sub_month_tenor() {
        let conv = converter();
        let template = NodeTemplate::Swap { tenor: tenor("2W") };
        let err = conv.convert(&template, 1.00, "funding").unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedInstrument { .. }));
    }

    #[test]
    fn test_tenor_swap_spread_in_basis_points() {
        let conv = converter();
        let template = NodeTemplate::TenorSwap { tenor: tenor("2Y") };
        let instrument = conv.convert(&template, 12.5, "forward").unwrap();

        let Instrument::TenorSwap(ts) = instrument else {
            panic!("expected a tenor swap");
        };
        assert_relative_eq!(ts.spread(), 0.00125, epsilon = 1e-15);
        assert_eq!(ts.receive.projection_curve, "forward");
        assert_eq!(ts.pay.projection_curve, "funding");
        assert_eq!(ts.discount_curve, "funding");

        // Legs share one payment schedule
        assert_eq!(ts.receive.end_times, ts.pay.end_times);
        assert_eq!(ts.receive.start_times, ts.pay.start_times);
        assert_relative_eq!(ts.pay.spread, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_spot_lag_starts_deposits_at_zero() {
        let conv = NodeConverter::new(
            CurveConventions::default().with_spot_lag(0),
            Date::from_ymd(2026, 3, 16).unwrap(),
            "funding",
            "forward",
        );
        let template = NodeTemplate::Deposit { tenor: tenor("3M") };
        let instrument = conv.convert(&template, 1.00, "funding").unwrap();

        let Instrument::Cash(cash) = instrument else {
            panic!("expected a cash deposit");
        };
        assert_eq!(cash.start_time, 0.0);
    }
}
