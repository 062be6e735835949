//! Time-space calibration instruments.
//!
//! The node converter resolves every template into one of these fully
//! dated, fully scaled instruments before calibration starts. All
//! fields live in curve time (year fractions from the valuation date)
//! and decimal rate units; nothing here looks at dates, conventions, or
//! market quoting units again.
//!
//! # Instrument Families
//!
//! | Family | Curves referenced |
//! |--------|-------------------|
//! | [`Cash`] | its own curve for accrual and discounting |
//! | [`Fra`] | funding (discount) + forward (projection) |
//! | [`Future`] | forward (projection) only |
//! | [`Swap`] | funding (discount) + forward (float projection) |
//! | [`TenorSwap`] | funding (discount + one projection) + forward (projection) |

mod cash;
mod fra;
mod future;
mod swap;
mod tenor_swap;

pub use cash::Cash;
pub use fra::Fra;
pub use future::Future;
pub use swap::Swap;
pub use tenor_swap::TenorSwap;

/// The fixed leg of a swap: known coupons at known times.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLeg {
    /// Payment times of each coupon.
    pub payment_times: Vec<f64>,
    /// Accrual year fraction of each coupon period.
    pub accruals: Vec<f64>,
    /// Fixed coupon rate (decimal).
    pub rate: f64,
}

impl FixedLeg {
    /// Creates a fixed leg.
    #[must_use]
    pub fn new(payment_times: Vec<f64>, accruals: Vec<f64>, rate: f64) -> Self {
        Self {
            payment_times,
            accruals,
            rate,
        }
    }

    /// Time of the last coupon, or 0.0 for an empty leg.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.payment_times.last().copied().unwrap_or(0.0)
    }
}

/// A floating leg: forward-projected coupons paid at each period end.
///
/// Each period `j` pays `(F_j + spread) * accrual_j` at `end_times[j]`,
/// where `F_j` is the simple forward implied by the projection curve
/// over `[start_times[j], end_times[j]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatLeg {
    /// Fixing period start times.
    pub start_times: Vec<f64>,
    /// Fixing period end times; coupons pay here.
    pub end_times: Vec<f64>,
    /// Accrual year fraction of each period.
    pub accruals: Vec<f64>,
    /// Additive spread over the projected forward (decimal).
    pub spread: f64,
    /// Name of the curve the forwards are projected from.
    pub projection_curve: String,
}

impl FloatLeg {
    /// Creates a floating leg with no spread.
    #[must_use]
    pub fn new(
        start_times: Vec<f64>,
        end_times: Vec<f64>,
        accruals: Vec<f64>,
        projection_curve: impl Into<String>,
    ) -> Self {
        Self {
            start_times,
            end_times,
            accruals,
            spread: 0.0,
            projection_curve: projection_curve.into(),
        }
    }

    /// Sets the additive spread (decimal).
    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_times.len()
    }

    /// Returns true if the leg has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end_times.is_empty()
    }

    /// Time of the last payment, or 0.0 for an empty leg.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.end_times.last().copied().unwrap_or(0.0)
    }
}

/// A calibration instrument in time space.
#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    /// Money-market deposit.
    Cash(Cash),
    /// Forward rate agreement.
    Fra(Fra),
    /// Interest-rate future.
    Future(Future),
    /// Fixed-vs-float swap.
    Swap(Swap),
    /// Float-vs-float tenor basis swap.
    TenorSwap(TenorSwap),
}

impl Instrument {
    /// The time of the instrument's last cash flow.
    ///
    /// This is the node time the instrument contributes to the curve
    /// its quote calibrates.
    #[must_use]
    pub fn node_time(&self) -> f64 {
        match self {
            Instrument::Cash(cash) => cash.end_time,
            Instrument::Fra(fra) => fra.end_time,
            Instrument::Future(future) => future.end_time,
            Instrument::Swap(swap) => swap.fixed.last_time().max(swap.floating.last_time()),
            Instrument::TenorSwap(ts) => ts.receive.last_time().max(ts.pay.last_time()),
        }
    }

    /// Returns the instrument family name, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Instrument::Cash(_) => "deposit",
            Instrument::Fra(_) => "fra",
            Instrument::Future(_) => "future",
            Instrument::Swap(_) => "swap",
            Instrument::TenorSwap(_) => "tenor swap",
        }
    }
}
