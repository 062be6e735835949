//! Forward rate agreement in time space.

/// A forward rate agreement over `[start_time, end_time]`, settled at
/// the period start.
///
/// # Pricing
///
/// With `F` the simple forward implied by the projection curve,
/// ```text
/// F  = (DF_fwd(start) / DF_fwd(end) - 1) / accrual
/// PV = DF_disc(start) × accrual × (F - rate) / (1 + F × settlement_accrual)
/// ```
/// The `1 + F × settlement_accrual` factor discounts the period-end
/// payoff back to the settlement date at the forward rate itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Fra {
    /// Underlying period start; also the settlement time.
    pub start_time: f64,
    /// Underlying period end.
    pub end_time: f64,
    /// Accrual year fraction of the underlying period.
    pub accrual: f64,
    /// Accrual used to discount the payoff from period end to
    /// settlement; equals `accrual` under standard terms.
    pub settlement_accrual: f64,
    /// Contract fixed rate (decimal).
    pub rate: f64,
    /// Curve the settlement payment discounts on.
    pub discount_curve: String,
    /// Curve the forward is projected from.
    pub forward_curve: String,
}

impl Fra {
    /// Creates a FRA with the settlement accrual equal to the period
    /// accrual.
    #[must_use]
    pub fn new(
        start_time: f64,
        end_time: f64,
        accrual: f64,
        rate: f64,
        discount_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            accrual,
            settlement_accrual: accrual,
            rate,
            discount_curve: discount_curve.into(),
            forward_curve: forward_curve.into(),
        }
    }
}
