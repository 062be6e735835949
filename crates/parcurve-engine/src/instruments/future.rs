//! Interest-rate future in time space.

/// An interest-rate future on the forward over `[start_time, end_time]`.
///
/// # Pricing
///
/// Futures calibrate in quote space rather than present value: the
/// residual is the difference between the market price and the price
/// implied by the projection curve,
/// ```text
/// F        = (DF_fwd(start) / DF_fwd(end) - 1) / accrual
/// residual = price - 100 × (1 - F)
/// ```
/// No convexity adjustment is applied, and no discounting is involved
/// (margining settles the contract daily).
#[derive(Debug, Clone, PartialEq)]
pub struct Future {
    /// Underlying period start.
    pub start_time: f64,
    /// Underlying period end.
    pub end_time: f64,
    /// Accrual year fraction of the underlying period.
    pub accrual: f64,
    /// Quoted market price (e.g. 98.50), unscaled.
    pub price: f64,
    /// Curve the forward is projected from.
    pub forward_curve: String,
}

impl Future {
    /// Creates a future.
    #[must_use]
    pub fn new(
        start_time: f64,
        end_time: f64,
        accrual: f64,
        price: f64,
        forward_curve: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            accrual,
            price,
            forward_curve: forward_curve.into(),
        }
    }

    /// The simple rate implied by the quoted price, `(100 - price) / 100`.
    #[must_use]
    pub fn implied_rate(&self) -> f64 {
        (100.0 - self.price) / 100.0
    }
}
