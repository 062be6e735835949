//! Tenor basis swap in time space.

use super::FloatLeg;

/// A float-vs-float tenor basis swap.
///
/// The receive leg projects off the forward curve and carries the
/// quoted basis spread; the pay leg projects off the funding curve
/// flat. Both legs discount on the funding curve:
/// ```text
/// PV = Σ (F_fwd_j + spread) × τ_j × DF_disc(t_j)
///    - Σ F_fund_k × τ_k × DF_disc(t_k)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TenorSwap {
    /// Leg projecting the forward curve plus the basis spread.
    pub receive: FloatLeg,
    /// Leg projecting the funding curve flat.
    pub pay: FloatLeg,
    /// Curve both legs discount on.
    pub discount_curve: String,
}

impl TenorSwap {
    /// Creates a tenor basis swap.
    #[must_use]
    pub fn new(receive: FloatLeg, pay: FloatLeg, discount_curve: impl Into<String>) -> Self {
        Self {
            receive,
            pay,
            discount_curve: discount_curve.into(),
        }
    }

    /// The basis spread on the receive leg (decimal).
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.receive.spread
    }
}
