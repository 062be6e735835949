//! Money market deposit in time space.

/// A money-market deposit: unit notional lent at `start_time`, repaid
/// with simple interest at `end_time`.
///
/// # Pricing
///
/// All flows accrue and discount on the same curve:
/// ```text
/// PV = -DF(start) + (1 + rate × accrual) × DF(end)
/// ```
/// which is zero exactly when the curve's forward over the period
/// matches the deposit rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Cash {
    /// Time the deposit starts accruing (spot).
    pub start_time: f64,
    /// Maturity time.
    pub end_time: f64,
    /// Accrual year fraction between start and end.
    pub accrual: f64,
    /// Simple deposit rate (decimal).
    pub rate: f64,
    /// Curve the deposit accrues and discounts on.
    pub curve: String,
}

impl Cash {
    /// Creates a deposit.
    #[must_use]
    pub fn new(
        start_time: f64,
        end_time: f64,
        accrual: f64,
        rate: f64,
        curve: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            accrual,
            rate,
            curve: curve.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let cash = Cash::new(0.0055, 0.2547, 0.2528, 0.0125, "funding");
        assert_eq!(cash.curve, "funding");
        assert!(cash.end_time > cash.start_time);
    }
}
