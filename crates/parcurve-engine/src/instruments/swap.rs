//! Fixed-vs-float interest-rate swap in time space.

use super::{FixedLeg, FloatLeg};

/// A fixed-vs-float swap, receive fixed.
///
/// # Pricing
///
/// Both legs discount on the funding curve; the floating leg projects
/// off the forward curve:
/// ```text
/// PV = Σ rate × τ_i × DF_disc(t_i)  -  Σ F_j × τ_j × DF_disc(t_j)
/// ```
/// At the par rate the two legs cancel and PV is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Swap {
    /// The fixed leg (receive side).
    pub fixed: FixedLeg,
    /// The floating leg (pay side).
    pub floating: FloatLeg,
    /// Curve both legs discount on.
    pub discount_curve: String,
}

impl Swap {
    /// Creates a swap.
    #[must_use]
    pub fn new(fixed: FixedLeg, floating: FloatLeg, discount_curve: impl Into<String>) -> Self {
        Self {
            fixed,
            floating,
            discount_curve: discount_curve.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legs_mature_together() {
        let swap = Swap::new(
            FixedLeg::new(vec![1.0, 2.0], vec![1.0, 1.0], 0.02),
            FloatLeg::new(
                vec![0.0, 0.5, 1.0, 1.5],
                vec![0.5, 1.0, 1.5, 2.0],
                vec![0.5; 4],
                "forward",
            ),
            "funding",
        );
        assert_eq!(swap.fixed.last_time(), swap.floating.last_time());
    }
}
