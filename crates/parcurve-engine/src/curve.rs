//! Interpolated zero-rate curves.

use parcurve_math::interpolation::{BoundedInterpolator, InterpolationScheme, SensitivityMode};
use parcurve_math::MathError;

use crate::error::{EngineError, EngineResult};

/// A named zero-rate curve interpolated over year-fraction node times.
///
/// Rates are continuously-compounded zeros, so discount factors are
/// `DF(t) = exp(-r(t) * t)`. The curve owns its node arrays and the
/// bounded interpolator built over them; evaluation outside the node
/// span follows the scheme's extrapolation pair.
#[derive(Debug, Clone)]
pub struct InterpolatedCurve {
    name: String,
    interpolator: BoundedInterpolator,
}

impl InterpolatedCurve {
    /// Builds a curve from sorted node times and matching node rates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidNodeSet`] naming the curve when
    /// the nodes are unusable: fewer than the interpolation method's
    /// minimum, mismatched lengths, or times not strictly increasing.
    pub fn new(
        name: impl Into<String>,
        times: Vec<f64>,
        rates: Vec<f64>,
        scheme: InterpolationScheme,
    ) -> EngineResult<Self> {
        let name = name.into();
        let interpolator =
            BoundedInterpolator::new(times, rates, scheme).map_err(|err| match err {
                MathError::InvalidNodeData { reason } => {
                    EngineError::invalid_node_set(&name, reason)
                }
                MathError::DimensionMismatch { expected, actual } => EngineError::invalid_node_set(
                    &name,
                    format!("times and rates differ in length: {expected} vs {actual}"),
                ),
                other => EngineError::Math(other),
            })?;
        Ok(Self { name, interpolator })
    }

    /// Sets the node sensitivity computation mode.
    #[must_use]
    pub fn with_sensitivity(mut self, mode: SensitivityMode) -> Self {
        self.interpolator = self.interpolator.with_sensitivity(mode);
        self
    }

    /// Returns the curve name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The continuously-compounded zero rate at time `t`.
    pub fn zero_rate(&self, t: f64) -> EngineResult<f64> {
        Ok(self.interpolator.value(t)?)
    }

    /// The discount factor at time `t`, `exp(-zero_rate(t) * t)`.
    pub fn discount_factor(&self, t: f64) -> EngineResult<f64> {
        let rate = self.interpolator.value(t)?;
        Ok((-rate * t).exp())
    }

    /// Sensitivity of the zero rate at `t` to each node rate.
    ///
    /// Entry `j` is `∂r(t)/∂r_j`; the vector length equals the node
    /// count.
    pub fn node_sensitivity(&self, t: f64) -> EngineResult<Vec<f64>> {
        Ok(self.interpolator.node_sensitivity(t)?)
    }

    /// Node times, sorted ascending.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.interpolator.xs()
    }

    /// Node rates, aligned with [`times`](Self::times).
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        self.interpolator.ys()
    }

    /// Number of curve nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.interpolator.node_count()
    }

    /// The interpolation scheme the curve was built with.
    #[must_use]
    pub fn scheme(&self) -> InterpolationScheme {
        self.interpolator.scheme()
    }
}
