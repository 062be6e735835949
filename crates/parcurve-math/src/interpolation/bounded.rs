//! Interpolator with explicit out-of-range behavior.

use std::sync::Arc;

use crate::error::{MathError, MathResult};
use crate::extrapolation::ExtrapolationMethod;
use crate::interpolation::{InterpolationScheme, Interpolator, SensitivityMode};

/// Bump size for finite-difference node sensitivities.
const FD_BUMP: f64 = 1e-6;

/// An interpolator bounded by its node span, with a configured
/// extrapolation method on each side.
///
/// This is the type the curve layer consumes: it owns the node data,
/// answers value and slope queries anywhere, and produces the node
/// sensitivity vector that calibration Jacobians are assembled from.
///
/// Sensitivities are analytic by default. Finite differences rebuild
/// the interpolator with each node bumped up and down and are mainly
/// useful as a cross-check.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{BoundedInterpolator, InterpolationScheme};
///
/// let times = vec![0.25, 0.5, 1.0, 2.0];
/// let rates = vec![0.010, 0.012, 0.015, 0.020];
///
/// let curve = BoundedInterpolator::new(times, rates, InterpolationScheme::default()).unwrap();
///
/// // Inside the span: interpolated. Past the last node: flat.
/// let r = curve.value(1.5).unwrap();
/// assert!(r > 0.015 && r < 0.020);
/// assert_eq!(curve.value(10.0).unwrap(), 0.020);
/// ```
#[derive(Clone)]
pub struct BoundedInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    scheme: InterpolationScheme,
    sensitivity: SensitivityMode,
    inner: Arc<dyn Interpolator>,
}

impl std::fmt::Debug for BoundedInterpolator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedInterpolator")
            .field("nodes", &self.xs.len())
            .field("scheme", &self.scheme)
            .field("sensitivity", &self.sensitivity)
            .finish()
    }
}

impl BoundedInterpolator {
    /// Creates a bounded interpolator over the given nodes.
    ///
    /// # Arguments
    ///
    /// * `xs` - Node positions (must be strictly increasing)
    /// * `ys` - Node values
    /// * `scheme` - Interpolation method and extrapolation pair
    ///
    /// # Errors
    ///
    /// Returns an error if the node data is rejected by the method's
    /// constructor.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, scheme: InterpolationScheme) -> MathResult<Self> {
        let inner = scheme.method.to_interpolator(xs.clone(), ys.clone())?;
        Ok(Self {
            xs,
            ys,
            scheme,
            sensitivity: SensitivityMode::default(),
            inner,
        })
    }

    /// Sets how node sensitivities are computed.
    #[must_use]
    pub fn with_sensitivity(mut self, mode: SensitivityMode) -> Self {
        self.sensitivity = mode;
        self
    }

    /// Returns the value at `x`, extrapolating if outside the span.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::ExtrapolationNotAllowed`] if `x` falls on a
    /// side configured with [`ExtrapolationMethod::Error`].
    pub fn value(&self, x: f64) -> MathResult<f64> {
        match self.side(x) {
            None => self.inner.interpolate(x),
            Some((method, boundary)) => match method.to_extrapolator() {
                None => Err(self.out_of_range(x)),
                Some(ex) => {
                    let boundary_value = self.inner.interpolate(boundary)?;
                    let boundary_gradient = self.inner.derivative(boundary)?;
                    Ok(ex.extrapolate(x, boundary, boundary_value, boundary_gradient))
                }
            },
        }
    }

    /// Returns the slope at `x`, extrapolating if outside the span.
    pub fn gradient(&self, x: f64) -> MathResult<f64> {
        match self.side(x) {
            None => self.inner.derivative(x),
            Some((method, boundary)) => match method {
                ExtrapolationMethod::Error => Err(self.out_of_range(x)),
                ExtrapolationMethod::Flat => Ok(0.0),
                ExtrapolationMethod::Linear => self.inner.derivative(boundary),
            },
        }
    }

    /// Returns the partial derivatives of `value(x)` with respect to
    /// each node value, in node order.
    ///
    /// In [`SensitivityMode::Analytic`] the weights come from the
    /// interpolation basis; outside the span they are transported from
    /// the boundary according to the side's extrapolation method. In
    /// [`SensitivityMode::FiniteDifference`] each node is bumped by
    /// `1e-6` up and down and the interpolator rebuilt.
    pub fn node_sensitivity(&self, x: f64) -> MathResult<Vec<f64>> {
        match self.sensitivity {
            SensitivityMode::Analytic => self.analytic_sensitivity(x),
            SensitivityMode::FiniteDifference => self.finite_difference_sensitivity(x),
        }
    }

    /// Returns the node positions.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Returns the node values.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Returns the interpolation scheme.
    #[must_use]
    pub fn scheme(&self) -> InterpolationScheme {
        self.scheme
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.xs.len()
    }

    /// Returns the first node position.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.inner.min_x()
    }

    /// Returns the last node position.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.inner.max_x()
    }

    /// Which side of the span `x` falls on, if any, with the boundary
    /// node position for that side.
    fn side(&self, x: f64) -> Option<(ExtrapolationMethod, f64)> {
        if x < self.inner.min_x() {
            Some((self.scheme.left, self.inner.min_x()))
        } else if x > self.inner.max_x() {
            Some((self.scheme.right, self.inner.max_x()))
        } else {
            None
        }
    }

    fn out_of_range(&self, x: f64) -> MathError {
        MathError::ExtrapolationNotAllowed {
            x,
            min: self.inner.min_x(),
            max: self.inner.max_x(),
        }
    }

    fn analytic_sensitivity(&self, x: f64) -> MathResult<Vec<f64>> {
        match self.side(x) {
            None => self.inner.node_weights(x),
            Some((method, boundary)) => match method {
                ExtrapolationMethod::Error => Err(self.out_of_range(x)),
                // Flat extrapolation carries the boundary value, so its
                // weights are the boundary weights
                ExtrapolationMethod::Flat => self.inner.node_weights(boundary),
                // Linear extrapolation adds the tangent term, which is
                // itself linear in the node values
                ExtrapolationMethod::Linear => {
                    let mut weights = self.inner.node_weights(boundary)?;
                    let slope_weights = self.inner.derivative_weights(boundary)?;
                    for (w, s) in weights.iter_mut().zip(slope_weights.iter()) {
                        *w += (x - boundary) * s;
                    }
                    Ok(weights)
                }
            },
        }
    }

    fn finite_difference_sensitivity(&self, x: f64) -> MathResult<Vec<f64>> {
        // Error sides should fail the same way the analytic path does
        if let Some((ExtrapolationMethod::Error, _)) = self.side(x) {
            return Err(self.out_of_range(x));
        }

        let mut weights = vec![0.0; self.xs.len()];
        let mut bumped = self.ys.clone();
        for (k, weight) in weights.iter_mut().enumerate() {
            bumped[k] = self.ys[k] + FD_BUMP;
            let up = Self::new(self.xs.clone(), bumped.clone(), self.scheme)?.value(x)?;
            bumped[k] = self.ys[k] - FD_BUMP;
            let down = Self::new(self.xs.clone(), bumped.clone(), self.scheme)?.value(x)?;
            bumped[k] = self.ys[k];
            *weight = (up - down) / (2.0 * FD_BUMP);
        }
        Ok(weights)
    }
}
