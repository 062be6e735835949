//! Interpolation methods for yield curve construction.
//!
//! Every method exposes, besides the interpolated value and its slope,
//! the sensitivity of both quantities to the node values. The weight
//! vectors are what a calibration Jacobian is assembled from.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: straight lines between nodes
//! - [`LogLinearInterpolator`]: linear on the logarithm of the values
//! - [`CubicSpline`]: natural cubic spline
//!
//! | Method | Smoothness | Weight cost | Use case |
//! |--------|------------|-------------|----------|
//! | Linear | C0 | O(1) per query | Zero-rate curves, calibration default |
//! | Log-Linear | C0 | O(1) per query | Discount factor curves |
//! | Natural Cubic | C2 | O(n) per query | Smooth forward curves |
//!
//! Extrapolation is not handled here. [`BoundedInterpolator`] wraps any
//! method with a per-side [`ExtrapolationMethod`] and is the type the
//! curve layer consumes.

mod bounded;
mod cubic_spline;
mod linear;
mod log_linear;

pub use bounded::BoundedInterpolator;
pub use cubic_spline::CubicSpline;
pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::MathResult;
use crate::extrapolation::ExtrapolationMethod;

/// Trait for interpolation methods.
///
/// All interpolation methods implement this trait, providing a unified
/// interface for curve construction. Queries are only valid inside
/// `[min_x, max_x]`; extrapolation policy lives in
/// [`BoundedInterpolator`].
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    ///
    /// At a node the right-sided derivative is returned, except at the
    /// last node where only the left-sided one exists.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns the partial derivatives of the value at x with respect
    /// to each node value, in node order.
    fn node_weights(&self, x: f64) -> MathResult<Vec<f64>>;

    /// Returns the partial derivatives of [`Self::derivative`] at x
    /// with respect to each node value, in node order.
    fn derivative_weights(&self, x: f64) -> MathResult<Vec<f64>>;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Runtime-selectable interpolation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterpolationMethod {
    /// Linear interpolation on the values.
    #[default]
    Linear,
    /// Linear interpolation on the logarithm of the values.
    LogLinear,
    /// Natural cubic spline.
    NaturalCubic,
}

impl InterpolationMethod {
    /// Creates the interpolator for the given nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the node data is rejected by the method's
    /// constructor (too few points, unsorted, non-positive values for
    /// log-linear).
    pub fn to_interpolator(
        &self,
        xs: Vec<f64>,
        ys: Vec<f64>,
    ) -> MathResult<Arc<dyn Interpolator>> {
        match self {
            InterpolationMethod::Linear => {
                LinearInterpolator::new(xs, ys).map(|i| Arc::new(i) as Arc<dyn Interpolator>)
            }
            InterpolationMethod::LogLinear => {
                LogLinearInterpolator::new(xs, ys).map(|i| Arc::new(i) as Arc<dyn Interpolator>)
            }
            InterpolationMethod::NaturalCubic => {
                CubicSpline::new(xs, ys).map(|i| Arc::new(i) as Arc<dyn Interpolator>)
            }
        }
    }

    /// Minimum number of nodes the method requires.
    #[must_use]
    pub fn min_points(&self) -> usize {
        match self {
            InterpolationMethod::Linear | InterpolationMethod::LogLinear => 2,
            InterpolationMethod::NaturalCubic => 3,
        }
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "Linear",
            InterpolationMethod::LogLinear => "LogLinear",
            InterpolationMethod::NaturalCubic => "NaturalCubic",
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How node sensitivities are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SensitivityMode {
    /// Closed-form weights from the interpolation basis.
    #[default]
    Analytic,
    /// Central finite difference with node bumps.
    FiniteDifference,
}

/// Complete interpolation specification for one curve.
///
/// Pairs an interpolation method with an extrapolation method for each
/// side of the node span. The default is the standard curve setup:
/// linear interpolation, linear extrapolation towards time zero, flat
/// extrapolation past the last node.
///
/// # Example
///
/// ```rust
/// use parcurve_math::extrapolation::ExtrapolationMethod;
/// use parcurve_math::interpolation::{InterpolationMethod, InterpolationScheme};
///
/// let scheme = InterpolationScheme::default();
/// assert_eq!(scheme.method, InterpolationMethod::Linear);
/// assert_eq!(scheme.left, ExtrapolationMethod::Linear);
/// assert_eq!(scheme.right, ExtrapolationMethod::Flat);
///
/// let smooth = InterpolationScheme::new(InterpolationMethod::NaturalCubic)
///     .with_right(ExtrapolationMethod::Linear);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterpolationScheme {
    /// Interpolation method inside the node span.
    pub method: InterpolationMethod,
    /// Extrapolation method below the first node.
    pub left: ExtrapolationMethod,
    /// Extrapolation method above the last node.
    pub right: ExtrapolationMethod,
}

impl InterpolationScheme {
    /// Creates a scheme with the default extrapolation pair.
    #[must_use]
    pub fn new(method: InterpolationMethod) -> Self {
        Self {
            method,
            left: ExtrapolationMethod::Linear,
            right: ExtrapolationMethod::Flat,
        }
    }

    /// Sets the extrapolation method below the first node.
    #[must_use]
    pub fn with_left(mut self, left: ExtrapolationMethod) -> Self {
        self.left = left;
        self
    }

    /// Sets the extrapolation method above the last node.
    #[must_use]
    pub fn with_right(mut self, right: ExtrapolationMethod) -> Self {
        self.right = right;
        self
    }
}

impl Default for InterpolationScheme {
    fn default() -> Self {
        Self::new(InterpolationMethod::default())
    }
}
