//! Extrapolation behavior outside the interpolation span.
//!
//! An extrapolator continues a curve past its first or last node. The
//! same trait serves both sides: the caller passes the boundary node's
//! position, value, and one-sided gradient.
//!
//! # Available Extrapolators
//!
//! - [`FlatExtrapolator`]: holds the boundary value constant
//! - [`LinearExtrapolator`]: continues along the boundary tangent

use serde::{Deserialize, Serialize};

/// Trait for extrapolation beyond a boundary node.
pub trait Extrapolator: Send + Sync {
    /// Returns the extrapolated value at `x`.
    ///
    /// # Arguments
    ///
    /// * `x` - Query point outside the span
    /// * `boundary_x` - Position of the nearest boundary node
    /// * `boundary_value` - Curve value at the boundary node
    /// * `boundary_gradient` - One-sided gradient at the boundary node
    fn extrapolate(&self, x: f64, boundary_x: f64, boundary_value: f64, boundary_gradient: f64)
        -> f64;

    /// Returns the name of the extrapolation method.
    fn name(&self) -> &'static str;
}

/// Flat extrapolation: the boundary value is held constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatExtrapolator;

impl Extrapolator for FlatExtrapolator {
    fn extrapolate(
        &self,
        _x: f64,
        _boundary_x: f64,
        boundary_value: f64,
        _boundary_gradient: f64,
    ) -> f64 {
        boundary_value
    }

    fn name(&self) -> &'static str {
        "Flat"
    }
}

/// Linear extrapolation along the boundary tangent.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearExtrapolator;

impl Extrapolator for LinearExtrapolator {
    fn extrapolate(
        &self,
        x: f64,
        boundary_x: f64,
        boundary_value: f64,
        boundary_gradient: f64,
    ) -> f64 {
        boundary_value + boundary_gradient * (x - boundary_x)
    }

    fn name(&self) -> &'static str {
        "Linear"
    }
}

/// Runtime-selectable extrapolation method for one side of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExtrapolationMethod {
    /// Reject queries outside the span.
    Error,
    /// Hold the boundary value constant.
    #[default]
    Flat,
    /// Continue along the boundary tangent.
    Linear,
}

impl ExtrapolationMethod {
    /// Creates the boxed extrapolator, or `None` for [`Self::Error`].
    #[must_use]
    pub fn to_extrapolator(&self) -> Option<Box<dyn Extrapolator>> {
        match self {
            ExtrapolationMethod::Error => None,
            ExtrapolationMethod::Flat => Some(Box::new(FlatExtrapolator)),
            ExtrapolationMethod::Linear => Some(Box::new(LinearExtrapolator)),
        }
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ExtrapolationMethod::Error => "Error",
            ExtrapolationMethod::Flat => "Flat",
            ExtrapolationMethod::Linear => "Linear",
        }
    }
}

impl std::fmt::Display for ExtrapolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
