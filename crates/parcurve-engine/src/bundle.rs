//! Named collections of curves.

use crate::curve::InterpolatedCurve;
use crate::error::{EngineError, EngineResult};

/// An ordered collection of named curves.
///
/// Pricing resolves the curve names an instrument carries against a
/// bundle; a miss is a [`EngineError::CurveNotFound`]. Bundles are
/// small (one or two curves), so lookup is a linear scan in insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct CurveBundle {
    curves: Vec<InterpolatedCurve>,
}

impl CurveBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a curve, builder style.
    #[must_use]
    pub fn with_curve(mut self, curve: InterpolatedCurve) -> Self {
        self.insert(curve);
        self
    }

    /// Adds a curve, replacing any existing curve with the same name.
    pub fn insert(&mut self, curve: InterpolatedCurve) {
        if let Some(existing) = self.curves.iter_mut().find(|c| c.name() == curve.name()) {
            *existing = curve;
        } else {
            self.curves.push(curve);
        }
    }

    /// Looks up a curve by name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CurveNotFound`] when the name is absent.
    pub fn get(&self, name: &str) -> EngineResult<&InterpolatedCurve> {
        self.curves
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| EngineError::curve_not_found(name))
    }

    /// Number of curves held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if the bundle holds no curves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Iterates over the curves in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &InterpolatedCurve> {
        self.curves.iter()
    }

    /// Curve names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(InterpolatedCurve::name)
    }
}
