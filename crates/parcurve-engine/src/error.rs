//! Error types for curve calibration.
//!
//! This module provides error handling for quote lookup, instrument
//! conversion, curve assembly, and the global calibration solve.

use parcurve_core::CoreError;
use parcurve_math::MathError;
use thiserror::Error;

/// A specialized Result type for calibration operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error types for calibration operations.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// A market quote referenced by a curve definition is absent.
    #[error("Missing market data for '{id}'")]
    MissingMarketData {
        /// Identifier of the missing quote.
        id: String,
    },

    /// An instrument family the converters cannot handle.
    #[error("Unsupported instrument kind: {kind}")]
    UnsupportedInstrument {
        /// Name of the unsupported instrument family.
        kind: String,
    },

    /// A curve definition produced an unusable node set.
    #[error("Invalid node set for curve '{curve}': {reason}")]
    InvalidNodeSet {
        /// Name of the offending curve.
        curve: String,
        /// Description of what is wrong with the nodes.
        reason: String,
    },

    /// The root finder exhausted both decomposition attempts.
    #[error("Calibration failed after {iterations} iterations (residual norm: {residual_norm:.2e})")]
    CalibrationFailed {
        /// Number of iterations attempted on the final try.
        iterations: u32,
        /// Infinity norm of the residual vector at the last iterate.
        residual_norm: f64,
    },

    /// A pricing routine asked the bundle for a curve it does not hold.
    #[error("Curve not found: {name}")]
    CurveNotFound {
        /// Name of the missing curve.
        name: String,
    },

    /// Underlying mathematical failure.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Underlying date or tenor resolution failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Creates a missing market data error.
    #[must_use]
    pub fn missing_market_data(id: impl Into<String>) -> Self {
        Self::MissingMarketData { id: id.into() }
    }

    /// Creates an unsupported instrument error.
    #[must_use]
    pub fn unsupported_instrument(kind: impl Into<String>) -> Self {
        Self::UnsupportedInstrument { kind: kind.into() }
    }

    /// Creates an invalid node set error.
    #[must_use]
    pub fn invalid_node_set(curve: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNodeSet {
            curve: curve.into(),
            reason: reason.into(),
        }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failed(iterations: u32, residual_norm: f64) -> Self {
        Self::CalibrationFailed {
            iterations,
            residual_norm,
        }
    }

    /// Creates a curve not found error.
    #[must_use]
    pub fn curve_not_found(name: impl Into<String>) -> Self {
        Self::CurveNotFound { name: name.into() }
    }
}
