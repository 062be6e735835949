//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during interpolation and root-finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding failed to converge within the iteration budget.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.3e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Largest absolute residual component at the last iterate.
        residual: f64,
    },

    /// A linear system could not be solved by the chosen decomposition.
    #[error("Singular matrix: {decomposition} decomposition cannot solve the system")]
    SingularMatrix {
        /// Name of the decomposition that failed (e.g. "LU").
        decomposition: &'static str,
    },

    /// A query point fell outside the interpolation span and no
    /// extrapolator was configured for that side.
    #[error("Extrapolation not allowed: {x} is outside [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// The query point.
        x: f64,
        /// First abscissa.
        min: f64,
        /// Last abscissa.
        max: f64,
    },

    /// Node data that cannot define an interpolator.
    #[error("Invalid node data: {reason}")]
    InvalidNodeData {
        /// Why the node set was rejected.
        reason: String,
    },

    /// Vector or matrix sizes that do not line up.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates a singular matrix error for the named decomposition.
    #[must_use]
    pub fn singular_matrix(decomposition: &'static str) -> Self {
        Self::SingularMatrix { decomposition }
    }

    /// Creates an invalid node data error.
    #[must_use]
    pub fn invalid_node_data(reason: impl Into<String>) -> Self {
        Self::InvalidNodeData {
            reason: reason.into(),
        }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True for failures that an SVD retry may still be able to solve:
    /// singular systems and stalled iterations.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SingularMatrix { .. } | Self::ConvergenceFailed { .. }
        )
    }
}
