//! Vector root-finding for curve calibration.
//!
//! Calibrating a curve set means driving a vector of instrument
//! residuals to zero in the node values. [`BroydenSolver`] does this
//! with one Jacobian evaluation up front and rank-one updates after,
//! which matters when each Jacobian assembly walks every instrument.
//!
//! # Convergence
//!
//! A step is accepted as converged when every component satisfies
//!
//! ```text
//! |dx_i| <= abs_tolerance + rel_tolerance * |x_i|
//! ```
//!
//! so tolerances behave sensibly for node values of any magnitude. The
//! reported residual norm is the largest absolute residual component.

mod broyden;

pub use broyden::BroydenSolver;

use nalgebra::DVector;

/// Default absolute step tolerance.
pub const DEFAULT_ABS_TOLERANCE: f64 = 1e-7;

/// Default relative step tolerance.
pub const DEFAULT_REL_TOLERANCE: f64 = 1e-7;

/// Default maximum iterations for vector root-finding.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for vector root-finding.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Absolute tolerance on each step component.
    pub abs_tolerance: f64,
    /// Relative tolerance on each step component.
    pub rel_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            abs_tolerance: DEFAULT_ABS_TOLERANCE,
            rel_tolerance: DEFAULT_REL_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(abs_tolerance: f64, rel_tolerance: f64, max_iterations: u32) -> Self {
        Self {
            abs_tolerance,
            rel_tolerance,
            max_iterations,
        }
    }

    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_abs_tolerance(mut self, abs_tolerance: f64) -> Self {
        self.abs_tolerance = abs_tolerance;
        self
    }

    /// Sets the relative tolerance.
    #[must_use]
    pub fn with_rel_tolerance(mut self, rel_tolerance: f64) -> Self {
        self.rel_tolerance = rel_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a vector root-finding iteration.
#[derive(Debug, Clone)]
pub struct VectorRoot {
    /// The root found.
    pub root: DVector<f64>,
    /// Number of iterations used.
    pub iterations: u32,
    /// Largest absolute residual component at the root.
    pub residual_norm: f64,
}
