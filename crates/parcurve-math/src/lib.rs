//! # Parcurve Math
//!
//! Numerical building blocks for the Parcurve curve calibration
//! library.
//!
//! This crate provides:
//!
//! - **Interpolation**: Curve interpolation with exact node
//!   sensitivities (Linear, Log-Linear, Natural Cubic)
//! - **Extrapolation**: Behavior outside the node span (Error, Flat,
//!   Linear), configured per side
//! - **Linear Algebra**: Dense system solving via LU or SVD
//! - **Solvers**: Broyden's method for vector root-finding
//!
//! ## Design Philosophy
//!
//! - **Sensitivities are first class**: every interpolator reports how
//!   its output moves with each node, so Jacobians are exact rather
//!   than bumped
//! - **Errors, not panics**: singular systems, bad node data, and
//!   stalled iterations all surface as [`MathError`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod extrapolation;
pub mod interpolation;
pub mod linear_algebra;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::extrapolation::{
        ExtrapolationMethod, Extrapolator, FlatExtrapolator, LinearExtrapolator,
    };
    pub use crate::interpolation::{
        BoundedInterpolator, CubicSpline, InterpolationMethod, InterpolationScheme, Interpolator,
        LinearInterpolator, LogLinearInterpolator, SensitivityMode,
    };
    pub use crate::linear_algebra::Decomposition;
    pub use crate::solvers::{BroydenSolver, SolverConfig, VectorRoot};
}

pub use error::{MathError, MathResult};
