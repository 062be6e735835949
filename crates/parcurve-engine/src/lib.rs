//! # Parcurve Engine
//!
//! Multi-curve yield curve calibration.
//!
//! The engine bootstraps a funding (discount) curve and a forward
//! (projection) curve jointly from market quotes. A curve is described
//! by a [`definition::CurveDefinition`]: a list of instrument templates
//! (deposits, FRAs, futures, swaps, tenor basis swaps) paired with
//! quote ids. The [`Calibrator`] resolves the templates against a
//! valuation date, prices them off candidate curves, and drives the
//! node rates with Broyden's method until every instrument reprices to
//! zero.
//!
//! ## Pipeline
//!
//! 1. **Resolve** ([`convert`]): templates + conventions + quotes
//!    become dated, scaled instruments in curve time
//! 2. **Lay out** ([`calibrate`]): node times are collected and sorted
//!    per curve; instruments keep definition order
//! 3. **Iterate** ([`system`], [`pricing`]): residuals and an exact
//!    Jacobian are evaluated on candidate curves until convergence
//! 4. **Package**: calibrated curves, the final Jacobian, and a solve
//!    report come back as [`calibrate::CalibratedCurves`]
//!
//! ## Example
//!
//! ```rust
//! use parcurve_core::types::Date;
//! use parcurve_engine::definition::{CurveDefinition, NodeTemplate};
//! use parcurve_engine::prelude::*;
//!
//! let funding = CurveDefinition::new("funding")
//!     .with_node(
//!         NodeTemplate::Deposit { tenor: "3M".parse().unwrap() },
//!         "DEPO-3M",
//!     )
//!     .with_node(
//!         NodeTemplate::Deposit { tenor: "1Y".parse().unwrap() },
//!         "DEPO-1Y",
//!     );
//! let quotes = QuoteMap::new()
//!     .with_quote("DEPO-3M", 1.10)
//!     .with_quote("DEPO-1Y", 1.45);
//!
//! let valuation = Date::from_ymd(2026, 3, 16).unwrap();
//! let result = Calibrator::new()
//!     .calibrate_single(&funding, &quotes, valuation)
//!     .unwrap();
//!
//! let df = result.funding.discount_factor(1.0).unwrap();
//! assert!(df > 0.97 && df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod bundle;
pub mod calibrate;
pub mod conventions;
pub mod convert;
pub mod curve;
pub mod definition;
pub mod error;
pub mod instruments;
pub mod pricing;
pub mod quotes;
pub mod system;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bundle::CurveBundle;
    pub use crate::calibrate::{CalibratedCurves, CalibrationReport, Calibrator};
    pub use crate::conventions::CurveConventions;
    pub use crate::convert::NodeConverter;
    pub use crate::curve::InterpolatedCurve;
    pub use crate::definition::{CurveDefinition, CurveNode, NodeTemplate};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::instruments::Instrument;
    pub use crate::quotes::QuoteMap;
    pub use crate::system::{CurveLayout, CurveSystem};
}

// Re-export commonly used types at crate root
pub use calibrate::{CalibratedCurves, CalibrationReport, Calibrator, DEFAULT_INITIAL_RATE};
pub use conventions::CurveConventions;
pub use error::{EngineError, EngineResult};
