//! Curve definitions.
//!
//! A [`CurveDefinition`] is the static description of one curve before
//! any market data is seen: a name, an interpolation scheme, and a list
//! of calibration nodes. Each node pairs an instrument template with
//! the id of the quote that prices it. Definitions are plain data and
//! serialize cleanly, so they can live in configuration files.

use parcurve_core::types::Tenor;
use parcurve_math::interpolation::InterpolationScheme;
use serde::{Deserialize, Serialize};

/// Instrument template for a calibration node.
///
/// Templates are resolved against a valuation date and a convention
/// bundle by the node converter; until then they carry only market
/// shorthand (tenors and month offsets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeTemplate {
    /// A money-market deposit maturing at `tenor` past spot.
    Deposit {
        /// Deposit maturity tenor (e.g. "3M").
        tenor: Tenor,
    },
    /// A forward rate agreement over months `start` to `end` past spot
    /// (a 3x6 FRA is `start: 3, end: 6`).
    Fra {
        /// Months from spot to the period start.
        start: u32,
        /// Months from spot to the period end.
        end: u32,
    },
    /// An interest-rate future whose underlying period starts `start`
    /// months past spot and runs for the conventional futures period.
    Future {
        /// Months from spot to the underlying period start.
        start: u32,
    },
    /// A fixed-vs-float interest-rate swap maturing at `tenor`.
    Swap {
        /// Swap maturity tenor (e.g. "5Y").
        tenor: Tenor,
    },
    /// A float-vs-float tenor basis swap maturing at `tenor`, quoted as
    /// a spread in basis points on the forward-projecting leg.
    TenorSwap {
        /// Swap maturity tenor.
        tenor: Tenor,
    },
}

impl NodeTemplate {
    /// Returns the instrument family name, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            NodeTemplate::Deposit { .. } => "deposit",
            NodeTemplate::Fra { .. } => "fra",
            NodeTemplate::Future { .. } => "future",
            NodeTemplate::Swap { .. } => "swap",
            NodeTemplate::TenorSwap { .. } => "tenor swap",
        }
    }
}

/// One calibration node: a template plus the id of its market quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveNode {
    /// The instrument template.
    pub template: NodeTemplate,
    /// Id of the quote that prices this node.
    pub quote_id: String,
}

impl CurveNode {
    /// Creates a node from a template and quote id.
    #[must_use]
    pub fn new(template: NodeTemplate, quote_id: impl Into<String>) -> Self {
        Self {
            template,
            quote_id: quote_id.into(),
        }
    }
}

/// Static description of one curve to calibrate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDefinition {
    /// Curve name; bundle lookups and instrument bindings use it.
    pub name: String,
    /// Interpolation and extrapolation scheme for the curve.
    #[serde(default)]
    pub scheme: InterpolationScheme,
    /// Calibration nodes, in quoting order (not necessarily sorted).
    pub nodes: Vec<CurveNode>,
}

impl CurveDefinition {
    /// Creates an empty definition with the default scheme.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: InterpolationScheme::default(),
            nodes: Vec::new(),
        }
    }

    /// Sets the interpolation scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: InterpolationScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Adds a calibration node.
    #[must_use]
    pub fn with_node(mut self, template: NodeTemplate, quote_id: impl Into<String>) -> Self {
        self.nodes.push(CurveNode::new(template, quote_id));
        self
    }

    /// Adds a batch of calibration nodes.
    #[must_use]
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = CurveNode>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Number of calibration nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
