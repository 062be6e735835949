//! Calibration orchestration.
//!
//! The [`Calibrator`] drives a full run: it resolves every definition
//! node into an instrument, lays the node times out per curve, seeds a
//! flat initial guess, hands the square system to Broyden's method, and
//! packages the solved curves with the final Jacobian and a solve
//! report. The linear step uses LU first; if LU meets a singular matrix
//! or the iteration stalls, one retry with SVD follows before the run
//! is declared failed.
//!
//! Node layout is assembled in a single pass over immutable pairs: each
//! node contributes a (time, guess) pair to its curve, the pairs are
//! sorted per curve by time, and the guess stays attached to its time
//! through the sort. The instrument list keeps definition order, which
//! fixes the Jacobian row order; the sorted pairs fix the column order.

use nalgebra::{DMatrix, DVector};
use parcurve_core::types::Date;
use parcurve_math::interpolation::SensitivityMode;
use parcurve_math::linear_algebra::Decomposition;
use parcurve_math::solvers::{BroydenSolver, SolverConfig, VectorRoot};
use parcurve_math::MathError;
use tracing::{debug, info, warn};

use crate::bundle::CurveBundle;
use crate::convert::NodeConverter;
use crate::curve::InterpolatedCurve;
use crate::definition::CurveDefinition;
use crate::error::{EngineError, EngineResult};
use crate::quotes::QuoteMap;
use crate::system::{CurveLayout, CurveSystem};
use crate::CurveConventions;

/// Flat zero rate every node starts from: 1%.
pub const DEFAULT_INITIAL_RATE: f64 = 0.01;

/// How a calibration run solved, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationReport {
    /// Decomposition that produced the solution.
    pub decomposition: Decomposition,
    /// Broyden iterations used.
    pub iterations: u32,
    /// Max-norm of the residual vector at the solution.
    pub residual_norm: f64,
}

/// Result of a calibration run.
///
/// For a single-curve run the funding and forward curves are the same
/// curve under one name.
#[derive(Debug, Clone)]
pub struct CalibratedCurves {
    /// The calibrated funding (discount) curve.
    pub funding: InterpolatedCurve,
    /// The calibrated forward (projection) curve.
    pub forward: InterpolatedCurve,
    /// Jacobian at the solution: rows follow instrument order, columns
    /// follow the concatenated node order (funding nodes, then forward
    /// nodes).
    pub jacobian: DMatrix<f64>,
    /// Solve diagnostics.
    pub report: CalibrationReport,
}

impl CalibratedCurves {
    /// The calibrated curves as a bundle, ready for pricing.
    #[must_use]
    pub fn bundle(&self) -> CurveBundle {
        CurveBundle::new()
            .with_curve(self.funding.clone())
            .with_curve(self.forward.clone())
    }
}

/// Orchestrates curve calibration runs.
///
/// # Example
///
/// ```rust
/// use parcurve_core::types::Date;
/// use parcurve_engine::definition::{CurveDefinition, NodeTemplate};
/// use parcurve_engine::quotes::QuoteMap;
/// use parcurve_engine::Calibrator;
///
/// let definition = CurveDefinition::new("funding")
///     .with_node(
///         NodeTemplate::Deposit { tenor: "3M".parse().unwrap() },
///         "DEPO-3M",
///     )
///     .with_node(
///         NodeTemplate::Deposit { tenor: "1Y".parse().unwrap() },
///         "DEPO-1Y",
///     );
/// let quotes = QuoteMap::new()
///     .with_quote("DEPO-3M", 1.10)
///     .with_quote("DEPO-1Y", 1.45);
///
/// let result = Calibrator::new()
///     .calibrate_single(&definition, &quotes, Date::from_ymd(2026, 3, 16).unwrap())
///     .unwrap();
/// assert!(result.report.residual_norm <= 1e-7);
/// ```
#[derive(Debug, Clone)]
pub struct Calibrator {
    conventions: CurveConventions,
    solver_config: SolverConfig,
    initial_rate: f64,
    sensitivity: SensitivityMode,
}

impl Calibrator {
    /// Creates a calibrator with default conventions and solver
    /// settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the market conventions used for node resolution.
    #[must_use]
    pub fn with_conventions(mut self, conventions: CurveConventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Sets the root-finder configuration.
    #[must_use]
    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    /// Sets the flat initial zero rate (decimal).
    #[must_use]
    pub fn with_initial_rate(mut self, rate: f64) -> Self {
        self.initial_rate = rate;
        self
    }

    /// Sets the node sensitivity mode used for Jacobian assembly.
    #[must_use]
    pub fn with_sensitivity(mut self, mode: SensitivityMode) -> Self {
        self.sensitivity = mode;
        self
    }

    /// Calibrates a funding and a forward curve jointly.
    ///
    /// Funding-curve instruments discount on the funding curve; forward
    /// projections come off the forward curve. The two definitions form
    /// one square system, so instruments on either curve may reference
    /// both.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingMarketData`] when a node's quote id is
    ///   absent, naming the id
    /// - [`EngineError::InvalidNodeSet`] for an empty definition,
    ///   duplicate node times, or definitions sharing a name
    /// - [`EngineError::CalibrationFailed`] when the root finder
    ///   exhausts both decompositions
    pub fn calibrate(
        &self,
        funding: &CurveDefinition,
        forward: &CurveDefinition,
        quotes: &QuoteMap,
        valuation_date: Date,
    ) -> EngineResult<CalibratedCurves> {
        if funding.name == forward.name {
            return Err(EngineError::invalid_node_set(
                &forward.name,
                "funding and forward definitions share a name",
            ));
        }
        self.run(
            &[funding, forward],
            &funding.name,
            &forward.name,
            quotes,
            valuation_date,
        )
    }

    /// Calibrates one curve that both discounts and projects.
    ///
    /// # Errors
    ///
    /// Same conditions as [`calibrate`](Self::calibrate).
    pub fn calibrate_single(
        &self,
        definition: &CurveDefinition,
        quotes: &QuoteMap,
        valuation_date: Date,
    ) -> EngineResult<CalibratedCurves> {
        self.run(
            &[definition],
            &definition.name,
            &definition.name,
            quotes,
            valuation_date,
        )
    }

    fn run(
        &self,
        definitions: &[&CurveDefinition],
        funding_name: &str,
        forward_name: &str,
        quotes: &QuoteMap,
        valuation_date: Date,
    ) -> EngineResult<CalibratedCurves> {
        let converter = NodeConverter::new(
            self.conventions.clone(),
            valuation_date,
            funding_name,
            forward_name,
        );

        // One pass: each node yields an instrument (kept in definition
        // order) and a (time, guess) pair on its curve. The pair stays
        // intact through the per-curve sort below.
        let mut instruments = Vec::new();
        let mut pillars: Vec<Vec<(f64, f64)>> = vec![Vec::new(); definitions.len()];
        for (definition, pillar) in definitions.iter().zip(&mut pillars) {
            if definition.nodes.is_empty() {
                return Err(EngineError::invalid_node_set(
                    &definition.name,
                    "definition has no nodes",
                ));
            }
            for node in &definition.nodes {
                let quote = quotes.get(&node.quote_id)?;
                let instrument = converter.convert(&node.template, quote, &definition.name)?;
                pillar.push((instrument.node_time(), self.initial_rate));
                instruments.push(instrument);
            }
        }

        let mut layouts = Vec::with_capacity(definitions.len());
        let mut guess = Vec::new();
        for (definition, pillar) in definitions.iter().zip(&mut pillars) {
            pillar.sort_by(|a, b| a.0.total_cmp(&b.0));
            for pair in pillar.windows(2) {
                if pair[1].0 <= pair[0].0 {
                    return Err(EngineError::invalid_node_set(
                        &definition.name,
                        format!("duplicate node time {:.6}", pair[1].0),
                    ));
                }
            }
            let times: Vec<f64> = pillar.iter().map(|p| p.0).collect();
            guess.extend(pillar.iter().map(|p| p.1));
            debug!(
                "Curve {} laid out with {} nodes, last at {:.4}",
                definition.name,
                times.len(),
                times.last().copied().unwrap_or(0.0)
            );
            layouts.push(CurveLayout::new(&definition.name, times, definition.scheme));
        }

        info!(
            "Calibrating {} instruments over {} nodes (funding: {}, forward: {})",
            instruments.len(),
            guess.len(),
            funding_name,
            forward_name
        );

        let system =
            CurveSystem::new(layouts, instruments).with_sensitivity(self.sensitivity);
        let guess = DVector::from_vec(guess);
        let (root, decomposition) = solve_with_fallback(&system, &guess, &self.solver_config)?;

        let bundle = system.build_bundle(&root.root)?;
        let jacobian = system.jacobian(&root.root)?;
        let report = CalibrationReport {
            decomposition,
            iterations: root.iterations,
            residual_norm: root.residual_norm,
        };
        info!(
            "Calibration converged in {} iterations via {} (residual {:.3e})",
            report.iterations, report.decomposition, report.residual_norm
        );

        let funding = bundle.get(funding_name)?.clone();
        let forward = bundle.get(forward_name)?.clone();
        Ok(CalibratedCurves {
            funding,
            forward,
            jacobian,
            report,
        })
    }
}

impl Default for Calibrator {
    fn default() -> Self {
        Self {
            conventions: CurveConventions::default(),
            solver_config: SolverConfig::default(),
            initial_rate: DEFAULT_INITIAL_RATE,
            sensitivity: SensitivityMode::default(),
        }
    }
}

/// Runs Broyden with LU, retrying once with SVD when LU hits a
/// singular matrix or fails to converge.
fn solve_with_fallback(
    system: &CurveSystem,
    guess: &DVector<f64>,
    config: &SolverConfig,
) -> EngineResult<(VectorRoot, Decomposition)> {
    let residuals = |x: &DVector<f64>| system.residuals(x).map_err(to_math);
    let jacobian = |x: &DVector<f64>| system.jacobian(x).map_err(to_math);

    match BroydenSolver::new(Decomposition::Lu).find_root(&residuals, &jacobian, guess, config) {
        Ok(root) => Ok((root, Decomposition::Lu)),
        Err(err) if err.is_retryable() => {
            warn!(error = %err, "LU solve failed, retrying with SVD");
            match BroydenSolver::new(Decomposition::Svd)
                .find_root(&residuals, &jacobian, guess, config)
            {
                Ok(root) => Ok((root, Decomposition::Svd)),
                Err(MathError::ConvergenceFailed {
                    iterations,
                    residual,
                }) => Err(EngineError::calibration_failed(iterations, residual)),
                Err(other) => Err(other.into()),
            }
        }
        Err(other) => Err(other.into()),
    }
}

/// Lowers an engine error into the solver's error space.
///
/// Pricing inside the iteration can only fail for math reasons once
/// quotes are resolved, so anything else degrades to an invalid-input
/// message.
fn to_math(err: EngineError) -> MathError {
    match err {
        EngineError::Math(math) => math,
        other => MathError::invalid_input(other.to_string()),
    }
}
