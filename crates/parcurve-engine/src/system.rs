//! The square system handed to the root finder.
//!
//! A [`CurveSystem`] freezes the calibration layout: per-curve sorted
//! node times in a fixed curve order, plus the instrument vector in
//! processing order. It exposes the two pure functions the solver
//! iterates on, [`residuals`](CurveSystem::residuals) and
//! [`jacobian`](CurveSystem::jacobian). The flat candidate vector `x`
//! concatenates node rates curve by curve: the first curve's nodes
//! first, then the next curve's, in node-time order within each curve.

use nalgebra::{DMatrix, DVector};
use parcurve_math::interpolation::{InterpolationScheme, SensitivityMode};
use parcurve_math::MathError;

use crate::bundle::CurveBundle;
use crate::curve::InterpolatedCurve;
use crate::error::{EngineError, EngineResult};
use crate::instruments::Instrument;
use crate::pricing;

/// Node layout of one curve inside the system.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveLayout {
    /// Curve name.
    pub name: String,
    /// Node times, sorted strictly ascending.
    pub node_times: Vec<f64>,
    /// Interpolation scheme for the rebuilt curve.
    pub scheme: InterpolationScheme,
}

impl CurveLayout {
    /// Creates a layout.
    #[must_use]
    pub fn new(name: impl Into<String>, node_times: Vec<f64>, scheme: InterpolationScheme) -> Self {
        Self {
            name: name.into(),
            node_times,
            scheme,
        }
    }
}

/// The curve finder function: residuals and Jacobian in the flat node
/// rate vector.
///
/// Both evaluation functions are pure in `x`; the system holds no
/// iteration state. Row order equals the instrument processing order,
/// and column `j` always refers to the same (curve, node) pair as
/// entry `j` of `x`.
#[derive(Debug, Clone)]
pub struct CurveSystem {
    curves: Vec<CurveLayout>,
    instruments: Vec<Instrument>,
    sensitivity: SensitivityMode,
}

impl CurveSystem {
    /// Creates a system from curve layouts and instruments.
    #[must_use]
    pub fn new(curves: Vec<CurveLayout>, instruments: Vec<Instrument>) -> Self {
        Self {
            curves,
            instruments,
            sensitivity: SensitivityMode::default(),
        }
    }

    /// Sets the node sensitivity mode used for Jacobian assembly.
    #[must_use]
    pub fn with_sensitivity(mut self, mode: SensitivityMode) -> Self {
        self.sensitivity = mode;
        self
    }

    /// The curve layouts, in curve order.
    #[must_use]
    pub fn curves(&self) -> &[CurveLayout] {
        &self.curves
    }

    /// The instruments, in row order.
    #[must_use]
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Total node count across all curves (the length of `x`).
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.curves.iter().map(|c| c.node_times.len()).sum()
    }

    /// Number of instruments (the number of residual rows).
    #[must_use]
    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// Splits the flat candidate vector into per-curve rate slices, in
    /// curve order.
    ///
    /// # Errors
    ///
    /// Returns a dimension mismatch when `x` does not have one entry
    /// per node.
    pub fn split<'a>(&self, x: &'a DVector<f64>) -> EngineResult<Vec<&'a [f64]>> {
        if x.len() != self.total_nodes() {
            return Err(MathError::dimension_mismatch(self.total_nodes(), x.len()).into());
        }
        let slice = x.as_slice();
        let mut parts = Vec::with_capacity(self.curves.len());
        let mut offset = 0;
        for layout in &self.curves {
            let n = layout.node_times.len();
            parts.push(&slice[offset..offset + n]);
            offset += n;
        }
        Ok(parts)
    }

    /// Rebuilds the curve bundle implied by a candidate vector.
    ///
    /// # Errors
    ///
    /// Propagates dimension and node-set errors from curve
    /// construction.
    pub fn build_bundle(&self, x: &DVector<f64>) -> EngineResult<CurveBundle> {
        let parts = self.split(x)?;
        let mut bundle = CurveBundle::new();
        for (layout, rates) in self.curves.iter().zip(parts) {
            let curve = InterpolatedCurve::new(
                &layout.name,
                layout.node_times.clone(),
                rates.to_vec(),
                layout.scheme,
            )?
            .with_sensitivity(self.sensitivity);
            bundle.insert(curve);
        }
        Ok(bundle)
    }

    /// The residual vector at `x`: entry `i` is instrument `i`'s
    /// calibration residual on the rebuilt bundle.
    ///
    /// # Errors
    ///
    /// Propagates curve construction and pricing errors.
    pub fn residuals(&self, x: &DVector<f64>) -> EngineResult<DVector<f64>> {
        let bundle = self.build_bundle(x)?;
        let mut residuals = DVector::zeros(self.instruments.len());
        for (i, instrument) in self.instruments.iter().enumerate() {
            residuals[i] = pricing::present_value(instrument, &bundle)?;
        }
        Ok(residuals)
    }

    /// The dense Jacobian at `x`: rows follow the instrument order of
    /// [`residuals`](Self::residuals), columns follow the concatenated
    /// node index of `x`.
    ///
    /// # Errors
    ///
    /// Propagates curve construction and pricing errors.
    pub fn jacobian(&self, x: &DVector<f64>) -> EngineResult<DMatrix<f64>> {
        let bundle = self.build_bundle(x)?;
        let mut jacobian = DMatrix::zeros(self.instruments.len(), self.total_nodes());
        for (i, instrument) in self.instruments.iter().enumerate() {
            let per_curve = pricing::node_sensitivity(instrument, &bundle)?;
            for (name, weights) in &per_curve {
                let offset = self.curve_offset(name)?;
                for (k, w) in weights.iter().enumerate() {
                    jacobian[(i, offset + k)] = *w;
                }
            }
        }
        Ok(jacobian)
    }

    /// Column offset of a curve's first node in the flat vector.
    fn curve_offset(&self, name: &str) -> EngineResult<usize> {
        let mut offset = 0;
        for layout in &self.curves {
            if layout.name == name {
                return Ok(offset);
            }
            offset += layout.node_times.len();
        }
        Err(EngineError::curve_not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{Cash, Future};
    use approx::assert_relative_eq;

    fn dual_system() -> CurveSystem {
        let funding = CurveLayout::new(
            "funding",
            vec![0.5, 1.0],
            InterpolationScheme::default(),
        );
        let forward = CurveLayout::new(
            "forward",
            vec![0.25, 0.75, 1.5],
            InterpolationScheme::default(),
        );
        let instruments = vec![
            Instrument::Cash(Cash::new(0.0, 0.5, 0.5069, 0.011, "funding")),
            Instrument::Cash(Cash::new(0.0, 1.0, 1.0139, 0.012, "funding")),
            Instrument::Future(Future::new(0.0, 0.25, 0.2528, 98.80, "forward")),
            Instrument::Future(Future::new(0.5, 0.75, 0.2528, 98.60, "forward")),
            Instrument::Future(Future::new(1.25, 1.5, 0.2528, 98.40, "forward")),
        ];
        CurveSystem::new(vec![funding, forward], instruments)
    }

    #[test]
    fn test_split_in_curve_order() {
        let system = dual_system();
        let x = DVector::from_vec(vec![0.01, 0.02, 0.03, 0.04, 0.05]);
        let parts = system.split(&x).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], &[0.01, 0.02]);
        assert_eq!(parts[1], &[0.03, 0.04, 0.05]);
    }

    #[test]
    fn test_split_rejects_wrong_length() {
        let system = dual_system();
        let x = DVector::from_vec(vec![0.01; 4]);
        assert!(system.split(&x).is_err());
    }

    #[test]
    fn test_residual_rows_follow_instrument_order() {
        let system = dual_system();
        let x = DVector::from_vec(vec![0.011, 0.012, 0.012, 0.014, 0.016]);
        let residuals = system.residuals(&x).unwrap();
        assert_eq!(residuals.len(), 5);

        let bundle = system.build_bundle(&x).unwrap();
        for (i, instrument) in system.instruments().iter().enumerate() {
            let pv = pricing::present_value(instrument, &bundle).unwrap();
            assert_relative_eq!(residuals[i], pv, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_jacobian_block_structure() {
        // Deposits live on the funding curve only, futures on the
        // forward curve only, so the off blocks are zero.
        let system = dual_system();
        let x = DVector::from_vec(vec![0.011, 0.012, 0.012, 0.014, 0.016]);
        let jacobian = system.jacobian(&x).unwrap();
        assert_eq!(jacobian.nrows(), 5);
        assert_eq!(jacobian.ncols(), 5);

        // Deposit rows: forward columns (2..5) are zero
        for i in 0..2 {
            for j in 2..5 {
                assert_eq!(jacobian[(i, j)], 0.0);
            }
        }
        // Future rows: funding columns (0..2) are zero
        for i in 2..5 {
            for j in 0..2 {
                assert_eq!(jacobian[(i, j)], 0.0);
            }
        }
        // Each future's own-period columns are populated
        assert!(jacobian[(3, 3)].abs() > 1.0);
    }

    #[test]
    fn test_jacobian_matches_finite_differences() {
        let system = dual_system();
        let x = DVector::from_vec(vec![0.011, 0.012, 0.012, 0.014, 0.016]);
        let jacobian = system.jacobian(&x).unwrap();
        let h = 1e-6;
        for j in 0..system.total_nodes() {
            let mut up = x.clone();
            let mut dn = x.clone();
            up[j] += h;
            dn[j] -= h;
            let r_up = system.residuals(&up).unwrap();
            let r_dn = system.residuals(&dn).unwrap();
            for i in 0..system.instrument_count() {
                let fd = (r_up[i] - r_dn[i]) / (2.0 * h);
                assert_relative_eq!(jacobian[(i, j)], fd, epsilon = 1e-8, max_relative = 1e-4);
            }
        }
    }

    #[test]
    fn test_finite_difference_mode_agrees_with_analytic() {
        let system = dual_system();
        let x = DVector::from_vec(vec![0.011, 0.012, 0.012, 0.014, 0.016]);
        let analytic = system.jacobian(&x).unwrap();
        let fd_system = dual_system().with_sensitivity(SensitivityMode::FiniteDifference);
        let fd = fd_system.jacobian(&x).unwrap();
        for i in 0..analytic.nrows() {
            for j in 0..analytic.ncols() {
                assert_relative_eq!(
                    analytic[(i, j)],
                    fd[(i, j)],
                    epsilon = 1e-6,
                    max_relative = 1e-4
                );
            }
        }
    }
}
