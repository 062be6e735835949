//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Linear interpolation between data points.
///
/// The simplest form of interpolation, connecting consecutive points
/// with straight lines. Node weights form the classic hat basis: at a
/// query point only the two bracketing nodes carry weight, and the
/// weights sum to one.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap();
/// let y = interp.interpolate(1.5).unwrap();
/// // y = 2.5 (halfway between (1, 1) and (2, 4))
///
/// let w = interp.node_weights(1.5).unwrap();
/// // w = [0.0, 0.5, 0.5, 0.0]
/// assert!((w[1] - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths
    /// differ, or if the x values are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_nodes(&xs, &ys, 2)?;
        Ok(Self { xs, ys })
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1].
    fn find_segment(&self, x: f64) -> usize {
        match self
            .xs
            .binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i.min(self.xs.len() - 2),
            Err(i) => (i.saturating_sub(1)).min(self.xs.len() - 2),
        }
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if self.in_range(x) {
            Ok(())
        } else {
            Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            })
        }
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let i = self.find_segment(x);

        let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.ys[i] + t * (self.ys[i + 1] - self.ys[i]))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let i = self.find_segment(x);

        Ok((self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]))
    }

    fn node_weights(&self, x: f64) -> MathResult<Vec<f64>> {
        self.check_range(x)?;
        let i = self.find_segment(x);

        let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        let mut weights = vec![0.0; self.xs.len()];
        weights[i] = 1.0 - t;
        weights[i + 1] = t;
        Ok(weights)
    }

    fn derivative_weights(&self, x: f64) -> MathResult<Vec<f64>> {
        self.check_range(x)?;
        let i = self.find_segment(x);

        let h = self.xs[i + 1] - self.xs[i];
        let mut weights = vec![0.0; self.xs.len()];
        weights[i] = -1.0 / h;
        weights[i + 1] = 1.0 / h;
        Ok(weights)
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    fn node_count(&self) -> usize {
        self.xs.len()
    }
}

/// Shared node validation for the interpolator constructors.
pub(crate) fn validate_nodes(xs: &[f64], ys: &[f64], min_points: usize) -> MathResult<()> {
    if xs.len() < min_points {
        return Err(MathError::invalid_node_data(format!(
            "at least {min_points} nodes required, got {}",
            xs.len()
        )));
    }
    if xs.len() != ys.len() {
        return Err(MathError::dimension_mismatch(xs.len(), ys.len()));
    }
    for i in 1..xs.len() {
        if xs[i] <= xs[i - 1] {
            return Err(MathError::invalid_node_data(format!(
                "x values must be strictly increasing: x[{}] = {} follows x[{}] = {}",
                i,
                xs[i],
                i - 1,
                xs[i - 1]
            )));
        }
    }
    Ok(())
}
