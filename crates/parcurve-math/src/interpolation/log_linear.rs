//! Log-linear interpolation.
//!
//! Interpolates the logarithm of values, which is useful for discount
//! factors as it guarantees positivity and corresponds to piecewise
//! constant forward rates.

use crate::error::{MathError, MathResult};
use crate::interpolation::{linear::validate_nodes, Interpolator};

/// Log-linear interpolation between data points.
///
/// Interpolates the natural logarithm of y values, then exponentiates
/// the result:
///
/// ```text
/// y(x) = exp(linear_interpolate(x, ln(y)))
/// ```
///
/// Node weights are the chain rule through the exponential: the hat
/// weight on `ln(y)` scaled by `y(x) / y_node`.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{Interpolator, LogLinearInterpolator};
///
/// // Discount factors at different maturities
/// let times = vec![0.0, 1.0, 2.0, 3.0];
/// let discount_factors = vec![1.0, 0.97, 0.94, 0.91];
///
/// let interp = LogLinearInterpolator::new(times, discount_factors).unwrap();
/// let df = interp.interpolate(1.5).unwrap();
/// assert!(df > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Precomputed log(y) values
    log_ys: Vec<f64>,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates (must all be positive)
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths
    /// differ, if the x values are not strictly increasing, or if any
    /// y value is non-positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_nodes(&xs, &ys, 2)?;

        let mut log_ys = Vec::with_capacity(ys.len());
        for (i, &y) in ys.iter().enumerate() {
            if y <= 0.0 {
                return Err(MathError::invalid_node_data(format!(
                    "y[{i}] = {y} is not positive; log-linear requires positive values"
                )));
            }
            log_ys.push(y.ln());
        }

        Ok(Self { xs, ys, log_ys })
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

    /// Value, hat fraction, and log-slope on the segment containing x.
    fn segment_state(&self, x: f64) -> (usize, f64, f64, f64) {
        let i = self.find_segment(x);
        let h = self.xs[i + 1] - self.xs[i];
        let t = (x - self.xs[i]) / h;
        let log_y = self.log_ys[i] + t * (self.log_ys[i + 1] - self.log_ys[i]);
        let g = (self.log_ys[i + 1] - self.log_ys[i]) / h;
        (i, t, log_y.exp(), g)
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let (_, _, y, _) = self.segment_state(x);
        Ok(y)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        // y(x) = exp(log interpolation), so dy/dx = y(x) * d(log y)/dx
        let (_, _, y, g) = self.segment_state(x);
        Ok(y * g)
    }

    fn node_weights(&self, x: f64) -> MathResult<Vec<f64>> {
        self.check_range(x)?;
        let (i, t, y, _) = self.segment_state(x);

        // d y(x) / d y_k = y(x) * hat_k / y_k
        let mut weights = vec![0.0; self.xs.len()];
        weights[i] = y * (1.0 - t) / self.ys[i];
        weights[i + 1] = y * t / self.ys[i + 1];
        Ok(weights)
    }

    fn derivative_weights(&self, x: f64) -> MathResult<Vec<f64>> {
        self.check_range(x)?;
        let (i, t, y, g) = self.segment_state(x);
        let h = self.xs[i + 1] - self.xs[i];

        // Product rule on y(x) * g: both factors depend on the node
        let mut weights = vec![0.0; self.xs.len()];
        weights[i] = (y / self.ys[i]) * ((1.0 - t) * g - 1.0 / h);
        weights[i + 1] = (y / self.ys[i + 1]) * (t * g + 1.0 / h);
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
