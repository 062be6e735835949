//! Natural cubic spline interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{linear::validate_nodes, Interpolator};

/// Natural cubic spline interpolation.
///
/// Constructs a smooth curve through data points using piecewise cubic
/// polynomials with continuous first and second derivatives.
///
/// "Natural" means the second derivative is zero at the endpoints.
///
/// The knot second derivatives solve a tridiagonal system that is
/// linear in the node values, so node weights are exact: at
/// construction the system is re-solved once per unit node vector and
/// the responses are cached. Unlike the local methods, every node can
/// carry weight at every query point.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{CubicSpline, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![1.0, 2.0, 5.0, 10.0];
///
/// let spline = CubicSpline::new(xs, ys).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Knot second derivatives for the actual y values
    y2s: Vec<f64>,
    /// unit_y2s[k] = knot second derivatives for y = unit vector k
    unit_y2s: Vec<Vec<f64>>,
}

impl CubicSpline {
    /// Builds a natural cubic spline through the given knots.
    ///
    /// # Errors
    ///
    /// Fails when fewer than 3 points are supplied, the coordinate
    /// slices have different lengths, or the x values are not strictly
    /// increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_nodes(&xs, &ys, 3)?;

        let y2s = compute_second_derivatives(&xs, &ys);

        let n = xs.len();
        let mut unit_y2s = Vec::with_capacity(n);
        let mut unit = vec![0.0; n];
        for k in 0..n {
            unit[k] = 1.0;
            unit_y2s.push(compute_second_derivatives(&xs, &unit));
            unit[k] = 0.0;
        }

        Ok(Self {
            xs,
            ys,
            y2s,
            unit_y2s,
        })
    }

    /// Index of the segment containing x, clamped to the last segment
    /// so the right endpoint stays evaluable.
    fn find_segment(&self, x: f64) -> usize {
        let after = self.xs.partition_point(|&node| node <= x);
        after.saturating_sub(1).min(self.xs.len() - 2)
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

    /// Segment index plus the basis factors a, b, h at x.
    fn segment_basis(&self, x: f64) -> (usize, f64, f64, f64) {
        let i = self.find_segment(x);
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;
        (i, a, b, h)
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let (i, a, b, h) = self.segment_basis(x);

        let y = a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * self.y2s[i] + (b * b * b - b) * self.y2s[i + 1]) * (h * h) / 6.0;
        Ok(y)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let (i, a, b, h) = self.segment_basis(x);

        let d = (self.ys[i + 1] - self.ys[i]) / h
            - (3.0 * a * a - 1.0) * h / 6.0 * self.y2s[i]
            + (3.0 * b * b - 1.0) * h / 6.0 * self.y2s[i + 1];
        Ok(d)
    }

    fn node_weights(&self, x: f64) -> MathResult<Vec<f64>> {
        self.check_range(x)?;
        let (i, a, b, h) = self.segment_basis(x);

        let cubic_lo = (a * a * a - a) * (h * h) / 6.0;
        let cubic_hi = (b * b * b - b) * (h * h) / 6.0;

        let mut weights = vec![0.0; self.xs.len()];
        for (k, weight) in weights.iter_mut().enumerate() {
            let u = &self.unit_y2s[k];
            *weight = cubic_lo * u[i] + cubic_hi * u[i + 1];
        }
        weights[i] += a;
        weights[i + 1] += b;
        Ok(weights)
    }

    fn derivative_weights(&self, x: f64) -> MathResult<Vec<f64>> {
        self.check_range(x)?;
        let (i, a, b, h) = self.segment_basis(x);

        let slope_lo = -(3.0 * a * a - 1.0) * h / 6.0;
        let slope_hi = (3.0 * b * b - 1.0) * h / 6.0;

        let mut weights = vec![0.0; self.xs.len()];
        for (k, weight) in weights.iter_mut().enumerate() {
            let u = &self.unit_y2s[k];
            *weight = slope_lo * u[i] + slope_hi * u[i + 1];
        }
        weights[i] -= 1.0 / h;
        weights[i + 1] += 1.0 / h;
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

/// Computes the knot second derivatives for a natural cubic spline.
///
/// Tridiagonal forward sweep followed by back-substitution. The system
/// is linear in `ys`, which is what makes exact node weights possible.
fn compute_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    let mut rhs = vec![0.0; n - 1];

    // Forward elimination. Natural boundary fixes y2 = 0 at both ends,
    // so only interior rows are swept.
    for i in 1..n - 1 {
        let span = xs[i + 1] - xs[i - 1];
        let lower = (xs[i] - xs[i - 1]) / span;
        let pivot = lower * y2s[i - 1] + 2.0;

        y2s[i] = (lower - 1.0) / pivot;

        let slope_diff = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
            - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        rhs[i] = (6.0 * slope_diff / span - lower * rhs[i - 1]) / pivot;
    }

    y2s[n - 1] = 0.0;
    for i in (0..n - 1).rev() {
        y2s[i] = y2s[i] * y2s[i + 1] + rhs[i];
    }

    y2s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_spline_passes_through_knots() {
        let xs = vec![0.25, 1.0, 2.0, 5.0];
        let ys = vec![0.012, 0.015, 0.019, 0.024];

        let spline = CubicSpline::new(xs.clone(), ys.clone()).unwrap();

        for (&x, &y) in xs.iter().zip(&ys) {
            assert_relative_eq!(spline.interpolate(x).unwrap(), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cubic_spline_reproduces_straight_line() {
        // A straight line has zero curvature everywhere, so the natural
        // boundary condition is exact and the spline is the line itself
        let xs = vec![0.0, 0.7, 1.9, 3.0, 4.5];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();

        let spline = CubicSpline::new(xs, ys).unwrap();

        for x in [0.3, 1.0, 2.4, 4.1] {
            assert_relative_eq!(spline.interpolate(x).unwrap(), 2.0 * x + 1.0, epsilon = 1e-10);
            assert_relative_eq!(spline.derivative(x).unwrap(), 2.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_cubic_spline_smoothness_at_knot() {
        // First derivative must agree from both sides of a knot
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 1.0, 0.0, 1.0, 0.0];

        let spline = CubicSpline::new(xs, ys).unwrap();

        let h = 1e-7;
        let left = (spline.interpolate(2.0).unwrap() - spline.interpolate(2.0 - h).unwrap()) / h;
        let right = (spline.interpolate(2.0 + h).unwrap() - spline.interpolate(2.0).unwrap()) / h;
        assert!((left - right).abs() < 1e-5);
    }

    #[test]
    fn test_cubic_spline_weights_at_node() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![1.0, 2.0, 5.0, 10.0];

        let spline = CubicSpline::new(xs, ys).unwrap();

        // Interpolation is exact at a node regardless of the other
        // nodes, so the weight there is a unit vector
        let w = spline.node_weights(2.0).unwrap();
        for (k, wk) in w.iter().enumerate() {
            let expected = if k == 2 { 1.0 } else { 0.0 };
            assert_relative_eq!(*wk, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_cubic_spline_weights_nonlocal() {
        // Unlike linear interpolation, a far node still influences the
        // query through the tridiagonal system
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.01, 0.012, 0.015, 0.018, 0.02];

        let spline = CubicSpline::new(xs, ys).unwrap();

        let w = spline.node_weights(0.5).unwrap();
        assert!(w[3].abs() > 1e-6, "far node weight should be nonzero: {}", w[3]);
    }

    #[test]
    fn test_cubic_spline_out_of_range() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 2.0, 5.0, 10.0]).unwrap();

        assert!(spline.interpolate(-0.25).is_err());
        assert!(spline.interpolate(3.25).is_err());
    }

    #[test]
    fn test_cubic_spline_rejects_two_points() {
        assert!(CubicSpline::new(vec![0.0, 1.0], vec![1.0, 2.0]).is_err());
    }
}
