//! Broyden's method for systems of nonlinear equations.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::linear_algebra::Decomposition;
use crate::solvers::{SolverConfig, VectorRoot};

/// Broyden's method ("good" variant) for vector root-finding.
///
/// The Jacobian is evaluated once at the initial guess. Each iteration
/// solves `J * dx = -f(x)`, takes the full step, and then applies the
/// rank-one secant update
///
/// ```text
/// J <- J + (dy - J * dx) * dx^T / (dx . dx)
/// ```
///
/// so later iterations cost one function evaluation and one linear
/// solve. Near-quadratic convergence is retained for the smooth
/// residual functions that arise in curve calibration.
///
/// Both the residual function and the Jacobian are fallible: a missing
/// quote or an out-of-range query surfaces as an error instead of a
/// poisoned iterate.
///
/// # Example
///
/// ```rust
/// use nalgebra::{DMatrix, DVector};
/// use parcurve_math::solvers::{BroydenSolver, SolverConfig};
///
/// // Find (x, y) with x^2 + y^2 = 4 and x = y
/// let f = |v: &DVector<f64>| {
///     Ok(DVector::from_vec(vec![
///         v[0] * v[0] + v[1] * v[1] - 4.0,
///         v[0] - v[1],
///     ]))
/// };
/// let j = |v: &DVector<f64>| {
///     Ok(DMatrix::from_row_slice(2, 2, &[2.0 * v[0], 2.0 * v[1], 1.0, -1.0]))
/// };
///
/// let solver = BroydenSolver::default();
/// let guess = DVector::from_vec(vec![1.0, 1.0]);
/// let result = solver.find_root(f, j, &guess, &SolverConfig::default()).unwrap();
///
/// assert!((result.root[0] - std::f64::consts::SQRT_2).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BroydenSolver {
    decomposition: Decomposition,
}

impl BroydenSolver {
    /// Creates a solver using the given decomposition for the linear
    /// step.
    #[must_use]
    pub fn new(decomposition: Decomposition) -> Self {
        Self { decomposition }
    }

    /// Sets the decomposition used for the linear step.
    #[must_use]
    pub fn with_decomposition(mut self, decomposition: Decomposition) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Returns the decomposition used for the linear step.
    #[must_use]
    pub fn decomposition(&self) -> Decomposition {
        self.decomposition
    }

    /// Returns the name of the solver.
    #[must_use]
    pub fn name(&self) -> &'static str {
        "Broyden"
    }

    /// Finds a root of the vector function `f`.
    ///
    /// # Arguments
    ///
    /// * `f` - Residual function, one component per equation
    /// * `jacobian` - Jacobian of `f`, evaluated once at the guess
    /// * `initial_guess` - Starting point for the iteration
    /// * `config` - Solver configuration
    ///
    /// # Errors
    ///
    /// - Any error from `f` or `jacobian` is propagated
    /// - [`MathError::SingularMatrix`] if the linear step fails
    /// - [`MathError::ConvergenceFailed`] if the iteration budget is
    ///   exhausted or the residual becomes non-finite
    pub fn find_root<F, J>(
        &self,
        f: F,
        jacobian: J,
        initial_guess: &DVector<f64>,
        config: &SolverConfig,
    ) -> MathResult<VectorRoot>
    where
        F: Fn(&DVector<f64>) -> MathResult<DVector<f64>>,
        J: Fn(&DVector<f64>) -> MathResult<DMatrix<f64>>,
    {
        let n = initial_guess.len();
        let mut x = initial_guess.clone();
        let mut y = f(&x)?;
        if y.len() != n {
            return Err(MathError::dimension_mismatch(n, y.len()));
        }

        // The guess may already price everything back
        if y.amax() <= config.abs_tolerance {
            return Ok(VectorRoot {
                root: x,
                iterations: 0,
                residual_norm: y.amax(),
            });
        }

        let mut j = jacobian(&x)?;
        if j.nrows() != n || j.ncols() != n {
            return Err(MathError::dimension_mismatch(n, j.nrows().max(j.ncols())));
        }

        for iteration in 1..=config.max_iterations {
            let neg_y = -&y;
            let step = self.decomposition.solve(&j, &neg_y)?;
            x += &step;

            let y_new = f(&x)?;
            if y_new.iter().any(|v| !v.is_finite()) {
                log::debug!("broyden diverged at iteration {iteration}: non-finite residual");
                return Err(MathError::convergence_failed(iteration, f64::NAN));
            }

            let converged = step
                .iter()
                .zip(x.iter())
                .all(|(dx, xi)| dx.abs() <= config.abs_tolerance + config.rel_tolerance * xi.abs());

            let dy = &y_new - &y;
            y = y_new;

            log::trace!(
                "broyden iteration {iteration}: residual {:.3e}, step {:.3e}",
                y.amax(),
                step.amax()
            );

            if converged {
                log::debug!(
                    "broyden converged in {iteration} iterations, residual {:.3e}",
                    y.amax()
                );
                return Ok(VectorRoot {
                    root: x,
                    iterations: iteration,
                    residual_norm: y.amax(),
                });
            }

            // Rank-one secant update; skip the degenerate zero step
            let step_norm2 = step.dot(&step);
            if step_norm2 > 0.0 {
                let correction = (&dy - &j * &step) / step_norm2;
                j += correction * step.transpose();
            }
        }

        log::debug!(
            "broyden failed to converge after {} iterations, residual {:.3e}",
            config.max_iterations,
            y.amax()
        );
        Err(MathError::convergence_failed(
            config.max_iterations,
            y.amax(),
        ))
    }
}
