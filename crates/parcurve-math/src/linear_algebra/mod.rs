//! Dense linear system solving for calibration.
//!
//! The Jacobian systems solved during curve calibration are small and
//! dense, and occasionally near-singular when instruments overlap. The
//! [`Decomposition`] enum makes the factorization an explicit, loggable
//! choice so a caller can retry a failed LU solve with SVD.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Relative threshold under which an LU pivot is treated as zero.
const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Singular values below this are dropped in the SVD pseudo-inverse.
const SVD_EPSILON: f64 = 1e-10;

/// Matrix decomposition used to solve a dense linear system.
///
/// LU with partial pivoting is the fast default. SVD solves in the
/// least-squares sense through the pseudo-inverse and tolerates the
/// rank-deficient systems LU rejects.
///
/// # Example
///
/// ```rust
/// use nalgebra::{DMatrix, DVector};
/// use parcurve_math::linear_algebra::Decomposition;
///
/// let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
/// let b = DVector::from_vec(vec![5.0, 5.0]);
///
/// let x = Decomposition::Lu.solve(&a, &b).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Decomposition {
    /// LU decomposition with partial pivoting.
    #[default]
    Lu,
    /// Singular value decomposition (pseudo-inverse solve).
    Svd,
}

impl Decomposition {
    /// Solves the square system `a * x = b`.
    ///
    /// # Errors
    ///
    /// - [`MathError::InvalidInput`] if `a` is not square
    /// - [`MathError::DimensionMismatch`] if `b` does not match `a`
    /// - [`MathError::SingularMatrix`] if LU meets a zero pivot
    pub fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
        if a.nrows() != a.ncols() {
            return Err(MathError::invalid_input(format!(
                "matrix must be square, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        if b.len() != a.nrows() {
            return Err(MathError::dimension_mismatch(a.nrows(), b.len()));
        }

        match self {
            Decomposition::Lu => {
                let lu = a.clone().lu();
                // nalgebra's LU solve happily divides by tiny pivots,
                // so check the U diagonal before trusting the result
                let diag = lu.u().diagonal();
                let max_pivot = diag.amax();
                if max_pivot == 0.0 || diag.abs().min() < SINGULARITY_TOLERANCE * max_pivot {
                    return Err(MathError::singular_matrix("LU"));
                }
                lu.solve(b).ok_or_else(|| MathError::singular_matrix("LU"))
            }
            Decomposition::Svd => {
                let svd = a.clone().svd(true, true);
                svd.solve(b, SVD_EPSILON).map_err(MathError::invalid_input)
            }
        }
    }

    /// Returns the decomposition name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Decomposition::Lu => "LU",
            Decomposition::Svd => "SVD",
        }
    }
}

impl std::fmt::Display for Decomposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
