//! Least-squares solves for the Levenberg-Marquardt step.
//!
//! Each LM iteration solves the damped linear problem
//!
//! ```text
//! minimize ||J δ - r||^2 + λ ||D δ||^2
//! ```
//!
//! which we express as an ordinary least-squares solve on the augmented
//! system `[J; sqrt(λ) D] δ = [r; 0]`.
//!
//! Implementation choices:
//! - SVD solves the least-squares problem robustly even when the design
//!   matrix is tall (more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic
//!   for non-square matrices.)
//! - The parameter dimension here is tiny (a single temperature), so SVD
//!   performance is irrelevant.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve one damped Gauss-Newton step.
///
/// `jacobian` is N×p, `residuals` is N, `damping` is the LM λ and `scale`
/// holds the Marquardt column scales (typically `sqrt(diag(JᵀJ))`, floored
/// away from zero by the caller).
pub fn solve_damped_step(
    jacobian: &DMatrix<f64>,
    residuals: &DVector<f64>,
    damping: f64,
    scale: &[f64],
) -> Option<DVector<f64>> {
    let n = jacobian.nrows();
    let p = jacobian.ncols();
    debug_assert_eq!(scale.len(), p);

    let mut augmented = DMatrix::<f64>::zeros(n + p, p);
    let mut rhs = DVector::<f64>::zeros(n + p);

    for i in 0..n {
        for j in 0..p {
            augmented[(i, j)] = jacobian[(i, j)];
        }
        rhs[i] = residuals[i];
    }
    let sqrt_damping = damping.max(0.0).sqrt();
    for j in 0..p {
        augmented[(n + j, j)] = sqrt_damping * scale[j];
    }

    solve_least_squares(&augmented, &rhs)
}
