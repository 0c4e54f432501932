//! Levenberg-Marquardt fit of the temperature parameter.
//!
//! Given:
//! - a wavelength grid `λ_i`
//! - observed intensities `y_i` (same length, finite)
//! - an initial temperature guess
//!
//! we minimize `Σ (y_i - I(λ_i, T))²` over `T` by damped Gauss-Newton:
//! at each iteration a numeric Jacobian column `∂I/∂T` is built by central
//! differences and the damped step is solved through the augmented
//! least-squares system in `math::lsq`. Steps that raise the SSE (or leave
//! the physical domain `T > 0`) are rejected and the damping is escalated;
//! accepted steps relax it.
//!
//! The procedure is fully deterministic: same data, guess and tolerances
//! produce the same result (no internal randomness).

use nalgebra::{DMatrix, DVector};

use crate::domain::{FitResult, WavelengthGrid};
use crate::error::AppError;
use crate::math::solve_damped_step;
use crate::model::radiance_over_grid;

/// Relative parameter step for the central-difference Jacobian.
const JACOBIAN_REL_STEP: f64 = 1e-6;

/// Fitting options: iteration budget, tolerances and damping schedule.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Maximum accepted iterations before giving up.
    pub max_iterations: usize,
    /// Converged when the relative SSE reduction of an accepted step falls
    /// to this level or below.
    pub ftol: f64,
    /// Converged when the accepted step size falls below `xtol * T`.
    pub xtol: f64,
    /// Initial LM damping factor.
    pub damping_init: f64,
    /// Multiplier applied when a step is rejected.
    pub damping_up: f64,
    /// Divisor applied when a step is accepted.
    pub damping_down: f64,
    /// Damping ceiling; escalating past this is a convergence failure.
    pub damping_max: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            ftol: 1e-12,
            xtol: 1e-10,
            damping_init: 1e-3,
            damping_up: 10.0,
            damping_down: 10.0,
            damping_max: 1e12,
        }
    }
}

/// Fit the temperature to observed intensities.
///
/// Errors:
/// - `Domain` for mismatched lengths, non-finite observations, or a
///   non-positive/non-finite initial guess
/// - `FitConvergence` when residuals are non-finite, the Jacobian
///   degenerates, the damping escalates past its ceiling, or the iteration
///   budget runs out before the tolerances are met
pub fn fit_temperature(
    grid: &WavelengthGrid,
    observed: &[f64],
    initial_guess_k: f64,
    opts: &FitOptions,
) -> Result<FitResult, AppError> {
    if observed.len() != grid.len() {
        return Err(AppError::domain(format!(
            "Observed data has {} points but the wavelength grid has {}.",
            observed.len(),
            grid.len()
        )));
    }
    if let Some((i, &v)) = observed.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(AppError::domain(format!(
            "Observed intensity at index {i} is not finite: {v}."
        )));
    }
    if !(initial_guess_k.is_finite() && initial_guess_k > 0.0) {
        return Err(AppError::domain(format!(
            "Initial temperature guess must be a positive finite number, got {initial_guess_k}."
        )));
    }
    if opts.max_iterations == 0 {
        return Err(AppError::domain("Iteration budget must be >= 1."));
    }

    let n = observed.len();
    let mut temp = initial_guess_k;
    let mut residuals = residuals_at(grid, observed, temp)?;
    let mut sse = sum_sq(&residuals);
    let mut damping = opts.damping_init;
    let mut iterations = 0usize;
    let mut converged = false;

    while iterations < opts.max_iterations && !converged {
        let jac = jacobian_column(grid, temp)?;
        let scale = jac.norm().max(1e-12);

        // Inner loop: escalate damping until a step is accepted.
        loop {
            let step = solve_damped_step(&jac, &residuals, damping, &[scale]);
            let accepted = match step {
                Some(delta) => try_step(grid, observed, temp, delta[0]),
                None => None,
            };

            match accepted {
                Some((temp_new, residuals_new, sse_new)) if sse_new <= sse => {
                    let delta = temp_new - temp;
                    let reduction = sse - sse_new;

                    temp = temp_new;
                    residuals = residuals_new;
                    sse = sse_new;
                    damping = (damping / opts.damping_down).max(1e-15);
                    iterations += 1;

                    if reduction <= opts.ftol * sse.max(f64::MIN_POSITIVE)
                        || delta.abs() <= opts.xtol * temp
                    {
                        converged = true;
                    }
                    break;
                }
                _ => {
                    damping *= opts.damping_up;
                    if damping > opts.damping_max {
                        return Err(AppError::fit(format!(
                            "Fit did not converge: damping escalated past {:.1e} \
                             after {iterations} accepted iterations (T={temp:.1} K). \
                             Try a different initial guess.",
                            opts.damping_max
                        )));
                    }
                }
            }
        }
    }

    if !converged {
        return Err(AppError::fit(format!(
            "Fit did not converge within {} iterations (T={temp:.1} K, SSE={sse:.3e}). \
             Try a different initial guess or looser tolerances.",
            opts.max_iterations
        )));
    }

    let jac = jacobian_column(grid, temp)?;
    let stderr_k = standard_error(&jac, sse, n);
    let curve = radiance_over_grid(grid, temp)?;

    Ok(FitResult {
        temperature_k: temp,
        stderr_k,
        curve,
        converged,
        iterations,
        sse,
    })
}

/// Residual vector `y - I(λ, T)`; non-finite entries are a convergence
/// failure (reported, never folded into the SSE).
fn residuals_at(
    grid: &WavelengthGrid,
    observed: &[f64],
    temp_k: f64,
) -> Result<DVector<f64>, AppError> {
    let model = radiance_over_grid(grid, temp_k)?;
    let r: Vec<f64> = observed.iter().zip(model.iter()).map(|(y, m)| y - m).collect();
    if r.iter().any(|v| !v.is_finite()) {
        return Err(AppError::fit(format!(
            "Non-finite residual at T={temp_k} K."
        )));
    }
    Ok(DVector::from_vec(r))
}

/// Numeric `∂I/∂T` by central differences (forward near the `T > 0` edge).
fn jacobian_column(grid: &WavelengthGrid, temp_k: f64) -> Result<DMatrix<f64>, AppError> {
    let h = (temp_k.abs() * JACOBIAN_REL_STEP).max(1e-9);
    let (lo, hi, span) = if temp_k - h > 0.0 {
        (temp_k - h, temp_k + h, 2.0 * h)
    } else {
        (temp_k, temp_k + h, h)
    };

    let model_lo = radiance_over_grid(grid, lo)?;
    let model_hi = radiance_over_grid(grid, hi)?;

    let col: Vec<f64> = model_hi
        .iter()
        .zip(model_lo.iter())
        .map(|(a, b)| (a - b) / span)
        .collect();

    if col.iter().any(|v| !v.is_finite()) {
        return Err(AppError::fit(format!(
            "Non-finite Jacobian at T={temp_k} K."
        )));
    }
    if col.iter().all(|&v| v == 0.0) {
        return Err(AppError::fit(format!(
            "Model is flat at T={temp_k} K (zero Jacobian); the guess is \
             outside the sensitive range of the data."
        )));
    }

    Ok(DMatrix::from_column_slice(col.len(), 1, &col))
}

/// Evaluate a candidate step; `None` rejects it (left the domain or produced
/// non-finite residuals).
fn try_step(
    grid: &WavelengthGrid,
    observed: &[f64],
    temp_k: f64,
    delta: f64,
) -> Option<(f64, DVector<f64>, f64)> {
    let temp_new = temp_k + delta;
    if !(temp_new.is_finite() && temp_new > 0.0) {
        return None;
    }
    let residuals = residuals_at(grid, observed, temp_new).ok()?;
    let sse = sum_sq(&residuals);
    if !sse.is_finite() {
        return None;
    }
    Some((temp_new, residuals, sse))
}

fn sum_sq(v: &DVector<f64>) -> f64 {
    v.iter().map(|x| x * x).sum()
}

/// Standard error of the temperature from the Gauss-Newton curvature:
/// `sqrt(SSE / (n - 1) / Σ jᵢ²)`. `None` when not estimable.
fn standard_error(jac: &DMatrix<f64>, sse: f64, n: usize) -> Option<f64> {
    if n < 2 {
        return None;
    }
    let jtj: f64 = jac.iter().map(|v| v * v).sum();
    if !(jtj.is_finite() && jtj > 0.0) {
        return None;
    }
    let sigma2 = sse / (n as f64 - 1.0);
    let stderr = (sigma2 / jtj).sqrt();
    stderr.is_finite().then_some(stderr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_sample;

    fn grid_400_800() -> WavelengthGrid {
        WavelengthGrid::linear_nm(400.0, 800.0, 200).unwrap()
    }

    #[test]
    fn recovers_temperature_from_noiseless_data() {
        // Reference scenario: 200 points over 400-800 nm, data generated at
        // 4500 K, guess 3000 K. The fit must land within 1% (and in practice
        // lands within a few mK).
        let grid = grid_400_800();
        let observed = radiance_over_grid(&grid, 4500.0).unwrap();

        let fit = fit_temperature(&grid, &observed, 3000.0, &FitOptions::default()).unwrap();
        assert!(fit.converged);
        assert!(
            (fit.temperature_k - 4500.0).abs() < 45.0,
            "fitted {} K",
            fit.temperature_k
        );
        assert_eq!(fit.curve.len(), grid.len());
        assert!(fit.sse < 1e-6 * sum_sq(&DVector::from_vec(observed)));
    }

    #[test]
    fn recovers_temperature_from_noisy_data() {
        // Seeded 5%-of-max Gaussian noise; tolerance widens to 5%.
        let grid = grid_400_800();
        let sample = generate_sample(&grid, 4500.0, 0.05, 42).unwrap();

        let fit = fit_temperature(&grid, &sample.observed, 3000.0, &FitOptions::default()).unwrap();
        assert!(fit.converged);
        assert!(
            (fit.temperature_k - 4500.0).abs() < 225.0,
            "fitted {} K",
            fit.temperature_k
        );
    }

    #[test]
    fn fit_is_deterministic() {
        let grid = grid_400_800();
        let sample = generate_sample(&grid, 5200.0, 0.03, 7).unwrap();
        let opts = FitOptions::default();

        let a = fit_temperature(&grid, &sample.observed, 4000.0, &opts).unwrap();
        let b = fit_temperature(&grid, &sample.observed, 4000.0, &opts).unwrap();
        assert_eq!(a.temperature_k, b.temperature_k);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn stderr_is_estimable_and_small_for_clean_data() {
        let grid = grid_400_800();
        let observed = radiance_over_grid(&grid, 4500.0).unwrap();
        let fit = fit_temperature(&grid, &observed, 3000.0, &FitOptions::default()).unwrap();

        let stderr = fit.stderr_k.expect("stderr should be estimable");
        assert!(stderr >= 0.0);
        // Noiseless data: the uncertainty collapses toward zero.
        assert!(stderr < 1.0, "stderr {stderr} K");
    }

    #[test]
    fn rejects_invalid_inputs() {
        let grid = grid_400_800();
        let observed = radiance_over_grid(&grid, 4500.0).unwrap();

        // Length mismatch.
        let err = fit_temperature(&grid, &observed[..10], 3000.0, &FitOptions::default());
        assert_eq!(err.unwrap_err().exit_code(), 3);

        // Non-finite observation.
        let mut bad = observed.clone();
        bad[5] = f64::NAN;
        let err = fit_temperature(&grid, &bad, 3000.0, &FitOptions::default());
        assert_eq!(err.unwrap_err().exit_code(), 3);

        // Non-positive guess.
        let err = fit_temperature(&grid, &observed, 0.0, &FitOptions::default());
        assert_eq!(err.unwrap_err().exit_code(), 3);
        let err = fit_temperature(&grid, &observed, -100.0, &FitOptions::default());
        assert_eq!(err.unwrap_err().exit_code(), 3);
    }

    #[test]
    fn flat_model_region_is_a_convergence_error() {
        // At a 1 K guess the whole visible band underflows to zero and the
        // Jacobian vanishes; that is a FitConvergence failure, not a panic.
        let grid = grid_400_800();
        let observed = radiance_over_grid(&grid, 4500.0).unwrap();
        let err = fit_temperature(&grid, &observed, 1.0, &FitOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn exhausted_budget_is_a_convergence_error() {
        let grid = grid_400_800();
        let observed = radiance_over_grid(&grid, 4500.0).unwrap();
        let opts = FitOptions {
            max_iterations: 1,
            ftol: 0.0,
            xtol: 0.0,
            ..FitOptions::default()
        };
        let err = fit_temperature(&grid, &observed, 3000.0, &opts).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn exact_guess_converges_immediately() {
        let grid = grid_400_800();
        let observed = radiance_over_grid(&grid, 4500.0).unwrap();
        let fit = fit_temperature(&grid, &observed, 4500.0, &FitOptions::default()).unwrap();
        assert!(fit.converged);
        assert!((fit.temperature_k - 4500.0).abs() < 1e-6);
    }
}
