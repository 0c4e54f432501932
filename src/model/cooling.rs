//! Newtonian cooling trajectory.
//!
//! A body at `t0` relaxing toward an ambient `t_env` follows
//!
//! ```text
//! T(t) = t_env + (t0 - t_env) * exp(-k * t)
//! ```
//!
//! Guarantees: `T(0) = t0` exactly; `T(t) → t_env` as `t → ∞`; the
//! trajectory is strictly monotone (decreasing for `t0 > t_env`, increasing
//! for `t0 < t_env`, constant when equal).

use crate::domain::{CoolingParameters, TemperatureSeries};
use crate::error::AppError;
use crate::math::lin_space;

/// Temperature at a single instant.
pub fn temperature_at(params: &CoolingParameters, t_s: f64) -> f64 {
    params.t_env_k + (params.t0_k - params.t_env_k) * (-params.k_cool_per_s * t_s).exp()
}

/// Evenly spaced time samples over `[0, duration]`.
///
/// A zero duration yields `steps` samples all at `t = 0` (a frozen
/// trajectory), which keeps downstream shapes consistent.
pub fn time_grid(duration_s: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(duration_s.is_finite() && duration_s >= 0.0) {
        return Err(AppError::domain(format!(
            "Duration must be a non-negative finite number, got {duration_s}."
        )));
    }
    if steps < 2 {
        return Err(AppError::domain("Time grid needs at least 2 samples."));
    }
    if duration_s == 0.0 {
        return Ok(vec![0.0; steps]);
    }
    lin_space(0.0, duration_s, steps)
}

/// Temperature at each time sample.
pub fn cooling_series(
    params: &CoolingParameters,
    times_s: &[f64],
) -> Result<TemperatureSeries, AppError> {
    params.validate()?;
    for &t in times_s {
        if !(t.is_finite() && t >= 0.0) {
            return Err(AppError::domain(format!(
                "Time samples must be non-negative finite numbers, got {t}."
            )));
        }
    }
    let kelvins = times_s.iter().map(|&t| temperature_at(params, t)).collect();
    Ok(TemperatureSeries::from_kelvins(kelvins))
}
