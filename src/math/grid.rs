//! Sampling-grid helpers.
//!
//! The simulation works on evenly spaced wavelength and time grids, and the
//! Wien peak tracker snaps a continuous wavelength onto the sampled grid.
//! Both operations are deterministic so runs are reproducible.

use crate::error::AppError;

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(AppError::domain(format!(
            "Invalid range: min={min}, max={max} (must be finite and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::domain("Grid steps must be >= 2."));
    }

    let step = (max - min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(min + step * i as f64);
    }
    // Land on the endpoint exactly rather than on accumulated rounding.
    out[steps - 1] = max;
    Ok(out)
}

/// Index of the value closest to `target` by absolute difference.
///
/// Ties keep the lower index. A `target` outside the range of `values`
/// resolves to the nearest endpoint. Returns `None` for an empty slice.
pub fn nearest_index(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_dist = f64::INFINITY;
    for (i, &v) in values.iter().enumerate() {
        let dist = (v - target).abs();
        if dist < best_dist {
            best_dist = dist;
            best = Some(i);
        }
    }
    best
}
