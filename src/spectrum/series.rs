//! Normalized intensity field over a cooling trajectory.
//!
//! For each trajectory temperature the Planck radiance is evaluated across
//! the wavelength grid; the resulting M×N field is then divided by its
//! global maximum so the hottest frame peaks at exactly 1.0 and every value
//! lies in `[0, 1]`.
//!
//! Row order is chronological (matches the temperature series); column order
//! matches the wavelength grid.

use crate::domain::{CoolingParameters, IntensityField, TemperatureSeries, WavelengthGrid};
use crate::error::AppError;
use crate::model::{cooling_series, radiance_rows};

/// Evaluate and normalize the spectrum series for a cooling run.
///
/// Fails with a `Domain` error when the raw field's global maximum is zero
/// or non-finite (pathological parameters, e.g. a temperature so low the
/// whole band underflows): normalization must not silently spread NaN/Inf
/// through the field.
pub fn compute_spectrum_series(
    grid: &WavelengthGrid,
    params: &CoolingParameters,
    times_s: &[f64],
) -> Result<(TemperatureSeries, IntensityField), AppError> {
    let temps = cooling_series(params, times_s)?;
    let field = normalized_field(grid, &temps)?;
    Ok((temps, field))
}

/// Evaluate and normalize the field for an already-computed temperature
/// series (useful when the trajectory comes from somewhere other than the
/// Newtonian model).
pub fn normalized_field(
    grid: &WavelengthGrid,
    temps: &TemperatureSeries,
) -> Result<IntensityField, AppError> {
    if temps.is_empty() {
        return Err(AppError::domain(
            "Cannot build an intensity field from an empty temperature series.",
        ));
    }

    let raw = radiance_rows(grid, temps.kelvins())?;

    let mut max = f64::NEG_INFINITY;
    for row in &raw {
        for &v in row {
            if !v.is_finite() {
                return Err(AppError::domain(
                    "Non-finite intensity in the raw field; refusing to normalize.",
                ));
            }
            if v > max {
                max = v;
            }
        }
    }
    if !(max.is_finite() && max > 0.0) {
        return Err(AppError::domain(format!(
            "Degenerate intensity field: global maximum is {max}; \
             cannot normalize (check the temperature range)."
        )));
    }

    let rows = raw
        .into_iter()
        .map(|row| row.into_iter().map(|v| v / max).collect())
        .collect();
    Ok(IntensityField::from_normalized_rows(rows))
}
