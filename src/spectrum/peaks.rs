//! Wien peak tracking across the intensity field.
//!
//! For each trajectory temperature the theoretical peak wavelength
//! `λ_max = b / T` is snapped to the nearest wavelength-grid column and the
//! normalized field value there is sampled. When `λ_max` falls outside the
//! grid's range (cool bodies peak in the infrared, far beyond a visible-band
//! grid) the nearest endpoint column is used; an approximation, not a
//! failure.

use crate::domain::{IntensityField, PeakPoint, PeakTrace, TemperatureSeries, WavelengthGrid};
use crate::error::AppError;
use crate::math::nearest_index;
use crate::model::peak_wavelength_m;

/// Compute the peak trace, aligned index-for-index with `temps`.
pub fn compute_wien_peaks(
    grid: &WavelengthGrid,
    temps: &TemperatureSeries,
    field: &IntensityField,
) -> Result<PeakTrace, AppError> {
    if field.n_rows() != temps.len() {
        return Err(AppError::domain(format!(
            "Intensity field has {} rows but the temperature series has {} entries.",
            field.n_rows(),
            temps.len()
        )));
    }
    if field.n_cols() != grid.len() {
        return Err(AppError::domain(format!(
            "Intensity field has {} columns but the wavelength grid has {} points.",
            field.n_cols(),
            grid.len()
        )));
    }

    let mut trace = Vec::with_capacity(temps.len());
    for (i, &t) in temps.kelvins().iter().enumerate() {
        let wavelength_m = peak_wavelength_m(t)?;
        let grid_index = nearest_index(grid.meters(), wavelength_m)
            .ok_or_else(|| AppError::domain("Wavelength grid is empty."))?;
        trace.push(PeakPoint {
            wavelength_m,
            grid_index,
            intensity: field.get(i, grid_index),
        });
    }
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CoolingParameters;
    use crate::model::time_grid;
    use crate::spectrum::compute_spectrum_series;

    fn series() -> (WavelengthGrid, TemperatureSeries, IntensityField) {
        let grid = WavelengthGrid::linear_nm(400.0, 800.0, 200).unwrap();
        let params = CoolingParameters {
            t0_k: 6000.0,
            t_env_k: 300.0,
            k_cool_per_s: 0.25,
            duration_s: 15.0,
        };
        let times = time_grid(15.0, 80).unwrap();
        let (temps, field) = compute_spectrum_series(&grid, &params, &times).unwrap();
        (grid, temps, field)
    }

    #[test]
    fn trace_is_aligned_with_the_trajectory() {
        let (grid, temps, field) = series();
        let trace = compute_wien_peaks(&grid, &temps, &field).unwrap();
        assert_eq!(trace.len(), temps.len());
        for p in &trace {
            assert!(p.grid_index < grid.len());
            assert!((0.0..=1.0).contains(&p.intensity));
        }
    }

    #[test]
    fn peak_wavelength_grows_as_the_body_cools() {
        let (grid, temps, field) = series();
        let trace = compute_wien_peaks(&grid, &temps, &field).unwrap();
        for w in trace.windows(2) {
            assert!(w[1].wavelength_m > w[0].wavelength_m);
        }
    }

    #[test]
    fn in_band_peak_snaps_to_the_nearest_column() {
        // 4500 K peaks at ~643.95 nm; on a 400..800 nm grid with ~2.01 nm
        // spacing the nearest column is index round((643.95-400)/2.0101).
        let (grid, _, _) = series();
        let temps = TemperatureSeries::from_kelvins(vec![4500.0]);
        let field = crate::spectrum::normalized_field(&grid, &temps).unwrap();
        let trace = compute_wien_peaks(&grid, &temps, &field).unwrap();

        let nm = grid.nanometers();
        let lambda_nm = trace[0].wavelength_m * 1e9;
        let snapped = nm[trace[0].grid_index];
        let spacing = nm[1] - nm[0];
        assert!((snapped - lambda_nm).abs() <= spacing / 2.0 + 1e-9);
    }

    #[test]
    fn out_of_band_peak_uses_the_nearest_endpoint() {
        // A 300 K body peaks at ~9659 nm, far beyond an 800 nm grid edge:
        // the trace samples the last column rather than failing.
        let grid = WavelengthGrid::linear_nm(400.0, 800.0, 50).unwrap();
        let temps = TemperatureSeries::from_kelvins(vec![6000.0, 300.0]);
        let field = crate::spectrum::normalized_field(&grid, &temps).unwrap();
        let trace = compute_wien_peaks(&grid, &temps, &field).unwrap();
        assert_eq!(trace[1].grid_index, grid.len() - 1);
    }

    #[test]
    fn dimension_mismatches_are_domain_errors() {
        let (grid, temps, field) = series();
        let short = TemperatureSeries::from_kelvins(temps.kelvins()[..10].to_vec());
        assert!(compute_wien_peaks(&grid, &short, &field).is_err());

        let small_grid = WavelengthGrid::linear_nm(400.0, 800.0, 10).unwrap();
        assert!(compute_wien_peaks(&small_grid, &temps, &field).is_err());
    }
}
