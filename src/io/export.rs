//! CSV exports.
//!
//! The exports are meant to be easy to consume in spreadsheets or
//! downstream scripts: one row per wavelength (fit runs) or per time step
//! (trajectories), wavelengths in nanometers.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data::SyntheticSample;
use crate::domain::{FitResult, PeakTrace, TemperatureSeries, WavelengthGrid};
use crate::error::AppError;

/// Write per-wavelength fit results to a CSV file.
pub fn write_fit_csv(
    path: &Path,
    grid: &WavelengthGrid,
    sample: &SyntheticSample,
    fit: &FitResult,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "wavelength_nm,observed,theory,fitted,residual")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    let nm = grid.nanometers();
    for i in 0..nm.len() {
        writeln!(
            file,
            "{:.4},{:.8e},{:.8e},{:.8e},{:.8e}",
            nm[i],
            sample.observed[i],
            sample.theory[i],
            fit.curve[i],
            sample.observed[i] - fit.curve[i],
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the cooling trajectory and peak trace to a CSV file.
pub fn write_trajectory_csv(
    path: &Path,
    times_s: &[f64],
    temps: &TemperatureSeries,
    peaks: &PeakTrace,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "time_s,temperature_k,peak_wavelength_nm,peak_intensity")
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for i in 0..times_s.len() {
        writeln!(
            file,
            "{:.6},{:.4},{:.4},{:.8}",
            times_s[i],
            temps.kelvins()[i],
            peaks[i].wavelength_m * 1e9,
            peaks[i].intensity,
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
