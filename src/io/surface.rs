//! Read/write surface JSON files.
//!
//! Surface JSON is the "portable" representation of a simulated emission
//! surface:
//! - cooling parameters and the time/temperature trajectory
//! - the wavelength grid (nanometers, per export convention)
//! - the normalized intensity rows
//! - the Wien peak trace
//!
//! The schema is defined by `domain::SurfaceFile`. A downstream
//! visualization consumer (or `planck plot`) renders frames from it.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::SimulationOutput;
use crate::domain::{SurfaceFile, SurfacePeak};
use crate::error::AppError;

/// Build the export schema from an in-memory simulation run.
pub fn surface_from_simulation(out: &SimulationOutput) -> SurfaceFile {
    let wavelength_nm = out.grid.nanometers();
    let peaks = out
        .peaks
        .iter()
        .map(|p| SurfacePeak {
            wavelength_nm: p.wavelength_m * 1e9,
            grid_index: p.grid_index,
            intensity: p.intensity,
        })
        .collect();

    SurfaceFile {
        tool: "planck".to_string(),
        cooling: out.cooling,
        wavelength_nm,
        time_s: out.times_s.clone(),
        temperature_k: out.temps.kelvins().to_vec(),
        intensity: out.field.rows().to_vec(),
        peaks,
    }
}

/// Write a surface JSON file.
pub fn write_surface_json(path: &Path, surface: &SurfaceFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create surface JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, surface)
        .map_err(|e| AppError::io(format!("Failed to write surface JSON: {e}")))?;

    Ok(())
}

/// Read a surface JSON file.
pub fn read_surface_json(path: &Path) -> Result<SurfaceFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::io(format!(
            "Failed to open surface JSON '{}': {e}",
            path.display()
        ))
    })?;
    let surface: SurfaceFile = serde_json::from_reader(file)
        .map_err(|e| AppError::io(format!("Invalid surface JSON: {e}")))?;
    Ok(surface)
}
