//! Shared pipeline logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflows:
//!
//! - simulate: time grid -> cooling trajectory -> normalized field -> peaks
//! - fit: synthetic sample -> LM temperature fit -> error metrics
//!
//! The CLI can then focus on presentation (printing and exports).

use crate::data::{SyntheticSample, generate_sample};
use crate::domain::{
    CoolingParameters, ErrorReport, FitResult, FitRunConfig, IntensityField, PeakTrace, SimConfig,
    TemperatureSeries, WavelengthGrid,
};
use crate::error::AppError;
use crate::fit::{FitOptions, fit_temperature};
use crate::metrics::error_report;
use crate::model::time_grid;
use crate::spectrum::{compute_spectrum_series, compute_wien_peaks};

/// All computed outputs of a single `planck simulate` run.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub cooling: CoolingParameters,
    pub grid: WavelengthGrid,
    pub times_s: Vec<f64>,
    pub temps: TemperatureSeries,
    pub field: IntensityField,
    pub peaks: PeakTrace,
}

/// Execute the full simulation pipeline.
pub fn run_simulation(config: &SimConfig) -> Result<SimulationOutput, AppError> {
    let grid = WavelengthGrid::linear_nm(config.wl_min_nm, config.wl_max_nm, config.wl_points)?;
    let times_s = time_grid(config.cooling.duration_s, config.time_steps)?;
    let (temps, field) = compute_spectrum_series(&grid, &config.cooling, &times_s)?;
    let peaks = compute_wien_peaks(&grid, &temps, &field)?;

    Ok(SimulationOutput {
        cooling: config.cooling,
        grid,
        times_s,
        temps,
        field,
        peaks,
    })
}

/// All computed outputs of a single `planck fit` run.
#[derive(Debug, Clone)]
pub struct FitRunOutput {
    pub grid: WavelengthGrid,
    pub sample: SyntheticSample,
    pub fit: FitResult,
    pub report: ErrorReport,
}

/// Execute the full fitting pipeline.
pub fn run_fit(config: &FitRunConfig) -> Result<FitRunOutput, AppError> {
    let grid = WavelengthGrid::linear_nm(config.wl_min_nm, config.wl_max_nm, config.wl_points)?;
    let sample = generate_sample(&grid, config.true_temp_k, config.noise_frac, config.seed)?;

    let opts = FitOptions {
        max_iterations: config.max_iterations,
        ..FitOptions::default()
    };
    let fit = fit_temperature(&grid, &sample.observed, config.initial_guess_k, &opts)?;
    let report = error_report(&sample.observed, &fit.curve)?;

    Ok(FitRunOutput {
        grid,
        sample,
        fit,
        report,
    })
}
