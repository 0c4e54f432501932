//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory during simulation and fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons
//!
//! Everything here is computed once per run from input parameters and never
//! mutated afterwards; the derived series expose read-only views.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Input units for wavelength values.
///
/// The physical formula requires **meters**, but visualization and CLI flags
/// conventionally use **nanometers** (e.g. the visible band 400-800 nm).
///
/// This setting only affects how constructor inputs are *interpreted*;
/// internally the grid always stores meters, and exports label their unit
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WavelengthUnit {
    Nanometers,
    Meters,
}

impl WavelengthUnit {
    /// Multiplier that converts a value in this unit to meters.
    pub fn factor_to_meters(self) -> f64 {
        match self {
            WavelengthUnit::Nanometers => 1e-9,
            WavelengthUnit::Meters => 1.0,
        }
    }
}

/// An ordered wavelength sampling grid.
///
/// Invariants (enforced at construction, immutable afterwards):
/// - at least two samples
/// - every sample finite and strictly positive
/// - strictly increasing
///
/// Stored in meters; use [`WavelengthGrid::nanometers`] at presentation
/// boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthGrid {
    meters: Vec<f64>,
}

impl WavelengthGrid {
    /// Build a grid from raw values in the given unit.
    pub fn new(values: Vec<f64>, unit: WavelengthUnit) -> Result<Self, AppError> {
        if values.len() < 2 {
            return Err(AppError::domain(
                "Wavelength grid needs at least two samples.",
            ));
        }
        let factor = unit.factor_to_meters();
        let mut meters = Vec::with_capacity(values.len());
        let mut prev = f64::NEG_INFINITY;
        for (i, &v) in values.iter().enumerate() {
            if !(v.is_finite() && v > 0.0) {
                return Err(AppError::domain(format!(
                    "Wavelength grid entry {i} is not a positive finite number: {v}"
                )));
            }
            let m = v * factor;
            if m <= prev {
                return Err(AppError::domain(format!(
                    "Wavelength grid must be strictly increasing (entry {i})."
                )));
            }
            prev = m;
            meters.push(m);
        }
        Ok(Self { meters })
    }

    pub fn from_meters(values: Vec<f64>) -> Result<Self, AppError> {
        Self::new(values, WavelengthUnit::Meters)
    }

    pub fn from_nanometers(values: Vec<f64>) -> Result<Self, AppError> {
        Self::new(values, WavelengthUnit::Nanometers)
    }

    /// Evenly spaced grid between `min_nm` and `max_nm` (inclusive).
    pub fn linear_nm(min_nm: f64, max_nm: f64, points: usize) -> Result<Self, AppError> {
        let nm = crate::math::lin_space(min_nm, max_nm, points)?;
        Self::from_nanometers(nm)
    }

    pub fn len(&self) -> usize {
        self.meters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }

    /// Samples in meters (the unit the physics runs in).
    pub fn meters(&self) -> &[f64] {
        &self.meters
    }

    /// Samples converted to nanometers (the unit plots and exports use).
    pub fn nanometers(&self) -> Vec<f64> {
        self.meters.iter().map(|&m| m * 1e9).collect()
    }
}

/// Newtonian cooling parameters: `T(t) = t_env + (t0 - t_env) * exp(-k * t)`.
///
/// `t_env >= t0` is accepted (the trajectory then warms toward the ambient
/// value, or stays constant when equal); the physically typical case is a
/// hot body decaying toward a cooler environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoolingParameters {
    /// Initial temperature (K), > 0.
    pub t0_k: f64,
    /// Ambient temperature (K), >= 0.
    pub t_env_k: f64,
    /// Decay rate (1/s), > 0.
    pub k_cool_per_s: f64,
    /// Simulated duration (s), >= 0.
    pub duration_s: f64,
}

impl CoolingParameters {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.t0_k.is_finite() && self.t0_k > 0.0) {
            return Err(AppError::domain(format!(
                "Initial temperature must be a positive finite number, got {}.",
                self.t0_k
            )));
        }
        if !(self.t_env_k.is_finite() && self.t_env_k >= 0.0) {
            return Err(AppError::domain(format!(
                "Ambient temperature must be a non-negative finite number, got {}.",
                self.t_env_k
            )));
        }
        if !(self.k_cool_per_s.is_finite() && self.k_cool_per_s > 0.0) {
            return Err(AppError::domain(format!(
                "Cooling rate must be a positive finite number, got {}.",
                self.k_cool_per_s
            )));
        }
        if !(self.duration_s.is_finite() && self.duration_s >= 0.0) {
            return Err(AppError::domain(format!(
                "Duration must be a non-negative finite number, got {}.",
                self.duration_s
            )));
        }
        Ok(())
    }
}

/// Temperatures (K) along the cooling trajectory, one per time sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSeries {
    kelvins: Vec<f64>,
}

impl TemperatureSeries {
    pub(crate) fn from_kelvins(kelvins: Vec<f64>) -> Self {
        Self { kelvins }
    }

    pub fn len(&self) -> usize {
        self.kelvins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kelvins.is_empty()
    }

    pub fn kelvins(&self) -> &[f64] {
        &self.kelvins
    }
}

/// Normalized spectral intensity field.
///
/// Row `i` is the spectrum at `TemperatureSeries[i]` over the wavelength
/// grid (chronological row order, grid column order). After construction the
/// global maximum is 1.0 and every value lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityField {
    rows: Vec<Vec<f64>>,
}

impl IntensityField {
    /// Wrap rows that have already been normalized by their global maximum.
    pub(crate) fn from_normalized_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }
}

/// One tracked emission peak.
///
/// `wavelength_m` is the theoretical Wien peak `b / T`; `grid_index` is the
/// nearest wavelength-grid column and `intensity` the normalized field value
/// sampled there (not the true analytic maximum, since the grid may not
/// contain `b / T` exactly).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakPoint {
    pub wavelength_m: f64,
    pub grid_index: usize,
    pub intensity: f64,
}

/// Peak per temperature, aligned index-for-index with `TemperatureSeries`.
pub type PeakTrace = Vec<PeakPoint>;

/// Output of the temperature fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Best-fit temperature (K).
    pub temperature_k: f64,
    /// Standard error of the temperature estimate (K), when estimable.
    pub stderr_k: Option<f64>,
    /// Model curve at the fitted temperature, over the wavelength grid.
    pub curve: Vec<f64>,
    /// Whether the tolerance test ended the iteration (always true on the
    /// `Ok` path; non-convergence is reported as an error instead).
    pub converged: bool,
    /// Accepted LM iterations.
    pub iterations: usize,
    /// Sum of squared residuals at the solution.
    pub sse: f64,
}

/// Goodness-of-fit metrics between an observed and a predicted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub rmse: f64,
    /// Mean absolute percentage error, in percent.
    pub mape: f64,
    pub chi_square: f64,
}

/// Configuration for a `planck simulate` run (derived from CLI flags).
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub cooling: CoolingParameters,
    pub time_steps: usize,
    pub wl_min_nm: f64,
    pub wl_max_nm: f64,
    pub wl_points: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_surface: Option<PathBuf>,
    pub export_trajectory: Option<PathBuf>,
}

/// Configuration for a `planck fit` run (derived from CLI flags).
#[derive(Debug, Clone)]
pub struct FitRunConfig {
    /// Temperature used to generate the synthetic experiment (K).
    pub true_temp_k: f64,
    /// Initial guess handed to the optimizer (K).
    pub initial_guess_k: f64,
    /// Noise sigma as a fraction of the theoretical curve's maximum.
    pub noise_frac: f64,
    /// Seed for the synthetic-noise RNG.
    pub seed: u64,

    pub wl_min_nm: f64,
    pub wl_max_nm: f64,
    pub wl_points: usize,

    pub max_iterations: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
}

/// A saved surface file (JSON).
///
/// The "portable" representation of a simulated emission surface:
/// wavelength grid, cooling trajectory, normalized intensity rows and the
/// Wien peak trace. This is the hand-off artifact for a downstream
/// visualization consumer and can be re-rendered with `planck plot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceFile {
    pub tool: String,
    pub cooling: CoolingParameters,
    pub wavelength_nm: Vec<f64>,
    pub time_s: Vec<f64>,
    pub temperature_k: Vec<f64>,
    /// Row i = normalized spectrum at `temperature_k[i]`.
    pub intensity: Vec<Vec<f64>>,
    pub peaks: Vec<SurfacePeak>,
}

/// Peak record in a saved surface (nanometers, per export convention).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurfacePeak {
    pub wavelength_nm: f64,
    pub grid_index: usize,
    pub intensity: f64,
}
