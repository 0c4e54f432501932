//! Command-line parsing for the emission-spectrum simulator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the physics/fitting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "planck",
    version,
    about = "Bose-Einstein (Planck) emission spectra: cooling simulation and temperature fitting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate a cooling body's emission spectra and track the Wien peak.
    Simulate(SimulateArgs),
    /// Fit the temperature to (synthetic) noisy observations and report
    /// error metrics.
    Fit(FitArgs),
    /// Re-render a frame from a previously exported surface JSON.
    Plot(PlotArgs),
}

/// Options for the cooling simulation.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    /// Initial temperature (K).
    #[arg(long, default_value_t = 6000.0)]
    pub t0: f64,

    /// Ambient temperature (K).
    #[arg(long = "t-env", default_value_t = 300.0)]
    pub t_env: f64,

    /// Newtonian cooling rate (1/s).
    #[arg(long = "k-cool", default_value_t = 0.25)]
    pub k_cool: f64,

    /// Simulated duration (s).
    #[arg(long, default_value_t = 15.0)]
    pub duration: f64,

    /// Number of time samples over the duration.
    #[arg(long = "time-steps", default_value_t = 80)]
    pub time_steps: usize,

    /// Lower wavelength bound (nm).
    #[arg(long = "wl-min", default_value_t = 400.0)]
    pub wl_min: f64,

    /// Upper wavelength bound (nm).
    #[arg(long = "wl-max", default_value_t = 800.0)]
    pub wl_max: f64,

    /// Number of wavelength samples.
    #[arg(long = "wl-points", default_value_t = 200)]
    pub wl_points: usize,

    /// Render terminal plots (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the full surface (grid + trajectory + field + peaks) to JSON.
    #[arg(long = "export-surface")]
    pub export_surface: Option<PathBuf>,

    /// Export the trajectory and peak trace to CSV.
    #[arg(long = "export-trajectory")]
    pub export_trajectory: Option<PathBuf>,
}

/// Options for the temperature fit.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Temperature used to generate the synthetic observations (K).
    #[arg(long = "true-temp", default_value_t = 4500.0)]
    pub true_temp: f64,

    /// Initial temperature guess for the optimizer (K).
    #[arg(long, default_value_t = 3000.0)]
    pub guess: f64,

    /// Gaussian noise sigma as a fraction of the curve maximum.
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Random seed for noise generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Lower wavelength bound (nm).
    #[arg(long = "wl-min", default_value_t = 400.0)]
    pub wl_min: f64,

    /// Upper wavelength bound (nm).
    #[arg(long = "wl-max", default_value_t = 800.0)]
    pub wl_max: f64,

    /// Number of wavelength samples.
    #[arg(long = "wl-points", default_value_t = 200)]
    pub wl_points: usize,

    /// Maximum optimizer iterations.
    #[arg(long = "max-iter", default_value_t = 100)]
    pub max_iterations: usize,

    /// Render a terminal plot of observations vs the fitted curve
    /// (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-wavelength results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for re-plotting a saved surface.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Surface JSON file produced by `planck simulate --export-surface`.
    #[arg(long, value_name = "JSON")]
    pub surface: PathBuf,

    /// Frame (time step) index to render; defaults to the first frame.
    #[arg(long, default_value_t = 0)]
    pub frame: usize,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
