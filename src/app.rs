//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the simulation or fitting pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, SimulateArgs};
use crate::domain::{CoolingParameters, FitRunConfig, SimConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `planck` binary.
pub fn run() -> Result<(), AppError> {
    // We want `planck` and `planck --t0 5000` to behave like
    // `planck simulate ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Simulate(args) => handle_simulate(args),
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = sim_config_from_args(&args);
    let run = pipeline::run_simulation(&config)?;

    println!(
        "{}",
        crate::report::format_simulation_summary(&run, &config)
    );

    if config.plot {
        let cooling = crate::plot::render_cooling_plot(
            &run.times_s,
            run.temps.kelvins(),
            config.plot_width,
            config.plot_height,
        )?;
        println!("Cooling trajectory:\n{cooling}");

        let nm = run.grid.nanometers();
        let last = run.field.n_rows() - 1;
        for (label, idx) in [("first", 0usize), ("last", last)] {
            let peak = run.peaks[idx];
            let frame = crate::plot::render_frame_plot(
                &nm,
                run.field.row(idx),
                Some((peak.wavelength_m * 1e9, peak.intensity)),
                config.plot_width,
                config.plot_height,
            )?;
            println!(
                "Spectrum at the {label} time step (T={:.0}K):\n{frame}",
                run.temps.kelvins()[idx]
            );
        }
    }

    if let Some(path) = &config.export_surface {
        let surface = crate::io::surface_from_simulation(&run);
        crate::io::write_surface_json(path, &surface)?;
    }
    if let Some(path) = &config.export_trajectory {
        crate::io::write_trajectory_csv(path, &run.times_s, &run.temps, &run.peaks)?;
    }

    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    println!("{}", crate::report::format_fit_report(&run, &config));

    if config.plot {
        let nm = run.grid.nanometers();
        let plot = crate::plot::render_fit_plot(
            &nm,
            &run.sample.observed,
            &run.fit.curve,
            config.plot_width,
            config.plot_height,
        )?;
        println!("{plot}");
    }

    if let Some(path) = &config.export_results {
        crate::io::write_fit_csv(path, &run.grid, &run.sample, &run.fit)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let surface = crate::io::read_surface_json(&args.surface)?;

    let n_frames = surface.intensity.len();
    if args.frame >= n_frames {
        return Err(AppError::io(format!(
            "Frame {} out of range; the surface has {n_frames} frames.",
            args.frame
        )));
    }
    if surface.temperature_k.len() != n_frames || surface.time_s.len() != n_frames {
        return Err(AppError::io(
            "Malformed surface JSON: trajectory and intensity lengths disagree.",
        ));
    }

    let peak = surface
        .peaks
        .get(args.frame)
        .map(|p| (p.wavelength_nm, p.intensity));
    let plot = crate::plot::render_frame_plot(
        &surface.wavelength_nm,
        &surface.intensity[args.frame],
        peak,
        args.width,
        args.height,
    )?;

    println!(
        "Frame {}/{} | T={:.0}K | t={:.2}s",
        args.frame + 1,
        n_frames,
        surface.temperature_k[args.frame],
        surface.time_s[args.frame]
    );
    println!("{plot}");
    Ok(())
}

pub fn sim_config_from_args(args: &SimulateArgs) -> SimConfig {
    SimConfig {
        cooling: CoolingParameters {
            t0_k: args.t0,
            t_env_k: args.t_env,
            k_cool_per_s: args.k_cool,
            duration_s: args.duration,
        },
        time_steps: args.time_steps,
        wl_min_nm: args.wl_min,
        wl_max_nm: args.wl_max,
        wl_points: args.wl_points,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_surface: args.export_surface.clone(),
        export_trajectory: args.export_trajectory.clone(),
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> FitRunConfig {
    FitRunConfig {
        true_temp_k: args.true_temp,
        initial_guess_k: args.guess,
        noise_frac: args.noise,
        seed: args.seed,
        wl_min_nm: args.wl_min,
        wl_max_nm: args.wl_max,
        wl_points: args.wl_points,
        max_iterations: args.max_iterations,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
    }
}

/// Rewrite argv so `planck` defaults to `planck simulate`.
///
/// Rules:
/// - `planck`                      -> `planck simulate`
/// - `planck --t0 5000 ...`        -> `planck simulate --t0 5000 ...`
/// - `planck --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("simulate".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "simulate" | "fit" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "simulate flags".
    if arg1.starts_with('-') {
        argv.insert(1, "simulate".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
