//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the physics/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::{FitRunOutput, SimulationOutput};
use crate::domain::{FitRunConfig, SimConfig};

/// Format the simulation run summary (parameters + trajectory + peak shift).
pub fn format_simulation_summary(out: &SimulationOutput, config: &SimConfig) -> String {
    let mut s = String::new();

    s.push_str("=== planck - Bose-Einstein emission simulation ===\n");
    s.push_str(&format!(
        "Cooling: T0={:.0}K -> T_env={:.0}K | k={}/s | {}s in {} steps\n",
        config.cooling.t0_k,
        config.cooling.t_env_k,
        config.cooling.k_cool_per_s,
        config.cooling.duration_s,
        config.time_steps,
    ));
    s.push_str(&format!(
        "Band: [{:.1}, {:.1}]nm in {} points\n",
        config.wl_min_nm, config.wl_max_nm, config.wl_points,
    ));

    let temps = out.temps.kelvins();
    s.push_str(&format!(
        "Trajectory: T[0]={:.1}K, T[end]={:.1}K ({} samples)\n",
        temps[0],
        temps[temps.len() - 1],
        temps.len(),
    ));
    s.push_str(&format!(
        "Field: {} x {} (rows = time steps, cols = wavelengths), max normalized to 1\n",
        out.field.n_rows(),
        out.field.n_cols(),
    ));

    let first = &out.peaks[0];
    let last = &out.peaks[out.peaks.len() - 1];
    s.push_str(&format!(
        "Wien peak: {:.1}nm -> {:.1}nm (red-shifts as the body cools)\n",
        first.wavelength_m * 1e9,
        last.wavelength_m * 1e9,
    ));
    if last.grid_index == out.field.n_cols() - 1 || last.grid_index == 0 {
        s.push_str(
            "Note: the final peak lies outside the sampled band; its intensity \
             is read at the nearest band edge.\n",
        );
    }

    s
}

/// Format the fit run report (estimate, convergence, error metrics).
pub fn format_fit_report(out: &FitRunOutput, config: &FitRunConfig) -> String {
    let mut s = String::new();

    s.push_str("=== planck - temperature fit ===\n");
    s.push_str(&format!(
        "Data: n={} over [{:.1}, {:.1}]nm | true T={:.0}K | noise={:.1}% of max | seed={}\n",
        config.wl_points,
        config.wl_min_nm,
        config.wl_max_nm,
        config.true_temp_k,
        config.noise_frac * 100.0,
        config.seed,
    ));
    s.push_str(&format!("Initial guess: {:.0}K\n", config.initial_guess_k));

    s.push_str("\nFit result:\n");
    match out.fit.stderr_k {
        Some(stderr) => s.push_str(&format!(
            "- T = {:.1} +/- {:.1} K\n",
            out.fit.temperature_k, stderr
        )),
        None => s.push_str(&format!(
            "- T = {:.1} K (uncertainty not estimable)\n",
            out.fit.temperature_k
        )),
    }
    s.push_str(&format!(
        "- converged: {} after {} iterations\n",
        out.fit.converged, out.fit.iterations
    ));
    s.push_str(&format!("- SSE = {:.4e}\n", out.fit.sse));

    s.push_str("\nModel evaluation (observed vs fitted):\n");
    s.push_str(&format!("- RMSE  = {:.4e}\n", out.report.rmse));
    s.push_str(&format!("- MAPE  = {:.2}%\n", out.report.mape));
    s.push_str(&format!("- Chi^2 = {:.4e}\n", out.report.chi_square));

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{run_fit, run_simulation};
    use crate::domain::CoolingParameters;

    fn sim_config() -> SimConfig {
        SimConfig {
            cooling: CoolingParameters {
                t0_k: 6000.0,
                t_env_k: 300.0,
                k_cool_per_s: 0.25,
                duration_s: 15.0,
            },
            time_steps: 20,
            wl_min_nm: 400.0,
            wl_max_nm: 800.0,
            wl_points: 50,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_surface: None,
            export_trajectory: None,
        }
    }

    fn fit_config() -> FitRunConfig {
        FitRunConfig {
            true_temp_k: 4500.0,
            initial_guess_k: 3000.0,
            noise_frac: 0.05,
            seed: 42,
            wl_min_nm: 400.0,
            wl_max_nm: 800.0,
            wl_points: 100,
            max_iterations: 100,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_results: None,
        }
    }

    #[test]
    fn simulation_summary_mentions_trajectory_and_peaks() {
        let config = sim_config();
        let out = run_simulation(&config).unwrap();
        let text = format_simulation_summary(&out, &config);
        assert!(text.contains("T[0]=6000.0K"));
        assert!(text.contains("Wien peak"));
        assert!(text.contains("20 x 50"));
    }

    #[test]
    fn fit_report_mentions_estimate_and_metrics() {
        let config = fit_config();
        let out = run_fit(&config).unwrap();
        let text = format_fit_report(&out, &config);
        assert!(text.contains("Fit result:"));
        assert!(text.contains("- T = "));
        assert!(text.contains("converged: true"));
        assert!(text.contains("RMSE"));
        assert!(text.contains("MAPE"));
        assert!(text.contains("Chi^2"));
    }
}
