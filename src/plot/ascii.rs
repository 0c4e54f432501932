//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - model curve: `-` line
//! - Wien peak marker: `P`

use crate::error::AppError;

/// Render observed intensities against the fitted model curve.
///
/// X axis is wavelength in nanometers, Y is intensity in the data's own
/// units (raw radiance for fit runs).
pub fn render_fit_plot(
    wl_nm: &[f64],
    observed: &[f64],
    fitted: &[f64],
    width: usize,
    height: usize,
) -> Result<String, AppError> {
    if wl_nm.len() != observed.len() || wl_nm.len() != fitted.len() {
        return Err(AppError::domain(
            "Plot series must all have the same length.",
        ));
    }
    let (x_min, x_max) =
        series_range(wl_nm).ok_or_else(|| AppError::domain("Cannot plot a degenerate x-range."))?;
    let (y_min, y_max) = pair_range(observed, fitted)
        .ok_or_else(|| AppError::domain("Cannot plot a degenerate y-range."))?;
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let width = width.max(10);
    let height = height.max(5);
    let mut grid = vec![vec![' '; width]; height];

    // Curve first so points can overlay it.
    draw_series(&mut grid, wl_nm, fitted, x_min, x_max, y_min, y_max, '-');
    for (&x, &y) in wl_nm.iter().zip(observed.iter()) {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: wavelength=[{x_min:.1}, {x_max:.1}]nm | intensity=[{y_min:.3e}, {y_max:.3e}]\n"
    ));
    push_grid(&mut out, grid);
    Ok(out)
}

/// Render one spectrum frame (normalized intensity over wavelength),
/// optionally marking the tracked Wien peak with `P`.
pub fn render_frame_plot(
    wl_nm: &[f64],
    intensity: &[f64],
    peak: Option<(f64, f64)>,
    width: usize,
    height: usize,
) -> Result<String, AppError> {
    if wl_nm.len() != intensity.len() {
        return Err(AppError::domain(
            "Plot series must all have the same length.",
        ));
    }
    let (x_min, x_max) =
        series_range(wl_nm).ok_or_else(|| AppError::domain("Cannot plot a degenerate x-range."))?;
    // Normalized frames live in [0, 1]; keep that scale stable across frames.
    let (y_min, y_max) = (0.0, 1.05);

    let width = width.max(10);
    let height = height.max(5);
    let mut grid = vec![vec![' '; width]; height];

    draw_series(&mut grid, wl_nm, intensity, x_min, x_max, y_min, y_max, '-');
    if let Some((peak_nm, peak_i)) = peak {
        if peak_nm >= x_min && peak_nm <= x_max {
            let col = map_x(peak_nm, x_min, x_max, width);
            let row = map_y(peak_i.clamp(y_min, y_max), y_min, y_max, height);
            grid[row][col] = 'P';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: wavelength=[{x_min:.1}, {x_max:.1}]nm | relative intensity=[0, 1]\n"
    ));
    push_grid(&mut out, grid);
    Ok(out)
}

/// Render the cooling trajectory (temperature over time).
pub fn render_cooling_plot(
    times_s: &[f64],
    temps_k: &[f64],
    width: usize,
    height: usize,
) -> Result<String, AppError> {
    if times_s.len() != temps_k.len() {
        return Err(AppError::domain(
            "Plot series must all have the same length.",
        ));
    }
    let (x_min, x_max) = series_range(times_s)
        .ok_or_else(|| AppError::domain("Cannot plot a degenerate time range."))?;
    let (y_min, y_max) = series_range(temps_k)
        .ok_or_else(|| AppError::domain("Cannot plot a degenerate temperature range."))?;
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let width = width.max(10);
    let height = height.max(5);
    let mut grid = vec![vec![' '; width]; height];

    draw_series(&mut grid, times_s, temps_k, x_min, x_max, y_min, y_max, '-');

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: t=[{x_min:.1}, {x_max:.1}]s | T=[{y_min:.1}, {y_max:.1}]K\n"
    ));
    push_grid(&mut out, grid);
    Ok(out)
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn series_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn pair_range(a: &[f64], b: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in a.iter().chain(b.iter()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

#[allow(clippy::too_many_arguments)]
fn draw_series(
    grid: &mut [Vec<char>],
    xs: &[f64],
    ys: &[f64],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev: Option<(usize, usize)> = None;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_plot_has_expected_dimensions_and_marks() {
        let wl: Vec<f64> = (0..20).map(|i| 400.0 + 20.0 * i as f64).collect();
        let fitted: Vec<f64> = wl.iter().map(|&x| x * 2.0).collect();
        let observed: Vec<f64> = wl.iter().map(|&x| x * 2.0 + 30.0).collect();

        let txt = render_fit_plot(&wl, &observed, &fitted, 40, 10).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 11); // header + 10 rows
        assert!(lines[0].starts_with("Plot: wavelength=[400.0, 780.0]nm"));
        assert!(txt.contains('o'));
        assert!(txt.contains('-'));
    }

    #[test]
    fn frame_plot_marks_the_peak() {
        let wl: Vec<f64> = (0..50).map(|i| 400.0 + 8.0 * i as f64).collect();
        // Triangle peaking mid-band.
        let intensity: Vec<f64> = (0..50)
            .map(|i| 1.0 - ((i as f64 - 25.0) / 25.0).abs())
            .collect();

        let txt = render_frame_plot(&wl, &intensity, Some((600.0, 1.0)), 60, 15).unwrap();
        assert!(txt.contains('P'));
    }

    #[test]
    fn frame_plot_skips_out_of_band_peak() {
        let wl: Vec<f64> = (0..10).map(|i| 400.0 + 40.0 * i as f64).collect();
        let intensity = vec![0.5; 10];
        let txt = render_frame_plot(&wl, &intensity, Some((9000.0, 0.2)), 40, 8).unwrap();
        assert!(!txt.contains('P'));
    }

    #[test]
    fn cooling_plot_renders_monotone_series() {
        let times: Vec<f64> = (0..30).map(|i| i as f64 * 0.5).collect();
        let temps: Vec<f64> = times
            .iter()
            .map(|&t| 300.0 + 5700.0 * (-0.25 * t).exp())
            .collect();
        let txt = render_cooling_plot(&times, &temps, 50, 12).unwrap();
        assert!(txt.starts_with("Plot: t=[0.0, 14.5]s"));
        assert!(txt.contains('-'));
    }

    #[test]
    fn mismatched_series_are_rejected() {
        assert!(render_fit_plot(&[1.0, 2.0], &[1.0], &[1.0, 2.0], 20, 10).is_err());
        assert!(render_cooling_plot(&[1.0], &[1.0, 2.0], 20, 10).is_err());
    }
}
