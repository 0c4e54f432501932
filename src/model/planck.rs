//! Planck's law (Bose-Einstein photon statistics) spectral radiance.
//!
//! The spectral radiance of a thermal emitter is
//!
//! ```text
//! I(λ, T) = (2 h c² / λ⁵) / (exp(h c / (λ k_B T)) - 1)
//! ```
//!
//! Numerical notes:
//! - The denominator is computed with `exp_m1` so that the long-wavelength /
//!   high-temperature regime (small exponent, `exp(x) - 1 ≈ x`) keeps full
//!   precision instead of suffering catastrophic cancellation.
//! - For a large exponent `exp_m1` overflows to `+Inf`; the radiance limit
//!   there is zero, so the overflow is mapped to `0.0` rather than letting
//!   `Inf` divide through.

use rayon::prelude::*;

use crate::domain::WavelengthGrid;
use crate::error::AppError;
use crate::model::constants::{BOLTZMANN_K, PLANCK_H, SPEED_OF_LIGHT};

/// Spectral radiance `I(λ, T)` in W·sr⁻¹·m⁻³.
///
/// Pure and deterministic. Returns `NaN` for `wavelength_m <= 0` or
/// `temp_k <= 0` (the model is undefined there); the checked wrappers below
/// reject such inputs with a `Domain` error before evaluation, so `NaN`
/// never enters a computed series.
pub fn spectral_radiance(wavelength_m: f64, temp_k: f64) -> f64 {
    if !(wavelength_m > 0.0 && temp_k > 0.0) {
        return f64::NAN;
    }

    let x = (PLANCK_H * SPEED_OF_LIGHT) / (wavelength_m * BOLTZMANN_K * temp_k);
    let denom = x.exp_m1();
    if !denom.is_finite() {
        // exp overflow: the Planck tail has already decayed to zero here.
        return 0.0;
    }

    let l2 = wavelength_m * wavelength_m;
    let lambda5 = l2 * l2 * wavelength_m;
    (2.0 * PLANCK_H * SPEED_OF_LIGHT * SPEED_OF_LIGHT) / (lambda5 * denom)
}

/// Evaluate the radiance over a whole wavelength grid at one temperature.
///
/// This is the checked boundary the rest of the crate uses: the grid is
/// positive by construction and the temperature is validated here.
pub fn radiance_over_grid(grid: &WavelengthGrid, temp_k: f64) -> Result<Vec<f64>, AppError> {
    validate_temperature(temp_k)?;
    Ok(grid
        .meters()
        .iter()
        .map(|&wl| spectral_radiance(wl, temp_k))
        .collect())
}

/// Evaluate the radiance for every (temperature, wavelength) pair.
///
/// Rows are independent, so they are evaluated in parallel; the collected
/// output preserves the input temperature order.
pub fn radiance_rows(grid: &WavelengthGrid, temps_k: &[f64]) -> Result<Vec<Vec<f64>>, AppError> {
    for &t in temps_k {
        validate_temperature(t)?;
    }
    Ok(temps_k
        .par_iter()
        .map(|&t| {
            grid.meters()
                .iter()
                .map(|&wl| spectral_radiance(wl, t))
                .collect()
        })
        .collect())
}

pub(crate) fn validate_temperature(temp_k: f64) -> Result<(), AppError> {
    if !(temp_k.is_finite() && temp_k > 0.0) {
        return Err(AppError::domain(format!(
            "Temperature must be a positive finite number, got {temp_k}."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radiance_is_positive_and_finite_in_the_visible_band() {
        let grid = WavelengthGrid::linear_nm(400.0, 800.0, 50).unwrap();
        for &t in &[1000.0, 3000.0, 4500.0, 6000.0, 10000.0] {
            for &wl in grid.meters() {
                let i = spectral_radiance(wl, t);
                assert!(i.is_finite(), "I({wl}, {t}) not finite");
                assert!(i > 0.0, "I({wl}, {t}) not positive");
            }
        }
    }

    #[test]
    fn radiance_is_strictly_increasing_in_temperature() {
        for &wl_nm in &[400.0, 550.0, 700.0, 800.0] {
            let wl = wl_nm * 1e-9;
            let temps = [500.0, 1000.0, 2000.0, 4000.0, 8000.0];
            for pair in temps.windows(2) {
                let lo = spectral_radiance(wl, pair[0]);
                let hi = spectral_radiance(wl, pair[1]);
                assert!(
                    hi > lo,
                    "I({wl_nm}nm) should grow with T: {lo} !< {hi} at T={:?}",
                    pair
                );
            }
        }
    }

    #[test]
    fn radiance_matches_direct_formula() {
        // Spot-check against the textbook expression evaluated naively.
        let wl = 600e-9;
        let t = 4500.0;
        let x = (PLANCK_H * SPEED_OF_LIGHT) / (wl * BOLTZMANN_K * t);
        let expected = (2.0 * PLANCK_H * SPEED_OF_LIGHT * SPEED_OF_LIGHT)
            / (wl.powi(5) * (x.exp() - 1.0));
        let got = spectral_radiance(wl, t);
        assert!((got - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn invalid_inputs_are_nan() {
        assert!(spectral_radiance(-1e-9, 5000.0).is_nan());
        assert!(spectral_radiance(0.0, 5000.0).is_nan());
        assert!(spectral_radiance(500e-9, 0.0).is_nan());
        assert!(spectral_radiance(500e-9, -10.0).is_nan());
    }

    #[test]
    fn exp_overflow_clamps_to_zero() {
        // At 1 K over visible wavelengths the exponent is ~3e4: exp overflows
        // and the radiance has physically decayed to nothing.
        let i = spectral_radiance(400e-9, 1.0);
        assert_eq!(i, 0.0);
    }

    #[test]
    fn checked_wrapper_rejects_bad_temperature() {
        let grid = WavelengthGrid::linear_nm(400.0, 800.0, 10).unwrap();
        assert!(radiance_over_grid(&grid, 0.0).is_err());
        assert!(radiance_over_grid(&grid, f64::NAN).is_err());
        assert!(radiance_over_grid(&grid, 4500.0).is_ok());
    }

    #[test]
    fn radiance_rows_preserve_order_and_shape() {
        let grid = WavelengthGrid::linear_nm(400.0, 800.0, 10).unwrap();
        let temps = [6000.0, 3000.0, 1500.0];
        let rows = radiance_rows(&grid, &temps).unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.len(), 10);
        }
        // Hotter row dominates everywhere (monotonicity in T).
        for j in 0..10 {
            assert!(rows[0][j] > rows[1][j]);
            assert!(rows[1][j] > rows[2][j]);
        }
    }
}
