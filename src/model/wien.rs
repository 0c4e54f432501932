//! Wien's displacement law.
//!
//! The wavelength of maximum emission is inversely proportional to
//! temperature: `λ_max = b / T` with `b` the Wien displacement constant.

use crate::error::AppError;
use crate::model::constants::WIEN_B;
use crate::model::planck::validate_temperature;

/// Theoretical peak-emission wavelength (m) at `temp_k`.
pub fn peak_wavelength_m(temp_k: f64) -> Result<f64, AppError> {
    validate_temperature(temp_k)?;
    Ok(WIEN_B / temp_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WavelengthGrid;
    use crate::model::planck::spectral_radiance;

    #[test]
    fn peak_wavelength_known_values() {
        // 4500 K peaks near 644 nm, well inside the visible band.
        let wl = peak_wavelength_m(4500.0).unwrap();
        assert!((wl * 1e9 - 643.95).abs() < 0.1, "got {} nm", wl * 1e9);

        // Room temperature peaks deep in the infrared (~9.7 µm).
        let wl = peak_wavelength_m(300.0).unwrap();
        assert!((wl * 1e6 - 9.659).abs() < 0.01, "got {} um", wl * 1e6);
    }

    #[test]
    fn rejects_non_positive_temperature() {
        assert!(peak_wavelength_m(0.0).is_err());
        assert!(peak_wavelength_m(-300.0).is_err());
        assert!(peak_wavelength_m(f64::NAN).is_err());
    }

    #[test]
    fn fine_grid_argmax_agrees_with_displacement_law() {
        // Sample the radiance on a fine grid bracketing the predicted peak
        // and check the sampled argmax lands within one grid step of b/T.
        let t = 4500.0;
        let predicted = peak_wavelength_m(t).unwrap();

        let grid = WavelengthGrid::linear_nm(300.0, 1200.0, 4001).unwrap();
        let step_m = (1200.0 - 300.0) / 4000.0 * 1e-9;

        let mut best_idx = 0;
        let mut best_val = f64::NEG_INFINITY;
        for (i, &wl) in grid.meters().iter().enumerate() {
            let v = spectral_radiance(wl, t);
            if v > best_val {
                best_val = v;
                best_idx = i;
            }
        }

        let sampled = grid.meters()[best_idx];
        assert!(
            (sampled - predicted).abs() <= step_m,
            "argmax {} m vs predicted {} m",
            sampled,
            predicted
        );
    }
}
