//! Physical constants (SI units).
//!
//! 2019 SI redefinition values: h, c and k_B are exact by definition. These
//! are read-only process-wide configuration; nothing in the crate mutates
//! them.

/// Planck constant (J·s).
pub const PLANCK_H: f64 = 6.62607015e-34;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Boltzmann constant (J/K).
pub const BOLTZMANN_K: f64 = 1.380649e-23;

/// Wien displacement constant (m·K): `λ_max = WIEN_B / T`.
pub const WIEN_B: f64 = 2.897771955e-3;
