//! Spectrum-series assembly and peak tracking.
//!
//! Responsibilities:
//!
//! - evaluate the radiance field over (trajectory temperature, wavelength)
//!   pairs and normalize it to its global maximum (`series`)
//! - track the Wien displacement peak across the trajectory (`peaks`)

pub mod peaks;
pub mod series;

pub use peaks::*;
pub use series::*;
