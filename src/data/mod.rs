//! Synthetic experiment data.
//!
//! The fitter is exercised against reproducible synthetic observations:
//! the Planck model evaluated at a known temperature plus seeded Gaussian
//! noise (`sample`).

pub mod sample;

pub use sample::*;
