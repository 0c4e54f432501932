//! Temperature fitting.
//!
//! Responsibilities:
//!
//! - Levenberg-Marquardt minimization of the squared residuals between the
//!   Planck model and observed intensities, over the temperature parameter
//! - standard-error estimation from the Gauss-Newton curvature

pub mod fitter;

pub use fitter::*;
