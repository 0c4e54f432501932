//! Input/output helpers.
//!
//! - surface JSON read/write (`surface`)
//! - CSV exports (`export`)

pub mod export;
pub mod surface;

pub use export::*;
pub use surface::*;
