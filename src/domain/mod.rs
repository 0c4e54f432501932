//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated physical inputs (`WavelengthGrid`, `CoolingParameters`)
//! - derived series (`TemperatureSeries`, `IntensityField`, `PeakTrace`)
//! - fit outputs (`FitResult`, `ErrorReport`)
//! - run configuration and the saved-surface JSON schema

pub mod types;

pub use types::*;
