//! Physical model implementations.
//!
//! Models are implemented as small, pure functions so that simulation and
//! fitting code can stay generic:
//!
//! - Planck/Bose-Einstein spectral radiance (`planck`)
//! - Newtonian cooling trajectory (`cooling`)
//! - Wien displacement peak (`wien`)

pub mod constants;
pub mod cooling;
pub mod planck;
pub mod wien;

pub use constants::*;
pub use cooling::*;
pub use planck::*;
pub use wien::*;
