//! Mathematical utilities: grid construction and least-squares solves.

pub mod grid;
pub mod lsq;

pub use grid::*;
pub use lsq::*;
