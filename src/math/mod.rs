//! Mathematical utilities: frequency grids, interpolation and least squares.

pub mod grid;
pub mod interp;
pub mod ols;

pub use grid::*;
pub use interp::*;
pub use ols::*;
