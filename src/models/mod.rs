//! Gate-infidelity error model.
//!
//! Channel formulas are small pure functions (`channels`) so the grid
//! evaluation (`error_model`) stays a straight loop.

pub mod channels;
pub mod constants;
pub mod error_model;

pub use channels::*;
pub use error_model::*;
