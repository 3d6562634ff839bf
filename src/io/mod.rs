//! Input/output helpers.
//!
//! - preset JSON read/write + built-in presets (`preset`)
//! - breakdown export to CSV (`export`)

pub mod export;
pub mod preset;

pub use export::*;
pub use preset::*;
