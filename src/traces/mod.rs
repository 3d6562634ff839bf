//! Trace slots.
//!
//! - per-slot state (`trace`)
//! - slot lifecycle, editor read-back and recompute triggers (`manager`)

pub mod manager;
pub mod trace;

pub use manager::*;
pub use trace::*;
