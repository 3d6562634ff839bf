//! Operating-frequency selection.
//!
//! Responsibilities:
//!
//! - grid search for the minimum total infidelity (`OptimizeMode::Search`)
//! - linear interpolation at a caller-chosen frequency (`OptimizeMode::Fixed`)
//! - derivation of the `OperatingPoint` (gate time, heating rate)
//! - parallel gradient scans (`scan`)

pub mod optimizer;
pub mod scan;

pub use optimizer::*;
pub use scan::*;
