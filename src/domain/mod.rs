//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - configuration enums (`Architecture`, `VibrationalMode`, `VNoiseCorrelation`, `OptimizeMode`)
//! - the raw-unit `ParameterSet` with its declared ranges and validation
//! - evaluation outputs (`ErrorBreakdown`, `OperatingPoint`)
//! - trace addressing (`TraceId`, `TraceFlags`)

pub mod params;
pub mod types;

pub use params::*;
pub use types::*;
