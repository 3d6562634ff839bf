//! Reporting utilities: operating-point tables, per-channel contributions,
//! and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{Channel, ErrorBreakdown};
use crate::error::AppError;
use crate::math::interpolate_linear;

/// Per-channel infidelity at `frequency` (rad/s), interpolated on the grid.
pub fn channel_contributions(
    breakdown: &ErrorBreakdown,
    frequency: f64,
) -> Result<Vec<(Channel, f64)>, AppError> {
    Channel::ALL
        .into_iter()
        .map(|c| {
            let v = interpolate_linear(&breakdown.frequencies, breakdown.channel(c), frequency)?;
            Ok((c, v))
        })
        .collect()
}
