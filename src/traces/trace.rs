use crate::domain::{ErrorBreakdown, OperatingPoint, ParameterSet, TraceFlags};
use crate::error::AppError;
use crate::math::FrequencyGrid;
use crate::models::evaluate;
use crate::optimize::operating_point;

/// One initialized trace slot.
///
/// Each slot owns its parameters and results outright; cloning a trace or
/// reading its parameters back never aliases another slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub params: ParameterSet,
    pub breakdown: ErrorBreakdown,
    pub point: OperatingPoint,
    pub flags: TraceFlags,
}

impl Trace {
    pub fn compute(grid: &FrequencyGrid, params: ParameterSet) -> Result<Self, AppError> {
        let (breakdown, point) = compute_result(grid, &params)?;
        Ok(Self {
            params,
            breakdown,
            point,
            flags: TraceFlags::default(),
        })
    }

    pub fn is_live(&self) -> bool {
        !self.flags.frozen
    }
}

/// Evaluate + optimize in one step. Either both results are produced or neither.
pub fn compute_result(
    grid: &FrequencyGrid,
    params: &ParameterSet,
) -> Result<(ErrorBreakdown, OperatingPoint), AppError> {
    let breakdown = evaluate(grid, params)?;
    let point = operating_point(&breakdown, params)?;
    Ok((breakdown, point))
}

/// What a consumer should draw for a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceView<'a> {
    Uninitialized,
    /// Initialized but hidden: render a placeholder.
    Hidden,
    Shown(&'a Trace),
}
