//! Shared evaluation workflow used by both CLI and TUI front-ends.
//!
//! grid -> TraceManager (evaluate + optimize) -> per-trace summary
//!
//! The front-ends only decide how to present the results.

use std::path::Path;

use tracing::info;

use crate::domain::{Channel, ParameterSet, TRACE_COUNT, TraceId};
use crate::error::AppError;
use crate::io::{BuiltinPreset, read_preset_file};
use crate::math::FrequencyGrid;
use crate::optimize::refined_minimum;
use crate::report::channel_contributions;
use crate::traces::{Trace, TraceManager};

/// Report-side data derived from a computed trace.
#[derive(Debug, Clone)]
pub struct TraceSummary {
    pub contributions: Vec<(Channel, f64)>,
    pub refined: Option<(f64, f64)>,
}

pub fn build_grid(points: usize, nu_min_khz: f64, nu_max_khz: f64) -> Result<FrequencyGrid, AppError> {
    FrequencyGrid::linear_khz(nu_min_khz, nu_max_khz, points)
}

pub fn summarize(trace: &Trace) -> Result<TraceSummary, AppError> {
    Ok(TraceSummary {
        contributions: channel_contributions(&trace.breakdown, trace.point.frequency)?,
        refined: refined_minimum(&trace.breakdown),
    })
}

/// Resolve `chip`, `macro` or a preset file path.
pub fn resolve_source(source: &str) -> Result<ParameterSet, AppError> {
    match source {
        "chip" => BuiltinPreset::Chip.load(),
        "macro" => BuiltinPreset::Macro.load(),
        path => read_preset_file(Path::new(path)),
    }
}

/// Fill consecutive trace slots with `sets` and apply hidden flags (1-based).
///
/// Each slot is selected first, so it starts as a copy of the previous editor
/// state and is then edited into its own parameter set.
pub fn load_traces(
    grid: FrequencyGrid,
    sets: Vec<ParameterSet>,
    hidden: &[usize],
) -> Result<TraceManager, AppError> {
    if sets.is_empty() || sets.len() > TRACE_COUNT {
        return Err(AppError::configuration(format!(
            "Expected 1..={TRACE_COUNT} parameter sets, got {}.",
            sets.len()
        )));
    }

    let mut sets = sets.into_iter();
    let first = sets.next().unwrap_or_default();
    let mut manager = TraceManager::new(grid, first)?;

    for (i, params) in sets.enumerate() {
        let id = TraceId::new(i + 1)?;
        manager.select_trace(id)?;
        manager.set_parameters(id, params)?;
    }

    for &n in hidden {
        let id = n
            .checked_sub(1)
            .ok_or_else(|| AppError::configuration("Trace numbers start at 1."))
            .and_then(TraceId::new)?;
        manager.set_trace_flags(id, None, Some(true))?;
    }

    info!(traces = manager.visible().count(), "traces loaded");
    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traces::TraceView;

    #[test]
    fn load_traces_fills_slots_in_order() {
        let grid = build_grid(30, 100.0, 500.0).unwrap();
        let chip = BuiltinPreset::Chip.load().unwrap();
        let mac = BuiltinPreset::Macro.load().unwrap();
        let mgr = load_traces(grid, vec![chip.clone(), mac.clone()], &[2]).unwrap();

        assert_eq!(mgr.trace(TraceId::new(0).unwrap()).unwrap().params, chip);
        assert_eq!(mgr.trace(TraceId::new(1).unwrap()).unwrap().params, mac);
        assert_eq!(mgr.view(TraceId::new(1).unwrap()), TraceView::Hidden);
        assert_eq!(mgr.view(TraceId::new(2).unwrap()), TraceView::Uninitialized);
    }

    #[test]
    fn too_many_sets_are_rejected() {
        let grid = build_grid(30, 100.0, 500.0).unwrap();
        let sets = vec![ParameterSet::default(); 5];
        assert!(load_traces(grid, sets, &[]).is_err());
    }

    #[test]
    fn hide_index_zero_is_rejected() {
        let grid = build_grid(30, 100.0, 500.0).unwrap();
        assert!(load_traces(grid, vec![ParameterSet::default()], &[0]).is_err());
    }

    #[test]
    fn unknown_source_path_is_a_file_error() {
        let err = resolve_source("no/such/preset.json").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::FileIo);
    }
}
