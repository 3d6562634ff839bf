//! Four-slot trace manager.
//!
//! Lifecycle per slot:
//!
//! - *Uninitialized*: never selected. Selecting it copies the editor parameters
//!   into the slot and computes them once.
//! - *Live*: every `set_parameters` on the current trace recomputes it.
//! - *Frozen*: the stored breakdown and operating point are kept until unfrozen.
//! - *Hidden*: display-only; a hidden live trace still recomputes.
//!
//! The stored result of a slot is only written while that slot is current and
//! live. A failed computation leaves every slot and the editor untouched.
//!
//! Parameters and results of a frozen slot can drift apart: leaving a frozen
//! current trace still saves the editor into its `params`, while `breakdown`
//! and `point` stay those computed before the freeze. `serialize` and reports
//! of such a slot show the edited parameters. The two agree again once the
//! slot is current, unfrozen and recomputed.

use tracing::{debug, info};

use crate::domain::{ErrorBreakdown, OperatingPoint, ParameterSet, TRACE_COUNT, TraceId};
use crate::error::AppError;
use crate::io::preset;
use crate::math::FrequencyGrid;
use crate::traces::{Trace, TraceView, compute_result};

#[derive(Debug, Clone)]
pub struct TraceManager {
    grid: FrequencyGrid,
    slots: [Option<Trace>; TRACE_COUNT],
    current: TraceId,
    editor: ParameterSet,
}

impl TraceManager {
    /// Create the manager with trace 1 current and computed from `params`.
    pub fn new(grid: FrequencyGrid, params: ParameterSet) -> Result<Self, AppError> {
        let first = Trace::compute(&grid, params.clone())?;
        let mut slots: [Option<Trace>; TRACE_COUNT] = Default::default();
        slots[0] = Some(first);
        Ok(Self {
            grid,
            slots,
            current: TraceId::ALL[0],
            editor: params,
        })
    }

    pub fn grid(&self) -> &FrequencyGrid {
        &self.grid
    }

    pub fn current(&self) -> TraceId {
        self.current
    }

    /// Parameters currently loaded in the shared editor.
    pub fn editor(&self) -> &ParameterSet {
        &self.editor
    }

    pub fn trace(&self, id: TraceId) -> Option<&Trace> {
        self.slots[id.index()].as_ref()
    }

    pub fn current_trace(&self) -> Option<&Trace> {
        self.trace(self.current)
    }

    pub fn view(&self, id: TraceId) -> TraceView<'_> {
        match self.trace(id) {
            None => TraceView::Uninitialized,
            Some(t) if t.flags.hidden => TraceView::Hidden,
            Some(t) => TraceView::Shown(t),
        }
    }

    /// Initialized, non-hidden traces in slot order.
    pub fn visible(&self) -> impl Iterator<Item = (TraceId, &Trace)> {
        TraceId::ALL
            .into_iter()
            .filter_map(|id| match self.view(id) {
                TraceView::Shown(t) => Some((id, t)),
                _ => None,
            })
    }

    /// Apply new parameters to the current trace.
    ///
    /// The editor always takes the new values. A live trace stores the fresh
    /// result; a frozen one keeps its old result and the fresh one is only
    /// returned.
    pub fn set_parameters(
        &mut self,
        id: TraceId,
        params: ParameterSet,
    ) -> Result<(ErrorBreakdown, OperatingPoint), AppError> {
        if id != self.current {
            return Err(AppError::configuration(format!(
                "Cannot edit {id}: {} is the current trace.",
                self.current
            )));
        }

        let (breakdown, point) = compute_result(&self.grid, &params)?;
        self.editor = params.clone();

        let slot = &mut self.slots[id.index()];
        let frozen = slot.as_ref().is_some_and(|t| !t.is_live());
        if frozen {
            debug!(trace = %id, "trace frozen, result not stored");
        } else {
            let flags = slot.as_ref().map(|t| t.flags).unwrap_or_default();
            *slot = Some(Trace {
                params,
                breakdown: breakdown.clone(),
                point,
                flags,
            });
            debug!(trace = %id, infidelity = point.infidelity, "trace recomputed");
        }

        Ok((breakdown, point))
    }

    /// Make `id` current and return its parameters (now also in the editor).
    ///
    /// The outgoing editor values are saved into the outgoing slot. An
    /// uninitialized target is created from a copy of the editor; an existing
    /// one is read back into the editor without recomputation.
    pub fn select_trace(&mut self, id: TraceId) -> Result<ParameterSet, AppError> {
        if id == self.current {
            return Ok(self.editor.clone());
        }

        let created = match self.slots[id.index()] {
            Some(_) => None,
            None => Some(Trace::compute(&self.grid, self.editor.clone())?),
        };

        if let Some(outgoing) = self.slots[self.current.index()].as_mut() {
            outgoing.params = self.editor.clone();
        }

        if let Some(trace) = created {
            info!(trace = %id, "trace initialized from editor");
            self.slots[id.index()] = Some(trace);
        } else if let Some(trace) = self.slots[id.index()].as_ref() {
            self.editor = trace.params.clone();
        }

        debug!(from = %self.current, to = %id, "trace selected");
        self.current = id;
        Ok(self.editor.clone())
    }

    /// Update the frozen and/or hidden flag of an initialized trace.
    ///
    /// Unfreezing the current trace recomputes it from the editor. Other
    /// flag changes never trigger computation.
    pub fn set_trace_flags(
        &mut self,
        id: TraceId,
        frozen: Option<bool>,
        hidden: Option<bool>,
    ) -> Result<(), AppError> {
        let is_current = id == self.current;
        let Some(trace) = self.slots[id.index()].as_ref() else {
            return Err(AppError::configuration(format!("{id} has not been initialized.")));
        };

        let unfreezing = !trace.is_live() && frozen == Some(false);
        let refreshed = if unfreezing && is_current {
            Some(compute_result(&self.grid, &self.editor)?)
        } else {
            None
        };

        let Some(trace) = self.slots[id.index()].as_mut() else {
            return Ok(());
        };
        if let Some(f) = frozen {
            trace.flags.frozen = f;
        }
        if let Some(h) = hidden {
            trace.flags.hidden = h;
        }
        if let Some((breakdown, point)) = refreshed {
            trace.params = self.editor.clone();
            trace.breakdown = breakdown;
            trace.point = point;
        }
        debug!(trace = %id, frozen = trace.flags.frozen, hidden = trace.flags.hidden, "trace flags");
        Ok(())
    }

    /// Preset JSON for a trace. The current trace serializes the editor.
    ///
    /// For a frozen slot these are the last edited parameters, which need not
    /// be the ones behind its stored curve.
    pub fn serialize(&self, id: TraceId) -> Result<String, AppError> {
        if id == self.current {
            return preset::serialize(&self.editor);
        }
        match self.trace(id) {
            Some(trace) => preset::serialize(&trace.params),
            None => Err(AppError::configuration(format!("{id} has not been initialized."))),
        }
    }

    /// Validate preset JSON and apply it to the current trace.
    pub fn load_preset(&mut self, json: &str) -> Result<(ErrorBreakdown, OperatingPoint), AppError> {
        let params = preset::deserialize(json)?;
        self.set_parameters(self.current, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn grid() -> FrequencyGrid {
        FrequencyGrid::linear_khz(100.0, 500.0, 40).unwrap()
    }

    fn id(i: usize) -> TraceId {
        TraceId::new(i).unwrap()
    }

    #[test]
    fn new_initializes_only_the_first_slot() {
        let mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        assert_eq!(mgr.current(), id(0));
        assert!(mgr.trace(id(0)).is_some());
        for i in 1..TRACE_COUNT {
            assert_eq!(mgr.view(id(i)), TraceView::Uninitialized);
        }
    }

    #[test]
    fn selecting_new_slot_copies_editor() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        let mut p = ParameterSet::default();
        p.gradient = 150;
        mgr.set_parameters(id(0), p.clone()).unwrap();

        let read_back = mgr.select_trace(id(2)).unwrap();
        assert_eq!(read_back, p);
        assert_eq!(mgr.trace(id(2)).unwrap().params, p);
        assert_eq!(mgr.trace(id(2)).unwrap().breakdown, mgr.trace(id(0)).unwrap().breakdown);
    }

    #[test]
    fn edits_on_new_slot_do_not_touch_old_slot() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        let before = mgr.trace(id(0)).unwrap().clone();
        mgr.select_trace(id(1)).unwrap();

        let mut p = mgr.editor().clone();
        p.rabi_power = 50;
        mgr.set_parameters(id(1), p).unwrap();

        assert_eq!(mgr.trace(id(0)).unwrap(), &before);
        assert_eq!(mgr.trace(id(1)).unwrap().params.rabi_power, 50);
    }

    #[test]
    fn editing_a_non_current_trace_is_rejected() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        let err = mgr.set_parameters(id(1), ParameterSet::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn frozen_current_trace_keeps_result_until_unfrozen() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        let before = mgr.trace(id(0)).unwrap().breakdown.clone();
        mgr.set_trace_flags(id(0), Some(true), None).unwrap();

        let mut p = ParameterSet::default();
        p.gradient = 200;
        let (fresh, _) = mgr.set_parameters(id(0), p.clone()).unwrap();
        assert_ne!(fresh, before);
        assert_eq!(mgr.trace(id(0)).unwrap().breakdown, before);
        assert_eq!(mgr.editor(), &p);

        mgr.set_trace_flags(id(0), Some(false), None).unwrap();
        assert_eq!(mgr.trace(id(0)).unwrap().breakdown, fresh);
        assert_eq!(mgr.trace(id(0)).unwrap().params, p);
    }

    #[test]
    fn leaving_a_frozen_trace_keeps_its_curve_but_saves_edits() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        let before = mgr.trace(id(0)).unwrap().clone();
        mgr.set_trace_flags(id(0), Some(true), None).unwrap();

        let mut p = ParameterSet::default();
        p.rabi_power = 60;
        mgr.set_parameters(id(0), p.clone()).unwrap();
        mgr.select_trace(id(1)).unwrap();

        let frozen = mgr.trace(id(0)).unwrap();
        assert_eq!(frozen.params, p);
        assert_eq!(frozen.breakdown, before.breakdown);
        assert_eq!(frozen.point, before.point);
        assert_eq!(mgr.serialize(id(0)).unwrap(), preset::serialize(&p).unwrap());

        assert_eq!(mgr.select_trace(id(0)).unwrap(), p);
        mgr.set_trace_flags(id(0), Some(false), None).unwrap();
        let (expected, _) = compute_result(&grid(), &p).unwrap();
        assert_eq!(mgr.trace(id(0)).unwrap().breakdown, expected);
    }

    #[test]
    fn flags_on_uninitialized_slot_are_rejected() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        assert!(mgr.set_trace_flags(id(3), None, Some(true)).is_err());
    }

    #[test]
    fn hidden_trace_is_not_visible_but_still_recomputes() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        mgr.set_trace_flags(id(0), None, Some(true)).unwrap();
        assert_eq!(mgr.view(id(0)), TraceView::Hidden);
        assert_eq!(mgr.visible().count(), 0);

        let mut p = ParameterSet::default();
        p.gradient = 60;
        let (fresh, _) = mgr.set_parameters(id(0), p).unwrap();
        assert_eq!(mgr.trace(id(0)).unwrap().breakdown, fresh);
    }

    #[test]
    fn failed_edit_leaves_state_untouched() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        let before = mgr.trace(id(0)).unwrap().clone();
        let mut bad = ParameterSet::default();
        bad.gradient = 10;
        assert!(mgr.set_parameters(id(0), bad).is_err());
        assert_eq!(mgr.trace(id(0)).unwrap(), &before);
        assert_eq!(mgr.editor(), &ParameterSet::default());
    }

    #[test]
    fn load_preset_applies_to_current_trace() {
        let mut mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        let json = preset::BuiltinPreset::Macro.json();
        mgr.load_preset(json).unwrap();
        assert_eq!(mgr.editor().gradient, 50);
        assert_eq!(mgr.trace(id(0)).unwrap().params.gradient, 50);
        assert!(mgr.load_preset("{}").is_err());
    }

    #[test]
    fn serialize_uninitialized_slot_is_an_error() {
        let mgr = TraceManager::new(grid(), ParameterSet::default()).unwrap();
        assert!(mgr.serialize(id(0)).is_ok());
        assert!(mgr.serialize(id(1)).is_err());
    }
}
