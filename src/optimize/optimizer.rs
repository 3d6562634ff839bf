//! Frequency optimizer over a precomputed total-infidelity curve.
//!
//! Search mode is a plain grid argmin: resolution is bounded by grid density,
//! and ties go to the lowest frequency. Fixed mode interpolates linearly and
//! refuses targets outside the sampled domain.

use tracing::debug;

use crate::domain::{ErrorBreakdown, OperatingPoint, OptimizeMode, ParameterSet};
use crate::error::AppError;
use crate::math::{argmin, interpolate_linear, refine_parabolic};
use crate::models::{mode_gate_time, mode_heating_rate};

/// Frequency/infidelity pair picked by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimum {
    /// COM angular frequency (rad/s).
    pub frequency: f64,
    pub infidelity: f64,
    /// Grid index when the frequency is a grid point.
    pub index: Option<usize>,
}

/// Grid argmin of `total`.
pub fn search_minimum(frequencies: &[f64], total: &[f64]) -> Result<Optimum, AppError> {
    if frequencies.len() != total.len() {
        return Err(AppError::computation(format!(
            "Curve length {} does not match grid length {}.",
            total.len(),
            frequencies.len()
        )));
    }
    let Some(index) = argmin(total) else {
        return Err(AppError::computation("Total infidelity curve is empty or all NaN."));
    };
    Ok(Optimum {
        frequency: frequencies[index],
        infidelity: total[index],
        index: Some(index),
    })
}

/// Total infidelity interpolated at `target` (rad/s).
pub fn evaluate_at(frequencies: &[f64], total: &[f64], target: f64) -> Result<Optimum, AppError> {
    let infidelity = interpolate_linear(frequencies, total, target)?;
    let index = frequencies.iter().position(|&f| f == target);
    Ok(Optimum {
        frequency: target,
        infidelity,
        index,
    })
}

/// Pick the operating frequency for `params` on an evaluated breakdown.
pub fn optimize_frequency(breakdown: &ErrorBreakdown, params: &ParameterSet) -> Result<Optimum, AppError> {
    let optimum = match params.optimize {
        OptimizeMode::Search => search_minimum(&breakdown.frequencies, &breakdown.total)?,
        OptimizeMode::Fixed => {
            let target = params.physical().fixed_frequency;
            evaluate_at(&breakdown.frequencies, &breakdown.total, target)?
        }
    };
    if !optimum.infidelity.is_finite() {
        return Err(AppError::computation(format!(
            "Optimizer produced a non-finite infidelity at {} rad/s.",
            optimum.frequency
        )));
    }
    debug!(
        mode = ?params.optimize,
        frequency = optimum.frequency,
        infidelity = optimum.infidelity,
        "optimizer result"
    );
    Ok(optimum)
}

/// Operating point (frequency, infidelity, gate time, heating rate).
pub fn operating_point(breakdown: &ErrorBreakdown, params: &ParameterSet) -> Result<OperatingPoint, AppError> {
    let optimum = optimize_frequency(breakdown, params)?;
    let inputs = params.physical();
    let mode = params.vibrational_mode;

    let gate_time = mode_gate_time(mode, optimum.frequency, &inputs);
    let heating_rate = mode_heating_rate(mode, optimum.frequency, inputs.electric_noise);
    if !(gate_time.is_finite() && heating_rate.is_finite()) {
        return Err(AppError::computation(format!(
            "Non-finite gate time or heating rate at {} rad/s.",
            optimum.frequency
        )));
    }

    Ok(OperatingPoint {
        frequency: optimum.frequency,
        infidelity: optimum.infidelity,
        gate_time,
        heating_rate,
    })
}

/// Sub-grid estimate of the minimum (report-only; never used as the operating point).
pub fn refined_minimum(breakdown: &ErrorBreakdown) -> Option<(f64, f64)> {
    let idx = argmin(&breakdown.total)?;
    refine_parabolic(&breakdown.frequencies, &breakdown.total, idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FrequencyGrid;
    use crate::models::constants::KHZ;
    use crate::models::evaluate;

    #[test]
    fn search_returns_grid_point_and_first_tie() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [5.0, 1.0, 1.0, 2.0];
        let opt = search_minimum(&xs, &ys).unwrap();
        assert_eq!(opt.frequency, 2.0);
        assert_eq!(opt.infidelity, 1.0);
        assert_eq!(opt.index, Some(1));
    }

    #[test]
    fn fixed_mode_at_first_grid_point_is_exact() {
        let grid = FrequencyGrid::default();
        let params = ParameterSet {
            optimize: OptimizeMode::Fixed,
            fixed_frequency: 100,
            ..ParameterSet::default()
        };
        let b = evaluate(&grid, &params).unwrap();
        let opt = optimize_frequency(&b, &params).unwrap();
        assert_eq!(opt.infidelity, b.total[0]);
        assert_eq!(opt.index, Some(0));
    }

    #[test]
    fn fixed_mode_stays_between_neighbours() {
        let grid = FrequencyGrid::default();
        let params = ParameterSet {
            optimize: OptimizeMode::Fixed,
            fixed_frequency: 333,
            ..ParameterSet::default()
        };
        let b = evaluate(&grid, &params).unwrap();
        let opt = optimize_frequency(&b, &params).unwrap();
        let target = 333.0 * KHZ;
        let upper = b.frequencies.partition_point(|&f| f < target);
        let (lo, hi) = (b.total[upper - 1], b.total[upper]);
        assert!(opt.infidelity >= lo.min(hi) && opt.infidelity <= lo.max(hi));
    }

    #[test]
    fn fixed_target_outside_grid_is_rejected() {
        let grid = FrequencyGrid::linear_khz(200.0, 400.0, 50).unwrap();
        let params = ParameterSet {
            optimize: OptimizeMode::Fixed,
            fixed_frequency: 450,
            ..ParameterSet::default()
        };
        let b = evaluate(&grid, &params).unwrap();
        let err = optimize_frequency(&b, &params).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn operating_point_uses_stretch_frequency_for_gate_time() {
        let grid = FrequencyGrid::default();
        let com = ParameterSet::default();
        let stretch = ParameterSet {
            vibrational_mode: crate::domain::VibrationalMode::AxialStretch,
            optimize: OptimizeMode::Fixed,
            ..ParameterSet::default()
        };
        let com_fixed = ParameterSet {
            optimize: OptimizeMode::Fixed,
            ..com
        };
        let a = operating_point(&evaluate(&grid, &com_fixed).unwrap(), &com_fixed).unwrap();
        let b = operating_point(&evaluate(&grid, &stretch).unwrap(), &stretch).unwrap();
        assert_eq!(a.frequency, b.frequency);
        // t ∝ ω^(3/2) and the stretch mode sits at sqrt(3)·ω.
        assert!((b.gate_time / a.gate_time - 3f64.powf(0.75)).abs() < 1e-9);
        assert!(b.heating_rate < a.heating_rate);
    }

    #[test]
    fn refined_minimum_is_near_grid_minimum() {
        let grid = FrequencyGrid::default();
        let params = ParameterSet::default();
        let b = evaluate(&grid, &params).unwrap();
        let grid_opt = search_minimum(&b.frequencies, &b.total).unwrap();
        let (x, y) = refined_minimum(&b).unwrap();
        let spacing = b.frequencies[1] - b.frequencies[0];
        assert!((x - grid_opt.frequency).abs() <= 2.0 * spacing);
        assert!(((y - grid_opt.infidelity) / grid_opt.infidelity).abs() < 1e-2);
    }
}
