//! Gradient scan: optimum per gradient value.
//!
//! Each gradient is an independent evaluation on its own `ParameterSet` copy,
//! so the scan runs in parallel with no shared trace state.

use rayon::prelude::*;
use tracing::info;

use crate::domain::{GRADIENT_RANGE, OperatingPoint, ParameterSet};
use crate::error::AppError;
use crate::math::FrequencyGrid;
use crate::models::evaluate;
use crate::optimize::operating_point;

/// Operating point for one scanned gradient (raw T/m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPoint {
    pub gradient: i32,
    pub point: OperatingPoint,
}

/// Evaluate `base` for every gradient in `from..=to` stepping by `step`.
pub fn scan_gradients(
    grid: &FrequencyGrid,
    base: &ParameterSet,
    from: i32,
    to: i32,
    step: i32,
) -> Result<Vec<ScanPoint>, AppError> {
    if step <= 0 || from > to {
        return Err(AppError::configuration(format!(
            "Invalid gradient scan {from}..={to} step {step}."
        )));
    }
    GRADIENT_RANGE.check(from)?;
    GRADIENT_RANGE.check(to)?;

    let gradients: Vec<i32> = (from..=to).step_by(step as usize).collect();
    info!(count = gradients.len(), "gradient scan");

    // Results come back in input order; the first error wins.
    gradients
        .par_iter()
        .map(|&gradient| {
            let mut params = base.clone();
            params.gradient = gradient;
            let breakdown = evaluate(grid, &params)?;
            let point = operating_point(&breakdown, &params)?;
            Ok(ScanPoint { gradient, point })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_is_ordered_and_matches_serial_evaluation() {
        let grid = FrequencyGrid::linear_khz(100.0, 500.0, 30).unwrap();
        let base = ParameterSet::default();
        let rows = scan_gradients(&grid, &base, 50, 150, 25).unwrap();
        let gradients: Vec<i32> = rows.iter().map(|r| r.gradient).collect();
        assert_eq!(gradients, vec![50, 75, 100, 125, 150]);

        let mut p = base.clone();
        p.gradient = 100;
        let b = evaluate(&grid, &p).unwrap();
        assert_eq!(rows[2].point, operating_point(&b, &p).unwrap());
    }

    #[test]
    fn out_of_range_scan_is_rejected() {
        let grid = FrequencyGrid::default();
        assert!(scan_gradients(&grid, &ParameterSet::default(), 10, 100, 10).is_err());
        assert!(scan_gradients(&grid, &ParameterSet::default(), 50, 100, 0).is_err());
    }
}
