//! Frequency grid generation.
//!
//! The optimizer is a deterministic grid search, so the grid is the resolution
//! limit of every operating point. A grid must be finite, strictly increasing and
//! hold at least two points (linear interpolation needs a bracket).

use crate::error::AppError;
use crate::models::constants::KHZ;

/// Default grid density.
pub const DEFAULT_GRID_POINTS: usize = 100;
/// Default lower edge (kHz).
pub const DEFAULT_NU_MIN_KHZ: f64 = 100.0;
/// Default upper edge (kHz).
pub const DEFAULT_NU_MAX_KHZ: f64 = 500.0;

/// Generate `steps` linearly spaced points between `min` and `max` (inclusive).
pub fn linear_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if steps < 2 {
        return Err(AppError::computation(format!(
            "Frequency grid needs at least 2 points, got {steps}."
        )));
    }
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > min) {
        return Err(AppError::configuration(format!(
            "Invalid frequency range: min={min}, max={max} (must be finite, >0, and max>min)."
        )));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(min + step * i as f64);
    }
    // Pin the last point so the upper edge is hit exactly.
    out[steps - 1] = max;
    Ok(out)
}

/// Strictly increasing angular frequencies (rad/s).
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    values: Vec<f64>,
}

impl FrequencyGrid {
    /// Validate an arbitrary sequence of angular frequencies.
    pub fn new(values: Vec<f64>) -> Result<Self, AppError> {
        if values.len() < 2 {
            return Err(AppError::computation(format!(
                "Frequency grid needs at least 2 points, got {}.",
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(AppError::configuration(format!(
                "Frequency grid contains a non-positive or non-finite value: {bad}."
            )));
        }
        if let Some(i) = values.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AppError::configuration(format!(
                "Frequency grid is not strictly increasing at index {}.",
                i + 1
            )));
        }
        Ok(Self { values })
    }

    /// `points` linearly spaced frequencies between `min_khz` and `max_khz`.
    pub fn linear_khz(min_khz: f64, max_khz: f64, points: usize) -> Result<Self, AppError> {
        Self::new(linear_space(min_khz * KHZ, max_khz * KHZ, points)?)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.values[0]
    }

    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn contains(&self, frequency: f64) -> bool {
        frequency >= self.first() && frequency <= self.last()
    }
}

impl Default for FrequencyGrid {
    /// 100 points from 100 kHz·2π to 500 kHz·2π.
    fn default() -> Self {
        let step = (DEFAULT_NU_MAX_KHZ - DEFAULT_NU_MIN_KHZ) / (DEFAULT_GRID_POINTS as f64 - 1.0);
        let mut values: Vec<f64> = (0..DEFAULT_GRID_POINTS)
            .map(|i| (DEFAULT_NU_MIN_KHZ + step * i as f64) * KHZ)
            .collect();
        values[DEFAULT_GRID_POINTS - 1] = DEFAULT_NU_MAX_KHZ * KHZ;
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_space_includes_endpoints() {
        let v = linear_space(1.0, 5.0, 5).unwrap();
        assert_eq!(v, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn degenerate_grid_is_a_computation_error() {
        let err = linear_space(1.0, 5.0, 1).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Computation);
        let err = FrequencyGrid::new(vec![1.0]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Computation);
    }

    #[test]
    fn rejects_non_increasing() {
        assert!(FrequencyGrid::new(vec![1.0, 2.0, 2.0]).is_err());
        assert!(FrequencyGrid::new(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn default_grid_matches_linear_khz() {
        let grid = FrequencyGrid::default();
        let built = FrequencyGrid::linear_khz(100.0, 500.0, 100).unwrap();
        assert_eq!(grid.len(), 100);
        assert!((grid.first() - 100.0 * KHZ).abs() < 1e-6);
        assert_eq!(grid.last(), 500.0 * KHZ);
        for (a, b) in grid.values().iter().zip(built.values()) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
