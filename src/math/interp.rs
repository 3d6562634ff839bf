//! Curve lookups on a sampled grid: argmin and linear interpolation.

use crate::error::AppError;

/// Index of the smallest value; ties resolve to the first occurrence.
///
/// Returns `None` for an empty slice or when every value is NaN.
pub fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some(b) if v >= values[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Linearly interpolate `ys(xs)` at `x`.
///
/// `xs` must be strictly increasing and `x` must lie in `[xs[0], xs[n-1]]`;
/// there is no extrapolation.
pub fn interpolate_linear(xs: &[f64], ys: &[f64], x: f64) -> Result<f64, AppError> {
    if xs.len() != ys.len() {
        return Err(AppError::computation(format!(
            "Interpolation length mismatch: {} abscissae vs {} ordinates.",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(AppError::computation("Interpolation needs at least 2 samples."));
    }
    let (lo, hi) = (xs[0], xs[xs.len() - 1]);
    if !(x >= lo && x <= hi) {
        return Err(AppError::configuration(format!(
            "Interpolation target {x} is outside the sampled domain [{lo}, {hi}]."
        )));
    }

    // First index whose abscissa is >= x.
    let upper = xs.partition_point(|&v| v < x);
    if upper == 0 {
        return Ok(ys[0]);
    }
    if xs[upper] == x {
        return Ok(ys[upper]);
    }
    let lower = upper - 1;
    let u = (x - xs[lower]) / (xs[upper] - xs[lower]);
    Ok(ys[lower] + u * (ys[upper] - ys[lower]))
}
