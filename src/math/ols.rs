//! Least-squares parabola through the neighbourhood of a grid minimum.
//!
//! The grid search resolves the optimum only to the grid spacing. For reporting
//! we additionally fit
//!
//! ```text
//! y ≈ a + b·u + c·u²,   u = (x - x_min) / h
//! ```
//!
//! through up to five samples centred on the argmin and read off the vertex.
//! Abscissae are rescaled by the local spacing `h` so the design matrix stays
//! well conditioned for frequencies around 1e6 rad/s.

use nalgebra::{DMatrix, DVector};

/// Samples taken on each side of the argmin.
const HALF_WINDOW: usize = 2;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Vertex `(x, y)` of the parabola fitted around `ys[idx]`.
///
/// Returns `None` when the minimum sits on a grid edge, the fit is not convex,
/// or the vertex falls outside the fitted window.
pub fn refine_parabolic(xs: &[f64], ys: &[f64], idx: usize) -> Option<(f64, f64)> {
    if xs.len() != ys.len() || idx == 0 || idx + 1 >= xs.len() {
        return None;
    }

    let lo = idx.saturating_sub(HALF_WINDOW);
    let hi = (idx + HALF_WINDOW).min(xs.len() - 1);
    let n = hi - lo + 1;

    let x0 = xs[idx];
    let h = (xs[idx + 1] - xs[idx - 1]) / 2.0;
    if !(h.is_finite() && h > 0.0) {
        return None;
    }

    let mut design = DMatrix::<f64>::zeros(n, 3);
    let mut obs = DVector::<f64>::zeros(n);
    for (row, i) in (lo..=hi).enumerate() {
        let u = (xs[i] - x0) / h;
        design[(row, 0)] = 1.0;
        design[(row, 1)] = u;
        design[(row, 2)] = u * u;
        obs[row] = ys[i];
    }

    let coef = solve_least_squares(&design, &obs)?;
    let (a, b, c) = (coef[0], coef[1], coef[2]);
    if !(c > 0.0) {
        return None;
    }

    let u_star = -b / (2.0 * c);
    let u_lo = (xs[lo] - x0) / h;
    let u_hi = (xs[hi] - x0) / h;
    if !(u_star >= u_lo && u_star <= u_hi) {
        return None;
    }

    let y_star = a + b * u_star + c * u_star * u_star;
    let x_star = x0 + u_star * h;
    if x_star.is_finite() && y_star.is_finite() {
        Some((x_star, y_star))
    } else {
        None
    }
}
