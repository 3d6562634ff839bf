//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid with a log-scaled infidelity axis. Output is fully
//! deterministic, which keeps golden tests simple.
//!
//! Plot elements:
//! - one curve per trace, drawn with the trace number (`1`..`4`)
//! - optional channel curves of the current trace, drawn with the channel letter
//! - operating points: `*`
//! - hidden traces are listed in the legend only

use crate::domain::TraceId;
use crate::models::constants::KHZ;
use crate::traces::{TraceManager, TraceView};

/// One curve to draw. `points` are `(frequency_khz, infidelity)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub marker: char,
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub highlight: Option<(f64, f64)>,
    pub hidden: bool,
}

/// Render every initialized trace of `manager`.
///
/// With `channels`, the nonzero noise channels of the current trace are drawn
/// too, one letter per channel (see `Channel::marker`).
pub fn render_trace_plot(manager: &TraceManager, channels: bool, width: usize, height: usize) -> String {
    render_series(&trace_series(manager, channels), width, height)
}

/// Series for every initialized trace, totals first.
pub fn trace_series(manager: &TraceManager, channels: bool) -> Vec<PlotSeries> {
    let mut series = Vec::new();
    for (i, id) in TraceId::ALL.into_iter().enumerate() {
        let marker = char::from_digit(i as u32 + 1, 10).unwrap_or('?');
        match manager.view(id) {
            TraceView::Uninitialized => {}
            TraceView::Hidden => series.push(PlotSeries {
                marker,
                label: id.to_string(),
                points: Vec::new(),
                highlight: None,
                hidden: true,
            }),
            TraceView::Shown(trace) => series.push(PlotSeries {
                marker,
                label: id.to_string(),
                points: khz_points(&trace.breakdown.frequencies, &trace.breakdown.total),
                highlight: Some((trace.point.frequency / KHZ, trace.point.infidelity)),
                hidden: false,
            }),
        }
    }

    if channels {
        let id = manager.current();
        if let TraceView::Shown(trace) = manager.view(id) {
            for curve in trace.breakdown.active_channels() {
                series.push(PlotSeries {
                    marker: curve.channel.marker(),
                    label: format!("{id} {}", curve.channel.label()),
                    points: khz_points(&trace.breakdown.frequencies, &curve.values),
                    highlight: None,
                    hidden: false,
                });
            }
        }
    }
    series
}

fn khz_points(frequencies: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    frequencies.iter().zip(values).map(|(&f, &e)| (f / KHZ, e)).collect()
}

/// Render a set of series on a shared log-y canvas.
pub fn render_series(series: &[PlotSeries], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let visible: Vec<Vec<(f64, f64)>> = series
        .iter()
        .filter(|s| !s.hidden)
        .map(|s| log_points(&s.points))
        .collect();

    let (x_min, x_max) = x_range(&visible).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(&visible).unwrap_or((-6.0, 0.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for (s, points) in series.iter().filter(|s| !s.hidden).zip(&visible) {
        draw_curve(&mut grid, points, s.marker, (x_min, x_max), (y_min, y_max));
    }
    for s in series.iter().filter(|s| !s.hidden) {
        if let Some((x, y)) = s.highlight.filter(|&(_, y)| y > 0.0) {
            let col = map_x(x, x_min, x_max, width);
            let row = map_y(y.log10(), y_min, y_max, height);
            grid[row][col] = '*';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: nu=[{x_min:.1}, {x_max:.1}] kHz | log10(infidelity)=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for s in series {
        if s.hidden {
            out.push_str(&format!("{} {} (hidden)\n", s.marker, s.label));
        } else {
            out.push_str(&format!("{} {}\n", s.marker, s.label));
        }
    }
    out
}

fn log_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|&&(x, y)| x.is_finite() && y > 0.0 && y.is_finite())
        .map(|&(x, y)| (x, y.log10()))
        .collect()
}

fn x_range(series: &[Vec<(f64, f64)>]) -> Option<(f64, f64)> {
    span(series.iter().flatten().map(|&(x, _)| x))
}

fn y_range(series: &[Vec<(f64, f64)>]) -> Option<(f64, f64)> {
    span(series.iter().flatten().map(|&(_, y)| y))
}

fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo.is_finite() && hi.is_finite() && hi > lo {
        Some((lo, hi))
    } else if lo.is_finite() && hi.is_finite() {
        Some((lo - 0.5, hi + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let pad = ((max - min).abs() * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // top row is the largest infidelity
    (height as f64 - 1.0 - u * (height as f64 - 1.0)).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    marker: char,
    (x_min, x_max): (f64, f64),
    (y_min, y_max): (f64, f64),
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, marker),
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = marker;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham). Never overwrites an occupied cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let (mut x, mut y) = (x0 as isize, y0 as isize);
    let (x1, y1) = (x1 as isize, y1 as isize);

    let dx = (x1 - x).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let dy = -(y1 - y).abs();
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let cell = &mut grid[y as usize][x as usize];
        if *cell == ' ' {
            *cell = ch;
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(marker: char, points: Vec<(f64, f64)>, hidden: bool) -> PlotSeries {
        PlotSeries {
            marker,
            label: format!("trace {marker}"),
            points,
            highlight: None,
            hidden,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let mut a = series('1', vec![(100.0, 1e-1), (300.0, 1e-3), (500.0, 1e-1)], false);
        a.highlight = Some((300.0, 1e-3));
        let b = series('2', vec![(100.0, 1e-2)], true);

        let txt = render_series(&[a, b], 10, 5);
        let expected = concat!(
            "Plot: nu=[100.0, 500.0] kHz | log10(infidelity)=[-3.10, -0.90]\n",
            "1        1\n",
            " 1      1 \n",
            "  11   1  \n",
            "    1 1   \n",
            "     *    \n",
            "1 trace 1\n",
            "2 trace 2 (hidden)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn hidden_series_do_not_affect_ranges() {
        let a = series('1', vec![(100.0, 1e-3), (200.0, 1e-2)], false);
        let b = series('2', vec![(900.0, 1e3)], true);
        let txt = render_series(&[a, b], 20, 6);
        assert!(txt.starts_with("Plot: nu=[100.0, 200.0] kHz"));
        assert!(!txt.lines().skip(1).take(6).any(|l| l.contains('2')));
    }

    fn chip_manager() -> TraceManager {
        let grid = crate::math::FrequencyGrid::linear_khz(100.0, 500.0, 41).unwrap();
        TraceManager::new(grid, crate::domain::ParameterSet::default()).unwrap()
    }

    #[test]
    fn current_trace_channels_follow_the_total() {
        let manager = chip_manager();

        let totals = trace_series(&manager, false);
        assert_eq!(totals.len(), 1);

        let series = trace_series(&manager, true);
        let markers: Vec<char> = series.iter().map(|s| s.marker).collect();
        assert_eq!(markers, vec!['1', 'h', 'd']);
        assert_eq!(series[1].label, "trace 1 heating");
        assert_eq!(series[2].points.len(), 41);

        let txt = render_trace_plot(&manager, true, 40, 12);
        assert!(txt.contains("\nh trace 1 heating\n"));
        assert!(txt.contains("\nd trace 1 decoherence\n"));
        assert!(!txt.contains("kerr"));
        let canvas: String = txt.lines().skip(1).take(12).collect();
        assert!(canvas.contains('h') && canvas.contains('d'));
    }

    #[test]
    fn hidden_current_trace_draws_no_channels() {
        let mut manager = chip_manager();
        manager.set_trace_flags(manager.current(), None, Some(true)).unwrap();
        let series = trace_series(&manager, true);
        assert_eq!(series.len(), 1);
        assert!(series[0].hidden);
    }

    #[test]
    fn empty_plot_still_renders_frame() {
        let txt = render_series(&[], 10, 5);
        assert_eq!(txt.lines().count(), 6);
    }
}
