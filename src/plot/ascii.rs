//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! The plot puts observed values on the x-axis and predicted values on the
//! y-axis, over a shared range. A perfect fit lies on the diagonal.
//!
//! Plot elements:
//! - observations: `o`
//! - the `predicted = observed` reference line: `.`

use crate::domain::Observation;

/// Render observed-vs-predicted for fitted observations.
pub fn render_fit_plot(observations: &[Observation], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (lo, hi) = value_range(observations).unwrap_or((0.0, 1.0));
    let (lo, hi) = pad_range(lo, hi, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Reference line first, so points can overlay.
    draw_line(
        &mut grid,
        map_x(lo, lo, hi, width),
        map_y(lo, lo, hi, height),
        map_x(hi, lo, hi, width),
        map_y(hi, lo, hi, height),
        '.',
    );

    for obs in observations {
        if !(obs.observed.is_finite() && obs.predicted.is_finite()) {
            continue;
        }
        let x = map_x(obs.observed, lo, hi, width);
        let y = map_y(obs.predicted, lo, hi, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!("Plot: observed (x) vs predicted (y) | range=[{lo:.2}, {hi:.2}]\n"));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn value_range(observations: &[Observation]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in observations.iter().flat_map(|o| [o.observed, o.predicted]) {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(v: f64, lo: f64, hi: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, lo: f64, hi: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    // top row is the maximum
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
