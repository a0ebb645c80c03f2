//! Terminal visualization for distribution charts
//!
//! Histograms use block characters, the fitted normal curve is drawn with
//! Unicode braille characters, and the width-range box plot is a single
//! annotated bar.

use console::style;
use drawille::Canvas;

use crate::analysis::{BoxSummary, CurvePoint, Histogram};
use crate::cli::helpers::format_mm;

/// Maximum bar length of the histogram, in characters
pub const BAR_WIDTH: usize = 50;

/// Braille canvas size for the curve overlay, in pixels
pub const CURVE_WIDTH: u32 = 120;
pub const CURVE_HEIGHT: u32 = 40;

/// Width of the box-plot bar, in characters
pub const BOX_WIDTH: usize = 60;

/// Render a histogram as horizontal bars
///
/// Bins whose centre lies inside `highlight` are drawn solid, the rest
/// shaded. Without a highlight every bin is solid.
///
/// # Example Output
/// ```text
///       5.25 │██████████                                        │     2
///       5.75 │█████████████████████████                         │     5
/// ```
pub fn render_histogram(hist: &Histogram, highlight: Option<(f64, f64)>) -> String {
    let max_count = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    let mut lines = Vec::with_capacity(hist.counts.len() + 1);

    for (center, &count) in hist.centers().iter().zip(&hist.counts) {
        let len = (count as f64 / max_count as f64 * BAR_WIDTH as f64).round() as usize;
        let inside = highlight.map_or(true, |(lo, hi)| *center >= lo && *center <= hi);
        let bar = if inside {
            style("█".repeat(len)).green()
        } else {
            style("░".repeat(len)).dim()
        };
        lines.push(format!(
            "   {:>8.2} │{:<width$}│ {:>5}",
            center,
            bar,
            count,
            width = BAR_WIDTH
        ));
    }
    lines.push(format!("   {:>8} └{}┘", "", "─".repeat(BAR_WIDTH)));
    lines.join("\n")
}

/// Render the histogram outline with the fitted normal curve on top
///
/// Both series share the x axis (covering the histogram and ±3σ of the
/// curve) and the y axis (counts). Returns `None` when there is nothing to
/// draw.
pub fn render_curve_overlay(hist: &Histogram, curve: &[CurvePoint]) -> Option<String> {
    if hist.counts.is_empty() || curve.is_empty() {
        return None;
    }
    let x_lo = hist.edges[0].min(curve[0].x);
    let x_hi = hist.edges[hist.edges.len() - 1].max(curve[curve.len() - 1].x);
    let y_hi = curve
        .iter()
        .map(|p| p.y)
        .fold(hist.counts.iter().copied().max().unwrap_or(0) as f64, f64::max);
    if x_hi <= x_lo || y_hi <= 0.0 {
        return None;
    }

    let w = (CURVE_WIDTH - 1) as f64;
    let h = (CURVE_HEIGHT - 1) as f64;
    let px = |x: f64| (((x - x_lo) / (x_hi - x_lo)) * w).round().clamp(0.0, w) as u32;
    let py = |y: f64| (h - (y / y_hi) * h).round().clamp(0.0, h) as u32;

    let mut canvas = Canvas::new(CURVE_WIDTH, CURVE_HEIGHT);

    // Bar tops of the histogram
    for (i, &count) in hist.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let y = py(count as f64);
        for x in px(hist.edges[i])..=px(hist.edges[i + 1]) {
            canvas.set(x, y);
        }
    }

    // Curve, joined point to point
    for pair in curve.windows(2) {
        let (x0, y0) = (px(pair[0].x) as f64, py(pair[0].y) as f64);
        let (x1, y1) = (px(pair[1].x) as f64, py(pair[1].y) as f64);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            canvas.set(
                (x0 + (x1 - x0) * t).round() as u32,
                (y0 + (y1 - y0) * t).round() as u32,
            );
        }
    }

    // Baseline
    for x in 0..CURVE_WIDTH {
        canvas.set(x, CURVE_HEIGHT - 1);
    }

    let mut output = canvas.frame();
    output.push_str(&format!(
        "\n  {} … {} mm  (peak {:.1})",
        format_mm(x_lo),
        format_mm(x_hi),
        y_hi
    ));
    Some(output)
}

/// Render a box plot of width ranges on one line
///
/// # Example Output
/// ```text
///   ├──────[████│█████]──────────┤   •
///   whiskers 0.50 … 6.00  box 1.50 … 3.00  median 2.00  outliers 1
/// ```
pub fn render_box(summary: &BoxSummary) -> String {
    let lo = summary.min.min(summary.lower_whisker);
    let hi = summary.max.max(summary.upper_whisker);
    let span = hi - lo;
    let pos = |v: f64| -> usize {
        if span <= 0.0 {
            BOX_WIDTH / 2
        } else {
            (((v - lo) / span) * (BOX_WIDTH - 1) as f64).round() as usize
        }
        .min(BOX_WIDTH - 1)
    };

    let mut bar: Vec<char> = vec![' '; BOX_WIDTH];
    let (lw, q1, med, q3, uw) = (
        pos(summary.lower_whisker),
        pos(summary.q1),
        pos(summary.median),
        pos(summary.q3),
        pos(summary.upper_whisker),
    );

    for cell in bar.iter_mut().take(uw + 1).skip(lw) {
        *cell = '─';
    }
    for cell in bar.iter_mut().take(q3 + 1).skip(q1) {
        *cell = '█';
    }
    bar[lw] = '├';
    bar[uw] = '┤';
    bar[q1] = '[';
    bar[q3] = ']';
    bar[med] = '│';
    for &o in &summary.outliers {
        bar[pos(o)] = '•';
    }

    let bar: String = bar.into_iter().collect();
    format!(
        "  {}\n  whiskers {} … {}  box {} … {}  median {}  outliers {}",
        bar,
        format_mm(summary.lower_whisker),
        format_mm(summary.upper_whisker),
        format_mm(summary.q1),
        format_mm(summary.q3),
        format_mm(summary.median),
        summary.outliers.len()
    )
}
