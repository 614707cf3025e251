//! SVG chart generation for baseline-relative benchmark comparisons.
//!
//! Produces grouped-bar charts using the `plotters` crate with the SVG
//! backend: one cluster of bars per workload, one bar per system in the
//! ratio table's ranked column order, and a horizontal reference line at
//! ratio = 1 marking baseline parity.

use plotters::prelude::*;
use std::path::Path;

use crate::compare::RatioTable;

// ---------------------------------------------------------------------------
// Palette — 8 distinguishable colors (loosely based on ColorBrewer Set1)
// ---------------------------------------------------------------------------

const PALETTE: [RGBColor; 8] = [
    RGBColor(231, 76, 60),  // red
    RGBColor(52, 152, 219), // blue
    RGBColor(46, 204, 113), // emerald
    RGBColor(230, 160, 0),  // amber
    RGBColor(155, 89, 182), // amethyst
    RGBColor(26, 188, 156), // turquoise
    RGBColor(44, 62, 80),   // dark slate
    RGBColor(243, 156, 18), // orange
];

/// Presentation knobs for one chart; the ratio data itself carries the
/// column ordering.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Chart caption.
    pub title: String,
    /// Y-axis description, e.g. `ratio vs tcp (log scale)`.
    pub y_label: String,
    /// Logarithmic y-axis; used for latency and allocation charts where
    /// ratios span orders of magnitude.
    pub log_scale: bool,
}

/// Label only the centers of the workload clusters (0.5, 1.5, …).
fn cluster_label(workloads: &[&str], x: f64) -> String {
    let centered = x - 0.5;
    if centered < 0.0 || (centered - centered.round()).abs() > 0.1 {
        return String::new();
    }
    workloads
        .get(centered.round() as usize)
        .map_or_else(String::new, |w| (*w).to_string())
}

/// Bar rectangles for one system column across all workload clusters.
///
/// Cluster `i` spans `[i, i+1)`; bars fill the middle 80% of the
/// cluster, split evenly between the systems. Missing cells simply get
/// no bar. Bars rise from `y_base` (the bottom of the visible axis).
fn system_bars(
    table: &RatioTable,
    workloads: &[&str],
    system: &str,
    slot_index: usize,
    y_base: f64,
    color: RGBColor,
) -> Vec<Rectangle<(f64, f64)>> {
    let n_systems = table.columns.len();
    let slot = 0.8 / n_systems as f64;
    workloads
        .iter()
        .enumerate()
        .filter_map(|(wi, workload)| {
            table.rows[*workload].get(system).map(|&v| {
                let x0 = wi as f64 + 0.1 + slot_index as f64 * slot;
                Rectangle::new([(x0, y_base), (x0 + slot * 0.92, v)], color.mix(0.85).filled())
            })
        })
        .collect()
}

/// Draw a grouped bar chart of the ratio table and save it as SVG.
pub fn ratio_bar_chart(
    table: &RatioTable,
    style: &ChartStyle,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let workloads: Vec<&str> = table.rows.keys().map(String::as_str).collect();
    if workloads.is_empty() || table.columns.is_empty() {
        return Ok(());
    }
    let n_w = workloads.len();

    // The reference line at 1.0 is always in range: the baseline column
    // itself is 1.0 on every row.
    let mut y_min = 1.0f64;
    let mut y_max = 1.0f64;
    for row in table.rows.values() {
        for &v in row.values() {
            if v > y_max {
                y_max = v;
            }
            if v > 0.0 && v < y_min {
                y_min = v;
            }
        }
    }

    let root = SVGBackend::new(output, (900, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    if style.log_scale {
        let y_base = y_min * 0.5;
        let mut chart = ChartBuilder::on(&root)
            .caption(&style.title, ("sans-serif", 18))
            .margin(14)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..n_w as f64, (y_base..y_max * 1.3).log_scale())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n_w * 2 + 1)
            .x_desc("Workload")
            .y_desc(style.y_label.as_str())
            .x_label_formatter(&|x| cluster_label(&workloads, *x))
            .draw()?;

        for (si, system) in table.columns.iter().enumerate() {
            let color = PALETTE[si % PALETTE.len()];
            chart
                .draw_series(system_bars(table, &workloads, system, si, y_base, color))?
                .label(system.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled())
                });
        }

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 1.0), (n_w as f64, 1.0)],
            BLACK.mix(0.5).stroke_width(1),
        )))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .margin(12)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK.mix(0.3))
            .label_font(("sans-serif", 13))
            .draw()?;
    } else {
        let y_base = 0.0;
        let mut chart = ChartBuilder::on(&root)
            .caption(&style.title, ("sans-serif", 18))
            .margin(14)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..n_w as f64, 0f64..y_max * 1.15)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n_w * 2 + 1)
            .x_desc("Workload")
            .y_desc(style.y_label.as_str())
            .x_label_formatter(&|x| cluster_label(&workloads, *x))
            .draw()?;

        for (si, system) in table.columns.iter().enumerate() {
            let color = PALETTE[si % PALETTE.len()];
            chart
                .draw_series(system_bars(table, &workloads, system, si, y_base, color))?
                .label(system.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled())
                });
        }

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 1.0), (n_w as f64, 1.0)],
            BLACK.mix(0.5).stroke_width(1),
        )))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .margin(12)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK.mix(0.3))
            .label_font(("sans-serif", 13))
            .draw()?;
    }

    root.present()?;
    eprintln!("Saved: {}", output.display());
    Ok(())
}
