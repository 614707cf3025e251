//! Markdown and JSON summaries of the emitted ratio tables.
//!
//! `results.json` is the machine-readable dump; `report.md` embeds the
//! SVG charts and renders each ratio table as a Markdown table, columns
//! in their ranked order.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::compare::RatioTable;

/// One emitted chart: its file name and the ratio table behind it.
#[derive(Serialize)]
struct ChartSummary<'a> {
    file: &'a str,
    #[serde(flatten)]
    table: &'a RatioTable,
}

#[derive(Serialize)]
struct Summary<'a> {
    charts: Vec<ChartSummary<'a>>,
}

/// Write `results.json` for all charts that were produced.
pub fn write_json(charts: &[(String, RatioTable)], path: &Path) -> std::io::Result<()> {
    let summary = Summary {
        charts: charts
            .iter()
            .map(|(file, table)| ChartSummary { file, table })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

fn fmt_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) if r >= 100.0 => format!("{r:.0}x"),
        Some(r) => format!("{r:.2}x"),
        None => "–".to_string(),
    }
}

/// Write `report.md` with one section per emitted chart.
pub fn write_markdown(charts: &[(String, RatioTable)], path: &Path) -> std::io::Result<()> {
    let mut out = String::new();
    writeln!(out, "# Benchmark Comparison Report\n").unwrap();

    for (file, table) in charts {
        writeln!(
            out,
            "## {}: {} (vs {})\n",
            table.kind,
            table.metric.label(),
            table.baseline,
        )
        .unwrap();
        writeln!(out, "![{} {}]({file})\n", table.kind, table.metric.label()).unwrap();

        write!(out, "| workload |").unwrap();
        for system in &table.columns {
            write!(out, " {system} |").unwrap();
        }
        writeln!(out).unwrap();
        write!(out, "|---|").unwrap();
        for _ in &table.columns {
            write!(out, "---|").unwrap();
        }
        writeln!(out).unwrap();

        for (workload, row) in &table.rows {
            write!(out, "| {workload} |").unwrap();
            for system in &table.columns {
                write!(out, " {} |", fmt_ratio(row.get(system).copied())).unwrap();
            }
            writeln!(out).unwrap();
        }
        writeln!(out).unwrap();
    }

    std::fs::write(path, out)
}
