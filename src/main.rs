//! Benchmark comparison chart generator.
//!
//! Reads `go test -bench . -benchmem` output, expresses every system's
//! measurements as ratios against a baseline system and renders one
//! grouped-bar SVG chart per (metric, kind) pair, plus `results.json`
//! and a Markdown report.
//!
//! Run: `go test -bench . -benchmem | benchplot [input] [outdir] [baseline]`

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use benchplot_rs::plots::{self, ChartStyle};
use benchplot_rs::{BenchmarkRecord, Error, Metric, RatioTable, ResultTable, read_records, report};

/// One entry of the fixed chart configuration.
struct ChartSpec {
    metric: Metric,
    kind: &'static str,
    title: &'static str,
    file: &'static str,
    log_scale: bool,
}

/// The default artifact mapping: which (metric, kind) pair lands in
/// which output file. Latency and allocation ratios span orders of
/// magnitude, so those charts use a log y-axis.
const CHARTS: [ChartSpec; 3] = [
    ChartSpec {
        metric: Metric::SecPerOp,
        kind: "sequential",
        title: "Sequential: sec/op",
        file: "latency.svg",
        log_scale: true,
    },
    ChartSpec {
        metric: Metric::BytesPerOp,
        kind: "sequential",
        title: "Sequential: alloc bytes/op",
        file: "alloc.svg",
        log_scale: true,
    },
    ChartSpec {
        metric: Metric::BytesPerSec,
        kind: "parallel",
        title: "Parallel: bytes/sec",
        file: "throughput.svg",
        log_scale: false,
    },
];

fn read_input(path: &str) -> Result<Vec<BenchmarkRecord>, Error> {
    if path == "-" {
        read_records(std::io::stdin().lock())
    } else {
        let file = File::open(path)?;
        read_records(BufReader::new(file))
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let input = args.get(1).map_or("-", String::as_str);
    let outdir = PathBuf::from(args.get(2).map_or("plots", String::as_str));
    let baseline = args.get(3).map_or("tcp", String::as_str);

    let records = match read_input(input) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    eprintln!("Loaded {} benchmark records", records.len());

    if let Err(e) = std::fs::create_dir_all(&outdir) {
        eprintln!(
            "error: cannot create output directory '{}': {e}",
            outdir.display()
        );
        std::process::exit(1);
    }

    let mut emitted: Vec<(String, RatioTable)> = Vec::new();
    for spec in &CHARTS {
        let table = ResultTable::build(&records, spec.metric, spec.kind);
        let ratios = match RatioTable::build(&table, baseline) {
            Ok(ratios) => ratios,
            Err(skip) => {
                eprintln!("warning: {skip}, skipping '{}'", spec.title);
                continue;
            }
        };

        let style = ChartStyle {
            title: spec.title.to_string(),
            y_label: format!(
                "ratio vs {baseline} ({} scale)",
                if spec.log_scale { "log" } else { "linear" },
            ),
            log_scale: spec.log_scale,
        };
        let output = outdir.join(spec.file);
        if let Err(e) = plots::ratio_bar_chart(&ratios, &style, &output) {
            eprintln!("error generating chart '{}': {e}", output.display());
            std::process::exit(1);
        }
        emitted.push((spec.file.to_string(), ratios));
    }

    if emitted.is_empty() {
        eprintln!("warning: no charts produced");
        return;
    }

    if let Err(e) = report::write_json(&emitted, &outdir.join("results.json")) {
        eprintln!("error writing results.json: {e}");
        std::process::exit(1);
    }
    if let Err(e) = report::write_markdown(&emitted, &outdir.join("report.md")) {
        eprintln!("error writing report.md: {e}");
        std::process::exit(1);
    }

    eprintln!("\nDone! Report at: {}", outdir.join("report.md").display());
}
