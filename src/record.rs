//! Benchmark line parsing — turns raw `go test -bench` output lines into
//! structured records.
//!
//! Only lines whose first whitespace-delimited token starts with
//! `Benchmark` are candidates; everything else (compiler status, `ok` /
//! `PASS` trailers, blank lines) is skipped silently. A candidate is
//! accepted purely on name structure: the token must decompose into at
//! least four `/`-delimited segments. Metric presence is never required.

use std::io::BufRead;

use serde::Serialize;

use crate::errors::Error;
use crate::units;

/// Marker prefix identifying a benchmark measurement line.
const MARKER: &str = "Benchmark";

/// One parsed benchmark measurement.
///
/// The name is hierarchical, e.g. `RPC/sequential/nop/tcp-6`: suite,
/// kind, workload, then the system under test with Go's `-<GOMAXPROCS>`
/// suffix. Any subset of the three metrics may be present; `None` means
/// the line did not report that metric, which is distinct from a
/// measured zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    /// Full identifier after the `Benchmark` marker.
    pub name: String,
    /// Measurement category: `sequential` or `parallel`.
    pub kind: String,
    /// Benchmark scenario name, e.g. `nop`, `tree`, `hex`.
    pub workload: String,
    /// System under test, parallelism suffix stripped (`tcp-6` → `tcp`).
    pub system: String,
    /// Time per operation in seconds, if reported.
    pub sec_per_op: Option<f64>,
    /// Bytes allocated per operation, if reported.
    pub bytes_per_op: Option<f64>,
    /// Throughput in bytes per second, if reported.
    pub bytes_per_sec: Option<f64>,
}

/// Strip a trailing `-<digits>` parallelism suffix from a system name.
///
/// Only an all-digit suffix after the final `-` denotes the parallelism
/// degree; `md-capnp-6` becomes `md-capnp`, while `foo-bar` is kept
/// whole.
fn strip_parallelism_suffix(system: &str) -> &str {
    match system.rsplit_once('-') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => system,
    }
}

/// Parse one line of benchmark output.
///
/// Returns `None` for anything that is not a measurement line. The three
/// metric quantities are searched for independently over the whole line,
/// in any order; a record with all three absent is still valid.
pub fn parse_line(line: &str) -> Option<BenchmarkRecord> {
    let line = line.trim();
    let name = line.split_whitespace().next()?.strip_prefix(MARKER)?;

    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() < 4 {
        return None;
    }

    Some(BenchmarkRecord {
        name: name.to_string(),
        kind: parts[1].to_string(),
        workload: parts[2].to_string(),
        system: strip_parallelism_suffix(parts[3]).to_string(),
        sec_per_op: units::find_quantity(line, "/op", units::TIME_UNITS),
        bytes_per_op: units::find_quantity(line, "/op", units::BYTE_UNITS),
        bytes_per_sec: units::find_throughput(line),
    })
}

/// Read benchmark records from a line stream.
///
/// Non-measurement lines are skipped. An input with zero measurement
/// lines is fatal: there is nothing to report on.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<BenchmarkRecord>, Error> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(record) = parse_line(&line) {
            records.push(record);
        }
    }
    if records.is_empty() {
        return Err(Error::NoBenchmarkLines);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_marker_lines_yield_nothing() {
        assert!(parse_line("").is_none());
        assert!(parse_line("goos: linux").is_none());
        assert!(parse_line("PASS").is_none());
        assert!(parse_line("ok  \tgithub.com/example/bench\t42.1s").is_none());
        assert!(parse_line("# command-line-arguments").is_none());
    }

    #[test]
    fn test_full_line() {
        let line =
            "BenchmarkRPC/sequential/nop/tcp-6  \t 1234567\t 950 ns/op\t 120 B/op\t 3 allocs/op";
        let r = parse_line(line).unwrap();
        assert_eq!(r.name, "RPC/sequential/nop/tcp-6");
        assert_eq!(r.kind, "sequential");
        assert_eq!(r.workload, "nop");
        assert_eq!(r.system, "tcp");
        assert_eq!(r.sec_per_op, Some(950e-9));
        assert_eq!(r.bytes_per_op, Some(120.0));
        assert_eq!(r.bytes_per_sec, None);
    }

    #[test]
    fn test_too_few_segments() {
        assert!(parse_line("BenchmarkRPC/sequential/nop 100 ns/op").is_none());
        assert!(parse_line("BenchmarkRPC 100 ns/op").is_none());
    }

    #[test]
    fn test_parallelism_suffix_stripped() {
        assert_eq!(strip_parallelism_suffix("tcp-6"), "tcp");
        assert_eq!(strip_parallelism_suffix("wsjson-1"), "wsjson");
        assert_eq!(strip_parallelism_suffix("mdcapl0-12"), "mdcapl0");
        assert_eq!(strip_parallelism_suffix("md-capnp-6"), "md-capnp");
        // No all-digit suffix: name kept whole.
        assert_eq!(strip_parallelism_suffix("foo-bar"), "foo-bar");
        assert_eq!(strip_parallelism_suffix("tcp"), "tcp");
        assert_eq!(strip_parallelism_suffix("tcp-"), "tcp-");
    }

    #[test]
    fn test_throughput_only_line() {
        let r = parse_line("BenchmarkRPC/parallel/hex/grpc-6 500 105.22 MB/s").unwrap();
        assert_eq!(r.kind, "parallel");
        assert_eq!(r.system, "grpc");
        assert_eq!(r.sec_per_op, None);
        assert_eq!(r.bytes_per_op, None);
        assert_eq!(r.bytes_per_sec, Some(105.22e6));
    }

    #[test]
    fn test_metricless_line_is_still_a_record() {
        let r = parse_line("BenchmarkRPC/sequential/nop/tcp-6").unwrap();
        assert_eq!(r.system, "tcp");
        assert_eq!(r.sec_per_op, None);
        assert_eq!(r.bytes_per_op, None);
        assert_eq!(r.bytes_per_sec, None);
    }

    #[test]
    fn test_read_records_skips_noise() {
        let input = "goos: linux\n\
                     BenchmarkRPC/sequential/nop/tcp-6 100 950 ns/op\n\
                     some compiler message\n\
                     BenchmarkRPC/sequential/nop/grpc-6 100 1900 ns/op\n\
                     PASS\n";
        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].system, "tcp");
        assert_eq!(records[1].system, "grpc");
    }

    #[test]
    fn test_read_records_no_benchmark_lines_is_fatal() {
        let input = "goos: linux\nok  \tpkg\t1.2s\nPASS\n";
        let err = read_records(input.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::NoBenchmarkLines));
    }
}
