//! Pivot-and-aggregate tables — one `(metric, kind)` slice of the record
//! collection.
//!
//! A `ResultTable` is a two-level mapping `workload → system → cell`,
//! where each cell keeps a running sum and count so repeated runs of the
//! same (workload, system) pair aggregate to their arithmetic mean.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::record::BenchmarkRecord;

/// The three canonical normalized metrics a record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    /// Time per operation, in seconds.
    #[serde(rename = "sec/op")]
    SecPerOp,
    /// Bytes allocated per operation.
    #[serde(rename = "bytes/op")]
    BytesPerOp,
    /// Throughput, in bytes per second.
    #[serde(rename = "bytes/sec")]
    BytesPerSec,
}

impl Metric {
    /// Extract this metric's value from a record, if reported.
    pub fn value(self, record: &BenchmarkRecord) -> Option<f64> {
        match self {
            Metric::SecPerOp => record.sec_per_op,
            Metric::BytesPerOp => record.bytes_per_op,
            Metric::BytesPerSec => record.bytes_per_sec,
        }
    }

    /// Whether a smaller value means better performance.
    ///
    /// Latency and allocation are lower-is-better; throughput is
    /// higher-is-better. This drives the ranking direction of the
    /// comparison columns.
    pub fn lower_is_better(self) -> bool {
        !matches!(self, Metric::BytesPerSec)
    }

    /// Human-readable label, matching the Go tool's column headers.
    pub fn label(self) -> &'static str {
        match self {
            Metric::SecPerOp => "sec/op",
            Metric::BytesPerOp => "bytes/op",
            Metric::BytesPerSec => "bytes/sec",
        }
    }
}

/// Running aggregate for one (workload, system) group.
#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    sum: f64,
    count: u32,
}

/// Mean values of one metric, for one kind, indexed by workload rows and
/// system columns.
#[derive(Debug)]
pub struct ResultTable {
    metric: Metric,
    kind: String,
    /// workload → system → running aggregate. A group with zero reported
    /// values has no cell: missing, never zero.
    cells: BTreeMap<String, BTreeMap<String, Cell>>,
    /// Every system seen for this kind, whether or not it reported this
    /// metric.
    systems: BTreeSet<String>,
}

impl ResultTable {
    /// Pivot the record collection into a table for one metric,
    /// restricted to one kind.
    pub fn build(records: &[BenchmarkRecord], metric: Metric, kind: &str) -> Self {
        let mut table = Self {
            metric,
            kind: kind.to_string(),
            cells: BTreeMap::new(),
            systems: BTreeSet::new(),
        };
        for record in records.iter().filter(|r| r.kind == kind) {
            table.systems.insert(record.system.clone());
            if let Some(v) = metric.value(record) {
                let cell = table
                    .cells
                    .entry(record.workload.clone())
                    .or_default()
                    .entry(record.system.clone())
                    .or_default();
                cell.sum += v;
                cell.count += 1;
            }
        }
        table
    }

    /// The metric this table was built for.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// The kind this table was restricted to.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// True if no (workload, system) group reported the metric.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the given system appeared at all for this kind.
    pub fn has_system(&self, system: &str) -> bool {
        self.systems.contains(system)
    }

    /// All workloads with at least one reported value, sorted.
    pub fn workloads(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// All systems seen for this kind, sorted.
    pub fn systems(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(String::as_str)
    }

    /// Mean of all reported values for the group, or `None` if the group
    /// never reported the metric.
    pub fn mean(&self, workload: &str, system: &str) -> Option<f64> {
        let cell = self.cells.get(workload)?.get(system)?;
        Some(cell.sum / f64::from(cell.count))
    }
}
