//! Baseline-relative comparison — ratio tables and their column ranking.
//!
//! A `RatioTable` re-expresses every cell of a `ResultTable` as a
//! multiple of the baseline system's value for the same workload. Rows
//! without a strictly positive baseline are dropped whole: a ratio
//! against zero is meaningless.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::table::{Metric, ResultTable};

/// Why a comparison produced no ratio table.
///
/// These are reported conditions, not failures: the caller warns and
/// skips the affected chart, leaving the others untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Skip {
    /// The source table has no rows for the requested kind.
    #[error("no rows for kind={0}")]
    NoRows(String),
    /// The baseline system never appeared for this (metric, kind) pair.
    #[error("baseline system '{0}' not present")]
    MissingBaseline(String),
    /// Every row was dropped by the positive-baseline filter.
    #[error("no workloads with a positive '{0}' baseline")]
    Empty(String),
}

/// Per-workload, per-system values expressed as multiples of the
/// baseline's value, with a computed column ranking.
#[derive(Debug, Serialize)]
pub struct RatioTable {
    /// Metric the ratios were computed for.
    pub metric: Metric,
    /// Kind the source table was restricted to.
    pub kind: String,
    /// The reference system; its own column is 1.0 on every row.
    pub baseline: String,
    /// Baseline first, then the remaining systems ranked by mean ratio:
    /// ascending when lower-is-better, descending when higher-is-better,
    /// ties broken by name. Deterministic for a fixed input.
    pub columns: Vec<String>,
    /// workload → system → ratio vs baseline. Cells missing in the
    /// source table stay missing here.
    pub rows: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RatioTable {
    /// Divide a result table by its baseline column.
    pub fn build(table: &ResultTable, baseline: &str) -> Result<Self, Skip> {
        if table.is_empty() {
            return Err(Skip::NoRows(table.kind().to_string()));
        }
        if !table.has_system(baseline) {
            return Err(Skip::MissingBaseline(baseline.to_string()));
        }

        let mut rows: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for workload in table.workloads() {
            let Some(base) = table.mean(workload, baseline) else {
                continue;
            };
            if base <= 0.0 {
                continue;
            }
            let row: BTreeMap<String, f64> = table
                .systems()
                .filter_map(|system| {
                    table
                        .mean(workload, system)
                        .map(|v| (system.to_string(), v / base))
                })
                .collect();
            rows.insert(workload.to_string(), row);
        }
        if rows.is_empty() {
            return Err(Skip::Empty(baseline.to_string()));
        }

        let columns = rank_columns(table, &rows, baseline);
        Ok(Self {
            metric: table.metric(),
            kind: table.kind().to_string(),
            baseline: baseline.to_string(),
            columns,
            rows,
        })
    }
}

/// Order the columns: baseline first, the rest by mean ratio across all
/// rows (missing cells excluded from the mean, not treated as zero).
fn rank_columns(
    table: &ResultTable,
    rows: &BTreeMap<String, BTreeMap<String, f64>>,
    baseline: &str,
) -> Vec<String> {
    let lower_better = table.metric().lower_is_better();

    let mut ranked: Vec<(String, Option<f64>)> = table
        .systems()
        .filter(|s| *s != baseline)
        .map(|system| {
            let ratios: Vec<f64> = rows.values().filter_map(|row| row.get(system).copied()).collect();
            let mean = if ratios.is_empty() {
                None
            } else {
                Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
            };
            (system.to_string(), mean)
        })
        .collect();

    ranked.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => {
            let ord = x.total_cmp(&y);
            let ord = if lower_better { ord } else { ord.reverse() };
            ord.then_with(|| a.0.cmp(&b.0))
        }
        // Systems with no ratio at all rank last.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    std::iter::once(baseline.to_string())
        .chain(ranked.into_iter().map(|(system, _)| system))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BenchmarkRecord;

    fn rec(kind: &str, workload: &str, system: &str, sec: Option<f64>) -> BenchmarkRecord {
        BenchmarkRecord {
            name: format!("RPC/{kind}/{workload}/{system}-6"),
            kind: kind.to_string(),
            workload: workload.to_string(),
            system: system.to_string(),
            sec_per_op: sec,
            bytes_per_op: None,
            bytes_per_sec: sec.map(|s| 1.0 / s),
        }
    }

    fn seq_table(records: &[BenchmarkRecord]) -> ResultTable {
        ResultTable::build(records, Metric::SecPerOp, "sequential")
    }

    #[test]
    fn test_baseline_ratio_is_one() {
        let records = vec![
            rec("sequential", "nop", "tcp", Some(100e-9)),
            rec("sequential", "tree", "tcp", Some(5e-6)),
            rec("sequential", "nop", "grpc", Some(250e-9)),
        ];
        let ratios = RatioTable::build(&seq_table(&records), "tcp").unwrap();
        for row in ratios.rows.values() {
            assert_eq!(row["tcp"], 1.0);
        }
    }

    #[test]
    fn test_spec_scenario_lower_is_better() {
        let records = vec![
            rec("sequential", "nop", "tcp", Some(100e-9)),
            rec("sequential", "nop", "foo", Some(50e-9)),
        ];
        let ratios = RatioTable::build(&seq_table(&records), "tcp").unwrap();
        assert_eq!(ratios.rows.len(), 1);
        let row = &ratios.rows["nop"];
        assert_eq!(row["tcp"], 1.0);
        assert_eq!(row["foo"], 0.5);
        // foo is faster, so it ranks first among non-baseline columns.
        assert_eq!(ratios.columns, ["tcp", "foo"]);
    }

    #[test]
    fn test_higher_is_better_reverses_ranking() {
        let records = vec![
            rec("parallel", "hex", "tcp", Some(100e-9)),
            rec("parallel", "hex", "slow", Some(200e-9)),
            rec("parallel", "hex", "fast", Some(50e-9)),
        ];
        let table = ResultTable::build(&records, Metric::BytesPerSec, "parallel");
        let ratios = RatioTable::build(&table, "tcp").unwrap();
        // Throughput: fast has ratio 2.0, slow has 0.5; descending order.
        assert_eq!(ratios.columns, ["tcp", "fast", "slow"]);
    }

    #[test]
    fn test_missing_baseline_is_skipped() {
        let records = vec![rec("sequential", "nop", "grpc", Some(1e-6))];
        let err = RatioTable::build(&seq_table(&records), "tcp").unwrap_err();
        assert_eq!(err, Skip::MissingBaseline("tcp".to_string()));
    }

    #[test]
    fn test_no_rows_for_kind() {
        let records = vec![rec("parallel", "nop", "tcp", Some(1e-6))];
        let err = RatioTable::build(&seq_table(&records), "tcp").unwrap_err();
        assert_eq!(err, Skip::NoRows("sequential".to_string()));
    }

    #[test]
    fn test_zero_baseline_drops_only_that_row() {
        let records = vec![
            rec("sequential", "nop", "tcp", Some(0.0)),
            rec("sequential", "nop", "grpc", Some(1e-6)),
            rec("sequential", "tree", "tcp", Some(2e-6)),
            rec("sequential", "tree", "grpc", Some(4e-6)),
        ];
        let ratios = RatioTable::build(&seq_table(&records), "tcp").unwrap();
        assert!(!ratios.rows.contains_key("nop"));
        assert_eq!(ratios.rows["tree"]["grpc"], 2.0);
    }

    #[test]
    fn test_all_baselines_non_positive_is_empty() {
        let records = vec![
            rec("sequential", "nop", "tcp", Some(0.0)),
            rec("sequential", "nop", "grpc", Some(1e-6)),
        ];
        let err = RatioTable::build(&seq_table(&records), "tcp").unwrap_err();
        assert_eq!(err, Skip::Empty("tcp".to_string()));
    }

    #[test]
    fn test_ranking_mean_skips_missing_cells() {
        // grpc is missing on the tree row; its mean must be over the
        // single nop ratio, not dragged down by a phantom zero.
        let records = vec![
            rec("sequential", "nop", "tcp", Some(100e-9)),
            rec("sequential", "nop", "grpc", Some(300e-9)),
            rec("sequential", "nop", "ws", Some(200e-9)),
            rec("sequential", "tree", "tcp", Some(1e-6)),
            rec("sequential", "tree", "ws", Some(2e-6)),
        ];
        let ratios = RatioTable::build(&seq_table(&records), "tcp").unwrap();
        // Means: ws = (2.0 + 2.0) / 2 = 2.0, grpc = 3.0 → ws first.
        assert_eq!(ratios.columns, ["tcp", "ws", "grpc"]);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let records = vec![
            rec("sequential", "nop", "tcp", Some(100e-9)),
            rec("sequential", "nop", "b", Some(200e-9)),
            rec("sequential", "nop", "a", Some(200e-9)),
        ];
        let first = RatioTable::build(&seq_table(&records), "tcp").unwrap();
        for _ in 0..10 {
            let again = RatioTable::build(&seq_table(&records), "tcp").unwrap();
            assert_eq!(again.columns, first.columns);
        }
        // Equal means tie-break by name.
        assert_eq!(first.columns, ["tcp", "a", "b"]);
    }
}
