#![doc = include_str!("../README.md")]

pub mod compare;
pub mod errors;
pub mod plots;
pub mod record;
pub mod report;
pub mod table;
pub mod units;

// Re-export main types
pub use compare::{RatioTable, Skip};
pub use errors::Error;
pub use record::{BenchmarkRecord, parse_line, read_records};
pub use table::{Metric, ResultTable};
