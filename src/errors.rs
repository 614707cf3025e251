//! Submodule defining the errors used across the crate.

/// Errors that can occur while reading benchmark input.
///
/// Per-line problems never surface here: a line that is not a benchmark
/// measurement is silently skipped. Only the global "no data at all"
/// condition and I/O failures are fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input contained no benchmark measurement lines at all.
    #[error("no benchmark lines found (lines must start with 'Benchmark')")]
    NoBenchmarkLines,
    /// The input could not be read.
    #[error("failed to read benchmark input: {0}")]
    Io(#[from] std::io::Error),
}
