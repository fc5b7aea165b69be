//! The `TraceWriter` trait implemented by all trace backends.

use crate::{OutputResult, PositionRow};

/// Trait implemented by the CSV and plain-text trace writers.
///
/// Errors never reach the tick loop — [`TraceObserver`][crate::TraceObserver]
/// stores them internally and hands them back through `take_error`.
pub trait TraceWriter {
    /// Mark the start of a run.  Batch drivers reuse one writer across many
    /// runs; each run's snapshots are tagged (or separated) per backend.
    fn begin_run(&mut self) -> OutputResult<()>;

    /// Write one snapshot's worth of position rows.  All rows in the batch
    /// share the same tick and time.
    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()>;

    /// Flush the underlying file handle.
    ///
    /// Idempotent — safe to call more than once per run.
    fn finish(&mut self) -> OutputResult<()>;
}
