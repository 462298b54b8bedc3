//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, TickSummaryRow};

/// A sink for per-tick rows.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
