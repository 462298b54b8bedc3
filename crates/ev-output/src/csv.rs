//! CSV output backend.
//!
//! Creates `tick_summaries.csv` in the configured output directory.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow};

pub const TICK_SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes one row per snapshot to `tick_summaries.csv`.
pub struct CsvWriter {
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the CSV file, and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let mut summaries = Writer::from_path(dir.join(TICK_SUMMARY_FILE))?;
        summaries.write_record(["tick", "escaped", "on_grid", "cooperators", "defectors"])?;
        Ok(Self { summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.escaped.to_string(),
            row.on_grid.to_string(),
            row.cooperators.to_string(),
            row.defectors.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        Ok(())
    }
}
