//! JSON export of a [`RunSummary`].

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ev_core::{RunConfig, Tick};
use ev_sim::{SimObserver, StepSnapshot};
use tracing::debug;

use crate::{OutputError, OutputResult, RunSummary, SummaryRecorder};

/// Write `summary` to `path` as pretty-printed JSON, creating parent
/// directories.
pub fn write_summary(path: &Path, summary: &RunSummary) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, summary)?;
    out.write_all(b"\n")?;
    out.flush()?;
    debug!(path = %path.display(), "wrote run summary");
    Ok(())
}

pub fn read_summary(path: &Path) -> OutputResult<RunSummary> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Records a summary during the run and writes it when the run ends.
pub struct JsonExporter {
    path:       PathBuf,
    recorder:   SummaryRecorder,
    last_error: Option<OutputError>,
}

impl JsonExporter {
    pub fn new(path: impl Into<PathBuf>, config: &RunConfig) -> Self {
        Self {
            path:       path.into(),
            recorder:   SummaryRecorder::new(config),
            last_error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn summary(&self) -> &RunSummary {
        self.recorder.summary()
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }
}

impl SimObserver for JsonExporter {
    fn on_step(&mut self, snapshot: &StepSnapshot) {
        self.recorder.on_step(snapshot);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.recorder.on_sim_end(final_tick);
        if let Err(e) = write_summary(&self.path, self.recorder.summary()) {
            self.last_error.get_or_insert(e);
        }
    }
}
