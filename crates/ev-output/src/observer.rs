//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ev_core::Tick;
use ev_sim::{SimObserver, StepSnapshot};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, TickSummaryRow};

/// A [`SimObserver`] that writes one [`TickSummaryRow`] per snapshot.
///
/// Writer errors are stored because `SimObserver` methods have no return
/// value.  Check [`take_error`][Self::take_error] after `sim.run()`.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step(&mut self, snapshot: &StepSnapshot) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(snapshot));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
