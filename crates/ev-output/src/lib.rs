//! `ev-output` — passive observers that turn step snapshots into results.
//!
//! | Observer             | Produces                                              |
//! |----------------------|-------------------------------------------------------|
//! | [`SummaryRecorder`]  | In-memory [`RunSummary`]                              |
//! | [`JsonExporter`]     | `RunSummary` as pretty JSON, written at end of run    |
//! | [`SimOutputObserver`]| One [`TickSummaryRow`] per snapshot via an [`OutputWriter`] (CSV: `tick_summaries.csv`) |
//!
//! `SimObserver` methods return nothing, so writers keep their first error
//! for [`take_error`](JsonExporter::take_error) after the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev_output::{CsvWriter, JsonExporter, SimOutputObserver};
//! use ev_sim::Fanout;
//!
//! let mut json = JsonExporter::new(out_dir.join("out.json"), &config);
//! let mut csv = SimOutputObserver::new(CsvWriter::new(&out_dir)?);
//! sim.run(&mut Fanout::new().with(&mut json).with(&mut csv))?;
//! if let Some(e) = json.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::{JsonExporter, read_summary, write_summary};
pub use observer::SimOutputObserver;
pub use row::TickSummaryRow;
pub use summary::{RunSummary, SummaryRecorder};
pub use writer::OutputWriter;
