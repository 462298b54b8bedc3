//! Single-run driver shared by `evac run` and the sweep workers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ev_core::RunConfig;
use ev_output::{CsvWriter, JsonExporter, RunSummary, SimOutputObserver, SummaryRecorder};
use ev_sim::{Fanout, SimBuilder};

/// Optional files written alongside the in-memory summary.
#[derive(Clone, Debug, Default)]
pub struct RunOutputs {
    pub json: Option<PathBuf>,
    pub csv:  Option<PathBuf>,
}

/// `<maps>/<env>.txt`
pub fn map_path(maps: &Path, env: &str) -> PathBuf {
    maps.join(format!("{env}.txt"))
}

/// Load the map named by `config.environment`, run to completion, and return
/// the summary.  Output errors are fatal.
pub fn run_single(config: &RunConfig, maps: &Path, outputs: &RunOutputs) -> Result<RunSummary> {
    let path = map_path(maps, &config.environment);
    let mut sim = SimBuilder::from_map_file(config.clone(), &path)
        .with_context(|| format!("loading map {}", path.display()))?
        .build()?;

    let mut recorder = SummaryRecorder::new(config);
    let mut json = outputs.json.as_ref().map(|p| JsonExporter::new(p, config));
    let mut csv = match &outputs.csv {
        Some(dir) => Some(SimOutputObserver::new(CsvWriter::new(dir)?)),
        None => None,
    };

    {
        let mut fan = Fanout::new().with(&mut recorder);
        if let Some(j) = json.as_mut() {
            fan.push(j);
        }
        if let Some(c) = csv.as_mut() {
            fan.push(c);
        }
        sim.run(&mut fan)?;
    }

    if let Some(e) = json.as_mut().and_then(JsonExporter::take_error) {
        return Err(e).context("writing JSON summary");
    }
    if let Some(e) = csv.as_mut().and_then(SimOutputObserver::take_error) {
        return Err(e).context("writing CSV output");
    }
    Ok(recorder.into_summary())
}
