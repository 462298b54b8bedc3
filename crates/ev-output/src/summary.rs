//! Per-run result summary built from step snapshots.

use ev_core::{MovementStrategy, RunConfig, Tick};
use ev_sim::{SimObserver, StepSnapshot};
use serde::{Deserialize, Serialize};

/// Everything reporting needs from one run.  Every history has one entry
/// per snapshot, starting with tick 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub environment:         String,
    /// Serialised as `strategy`.
    #[serde(rename = "strategy", alias = "movement")]
    pub movement:            MovementStrategy,
    /// Agents on the grid in the first snapshot.
    pub people_count:        usize,
    pub seed:                u64,
    /// Cumulative escaped count per snapshot.
    pub escape_time_history: Vec<usize>,
    pub cooperator_history:  Vec<usize>,
    pub defector_history:    Vec<usize>,
    /// Last committed tick.
    pub ticks:               u64,
}

impl RunSummary {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            environment:         config.environment.clone(),
            movement:            config.movement,
            people_count:        0,
            seed:                config.seed,
            escape_time_history: Vec::new(),
            cooperator_history:  Vec::new(),
            defector_history:    Vec::new(),
            ticks:               0,
        }
    }

    /// Agents that escaped by the end of the run.
    pub fn escaped(&self) -> usize {
        self.escape_time_history.last().copied().unwrap_or(0)
    }

    /// First tick at which at least `fraction` of the people had escaped.
    pub fn time_to_escape(&self, fraction: f64) -> Option<u64> {
        let needed = (self.people_count as f64 * fraction).ceil() as usize;
        self.escape_time_history
            .iter()
            .position(|&escaped| escaped >= needed)
            .map(|i| i as u64)
    }
}

/// Observer that accumulates a [`RunSummary`].
pub struct SummaryRecorder {
    summary: RunSummary,
    started: bool,
}

impl SummaryRecorder {
    pub fn new(config: &RunConfig) -> Self {
        Self { summary: RunSummary::new(config), started: false }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn into_summary(self) -> RunSummary {
        self.summary
    }
}

impl SimObserver for SummaryRecorder {
    fn on_step(&mut self, snapshot: &StepSnapshot) {
        if !self.started {
            self.summary.people_count = snapshot.on_grid();
            self.started = true;
        }
        self.summary.escape_time_history.push(snapshot.escaped.len());
        self.summary.cooperator_history.push(snapshot.cooperators);
        self.summary.defector_history.push(snapshot.defectors);
        self.summary.ticks = snapshot.tick.0;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.summary.ticks = final_tick.0;
    }
}
