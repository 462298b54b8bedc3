//! Plain data row types written by output backends.

use ev_sim::StepSnapshot;

/// Population counts after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    /// Cumulative escaped agents.
    pub escaped:     u64,
    pub on_grid:     u64,
    pub cooperators: u64,
    pub defectors:   u64,
}

impl From<&StepSnapshot> for TickSummaryRow {
    fn from(snap: &StepSnapshot) -> Self {
        Self {
            tick:        snap.tick.0,
            escaped:     snap.escaped.len() as u64,
            on_grid:     snap.on_grid() as u64,
            cooperators: snap.cooperators as u64,
            defectors:   snap.defectors as u64,
        }
    }
}
