//! Per-agent record of contested-cell games since the last strategy update.

use ev_core::GameOutcome;

/// One tick's game result from the agent's point of view.
///
/// Ticks without a conflict are recorded as `(0, 0, NotPlayed)` so the
/// buffer length counts elapsed ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct HistoryEntry {
    /// Number of agents in the game, including this one.  0 if none played.
    pub participants: u32,
    /// Number of those agents that cooperated.
    pub cooperators:  u32,
    pub outcome:      GameOutcome,
}

impl HistoryEntry {
    /// Entry for a tick in which the agent did not contest any cell.
    pub const IDLE: HistoryEntry = HistoryEntry {
        participants: 0,
        cooperators:  0,
        outcome:      GameOutcome::NotPlayed,
    };
}

/// Buffered history, cleared at every strategy re-evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConflictHistory {
    entries: Vec<HistoryEntry>,
}

impl ConflictHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// `(Σ participants, Σ cooperators)` over the buffer.
    pub fn totals(&self) -> (u64, u64) {
        self.entries.iter().fold((0, 0), |(p, c), e| {
            (p + u64::from(e.participants), c + u64::from(e.cooperators))
        })
    }
}
