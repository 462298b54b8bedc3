//! A single evacuating pedestrian.

use ev_core::{AgentId, Delta, GameOutcome, MovementStrategy, PlayStrategy, Pos, RunConfig, Tick};

use crate::{ConflictHistory, HistoryEntry};

/// Per-agent state.
///
/// Lifecycle within one tick:
///
/// 1. [`begin_tick`](Self::begin_tick) clears the outcome and parks the
///    candidate on the current cell.
/// 2. The movement model writes `candidate` and `momentum`.
/// 3. A conflict game may call [`win`](Self::win) or [`lose`](Self::lose).
/// 4. [`commit`](Self::commit) moves the agent onto its candidate.
/// 5. The strategy update consumes `outcome` and `history`.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id:               AgentId,
    /// Current cell.
    pub pos:              Pos,
    /// Cell the agent intends to occupy after this tick.
    pub candidate:        Pos,
    /// Displacement of the last sampled move; zeroed when a move is cancelled.
    pub momentum:         Delta,
    pub movement:         MovementStrategy,
    /// Fixed play for the current update interval.
    pub strategy:         PlayStrategy,
    pub outcome:          GameOutcome,
    pub history:          ConflictHistory,
    /// Exponent applied to the static field when weighting moves.
    pub familiarity:      u32,
    pub strategy_inertia: f64,
    pub update_interval:  u32,
    pub allow_diagonal:   bool,
    /// Tick at which the agent stepped onto an exit.
    pub escaped_at:       Option<Tick>,
}

impl Agent {
    /// A fresh agent at `pos`, parameterised from `config`.
    pub fn new(id: AgentId, pos: Pos, strategy: PlayStrategy, config: &RunConfig) -> Self {
        Self {
            id,
            pos,
            candidate:        pos,
            momentum:         Delta::ZERO,
            movement:         config.movement,
            strategy,
            outcome:          GameOutcome::NotPlayed,
            history:          ConflictHistory::new(),
            familiarity:      config.familiarity,
            strategy_inertia: config.strategy_inertia,
            update_interval:  config.update_interval,
            allow_diagonal:   config.allow_diagonal,
            escaped_at:       None,
        }
    }

    /// The agent's play in a contested-cell game this tick.
    #[inline]
    pub fn play(&self) -> PlayStrategy {
        self.strategy
    }

    #[inline]
    pub fn has_escaped(&self) -> bool {
        self.escaped_at.is_some()
    }

    /// `true` if the candidate differs from the current cell.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.candidate != self.pos
    }

    /// Reset per-tick state before the movement phase.
    pub fn begin_tick(&mut self) {
        self.outcome = GameOutcome::NotPlayed;
        self.candidate = self.pos;
    }

    /// Record a won game; the candidate move stands.
    pub fn win(&mut self, participants: u32, cooperators: u32) {
        self.outcome = if participants > 0 { GameOutcome::Won } else { GameOutcome::NotPlayed };
        self.history.push(HistoryEntry { participants, cooperators, outcome: GameOutcome::Won });
    }

    /// Record a lost game and cancel the move.
    pub fn lose(&mut self, participants: u32, cooperators: u32) {
        self.outcome = GameOutcome::Lost;
        self.cancel_move();
        self.history.push(HistoryEntry { participants, cooperators, outcome: GameOutcome::Lost });
    }

    /// Stay on the current cell and drop momentum.  Does not touch the game
    /// record.
    pub fn cancel_move(&mut self) {
        self.candidate = self.pos;
        self.momentum = Delta::ZERO;
    }

    /// Step onto the candidate cell.
    pub fn commit(&mut self) {
        self.pos = self.candidate;
    }
}
