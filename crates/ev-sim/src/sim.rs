//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;

use ev_agent::AgentStore;
use ev_behavior::{compute_candidate_move, resolve_conflict, update_strategy};
use ev_core::{AgentId, RunConfig, SimRng, Tick};
use ev_grid::GridEnvironment;
use tracing::{debug, info, warn};

use crate::{SimObserver, SimResult, SimulationState, StepSnapshot};

/// Consecutive ticks without a single committed move before the run is
/// reported as stalled.
pub const STALL_WARN_TICKS: u64 = 1_000;

/// How a run ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SimOutcome {
    /// Last committed tick.
    pub ticks:     u64,
    pub escaped:   usize,
    /// Agents still on the grid when the run stopped.
    pub stranded:  usize,
    /// `false` if `max_ticks` cut the run short.
    pub completed: bool,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The evacuation runner.
///
/// Owns the map, the agent arena, the occupancy state, and the run's single
/// random source.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config:            RunConfig,
    pub env:               GridEnvironment,
    pub agents:            AgentStore,
    pub state:             SimulationState,
    pub(crate) rng:        SimRng,
    /// Consecutive ticks in which nobody moved.
    pub(crate) idle_ticks: u64,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the grid is empty or `config.max_ticks` is reached.
    ///
    /// The observer sees the current snapshot first (tick 0 for a fresh
    /// sim), then one snapshot per tick, then `on_sim_end`.
    pub fn run<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<SimOutcome> {
        info!(
            environment = %self.config.environment,
            agents = self.state.on_grid(),
            "run started"
        );
        observer.on_step(&self.snapshot());

        let mut completed = true;
        while self.state.on_grid() > 0 {
            if let Some(max) = self.config.max_ticks {
                if self.state.tick.0 >= max {
                    warn!(
                        max_ticks = max,
                        stranded = self.state.on_grid(),
                        "tick limit reached before the grid emptied"
                    );
                    completed = false;
                    break;
                }
            }
            let snap = self.step()?;
            observer.on_step(&snap);
        }

        observer.on_sim_end(self.state.tick);
        let outcome = self.outcome(completed);
        info!(
            ticks = outcome.ticks,
            escaped = outcome.escaped,
            stranded = outcome.stranded,
            completed = outcome.completed,
            "run finished"
        );
        Ok(outcome)
    }

    /// Run at most `n` ticks, stopping early if the grid empties.  Each tick's
    /// snapshot goes to `observer`; `on_sim_end` is not called.
    pub fn run_ticks<O: SimObserver + ?Sized>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.is_finished() {
                break;
            }
            let snap = self.step()?;
            observer.on_step(&snap);
        }
        Ok(())
    }

    /// `true` once every agent has escaped.
    pub fn is_finished(&self) -> bool {
        self.state.on_grid() == 0
    }

    /// By-value view of the current state.
    pub fn snapshot(&self) -> StepSnapshot {
        self.state.snapshot(&self.env, &self.agents)
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.state.tick
    }

    fn outcome(&self, completed: bool) -> SimOutcome {
        SimOutcome {
            ticks:     self.state.tick.0,
            escaped:   self.state.escaped.len(),
            stranded:  self.state.on_grid(),
            completed,
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Advance one tick and return its snapshot.
    pub fn step(&mut self) -> SimResult<StepSnapshot> {
        let order = self.state.scan_order();

        // ── Phase 1: candidate moves against the pre-tick grid ────────────
        for &id in &order {
            compute_candidate_move(
                &mut self.agents[id],
                &self.env,
                self.state.occupancy(),
                &mut self.rng,
            );
        }

        // ── Phase 2: contested cells, row-major by target ─────────────────
        let mut targets: BTreeMap<usize, Vec<AgentId>> = BTreeMap::new();
        for &id in &order {
            let agent = &self.agents[id];
            if !agent.is_moving() {
                continue;
            }
            if let Some(i) = self.env.index_of(agent.candidate) {
                targets.entry(i).or_default().push(id);
            }
        }
        for contenders in targets.values().filter(|c| c.len() >= 2) {
            resolve_conflict(&mut self.agents, contenders, &mut self.rng)?;
        }

        // ── Phase 3: commit into a fresh occupancy layer ──────────────────
        let tick = self.state.tick.next();
        let mut next = vec![None; self.env.len()];
        let mut moved = 0usize;
        for &id in &order {
            let agent = &mut self.agents[id];
            if agent.is_moving() {
                moved += 1;
            }
            agent.commit();
            if self.env.is_exit(agent.pos) {
                agent.escaped_at = Some(tick);
                self.state.escaped.push(id);
                debug!(agent = %id, %tick, "agent escaped");
            } else if let Some(i) = self.env.index_of(agent.pos) {
                debug_assert!(next[i].is_none(), "two agents committed to {}", agent.pos);
                next[i] = Some(id);
            }
        }
        self.state.replace_occupancy(next);
        self.state.tick = tick;

        // ── Phase 4: strategy updates for agents still on the grid ────────
        for &id in &order {
            let agent = &mut self.agents[id];
            if !agent.has_escaped() {
                update_strategy(agent, &mut self.rng);
            }
        }

        self.track_stall(moved);
        Ok(self.snapshot())
    }

    fn track_stall(&mut self, moved: usize) {
        if moved > 0 || self.state.on_grid() == 0 {
            self.idle_ticks = 0;
            return;
        }
        self.idle_ticks += 1;
        if self.idle_ticks == STALL_WARN_TICKS {
            warn!(
                tick = %self.state.tick,
                stranded = self.state.on_grid(),
                idle_ticks = self.idle_ticks,
                "no agent has moved for a long time; remaining agents may be sealed off from every exit"
            );
        }
    }
}
