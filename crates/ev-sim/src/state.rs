//! Per-tick occupancy and the snapshots handed to observers.

use std::fmt;

use ev_agent::AgentStore;
use ev_core::{AgentId, Pos, Tick};
use ev_grid::{Cell, GridEnvironment};

// ── SimulationState ───────────────────────────────────────────────────────────

/// Everything that changes from tick to tick apart from the agents
/// themselves.
///
/// The grid is an index→id map over the static environment.  Each commit
/// builds a fresh map and swaps it in, so the previous tick's layer stays
/// intact while candidate moves are computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationState {
    /// Last committed tick.  `Tick::ZERO` right after spawning.
    pub tick:    Tick,
    /// Row-major occupant of each cell.
    occupancy:   Vec<Option<AgentId>>,
    /// Escaped agents in escape order.
    pub escaped: Vec<AgentId>,
}

impl SimulationState {
    /// Initial state with every active agent placed on its cell.
    pub(crate) fn spawned(env: &GridEnvironment, agents: &AgentStore) -> Self {
        let mut occupancy = vec![None; env.len()];
        for agent in agents.active() {
            if let Some(i) = env.index_of(agent.pos) {
                occupancy[i] = Some(agent.id);
            }
        }
        Self { tick: Tick::ZERO, occupancy, escaped: Vec::new() }
    }

    /// Replace the occupancy layer with one built during commit.
    pub(crate) fn replace_occupancy(&mut self, next: Vec<Option<AgentId>>) {
        debug_assert_eq!(next.len(), self.occupancy.len());
        self.occupancy = next;
    }

    #[inline]
    pub fn occupant(&self, index: usize) -> Option<AgentId> {
        self.occupancy.get(index).copied().flatten()
    }

    pub fn occupancy(&self) -> &[Option<AgentId>] {
        &self.occupancy
    }

    /// On-grid agent ids in row-major order of their cell.
    pub fn scan_order(&self) -> Vec<AgentId> {
        self.occupancy.iter().filter_map(|o| *o).collect()
    }

    /// Number of agents still on the grid.
    pub fn on_grid(&self) -> usize {
        self.occupancy.iter().filter(|o| o.is_some()).count()
    }

    /// Overlay occupancy on the static map and copy everything out by value.
    pub fn snapshot(&self, env: &GridEnvironment, agents: &AgentStore) -> StepSnapshot {
        let cells = env
            .cells()
            .iter()
            .zip(&self.occupancy)
            .map(|(&cell, occupant)| match occupant {
                Some(id) => Cell::Occupied(*id),
                None     => cell,
            })
            .collect();
        let (cooperators, defectors) = agents.strategy_counts();
        StepSnapshot {
            tick: self.tick,
            width: env.width(),
            height: env.height(),
            cells,
            escaped: self.escaped.clone(),
            cooperators,
            defectors,
        }
    }
}

// ── StepSnapshot ──────────────────────────────────────────────────────────────

/// The grid and roster after one tick, owned by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepSnapshot {
    pub tick:        Tick,
    pub width:       usize,
    pub height:      usize,
    /// Row-major cells with agents overlaid as `Cell::Occupied`.
    pub cells:       Vec<Cell>,
    /// Escaped agents in escape order.
    pub escaped:     Vec<AgentId>,
    /// Play counts among agents still on the grid.
    pub cooperators: usize,
    pub defectors:   usize,
}

impl StepSnapshot {
    /// Cell at `pos`, or `None` out of bounds.
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        self.cells.get(pos.y as usize * self.width + pos.x as usize).copied()
    }

    /// Position of `id`, if it is on the grid.
    pub fn position_of(&self, id: AgentId) -> Option<Pos> {
        let i = self.cells.iter().position(|c| c.occupant() == Some(id))?;
        Some(Pos::new((i % self.width) as i32, (i / self.width) as i32))
    }

    pub fn on_grid(&self) -> usize {
        self.cells.iter().filter(|c| c.occupant().is_some()).count()
    }
}

impl fmt::Display for StepSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
