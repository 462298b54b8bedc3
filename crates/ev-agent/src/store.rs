//! `AgentStore` — an arena of agents keyed by `AgentId`.
//!
//! The grid never holds agent objects, only ids.  Committing a tick therefore
//! rebuilds a small id map instead of copying agents, and the store itself is
//! mutated in place.

use ev_core::{AgentId, PlayStrategy, Pos, RunConfig};

use crate::Agent;

/// Dense agent arena.  `AgentId(i)` is always `agents[i]`.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent at `pos` and return its id.
    pub fn insert(&mut self, pos: Pos, strategy: PlayStrategy, config: &RunConfig) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(Agent::new(id, pos, strategy, config));
        id
    }

    /// Number of agents ever spawned (escaped ones included).
    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    /// Iterator over all `AgentId`s in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    /// Agents still on the grid.
    pub fn active(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| !a.has_escaped())
    }

    /// `(cooperators, defectors)` among agents still on the grid.
    pub fn strategy_counts(&self) -> (usize, usize) {
        self.active().fold((0, 0), |(c, d), a| {
            if a.strategy.cooperates() { (c + 1, d) } else { (c, d + 1) }
        })
    }
}

impl std::ops::Index<AgentId> for AgentStore {
    type Output = Agent;

    #[inline]
    fn index(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }
}

impl std::ops::IndexMut<AgentId> for AgentStore {
    #[inline]
    fn index_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }
}
