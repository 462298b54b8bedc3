//! Agent identifier.
//!
//! Agents live in a dense arena (`ev_agent::AgentStore`) and the grid only
//! stores ids, so the id doubles as the arena index.  Ids are handed out in
//! spawn order starting at 0 and are never reused within a run.

use std::fmt;

/// Index of an agent in the agent arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
