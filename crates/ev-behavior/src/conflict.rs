//! The contested-cell game.
//!
//! When two or more agents pick the same candidate cell, each plays its
//! current [`PlayStrategy`] once, with no memory of opponents:
//!
//! | Defectors `d` | Winner                                                     |
//! |---------------|------------------------------------------------------------|
//! | 0             | a uniformly random cooperator                              |
//! | 1             | the lone defector                                          |
//! | ≥ 2           | a uniformly random defector, but only with probability 1/d |
//!
//! The winner keeps its move.  Everyone else loses: candidate reset to the
//! current cell, momentum zeroed.  Every participant records
//! `(participants, cooperators, Won | Lost)` in its history.

use ev_agent::AgentStore;
use ev_core::{AgentId, PlayStrategy, Pos, SimRng};
use tracing::debug;

use crate::{BehaviorError, BehaviorResult};

/// Outcome of one contested-cell game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The contested cell.
    pub cell:        Pos,
    pub winner:      Option<AgentId>,
    pub cooperators: Vec<AgentId>,
    pub defectors:   Vec<AgentId>,
}

impl Resolution {
    #[inline]
    pub fn participants(&self) -> usize {
        self.cooperators.len() + self.defectors.len()
    }
}

/// Play the game among `contenders` and apply win/loss to each agent.
///
/// Contenders are expected to share one candidate cell; the cell recorded in
/// the [`Resolution`] is the first contender's candidate.
///
/// # Errors
///
/// - [`BehaviorError::InvalidConflict`] for fewer than two contenders.
/// - [`BehaviorError::UnknownAgent`] if an id is not in `agents`.
pub fn resolve_conflict(
    agents:     &mut AgentStore,
    contenders: &[AgentId],
    rng:        &mut SimRng,
) -> BehaviorResult<Resolution> {
    if contenders.len() < 2 {
        return Err(BehaviorError::InvalidConflict { participants: contenders.len() });
    }

    let mut cooperators = Vec::new();
    let mut defectors = Vec::new();
    for &id in contenders {
        let agent = agents.get(id).ok_or(BehaviorError::UnknownAgent(id))?;
        match agent.play() {
            PlayStrategy::Cooperate => cooperators.push(id),
            PlayStrategy::Defect    => defectors.push(id),
        }
    }
    let cell = agents[contenders[0]].candidate;

    let winner = match defectors.len() {
        0 => rng.choose(&cooperators).copied(),
        1 => Some(defectors[0]),
        d => {
            let nominee = rng.choose(&defectors).copied();
            if rng.gen_bool(1.0 / d as f64) { nominee } else { None }
        }
    };

    let participants = contenders.len() as u32;
    let cooperating = cooperators.len() as u32;
    for &id in contenders {
        let agent = &mut agents[id];
        if Some(id) == winner {
            agent.win(participants, cooperating);
        } else {
            agent.lose(participants, cooperating);
        }
    }

    debug!(
        %cell,
        cooperators = cooperators.len(),
        defectors = defectors.len(),
        winner = ?winner,
        "resolved contested cell"
    );

    Ok(Resolution { cell, winner, cooperators, defectors })
}
