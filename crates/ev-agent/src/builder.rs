//! Fluent builder that spawns a population onto a map.
//!
//! # Usage
//!
//! ```rust,ignore
//! let env = GridEnvironment::load(MAP)?;
//! let mut rng = SimRng::new(config.seed);
//! let store = AgentStoreBuilder::new(&config).build(&env, &mut rng)?;
//! ```
//!
//! By default `floor(spawns × spawn_fraction)` distinct spawn cells are drawn
//! uniformly, and each agent cooperates with probability
//! `cooperate_fraction`.  Tests and scripted scenarios can pin either choice
//! with [`positions`](AgentStoreBuilder::positions) and
//! [`strategies`](AgentStoreBuilder::strategies).

use ev_core::{EvError, EvResult, PlayStrategy, Pos, RunConfig, SimRng};
use ev_grid::GridEnvironment;
use tracing::warn;

use crate::AgentStore;

/// Fluent builder for [`AgentStore`].
pub struct AgentStoreBuilder<'a> {
    config:     &'a RunConfig,
    positions:  Option<Vec<Pos>>,
    strategies: Option<Vec<PlayStrategy>>,
}

impl<'a> AgentStoreBuilder<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config, positions: None, strategies: None }
    }

    /// Place agents on exactly these cells instead of sampling spawns.
    /// Cells must be walkable and distinct.
    pub fn positions(mut self, positions: Vec<Pos>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Fix each agent's initial play instead of drawing it.  Must match the
    /// number of placed agents.
    pub fn strategies(mut self, strategies: Vec<PlayStrategy>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Spawn the population.
    ///
    /// # Errors
    ///
    /// `EvError::Config` if explicit positions are not distinct walkable
    /// non-exit cells, or if explicit strategies have the wrong length.
    pub fn build(self, env: &GridEnvironment, rng: &mut SimRng) -> EvResult<AgentStore> {
        let positions = match self.positions {
            Some(p) => {
                validate_positions(env, &p)?;
                p
            }
            None => {
                let count = (env.spawns().len() as f64 * self.config.spawn_fraction).floor() as usize;
                rng.choose_multiple(env.spawns(), count)
            }
        };

        let strategies = match self.strategies {
            Some(s) => {
                if s.len() != positions.len() {
                    return Err(EvError::Config(format!(
                        "{} strategies supplied for {} agents",
                        s.len(),
                        positions.len()
                    )));
                }
                s
            }
            None => positions
                .iter()
                .map(|_| {
                    if rng.gen_bool(self.config.cooperate_fraction) {
                        PlayStrategy::Cooperate
                    } else {
                        PlayStrategy::Defect
                    }
                })
                .collect(),
        };

        let mut store = AgentStore::new();
        for (pos, strategy) in positions.into_iter().zip(strategies) {
            let id = store.insert(pos, strategy, self.config);
            if let Err(e) = env.exit_reachable(pos, self.config.allow_diagonal) {
                warn!(agent = %id, "{e}; agent may never leave");
            }
        }
        Ok(store)
    }
}

fn validate_positions(env: &GridEnvironment, positions: &[Pos]) -> EvResult<()> {
    let mut taken = vec![false; env.len()];
    for &pos in positions {
        let Some(i) = env.index_of(pos) else {
            return Err(EvError::Config(format!("agent position {pos} is outside the map")));
        };
        if !env.is_walkable(pos) || env.is_exit(pos) {
            return Err(EvError::Config(format!("agent position {pos} is not open floor")));
        }
        if std::mem::replace(&mut taken[i], true) {
            return Err(EvError::Config(format!("two agents placed on {pos}")));
        }
    }
    Ok(())
}
