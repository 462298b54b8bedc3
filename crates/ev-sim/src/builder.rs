//! Fluent builder for constructing a [`Sim`].

use std::path::Path;

use ev_agent::AgentStoreBuilder;
use ev_core::{PlayStrategy, Pos, RunConfig, SimRng};
use ev_grid::GridEnvironment;
use tracing::info;

use crate::{Sim, SimResult, SimulationState};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`RunConfig`] — strategies, fractions, seed, …
/// - [`GridEnvironment`] — the loaded map
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                          |
/// |--------------------|--------------------------------------------------|
/// | `.positions(v)`    | `floor(spawns × spawn_fraction)` random spawns   |
/// | `.strategies(v)`   | Cooperate with probability `cooperate_fraction`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::from_map_file(config, Path::new("maps/env1.txt"))?
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     RunConfig,
    env:        GridEnvironment,
    positions:  Option<Vec<Pos>>,
    strategies: Option<Vec<PlayStrategy>>,
}

impl SimBuilder {
    pub fn new(config: RunConfig, env: GridEnvironment) -> Self {
        Self { config, env, positions: None, strategies: None }
    }

    /// Load the map from `path` and start a builder.
    pub fn from_map_file(config: RunConfig, path: &Path) -> SimResult<Self> {
        let env = GridEnvironment::from_path(path)?;
        Ok(Self::new(config, env))
    }

    /// Place agents on exactly these cells.
    pub fn positions(mut self, positions: Vec<Pos>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Fix each agent's initial play.
    pub fn strategies(mut self, strategies: Vec<PlayStrategy>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Validate the config, seed the RNG, spawn the population, and return a
    /// ready-to-run [`Sim`] at tick 0.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let mut rng = SimRng::new(self.config.seed);

        let mut spawner = AgentStoreBuilder::new(&self.config);
        if let Some(p) = self.positions {
            spawner = spawner.positions(p);
        }
        if let Some(s) = self.strategies {
            spawner = spawner.strategies(s);
        }
        let agents = spawner.build(&self.env, &mut rng)?;

        let state = SimulationState::spawned(&self.env, &agents);
        info!(
            environment = %self.config.environment,
            movement = %self.config.movement,
            agents = agents.len(),
            width = self.env.width(),
            height = self.env.height(),
            exits = self.env.exits().len(),
            seed = self.config.seed,
            "simulation built"
        );

        Ok(Sim {
            config: self.config,
            env: self.env,
            agents,
            state,
            rng,
            idle_ticks: 0,
        })
    }
}
