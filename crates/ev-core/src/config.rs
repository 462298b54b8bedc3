//! Run configuration.
//!
//! One `RunConfig` describes one simulation run.  The command-line layer and
//! the sweep runner build these; the core only reads them.

use crate::{EvError, EvResult, MovementStrategy};

/// Parameters for a single evacuation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Movement model used by every spawned agent.
    pub movement: MovementStrategy,

    /// Display name of the map (used in exports and output paths).
    pub environment: String,

    /// Fraction of spawn cells that receive an agent, in `[0, 1]`.
    pub spawn_fraction: f64,

    /// Probability that a spawned agent starts as a cooperator, in `[0, 1]`.
    pub cooperate_fraction: f64,

    /// Multiplier on the current strategy's payoff when deciding whether to
    /// switch.  Values above 1 make agents stickier.
    pub strategy_inertia: f64,

    /// History entries (ticks) between strategy re-evaluations.  Must be ≥ 1.
    pub update_interval: u32,

    /// Initial field-weighting exponent.
    pub familiarity: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Whether agents may step diagonally (8-neighbourhood) or only
    /// orthogonally (4-neighbourhood).
    pub allow_diagonal: bool,

    /// Stop after this many ticks even if agents remain.  `None` runs until
    /// the grid is empty.
    pub max_ticks: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            movement:           MovementStrategy::StaticFieldWithMomentum,
            environment:        String::from("env1"),
            spawn_fraction:     0.75,
            cooperate_fraction: 0.5,
            strategy_inertia:   2.0,
            update_interval:    5,
            familiarity:        1,
            seed:               42,
            allow_diagonal:     true,
            max_ticks:          None,
        }
    }
}

impl RunConfig {
    /// Reject parameter values the model is not defined for.
    pub fn validate(&self) -> EvResult<()> {
        if !(0.0..=1.0).contains(&self.spawn_fraction) {
            return Err(EvError::Config(format!(
                "spawn_fraction must be in [0, 1], got {}",
                self.spawn_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.cooperate_fraction) {
            return Err(EvError::Config(format!(
                "cooperate_fraction must be in [0, 1], got {}",
                self.cooperate_fraction
            )));
        }
        if !self.strategy_inertia.is_finite() || self.strategy_inertia < 0.0 {
            return Err(EvError::Config(format!(
                "strategy_inertia must be a finite value >= 0, got {}",
                self.strategy_inertia
            )));
        }
        if self.update_interval == 0 {
            return Err(EvError::Config("update_interval must be at least 1".into()));
        }
        Ok(())
    }
}
