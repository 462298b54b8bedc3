//! `ev-sim` — the evacuation tick loop.
//!
//! # Tick phases
//!
//! ```text
//! for each tick until no agent is left on the grid:
//!   ① Candidates — every on-grid agent, row-major by its pre-tick cell,
//!                  samples a candidate move among the neighbours that are
//!                  walkable and unoccupied on the pre-tick grid.
//!   ② Conflicts  — movers are grouped by target cell; every group of ≥ 2
//!                  plays the contested-cell game, target cells row-major.
//!   ③ Commit     — moves are written into a fresh occupancy layer; agents
//!                  landing on an exit join the escaped roster.
//!   ④ Adapt      — every agent still on the grid runs its strategy update.
//!   ⑤ Snapshot   — a by-value StepSnapshot goes to the observer.
//! ```
//!
//! A single [`SimRng`][ev_core::SimRng] seeded from `RunConfig::seed` drives
//! every random draw, so a fixed seed reproduces the snapshot sequence
//! exactly.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_core::RunConfig;
//! use ev_grid::GridEnvironment;
//! use ev_sim::{NoopObserver, SimBuilder};
//!
//! let env = GridEnvironment::load(MAP)?;
//! let mut sim = SimBuilder::new(RunConfig::default(), env).build()?;
//! let outcome = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{Fanout, NoopObserver, SimObserver};
pub use sim::{Sim, SimOutcome};
pub use state::{SimulationState, StepSnapshot};
