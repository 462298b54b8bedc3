//! `ev-agent` — pedestrian agents and their storage.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent` — position, candidate move, momentum, strategy    |
//! | [`history`]     | `HistoryEntry`, `ConflictHistory`                         |
//! | [`store`]       | `AgentStore` — arena keyed by `AgentId`                   |
//! | [`builder`]     | `AgentStoreBuilder` — spawning from a map + `RunConfig`   |
//!
//! Agents are never removed from the store.  Escaping only takes an agent off
//! the grid (the simulation's occupancy layer); the store keeps it so the
//! escaped roster can still be inspected after the run.

pub mod agent;
pub mod builder;
pub mod history;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use builder::AgentStoreBuilder;
pub use history::{ConflictHistory, HistoryEntry};
pub use store::AgentStore;
