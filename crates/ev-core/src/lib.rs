//! `ev-core` — foundational types for the `rust_evac` evacuation model.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                                 |
//! | [`geo`]         | `Pos`, `Delta`, neighbour offsets                         |
//! | [`time`]        | `Tick`                                                    |
//! | [`strategy`]    | `MovementStrategy`, `PlayStrategy`, `GameOutcome`         |
//! | [`rng`]         | `SimRng` — the single seeded source for a run             |
//! | [`config`]      | `RunConfig`                                               |
//! | [`error`]       | `EvError`, `EvResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod strategy;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RunConfig;
pub use error::{EvError, EvResult};
pub use geo::{Delta, Pos};
pub use ids::AgentId;
pub use rng::{SimRng, mix_seed};
pub use strategy::{GameOutcome, MovementStrategy, PlayStrategy};
pub use time::Tick;
