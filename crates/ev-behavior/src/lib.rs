//! `ev-behavior` — everything an agent decides during a tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`movement`] | `MovementModel` trait, `RandomWalk`, `FieldWalk`, `MomentumWalk` |
//! | [`conflict`] | `resolve_conflict` — n-player contested-cell game              |
//! | [`adapt`]    | Payoff table and logistic cooperate/defect switching           |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Where each piece runs in a tick
//!
//! ```text
//! movement  → every agent on the grid, against the pre-tick grid
//! conflict  → every cell targeted by ≥ 2 agents, row-major
//! adapt     → every agent still on the grid after commit
//! ```
//!
//! All randomness comes from the caller's `&mut SimRng`.

pub mod adapt;
pub mod conflict;
pub mod error;
pub mod movement;


pub use adapt::{StrategyUpdate, update_strategy};
pub use conflict::{Resolution, resolve_conflict};
pub use error::{BehaviorError, BehaviorResult};
pub use movement::{FieldWalk, MomentumWalk, MovementModel, RandomWalk, compute_candidate_move};
