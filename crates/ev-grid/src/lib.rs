//! `ev-grid` — the static evacuation environment.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`cell`]        | `Cell` — tagged cell kind, map symbols                     |
//! | [`environment`] | `GridEnvironment` — parsing, walkability, neighbour lookup |
//! | [`field`]       | `StaticField` — per-cell desirability toward the exits     |
//! | [`error`]       | `GridError`, `GridResult<T>`                               |
//!
//! # Map format
//!
//! ```text
//! // anything after the comment marker is ignored
//! #######
//! #S   E#
//! #######
//! ```
//!
//! `S` = spawn, `E` = exit, `#` = obstacle, space = floor.  Short lines are
//! padded on the right with floor; blank and comment-only lines are skipped.

pub mod cell;
pub mod environment;
pub mod error;
pub mod field;

#[cfg(test)]
mod tests;

pub use cell::Cell;
pub use environment::{COMMENT_MARKER, GridEnvironment};
pub use error::{GridError, GridResult};
pub use field::StaticField;
