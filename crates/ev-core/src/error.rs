//! Framework error type.
//!
//! Sub-crates define their own error enums; `ev-sim` wraps them all.  This
//! one covers configuration problems that can be detected before a map is
//! even loaded.

use thiserror::Error;

/// The top-level error type for `ev-core`.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("unknown strategy {0:?} (expected one of: random, static, momentum)")]
    UnknownStrategy(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ev-core`.
pub type EvResult<T> = Result<T, EvError>;
