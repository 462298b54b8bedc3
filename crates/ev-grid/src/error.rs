//! Grid-subsystem error type.

use thiserror::Error;

use ev_core::Pos;

/// Errors produced by `ev-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    /// The map text has no content once comments and blank lines are removed.
    #[error("malformed map: {0}")]
    MalformedMap(String),

    /// Non-fatal: the glyph loads as a wall.
    #[error("unknown map symbol {symbol:?} at {pos}")]
    UnknownSymbol { symbol: char, pos: Pos },

    /// Non-fatal: the cell is walkable but no exit can be reached from it.
    #[error("no exit reachable from {0}")]
    UnreachableExit(Pos),

    #[error("{0} is outside the map")]
    OutOfBounds(Pos),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
