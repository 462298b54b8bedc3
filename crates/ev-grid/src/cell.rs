//! Grid cell kinds.

use ev_core::AgentId;

/// One grid cell.
///
/// A loaded [`GridEnvironment`][crate::GridEnvironment] only ever contains
/// the static kinds.  `Occupied` appears in per-tick snapshots, where the
/// simulation overlays agent positions on the static map.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Spawn,
    Exit,
    Obstacle,
    /// Any other map glyph.  Blocks movement like an obstacle and keeps its
    /// symbol for rendering.
    Wall(char),
    Occupied(AgentId),
}

impl Cell {
    /// Parse a map symbol.  Unlisted symbols become [`Cell::Wall`].
    pub fn from_symbol(symbol: char) -> Cell {
        match symbol {
            ' ' => Cell::Empty,
            'S' => Cell::Spawn,
            'E' => Cell::Exit,
            '#' => Cell::Obstacle,
            _   => Cell::Wall(symbol),
        }
    }

    /// Map symbol for rendering.  Occupied cells render as `@`.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty       => ' ',
            Cell::Spawn       => 'S',
            Cell::Exit        => 'E',
            Cell::Obstacle    => '#',
            Cell::Wall(c)     => c,
            Cell::Occupied(_) => '@',
        }
    }

    /// `true` for floor, spawn, and exit cells.
    #[inline]
    pub fn is_walkable(self) -> bool {
        matches!(self, Cell::Empty | Cell::Spawn | Cell::Exit)
    }

    #[inline]
    pub fn is_exit(self) -> bool {
        matches!(self, Cell::Exit)
    }

    /// The occupying agent, if any.
    #[inline]
    pub fn occupant(self) -> Option<AgentId> {
        match self {
            Cell::Occupied(id) => Some(id),
            _ => None,
        }
    }
}
