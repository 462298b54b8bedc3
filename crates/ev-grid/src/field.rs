//! The static floor field.
//!
//! Each cell gets a scalar "desirability" computed once at load:
//!
//! | Cell                               | Value                                  |
//! |------------------------------------|----------------------------------------|
//! | Exit                               | `f64::MAX` (forces exit when adjacent) |
//! | Obstacle                           | `-inf`                                 |
//! | Walkable, some exit reachable      | `1 / euclid(cell, nearest exit)`       |
//! | Walkable, no exit reachable        | `-inf`                                 |
//!
//! "Nearest" is by taxicab distance over all exits in scan order, first
//! minimum wins.  Reachability is a flood fill over walkable cells in the
//! 8-neighbourhood starting from every exit, so a cell sealed off by
//! obstacles never attracts anyone even if an exit is geometrically close.
//!
//! A second flood over the 4-neighbourhood records which cells can reach an
//! exit without diagonal steps.  Orthogonal-only agents read the field
//! through [`StaticField::value_for`], which masks the cells that only a
//! diagonal gap connects to an exit.

use std::collections::VecDeque;

use ev_core::{Delta, Pos};
use ev_core::geo::NEIGHBOUR_OFFSETS;

use crate::Cell;

/// Per-cell desirability, row-major, same shape as the map.
#[derive(Clone, Debug)]
pub struct StaticField {
    width:      usize,
    values:     Vec<f64>,
    /// Exit reachable using orthogonal steps only.
    orthogonal: Vec<bool>,
}

impl StaticField {
    /// Value stored at exit cells.
    pub const EXIT: f64 = f64::MAX;

    /// Value stored at obstacles and at cells with no reachable exit.
    pub const UNREACHABLE: f64 = f64::NEG_INFINITY;

    /// Build the field for a row-major cell array.  `exits` must be in scan
    /// order.
    pub(crate) fn compute(width: usize, height: usize, cells: &[Cell], exits: &[Pos]) -> Self {
        let reachable = flood_from_exits(width, height, cells, exits, &NEIGHBOUR_OFFSETS);
        let orthogonal = flood_from_exits(width, height, cells, exits, &NEIGHBOUR_OFFSETS[..4]);
        let values = cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| {
                let pos = Pos::new((i % width) as i32, (i / width) as i32);
                match cell {
                    Cell::Exit => Self::EXIT,
                    Cell::Obstacle | Cell::Wall(_) => Self::UNREACHABLE,
                    _ if !reachable[i] => Self::UNREACHABLE,
                    _ => match closest_exit(exits, pos) {
                        Some(exit) => 1.0 / pos.euclidean(exit),
                        None => Self::UNREACHABLE,
                    },
                }
            })
            .collect();
        Self { width, values, orthogonal }
    }

    /// Value at `pos`.  Callers must bounds-check first.
    #[inline]
    pub(crate) fn at(&self, pos: Pos) -> f64 {
        self.values[self.index(pos)]
    }

    /// Value at `pos` as seen by an agent with the given connectivity.
    /// Callers must bounds-check first.
    #[inline]
    pub(crate) fn value_for(&self, pos: Pos, allow_diagonal: bool) -> f64 {
        let i = self.index(pos);
        if allow_diagonal || self.orthogonal[i] { self.values[i] } else { Self::UNREACHABLE }
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// Row-major slice of all values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `true` for the exit sentinel.
    #[inline]
    pub fn is_exit_value(value: f64) -> bool {
        value >= Self::EXIT
    }
}

/// Taxicab-nearest exit; the first minimum in `exits` order wins ties.
pub(crate) fn closest_exit(exits: &[Pos], pos: Pos) -> Option<Pos> {
    let mut best: Option<(u32, Pos)> = None;
    for &exit in exits {
        let d = pos.taxicab(exit);
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, exit));
        }
    }
    best.map(|(_, exit)| exit)
}

/// Multi-source BFS from every exit through walkable cells, stepping by
/// `offsets`.
fn flood_from_exits(
    width: usize,
    height: usize,
    cells: &[Cell],
    exits: &[Pos],
    offsets: &[Delta],
) -> Vec<bool> {
    let mut seen = vec![false; cells.len()];
    let mut queue: VecDeque<Pos> = VecDeque::with_capacity(exits.len());
    for &exit in exits {
        seen[exit.y as usize * width + exit.x as usize] = true;
        queue.push_back(exit);
    }

    while let Some(pos) = queue.pop_front() {
        for &d in offsets {
            let next = pos.step(d);
            if next.x < 0 || next.y < 0 || next.x as usize >= width || next.y as usize >= height {
                continue;
            }
            let i = next.y as usize * width + next.x as usize;
            if !seen[i] && cells[i].is_walkable() {
                seen[i] = true;
                queue.push_back(next);
            }
        }
    }
    seen
}
