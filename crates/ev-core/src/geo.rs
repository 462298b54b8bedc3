//! Integer grid geometry.
//!
//! Coordinates follow the map text: origin top-left, `x` counts columns and
//! `y` counts rows.  Both are signed so that neighbour arithmetic can step
//! off the edge of the map; the environment treats anything out of bounds
//! as an implicit obstacle border.

use std::fmt;

/// Neighbour offsets in probe order: the four orthogonal steps first, then
/// the four diagonals.  Move sampling iterates neighbours in this order, so
/// changing it changes every seeded run.
pub const NEIGHBOUR_OFFSETS: [Delta; 8] = [
    Delta { dx:  1, dy:  0 },
    Delta { dx: -1, dy:  0 },
    Delta { dx:  0, dy:  1 },
    Delta { dx:  0, dy: -1 },
    Delta { dx:  1, dy:  1 },
    Delta { dx:  1, dy: -1 },
    Delta { dx: -1, dy: -1 },
    Delta { dx: -1, dy:  1 },
];

/// A cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell reached by stepping `d` from `self`.
    #[inline]
    pub fn step(self, d: Delta) -> Pos {
        Pos { x: self.x + d.dx, y: self.y + d.dy }
    }

    /// Displacement from `self` to `other`.
    #[inline]
    pub fn delta_to(self, other: Pos) -> Delta {
        Delta { dx: other.x - self.x, dy: other.y - self.y }
    }

    /// Taxicab (L1) distance: the number of orthogonal steps.
    #[inline]
    pub fn taxicab(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Straight-line (L2) distance.
    #[inline]
    pub fn euclidean(self, other: Pos) -> f64 {
        self.delta_to(other).length()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An integer displacement; also used as an agent's momentum.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const ZERO: Delta = Delta { dx: 0, dy: 0 };

    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        f64::from(self.dx).hypot(f64::from(self.dy))
    }

    /// Euclidean distance between two displacement vectors.
    #[inline]
    pub fn distance(self, other: Delta) -> f64 {
        Delta { dx: other.dx - self.dx, dy: other.dy - self.dy }.length()
    }
}
