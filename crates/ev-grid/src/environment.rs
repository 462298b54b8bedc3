//! `GridEnvironment` — the parsed map plus its static field.
//!
//! The environment is immutable once loaded.  Agent positions are not stored
//! here; the simulation keeps its own occupancy layer and overlays it for
//! snapshots.

use std::fmt;
use std::path::Path;

use ev_core::Pos;
use ev_core::geo::NEIGHBOUR_OFFSETS;
use tracing::warn;

use crate::field::{self, StaticField};
use crate::{Cell, GridError, GridResult};

/// Default comment leader: everything from it to the end of the line is
/// ignored.
pub const COMMENT_MARKER: &str = "//";

/// A rectangular map of static cells with a precomputed exit field.
#[derive(Clone, Debug)]
pub struct GridEnvironment {
    width:     usize,
    height:    usize,
    /// Row-major static cells.  Never contains `Cell::Occupied`.
    cells:     Vec<Cell>,
    spawns:    Vec<Pos>,
    exits:     Vec<Pos>,
    obstacles: Vec<Pos>,
    field:     StaticField,
}

impl GridEnvironment {
    // ── Loading ───────────────────────────────────────────────────────────

    /// Parse map text using the default `//` comment marker.
    pub fn load(text: &str) -> GridResult<Self> {
        Self::load_with_comment(text, COMMENT_MARKER)
    }

    /// Read and parse a map file.
    pub fn from_path(path: &Path) -> GridResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::load(&text)
    }

    /// Parse map text, truncating every line at `marker`.
    ///
    /// # Errors
    ///
    /// [`GridError::MalformedMap`] if no non-blank, non-comment line remains.
    /// Characters other than `S`, `E`, `#`, or space load as [`Cell::Wall`];
    /// the first occurrence of each is logged as a warning.
    pub fn load_with_comment(text: &str, marker: &str) -> GridResult<Self> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| match line.find(marker) {
                Some(cut) if !marker.is_empty() => &line[..cut],
                _ => line,
            })
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.chars().collect())
            .collect();

        if rows.is_empty() {
            return Err(GridError::MalformedMap(
                "map is empty or contains only comments".into(),
            ));
        }

        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = vec![Cell::Empty; width * height];
        let mut spawns = Vec::new();
        let mut exits = Vec::new();
        let mut obstacles = Vec::new();
        let mut unknown: Vec<char> = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, &symbol) in row.iter().enumerate() {
                let pos = Pos::new(x as i32, y as i32);
                let cell = Cell::from_symbol(symbol);
                match cell {
                    Cell::Spawn    => spawns.push(pos),
                    Cell::Exit     => exits.push(pos),
                    Cell::Obstacle => obstacles.push(pos),
                    Cell::Wall(_)  => {
                        obstacles.push(pos);
                        if !unknown.contains(&symbol) {
                            unknown.push(symbol);
                            warn!("{}; treating it as a wall", GridError::UnknownSymbol { symbol, pos });
                        }
                    }
                    _ => {}
                }
                cells[y * width + x] = cell;
            }
        }

        let field = StaticField::compute(width, height, &cells, &exits);

        Ok(Self { width, height, cells, spawns, exits, obstacles, field })
    }

    // ── Shape and indexing ────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a loaded map; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Row-major index of `pos`, or `None` if out of bounds.
    #[inline]
    pub fn index_of(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// Coordinate of a row-major index.
    #[inline]
    pub fn pos_of(&self, index: usize) -> Pos {
        Pos::new((index % self.width) as i32, (index / self.width) as i32)
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    /// Static cell at `pos`.  Out-of-bounds reads as an obstacle border.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        self.index_of(pos).map_or(Cell::Obstacle, |i| self.cells[i])
    }

    /// Row-major slice of all static cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell(pos).is_walkable()
    }

    #[inline]
    pub fn is_exit(&self, pos: Pos) -> bool {
        self.cell(pos).is_exit()
    }

    /// Field value at `pos`.  Out-of-bounds cells read as
    /// [`StaticField::UNREACHABLE`]; check [`is_walkable`](Self::is_walkable)
    /// first if that distinction matters.
    #[inline]
    pub fn static_field_at(&self, pos: Pos) -> f64 {
        if self.in_bounds(pos) { self.field.at(pos) } else { StaticField::UNREACHABLE }
    }

    pub fn field(&self) -> &StaticField {
        &self.field
    }

    /// Taxicab-nearest exit to `pos`; the first exit in scan order wins ties.
    /// Ignores obstacles.  `None` only if the map has no exits.
    pub fn find_closest_exit(&self, pos: Pos) -> Option<Pos> {
        field::closest_exit(&self.exits, pos)
    }

    /// Field value at `pos` for an agent that may or may not step
    /// diagonally.  Without diagonal steps, cells linked to every exit only
    /// through a diagonal gap read as [`StaticField::UNREACHABLE`].
    #[inline]
    pub fn static_field_for(&self, pos: Pos, allow_diagonal: bool) -> f64 {
        if self.in_bounds(pos) { self.field.value_for(pos, allow_diagonal) } else { StaticField::UNREACHABLE }
    }

    /// `Err(UnreachableExit)` if `pos` is walkable but sealed off from every
    /// exit under the given connectivity; `Err(OutOfBounds)` outside the map.
    pub fn exit_reachable(&self, pos: Pos, allow_diagonal: bool) -> GridResult<()> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        if self.is_walkable(pos) && self.field.value_for(pos, allow_diagonal) == StaticField::UNREACHABLE {
            return Err(GridError::UnreachableExit(pos));
        }
        Ok(())
    }

    /// Walkable neighbours of `pos` in probe order (orthogonal first).
    /// With `allow_diagonal == false` only the four orthogonal cells are
    /// considered.
    pub fn open_neighbours(&self, pos: Pos, allow_diagonal: bool) -> Vec<Pos> {
        let offsets = if allow_diagonal { &NEIGHBOUR_OFFSETS[..] } else { &NEIGHBOUR_OFFSETS[..4] };
        offsets
            .iter()
            .map(|&d| pos.step(d))
            .filter(|&p| self.is_walkable(p))
            .collect()
    }

    // ── Registries ────────────────────────────────────────────────────────

    /// Spawn cells in scan order.
    pub fn spawns(&self) -> &[Pos] {
        &self.spawns
    }

    /// Exit cells in scan order.
    pub fn exits(&self) -> &[Pos] {
        &self.exits
    }

    /// Obstacle and wall cells in scan order.
    pub fn obstacles(&self) -> &[Pos] {
        &self.obstacles
    }
}

impl fmt::Display for GridEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
