//! Wrap-around grid geometry
//!
//! The grid is a torus: stepping off one edge re-enters on the opposite edge.
//! There are no walls, so wrapping is the only bounds handling.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::wrap;

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by an offset (not wrapped)
    #[inline]
    pub fn add(self, offset: IVec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }

    /// Displacement from `other` to `self` (not wrapped)
    #[inline]
    pub fn subtract(self, other: Position) -> IVec2 {
        IVec2::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Toroidal lattice of `width × height` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpace {
    pub width: i32,
    pub height: i32,
}

impl GridSpace {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reduce both coordinates into the grid
    #[inline]
    pub fn wrap_position(&self, pos: Position) -> Position {
        Position::new(wrap(pos.x, self.width), wrap(pos.y, self.height))
    }

    /// Move by an offset and wrap
    #[inline]
    pub fn step(&self, pos: Position, offset: IVec2) -> Position {
        self.wrap_position(pos.add(offset))
    }

    /// Whether a position already lies inside the grid
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Shortest displacement from `from` to `to`, taking the seam into account.
    ///
    /// Each axis lands in `(-size/2, size/2]`, so neighbours on opposite
    /// edges are one step apart rather than `size - 1`.
    pub fn delta(&self, from: Position, to: Position) -> IVec2 {
        let d = to.subtract(from);
        IVec2::new(shortest(d.x, self.width), shortest(d.y, self.height))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Center cell
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

fn shortest(d: i32, size: i32) -> i32 {
    let d = wrap(d, size);
    if d > size / 2 { d - size } else { d }
}
