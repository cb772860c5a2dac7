//! Relative-offset view of a cell's Moore neighborhood.

use crate::cell::Cell;
use crate::Grid;

/// The eight `(dx, dy)` offsets around a cell, row by row.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Reads relative to `(x, y)`. With `wrap` the grid is a torus;
/// without it, reads past an edge return Dead.
#[derive(Debug, Clone, Copy)]
pub struct NeighborApi<'a> {
    pub grid: &'a Grid,
    pub x: i32,
    pub y: i32,
    pub wrap: bool,
}

impl<'a> NeighborApi<'a> {
    #[must_use]
    pub fn new(grid: &'a Grid, x: i32, y: i32, wrap: bool) -> Self {
        Self { grid, x, y, wrap }
    }

    #[must_use]
    pub fn get(&self, dx: i32, dy: i32) -> Cell {
        let (x, y) = (self.x + dx, self.y + dy);
        if self.wrap {
            self.grid.get_wrapped(x, y)
        } else {
            self.grid.get(x, y).unwrap_or(Cell::Dead)
        }
    }

    /// Number of alive cells among the eight neighbors. The center is not counted.
    #[must_use]
    pub fn alive_neighbors(&self) -> u8 {
        MOORE_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| self.get(dx, dy).is_alive())
            .count() as u8
    }
}
