//! Cell lattice geometry
//!
//! The board is a lattice of square cells. Every authoritative position in the
//! simulation is a [`Cell`]; pixels only exist at the edge where a renderer
//! asks for them.

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::consts::{HEIGHT, SIDE, WIDTH};

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// One grid step in `direction` (may leave the board)
    #[inline]
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self::new(self.col + dc, self.row + dr)
    }

    /// Squared Euclidean distance in cell units
    #[inline]
    pub fn distance_sq(self, other: Cell) -> i64 {
        let dc = (self.col - other.col) as i64;
        let dr = (self.row - other.row) as i64;
        dc * dc + dr * dr
    }

    /// Manhattan distance in cell units
    #[inline]
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }
}

impl From<Cell> for IVec2 {
    fn from(cell: Cell) -> Self {
        IVec2::new(cell.col, cell.row)
    }
}

/// Board dimensions in pixels plus the cell side length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub side: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT, SIDE)
    }
}

impl Grid {
    pub const fn new(width: i32, height: i32, side: i32) -> Self {
        Self {
            width,
            height,
            side,
        }
    }

    /// Number of whole columns (a partial trailing column is not playable)
    #[inline]
    pub fn cols(&self) -> i32 {
        if self.side <= 0 { 0 } else { self.width / self.side }
    }

    /// Number of whole rows
    #[inline]
    pub fn rows(&self) -> i32 {
        if self.side <= 0 { 0 } else { self.height / self.side }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.cols().max(0) as usize) * (self.rows().max(0) as usize)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cols()).contains(&cell.col) && (0..self.rows()).contains(&cell.row)
    }

    /// Top-left pixel of a cell
    #[inline]
    pub fn cell_to_pixel(&self, cell: Cell) -> IVec2 {
        IVec2::from(cell) * self.side
    }

    /// Cell containing a pixel (floors toward negative infinity)
    #[inline]
    pub fn pixel_to_cell(&self, pixel: IVec2) -> Cell {
        Cell::new(
            pixel.x.div_euclid(self.side),
            pixel.y.div_euclid(self.side),
        )
    }

    /// Central cell, where a fresh snake starts
    pub fn center(&self) -> Cell {
        Cell::new(self.cols() / 2, self.rows() / 2)
    }

    /// Every cell on the board, column by column.
    ///
    /// Each call returns a fresh iterator, so enumeration can be restarted.
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let rows = self.rows().max(0);
        (0..self.cols().max(0)).flat_map(move |col| (0..rows).map(move |row| Cell::new(col, row)))
    }

    /// Pick a cell uniformly from the board minus `forbidden`.
    ///
    /// Returns `None` when every cell is taken; callers skip spawning.
    pub fn random_free_cell<R: Rng + ?Sized>(
        &self,
        forbidden: &HashSet<Cell>,
        rng: &mut R,
    ) -> Option<Cell> {
        let free: Vec<Cell> = self.all_cells().filter(|c| !forbidden.contains(c)).collect();
        if free.is_empty() {
            return None;
        }
        Some(free[rng.random_range(0..free.len())])
    }

    /// Wrap an off-board cell back onto the board, one axis at a time
    pub fn wrap(&self, cell: Cell) -> Cell {
        let mut wrapped = cell;
        if cell.col < 0 {
            wrapped.col = self.cols() - 1;
        } else if cell.col >= self.cols() {
            wrapped.col = 0;
        }
        if cell.row < 0 {
            wrapped.row = self.rows() - 1;
        } else if cell.row >= self.rows() {
            wrapped.row = 0;
        }
        wrapped
    }

    /// True when `a` and `b` are one step apart, counting a step across the
    /// board edge as adjacent
    pub fn are_adjacent(&self, a: Cell, b: Cell) -> bool {
        let dc = (a.col - b.col).abs();
        let dr = (a.row - b.row).abs();
        let dc = dc.min(self.cols() - dc);
        let dr = dr.min(self.rows() - dr);
        dc + dr == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_dimensions() {
        let grid = Grid::new(800, 600, 30);
        assert_eq!(grid.cols(), 26);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cell_count(), 520);
    }

    #[test]
    fn test_pixel_roundtrip_points() {
        let grid = Grid::new(800, 600, 30);
        assert_eq!(grid.cell_to_pixel(Cell::new(10, 10)), IVec2::new(300, 300));
        assert_eq!(grid.pixel_to_cell(IVec2::new(330, 300)), Cell::new(11, 10));
        // Sub-cell offsets snap down
        assert_eq!(grid.pixel_to_cell(IVec2::new(359, 329)), Cell::new(11, 10));
        // Off-board negative pixels map to negative cells
        assert_eq!(grid.pixel_to_cell(IVec2::new(-30, 0)), Cell::new(-1, 0));
        assert_eq!(grid.pixel_to_cell(IVec2::new(-1, 0)), Cell::new(-1, 0));
    }

    #[test]
    fn test_all_cells_is_restartable() {
        let grid = Grid::new(90, 60, 30);
        let first: Vec<_> = grid.all_cells().collect();
        let second: Vec<_> = grid.all_cells().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
        assert_eq!(first[0], Cell::new(0, 0));
        assert_eq!(first[1], Cell::new(0, 1));
        assert_eq!(first[2], Cell::new(1, 0));
    }

    #[test]
    fn test_random_free_cell_avoids_forbidden() {
        let grid = Grid::new(60, 60, 30);
        let forbidden: HashSet<Cell> =
            [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)].into_iter().collect();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(grid.random_free_cell(&forbidden, &mut rng), Some(Cell::new(1, 1)));
        }
    }

    #[test]
    fn test_random_free_cell_full_grid() {
        let grid = Grid::new(60, 30, 30);
        let forbidden: HashSet<Cell> = grid.all_cells().collect();
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(grid.random_free_cell(&forbidden, &mut rng), None);
    }

    #[test]
    fn test_random_free_cell_is_reproducible() {
        let grid = Grid::default();
        let forbidden = HashSet::new();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                grid.random_free_cell(&forbidden, &mut a),
                grid.random_free_cell(&forbidden, &mut b)
            );
        }
    }

    #[test]
    fn test_wrap_single_axis() {
        let grid = Grid::new(800, 600, 30);
        assert_eq!(grid.wrap(Cell::new(-1, 5)), Cell::new(25, 5));
        assert_eq!(grid.wrap(Cell::new(26, 5)), Cell::new(0, 5));
        assert_eq!(grid.wrap(Cell::new(3, -1)), Cell::new(3, 19));
        assert_eq!(grid.wrap(Cell::new(3, 20)), Cell::new(3, 0));
        assert_eq!(grid.wrap(Cell::new(3, 4)), Cell::new(3, 4));
    }

    #[test]
    fn test_adjacency_across_edge() {
        let grid = Grid::new(800, 600, 30);
        assert!(grid.are_adjacent(Cell::new(0, 5), Cell::new(1, 5)));
        assert!(grid.are_adjacent(Cell::new(0, 5), Cell::new(25, 5)));
        assert!(!grid.are_adjacent(Cell::new(0, 5), Cell::new(0, 5)));
        assert!(!grid.are_adjacent(Cell::new(0, 5), Cell::new(1, 6)));
    }
}
