//! Defines the types that make up the grid. These are shared between the grid's setup
//! and playing versions.

use std::{
    borrow::Borrow,
    ops::{Index, IndexMut},
};

use crate::board::{Coordinate, SquareDimensions};

/// A single square of the grid.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Cell {
    /// Whether a mine sits on this cell. Set once during placement.
    pub(crate) mine: bool,

    /// Whether this cell has been uncovered. Never reset once set.
    pub(crate) revealed: bool,

    /// Number of mines in the surrounding cells. Not meaningful for mine cells.
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    /// Whether this cell holds a mine.
    pub fn is_mine(&self) -> bool {
        self.mine
    }

    /// Whether this cell has been uncovered.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Number of mines among the up-to-eight neighbors of this cell. Always 0 for
    /// mine cells.
    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }
}

/// Cell storage shared between [`GridSetup`][crate::board::GridSetup] and
/// [`Grid`][crate::board::Grid].
#[derive(Debug, Clone)]
pub(crate) struct Cells {
    /// Dimensions of this grid.
    pub(crate) dim: SquareDimensions,
    /// Cells in row-major order.
    pub(crate) cells: Box<[Cell]>,
}

impl Cells {
    pub(crate) fn new(dim: SquareDimensions) -> Self {
        let cells = vec![Cell::default(); dim.total_size()].into_boxed_slice();
        Self { dim, cells }
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub(crate) fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<&Cell> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(crate) fn get_mut<B: Borrow<Coordinate>>(&mut self, coord: B) -> Option<&mut Cell> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Count the mines around `coord`.
    pub(crate) fn count_adjacent_mines(&self, coord: Coordinate) -> u8 {
        // At most 8 neighbors, so the count always fits.
        self.dim
            .neighbors(coord)
            .filter(|n| self[n].mine)
            .count() as u8
    }

    /// Number of cells that hold a mine.
    pub(crate) fn mine_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.mine).count()
    }
}

impl<B: Borrow<Coordinate>> Index<B> for Cells {
    type Output = Cell;

    fn index(&self, coord: B) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl<B: Borrow<Coordinate>> IndexMut<B> for Cells {
    fn index_mut(&mut self, coord: B) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}
