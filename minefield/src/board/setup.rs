//! Implements the placement phase of the grid.
use tracing::trace;

use crate::board::{
    grid::Cells, CannotPlaceReason, Coordinate, Grid, PlaceError, SquareDimensions,
};

/// Placement phase for a [`Grid`]. Allows placing mines and does not allow uncovering
/// cells. Handed to a [`MinePlacer`][crate::placement::MinePlacer] by [`Grid::new`].
#[derive(Debug)]
pub struct GridSetup {
    /// Cells that mines are being placed into.
    cells: Cells,

    /// Number of mines placed so far.
    placed: usize,
}

impl GridSetup {
    /// Begin placement on an empty grid with the given dimensions.
    pub(crate) fn new(dim: SquareDimensions) -> Self {
        Self {
            cells: Cells::new(dim),
            placed: 0,
        }
    }

    /// Get the [`SquareDimensions`] of the grid being set up.
    pub fn dimensions(&self) -> &SquareDimensions {
        &self.cells.dim
    }

    /// Number of mines placed so far.
    pub fn mines_placed(&self) -> usize {
        self.placed
    }

    /// Returns true if the cell holds a mine. Out-of-bounds cells never do.
    pub fn has_mine(&self, coord: Coordinate) -> bool {
        self.cells.get(coord).map_or(false, |cell| cell.mine)
    }

    /// Put a mine on the given cell. Fails if the cell is out of bounds or already
    /// holds a mine; in both cases the grid is left unchanged.
    pub fn place_mine(&mut self, coord: Coordinate) -> Result<(), PlaceError> {
        match self.cells.get_mut(coord) {
            None => Err(PlaceError::new(CannotPlaceReason::OutOfBounds, coord)),
            Some(cell) if cell.mine => {
                Err(PlaceError::new(CannotPlaceReason::AlreadyMined, coord))
            }
            Some(cell) => {
                cell.mine = true;
                self.placed += 1;
                trace!(%coord, "placed mine");
                Ok(())
            }
        }
    }

    /// Finish placement: compute the adjacent-mine count of every safe cell and hand
    /// the cells over to a playable [`Grid`].
    pub(crate) fn finish(mut self) -> Grid {
        let dim = self.cells.dim;
        for idx in 0..dim.total_size() {
            let coord = dim.un_linearize(idx);
            if !self.cells[coord].mine {
                let count = self.cells.count_adjacent_mines(coord);
                self.cells[coord].adjacent_mines = count;
            }
        }
        Grid::from_cells(self.cells, self.placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(size: usize) -> GridSetup {
        GridSetup::new(SquareDimensions::try_new(size).unwrap())
    }

    #[test]
    fn place_mine_rejects_duplicates() {
        let mut setup = setup(3);
        setup.place_mine(Coordinate::new(1, 1)).unwrap();

        let err = setup.place_mine(Coordinate::new(1, 1)).unwrap_err();

        assert_eq!(err.reason(), CannotPlaceReason::AlreadyMined);
        assert_eq!(err.coord(), Coordinate::new(1, 1));
        assert_eq!(setup.mines_placed(), 1);
    }

    #[test]
    fn place_mine_rejects_out_of_bounds() {
        let mut setup = setup(3);

        let err = setup.place_mine(Coordinate::new(0, 3)).unwrap_err();

        assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);
        assert_eq!(setup.mines_placed(), 0);
        assert!(!setup.has_mine(Coordinate::new(0, 3)));
    }

    #[test]
    fn finish_counts_neighbors_and_leaves_mines_at_zero() {
        let mut setup = setup(3);
        setup.place_mine(Coordinate::new(0, 0)).unwrap();
        setup.place_mine(Coordinate::new(0, 1)).unwrap();

        let grid = setup.finish();

        assert_eq!(grid.get(Coordinate::new(0, 0)).unwrap().adjacent_mines(), 0);
        assert_eq!(grid.get(Coordinate::new(1, 0)).unwrap().adjacent_mines(), 2);
        assert_eq!(grid.get(Coordinate::new(1, 2)).unwrap().adjacent_mines(), 1);
        assert_eq!(grid.get(Coordinate::new(2, 2)).unwrap().adjacent_mines(), 0);
        assert_eq!(grid.mine_count(), 2);
    }
}
