//! Types that make up the game grid.

use std::borrow::Borrow;

use tracing::debug;

use crate::placement::MinePlacer;

use self::grid::Cells;
pub use self::{
    coordinate::Coordinate,
    dimensions::{NeighborIter, SquareDimensions},
    errors::{
        BuildError, CannotPlaceReason, ConfigViolation, InvalidConfiguration, PlaceError,
    },
    grid::Cell,
    setup::GridSetup,
};

mod coordinate;
mod dimensions;
mod errors;
mod grid;
pub mod setup;

/// The square minefield for a single round. Mines are fixed once the grid is built;
/// only the revealed state of cells changes during play.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Cells of the grid.
    cells: Cells,

    /// Number of mines on the grid.
    mines: usize,

    /// Number of safe cells that have been uncovered.
    revealed_safe: usize,
}

impl Grid {
    /// Build a `size x size` grid, letting `placer` choose where the mines go, then
    /// compute the adjacent-mine count of every safe cell.
    ///
    /// Fails without running the placer if `size` is 0 or too large, or if the placer
    /// asks for more mines than the grid has cells.
    pub fn new<P: MinePlacer>(size: usize, placer: P) -> Result<Self, BuildError> {
        let mines = placer.mine_count();
        let dim = SquareDimensions::try_new(size).ok_or_else(|| {
            let reason = if size == 0 {
                ConfigViolation::ZeroSize
            } else {
                ConfigViolation::SizeOverflow
            };
            InvalidConfiguration::from_counts(reason, size, mines)
        })?;
        if mines > dim.total_size() {
            return Err(InvalidConfiguration::from_counts(
                ConfigViolation::ExceedsCapacity,
                size,
                mines,
            )
            .into());
        }

        let mut setup = GridSetup::new(dim);
        placer.place_mines(&mut setup)?;
        if setup.mines_placed() != mines {
            return Err(BuildError::MineCountMismatch {
                expected: mines,
                placed: setup.mines_placed(),
            });
        }
        let grid = setup.finish();
        debug!(size, mines, "built grid");
        Ok(grid)
    }

    /// Wrap cells whose mines and counts are already final.
    pub(crate) fn from_cells(cells: Cells, mines: usize) -> Self {
        Self {
            cells,
            mines,
            revealed_safe: 0,
        }
    }

    /// Get the [`SquareDimensions`] of this [`Grid`].
    pub fn dimensions(&self) -> &SquareDimensions {
        &self.cells.dim
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.cells.dim.size()
    }

    /// Returns true if the coordinate lies on the grid.
    pub fn is_valid<B: Borrow<Coordinate>>(&self, coord: B) -> bool {
        self.cells.dim.is_valid(coord)
    }

    /// Get a reference to the cell at the given coordinate. Returns `None` if the
    /// coordinate is out of bounds.
    pub fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<&Cell> {
        self.cells.get(coord)
    }

    /// Get an iterator over the rows of the grid. The iterator's item is another
    /// iterator that iterates over a single row.
    pub fn iter_rows<'a>(
        &'a self,
    ) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = &'a Cell>> {
        let cells = &self.cells;
        cells
            .dim
            .iter_coordinates()
            .map(move |row| row.map(move |coord| &cells[coord]))
    }

    /// Iterate over every cell with its coordinate, in row-major order.
    pub fn iter_cells(&self) -> impl '_ + Iterator<Item = (Coordinate, &Cell)> {
        let dim = self.cells.dim;
        self.cells
            .cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (dim.un_linearize(idx), cell))
    }

    /// Iterate the in-bounds neighbors of a coordinate.
    pub fn neighbors(&self, coord: Coordinate) -> NeighborIter {
        self.cells.dim.neighbors(coord)
    }

    /// Number of mines on the grid.
    pub fn mine_count(&self) -> usize {
        self.mines
    }

    /// Number of cells without a mine.
    pub fn safe_cell_count(&self) -> usize {
        self.cells.dim.total_size() - self.mines
    }

    /// Number of safe cells uncovered so far.
    pub fn revealed_count(&self) -> usize {
        self.revealed_safe
    }

    /// Scan the whole grid and return true if every cell is either a mine or revealed.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells.cells.iter().all(|cell| cell.mine || cell.revealed)
    }

    /// Mark the cell as revealed. Returns the cell if it was hidden before the call,
    /// `None` if it was out of bounds or already revealed.
    pub(crate) fn reveal(&mut self, coord: Coordinate) -> Option<Cell> {
        let cell = self.cells.get_mut(coord)?;
        if cell.revealed {
            return None;
        }
        cell.revealed = true;
        let cell = *cell;
        if !cell.mine {
            self.revealed_safe += 1;
        }
        Some(cell)
    }

    /// Rewrite the mine flag of one cell and recompute every count. Lets tests rig a
    /// grid after it was built.
    #[cfg(test)]
    pub(crate) fn set_mine(&mut self, coord: Coordinate, mine: bool) {
        self.cells[coord].mine = mine;
        self.mines = self.cells.mine_count();
        for idx in 0..self.cells.dim.total_size() {
            let coord = self.cells.dim.un_linearize(idx);
            let count = if self.cells[coord].mine {
                0
            } else {
                self.cells.count_adjacent_mines(coord)
            };
            self.cells[coord].adjacent_mines = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::FixedMinePlacer;

    fn grid(size: usize, mines: &[(usize, usize)]) -> Grid {
        Grid::new(size, FixedMinePlacer::from_pairs(mines)).unwrap()
    }

    #[test]
    fn counts_match_moore_neighborhood() {
        let grid = grid(4, &[(0, 1), (1, 0), (1, 1)]);

        assert_eq!(grid.get(Coordinate::new(0, 0)).unwrap().adjacent_mines(), 3);
        assert_eq!(grid.get(Coordinate::new(2, 2)).unwrap().adjacent_mines(), 1);
        assert_eq!(grid.get(Coordinate::new(0, 2)).unwrap().adjacent_mines(), 2);
        assert_eq!(grid.get(Coordinate::new(3, 3)).unwrap().adjacent_mines(), 0);
        assert_eq!(grid.mine_count(), 3);
        assert_eq!(grid.safe_cell_count(), 13);
    }

    #[test]
    fn no_wraparound_at_edges() {
        let grid = grid(3, &[(0, 0)]);

        assert_eq!(grid.get(Coordinate::new(2, 2)).unwrap().adjacent_mines(), 0);
        assert_eq!(grid.get(Coordinate::new(0, 2)).unwrap().adjacent_mines(), 0);
        assert_eq!(grid.get(Coordinate::new(2, 0)).unwrap().adjacent_mines(), 0);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = Grid::new(0, FixedMinePlacer::new(vec![])).unwrap_err();

        match err {
            BuildError::Config(config) => assert_eq!(config.reason(), ConfigViolation::ZeroSize),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn more_mines_than_cells_is_rejected() {
        let mines: Vec<_> = (0..5).map(|i| Coordinate::new(i / 2, i % 2)).collect();

        let err = Grid::new(2, FixedMinePlacer::new(mines)).unwrap_err();

        match err {
            BuildError::Config(config) => {
                assert_eq!(config.reason(), ConfigViolation::ExceedsCapacity);
                assert_eq!(config.mines(), 5);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn placer_errors_are_propagated() {
        let err = Grid::new(2, FixedMinePlacer::from_pairs(&[(0, 0), (0, 0)])).unwrap_err();

        assert!(
            matches!(err, BuildError::Place(e) if e.reason() == CannotPlaceReason::AlreadyMined)
        );
    }

    #[test]
    fn placer_that_under_places_is_caught() {
        struct Lazy;
        impl MinePlacer for Lazy {
            fn mine_count(&self) -> usize {
                2
            }
            fn place_mines(self, setup: &mut GridSetup) -> Result<(), PlaceError> {
                setup.place_mine(Coordinate::new(0, 0))
            }
        }

        let err = Grid::new(3, Lazy).unwrap_err();

        assert_eq!(
            err,
            BuildError::MineCountMismatch {
                expected: 2,
                placed: 1
            }
        );
    }

    #[test]
    fn reveal_is_monotonic_and_counts_safe_cells() {
        let mut grid = grid(2, &[(0, 0)]);

        assert!(grid.reveal(Coordinate::new(1, 1)).is_some());
        assert!(grid.reveal(Coordinate::new(1, 1)).is_none());
        assert!(grid.reveal(Coordinate::new(2, 0)).is_none());
        assert_eq!(grid.revealed_count(), 1);
        assert!(!grid.all_safe_revealed());

        grid.reveal(Coordinate::new(0, 1));
        grid.reveal(Coordinate::new(1, 0));
        assert!(grid.all_safe_revealed());
        assert_eq!(grid.revealed_count(), grid.safe_cell_count());
    }

    #[test]
    fn iter_rows_is_row_major() {
        let grid = grid(2, &[(0, 1)]);

        let mines: Vec<Vec<bool>> = grid
            .iter_rows()
            .map(|row| row.map(Cell::is_mine).collect())
            .collect();

        assert_eq!(mines, vec![vec![false, true], vec![false, false]]);
    }

    #[test]
    fn iter_cells_pairs_each_cell_with_its_coordinate() {
        let grid = grid(3, &[(0, 2), (2, 1)]);

        let cells: Vec<_> = grid.iter_cells().collect();

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0].0, Coordinate::new(0, 0));
        assert_eq!(cells[5].0, Coordinate::new(1, 2));
        assert_eq!(cells[8].0, Coordinate::new(2, 2));
        for (coord, cell) in &cells {
            assert_eq!(grid.get(*coord), Some(*cell));
        }
        let mines: Vec<_> = cells
            .iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|&(coord, _)| coord)
            .collect();
        assert_eq!(mines, vec![Coordinate::new(0, 2), Coordinate::new(2, 1)]);
    }
}
