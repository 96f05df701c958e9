//! Strategies for putting mines on a grid.
use crate::board::{Coordinate, GridSetup, PlaceError};

#[cfg(feature = "rng_gen")]
pub use self::random::RandomMinePlacer;

#[cfg(feature = "rng_gen")]
mod random;

/// Places a fixed number of mines onto a grid that is still in its setup phase.
///
/// A placer is consumed by [`Grid::new`][crate::board::Grid::new]: it runs exactly once,
/// on a grid with no mines, and must leave exactly [`mine_count`][Self::mine_count]
/// distinct cells mined. `Grid::new` checks the count against the grid's capacity
/// before calling [`place_mines`][Self::place_mines] and verifies it afterwards.
pub trait MinePlacer {
    /// Number of mines this placer will put on the grid.
    fn mine_count(&self) -> usize;

    /// Mark cells of `setup` as mines.
    fn place_mines(self, setup: &mut GridSetup) -> Result<(), PlaceError>;
}

/// Places mines on an explicit list of cells. Useful for scripted boards and tests.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FixedMinePlacer {
    mines: Vec<Coordinate>,
}

impl FixedMinePlacer {
    /// Construct a placer for the given mine coordinates.
    pub fn new(mines: Vec<Coordinate>) -> Self {
        Self { mines }
    }

    /// Construct a placer from `(row, col)` pairs.
    pub fn from_pairs(mines: &[(usize, usize)]) -> Self {
        Self::new(mines.iter().copied().map(Coordinate::from).collect())
    }
}

impl MinePlacer for FixedMinePlacer {
    fn mine_count(&self) -> usize {
        self.mines.len()
    }

    /// Fails on the first coordinate that is out of bounds or repeats an earlier one.
    fn place_mines(self, setup: &mut GridSetup) -> Result<(), PlaceError> {
        for coord in self.mines {
            setup.place_mine(coord)?;
        }
        Ok(())
    }
}
