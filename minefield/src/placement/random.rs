use rand::{distributions::Uniform, Rng};
use tracing::debug;

use crate::{
    board::{GridSetup, PlaceError},
    placement::MinePlacer,
};

/// Places mines on uniformly random cells, drawing again whenever a draw lands on a
/// cell that already holds a mine.
///
/// The expected number of draws stays small as long as the mine count is well below
/// the number of cells, which [`GameConfig`][crate::game::GameConfig] guarantees with
/// its density cap.
#[derive(Debug, Clone)]
pub struct RandomMinePlacer<R> {
    /// Number of mines to place.
    mines: usize,
    /// Source of randomness.
    rng: R,
}

impl<R: Rng> RandomMinePlacer<R> {
    /// Construct a placer that will put `mines` mines on the grid using `rng`.
    pub fn new(mines: usize, rng: R) -> Self {
        Self { mines, rng }
    }
}

impl<R: Rng> MinePlacer for RandomMinePlacer<R> {
    fn mine_count(&self) -> usize {
        self.mines
    }

    fn place_mines(mut self, setup: &mut GridSetup) -> Result<(), PlaceError> {
        let dim = *setup.dimensions();
        let cells = Uniform::new(0, dim.total_size());
        let mut draws = 0usize;
        while setup.mines_placed() < self.mines {
            let coord = dim.un_linearize(self.rng.sample(&cells));
            draws += 1;
            if !setup.has_mine(coord) {
                setup.place_mine(coord)?;
            }
        }
        debug!(mines = self.mines, draws, "placed mines at random");
        Ok(())
    }
}
