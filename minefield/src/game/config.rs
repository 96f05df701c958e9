//! Validated setup parameters for a round.
use std::convert::TryFrom;

#[cfg(feature = "rng_gen")]
use rand::Rng;

use crate::{
    board::{BuildError, ConfigViolation, Grid, InvalidConfiguration},
    placement::MinePlacer,
};

#[cfg(feature = "rng_gen")]
use crate::placement::RandomMinePlacer;

/// Largest share of the cells, in percent, that may hold mines.
pub const MAX_MINE_DENSITY_PERCENT: usize = 35;

/// Grid size and mine count for one round. Can only be constructed with values that
/// respect the density cap.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GameConfig {
    size: usize,
    mines: usize,
}

impl GameConfig {
    /// Validate a grid size and mine count. `size` must be positive and `mines` may
    /// not exceed [`max_mines`][Self::max_mines] for that size.
    pub fn new(size: usize, mines: usize) -> Result<Self, InvalidConfiguration> {
        if size == 0 {
            return Err(InvalidConfiguration::from_counts(
                ConfigViolation::ZeroSize,
                size,
                mines,
            ));
        }
        let max = Self::max_mines(size).ok_or_else(|| {
            InvalidConfiguration::from_counts(ConfigViolation::SizeOverflow, size, mines)
        })?;
        if mines > max {
            return Err(InvalidConfiguration::from_counts(
                ConfigViolation::ExceedsDensityCap { max },
                size,
                mines,
            ));
        }
        Ok(Self { size, mines })
    }

    /// Largest mine count allowed on a `size x size` grid: `floor(size² × 0.35)`.
    /// Returns `None` if `size²` overflows.
    pub fn max_mines(size: usize) -> Option<usize> {
        let total = size.checked_mul(size)?;
        // Split to keep `total * 35` from overflowing.
        Some(
            total / 100 * MAX_MINE_DENSITY_PERCENT
                + total % 100 * MAX_MINE_DENSITY_PERCENT / 100,
        )
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of mines to place.
    pub fn mines(&self) -> usize {
        self.mines
    }

    /// Build the grid for a round using the given placer. The placer must place the
    /// configured number of mines.
    pub fn build_grid<P: MinePlacer>(&self, placer: P) -> Result<Grid, BuildError> {
        if placer.mine_count() != self.mines {
            return Err(BuildError::PlacerMismatch {
                expected: self.mines,
                requested: placer.mine_count(),
            });
        }
        Grid::new(self.size, placer)
    }

    /// Build the grid for a round with mines on uniformly random cells.
    #[cfg(feature = "rng_gen")]
    pub fn random_grid<R: Rng>(&self, rng: R) -> Result<Grid, BuildError> {
        self.build_grid(RandomMinePlacer::new(self.mines, rng))
    }
}

impl TryFrom<(i64, i64)> for GameConfig {
    type Error = InvalidConfiguration;

    /// Validate raw `(size, mines)` input that may be negative.
    fn try_from((size, mines): (i64, i64)) -> Result<Self, Self::Error> {
        if size <= 0 {
            let reason = if size == 0 {
                ConfigViolation::ZeroSize
            } else {
                ConfigViolation::Negative
            };
            return Err(InvalidConfiguration::new(reason, size, mines));
        }
        if mines < 0 {
            return Err(InvalidConfiguration::new(
                ConfigViolation::Negative,
                size,
                mines,
            ));
        }
        let too_large =
            |_| InvalidConfiguration::new(ConfigViolation::SizeOverflow, size, mines);
        let size_u = usize::try_from(size).map_err(too_large)?;
        let mines_u = usize::try_from(mines).map_err(too_large)?;
        GameConfig::new(size_u, mines_u)
    }
}
