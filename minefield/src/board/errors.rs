//! Errors used by [`Grid`][crate::board::Grid], [`GridSetup`][crate::board::GridSetup]
//! and [`GameConfig`][crate::game::GameConfig].

use std::{
    convert::TryFrom,
    fmt::{self, Debug},
};

use thiserror::Error;

use crate::board::Coordinate;

/// Reason why a grid size / mine count pair was rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ConfigViolation {
    /// The grid must have at least one row and column.
    #[error("grid size must be positive")]
    ZeroSize,
    /// A raw input value was negative.
    #[error("grid size and mine count must not be negative")]
    Negative,
    /// `size * size` does not fit in memory indexes.
    #[error("grid size is too large")]
    SizeOverflow,
    /// More mines were requested than the grid has cells.
    #[error("more mines than cells on the grid")]
    ExceedsCapacity,
    /// More mines were requested than the density cap allows.
    #[error("at most {max} mines are allowed on this grid")]
    ExceedsDensityCap {
        /// Largest mine count allowed for the grid size.
        max: usize,
    },
}

/// Error returned when a round is configured with an unusable grid size or mine count.
#[derive(Error, Copy, Clone, Eq, PartialEq)]
#[error("invalid configuration for size {size} with {mines} mines")]
pub struct InvalidConfiguration {
    #[source]
    reason: ConfigViolation,
    size: i64,
    mines: i64,
}

impl InvalidConfiguration {
    /// Construct a configuration error from a reason and the rejected values.
    pub(crate) fn new(reason: ConfigViolation, size: i64, mines: i64) -> Self {
        Self {
            reason,
            size,
            mines,
        }
    }

    /// Construct a configuration error from unsigned values, saturating anything that
    /// doesn't fit an `i64`.
    pub(crate) fn from_counts(reason: ConfigViolation, size: usize, mines: usize) -> Self {
        let clamp = |v: usize| i64::try_from(v).unwrap_or(i64::max_value());
        Self::new(reason, clamp(size), clamp(mines))
    }

    /// Get the reason the configuration was rejected.
    pub fn reason(&self) -> ConfigViolation {
        self.reason
    }

    /// The grid size that was requested.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// The mine count that was requested.
    pub fn mines(&self) -> i64 {
        self.mines
    }
}

impl Debug for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Reason why a mine could not be placed on a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The cell selected was out of bounds on the grid.
    OutOfBounds,

    /// A mine was already placed on that cell.
    AlreadyMined,
}

/// Error returned by [`GridSetup::place_mine`][crate::board::GridSetup::place_mine].
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not place mine at {coord}: {reason:?}")]
pub struct PlaceError {
    /// Reason why the mine could not be placed.
    reason: CannotPlaceReason,

    /// The coordinates of the cell.
    coord: Coordinate,
}

impl PlaceError {
    /// Construct a placement error with the given reason for the specified cell.
    pub(crate) fn new(reason: CannotPlaceReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason placement failed.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get the coordinate of the cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// Error returned when building a [`Grid`][crate::board::Grid].
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum BuildError {
    /// The grid size or mine count was rejected before placement started.
    #[error(transparent)]
    Config(#[from] InvalidConfiguration),

    /// The mine placer tried to put a mine somewhere it can't go.
    #[error(transparent)]
    Place(#[from] PlaceError),

    /// The mine placer finished without placing the number of mines it promised.
    #[error("expected {expected} mines to be placed, found {placed}")]
    MineCountMismatch {
        /// Mines the placer was asked to place.
        expected: usize,
        /// Mines actually on the grid.
        placed: usize,
    },

    /// The mine placer was set up for a different mine count than the round.
    #[error("round needs {expected} mines, but the placer places {requested}")]
    PlacerMismatch {
        /// Mines the round is configured with.
        expected: usize,
        /// Mines the placer reports it will place.
        requested: usize,
    },
}
