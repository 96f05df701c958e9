//! Bounds of a square grid. Handles bounds checks, linearizing indexes and computing
//! neighbor cells.
use std::borrow::Borrow;

use crate::board::Coordinate;

/// Offsets `(row, col)` of the eight cells surrounding a coordinate.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Dimensions of a `size x size` grid. Neighbors are clipped to the grid; there is no
/// wrapping.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SquareDimensions {
    /// Length of each side of the grid.
    size: usize,
}

impl SquareDimensions {
    /// Create new [`SquareDimensions`] with the specified side length.
    /// Returns `None` if `size` is 0 or if `size * size` exceeds `usize::max_value()`.
    pub fn try_new(size: usize) -> Option<Self> {
        if size == 0 {
            None
        } else {
            size.checked_mul(size).map(|_| Self { size })
        }
    }

    /// Get the side length of these [`SquareDimensions`].
    pub fn size(&self) -> usize {
        self.size
    }

    /// Compute the linear total size of these dimensions.
    pub fn total_size(&self) -> usize {
        self.size * self.size
    }

    /// Returns true if both axes of the coordinate lie in `[0, size)`.
    pub fn is_valid<B: Borrow<Coordinate>>(&self, coord: B) -> bool {
        let c = coord.borrow();
        c.row < self.size && c.col < self.size
    }

    /// Convert a coordinate to a linear index within this dimension.
    /// Returns `None` if the coordinate is out of range for the dimension.
    pub fn try_linearize<B: Borrow<Coordinate>>(&self, coord: B) -> Option<usize> {
        let c = coord.borrow();
        if self.is_valid(c) {
            Some(c.row * self.size + c.col)
        } else {
            None
        }
    }

    /// Get back a coordinate from a linearized index. The index must be less than
    /// `total_size`.
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate::new(idx / self.size, idx % self.size)
    }

    /// Iterate the in-bounds neighbors of the given coordinate. Yields nothing if the
    /// coordinate itself is out of bounds.
    pub fn neighbors(&self, coord: Coordinate) -> NeighborIter {
        NeighborIter {
            center: coord,
            size: self.size,
            // Skip straight to the end for out-of-bounds centers so `next` never has to
            // check the center again.
            step: if self.is_valid(coord) {
                0
            } else {
                MOORE_OFFSETS.len()
            },
        }
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the
    /// coordinates of that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let size = self.size;
        (0..size).map(move |row| (0..size).map(move |col| Coordinate { row, col }))
    }
}

/// Iterator over the Moore neighborhood of a coordinate.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coordinate,
    size: usize,
    step: usize,
}

impl NeighborIter {
    /// Applies one offset to one axis, returning a value only when it remains in bounds.
    fn shift(&self, value: usize, delta: isize) -> Option<usize> {
        let shifted = if delta < 0 {
            value.checked_sub(delta.unsigned_abs())?
        } else {
            value + delta as usize
        };
        if shifted < self.size {
            Some(shifted)
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        while let Some(&(dr, dc)) = MOORE_OFFSETS.get(self.step) {
            self.step += 1;
            let row = self.shift(self.center.row, dr);
            let col = self.shift(self.center.col, dc);
            if let (Some(row), Some(col)) = (row, col) {
                return Some(Coordinate::new(row, col));
            }
        }
        None
    }
}
