//! Grid coordinates.

use core::fmt;

/// A cell on an N×N grid, addressed as (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the coordinate lies inside a `size`×`size` grid.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Orthogonal neighbours that stay inside a `size`×`size` grid.
    pub fn neighbours(&self, size: usize) -> impl Iterator<Item = Coordinate> {
        let Coordinate { row, col } = *self;
        [
            row.checked_sub(1).map(|r| Coordinate::new(r, col)),
            Some(Coordinate::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coordinate::new(row, c)),
            Some(Coordinate::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |c| c.in_bounds(size))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
