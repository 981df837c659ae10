//! Ship definitions and hit tracking.

use alloc::collections::BTreeSet;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::common::BoardError;
use crate::coord::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The `length` cells starting at `start` and extending along this orientation.
    pub fn cells(self, start: Coordinate, length: usize) -> impl Iterator<Item = Coordinate> {
        (0..length).map(move |i| match self {
            Orientation::Horizontal => Coordinate::new(start.row, start.col + i),
            Orientation::Vertical => Coordinate::new(start.row + i, start.col),
        })
    }
}

impl FromStr for Orientation {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            other => Err(BoardError::InvalidOrientation(other.to_string())),
        }
    }
}

/// A placed ship: the cells it occupies and the ones that have been hit.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    positions: Vec<Coordinate>,
    hits: BTreeSet<Coordinate>,
}

impl Ship {
    /// Create an unhit ship occupying `positions`. Repeated coordinates are
    /// kept once, in order of first appearance.
    pub fn new(positions: Vec<Coordinate>) -> Self {
        let mut seen = BTreeSet::new();
        let positions = positions.into_iter().filter(|p| seen.insert(*p)).collect();
        Self {
            positions,
            hits: BTreeSet::new(),
        }
    }

    /// Record a hit at `pos`. Coordinates outside the ship are ignored and
    /// repeated hits on the same cell count once.
    pub fn register_hit(&mut self, pos: Coordinate) {
        if self.contains(pos) {
            self.hits.insert(pos);
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.positions.len()
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        self.positions.contains(&pos)
    }

    /// Number of cells the ship occupies.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Coordinate] {
        &self.positions
    }

    pub fn hits(&self) -> &BTreeSet<Coordinate> {
        &self.hits
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Ship length={} sunk={}>", self.len(), self.is_sunk())
    }
}
