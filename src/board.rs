//! Game board state: ship placement and attack resolution.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::GuessResult;
use crate::config::PLACEMENT_ATTEMPTS;
use crate::coord::Coordinate;
use crate::ship::{Orientation, Ship};

/// A `size`×`size` board owning its ships and every coordinate attacked so far.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: usize,
    ships: Vec<Ship>,
    guesses: BTreeSet<Coordinate>,
}

impl Board {
    /// Create an empty board (no ships placed, nothing attacked).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            ships: Vec::new(),
            guesses: BTreeSet::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Coordinates already attacked on this board.
    pub fn guesses(&self) -> &BTreeSet<Coordinate> {
        &self.guesses
    }

    /// Place a ship of `length` starting at `start`.
    ///
    /// Returns `None` without touching the board if any cell would fall
    /// outside the grid or collide with an already placed ship.
    pub fn place_ship(
        &mut self,
        start: Coordinate,
        length: usize,
        orientation: Orientation,
    ) -> Option<&Ship> {
        if !self.fits(start, length, orientation) {
            return None;
        }
        let positions: Vec<Coordinate> = orientation.cells(start, length).collect();
        self.ships.push(Ship::new(positions));
        self.ships.last()
    }

    fn fits(&self, start: Coordinate, length: usize, orientation: Orientation) -> bool {
        if length == 0 {
            return false;
        }
        orientation
            .cells(start, length)
            .all(|c| c.in_bounds(self.size) && !self.ships.iter().any(|s| s.contains(c)))
    }

    /// Returns a random start and orientation where a ship of `length` fits,
    /// or `None` if nothing was found after a bounded number of attempts.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Option<(Coordinate, Orientation)> {
        if length == 0 || length > self.size {
            return None;
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (self.size - 1, self.size - length),
                Orientation::Vertical => (self.size - length, self.size - 1),
            };
            let start = Coordinate::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if self.fits(start, length, orient) {
                return Some((start, orient));
            }
        }
        None
    }

    /// Resolve an attack at `pos`.
    ///
    /// A coordinate that was already attacked yields `Guessed` and changes nothing.
    pub fn receive_attack(&mut self, pos: Coordinate) -> GuessResult {
        if !self.guesses.insert(pos) {
            return GuessResult::Guessed;
        }
        match self.ships.iter_mut().find(|s| s.contains(pos)) {
            Some(ship) => {
                ship.register_hit(pos);
                GuessResult::Hit
            }
            None => GuessResult::Miss,
        }
    }

    /// Returns `true` when every ship is sunk. Vacuously true for an empty board.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Lengths of the placed ships, sorted ascending.
    pub fn ship_lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.ships.iter().map(Ship::len).collect();
        lengths.sort_unstable();
        lengths
    }

    /// Returns `true` if the placed ships are exactly the multiset `fleet`.
    pub fn has_fleet(&self, fleet: &[usize]) -> bool {
        let mut expected = fleet.to_vec();
        expected.sort_unstable();
        self.ship_lengths() == expected
    }

    fn cell_char(&self, pos: Coordinate) -> char {
        let on_ship = self.ships.iter().any(|s| s.contains(pos));
        match (self.guesses.contains(&pos), on_ship) {
            (true, true) => 'H',
            (true, false) => 'M',
            (false, true) => 'S',
            (false, false) => '.',
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(" ")?;
        for c in 0..self.size {
            write!(f, " {}", c)?;
        }
        writeln!(f)?;
        for r in 0..self.size {
            write!(f, "{}", r)?;
            for c in 0..self.size {
                write!(f, " {}", self.cell_char(Coordinate::new(r, c)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
