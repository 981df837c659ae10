use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{board::Board, common::GuessResult, coord::Coordinate};

/// Two boards and whose turn it is.
///
/// The game never marks itself finished; callers poll [`Game::check_winner`]
/// after each attack.
#[derive(Clone, Debug)]
pub struct Game {
    boards: [Board; 2],
    current_turn: usize,
}

impl Game {
    /// Start a game between two boards with ships already placed.
    /// Player 0 moves first.
    pub fn new(player_0: Board, player_1: Board) -> Self {
        Self {
            boards: [player_0, player_1],
            current_turn: 0,
        }
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    /// Board belonging to `player`.
    pub fn board(&self, player: usize) -> &Board {
        &self.boards[player]
    }

    /// Attack the opponent of `player` at `pos`.
    ///
    /// The turn passes to the opponent on `Hit` or `Miss`. A repeated
    /// coordinate (`Guessed`) leaves the turn with the attacker, so a player
    /// that keeps re-attacking the same cell never gives up its turn.
    ///
    /// # Panics
    /// If `player` is not 0 or 1.
    pub fn attack(&mut self, player: usize, pos: Coordinate) -> GuessResult {
        assert!(player < 2, "player index must be 0 or 1, got {}", player);
        let opponent = 1 - player;
        let result = self.boards[opponent].receive_attack(pos);
        if result.is_fresh() {
            self.current_turn = opponent;
        }
        result
    }

    /// Index of the winning player, or `None` while both fleets float.
    ///
    /// Board 1 is checked first: if both fleets were sunk at once, player 0
    /// is reported as the winner.
    pub fn check_winner(&self) -> Option<usize> {
        if self.boards[1].all_ships_sunk() {
            Some(0)
        } else if self.boards[0].all_ships_sunk() {
            Some(1)
        } else {
            None
        }
    }
}

const COLUMN_WIDTH: usize = 25;

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left: String = alloc::format!("{}", self.boards[0]);
        let right: String = alloc::format!("{}", self.boards[1]);
        let left: Vec<&str> = left.lines().collect();
        let right: Vec<&str> = right.lines().collect();

        writeln!(
            f,
            "{:<width$} | Player 1's Board",
            "Player 0's Board",
            width = COLUMN_WIDTH
        )?;
        writeln!(f, "{}+{}", "-".repeat(COLUMN_WIDTH), "-".repeat(COLUMN_WIDTH))?;
        for (l, r) in left.iter().zip(right.iter()) {
            writeln!(f, "{:<width$} | {}", l, r, width = COLUMN_WIDTH)?;
        }
        write!(f, "\nCurrent turn: Player {}", self.current_turn)
    }
}
