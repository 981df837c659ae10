//! Common types for Battleship: board errors and guess results.

use alloc::string::String;
use core::fmt;

/// Result of an attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum GuessResult {
    /// Attack landed on a ship cell.
    Hit,
    /// Attack missed all ships.
    Miss,
    /// The coordinate had already been attacked; nothing changed.
    Guessed,
}

impl GuessResult {
    /// `true` for results that consume the attacker's turn.
    pub fn is_fresh(&self) -> bool {
        matches!(self, GuessResult::Hit | GuessResult::Miss)
    }
}

impl fmt::Display for GuessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GuessResult::Hit => "hit",
            GuessResult::Miss => "miss",
            GuessResult::Guessed => "guessed",
        };
        f.write_str(s)
    }
}

/// Errors returned by board setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Orientation literal was neither `horizontal` nor `vertical`.
    InvalidOrientation(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidOrientation(s) => write!(
                f,
                "Invalid orientation '{}', must be 'horizontal' or 'vertical'",
                s
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
