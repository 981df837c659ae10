//! Commonly used types and utilities for ease of import.

pub use crate::{Board, Coordinate, Game, GuessResult, Orientation, Ship, TournamentConfig};

#[cfg(feature = "std")]
pub use crate::{
    GameOutcome, HuntPlayer, PlayerHandle, RandomPlayer, RemotePlayer, Series, Shutdown, Standing,
    Tournament,
};
