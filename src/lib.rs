#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod common;
mod config;
mod coord;
mod game;
pub mod pairing;
mod ship;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod player;
pub mod prelude;
#[cfg(feature = "std")]
pub mod series;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod shutdown;
#[cfg(feature = "std")]
pub mod tournament;

pub use board::*;
pub use common::*;
pub use config::*;
pub use coord::*;
pub use game::*;
pub use pairing::pairing_for_round;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player::{Call, CallError, HuntPlayer, PlayerHandle, RandomPlayer, RemotePlayer};
#[cfg(feature = "std")]
pub use series::Series;
#[cfg(feature = "std")]
pub use session::{Forfeit, ForfeitReason, GameOutcome, GameSession};
#[cfg(feature = "std")]
pub use shutdown::Shutdown;
#[cfg(feature = "std")]
pub use tournament::{MatchRecord, Matchup, RegistrationError, RoundReport, Standing, Tournament};
