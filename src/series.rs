//! Head-to-head series between two fixed players.
//!
//! Games are played back to back with the same seating until the requested
//! number has been reached or shutdown fires. Wins are tallied per seat and
//! the game in progress can be inspected at any time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use crate::{
    config::TournamentConfig,
    game::Game,
    player::PlayerHandle,
    session::{GameSession, GameSnapshot},
    shutdown::Shutdown,
};

pub struct Series {
    session: GameSession,
    stats: Mutex<[u32; 2]>,
    current: GameSnapshot,
}

impl Series {
    pub fn new(config: &TournamentConfig, player_0: PlayerHandle, player_1: PlayerHandle) -> Self {
        let current: GameSnapshot = Arc::new(Mutex::new(None));
        Self {
            session: GameSession::new(config, player_0, player_1).with_snapshot(current.clone()),
            stats: Mutex::new([0, 0]),
            current,
        }
    }

    /// Names used in diagnostics instead of the seat numbers.
    pub fn with_labels(mut self, player_0: &str, player_1: &str) -> Self {
        self.session = self.session.with_labels(player_0, player_1);
        self
    }

    fn stats(&self) -> MutexGuard<'_, [u32; 2]> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Play up to `games` games (without limit for `None`) and return the
    /// tally. An aborted game ends the series and is not counted.
    pub async fn play(&self, games: Option<usize>, shutdown: &Shutdown) -> [u32; 2] {
        let mut played = 0;
        while games.map_or(true, |n| played < n) && !shutdown.is_triggered() {
            let Some(winner) = self.session.play(shutdown).await.winner() else {
                break;
            };
            self.stats()[winner] += 1;
            played += 1;
            info!(
                "{} won game {} of the series",
                self.session.labels()[winner],
                played
            );
        }
        self.player_stats()
    }

    /// Games won by each seat so far.
    pub fn player_stats(&self) -> [u32; 2] {
        *self.stats()
    }

    /// Copy of the game in progress, or of the last one played.
    pub fn game_state(&self) -> Option<Game> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
