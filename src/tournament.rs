//! Round-robin tournament scheduler.
//!
//! Players register under a unique display name. The scheduler loop pairs
//! them with the circle method ([`pairing_for_round`]), runs every pairing
//! of a round concurrently, waits for all of them, and folds the results
//! into each player's record. Every registration restarts the round-robin
//! from round 1 so newcomers meet everyone.
//!
//! The registry and round counter sit behind one mutex that is never held
//! across an `.await`; a [`Notify`] wakes the loop when it is waiting for
//! enough players to form a pairing.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{error, info};
use rand::seq::SliceRandom;
use tokio::sync::Notify;
use tokio::task::JoinSet;

use crate::{
    config::TournamentConfig,
    pairing::pairing_for_round,
    player::{timed, Call, CallError, PlayerHandle},
    session::{GameOutcome, GameSession},
    shutdown::Shutdown,
};

/// Names of the two players meeting in a game. Only meaningful for the round
/// it was generated in.
pub type Matchup = (String, String);

/// A matchup together with the handles of both players.
type Pairing = (Matchup, [PlayerHandle; 2]);

/// Why a registration was refused. Nothing is recorded in either case.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("player failed the liveness check: {0}")]
    Liveness(#[from] CallError),
    #[error("player name {0:?} has been registered, choose another display name")]
    DuplicateName(String),
}

/// One finished game from a player's point of view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchRecord {
    pub opponent: String,
    pub won: bool,
}

/// Scheduler-side record of a registered player.
struct PlayerInfo {
    player: PlayerHandle,
    wins: u32,
    losses: u32,
    games: u32,
    previous_matchups: Vec<MatchRecord>,
}

impl PlayerInfo {
    fn new(player: PlayerHandle) -> Self {
        Self {
            player,
            wins: 0,
            losses: 0,
            games: 0,
            previous_matchups: Vec::new(),
        }
    }

    /// Proportion of games won; 0 before the first game.
    fn win_rate(&self) -> f64 {
        if self.games > 0 {
            f64::from(self.wins) / f64::from(self.games)
        } else {
            0.0
        }
    }

    fn record(&mut self, opponent: &str, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.games += 1;
        self.previous_matchups.push(MatchRecord {
            opponent: opponent.to_string(),
            won,
        });
    }
}

/// Read-only ranking entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Standing {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub games: u32,
    pub win_rate: f64,
    pub record: Vec<MatchRecord>,
}

/// What a finished round did. `scored + aborted + failed` equals the
/// number of games launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub round: usize,
    pub scored: usize,
    pub aborted: usize,
    /// Session tasks that died without an outcome. Not scored.
    pub failed: usize,
}

struct Registry {
    /// Registration order, reshuffled on every registration.
    players: Vec<(String, PlayerInfo)>,
    round: usize,
    matchups: Vec<Matchup>,
}

impl Registry {
    fn get_mut(&mut self, name: &str) -> Option<&mut PlayerInfo> {
        self.players
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, info)| info)
    }

    fn handle(&self, name: &str) -> Option<PlayerHandle> {
        self.players
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, info)| info.player.clone())
    }
}

pub struct Tournament {
    config: TournamentConfig,
    registry: Mutex<Registry>,
    new_players: Notify,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            config,
            registry: Mutex::new(Registry {
                players: Vec::new(),
                round: 1,
                matchups: Vec::new(),
            }),
            new_players: Notify::new(),
        }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check that `player` is alive and add it under `name`.
    ///
    /// The check calls `ping`, `new_game` and `get_move`, each under the
    /// configured timeout. On success the round counter goes back to 1, the
    /// player order is shuffled and a waiting scheduler loop is woken.
    pub async fn register_player(
        &self,
        player: PlayerHandle,
        name: &str,
    ) -> Result<(), RegistrationError> {
        self.check_liveness(&player).await?;

        let count = {
            let mut registry = self.registry();
            if registry.players.iter().any(|(n, _)| n == name) {
                return Err(RegistrationError::DuplicateName(name.to_string()));
            }
            registry
                .players
                .push((name.to_string(), PlayerInfo::new(player)));
            registry.round = 1;
            registry.players.shuffle(&mut rand::rng());
            registry.players.len()
        };

        info!("Registered player {} ({} players)", name, count);
        self.new_players.notify_one();
        Ok(())
    }

    async fn check_liveness(&self, player: &PlayerHandle) -> Result<(), CallError> {
        let limit = self.config.call_timeout;
        let p = player.clone();
        timed(limit, Call::Ping, async move { p.ping().await }).await?;
        let p = player.clone();
        let fleet = self.config.fleet.clone();
        let size = self.config.board_size;
        timed(limit, Call::NewGame, async move {
            p.new_game(&fleet, size).await
        })
        .await?;
        let p = player.clone();
        timed(limit, Call::GetMove, async move { p.get_move().await }).await?;
        Ok(())
    }

    /// Ranking snapshot, best win rate first. Equal win rates keep registry order.
    pub fn players(&self) -> Vec<Standing> {
        let registry = self.registry();
        let mut standings: Vec<Standing> = registry
            .players
            .iter()
            .map(|(name, info)| Standing {
                name: name.clone(),
                wins: info.wins,
                losses: info.losses,
                games: info.games,
                win_rate: info.win_rate(),
                record: info.previous_matchups.clone(),
            })
            .collect();
        drop(registry);
        standings.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
        standings
    }

    /// Pairings of the round currently being played.
    pub fn current_matchups(&self) -> Vec<Matchup> {
        self.registry().matchups.clone()
    }

    /// Round number the next pairing will be computed for.
    pub fn round(&self) -> usize {
        self.registry().round
    }

    /// Play a single game between two players with this tournament's settings.
    pub async fn play_game(
        &self,
        player_0: PlayerHandle,
        player_1: PlayerHandle,
        shutdown: &Shutdown,
    ) -> GameOutcome {
        GameSession::new(&self.config, player_0, player_1)
            .play(shutdown)
            .await
    }

    /// Block until the current round has at least one pairing, then claim it.
    ///
    /// Pairing and the round advance happen under the registry lock, so a
    /// concurrent registration either lands before (and is paired) or after
    /// (and resets the counter for the next round).
    async fn next_pairings(&self, shutdown: &Shutdown) -> Option<(usize, Vec<Pairing>)> {
        loop {
            {
                let mut registry = self.registry();
                let names: Vec<String> =
                    registry.players.iter().map(|(n, _)| n.clone()).collect();
                let matchups = pairing_for_round(&names, registry.round);
                if !matchups.is_empty() {
                    let round = registry.round;
                    registry.round += 1;
                    let games = matchups
                        .iter()
                        .filter_map(|(a, b)| {
                            Some((
                                (a.clone(), b.clone()),
                                [registry.handle(a)?, registry.handle(b)?],
                            ))
                        })
                        .collect();
                    registry.matchups = matchups;
                    return Some((round, games));
                }
            }
            tokio::select! {
                _ = self.new_players.notified() => {}
                _ = shutdown.wait() => return None,
            }
        }
    }

    /// Pair the current round, play every game concurrently and score the results.
    ///
    /// Returns `None` if shutdown fired while waiting for players.
    pub async fn play_round(&self, shutdown: &Shutdown) -> Option<RoundReport> {
        let (round, games) = self.next_pairings(shutdown).await?;
        info!("Starting round {} with {} games", round, games.len());

        let mut sessions = JoinSet::new();
        for (matchup, [player_0, player_1]) in games {
            let session = GameSession::new(&self.config, player_0, player_1)
                .with_labels(&matchup.0, &matchup.1);
            let shutdown = shutdown.clone();
            sessions.spawn(async move {
                let outcome = session.play(&shutdown).await;
                (matchup, outcome)
            });
        }

        let mut results = Vec::new();
        let mut failed = 0;
        while let Some(joined) = sessions.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("Game session in round {} failed: {}", round, e);
                    failed += 1;
                }
            }
        }

        let mut report = self.score(round, results);
        report.failed = failed;
        info!(
            "Finished round {}: {} scored, {} aborted, {} failed",
            round, report.scored, report.aborted, report.failed
        );
        Some(report)
    }

    /// Fold finished games into the player records. Aborted games are skipped.
    fn score(&self, round: usize, results: Vec<(Matchup, GameOutcome)>) -> RoundReport {
        let mut report = RoundReport {
            round,
            scored: 0,
            aborted: 0,
            failed: 0,
        };
        let mut registry = self.registry();
        for ((name_0, name_1), outcome) in results {
            let Some(winner) = outcome.winner() else {
                report.aborted += 1;
                continue;
            };
            let (winner_name, loser_name) = if winner == 0 {
                (name_0, name_1)
            } else {
                (name_1, name_0)
            };
            if let Some(info) = registry.get_mut(&winner_name) {
                info.record(&loser_name, true);
            }
            if let Some(info) = registry.get_mut(&loser_name) {
                info.record(&winner_name, false);
            }
            report.scored += 1;
        }
        report
    }

    /// Play rounds until `shutdown` is triggered, pausing between rounds.
    pub async fn run(&self, shutdown: Shutdown) {
        while !shutdown.is_triggered() {
            if self.play_round(&shutdown).await.is_none() {
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(self.config.round_pause) => {}
                _ = shutdown.wait() => break,
            }
        }
        info!("Tournament stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RandomPlayer;
    use std::sync::Arc;

    #[test]
    fn win_rate_is_zero_without_games() {
        let info = PlayerInfo::new(Arc::new(RandomPlayer::with_seed(1)));
        assert_eq!(info.win_rate(), 0.0);
    }

    #[test]
    fn record_updates_counts_and_history() {
        let mut info = PlayerInfo::new(Arc::new(RandomPlayer::with_seed(1)));
        info.record("bob", true);
        info.record("carol", false);
        info.record("dave", true);
        assert_eq!((info.wins, info.losses, info.games), (2, 1, 3));
        assert!((info.win_rate() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            info.previous_matchups[1],
            MatchRecord {
                opponent: "carol".to_string(),
                won: false
            }
        );
    }
}
