//! One game between two remote players.
//!
//! A session asks both players for a board, then drives a [`Game`] through
//! a fixed call sequence:
//!
//! ```text
//! Move(0) -> NotifyResult(0) -> NotifyMove(1) -> Move(1) -> NotifyResult(1) -> NotifyMove(0) -> Move(0) ...
//! ```
//!
//! The winner is checked after every `NotifyResult`. A call that times out,
//! fails or panics ends the game at once with the other player as winner.
//! Shutdown is checked before every move.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, warn};

use crate::{
    board::Board,
    common::GuessResult,
    config::TournamentConfig,
    coord::Coordinate,
    game::Game,
    player::{timed, Call, CallError, PlayerHandle},
    shutdown::Shutdown,
};

/// Why a player lost by forfeit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForfeitReason {
    Timeout(Call),
    Failed(Call, String),
    /// `new_game` returned a board that does not match the requested fleet or size.
    InvalidBoard {
        expected: Vec<usize>,
        got: Vec<usize>,
        size: usize,
    },
}

impl From<CallError> for ForfeitReason {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Timeout(call) => ForfeitReason::Timeout(call),
            CallError::Failed(call, e) => ForfeitReason::Failed(call, e.to_string()),
        }
    }
}

impl fmt::Display for ForfeitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForfeitReason::Timeout(call) => write!(f, "{} timed out", call),
            ForfeitReason::Failed(call, e) => write!(f, "{} raised exception {}", call, e),
            ForfeitReason::InvalidBoard {
                expected,
                got,
                size,
            } => write!(
                f,
                "returned an invalid board (fleet {:?}, size {}; expected fleet {:?})",
                got, size, expected
            ),
        }
    }
}

/// The player in `seat` forfeited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forfeit {
    pub seat: usize,
    pub reason: ForfeitReason,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// `winner` sank the opponent's whole fleet.
    Sunk { winner: usize },
    Forfeit(Forfeit),
    /// Shutdown was observed before the game finished. Not scored.
    Aborted,
}

impl GameOutcome {
    /// Index of the winning seat, or `None` for an aborted game.
    pub fn winner(&self) -> Option<usize> {
        match self {
            GameOutcome::Sunk { winner } => Some(*winner),
            GameOutcome::Forfeit(f) => Some(1 - f.seat),
            GameOutcome::Aborted => None,
        }
    }
}

/// Next step of the move exchange.
#[derive(Debug, Clone, Copy)]
enum Turn {
    Move(usize),
    NotifyResult {
        seat: usize,
        pos: Coordinate,
        result: GuessResult,
    },
    /// Tell `seat` where its opponent just fired.
    NotifyMove { seat: usize, pos: Coordinate },
}

/// Slot holding a copy of the game in progress, refreshed after every attack.
pub(crate) type GameSnapshot = Arc<Mutex<Option<Game>>>;

pub struct GameSession {
    players: [PlayerHandle; 2],
    labels: [String; 2],
    fleet: Vec<usize>,
    board_size: usize,
    timeout: Duration,
    snapshot: Option<GameSnapshot>,
}

impl GameSession {
    pub fn new(config: &TournamentConfig, player_0: PlayerHandle, player_1: PlayerHandle) -> Self {
        Self {
            players: [player_0, player_1],
            labels: [String::from("Player 0"), String::from("Player 1")],
            fleet: config.fleet.clone(),
            board_size: config.board_size,
            timeout: config.call_timeout,
            snapshot: None,
        }
    }

    /// Names used in diagnostics instead of the seat numbers.
    pub fn with_labels(mut self, player_0: &str, player_1: &str) -> Self {
        self.labels = [player_0.to_string(), player_1.to_string()];
        self
    }

    pub(crate) fn with_snapshot(mut self, snapshot: GameSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub(crate) fn labels(&self) -> &[String; 2] {
        &self.labels
    }

    fn publish(&self, game: &Game) {
        if let Some(slot) = &self.snapshot {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(game.clone());
        }
    }

    /// Play the game to completion. Never fails: every failure becomes a forfeit.
    pub async fn play(&self, shutdown: &Shutdown) -> GameOutcome {
        let game = match self.setup().await {
            Ok(game) => game,
            Err(forfeit) => return self.forfeit(forfeit),
        };
        match self.exchange(game, shutdown).await {
            Ok(outcome) => outcome,
            Err(forfeit) => self.forfeit(forfeit),
        }
    }

    fn forfeit(&self, forfeit: Forfeit) -> GameOutcome {
        warn!(
            "{} {}, {} wins.",
            self.labels[forfeit.seat],
            forfeit.reason,
            self.labels[1 - forfeit.seat]
        );
        GameOutcome::Forfeit(forfeit)
    }

    /// Invoke `op` on the player in `seat` under the call timeout.
    async fn call<T, F, Fut>(&self, seat: usize, call: Call, op: F) -> Result<T, Forfeit>
    where
        T: Send + 'static,
        F: FnOnce(PlayerHandle) -> Fut,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        timed(self.timeout, call, op(self.players[seat].clone()))
            .await
            .map_err(|e| Forfeit {
                seat,
                reason: e.into(),
            })
    }

    /// Request boards from player 0, then player 1.
    async fn setup(&self) -> Result<Game, Forfeit> {
        let board_0 = self.request_board(0).await?;
        let board_1 = self.request_board(1).await?;
        let game = Game::new(board_0, board_1);
        self.publish(&game);
        Ok(game)
    }

    async fn request_board(&self, seat: usize) -> Result<Board, Forfeit> {
        let fleet = self.fleet.clone();
        let size = self.board_size;
        let board = self
            .call(seat, Call::NewGame, move |p| async move {
                p.new_game(&fleet, size).await
            })
            .await?;
        if board.size() != self.board_size || !board.has_fleet(&self.fleet) {
            let mut expected = self.fleet.clone();
            expected.sort_unstable();
            return Err(Forfeit {
                seat,
                reason: ForfeitReason::InvalidBoard {
                    expected,
                    got: board.ship_lengths(),
                    size: board.size(),
                },
            });
        }
        Ok(board)
    }

    async fn exchange(&self, mut game: Game, shutdown: &Shutdown) -> Result<GameOutcome, Forfeit> {
        let mut turn = Turn::Move(0);
        loop {
            turn = match turn {
                Turn::Move(seat) => {
                    if shutdown.is_triggered() {
                        return Ok(GameOutcome::Aborted);
                    }
                    if seat == 0 {
                        tokio::task::yield_now().await;
                    }
                    let pos = self
                        .call(seat, Call::GetMove, |p| async move { p.get_move().await })
                        .await?;
                    let result = game.attack(seat, pos);
                    self.publish(&game);
                    debug!("{} attacked {}: {}", self.labels[seat], pos, result);
                    Turn::NotifyResult { seat, pos, result }
                }
                Turn::NotifyResult { seat, pos, result } => {
                    self.call(seat, Call::NotifyResult, move |p| async move {
                        p.notify_result(pos, result).await
                    })
                    .await?;
                    if let Some(winner) = game.check_winner() {
                        return Ok(GameOutcome::Sunk { winner });
                    }
                    Turn::NotifyMove {
                        seat: 1 - seat,
                        pos,
                    }
                }
                Turn::NotifyMove { seat, pos } => {
                    self.call(seat, Call::NotifyMove, move |p| async move {
                        p.notify_move(pos).await
                    })
                    .await?;
                    Turn::Move(seat)
                }
            };
        }
    }
}
