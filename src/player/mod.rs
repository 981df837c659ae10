//! Remote player capability and built-in implementations
//!
//! The tournament never sees a player's internals. Each player is an opaque
//! handle exposing the operations of [`RemotePlayer`], every one of which may
//! be slow or fail. This module provides:
//! - RemotePlayer: the capability contract
//! - RandomPlayer: random placement and random untried moves
//! - HuntPlayer: random hunting, then targets the neighbours of hits
//! - [`timed`]: runs one call under a timeout and classifies the failure

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;

use crate::{board::Board, common::GuessResult, coord::Coordinate};

/// Operations a tournament can invoke on a player.
///
/// Implementations use interior mutability: a handle is shared between the
/// scheduler and the game session currently using it.
#[async_trait::async_trait]
pub trait RemotePlayer: Send + Sync {
    /// Liveness check, used during registration.
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Reset for a new game and return a `size`×`size` board with exactly the
    /// ships of `fleet` placed.
    async fn new_game(&self, fleet: &[usize], size: usize) -> anyhow::Result<Board>;

    /// Choose the next coordinate to attack.
    async fn get_move(&self) -> anyhow::Result<Coordinate>;

    /// Inform the player of the result of its last attack.
    async fn notify_result(&self, _pos: Coordinate, _result: GuessResult) -> anyhow::Result<()> {
        Ok(())
    }

    /// Inform the player of the opponent's attack against its board.
    async fn notify_move(&self, _pos: Coordinate) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Shared handle to a player.
pub type PlayerHandle = Arc<dyn RemotePlayer>;

/// Names a remote operation, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Ping,
    NewGame,
    GetMove,
    NotifyResult,
    NotifyMove,
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Call::Ping => "ping",
            Call::NewGame => "new_game",
            Call::GetMove => "get_move",
            Call::NotifyResult => "notify_result",
            Call::NotifyMove => "notify_move",
        };
        f.write_str(s)
    }
}

/// A remote call that did not complete successfully.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("{0} timed out")]
    Timeout(Call),
    #[error("{0} raised: {1}")]
    Failed(Call, anyhow::Error),
}

impl CallError {
    pub fn call(&self) -> Call {
        match self {
            CallError::Timeout(call) | CallError::Failed(call, _) => *call,
        }
    }
}

/// Run `fut` as its own task for at most `limit`.
///
/// Timeouts, errors and panics are treated alike by callers; the distinction
/// is kept only for diagnostics. A task that overruns is aborted.
pub async fn timed<T, F>(limit: Duration, call: Call, fut: F) -> Result<T, CallError>
where
    T: Send + 'static,
    F: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    let mut task = tokio::spawn(fut);
    match tokio::time::timeout(limit, &mut task).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(CallError::Failed(call, e)),
        Ok(Err(e)) => Err(CallError::Failed(
            call,
            anyhow::anyhow!("panicked: {}", panic_message(e)),
        )),
        Err(_) => {
            task.abort();
            Err(CallError::Timeout(call))
        }
    }
}

fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string()),
        Err(err) => err.to_string(),
    }
}

pub mod hunt;
pub mod random;
pub use hunt::HuntPlayer;
pub use random::RandomPlayer;

/// Place every ship of `fleet` at random on a fresh board.
pub(crate) fn random_fleet<R: rand::Rng>(
    rng: &mut R,
    fleet: &[usize],
    size: usize,
) -> anyhow::Result<Board> {
    let mut board = Board::new(size);
    for &length in fleet {
        let (start, orientation) = board
            .random_placement(rng, length)
            .ok_or_else(|| anyhow::anyhow!("unable to place ship of length {}", length))?;
        board.place_ship(start, length, orientation);
    }
    Ok(board)
}
