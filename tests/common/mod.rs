#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use battleship_tournament::{
    Board, Call, Coordinate, GuessResult, Orientation, RandomPlayer, RemotePlayer, Shutdown,
};

/// What a [`TestPlayer`] does wrong, and on which call.
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Slow(Call, Duration),
    Fail(Call),
    /// Returns a board holding a single 2-length ship.
    BadFleet,
    /// Returns a correctly stocked board of the wrong size.
    WrongSize,
}

/// Random player with an optional injected fault that counts its calls.
pub struct TestPlayer {
    inner: RandomPlayer,
    fault: Option<Fault>,
    get_moves: AtomicUsize,
    notifications: AtomicUsize,
}

impl TestPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: RandomPlayer::with_seed(seed),
            fault: None,
            get_moves: AtomicUsize::new(0),
            notifications: AtomicUsize::new(0),
        }
    }

    pub fn with_fault(seed: u64, fault: Fault) -> Self {
        Self {
            fault: Some(fault),
            ..Self::new(seed)
        }
    }

    pub fn get_moves(&self) -> usize {
        self.get_moves.load(Ordering::SeqCst)
    }

    pub fn notifications(&self) -> usize {
        self.notifications.load(Ordering::SeqCst)
    }

    async fn inject(&self, call: Call) -> anyhow::Result<()> {
        match self.fault {
            Some(Fault::Slow(c, delay)) if c == call => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            Some(Fault::Fail(c)) if c == call => Err(anyhow::anyhow!("{} failed on purpose", call)),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl RemotePlayer for TestPlayer {
    async fn ping(&self) -> anyhow::Result<()> {
        self.inject(Call::Ping).await
    }

    async fn new_game(&self, fleet: &[usize], size: usize) -> anyhow::Result<Board> {
        self.inject(Call::NewGame).await?;
        match self.fault {
            Some(Fault::BadFleet) => {
                let mut board = Board::new(size);
                board.place_ship(Coordinate::new(0, 0), 2, Orientation::Horizontal);
                Ok(board)
            }
            Some(Fault::WrongSize) => self.inner.new_game(fleet, size + 1).await,
            _ => self.inner.new_game(fleet, size).await,
        }
    }

    async fn get_move(&self) -> anyhow::Result<Coordinate> {
        self.get_moves.fetch_add(1, Ordering::SeqCst);
        self.inject(Call::GetMove).await?;
        self.inner.get_move().await
    }

    async fn notify_result(&self, _pos: Coordinate, _result: GuessResult) -> anyhow::Result<()> {
        self.notifications.fetch_add(1, Ordering::SeqCst);
        self.inject(Call::NotifyResult).await
    }

    async fn notify_move(&self, _pos: Coordinate) -> anyhow::Result<()> {
        self.notifications.fetch_add(1, Ordering::SeqCst);
        self.inject(Call::NotifyMove).await
    }
}

/// Calls made against a pair of [`RecordingPlayer`]s, in order, tagged with the seat.
pub type CallLog = Arc<Mutex<Vec<(usize, Call)>>>;

/// Random player that appends every call it receives to a shared log.
pub struct RecordingPlayer {
    seat: usize,
    inner: RandomPlayer,
    log: CallLog,
    /// Trigger this shutdown on the n-th `notify_move`.
    stop_at: Option<(usize, Shutdown)>,
}

impl RecordingPlayer {
    pub fn new(seat: usize, seed: u64, log: CallLog) -> Self {
        Self {
            seat,
            inner: RandomPlayer::with_seed(seed),
            log,
            stop_at: None,
        }
    }

    pub fn stopping_at(mut self, notify_move: usize, shutdown: Shutdown) -> Self {
        self.stop_at = Some((notify_move, shutdown));
        self
    }

    /// Record `call` and return how many times this seat has now received it.
    fn record(&self, call: Call) -> usize {
        let mut log = self.log.lock().unwrap();
        log.push((self.seat, call));
        log.iter().filter(|&&entry| entry == (self.seat, call)).count()
    }
}

#[async_trait::async_trait]
impl RemotePlayer for RecordingPlayer {
    async fn ping(&self) -> anyhow::Result<()> {
        self.record(Call::Ping);
        Ok(())
    }

    async fn new_game(&self, fleet: &[usize], size: usize) -> anyhow::Result<Board> {
        self.record(Call::NewGame);
        self.inner.new_game(fleet, size).await
    }

    async fn get_move(&self) -> anyhow::Result<Coordinate> {
        self.record(Call::GetMove);
        self.inner.get_move().await
    }

    async fn notify_result(&self, _pos: Coordinate, _result: GuessResult) -> anyhow::Result<()> {
        self.record(Call::NotifyResult);
        Ok(())
    }

    async fn notify_move(&self, _pos: Coordinate) -> anyhow::Result<()> {
        let count = self.record(Call::NotifyMove);
        if let Some((n, shutdown)) = &self.stop_at {
            if count == *n {
                shutdown.trigger();
            }
        }
        Ok(())
    }
}
