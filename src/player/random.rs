use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{random_fleet, RemotePlayer};
use crate::{board::Board, coord::Coordinate};

/// Player that places its fleet at random and attacks untried cells in
/// random order.
pub struct RandomPlayer {
    state: Mutex<State>,
}

struct State {
    rng: SmallRng,
    untried: Vec<Coordinate>,
}

impl RandomPlayer {
    pub fn new() -> Self {
        let mut seed_rng = rand::rng();
        Self::from_rng(SmallRng::from_rng(&mut seed_rng))
    }

    /// Fix the RNG seed for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            state: Mutex::new(State {
                rng,
                untried: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RemotePlayer for RandomPlayer {
    async fn new_game(&self, fleet: &[usize], size: usize) -> anyhow::Result<Board> {
        let mut state = self.state();
        let State { rng, untried } = &mut *state;
        *untried = (0..size)
            .flat_map(|r| (0..size).map(move |c| Coordinate::new(r, c)))
            .collect();
        untried.shuffle(rng);
        random_fleet(rng, fleet, size)
    }

    async fn get_move(&self) -> anyhow::Result<Coordinate> {
        self.state()
            .untried
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no untried cells left"))
    }
}
