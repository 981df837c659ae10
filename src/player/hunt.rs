use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{random_fleet, RemotePlayer};
use crate::{board::Board, common::GuessResult, coord::Coordinate};

/// Hunt/target player.
///
/// Fires at random untried cells until a hit lands, then works through the
/// orthogonal neighbours of every hit before going back to hunting.
pub struct HuntPlayer {
    state: Mutex<State>,
}

struct State {
    rng: SmallRng,
    size: usize,
    hunt: Vec<Coordinate>,
    targets: Vec<Coordinate>,
    tried: HashSet<Coordinate>,
}

impl State {
    fn next_move(&mut self) -> Option<Coordinate> {
        while let Some(pos) = self.targets.pop().or_else(|| self.hunt.pop()) {
            if self.tried.insert(pos) {
                return Some(pos);
            }
        }
        None
    }
}

impl HuntPlayer {
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
                size: 0,
                hunt: Vec::new(),
                targets: Vec::new(),
                tried: HashSet::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HuntPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RemotePlayer for HuntPlayer {
    async fn new_game(&self, fleet: &[usize], size: usize) -> anyhow::Result<Board> {
        let mut state = self.state();
        let State {
            rng,
            size: board_size,
            hunt,
            targets,
            tried,
        } = &mut *state;
        *board_size = size;
        targets.clear();
        tried.clear();
        *hunt = (0..size)
            .flat_map(|r| (0..size).map(move |c| Coordinate::new(r, c)))
            .collect();
        hunt.shuffle(rng);
        random_fleet(rng, fleet, size)
    }

    async fn get_move(&self) -> anyhow::Result<Coordinate> {
        self.state()
            .next_move()
            .ok_or_else(|| anyhow::anyhow!("no untried cells left"))
    }

    async fn notify_result(&self, pos: Coordinate, result: GuessResult) -> anyhow::Result<()> {
        if result == GuessResult::Hit {
            let mut state = self.state();
            let size = state.size;
            let fresh: Vec<Coordinate> = pos
                .neighbours(size)
                .filter(|n| !state.tried.contains(n))
                .collect();
            state.targets.extend(fresh);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn targets_neighbours_after_a_hit() {
        let player = HuntPlayer::with_seed(5);
        player.new_game(&[2], 5).await.unwrap();

        let first = player.get_move().await.unwrap();
        player.notify_result(first, GuessResult::Hit).await.unwrap();

        let next = player.get_move().await.unwrap();
        let expected: Vec<Coordinate> = first.neighbours(5).collect();
        assert!(expected.contains(&next));
    }

    #[tokio::test]
    async fn covers_the_whole_board_once() {
        let player = HuntPlayer::with_seed(9);
        player.new_game(&[2], 3).await.unwrap();
        let mut seen = HashSet::new();
        for _ in 0..9 {
            let pos = player.get_move().await.unwrap();
            player.notify_result(pos, GuessResult::Hit).await.unwrap();
            assert!(seen.insert(pos));
        }
        assert!(player.get_move().await.is_err());
    }
}
