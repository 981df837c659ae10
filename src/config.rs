//! Tournament settings.
//!
//! Settings are built programmatically with [`TournamentConfig::new()`] and
//! the `with_*` setters, or read from the environment with
//! [`TournamentConfig::from_env()`].
//!
//! # Environment Variables
//!
//! - `TOURNAMENT_BOARD_SIZE`: grid dimension (default: `10`)
//! - `TOURNAMENT_FLEET`: comma-separated ship lengths (default: `5,5,4,3,2`)
//! - `TOURNAMENT_TIMEOUT_MS`: timeout for every remote player call (default: `100`)
//! - `TOURNAMENT_ROUND_PAUSE_MS`: pause between rounds (default: `100`)
//!
//! Unset or unparsable values fall back to the defaults.

use alloc::vec::Vec;
use core::time::Duration;

pub const DEFAULT_BOARD_SIZE: usize = 10;
pub const DEFAULT_FLEET: [usize; 5] = [5, 5, 4, 3, 2];
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(100);
pub const DEFAULT_ROUND_PAUSE: Duration = Duration::from_millis(100);

/// Random placement gives up after this many tries.
pub(crate) const PLACEMENT_ATTEMPTS: usize = 100;

/// Settings shared by every game of a tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentConfig {
    pub(crate) board_size: usize,
    pub(crate) fleet: Vec<usize>,
    pub(crate) call_timeout: Duration,
    pub(crate) round_pause: Duration,
}

impl TournamentConfig {
    /// Default settings: 10×10 board, fleet `[5, 5, 4, 3, 2]`, 100 ms per
    /// remote call and 100 ms between rounds.
    pub fn new() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            fleet: DEFAULT_FLEET.to_vec(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            round_pause: DEFAULT_ROUND_PAUSE,
        }
    }

    /// Read settings from `TOURNAMENT_*` environment variables.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        fn env_parse<T: core::str::FromStr>(var: &str) -> Option<T> {
            std::env::var(var).ok()?.trim().parse().ok()
        }

        let defaults = Self::new();
        let fleet = std::env::var("TOURNAMENT_FLEET")
            .ok()
            .and_then(|s| parse_fleet(&s))
            .unwrap_or(defaults.fleet);

        Self {
            board_size: env_parse("TOURNAMENT_BOARD_SIZE").unwrap_or(defaults.board_size),
            fleet,
            call_timeout: env_parse("TOURNAMENT_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.call_timeout),
            round_pause: env_parse("TOURNAMENT_ROUND_PAUSE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.round_pause),
        }
    }

    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    pub fn with_fleet(mut self, fleet: &[usize]) -> Self {
        self.fleet = fleet.to_vec();
        self
    }

    /// Timeout applied to each remote player call, including the registration liveness check.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_round_pause(mut self, pause: Duration) -> Self {
        self.round_pause = pause;
        self
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    pub fn round_pause(&self) -> Duration {
        self.round_pause
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a comma-separated list of ship lengths. Empty lists and zero
/// lengths are rejected.
#[cfg_attr(not(feature = "std"), allow(dead_code))]
fn parse_fleet(s: &str) -> Option<Vec<usize>> {
    let fleet = s
        .split(',')
        .map(|part| part.trim().parse::<usize>().ok().filter(|&len| len > 0))
        .collect::<Option<Vec<_>>>()?;
    if fleet.is_empty() {
        None
    } else {
        Some(fleet)
    }
}
