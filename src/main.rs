#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_tournament::{
    init_logging, HuntPlayer, PlayerHandle, RandomPlayer, Series, Shutdown, Tournament,
    TournamentConfig,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run a round-robin tournament between built-in players and print the ranking.
    Tournament {
        #[arg(long, default_value_t = 8)]
        players: usize,
        #[arg(long, default_value_t = 2)]
        seconds: u64,
        #[arg(long, help = "Override the per-call timeout in milliseconds")]
        timeout_ms: Option<u64>,
        #[arg(long, help = "Fix RNG seed for reproducible players (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play a series of games between a random player and a hunting player.
    Game {
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn builtin_player(index: usize, seed: Option<u64>) -> PlayerHandle {
    let seed = seed.map(|s| s.wrapping_add(index as u64));
    match (index % 2, seed) {
        (0, Some(s)) => Arc::new(RandomPlayer::with_seed(s)),
        (0, None) => Arc::new(RandomPlayer::new()),
        (_, Some(s)) => Arc::new(HuntPlayer::with_seed(s)),
        (_, None) => Arc::new(HuntPlayer::new()),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut config = TournamentConfig::from_env();

    match cli.command {
        Commands::Tournament {
            players,
            seconds,
            timeout_ms,
            seed,
        } => {
            if let Some(ms) = timeout_ms {
                config = config.with_call_timeout(Duration::from_millis(ms));
            }
            let tournament = Arc::new(Tournament::new(config));
            for i in 0..players {
                let kind = if i % 2 == 0 { "random" } else { "hunt" };
                tournament
                    .register_player(builtin_player(i, seed), &format!("{}-{}", kind, i))
                    .await?;
            }

            let shutdown = Shutdown::new();
            let runner = {
                let tournament = tournament.clone();
                let shutdown = shutdown.clone();
                tokio::spawn(async move { tournament.run(shutdown).await })
            };
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            shutdown.trigger();
            runner.await?;

            println!("{}", serde_json::to_string_pretty(&tournament.players())?);
        }
        Commands::Game { games, seed } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (games will be reproducible)", s);
            }
            let series = Series::new(&config, builtin_player(0, seed), builtin_player(1, seed))
                .with_labels("random", "hunt");
            let [wins_0, wins_1] = series.play(Some(games), &Shutdown::new()).await;
            if let Some(game) = series.game_state() {
                println!("{}\n", game);
            }
            println!("Player 0 (random): {} wins", wins_0);
            println!("Player 1 (hunt): {} wins", wins_1);
        }
    }
    Ok(())
}
