use std::sync::Arc;

use battleship_tournament::{GameOutcome, RandomPlayer, Shutdown, Tournament, TournamentConfig};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let tournament = Tournament::new(TournamentConfig::from_env());
    let outcome = tournament
        .play_game(
            Arc::new(RandomPlayer::with_seed(seed1)),
            Arc::new(RandomPlayer::with_seed(seed2)),
            &Shutdown::new(),
        )
        .await;

    let reason = match &outcome {
        GameOutcome::Sunk { .. } => "sunk".to_string(),
        GameOutcome::Forfeit(f) => format!("player{} {}", f.seat, f.reason),
        GameOutcome::Aborted => "aborted".to_string(),
    };
    let result = json!({
        "winner": outcome.winner().map(|w| format!("player{}", w)),
        "reason": reason,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
