use std::sync::Arc;

use seabattle::{sim, RuleSet, SeededBoards, SessionRegistry};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let registry = Arc::new(SessionRegistry::with_source(SeededBoards::new(
        RuleSet::classic(),
        seed,
    )));
    let summaries = sim::run_matches(registry, 1, Some(seed)).await?;
    let summary = summaries
        .first()
        .ok_or_else(|| anyhow::anyhow!("no match was played"))?;

    let winner = if summary.winner == summary.key.player1 {
        "player1"
    } else {
        "player2"
    };
    let result = json!({
        "player1": {"shots": summary.shots[0], "hits": summary.hits[0]},
        "player2": {"shots": summary.shots[1], "hits": summary.hits[1]},
        "winner": winner,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
