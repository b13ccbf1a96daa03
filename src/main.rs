#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use seabattle::{
    init_logging, notation, sim, ChannelRef, PlayerId, RegistryError, RuleVariant, SeededBoards,
    SessionRegistry, ShotOutcome,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[arg(long, value_enum, default_value_t = RuleVariant::Classic, global = true)]
    rules: RuleVariant,
    #[arg(long, help = "Fix RNG seed for reproducible boards (e.g., --seed 12345)", global = true)]
    seed: Option<u64>,
    #[arg(long, help = "Runtime worker threads (defaults to one per core)", global = true)]
    workers: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play one automated match and print its summary.
    Local,
    /// Run many automated matches concurrently on one registry.
    Sim {
        #[arg(long, default_value_t = 100)]
        games: usize,
    },
    /// Two players take turns at one terminal, entering moves like `c 7`.
    Hotseat,
}

#[cfg(feature = "std")]
fn registry_for(cli: &Cli) -> SessionRegistry {
    let rules = cli.rules.rules();
    match cli.seed {
        Some(seed) => SessionRegistry::with_source(SeededBoards::new(rules, seed)),
        None => SessionRegistry::new(rules),
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = cli.workers {
        if workers == 0 {
            return Err(anyhow::anyhow!("--workers must be at least 1"));
        }
        runtime.worker_threads(workers);
    }
    runtime.enable_all().build()?.block_on(run(cli))
}

#[cfg(feature = "std")]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = Arc::new(registry_for(&cli));

    match cli.command {
        Commands::Local => {
            let summaries = sim::run_matches(registry, 1, cli.seed).await?;
            for s in summaries {
                println!("{}", serde_json::to_string_pretty(&s)?);
            }
        }
        Commands::Sim { games } => {
            let summaries = sim::run_matches(registry, games, cli.seed).await?;
            let creator_wins = summaries
                .iter()
                .filter(|s| s.winner == s.key.player1)
                .count();
            let shots: usize = summaries.iter().map(|s| s.shots[0] + s.shots[1]).sum();
            let average_shots = shots as f64 / summaries.len().max(1) as f64;
            let result = serde_json::json!({
                "games": summaries.len(),
                "creator_wins": creator_wins,
                "joiner_wins": summaries.len() - creator_wins,
                "average_shots": average_shots,
            });
            println!("{}", serde_json::to_string(&result)?);
        }
        Commands::Hotseat => hotseat(&registry)?,
    }
    Ok(())
}

#[cfg(feature = "std")]
fn hotseat(registry: &SessionRegistry) -> anyhow::Result<()> {
    let (p1, p2) = (PlayerId(1), PlayerId(2));
    let token = registry.create_waiting(p1, ChannelRef(1))?;
    let key = registry.join_waiting(token, p2, ChannelRef(2))?;
    println!("Game {} started. Enter moves as a row letter a-j and a column digit, e.g. 'c 7'.", key);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let Some(player) = registry.current_turn(key)? else {
            return Ok(());
        };
        print!("Player {} > ", player);
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            println!();
            return Ok(());
        };
        let (x, y) = match notation::decode(&line) {
            Ok(coord) => coord,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match registry.apply_shot(key, player, x, y) {
            Ok(result) if result.win => {
                println!("Hit, ship sunk. Player {} wins!", player);
                return Ok(());
            }
            Ok(result) => match (result.outcome, result.sunk) {
                (ShotOutcome::Hit, true) => println!("Hit, ship sunk! Go again."),
                (ShotOutcome::Hit, false) => println!("Hit! Go again."),
                (ShotOutcome::Miss, _) => println!("Miss."),
            },
            Err(e @ (RegistryError::AlreadyShot { .. } | RegistryError::OutOfRange { .. })) => {
                println!("{}", e);
            }
            Err(e) => return Err(anyhow::anyhow!(e)),
        }
    }
}
