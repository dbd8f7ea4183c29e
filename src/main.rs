//! Stellar Dominion - Entry Point
//!
//! Headless runner for the simulation kernel: builds or loads a session,
//! advances it, and optionally drops into a small interactive loop for
//! poking at the state tick by tick.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use stellar_dominion::core::types::ResourceKind;
use stellar_dominion::persistence;
use stellar_dominion::sim::{advance_simulation, advance_tick};
use stellar_dominion::{GameConfig, GameSession};

#[derive(Parser, Debug)]
#[command(name = "stellar-dominion", about = "Deterministic space-strategy simulation kernel")]
struct Cli {
    /// TOML config file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Galaxy seed for a fresh session
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Ticks to simulate before printing the summary
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Resume from a saved snapshot instead of starting fresh
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write a snapshot here after simulating
    #[arg(long)]
    save: Option<PathBuf>,

    /// Drop into the interactive loop after the initial run
    #[arg(long)]
    interactive: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stellar_dominion=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::standard(),
    };

    let session = match &cli.load {
        Some(path) => persistence::load_from_file(path)?,
        None => GameSession::new(&config, cli.seed),
    };

    tracing::info!(seed = cli.seed, ticks = cli.ticks, "simulating");
    let mut session = advance_simulation(&session, cli.ticks, &config);
    display_status(&session);

    if cli.interactive {
        run_interactive(&mut session, &config)?;
    }

    if let Some(path) = &cli.save {
        persistence::save_to_file(&session, path)?;
    }
    Ok(())
}

fn run_interactive(
    session: &mut GameSession,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== STELLAR DOMINION ===");
    println!("Commands:");
    println!("  tick / t     - Advance one tick");
    println!("  run <n>      - Advance n ticks");
    println!("  status / s   - Show session status");
    println!("  events       - Show recent events");
    println!("  quit / q     - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "" => continue,
            "quit" | "q" => break,
            "tick" | "t" => {
                advance_tick(session, config);
                display_status(session);
            }
            "status" | "s" => display_status(session),
            "events" => {
                for event in session.events.iter().rev().take(10) {
                    println!("  [tick {}] {:?}", event.tick, event.kind);
                }
            }
            other => {
                if let Some(n) = other.strip_prefix("run ").and_then(|n| n.parse::<u64>().ok()) {
                    *session = advance_simulation(session, n, config);
                    display_status(session);
                } else {
                    println!("Unknown command: {other}");
                }
            }
        }
    }
    Ok(())
}

fn display_status(session: &GameSession) {
    let ships: usize = session.fleets.iter().map(|f| f.ships.len()).sum();
    let at_war = session.empires.iter().filter(|e| e.at_war()).count();
    println!(
        "tick {} | planets {} | fleets {} ({} ships) | wars {} | era {}",
        session.clock.tick,
        session.economy.planets.len(),
        session.fleets.len(),
        ships,
        at_war,
        session.research.current_era,
    );
    for kind in ResourceKind::ALL {
        print!("  {:?}: {:.1}", kind, session.economy.amount(kind));
    }
    println!();
}
