//! Match simulator CLI: plays random legal matches through the engine.
//!
//! Runs entirely against the in-memory collaborators, so the numbers it
//! prints reflect the rules (board layout, perks, settlement) and nothing else.

mod simulator;
mod summary;
mod telemetry;

use std::time::Instant;

use clap::Parser;
use hunt_backend::domain::perks::PerkId;
use hunt_backend::domain::state::Side;
use hunt_backend::EngineConfig;
use simulator::{SimulationOptions, Simulator};
use summary::Summary;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Plays random Hunter vs Duck matches and reports outcome statistics")]
struct Args {
    /// Number of matches to play
    #[arg(short, long, default_value = "100")]
    games: u32,

    /// Level key from the catalog
    #[arg(short, long, default_value = "1")]
    level: u8,

    /// Base seed; match N uses seed + N (overrides HUNT_RNG_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Bet staked by each side
    #[arg(long, default_value = "50")]
    bet: i64,

    /// Perk granted to the Hunter before the first match (repeatable)
    #[arg(long = "hunter-perk", value_parser = parse_perk)]
    hunter_perks: Vec<PerkId>,

    /// Perk granted to the Duck before the first match (repeatable)
    #[arg(long = "duck-perk", value_parser = parse_perk)]
    duck_perks: Vec<PerkId>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_perk(raw: &str) -> Result<PerkId, String> {
    PerkId::ALL
        .into_iter()
        .find(|p| p.as_str() == raw)
        .ok_or_else(|| {
            let known: Vec<&str> = PerkId::ALL.iter().map(|p| p.as_str()).collect();
            format!("unknown perk '{raw}' (expected one of: {})", known.join(", "))
        })
}

fn check_sides(perks: &[PerkId], side: Side) -> Result<(), String> {
    match perks.iter().find(|p| p.side() != side) {
        Some(p) => Err(format!(
            "perk '{}' cannot be granted to the {}",
            p.as_str(),
            side.as_str()
        )),
        None => Ok(()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    telemetry::init_tracing(if args.verbose { "debug" } else { "warn" });

    check_sides(&args.hunter_perks, Side::Hunter)?;
    check_sides(&args.duck_perks, Side::Duck)?;

    let mut config = EngineConfig::from_env()?;
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    let options = SimulationOptions {
        level: args.level,
        bet: args.bet,
        hunter_perks: args.hunter_perks,
        duck_perks: args.duck_perks,
        seed: config.rng_seed,
    };
    let mut simulator = Simulator::new(config, options);

    info!(games = args.games, level = args.level, "Starting simulation");

    let start = Instant::now();
    let mut summary = Summary::new(args.level);

    for match_id in 1..=i64::from(args.games) {
        match simulator.play(match_id).await {
            Ok(result) => summary.record(&result),
            Err(e) => {
                warn!(match_id, error = %e, "Match failed");
                summary.record_error();
            }
        }
    }

    summary.finish(
        simulator.gold_deltas(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
