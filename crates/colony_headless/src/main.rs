//! Headless colony game runner.
//!
//! Runs the simulation without graphics for AI playtesting, balance
//! batches and CI verification.
//!
//! # Usage
//!
//! ```bash
//! # Run a single game and print its summary
//! cargo run -p colony_headless -- run --seed 42
//!
//! # Run a scenario file with per-round snapshots
//! cargo run -p colony_headless -- run --scenario scenarios/free_for_all.ron --snapshots
//!
//! # Run a balance batch
//! cargo run -p colony_headless -- batch --count 200 --seed-start 0
//!
//! # Verify determinism by running the same seed multiple times
//! cargo run -p colony_headless -- verify --seed 12345 --runs 5
//! ```
//!
//! Output (stdout): JSON, one document per line.
//! Logs (stderr): human-readable tracing output.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colony_headless::batch::{run_batch, BatchConfig};
use colony_headless::runner::{run_game, RunOptions};
use colony_headless::scenario::Scenario;

#[derive(Parser)]
#[command(name = "colony_headless")]
#[command(about = "Headless colony simulation runner for AI testing and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single game
    Run {
        /// Scenario file to load (RON); defaults to the built-in
        /// free-for-all
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Seed for this run
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Emit a JSON snapshot at every round boundary
        #[arg(long)]
        snapshots: bool,
    },

    /// Run a batch of games for balance testing
    Batch {
        /// Scenario file to load (RON)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Number of games to run
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Starting random seed
        #[arg(long, default_value = "0")]
        seed_start: u64,
    },

    /// Verify determinism by running the same seed multiple times
    Verify {
        /// Scenario file to load (RON)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Seed to verify
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Number of verification runs
        #[arg(short, long, default_value = "5")]
        runs: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging to stderr; stdout is for JSON output.
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            seed,
            snapshots,
        } => cmd_run(scenario, seed, snapshots),
        Commands::Batch {
            scenario,
            count,
            seed_start,
        } => cmd_batch(scenario, count, seed_start),
        Commands::Verify {
            scenario,
            seed,
            runs,
        } => cmd_verify(scenario, seed, runs),
    }
}

/// Load a scenario file, or fall back to the default free-for-all.
fn load_scenario(path: Option<PathBuf>) -> Result<Scenario, ExitCode> {
    match path {
        Some(path) => Scenario::load(&path).map_err(|error| {
            tracing::error!(%error, path = %path.display(), "failed to load scenario");
            ExitCode::FAILURE
        }),
        None => Ok(Scenario::default()),
    }
}

fn cmd_run(scenario: Option<PathBuf>, seed: u64, snapshots: bool) -> ExitCode {
    let scenario = match load_scenario(scenario) {
        Ok(scenario) => scenario,
        Err(code) => return code,
    };
    let summary = run_game(
        &scenario,
        &RunOptions {
            seed,
            snapshot_rounds: snapshots,
        },
    );
    print_json(&summary)
}

fn cmd_batch(scenario: Option<PathBuf>, count: u32, seed_start: u64) -> ExitCode {
    let scenario = match load_scenario(scenario) {
        Ok(scenario) => scenario,
        Err(code) => return code,
    };
    let summary = run_batch(&BatchConfig {
        game_count: count,
        seed_start,
        scenario,
    });
    print_json(&summary)
}

fn cmd_verify(scenario: Option<PathBuf>, seed: u64, runs: u32) -> ExitCode {
    let scenario = match load_scenario(scenario) {
        Ok(scenario) => scenario,
        Err(code) => return code,
    };
    let options = RunOptions {
        seed,
        snapshot_rounds: false,
    };
    let mut hashes = Vec::new();
    for _ in 0..runs.max(1) {
        hashes.push(run_game(&scenario, &options).state_hash);
    }
    let deterministic = hashes.windows(2).all(|pair| pair[0] == pair[1]);
    if deterministic {
        tracing::info!(seed, runs, "determinism verified");
        ExitCode::SUCCESS
    } else {
        tracing::error!(seed, ?hashes, "simulation diverged between runs");
        ExitCode::FAILURE
    }
}

/// Print a JSON document on stdout; failures are logged, not fatal.
fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "failed to serialize output");
            ExitCode::FAILURE
        }
    }
}
