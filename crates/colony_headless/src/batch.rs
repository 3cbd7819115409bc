//! Batch game runner for balance testing.
//!
//! Runs many seeded games in parallel using rayon and tallies outcomes,
//! so upgrade-curve or artillery tuning changes can be judged across
//! hundreds of games instead of one anecdote.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use colony_core::colony::ColonyColor;
use colony_core::rounds::Outcome;

use crate::runner::{run_game, GameEnd, GameSummary, RunOptions};
use crate::scenario::Scenario;

/// Configuration for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of games to run.
    pub game_count: u32,
    /// Seed for the first game; game `i` uses `seed_start + i`.
    pub seed_start: u64,
    /// Scenario every game runs under.
    pub scenario: Scenario,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            game_count: 100,
            seed_start: 0,
            scenario: Scenario::default(),
        }
    }
}

/// Aggregated results of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Games run.
    pub total_games: u32,
    /// Wins per colony color, in colony-index order.
    pub wins: [u32; 4],
    /// Games where every colony fell simultaneously.
    pub draws: u32,
    /// Games that hit the round limit with 2+ survivors.
    pub timeouts: u32,
    /// Mean rounds played per game.
    pub avg_rounds: f64,
    /// Mean virtual milliseconds per game.
    pub avg_elapsed_ms: f64,
}

impl BatchSummary {
    /// Win rate for one colony index (0.0 to 1.0).
    #[must_use]
    pub fn win_rate(&self, index: usize) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        f64::from(self.wins[index]) / f64::from(self.total_games)
    }

    fn tally(summaries: &[GameSummary]) -> Self {
        let mut summary = BatchSummary {
            total_games: summaries.len() as u32,
            ..BatchSummary::default()
        };
        let mut rounds = 0u64;
        let mut elapsed = 0u64;
        for game in summaries {
            rounds += u64::from(game.rounds_played);
            elapsed += game.elapsed_ms;
            match game.end {
                GameEnd::Finished(Outcome::Winner(color)) => {
                    let index = ColonyColor::ALL
                        .iter()
                        .position(|&c| c == color)
                        .unwrap_or(0);
                    summary.wins[index] += 1;
                }
                GameEnd::Finished(Outcome::Draw) => summary.draws += 1,
                GameEnd::Timeout => summary.timeouts += 1,
            }
        }
        if !summaries.is_empty() {
            summary.avg_rounds = rounds as f64 / summaries.len() as f64;
            summary.avg_elapsed_ms = elapsed as f64 / summaries.len() as f64;
        }
        summary
    }
}

/// Run a batch of seeded games in parallel and aggregate the outcomes.
#[must_use]
pub fn run_batch(config: &BatchConfig) -> BatchSummary {
    let scenario = config.scenario.clone().sanitized();
    info!(
        scenario = %scenario.name,
        games = config.game_count,
        seed_start = config.seed_start,
        "batch start"
    );

    let summaries: Vec<GameSummary> = (0..config.game_count)
        .into_par_iter()
        .map(|index| {
            let options = RunOptions {
                seed: config.seed_start + u64::from(index),
                snapshot_rounds: false,
            };
            run_game(&scenario, &options)
        })
        .collect();

    let summary = BatchSummary::tally(&summaries);
    info!(
        wins = ?summary.wins,
        draws = summary.draws,
        timeouts = summary.timeouts,
        "batch complete"
    );
    summary
}
