//! Drive a single game to completion over virtual time.
//!
//! The runner advances the simulation in coarse steps, auto-advances
//! upgrade phases (the headless stand-in for the "Start Next Round"
//! button) and reports a JSON-serializable summary. Logs go to stderr
//! via `tracing`; stdout is reserved for JSON output.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use colony_core::colony::ColonyStatus;
use colony_core::game::Game;
use colony_core::rounds::{Outcome, Phase};

use crate::scenario::Scenario;

/// Virtual time advanced per driver step. One movement tick at level 0
/// is 100 ms, so this stays well inside one round.
const STEP_MS: u64 = 250;

/// Options for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOptions {
    /// Seed for this run (overrides the scenario config's seed).
    pub seed: u64,
    /// Emit a JSON snapshot line at every round boundary.
    pub snapshot_rounds: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            snapshot_rounds: false,
        }
    }
}

/// How a headless game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEnd {
    /// The win condition fired.
    Finished(Outcome),
    /// The round limit was reached first.
    Timeout,
}

/// JSON-serializable result of one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    /// Scenario name.
    pub scenario: String,
    /// Seed the game ran with.
    pub seed: u64,
    /// How the game ended.
    pub end: GameEnd,
    /// Rounds that fully played out.
    pub rounds_played: u32,
    /// Virtual milliseconds simulated.
    pub elapsed_ms: u64,
    /// Final per-colony state.
    pub colonies: Vec<ColonyStatus>,
    /// Final state hash, for determinism verification.
    pub state_hash: u64,
}

/// Run one game under a scenario and return its summary.
///
/// # Panics
///
/// Panics if the sanitized scenario still carries an invalid player
/// count; [`Scenario::sanitized`] prevents that.
#[must_use]
pub fn run_game(scenario: &Scenario, options: &RunOptions) -> GameSummary {
    let scenario = scenario.clone().sanitized();
    let mut config = scenario.config.clone();
    config.seed = options.seed;

    let mut game = Game::new(config);
    game.initialize_round(scenario.num_human_players)
        .expect("sanitized scenario has a valid player count");
    for (index, &gold) in scenario.starting_gold.iter().enumerate() {
        if let Ok(colony) = game.colony_mut(index) {
            colony.gold = gold;
        }
    }

    info!(scenario = %scenario.name, seed = options.seed, "game start");

    let mut rounds_played = 0;
    let end = loop {
        game.advance(STEP_MS);
        match game.phase() {
            Phase::Running => {}
            Phase::UpgradePhase => {
                rounds_played += 1;
                debug!(rounds_played, "round complete");
                if options.snapshot_rounds {
                    emit_snapshot(&game, rounds_played);
                }
                if rounds_played >= scenario.max_rounds {
                    break GameEnd::Timeout;
                }
                game.begin_next_round();
            }
            Phase::GameOver(outcome) => break GameEnd::Finished(outcome),
            Phase::Setup => unreachable!("initialized game cannot re-enter setup"),
        }
    };

    info!(?end, rounds_played, elapsed_ms = game.now_ms(), "game end");

    GameSummary {
        scenario: scenario.name,
        seed: options.seed,
        end,
        rounds_played,
        elapsed_ms: game.now_ms(),
        colonies: game.statuses(),
        state_hash: game.state_hash(),
    }
}

/// One line of round-boundary state on stdout.
fn emit_snapshot(game: &Game, round: u32) {
    #[derive(Serialize)]
    struct Snapshot {
        round: u32,
        elapsed_ms: u64,
        colonies: Vec<ColonyStatus>,
        food_tiles: usize,
        gold_tiles: usize,
    }
    let snapshot = Snapshot {
        round,
        elapsed_ms: game.now_ms(),
        colonies: game.statuses(),
        food_tiles: game.field().food().len(),
        gold_tiles: game.field().gold().len(),
    };
    match serde_json::to_string(&snapshot) {
        Ok(line) => println!("{line}"),
        Err(error) => tracing::warn!(%error, "snapshot serialization failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_core::config::GameConfig;
    use colony_test_utils::fixtures::small_config;

    fn quick_scenario() -> Scenario {
        Scenario {
            max_rounds: 2,
            config: GameConfig {
                round_duration_ms: 5_000,
                ..small_config(0)
            },
            ..Scenario::default()
        }
    }

    #[test]
    fn test_run_game_terminates() {
        let summary = run_game(&quick_scenario(), &RunOptions::default());
        assert!(summary.rounds_played <= 2);
        assert_eq!(summary.colonies.len(), 4);
        assert!(summary.elapsed_ms > 0);
    }

    #[test]
    fn test_run_game_is_reproducible() {
        let options = RunOptions {
            seed: 42,
            snapshot_rounds: false,
        };
        let a = run_game(&quick_scenario(), &options);
        let b = run_game(&quick_scenario(), &options);
        assert_eq!(a.state_hash, b.state_hash);
        assert_eq!(a.rounds_played, b.rounds_played);
    }

    #[test]
    fn test_starting_gold_rigging() {
        let scenario = Scenario {
            starting_gold: vec![30],
            max_rounds: 1,
            config: GameConfig {
                round_duration_ms: 1_000,
                ..GameConfig::default()
            },
            ..Scenario::default()
        };
        let summary = run_game(&scenario, &RunOptions::default());
        // Colony 0 is human and idle: its rigged gold only grows
        // (collection, interest), it is never spent.
        assert!(summary.colonies[0].gold >= 30);
    }
}
