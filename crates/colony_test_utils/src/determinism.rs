//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the simulation produces
//! identical results given identical inputs.
//!
//! # Testing Strategy
//!
//! A whole game must be a pure function of its config (seed included)
//! and the sequence of operations applied to it. Sources of
//! non-determinism to watch for:
//!
//! - **System randomness**: every random draw must come from the
//!   game-owned seeded PRNG, never `thread_rng`.
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Simulation state lives in `Vec`s iterated by index.
//!
//! - **Scheduler ordering**: tasks due at the same instant must fire in
//!   creation order, not insertion-accident order.

use colony_core::config::GameConfig;
use colony_core::game::Game;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Final state hashes from each run.
    pub hashes: Vec<u64>,
    /// Virtual milliseconds simulated per run.
    pub simulated_ms: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic game).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the runs matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        assert!(
            self.is_deterministic,
            "simulation diverged across {} runs over {} ms: hashes {:?}",
            self.hashes.len(),
            self.simulated_ms,
            self.unique_hashes()
        );
    }
}

/// Run the same game `runs` times, advancing in `step_ms` increments for
/// `total_ms`, and compare final state hashes.
#[must_use]
pub fn run_identical_games(
    config: &GameConfig,
    num_human_players: usize,
    total_ms: u64,
    step_ms: u64,
    runs: usize,
) -> DeterminismResult {
    let hashes: Vec<u64> = (0..runs)
        .map(|_| {
            let mut game = Game::new(config.clone());
            game.initialize_round(num_human_players)
                .expect("valid player count");
            let mut elapsed = 0;
            while elapsed < total_ms {
                game.advance(step_ms.min(total_ms - elapsed));
                elapsed += step_ms;
            }
            game.state_hash()
        })
        .collect();

    let is_deterministic = hashes.windows(2).all(|pair| pair[0] == pair[1]);
    DeterminismResult {
        is_deterministic,
        hashes,
        simulated_ms: total_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::small_config;

    #[test]
    fn test_same_seed_is_deterministic() {
        let result = run_identical_games(&small_config(1234), 1, 15_000, 250, 3);
        result.assert_deterministic();
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = run_identical_games(&small_config(1), 1, 5_000, 100, 1);
        let b = run_identical_games(&small_config(2), 1, 5_000, 100, 1);
        assert_ne!(a.hashes, b.hashes);
    }
}
