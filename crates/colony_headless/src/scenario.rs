//! Scenario loading and configuration.
//!
//! Scenarios define the setup for headless runs: the simulation config,
//! how many colonies are nominally human (they receive no input and just
//! random-walk), starting gold rigging, and how many rounds to play
//! before calling the game a timeout.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use colony_core::config::GameConfig;
use colony_core::grid::COLONY_COUNT;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
}

/// A complete scenario configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Colonies assigned to "humans" (idle in headless runs); 1-4.
    pub num_human_players: usize,
    /// Rounds to play before declaring a timeout.
    pub max_rounds: u32,
    /// Starting gold per colony index, for rigged openings.
    pub starting_gold: Vec<u32>,
    /// Simulation parameters (the seed is typically overridden per run).
    pub config: GameConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "free_for_all".to_string(),
            description: "Four AI colonies on the default grid".to_string(),
            num_human_players: 1,
            max_rounds: 10,
            starting_gold: Vec::new(),
            config: GameConfig::default(),
        }
    }
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario = ron::from_str(&content)?;
        Ok(scenario)
    }

    /// Clamp obviously-broken fields into the playable range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.num_human_players = self.num_human_players.clamp(1, COLONY_COUNT);
        self.max_rounds = self.max_rounds.max(1);
        self.starting_gold.truncate(COLONY_COUNT);
        self
    }
}
