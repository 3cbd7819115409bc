//! Simulation configuration.
//!
//! Pure data: this module defines the tunable parameters of a game and
//! their defaults. File loading (RON scenarios) is handled by the headless
//! runner; the simulation core performs no IO.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Tunable parameters for one game.
///
/// `Default` matches the original tuning: 100 ms movement ticks, a
/// food/gold pair every 200 ms, 60 second rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid width in cells.
    pub grid_width: i32,
    /// Grid height in cells.
    pub grid_height: i32,
    /// Length of the Running phase in milliseconds.
    pub round_duration_ms: u64,
    /// Movement tick period at speed level 0.
    pub base_movement_period_ms: u64,
    /// Movement period reduction per speed level.
    pub movement_period_step_ms: u64,
    /// Floor for the movement tick period.
    pub min_movement_period_ms: u64,
    /// Period of the resource spawner (one food + one gold tile each fire).
    pub spawn_period_ms: u64,
    /// Pixels seeded per colony at starting-units level 0.
    pub base_starting_pixels: u32,
    /// Extra pixels seeded per starting-units level.
    pub starting_pixels_per_level: u32,
    /// Seed for the game's random source. Identical seeds and inputs
    /// reproduce identical games.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 200,
            grid_height: 150,
            round_duration_ms: 60_000,
            base_movement_period_ms: 100,
            movement_period_step_ms: 10,
            min_movement_period_ms: 30,
            spawn_period_ms: 200,
            base_starting_pixels: 10,
            starting_pixels_per_level: 5,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// The grid described by this config.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Movement tick period for a colony at the given speed level.
    #[must_use]
    pub fn movement_period_ms(&self, speed_level: u8) -> u64 {
        self.base_movement_period_ms
            .saturating_sub(self.movement_period_step_ms * u64::from(speed_level))
            .max(self.min_movement_period_ms)
    }

    /// Pixels seeded for a colony at the given starting-units level.
    #[must_use]
    pub fn starting_pixels(&self, starting_units_level: u8) -> u32 {
        self.base_starting_pixels + self.starting_pixels_per_level * u32::from(starting_units_level)
    }
}
