//! # Colony Core
//!
//! Simulation core for the pixel-colonies territorial game.
//!
//! Up to four colonies of pixel units compete on a bounded grid for food
//! and gold, fight on contact, and spend gold on persistent upgrades
//! between timed rounds. This crate contains **only** the simulation:
//! - No rendering
//! - No IO
//! - No wall-clock time (callers drive a virtual clock)
//! - No system randomness (a seeded PRNG is part of the game state)
//!
//! This separation enables:
//! - Headless AI-vs-AI runs and CI verification
//! - Reproducible games from a config seed
//! - A thin rendering/UI layer that only polls state and invokes
//!   operations
//!
//! ## Crate Structure
//!
//! - [`grid`] - bounded coordinate space
//! - [`tiles`] - food/gold resource field
//! - [`colony`] - pixel and colony state
//! - [`upgrades`] - upgrade kinds, costs and level bookkeeping
//! - [`movement`] - movement & targeting engine
//! - [`combat`] - same-cell combat resolution
//! - [`economy`] - purchases, pending flush, interest
//! - [`ai`] - autonomous purchasing and priority selection
//! - [`artillery`] - bombardment subsystem
//! - [`scheduler`] - cooperative virtual-time scheduler
//! - [`rounds`] - round/win state machine
//! - [`game`] - the owned simulation-state object

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod artillery;
pub mod colony;
pub mod combat;
pub mod config;
pub mod economy;
pub mod error;
pub mod game;
pub mod grid;
pub mod movement;
pub mod rounds;
pub mod scheduler;
pub mod tiles;
pub mod upgrades;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::colony::{
        ArtilleryTarget, Colony, ColonyColor, ColonyStatus, Pixel, Priority,
    };
    pub use crate::config::GameConfig;
    pub use crate::error::{GameError, Result};
    pub use crate::game::Game;
    pub use crate::grid::{Grid, GridPos, COLONY_COUNT};
    pub use crate::rounds::{Outcome, Phase};
    pub use crate::tiles::ResourceField;
    pub use crate::upgrades::{UpgradeKind, UpgradeLevels};
}
