//! # Colony Headless
//!
//! Headless runner for the pixel-colonies simulation: drives games over
//! virtual time with no rendering, for AI-vs-AI playtesting, balance
//! batches and CI verification.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod runner;
pub mod scenario;

pub use batch::{run_batch, BatchConfig, BatchSummary};
pub use runner::{run_game, GameSummary, RunOptions};
pub use scenario::{Scenario, ScenarioError};
