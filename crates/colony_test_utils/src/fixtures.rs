//! Test fixtures and helpers.
//!
//! Pre-built configurations and rigged games for consistent testing
//! across crates.

use colony_core::colony::{Colony, ColonyColor};
use colony_core::config::GameConfig;
use colony_core::game::Game;
use colony_core::grid::GridPos;

/// A compact, fast configuration for tests.
#[must_use]
pub fn small_config(seed: u64) -> GameConfig {
    GameConfig {
        grid_width: 40,
        grid_height: 30,
        round_duration_ms: 10_000,
        seed,
        ..GameConfig::default()
    }
}

/// A game on the small config, initialized with one human colony and
/// already Running.
#[must_use]
pub fn running_game(seed: u64) -> Game {
    let mut game = Game::new(small_config(seed));
    game.initialize_round(1)
        .expect("1 human player is always valid");
    game
}

/// Four pristine colonies, outside any game.
#[must_use]
pub fn pristine_colonies() -> Vec<Colony> {
    ColonyColor::ALL.iter().map(|&c| Colony::pristine(c)).collect()
}

/// Give a colony inside a game a gold balance.
///
/// # Panics
///
/// Panics if the colony index is out of range.
pub fn fund_colony(game: &mut Game, index: usize, gold: u32) {
    game.colony_mut(index).expect("colony index in range").gold = gold;
}

/// Shorthand position constructor for test tables.
#[must_use]
pub const fn pos(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}
