//! Property-based testing strategies.

use proptest::prelude::*;

use colony_core::colony::Priority;
use colony_core::grid::GridPos;
use colony_core::upgrades::UpgradeKind;

/// Any upgrade kind.
pub fn upgrade_kind() -> impl Strategy<Value = UpgradeKind> {
    proptest::sample::select(UpgradeKind::ALL.to_vec())
}

/// Any priority, including `None`.
pub fn priority() -> impl Strategy<Value = Priority> {
    proptest::sample::select(vec![
        Priority::None,
        Priority::Food,
        Priority::Gold,
        Priority::EnemyPixel,
    ])
}

/// A position within the given grid dimensions.
pub fn grid_pos(width: i32, height: i32) -> impl Strategy<Value = GridPos> {
    (0..width, 0..height).prop_map(|(x, y)| GridPos::new(x, y))
}
