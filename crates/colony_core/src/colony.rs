//! Colony and pixel state.
//!
//! A colony is the persistent aggregate: its pixels, gold, targeting
//! priority, permanent and pending upgrade levels, artillery target and
//! defeat flag. Pixels are the smallest agents; each occupies one grid
//! cell and keeps its own retarget counter.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::grid::{Grid, GridPos};
use crate::upgrades::{UpgradeKind, UpgradeLevels};

/// A single unit. Distinct identity even when coordinates coincide with
/// another pixel; collisions are resolved by combat, never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    /// Current cell. Always within grid bounds.
    pub pos: GridPos,
    /// Idle moves since the pixel last sought its priority target.
    pub retarget_counter: u32,
}

impl Pixel {
    /// Spawn a pixel at a cell with a fresh counter.
    #[must_use]
    pub const fn new(pos: GridPos) -> Self {
        Self {
            pos,
            retarget_counter: 0,
        }
    }
}

/// The four colony colors, by home-corner index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColonyColor {
    /// Colony 0, top-left corner.
    Red,
    /// Colony 1, top-right corner.
    Green,
    /// Colony 2, bottom-left corner.
    Purple,
    /// Colony 3, bottom-right corner.
    Blue,
}

impl ColonyColor {
    /// Colors in colony-index order.
    pub const ALL: [ColonyColor; 4] = [
        ColonyColor::Red,
        ColonyColor::Green,
        ColonyColor::Purple,
        ColonyColor::Blue,
    ];

    /// Lowercase name, as used in logs and UI styling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Blue => "blue",
        }
    }
}

/// Colony-wide targeting mode governing pixel movement bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Pure random walk; retarget counters never advance.
    #[default]
    None,
    /// Seek the nearest food tile.
    Food,
    /// Seek the nearest gold tile.
    Gold,
    /// Seek the nearest enemy pixel.
    EnemyPixel,
}

/// Where a colony's artillery aims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArtilleryTarget {
    /// Strike a uniformly random grid cell.
    #[default]
    Random,
    /// Aim at a random pixel of the given enemy colony. Degrades to
    /// random fire while that colony is defeated or empty.
    Colony(usize),
}

/// One faction: pixels, resources and the upgrade ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colony {
    /// Fixed color tag (doubles as the colony's identity in logs).
    pub color: ColonyColor,
    /// Autonomous (AI-driven) or human-controlled.
    pub is_ai: bool,
    /// Monotonic within a round-sequence: set when the pixel list empties
    /// during play, cleared only by a full reset.
    pub defeated: bool,
    /// Banked gold.
    pub gold: u32,
    /// Living pixels. Order is iteration order only, never semantics.
    pub pixels: Vec<Pixel>,
    /// Current targeting priority.
    pub priority: Priority,
    /// Levels in force this round.
    pub levels: UpgradeLevels,
    /// Purchased-but-unapplied deltas, flushed at round reset.
    pub pending: UpgradeLevels,
    /// Artillery aim selection.
    pub artillery_target: ArtilleryTarget,
}

impl Colony {
    /// A pristine colony: no gold, no upgrades, no pixels.
    #[must_use]
    pub fn pristine(color: ColonyColor) -> Self {
        Self {
            color,
            is_ai: true,
            defeated: false,
            gold: 0,
            pixels: Vec::new(),
            priority: Priority::default(),
            levels: UpgradeLevels::default(),
            pending: UpgradeLevels::default(),
            artillery_target: ArtilleryTarget::default(),
        }
    }

    /// Effective level of an upgrade: permanent + pending.
    #[must_use]
    pub fn effective_level(&self, kind: UpgradeKind) -> u8 {
        self.levels
            .level_of(kind)
            .saturating_add(self.pending.level_of(kind))
    }

    /// Whether the artillery battery is active this round.
    #[must_use]
    pub const fn has_artillery(&self) -> bool {
        self.levels.artillery_unlocked
    }

    /// Combat strength of this colony's pixels.
    #[must_use]
    pub const fn strength(&self) -> u32 {
        1 + self.levels.strength as u32
    }

    /// Zero every pixel's retarget counter (after a priority change).
    pub fn reset_retarget_counters(&mut self) {
        for pixel in &mut self.pixels {
            pixel.retarget_counter = 0;
        }
    }

    /// Reseed pixels at the home corner for a new round.
    ///
    /// Defeated colonies are skipped: their pixel list is forced empty.
    pub fn reseed_pixels(&mut self, grid: &Grid, index: usize, config: &GameConfig) {
        self.pixels.clear();
        if self.defeated {
            return;
        }
        let corner = grid.corner(index);
        let count = config.starting_pixels(self.levels.starting_units);
        self.pixels = (0..count).map(|_| Pixel::new(corner)).collect();
    }

    /// Read-model snapshot for the UI's per-refresh poll.
    #[must_use]
    pub fn status(&self) -> ColonyStatus {
        ColonyStatus {
            color: self.color,
            is_ai: self.is_ai,
            defeated: self.defeated,
            pixel_count: self.pixels.len(),
            gold: self.gold,
            priority: self.priority,
            artillery_target: self.artillery_target,
            food_yield: self.effective_level(UpgradeKind::FoodYield),
            starting_units: self.effective_level(UpgradeKind::StartingUnits),
            focus: self.effective_level(UpgradeKind::Focus),
            strength: self.effective_level(UpgradeKind::Strength),
            move_speed: self.effective_level(UpgradeKind::MoveSpeed),
            interest: self.effective_level(UpgradeKind::Interest),
            artillery_unlocked: self.effective_level(UpgradeKind::ArtilleryUnlock) > 0,
            artillery_targeting: self.effective_level(UpgradeKind::ArtilleryTargeting) > 0,
            artillery_fire_rate: self.effective_level(UpgradeKind::ArtilleryFireRate),
            artillery_area: self.effective_level(UpgradeKind::ArtilleryArea),
            artillery_focus: self.effective_level(UpgradeKind::ArtilleryFocus),
        }
    }
}

/// Per-colony snapshot of everything the UI polls each refresh.
///
/// Levels reported here are *effective* (permanent + pending), matching
/// what purchase buttons should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonyStatus {
    /// Colony color tag.
    pub color: ColonyColor,
    /// Autonomous flag.
    pub is_ai: bool,
    /// Defeat flag.
    pub defeated: bool,
    /// Living pixel count.
    pub pixel_count: usize,
    /// Banked gold.
    pub gold: u32,
    /// Current targeting priority.
    pub priority: Priority,
    /// Artillery aim selection.
    pub artillery_target: ArtilleryTarget,
    /// Effective food-yield level.
    pub food_yield: u8,
    /// Effective starting-units level.
    pub starting_units: u8,
    /// Effective focus level.
    pub focus: u8,
    /// Effective strength level.
    pub strength: u8,
    /// Effective movement-speed level.
    pub move_speed: u8,
    /// Effective interest level.
    pub interest: u8,
    /// Artillery unlocked (active or pending).
    pub artillery_unlocked: bool,
    /// Artillery targeting unlocked (active or pending).
    pub artillery_targeting: bool,
    /// Effective artillery fire-rate level.
    pub artillery_fire_rate: u8,
    /// Effective artillery area level.
    pub artillery_area: u8,
    /// Effective artillery focus level.
    pub artillery_focus: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pristine_colony() {
        let colony = Colony::pristine(ColonyColor::Red);
        assert_eq!(colony.gold, 0);
        assert!(colony.pixels.is_empty());
        assert!(!colony.defeated);
        assert_eq!(colony.priority, Priority::None);
        assert_eq!(colony.effective_level(UpgradeKind::Strength), 0);
    }

    #[test]
    fn test_effective_level_sums_pending() {
        let mut colony = Colony::pristine(ColonyColor::Blue);
        colony.levels.strength = 2;
        colony.pending.strength = 1;
        assert_eq!(colony.effective_level(UpgradeKind::Strength), 3);
        // Gameplay strength reads the permanent level only: 1 + 2.
        assert_eq!(colony.strength(), 3);
    }

    #[test]
    fn test_reseed_scales_with_starting_units() {
        let grid = Grid::new(50, 50);
        let config = GameConfig::default();
        let mut colony = Colony::pristine(ColonyColor::Green);
        colony.levels.starting_units = 2;
        colony.reseed_pixels(&grid, 1, &config);
        assert_eq!(colony.pixels.len(), 20);
        assert!(colony.pixels.iter().all(|p| p.pos == grid.corner(1)));
    }

    #[test]
    fn test_reseed_skips_defeated() {
        let grid = Grid::new(50, 50);
        let config = GameConfig::default();
        let mut colony = Colony::pristine(ColonyColor::Purple);
        colony.defeated = true;
        colony.reseed_pixels(&grid, 2, &config);
        assert!(colony.pixels.is_empty());
    }
}
