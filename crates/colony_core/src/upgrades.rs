//! Upgrade kinds, cost curves and level bookkeeping.
//!
//! Every upgrade is a closed enum variant with a static descriptor: cost
//! model, maximum level and optional prerequisite. Repeatable upgrades are
//! bounded counters; the two artillery unlocks are one-shot flags modelled
//! as max-level-1 kinds so the pending-to-permanent flush is uniform.
//!
//! A colony tracks two [`UpgradeLevels`]: the permanent set read by
//! gameplay formulas, and the pending set accumulated by purchases during
//! a round. The *effective* level (permanent + pending) is what purchase
//! validation and the UI read, and never exceeds the kind's maximum.

use serde::{Deserialize, Serialize};

/// Cost multiplier applied per level for scaled upgrades.
const COST_GROWTH: f64 = 1.6;

/// Maximum level for repeatable upgrades.
const MAX_REPEATABLE_LEVEL: u8 = 8;

/// Every purchasable upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Extra pixels spawned per food tile consumed.
    FoodYield,
    /// Extra pixels seeded at each round start.
    StartingUnits,
    /// Fewer idle moves before a pixel re-seeks its priority target.
    Focus,
    /// Combat strength bonus.
    Strength,
    /// Faster movement ticks.
    MoveSpeed,
    /// Better interest on banked gold between rounds.
    Interest,
    /// Unlocks the artillery battery (one-shot).
    ArtilleryUnlock,
    /// Unlocks picking an artillery target colony (one-shot).
    ArtilleryTargeting,
    /// Shorter delay between artillery strikes.
    ArtilleryFireRate,
    /// Larger blast diameter.
    ArtilleryArea,
    /// Tighter scatter around the aim point.
    ArtilleryFocus,
}

/// How an upgrade's price is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostModel {
    /// `ceil(base * 1.6^level)` - grows with the effective level.
    Scaled(u32),
    /// Fixed price, independent of level (one-shot unlocks).
    Flat(u32),
}

impl UpgradeKind {
    /// All kinds, in purchase-menu order. Autonomous purchasing breaks
    /// cost ties by this order.
    pub const ALL: [UpgradeKind; 11] = [
        UpgradeKind::FoodYield,
        UpgradeKind::StartingUnits,
        UpgradeKind::Focus,
        UpgradeKind::Strength,
        UpgradeKind::MoveSpeed,
        UpgradeKind::Interest,
        UpgradeKind::ArtilleryUnlock,
        UpgradeKind::ArtilleryTargeting,
        UpgradeKind::ArtilleryFireRate,
        UpgradeKind::ArtilleryArea,
        UpgradeKind::ArtilleryFocus,
    ];

    /// The cost model for this kind.
    #[must_use]
    pub const fn cost_model(self) -> CostModel {
        match self {
            Self::Interest => CostModel::Scaled(15),
            Self::ArtilleryUnlock => CostModel::Flat(50),
            Self::ArtilleryTargeting => CostModel::Flat(25),
            _ => CostModel::Scaled(5),
        }
    }

    /// Maximum effective level. One-shot unlocks max out at 1.
    #[must_use]
    pub const fn max_level(self) -> u8 {
        match self {
            Self::ArtilleryUnlock | Self::ArtilleryTargeting => 1,
            _ => MAX_REPEATABLE_LEVEL,
        }
    }

    /// The unlock this kind depends on, if any.
    ///
    /// Sub-upgrades are rejected regardless of funds while their
    /// prerequisite is neither active nor pending.
    #[must_use]
    pub const fn prerequisite(self) -> Option<UpgradeKind> {
        match self {
            Self::ArtilleryTargeting | Self::ArtilleryFireRate | Self::ArtilleryArea => {
                Some(Self::ArtilleryUnlock)
            }
            Self::ArtilleryFocus => Some(Self::ArtilleryTargeting),
            _ => None,
        }
    }

    /// Price of the next level given the current (effective) level.
    #[must_use]
    pub fn cost_at(self, level: u8) -> u32 {
        match self.cost_model() {
            CostModel::Scaled(base) => {
                let cost = f64::from(base) * COST_GROWTH.powi(i32::from(level));
                cost.ceil() as u32
            }
            CostModel::Flat(cost) => cost,
        }
    }

    /// Display name for UI labels and logs.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FoodYield => "Food Boost",
            Self::StartingUnits => "Pixel Boost",
            Self::Focus => "Focus Boost",
            Self::Strength => "Strength Boost",
            Self::MoveSpeed => "Speed Boost",
            Self::Interest => "Interest",
            Self::ArtilleryUnlock => "Artillery",
            Self::ArtilleryTargeting => "Artillery Targeting",
            Self::ArtilleryFireRate => "Artillery Fire Rate",
            Self::ArtilleryArea => "Artillery Area",
            Self::ArtilleryFocus => "Artillery Focus",
        }
    }
}

/// One full set of upgrade levels.
///
/// Used twice per colony: once for permanent levels and once for pending
/// (purchased but not yet applied) deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UpgradeLevels {
    /// Extra pixels per food tile.
    pub food_yield: u8,
    /// Extra starting pixels per round.
    pub starting_units: u8,
    /// Idle-move reduction.
    pub focus: u8,
    /// Combat strength bonus.
    pub strength: u8,
    /// Movement tick speed-up.
    pub move_speed: u8,
    /// Interest rate bonus.
    pub interest: u8,
    /// Artillery battery unlocked.
    pub artillery_unlocked: bool,
    /// Artillery target selection unlocked.
    pub artillery_targeting: bool,
    /// Artillery fire-rate level.
    pub artillery_fire_rate: u8,
    /// Artillery blast-area level.
    pub artillery_area: u8,
    /// Artillery scatter-reduction level.
    pub artillery_focus: u8,
}

impl UpgradeLevels {
    /// Level of one kind. Unlock flags read as 0 or 1.
    #[must_use]
    pub const fn level_of(&self, kind: UpgradeKind) -> u8 {
        match kind {
            UpgradeKind::FoodYield => self.food_yield,
            UpgradeKind::StartingUnits => self.starting_units,
            UpgradeKind::Focus => self.focus,
            UpgradeKind::Strength => self.strength,
            UpgradeKind::MoveSpeed => self.move_speed,
            UpgradeKind::Interest => self.interest,
            UpgradeKind::ArtilleryUnlock => self.artillery_unlocked as u8,
            UpgradeKind::ArtilleryTargeting => self.artillery_targeting as u8,
            UpgradeKind::ArtilleryFireRate => self.artillery_fire_rate,
            UpgradeKind::ArtilleryArea => self.artillery_area,
            UpgradeKind::ArtilleryFocus => self.artillery_focus,
        }
    }

    /// Raise one kind by a single level. Unlock flags become set.
    ///
    /// Callers are responsible for the max-level check; this only
    /// saturates the raw counter.
    pub fn raise(&mut self, kind: UpgradeKind) {
        match kind {
            UpgradeKind::FoodYield => self.food_yield = self.food_yield.saturating_add(1),
            UpgradeKind::StartingUnits => {
                self.starting_units = self.starting_units.saturating_add(1);
            }
            UpgradeKind::Focus => self.focus = self.focus.saturating_add(1),
            UpgradeKind::Strength => self.strength = self.strength.saturating_add(1),
            UpgradeKind::MoveSpeed => self.move_speed = self.move_speed.saturating_add(1),
            UpgradeKind::Interest => self.interest = self.interest.saturating_add(1),
            UpgradeKind::ArtilleryUnlock => self.artillery_unlocked = true,
            UpgradeKind::ArtilleryTargeting => self.artillery_targeting = true,
            UpgradeKind::ArtilleryFireRate => {
                self.artillery_fire_rate = self.artillery_fire_rate.saturating_add(1);
            }
            UpgradeKind::ArtilleryArea => self.artillery_area = self.artillery_area.saturating_add(1),
            UpgradeKind::ArtilleryFocus => {
                self.artillery_focus = self.artillery_focus.saturating_add(1);
            }
        }
    }

    /// Absorb a pending set into this permanent set, clamping each kind to
    /// its maximum, and clear the pending set.
    pub fn absorb(&mut self, pending: &mut UpgradeLevels) {
        for kind in UpgradeKind::ALL {
            let merged = self
                .level_of(kind)
                .saturating_add(pending.level_of(kind))
                .min(kind.max_level());
            self.set_level(kind, merged);
        }
        *pending = UpgradeLevels::default();
    }

    /// Set one kind to an absolute level. Unlock flags are set for any
    /// non-zero level.
    fn set_level(&mut self, kind: UpgradeKind, level: u8) {
        match kind {
            UpgradeKind::FoodYield => self.food_yield = level,
            UpgradeKind::StartingUnits => self.starting_units = level,
            UpgradeKind::Focus => self.focus = level,
            UpgradeKind::Strength => self.strength = level,
            UpgradeKind::MoveSpeed => self.move_speed = level,
            UpgradeKind::Interest => self.interest = level,
            UpgradeKind::ArtilleryUnlock => self.artillery_unlocked = level > 0,
            UpgradeKind::ArtilleryTargeting => self.artillery_targeting = level > 0,
            UpgradeKind::ArtilleryFireRate => self.artillery_fire_rate = level,
            UpgradeKind::ArtilleryArea => self.artillery_area = level,
            UpgradeKind::ArtilleryFocus => self.artillery_focus = level,
        }
    }
}
