//! Autonomous colony decision-making.
//!
//! AI colonies act at round boundaries only: they spend gold during the
//! upgrade phase and pick a fresh targeting priority (and artillery aim)
//! when the next round starts. Per-tick pixel behavior is identical for
//! human and AI colonies.

use rand::Rng;

use crate::colony::{ArtilleryTarget, Colony, Priority};
use crate::economy;
use crate::upgrades::UpgradeKind;

/// Priorities an AI colony rolls between each round.
const AI_PRIORITIES: [Priority; 3] = [Priority::Food, Priority::Gold, Priority::EnemyPixel];

/// Spend an AI colony's gold during the upgrade phase.
///
/// Artillery is unlocked first if affordable, then the targeting unlock,
/// then repeatedly the cheapest affordable non-maxed upgrade (cost ties
/// break by [`UpgradeKind::ALL`] order) until nothing is affordable.
pub fn run_upgrade_purchases(colony: &mut Colony) {
    if colony.effective_level(UpgradeKind::ArtilleryUnlock) == 0 {
        let _ = economy::purchase(colony, UpgradeKind::ArtilleryUnlock);
    }
    if colony.effective_level(UpgradeKind::ArtilleryUnlock) > 0
        && colony.effective_level(UpgradeKind::ArtilleryTargeting) == 0
    {
        let _ = economy::purchase(colony, UpgradeKind::ArtilleryTargeting);
    }

    while let Some(kind) = cheapest_available(colony) {
        if economy::purchase(colony, kind).is_err() {
            break;
        }
        tracing::info!(
            colony = colony.color.name(),
            upgrade = kind.display_name(),
            gold_remaining = colony.gold,
            "AI purchased upgrade"
        );
    }
}

/// The cheapest upgrade the colony could buy right now, if any.
fn cheapest_available(colony: &Colony) -> Option<UpgradeKind> {
    UpgradeKind::ALL
        .into_iter()
        .filter(|&kind| is_available(colony, kind))
        .min_by_key(|&kind| kind.cost_at(colony.effective_level(kind)))
}

/// Affordable, below max, and prerequisite active or pending.
fn is_available(colony: &Colony, kind: UpgradeKind) -> bool {
    if let Some(requires) = kind.prerequisite() {
        if colony.effective_level(requires) == 0 {
            return false;
        }
    }
    let effective = colony.effective_level(kind);
    effective < kind.max_level() && colony.gold >= kind.cost_at(effective)
}

/// Roll a fresh priority for every living AI colony and zero its retarget
/// counters. Runs once per round, at round start.
pub fn choose_round_priorities(colonies: &mut [Colony], rng: &mut impl Rng) {
    for colony in colonies.iter_mut() {
        if !colony.is_ai || colony.defeated {
            continue;
        }
        colony.priority = AI_PRIORITIES[rng.gen_range(0..AI_PRIORITIES.len())];
        colony.reset_retarget_counters();
        tracing::info!(
            colony = colony.color.name(),
            priority = ?colony.priority,
            "AI priority set"
        );
    }
}

/// Re-aim every living AI colony's artillery at a random living enemy.
///
/// Only colonies that own the targeting unlock pick a colony; the rest
/// stay on random fire.
pub fn choose_artillery_aims(colonies: &mut [Colony], rng: &mut impl Rng) {
    for index in 0..colonies.len() {
        let colony = &colonies[index];
        if !colony.is_ai
            || colony.defeated
            || !colony.levels.artillery_unlocked
            || !colony.levels.artillery_targeting
        {
            continue;
        }
        let living: Vec<usize> = colonies
            .iter()
            .enumerate()
            .filter(|&(other, c)| other != index && !c.defeated)
            .map(|(other, _)| other)
            .collect();
        colonies[index].artillery_target = if living.is_empty() {
            ArtilleryTarget::Random
        } else {
            ArtilleryTarget::Colony(living[rng.gen_range(0..living.len())])
        };
    }
}
