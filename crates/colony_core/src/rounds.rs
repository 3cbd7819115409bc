//! Round lifecycle and win-condition evaluation.
//!
//! A game cycles Setup -> Running -> UpgradePhase -> Running until the
//! win check finds at most one surviving colony, which ends the game for
//! good (until a full reset).

use serde::{Deserialize, Serialize};

use crate::colony::{Colony, ColonyColor};

/// Lifecycle state of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Pre-game: colonies exist but nothing is scheduled.
    Setup,
    /// Timers live, round clock counting down.
    Running,
    /// Round clock expired: purchases open, nothing moves.
    UpgradePhase,
    /// Terminal: one or zero colonies survived.
    GameOver(Outcome),
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Exactly one colony survived.
    Winner(ColonyColor),
    /// Every colony was defeated simultaneously.
    Draw,
}

/// Mark colonies whose pixel list emptied as defeated.
///
/// The flag is monotonic: already-defeated colonies are untouched, so
/// repeated calls in one macro-tick are harmless. Returns whether any
/// colony was newly defeated.
pub fn mark_defeats(colonies: &mut [Colony]) -> bool {
    let mut any_new = false;
    for colony in colonies.iter_mut() {
        if !colony.defeated && colony.pixels.is_empty() {
            colony.defeated = true;
            any_new = true;
            tracing::info!(colony = colony.color.name(), "colony defeated");
        }
    }
    any_new
}

/// Evaluate the win condition: `Some` once at most one colony survives.
#[must_use]
pub fn evaluate_outcome(colonies: &[Colony]) -> Option<Outcome> {
    let mut survivors = colonies.iter().filter(|colony| !colony.defeated);
    match (survivors.next(), survivors.next()) {
        (Some(winner), None) => Some(Outcome::Winner(winner.color)),
        (None, _) => Some(Outcome::Draw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::Pixel;
    use crate::grid::GridPos;

    fn colonies_with_pixels() -> Vec<Colony> {
        ColonyColor::ALL
            .iter()
            .map(|&color| {
                let mut colony = Colony::pristine(color);
                colony.pixels.push(Pixel::new(GridPos::new(0, 0)));
                colony
            })
            .collect()
    }

    #[test]
    fn test_defeat_is_marked_once_and_sticks() {
        let mut colonies = colonies_with_pixels();
        colonies[1].pixels.clear();
        assert!(mark_defeats(&mut colonies));
        assert!(colonies[1].defeated);
        // Second evaluation reports nothing new.
        assert!(!mark_defeats(&mut colonies));
        assert!(colonies[1].defeated);
    }

    #[test]
    fn test_no_outcome_with_two_survivors() {
        let mut colonies = colonies_with_pixels();
        colonies[0].defeated = true;
        colonies[1].defeated = true;
        assert_eq!(evaluate_outcome(&colonies), None);
    }

    #[test]
    fn test_single_survivor_wins() {
        let mut colonies = colonies_with_pixels();
        for colony in colonies.iter_mut().take(3) {
            colony.pixels.clear();
        }
        mark_defeats(&mut colonies);
        assert_eq!(
            evaluate_outcome(&colonies),
            Some(Outcome::Winner(ColonyColor::Blue))
        );
    }

    #[test]
    fn test_simultaneous_wipeout_is_a_draw() {
        let mut colonies = colonies_with_pixels();
        for colony in &mut colonies {
            colony.pixels.clear();
        }
        mark_defeats(&mut colonies);
        assert_eq!(evaluate_outcome(&colonies), Some(Outcome::Draw));
    }
}
