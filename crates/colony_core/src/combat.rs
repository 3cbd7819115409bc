//! Same-cell combat resolution.
//!
//! Invoked immediately after a pixel's position changes. The first enemy
//! pixel found on the cell (colony-then-pixel scan order) fights; higher
//! strength wins, equal strength is a coin flip from the game's random
//! source. Exactly one of the two pixels is destroyed per interaction,
//! and at most one interaction is resolved per move.

use rand::Rng;

use crate::colony::Colony;
use crate::grid::GridPos;

/// Result of probing a cell for enemy contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// No enemy pixel shared the cell.
    NoContact,
    /// The defender lost; it has been removed from its colony.
    DefenderDestroyed {
        /// Index of the colony that lost a pixel.
        colony: usize,
    },
    /// The attacker lost. The caller removes it from its own colony and
    /// applies no further per-tick effects to it.
    AttackerDestroyed {
        /// Index of the colony whose pixel won.
        colony: usize,
    },
}

/// Resolve at most one combat interaction for an attacker standing at
/// `pos`.
///
/// Defensive: even if several enemies share the cell, only the first
/// match fights this move.
pub fn resolve_contact(
    colonies: &mut [Colony],
    attacker_index: usize,
    pos: GridPos,
    rng: &mut impl Rng,
) -> ContactOutcome {
    let attacker_strength = colonies[attacker_index].strength();

    for defender_index in 0..colonies.len() {
        if defender_index == attacker_index {
            continue;
        }
        let Some(pixel_index) = colonies[defender_index]
            .pixels
            .iter()
            .position(|p| p.pos == pos)
        else {
            continue;
        };

        let defender_strength = colonies[defender_index].strength();
        tracing::debug!(
            attacker = colonies[attacker_index].color.name(),
            attacker_strength,
            defender = colonies[defender_index].color.name(),
            defender_strength,
            x = pos.x,
            y = pos.y,
            "pixel contact"
        );

        let attacker_wins = if attacker_strength != defender_strength {
            attacker_strength > defender_strength
        } else {
            rng.gen_bool(0.5)
        };

        if attacker_wins {
            colonies[defender_index].pixels.remove(pixel_index);
            tracing::debug!(
                colony = colonies[defender_index].color.name(),
                "pixel destroyed"
            );
            return ContactOutcome::DefenderDestroyed {
                colony: defender_index,
            };
        }
        tracing::debug!(
            colony = colonies[attacker_index].color.name(),
            "pixel destroyed"
        );
        return ContactOutcome::AttackerDestroyed {
            colony: defender_index,
        };
    }

    ContactOutcome::NoContact
}
