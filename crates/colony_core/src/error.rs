//! Error types for the colony simulation.
//!
//! All errors are recoverable rejections: every mutating operation on the
//! simulation either fully applies or fully no-ops.

use thiserror::Error;

use crate::upgrades::UpgradeKind;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all simulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Purchase rejected: not enough gold. Gold is unchanged.
    #[error("Insufficient funds: need {cost} gold, have {gold}")]
    InsufficientFunds {
        /// Cost of the rejected upgrade at its effective level.
        cost: u32,
        /// Gold the colony actually has.
        gold: u32,
    },

    /// Purchase rejected: the upgrade is already at its maximum effective
    /// level (permanent + pending). Rejected regardless of funds.
    #[error("Maximum level reached for {0:?} upgrade")]
    MaxLevelReached(UpgradeKind),

    /// Purchase rejected: a sub-upgrade was attempted without its unlock
    /// being active or pending. Rejected regardless of funds.
    #[error("Upgrade {kind:?} requires {requires:?} to be unlocked")]
    PrerequisiteMissing {
        /// The sub-upgrade that was attempted.
        kind: UpgradeKind,
        /// The unlock it depends on.
        requires: UpgradeKind,
    },

    /// Artillery target refers to a nonexistent colony or the firing
    /// colony itself.
    #[error("Invalid artillery target: colony {0}")]
    InvalidTarget(usize),

    /// Round setup rejected: human player count outside 1-4.
    #[error("Invalid player count: {0} (expected 1-4)")]
    InvalidPlayerCount(usize),

    /// Colony index outside 0-3.
    #[error("Invalid colony index: {0}")]
    InvalidColony(usize),
}
