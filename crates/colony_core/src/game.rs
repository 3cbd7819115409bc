//! The owned simulation-state object.
//!
//! [`Game`] wires every subsystem together: it owns the colonies, the
//! resource field, the scheduler and the seeded random source, and it is
//! the only mutation entry point for the excluded rendering/UI layer.
//! Callers drive virtual time with [`Game::advance`]; everything else is
//! an explicit operation.
//!
//! # Example
//!
//! ```
//! use colony_core::config::GameConfig;
//! use colony_core::game::Game;
//! use colony_core::rounds::Phase;
//!
//! let mut game = Game::new(GameConfig::default());
//! game.initialize_round(1).unwrap();
//! assert_eq!(game.phase(), Phase::Running);
//!
//! // Run two simulated seconds.
//! game.advance(2000);
//! assert!(game.colonies().iter().all(|c| !c.pixels.is_empty()));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai;
use crate::artillery;
use crate::colony::{ArtilleryTarget, Colony, ColonyColor, ColonyStatus, Priority};
use crate::config::GameConfig;
use crate::economy;
use crate::error::{GameError, Result};
use crate::grid::{Grid, COLONY_COUNT};
use crate::movement;
use crate::rounds::{self, Outcome, Phase};
use crate::scheduler::{Scheduler, TaskKind};
use crate::tiles::ResourceField;
use crate::upgrades::UpgradeKind;

/// Period of the round countdown task.
const ROUND_CLOCK_PERIOD_MS: u64 = 1000;

/// One full game: four colonies on a grid, driven by virtual time.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    colonies: Vec<Colony>,
    field: ResourceField,
    scheduler: Scheduler,
    phase: Phase,
    round_remaining_ms: u64,
    rng: ChaCha8Rng,
}

impl Game {
    /// Create a game in the Setup phase. Nothing is scheduled until
    /// [`initialize_round`](Self::initialize_round).
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let grid = config.grid();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let colonies = ColonyColor::ALL.iter().map(|&c| Colony::pristine(c)).collect();
        Self {
            config,
            grid,
            colonies,
            field: ResourceField::new(),
            scheduler: Scheduler::new(),
            phase: Phase::Setup,
            round_remaining_ms: 0,
            rng,
        }
    }

    // ------------------------------------------------------------------
    // External operations
    // ------------------------------------------------------------------

    /// Reset all colony state, assign the first `num_human_players`
    /// colonies to humans (the rest are autonomous) and begin Running.
    pub fn initialize_round(&mut self, num_human_players: usize) -> Result<()> {
        if num_human_players < 1 || num_human_players > COLONY_COUNT {
            return Err(GameError::InvalidPlayerCount(num_human_players));
        }
        self.scheduler.cancel_all();
        for (index, colony) in self.colonies.iter_mut().enumerate() {
            *colony = Colony::pristine(colony.color);
            colony.is_ai = index >= num_human_players;
        }
        tracing::info!(num_human_players, "game initialized");
        self.begin_round();
        Ok(())
    }

    /// Change a colony's targeting priority and zero its retarget
    /// counters.
    ///
    /// A human colony re-selecting its current priority is a no-op, so
    /// repeated UI clicks do not keep resetting counters.
    pub fn set_colony_priority(&mut self, index: usize, priority: Priority) -> Result<()> {
        let colony = self
            .colonies
            .get_mut(index)
            .ok_or(GameError::InvalidColony(index))?;
        if !colony.is_ai && colony.priority == priority {
            return Ok(());
        }
        colony.priority = priority;
        colony.reset_retarget_counters();
        Ok(())
    }

    /// Buy an upgrade for a colony. Returns the gold spent.
    ///
    /// The purchase lands in the colony's pending set and takes effect at
    /// the next round reset.
    pub fn purchase_upgrade(&mut self, index: usize, kind: UpgradeKind) -> Result<u32> {
        let colony = self
            .colonies
            .get_mut(index)
            .ok_or(GameError::InvalidColony(index))?;
        economy::purchase(colony, kind)
    }

    /// Re-aim a colony's artillery.
    ///
    /// Out-of-range and self targets are rejected; a target that later
    /// becomes defeated degrades silently to random fire at strike time.
    pub fn set_artillery_target(&mut self, index: usize, target: ArtilleryTarget) -> Result<()> {
        if index >= self.colonies.len() {
            return Err(GameError::InvalidColony(index));
        }
        if let ArtilleryTarget::Colony(enemy) = target {
            if enemy >= self.colonies.len() || enemy == index {
                return Err(GameError::InvalidTarget(enemy));
            }
        }
        self.colonies[index].artillery_target = target;
        Ok(())
    }

    /// Return to the pristine pre-game state: zero gold, zero upgrades,
    /// zero pixels, all timers cancelled. Idempotent.
    pub fn request_full_reset(&mut self) {
        self.scheduler.cancel_all();
        for colony in &mut self.colonies {
            let is_ai = colony.is_ai;
            *colony = Colony::pristine(colony.color);
            colony.is_ai = is_ai;
        }
        self.field.clear();
        self.round_remaining_ms = 0;
        self.phase = Phase::Setup;
        tracing::info!("full reset");
    }

    /// Leave the upgrade phase: flush pending upgrades, reseed pixels and
    /// start the next round. No-op outside the upgrade phase.
    pub fn begin_next_round(&mut self) {
        if self.phase != Phase::UpgradePhase {
            tracing::debug!(phase = ?self.phase, "begin_next_round ignored");
            return;
        }
        for colony in &mut self.colonies {
            economy::flush_pending(colony);
        }
        self.begin_round();
    }

    /// Advance virtual time, dispatching every task due in the window.
    ///
    /// Each task callback runs to completion before the next is popped;
    /// there is no concurrency to guard against.
    pub fn advance(&mut self, delta_ms: u64) {
        let target = self.scheduler.now_ms() + delta_ms;
        while let Some(kind) = self.scheduler.pop_due(target) {
            self.dispatch(kind);
        }
        self.scheduler.settle(target);
    }

    // ------------------------------------------------------------------
    // Read model
    // ------------------------------------------------------------------

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The outcome, once the game is over.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Milliseconds left on the round clock.
    #[must_use]
    pub const fn round_time_remaining_ms(&self) -> u64 {
        self.round_remaining_ms
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// The play area.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// The configuration this game was built with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// All colonies, for rendering grid contents.
    #[must_use]
    pub fn colonies(&self) -> &[Colony] {
        &self.colonies
    }

    /// Food and gold tiles, for rendering grid contents.
    #[must_use]
    pub const fn field(&self) -> &ResourceField {
        &self.field
    }

    /// Mutable access to one colony, for scenario setup and fixtures.
    ///
    /// The rendering/UI layer has no business calling this; gameplay
    /// mutations go through the explicit operations above.
    pub fn colony_mut(&mut self, index: usize) -> Result<&mut Colony> {
        self.colonies
            .get_mut(index)
            .ok_or(GameError::InvalidColony(index))
    }

    /// Snapshot of one colony for the UI poll.
    pub fn colony_status(&self, index: usize) -> Result<ColonyStatus> {
        self.colonies
            .get(index)
            .map(Colony::status)
            .ok_or(GameError::InvalidColony(index))
    }

    /// Snapshots of all colonies in index order.
    #[must_use]
    pub fn statuses(&self) -> Vec<ColonyStatus> {
        self.colonies.iter().map(Colony::status).collect()
    }

    /// Hash of the observable simulation state (random source excluded).
    ///
    /// Two games built from the same config and driven by the same
    /// advance calls hash identically; used by determinism tests.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.scheduler.now_ms().hash(&mut hasher);
        self.phase.hash(&mut hasher);
        self.round_remaining_ms.hash(&mut hasher);
        self.colonies.hash(&mut hasher);
        self.field.hash(&mut hasher);
        hasher.finish()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Flush-free entry into Running: reseed pixels, roll AI decisions,
    /// schedule every timer.
    fn begin_round(&mut self) {
        self.scheduler.cancel_all();
        self.field.clear();
        for index in 0..self.colonies.len() {
            let colony = &mut self.colonies[index];
            colony.reseed_pixels(&self.grid, index, &self.config);
        }
        ai::choose_round_priorities(&mut self.colonies, &mut self.rng);
        ai::choose_artillery_aims(&mut self.colonies, &mut self.rng);

        for index in 0..self.colonies.len() {
            let colony = &self.colonies[index];
            if colony.defeated {
                continue;
            }
            let period = self.config.movement_period_ms(colony.levels.move_speed);
            let fire_rate = colony.levels.artillery_fire_rate;
            let has_artillery = colony.has_artillery();
            self.scheduler.schedule(TaskKind::Movement(index), period);
            if has_artillery {
                self.scheduler
                    .schedule(TaskKind::Artillery(index), artillery::strike_period_ms(fire_rate));
            }
        }
        self.scheduler
            .schedule(TaskKind::Spawner, self.config.spawn_period_ms);
        self.scheduler
            .schedule(TaskKind::RoundClock, ROUND_CLOCK_PERIOD_MS);
        self.round_remaining_ms = self.config.round_duration_ms;
        self.phase = Phase::Running;
        tracing::info!("round started");
    }

    /// Stop the round: cancel every timer, pay interest, let AI colonies
    /// shop.
    fn enter_upgrade_phase(&mut self) {
        self.scheduler.cancel_all();
        self.phase = Phase::UpgradePhase;
        for colony in &mut self.colonies {
            if colony.defeated {
                continue;
            }
            economy::apply_interest(colony);
        }
        for colony in &mut self.colonies {
            if colony.defeated || !colony.is_ai {
                continue;
            }
            ai::run_upgrade_purchases(colony);
        }
        tracing::info!("upgrade phase");
    }

    /// Run one scheduled callback.
    fn dispatch(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::Movement(index) => {
                if self.phase != Phase::Running {
                    return;
                }
                if self.colonies[index].defeated {
                    self.scheduler.cancel_kind(TaskKind::Movement(index));
                    return;
                }
                movement::movement_tick(
                    &mut self.colonies,
                    index,
                    &self.grid,
                    &mut self.field,
                    &mut self.rng,
                );
                self.check_win_condition();
            }
            TaskKind::Spawner => {
                self.field.spawn_pair(&self.grid, &mut self.rng);
            }
            TaskKind::RoundClock => {
                self.round_remaining_ms =
                    self.round_remaining_ms.saturating_sub(ROUND_CLOCK_PERIOD_MS);
                if self.round_remaining_ms == 0 {
                    self.enter_upgrade_phase();
                }
            }
            TaskKind::Artillery(index) => {
                if self.phase != Phase::Running {
                    return;
                }
                // Defensive: ownership or the colony itself may have gone
                // away between schedule and execution.
                let colony = &self.colonies[index];
                if colony.defeated || !colony.has_artillery() {
                    self.scheduler.cancel_kind(TaskKind::Artillery(index));
                    return;
                }
                artillery::fire(
                    &mut self.colonies,
                    index,
                    &self.grid,
                    &mut self.field,
                    &mut self.rng,
                );
                self.check_win_condition();
            }
        }
    }

    /// Re-evaluate defeats and end the game once at most one colony
    /// survives. Idempotent; safe to call after every combat tick and
    /// artillery strike.
    fn check_win_condition(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        rounds::mark_defeats(&mut self.colonies);
        if let Some(outcome) = rounds::evaluate_outcome(&self.colonies) {
            self.scheduler.cancel_all();
            self.phase = Phase::GameOver(outcome);
            match outcome {
                Outcome::Winner(color) => {
                    tracing::info!(winner = color.name(), "game over");
                }
                Outcome::Draw => tracing::info!("game over: draw"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_game() -> Game {
        let mut game = Game::new(GameConfig::default());
        game.initialize_round(1).unwrap();
        game
    }

    #[test]
    fn test_initialize_round_validates_player_count() {
        let mut game = Game::new(GameConfig::default());
        assert_eq!(
            game.initialize_round(0),
            Err(GameError::InvalidPlayerCount(0))
        );
        assert_eq!(
            game.initialize_round(5),
            Err(GameError::InvalidPlayerCount(5))
        );
        assert_eq!(game.phase(), Phase::Setup);

        game.initialize_round(2).unwrap();
        assert_eq!(game.phase(), Phase::Running);
        assert!(!game.colonies()[0].is_ai);
        assert!(!game.colonies()[1].is_ai);
        assert!(game.colonies()[2].is_ai);
        assert!(game.colonies()[3].is_ai);
        assert!(game.colonies().iter().all(|c| c.pixels.len() == 10));
    }

    #[test]
    fn test_advance_spawns_resources_and_counts_down() {
        let mut game = running_game();
        game.advance(1000);
        // Five spawner ticks; early foragers may have eaten one or two.
        let tiles = game.field().food().len() + game.field().gold().len();
        assert!(tiles >= 8 && tiles <= 10);
        assert_eq!(game.round_time_remaining_ms(), 59_000);
        let grid = game.grid();
        assert!(game
            .colonies()
            .iter()
            .flat_map(|c| &c.pixels)
            .all(|p| grid.contains(p.pos)));
    }

    #[test]
    fn test_round_clock_enters_upgrade_phase() {
        let mut game = running_game();
        game.advance(60_000);
        assert_eq!(game.phase(), Phase::UpgradePhase);
        // Every timer is stopped; further time does nothing.
        let hash = game.state_hash();
        game.advance(10_000);
        assert_eq!(game.phase(), Phase::UpgradePhase);
        assert_ne!(game.state_hash(), hash); // clock moved...
        game.begin_next_round();
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn test_purchase_flushes_at_next_round() {
        let mut game = running_game();
        game.colonies[0].gold = 5;
        game.purchase_upgrade(0, UpgradeKind::FoodYield).unwrap();
        assert_eq!(game.colonies()[0].pending.food_yield, 1);
        assert_eq!(game.colonies()[0].levels.food_yield, 0);

        game.advance(60_000);
        game.begin_next_round();
        assert_eq!(game.colonies()[0].levels.food_yield, 1);
        assert_eq!(game.colonies()[0].pending.food_yield, 0);
    }

    #[test]
    fn test_upgrade_phase_pays_interest_then_ai_shops() {
        let mut game = running_game();
        game.colonies[0].gold = 10; // human
        game.colonies[1].gold = 20; // AI
        // Enter the boundary directly so collection noise from a full
        // round cannot change the arithmetic under test.
        game.enter_upgrade_phase();

        // Human: 10 + 10/5 = 12, untouched by AI shopping.
        assert_eq!(game.colonies()[0].gold, 12);
        // AI: 20 + 4 interest = 24, then four 5-cost purchases.
        assert_eq!(game.colonies()[1].gold, 4);
        assert_eq!(game.colonies()[1].pending.food_yield, 1);
    }

    #[test]
    fn test_begin_next_round_restarts_artillery_for_owners() {
        let mut game = running_game();
        game.colonies[2].levels.artillery_unlocked = true;
        game.advance(60_000);
        game.begin_next_round();
        assert!(game.scheduler.is_scheduled(TaskKind::Artillery(2)));
        assert!(!game.scheduler.is_scheduled(TaskKind::Artillery(0)));
    }

    #[test]
    fn test_artillery_dispatch_is_defensive() {
        let mut game = running_game();
        game.colonies[1].levels.artillery_unlocked = true;
        game.advance(60_000);
        game.begin_next_round();
        assert!(game.scheduler.is_scheduled(TaskKind::Artillery(1)));

        // Ownership vanishes mid-round: the next due firing cancels the
        // timer without striking.
        game.colonies[1].levels.artillery_unlocked = false;
        game.advance(10_000);
        assert!(!game.scheduler.is_scheduled(TaskKind::Artillery(1)));
    }

    #[test]
    fn test_sole_survivor_wins_and_timers_stop() {
        // Scenario E: three colonies wiped in the same tick.
        let mut game = running_game();
        for index in 0..3 {
            game.colonies[index].pixels.clear();
        }
        game.advance(game.config().base_movement_period_ms);
        assert_eq!(game.outcome(), Some(Outcome::Winner(ColonyColor::Blue)));
        assert_eq!(game.scheduler.task_count(), 0);
        for index in 0..3 {
            assert!(game.colonies()[index].defeated);
        }
    }

    #[test]
    fn test_full_wipeout_is_draw() {
        let mut game = running_game();
        for colony in &mut game.colonies {
            colony.pixels.clear();
        }
        game.advance(game.config().base_movement_period_ms);
        assert_eq!(game.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_full_reset_is_idempotent() {
        let mut game = running_game();
        game.advance(5_000);
        game.request_full_reset();
        let first = game.state_hash();
        game.request_full_reset();
        assert_eq!(game.state_hash(), first);
        assert_eq!(game.phase(), Phase::Setup);
        assert!(game.colonies().iter().all(|c| c.gold == 0
            && c.pixels.is_empty()
            && c.levels == crate::upgrades::UpgradeLevels::default()));
    }

    #[test]
    fn test_defeated_colony_stays_defeated_across_rounds() {
        let mut game = running_game();
        game.colonies[2].pixels.clear();
        game.advance(game.config().base_movement_period_ms);
        assert!(game.colonies()[2].defeated);
        assert_eq!(game.outcome(), None);

        game.advance(60_000);
        game.begin_next_round();
        assert!(game.colonies()[2].defeated);
        assert!(game.colonies()[2].pixels.is_empty());
        assert!(!game.scheduler.is_scheduled(TaskKind::Movement(2)));
    }

    #[test]
    fn test_set_artillery_target_validation() {
        let mut game = running_game();
        assert_eq!(
            game.set_artillery_target(0, ArtilleryTarget::Colony(0)),
            Err(GameError::InvalidTarget(0))
        );
        assert_eq!(
            game.set_artillery_target(0, ArtilleryTarget::Colony(9)),
            Err(GameError::InvalidTarget(9))
        );
        assert_eq!(
            game.set_artillery_target(7, ArtilleryTarget::Random),
            Err(GameError::InvalidColony(7))
        );
        game.set_artillery_target(0, ArtilleryTarget::Colony(3)).unwrap();
        assert_eq!(
            game.colonies()[0].artillery_target,
            ArtilleryTarget::Colony(3)
        );
    }

    #[test]
    fn test_human_repeat_priority_is_noop() {
        let mut game = running_game();
        game.set_colony_priority(0, Priority::Food).unwrap();
        game.colonies[0].pixels[0].retarget_counter = 7;
        game.set_colony_priority(0, Priority::Food).unwrap();
        assert_eq!(game.colonies()[0].pixels[0].retarget_counter, 7);
        game.set_colony_priority(0, Priority::Gold).unwrap();
        assert_eq!(game.colonies()[0].pixels[0].retarget_counter, 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = GameConfig {
            seed: 99,
            ..GameConfig::default()
        };
        let mut a = Game::new(config.clone());
        let mut b = Game::new(config);
        a.initialize_round(1).unwrap();
        b.initialize_round(1).unwrap();
        for _ in 0..30 {
            a.advance(500);
            b.advance(500);
            assert_eq!(a.state_hash(), b.state_hash());
        }
    }
}
