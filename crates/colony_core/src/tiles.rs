//! Food and gold tiles scattered over the grid.
//!
//! The spawner appends one tile of each kind at uniformly random cells at
//! a fixed cadence; tiles are destroyed on collection or bombardment.
//! Tiles have no identity beyond their coordinates and their ordering is
//! irrelevant, except that nearest-target ties break toward the earliest
//! spawned tile.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridPos};

/// All food and gold tiles currently on the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceField {
    food: Vec<GridPos>,
    gold: Vec<GridPos>,
}

impl ResourceField {
    /// An empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A field with exactly the given tiles. Scenario/test hook.
    #[must_use]
    pub fn with_tiles(food: Vec<GridPos>, gold: Vec<GridPos>) -> Self {
        Self { food, gold }
    }

    /// Current food tiles.
    #[must_use]
    pub fn food(&self) -> &[GridPos] {
        &self.food
    }

    /// Current gold tiles.
    #[must_use]
    pub fn gold(&self) -> &[GridPos] {
        &self.gold
    }

    /// Drop every tile (round reset / full reset).
    pub fn clear(&mut self) {
        self.food.clear();
        self.gold.clear();
    }

    /// One spawner tick: append one gold and one food tile at uniformly
    /// random cells.
    pub fn spawn_pair(&mut self, grid: &Grid, rng: &mut impl Rng) {
        self.gold.push(grid.random_pos(rng));
        self.food.push(grid.random_pos(rng));
    }

    /// Nearest food tile by Manhattan distance; ties break toward the
    /// earliest tile in the list.
    #[must_use]
    pub fn nearest_food(&self, from: GridPos) -> Option<GridPos> {
        nearest(&self.food, from)
    }

    /// Nearest gold tile by Manhattan distance; ties break toward the
    /// earliest tile in the list.
    #[must_use]
    pub fn nearest_gold(&self, from: GridPos) -> Option<GridPos> {
        nearest(&self.gold, from)
    }

    /// Consume the first food tile at `pos`, if any.
    pub fn take_food(&mut self, pos: GridPos) -> bool {
        take(&mut self.food, pos)
    }

    /// Consume the first gold tile at `pos`, if any.
    pub fn take_gold(&mut self, pos: GridPos) -> bool {
        take(&mut self.gold, pos)
    }

    /// Destroy every tile within the blast circle. Returns how many tiles
    /// were removed.
    ///
    /// The circle test matches the artillery test for pixels:
    /// `dist^2 <= (diameter/2)^2`, computed as `4*dist^2 <= diameter^2` to
    /// stay exact for odd diameters.
    pub fn sweep_blast(&mut self, center: GridPos, diameter: i64) -> usize {
        let before = self.food.len() + self.gold.len();
        let inside = |pos: &GridPos| 4 * pos.distance_squared(center) <= diameter * diameter;
        self.food.retain(|pos| !inside(pos));
        self.gold.retain(|pos| !inside(pos));
        before - (self.food.len() + self.gold.len())
    }
}

fn nearest(tiles: &[GridPos], from: GridPos) -> Option<GridPos> {
    let mut best: Option<(i32, GridPos)> = None;
    for &tile in tiles {
        let dist = from.manhattan(tile);
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, tile));
        }
    }
    best.map(|(_, tile)| tile)
}

fn take(tiles: &mut Vec<GridPos>, pos: GridPos) -> bool {
    if let Some(index) = tiles.iter().position(|&tile| tile == pos) {
        tiles.remove(index);
        true
    } else {
        false
    }
}
