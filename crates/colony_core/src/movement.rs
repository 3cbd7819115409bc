//! Movement & targeting engine.
//!
//! Each movement tick walks one colony's pixels and moves every pixel one
//! cell: either a deliberate step toward the colony's priority target, or
//! a uniformly random axis-aligned step. Position changes immediately
//! resolve combat and resource collection for that pixel.
//!
//! Pixels are visited back-to-front so pixels removed by combat and
//! pixels spawned from food (appended to the list) never skew the scan.

use rand::Rng;

use crate::colony::{Colony, Pixel, Priority};
use crate::combat::{self, ContactOutcome};
use crate::grid::{Grid, GridPos};
use crate::tiles::ResourceField;

/// The four axis-aligned step directions.
const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Idle moves a pixel makes before re-seeking its priority target.
#[must_use]
pub fn required_idle_moves(focus_level: u8) -> u32 {
    (10 - i32::from(focus_level)).max(1) as u32
}

/// Run one movement tick for the colony at `colony_index`.
///
/// Applies movement, combat and resource collection for every pixel the
/// colony had at the start of the tick. Defeat flags are not touched
/// here; the caller re-evaluates them after the tick.
pub fn movement_tick(
    colonies: &mut [Colony],
    colony_index: usize,
    grid: &Grid,
    field: &mut ResourceField,
    rng: &mut impl Rng,
) {
    if colonies[colony_index].defeated {
        return;
    }
    let mut index = colonies[colony_index].pixels.len();
    while index > 0 {
        index -= 1;
        step_pixel(colonies, colony_index, index, grid, field, rng);
    }
}

/// Move one pixel and apply its per-move side effects.
fn step_pixel(
    colonies: &mut [Colony],
    colony_index: usize,
    pixel_index: usize,
    grid: &Grid,
    field: &mut ResourceField,
    rng: &mut impl Rng,
) {
    let colony = &colonies[colony_index];
    let priority = colony.priority;
    let required_idle = required_idle_moves(colony.levels.focus);
    let mut pixel = colony.pixels[pixel_index];

    let mut moved = false;
    if priority != Priority::None && pixel.retarget_counter >= required_idle {
        pixel.retarget_counter = 0;
        let target = match priority {
            Priority::Food => field.nearest_food(pixel.pos),
            Priority::Gold => field.nearest_gold(pixel.pos),
            Priority::EnemyPixel => nearest_enemy_pixel(colonies, colony_index, pixel.pos),
            Priority::None => None,
        };
        if let Some(target) = target {
            let dx = (target.x - pixel.pos.x).signum();
            let dy = (target.y - pixel.pos.y).signum();
            if dx != 0 || dy != 0 {
                pixel.pos = grid.step(pixel.pos, dx, dy);
                moved = true;
                if priority == Priority::EnemyPixel {
                    // Enemy-seeking counts directed steps toward its idle
                    // quota too; food/gold seeking does not. Inherited
                    // asymmetry, kept on purpose.
                    pixel.retarget_counter += 1;
                }
            }
        }
    }

    if !moved {
        let (dx, dy) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
        pixel.pos = grid.step(pixel.pos, dx, dy);
        if priority != Priority::None {
            pixel.retarget_counter += 1;
        }
    }

    colonies[colony_index].pixels[pixel_index] = pixel;

    if let ContactOutcome::AttackerDestroyed { .. } =
        combat::resolve_contact(colonies, colony_index, pixel.pos, rng)
    {
        colonies[colony_index].pixels.remove(pixel_index);
        // A destroyed attacker collects nothing this tick.
        return;
    }

    collect_resources(&mut colonies[colony_index], pixel.pos, field);
}

/// Consume a food or gold tile under the pixel, if present.
fn collect_resources(colony: &mut Colony, pos: GridPos, field: &mut ResourceField) {
    if field.take_food(pos) {
        let spawned = 1 + u32::from(colony.levels.food_yield);
        for _ in 0..spawned {
            colony.pixels.push(Pixel::new(pos));
        }
        tracing::debug!(
            colony = colony.color.name(),
            x = pos.x,
            y = pos.y,
            spawned,
            "food consumed"
        );
    }
    if field.take_gold(pos) {
        colony.gold += 1;
        tracing::debug!(colony = colony.color.name(), x = pos.x, y = pos.y, "gold collected");
    }
}

/// Nearest enemy pixel by Manhattan distance; ties break toward the first
/// pixel encountered in colony-then-pixel scan order.
#[must_use]
pub fn nearest_enemy_pixel(
    colonies: &[Colony],
    colony_index: usize,
    from: GridPos,
) -> Option<GridPos> {
    let mut best: Option<(i32, GridPos)> = None;
    for (other_index, other) in colonies.iter().enumerate() {
        if other_index == colony_index {
            continue;
        }
        for enemy in &other.pixels {
            let dist = from.manhattan(enemy.pos);
            if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                best = Some((dist, enemy.pos));
            }
        }
    }
    best.map(|(_, pos)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::ColonyColor;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn colonies() -> Vec<Colony> {
        ColonyColor::ALL.iter().map(|&c| Colony::pristine(c)).collect()
    }

    #[test]
    fn test_required_idle_moves_floor() {
        assert_eq!(required_idle_moves(0), 10);
        assert_eq!(required_idle_moves(4), 6);
        assert_eq!(required_idle_moves(8), 2);
    }

    #[test]
    fn test_random_walk_stays_in_bounds() {
        let grid = Grid::new(5, 5);
        let mut field = ResourceField::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut colonies = colonies();
        colonies[0].pixels.push(Pixel::new(GridPos::new(0, 0)));
        for _ in 0..200 {
            movement_tick(&mut colonies, 0, &grid, &mut field, &mut rng);
            assert!(grid.contains(colonies[0].pixels[0].pos));
        }
    }

    #[test]
    fn test_none_priority_never_advances_counter() {
        let grid = Grid::new(20, 20);
        let mut field = ResourceField::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut colonies = colonies();
        colonies[0].pixels.push(Pixel::new(GridPos::new(10, 10)));
        for _ in 0..25 {
            movement_tick(&mut colonies, 0, &grid, &mut field, &mut rng);
        }
        assert_eq!(colonies[0].pixels[0].retarget_counter, 0);
    }

    #[test]
    fn test_directed_step_toward_food() {
        let grid = Grid::new(20, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut colonies = colonies();
        colonies[0].priority = Priority::Food;
        // Counter at quota: the next move is a deliberate diagonal step.
        colonies[0].pixels.push(Pixel {
            pos: GridPos::new(10, 10),
            retarget_counter: 10,
        });
        let mut field = ResourceField::with_tiles(vec![GridPos::new(13, 12)], vec![]);
        movement_tick(&mut colonies, 0, &grid, &mut field, &mut rng);
        let pixel = colonies[0].pixels[0];
        assert_eq!(pixel.pos, GridPos::new(11, 11));
        // Food/gold seeking resets and does not count directed steps.
        assert_eq!(pixel.retarget_counter, 0);
    }

    #[test]
    fn test_enemy_seek_counts_directed_steps() {
        let grid = Grid::new(20, 20);
        let mut field = ResourceField::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut colonies = colonies();
        colonies[0].priority = Priority::EnemyPixel;
        colonies[0].pixels.push(Pixel {
            pos: GridPos::new(2, 2),
            retarget_counter: 10,
        });
        colonies[1].pixels.push(Pixel::new(GridPos::new(8, 2)));
        movement_tick(&mut colonies, 0, &grid, &mut field, &mut rng);
        let pixel = colonies[0].pixels[0];
        assert_eq!(pixel.pos, GridPos::new(3, 2));
        // The inherited asymmetry: a directed enemy-seek step still
        // advances the counter past the reset.
        assert_eq!(pixel.retarget_counter, 1);
    }

    #[test]
    fn test_food_consumption_spawns_pixels() {
        let grid = Grid::new(20, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut colonies = colonies();
        colonies[0].priority = Priority::Food;
        colonies[0].levels.food_yield = 2;
        colonies[0].pixels.push(Pixel {
            pos: GridPos::new(5, 5),
            retarget_counter: 10,
        });
        // Food one diagonal step away; the pixel lands on it this tick.
        let mut field = ResourceField::with_tiles(vec![GridPos::new(6, 6)], vec![]);
        movement_tick(&mut colonies, 0, &grid, &mut field, &mut rng);
        // Consumer plus 1 + food_yield spawned at the tile cell.
        assert_eq!(colonies[0].pixels.len(), 4);
        assert!(field.food().is_empty());
        assert!(colonies[0]
            .pixels
            .iter()
            .skip(1)
            .all(|p| p.pos == GridPos::new(6, 6) && p.retarget_counter == 0));
    }

    #[test]
    fn test_gold_collection() {
        let grid = Grid::new(20, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut colonies = colonies();
        colonies[0].priority = Priority::Gold;
        colonies[0].pixels.push(Pixel {
            pos: GridPos::new(5, 5),
            retarget_counter: 10,
        });
        let mut field = ResourceField::with_tiles(vec![], vec![GridPos::new(6, 5)]);
        movement_tick(&mut colonies, 0, &grid, &mut field, &mut rng);
        assert_eq!(colonies[0].gold, 1);
        assert!(field.gold().is_empty());
    }

    #[test]
    fn test_nearest_enemy_tie_breaks_by_scan_order() {
        let mut colonies = colonies();
        colonies[1].pixels.push(Pixel::new(GridPos::new(4, 0)));
        colonies[2].pixels.push(Pixel::new(GridPos::new(0, 4)));
        // Equidistant: the lower colony index wins.
        let found = nearest_enemy_pixel(&colonies, 0, GridPos::new(0, 0));
        assert_eq!(found, Some(GridPos::new(4, 0)));
    }
}
