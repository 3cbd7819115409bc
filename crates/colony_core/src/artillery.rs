//! Artillery bombardment.
//!
//! Each colony owning artillery fires on its own independent timer. A
//! strike aims at a random pixel of the configured target colony (falling
//! back to a random grid cell), scatters around the aim point unless the
//! battery is fully focused, and destroys every pixel and tile inside the
//! blast circle. Friendly fire is permitted.

use rand::Rng;

use crate::colony::{ArtilleryTarget, Colony};
use crate::grid::{Grid, GridPos};
use crate::tiles::ResourceField;

/// Strike period at fire-rate level 0, in milliseconds.
pub const BASE_STRIKE_PERIOD_MS: u64 = 5000;

/// Strike period reduction per fire-rate level.
pub const STRIKE_PERIOD_STEP_MS: u64 = 500;

/// Floor for the strike period.
pub const MIN_STRIKE_PERIOD_MS: u64 = 1000;

/// Scatter radius at focus level 0, in cells.
pub const BASE_SCATTER: i32 = 10;

/// Scatter radius reduction per focus level.
pub const SCATTER_STEP: i32 = 2;

/// Floor for the scatter radius. At the floor no scatter is applied.
pub const MIN_SCATTER: i32 = 0;

/// Blast diameter at area level 0, in cells.
pub const BASE_DIAMETER: i64 = 5;

/// Blast diameter increase per area level.
pub const DIAMETER_STEP: i64 = 2;

/// Time between strikes for a given fire-rate level.
#[must_use]
pub fn strike_period_ms(fire_rate_level: u8) -> u64 {
    BASE_STRIKE_PERIOD_MS
        .saturating_sub(STRIKE_PERIOD_STEP_MS * u64::from(fire_rate_level))
        .max(MIN_STRIKE_PERIOD_MS)
}

/// Maximum aim-point offset for a given focus level.
#[must_use]
pub fn scatter_radius(focus_level: u8) -> i32 {
    (BASE_SCATTER - SCATTER_STEP * i32::from(focus_level)).max(MIN_SCATTER)
}

/// Blast diameter for a given area level.
#[must_use]
pub fn blast_diameter(area_level: u8) -> i64 {
    BASE_DIAMETER + DIAMETER_STEP * i64::from(area_level)
}

/// Whether `pos` lies inside a blast of `diameter` centered at `center`.
///
/// The check is `dist^2 <= (diameter/2)^2`, computed as
/// `4*dist^2 <= diameter^2` so odd diameters stay exact in integers.
#[must_use]
pub fn in_blast(pos: GridPos, center: GridPos, diameter: i64) -> bool {
    4 * pos.distance_squared(center) <= diameter * diameter
}

/// What one strike destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeReport {
    /// Impact center after scatter and clamping.
    pub center: GridPos,
    /// Pixels destroyed across all colonies (friendly fire included).
    pub pixels_destroyed: usize,
    /// Food and gold tiles destroyed.
    pub tiles_destroyed: usize,
}

/// Fire one strike for the colony at `firing_index`.
///
/// The caller is responsible for the defensive ownership/defeat check and
/// for re-evaluating defeats afterwards.
pub fn fire(
    colonies: &mut [Colony],
    firing_index: usize,
    grid: &Grid,
    field: &mut ResourceField,
    rng: &mut impl Rng,
) -> StrikeReport {
    let colony = &colonies[firing_index];
    let focus_level = colony.levels.artillery_focus;
    let diameter = blast_diameter(colony.levels.artillery_area);

    // Aim point: a random pixel of a valid, living target colony.
    let aim = match colony.artillery_target {
        ArtilleryTarget::Colony(target) if target != firing_index => colonies
            .get(target)
            .filter(|c| !c.defeated && !c.pixels.is_empty())
            .map(|c| c.pixels[rng.gen_range(0..c.pixels.len())].pos),
        _ => None,
    };

    let center = match aim {
        Some(point) => {
            let scatter = scatter_radius(focus_level);
            if scatter > MIN_SCATTER {
                grid.clamp(scatter_offset(point, scatter, rng))
            } else {
                point
            }
        }
        // No valid aim: the shell lands anywhere on the grid.
        None => grid.random_pos(rng),
    };

    let mut pixels_destroyed = 0;
    for colony in colonies.iter_mut() {
        let before = colony.pixels.len();
        colony.pixels.retain(|p| !in_blast(p.pos, center, diameter));
        let lost = before - colony.pixels.len();
        if lost > 0 {
            tracing::debug!(
                colony = colony.color.name(),
                lost,
                "pixels caught in blast"
            );
        }
        pixels_destroyed += lost;
    }
    let tiles_destroyed = field.sweep_blast(center, diameter);

    tracing::info!(
        colony = colonies[firing_index].color.name(),
        x = center.x,
        y = center.y,
        pixels_destroyed,
        tiles_destroyed,
        "artillery strike"
    );

    StrikeReport {
        center,
        pixels_destroyed,
        tiles_destroyed,
    }
}

/// Offset `point` by a random angle and a uniform random distance in
/// `[0, scatter]`.
#[allow(clippy::cast_possible_truncation)]
fn scatter_offset(point: GridPos, scatter: i32, rng: &mut impl Rng) -> GridPos {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let distance = rng.gen_range(0.0..=f64::from(scatter));
    let dx = (distance * angle.cos()).round() as i32;
    let dy = (distance * angle.sin()).round() as i32;
    GridPos::new(point.x + dx, point.y + dy)
}
