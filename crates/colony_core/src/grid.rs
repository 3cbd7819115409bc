//! The bounded 2D grid the simulation plays out on.
//!
//! The grid owns no entities; it only defines the coordinate space,
//! clamping, distance metrics and the four home corners. All coordinates
//! are plain integers and every position handed out by this module is
//! within bounds.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of colonies on the grid. Indices 0-3 map to fixed corners.
pub const COLONY_COUNT: usize = 4;

/// An integer cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    /// Column, 0-based from the left edge.
    pub x: i32,
    /// Row, 0-based from the top edge.
    pub y: i32,
}

impl GridPos {
    /// Create a position from raw coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Squared Euclidean distance to another cell (for blast circles).
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

/// The bounded play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid. Dimensions are clamped to at least 1x1.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Whether a position lies within bounds.
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Clamp a position to the nearest in-bounds cell.
    #[must_use]
    pub fn clamp(&self, pos: GridPos) -> GridPos {
        GridPos {
            x: pos.x.clamp(0, self.width - 1),
            y: pos.y.clamp(0, self.height - 1),
        }
    }

    /// Step from `pos` by the given deltas, clamped to bounds.
    #[must_use]
    pub fn step(&self, pos: GridPos, dx: i32, dy: i32) -> GridPos {
        self.clamp(GridPos::new(pos.x + dx, pos.y + dy))
    }

    /// Home corner for colony `index`.
    ///
    /// 0 = top-left, 1 = top-right, 2 = bottom-left, 3 = bottom-right.
    #[must_use]
    pub const fn corner(&self, index: usize) -> GridPos {
        match index {
            1 => GridPos::new(self.width - 1, 0),
            2 => GridPos::new(0, self.height - 1),
            3 => GridPos::new(self.width - 1, self.height - 1),
            _ => GridPos::new(0, 0),
        }
    }

    /// Uniformly random in-bounds cell.
    pub fn random_pos(&self, rng: &mut impl Rng) -> GridPos {
        GridPos {
            x: rng.gen_range(0..self.width),
            y: rng.gen_range(0..self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_clamp_keeps_in_bounds() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.clamp(GridPos::new(-3, 4)), GridPos::new(0, 4));
        assert_eq!(grid.clamp(GridPos::new(12, 9)), GridPos::new(9, 7));
        assert_eq!(grid.clamp(GridPos::new(5, 5)), GridPos::new(5, 5));
    }

    #[test]
    fn test_corners() {
        let grid = Grid::new(20, 10);
        assert_eq!(grid.corner(0), GridPos::new(0, 0));
        assert_eq!(grid.corner(1), GridPos::new(19, 0));
        assert_eq!(grid.corner(2), GridPos::new(0, 9));
        assert_eq!(grid.corner(3), GridPos::new(19, 9));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridPos::new(1, 2);
        let b = GridPos::new(4, -2);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_distance_squared() {
        let a = GridPos::new(10, 10);
        assert_eq!(a.distance_squared(GridPos::new(11, 11)), 2);
        assert_eq!(a.distance_squared(GridPos::new(14, 10)), 16);
    }

    #[test]
    fn test_random_pos_in_bounds() {
        let grid = Grid::new(7, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(grid.contains(grid.random_pos(&mut rng)));
        }
    }
}
