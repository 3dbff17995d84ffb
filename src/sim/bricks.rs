//! Fixed brick grid
//!
//! Bricks are never removed from the backing vector. A destroyed brick is
//! tombstoned (`alive = false`) so creation indices stay stable for the
//! presentation layer and a scan can't be invalidated mid-iteration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A destructible rectangular obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Center
    pub pos: Vec2,
    pub half_width: f32,
    pub half_height: f32,
    /// Cosmetic only
    pub color: String,
    pub alive: bool,
}

impl Brick {
    /// Strict point-in-box test against the box grown by `margin` on every side
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let d = (point - self.pos).abs();
        d.x < self.half_width + margin && d.y < self.half_height + margin
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Populate row-major from the top-left brick center.
    ///
    /// Columns step right by `col_spacing`, rows step down by `row_spacing`.
    /// Row `r` takes `palette[r % palette.len()]`.
    pub fn build(
        rows: usize,
        columns: usize,
        row_spacing: f32,
        col_spacing: f32,
        origin_top_left: Vec2,
        brick_size: Vec2,
        palette: &[String],
    ) -> Self {
        let half = brick_size * 0.5;
        let mut bricks = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            let color = if palette.is_empty() {
                String::new()
            } else {
                palette[row % palette.len()].clone()
            };
            for col in 0..columns {
                bricks.push(Brick {
                    pos: origin_top_left
                        + Vec2::new(col as f32 * col_spacing, -(row as f32) * row_spacing),
                    half_width: half.x,
                    half_height: half.y,
                    color: color.clone(),
                    alive: true,
                });
            }
        }
        Self { bricks }
    }

    /// Alive bricks with their creation index, in creation order.
    ///
    /// Lazy and re-evaluated on every call.
    pub fn alive_bricks(&self) -> impl Iterator<Item = (usize, &Brick)> + '_ {
        self.bricks.iter().enumerate().filter(|(_, b)| b.alive)
    }

    /// Number of alive bricks
    pub fn count(&self) -> usize {
        self.alive_bricks().count()
    }

    /// Total bricks ever created, alive or not
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn is_cleared(&self) -> bool {
        self.count() == 0
    }

    pub fn get(&self, index: usize) -> Option<&Brick> {
        self.bricks.get(index)
    }

    /// Tombstone a brick. Returns true only on the alive -> dead transition.
    pub fn kill(&mut self, index: usize) -> bool {
        match self.bricks.get_mut(index) {
            Some(brick) if brick.alive => {
                brick.alive = false;
                true
            }
            _ => false,
        }
    }
}
