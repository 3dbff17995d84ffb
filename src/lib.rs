//! Ball Buster - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, collisions, session state)
//! - `settings`: Session parameters fixed at construction
//! - `presenter`: Snapshot/event seam consumed by an external presentation layer

pub mod presenter;
pub mod settings;
pub mod sim;

pub use presenter::{Frame, LogPresenter, Presenter};
pub use settings::{Settings, SettingsError, SpeedPolicy};

use glam::Vec2;

/// Game configuration constants (defaults reproduce the classic 600x600 field)
pub mod consts {
    /// Side walls sit at ±WALL_X
    pub const WALL_X: f32 = 290.0;
    pub const TOP_Y: f32 = 290.0;
    /// Ball is lost once its center drops below this
    pub const FLOOR_Y: f32 = -290.0;

    /// Paddle defaults
    pub const PADDLE_Y: f32 = -250.0;
    pub const PADDLE_HALF_WIDTH: f32 = 60.0;
    pub const PADDLE_HALF_HEIGHT: f32 = 10.0;
    pub const PADDLE_TRAVEL: f32 = 250.0;
    pub const PADDLE_SPEED: f32 = BALL_MAX_SPEED + 0.5;
    /// Height of the catch band below the paddle's top edge
    pub const PADDLE_BAND: f32 = 10.0;
    /// Horizontal velocity given to a ball striking the paddle's very edge
    pub const PADDLE_BIAS: f32 = 2.0;

    /// Ball defaults
    pub const BALL_BASE_SPEED: f32 = std::f32::consts::SQRT_2;
    pub const BALL_MAX_SPEED: f32 = 1.5;
    pub const BALL_LAUNCH_X: f32 = 0.0;
    pub const BALL_LAUNCH_Y: f32 = -100.0;
    pub const LAUNCH_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    /// Brick grid defaults
    pub const BRICK_ROWS: usize = 10;
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_ROW_SPACING: f32 = 21.0;
    pub const BRICK_COL_SPACING: f32 = 61.0;
    pub const GRID_ORIGIN_X: f32 = -270.0;
    pub const GRID_ORIGIN_Y: f32 = 239.0;

    /// Rotation applied when a hit leaves a single brick standing (10°)
    pub const FINAL_BRICK_NUDGE: f32 = 10.0 * std::f32::consts::PI / 180.0;

    pub const BANNER: &str = "Press Space to Bust Some Balls";
}

/// Heading of a vector in radians, measured from +x
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Rotate a vector by `delta` radians, preserving its length
#[inline]
pub fn rotate_by(v: Vec2, delta: f32) -> Vec2 {
    Vec2::from_angle(delta).rotate(v)
}

/// Rescale `v` to `magnitude`. A zero vector has no direction and is returned unchanged.
#[inline]
pub fn with_magnitude(v: Vec2, magnitude: f32) -> Vec2 {
    let dir = v.normalize_or_zero();
    if dir == Vec2::ZERO { v } else { dir * magnitude }
}
