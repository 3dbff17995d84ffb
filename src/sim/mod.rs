//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per `advance()` call, no wall-clock time
//! - Stable iteration order (brick creation order)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickGrid};
pub use collision::{
    PaddleContact, ball_brick_collision, ball_crossed_floor, ball_paddle_collision,
    reflect_velocity, resolve_brick_hit, resolve_paddle_hit,
};
pub use state::{Ball, Direction, GameEvent, GameState, Paddle, SessionState};
pub use tick::{InputEvent, Key, tick};
