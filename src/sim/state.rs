//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bricks::BrickGrid;
use crate::settings::{Settings, SpeedPolicy};
use crate::{rotate_by, with_magnitude};

/// Whether the ball is parked waiting for launch or in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Ball held at the launch point, banner showing
    #[default]
    AwaitingLaunch,
    /// Ball in flight
    InPlay,
}

/// Horizontal paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Output events for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Brick at this creation index was destroyed
    BrickHidden { index: usize },
    ShowMessage { text: String, emphasized: bool },
    ClearMessage,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center; y never changes
    pub pos: Vec2,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Distance travelled per tick
    pub speed: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub min_x: f32,
    pub max_x: f32,
}

impl Paddle {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(0.0, settings.paddle_y),
            moving_left: false,
            moving_right: false,
            speed: settings.paddle_speed,
            half_width: settings.paddle_half_width,
            half_height: settings.paddle_half_height,
            min_x: settings.paddle_min_x,
            max_x: settings.paddle_max_x,
        }
    }

    pub fn set_intent(&mut self, direction: Direction, active: bool) {
        match direction {
            Direction::Left => self.moving_left = active,
            Direction::Right => self.moving_right = active,
        }
    }

    /// Apply held directions, clamping each move to its travel limit.
    ///
    /// Left is applied before right; holding both is allowed and may not
    /// cancel exactly when one move is clipped by a limit.
    pub fn tick(&mut self) {
        if self.moving_left {
            self.pos.x = (self.pos.x - self.speed).max(self.min_x);
        }
        if self.moving_right {
            self.pos.x = (self.pos.x + self.speed).min(self.max_x);
        }
    }

    /// Y of the top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.half_height
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub moving: bool,
    pub base_speed: f32,
    pub max_speed: f32,
    /// Collision radius (0 = point)
    pub radius: f32,
    pub launch_angle: f32,
    pub policy: SpeedPolicy,
    /// Side walls at ±wall_x
    pub wall_x: f32,
    pub top_y: f32,
}

impl Ball {
    /// New ball parked at the launch origin
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: settings.launch_origin,
            vel: Vec2::ZERO,
            moving: false,
            base_speed: settings.base_speed,
            max_speed: settings.max_speed,
            radius: settings.ball_radius,
            launch_angle: settings.launch_angle,
            policy: settings.speed_policy,
            wall_x: settings.wall_x,
            top_y: settings.top_y,
        }
    }

    /// Start moving at the fixed launch heading.
    ///
    /// Returns false (and leaves velocity alone) when already moving.
    pub fn launch(&mut self) -> bool {
        if self.moving {
            return false;
        }
        self.vel = Vec2::from_angle(self.launch_angle) * self.cruise_speed();
        self.moving = true;
        true
    }

    /// Advance one step and bounce off the side and top walls
    pub fn tick(&mut self) {
        if !self.moving {
            return;
        }
        self.pos += self.vel;

        if self.pos.x.abs() > self.wall_x {
            // Point back into the field; equals a plain reversal when heading out
            self.vel.x = -self.vel.x.abs() * self.pos.x.signum();
        }
        if self.pos.y > self.top_y {
            self.vel.y = -self.vel.y.abs();
        }

        self.normalize_speed();
    }

    /// Reconcile speed with the configured policy. Never leaves |vel| above max_speed.
    pub fn normalize_speed(&mut self) {
        let speed = self.vel.length();
        if speed == 0.0 {
            return;
        }
        if speed > self.max_speed {
            self.vel = with_magnitude(self.vel, self.max_speed);
        } else if self.policy == SpeedPolicy::Normalize {
            self.vel = with_magnitude(self.vel, self.cruise_speed());
        }
    }

    /// Speed the ball settles at: `base_speed`, never above the cap
    #[inline]
    pub fn cruise_speed(&self) -> f32 {
        self.base_speed.min(self.max_speed)
    }

    /// Park at `origin` with no velocity
    pub fn reset(&mut self, origin: Vec2) {
        self.pos = origin;
        self.vel = Vec2::ZERO;
        self.moving = false;
    }

    /// Rotate the velocity by `delta` radians, keeping its magnitude
    pub fn nudge_angle(&mut self, delta: f32) {
        self.vel = rotate_by(self.vel, delta);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Complete session state. Owned exclusively by the game loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub phase: SessionState,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Number of `advance()` calls so far
    pub tick_count: u64,
    /// Events not yet handed to the presentation layer
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Build a fresh session: paddle centered, ball parked, full grid, banner up
    pub fn new(settings: Settings) -> Self {
        let bricks = BrickGrid::build(
            settings.rows,
            settings.columns,
            settings.row_spacing,
            settings.col_spacing,
            settings.grid_origin,
            settings.brick_size,
            &settings.palette,
        );
        let mut state = Self {
            paddle: Paddle::new(&settings),
            ball: Ball::new(&settings),
            bricks,
            phase: SessionState::AwaitingLaunch,
            tick_count: 0,
            events: Vec::new(),
            settings,
        };
        state.show_banner();
        state
    }

    pub(crate) fn show_banner(&mut self) {
        self.events.push(GameEvent::ShowMessage {
            text: self.settings.banner.clone(),
            emphasized: true,
        });
    }

    /// Take events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
