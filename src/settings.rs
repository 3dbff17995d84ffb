//! Session parameters
//!
//! Fixed at construction. Defaults reproduce the classic game; drivers may
//! load overrides from JSON, where any missing field keeps its default.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How the ball's speed is reconciled after a position update or bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Rescale to `base_speed`, or to `max_speed` when the ball is over the cap
    #[default]
    Normalize,
    /// Only rescale when the ball is over the cap
    CapOnly,
}

impl SpeedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPolicy::Normalize => "normalize",
            SpeedPolicy::CapOnly => "cap_only",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normalize" | "norm" => Some(SpeedPolicy::Normalize),
            "cap_only" | "cap" => Some(SpeedPolicy::CapOnly),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be finite and positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("base_speed {base} exceeds max_speed {max}")]
    BaseAboveMax { base: f32, max: f32 },
    #[error("paddle travel is empty: min_x {min} > max_x {max}")]
    EmptyTravel { min: f32, max: f32 },
    #[error("floor_y {floor} must lie below top_y {top}")]
    FloorAboveTop { floor: f32, top: f32 },
    #[error("brick grid must have at least one row and one column")]
    EmptyGrid,
    #[error("brick palette is empty")]
    EmptyPalette,
}

/// Everything the simulation needs to know about the field, actors and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Side walls at ±wall_x
    pub wall_x: f32,
    pub top_y: f32,
    pub floor_y: f32,

    // === Paddle ===
    pub paddle_y: f32,
    pub paddle_speed: f32,
    pub paddle_half_width: f32,
    pub paddle_half_height: f32,
    pub paddle_min_x: f32,
    pub paddle_max_x: f32,
    /// Catch band height below the paddle's top edge
    pub paddle_band: f32,
    /// Scale of the hit-offset steering (0 disables it)
    pub paddle_bias: f32,

    // === Ball ===
    pub base_speed: f32,
    pub max_speed: f32,
    /// Collision radius; 0 treats the ball as a point
    pub ball_radius: f32,
    pub launch_origin: Vec2,
    /// Launch heading in radians from +x
    pub launch_angle: f32,
    pub speed_policy: SpeedPolicy,

    // === Bricks ===
    pub rows: usize,
    pub columns: usize,
    pub row_spacing: f32,
    pub col_spacing: f32,
    /// Center of the first (top-left) brick
    pub grid_origin: Vec2,
    /// Full width and height of one brick
    pub brick_size: Vec2,
    pub palette: Vec<String>,
    /// Radians added to the heading when a hit leaves one brick standing
    pub final_brick_nudge: f32,

    // === Messages ===
    pub banner: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wall_x: WALL_X,
            top_y: TOP_Y,
            floor_y: FLOOR_Y,

            paddle_y: PADDLE_Y,
            paddle_speed: PADDLE_SPEED,
            paddle_half_width: PADDLE_HALF_WIDTH,
            paddle_half_height: PADDLE_HALF_HEIGHT,
            paddle_min_x: -PADDLE_TRAVEL,
            paddle_max_x: PADDLE_TRAVEL,
            paddle_band: PADDLE_BAND,
            paddle_bias: PADDLE_BIAS,

            base_speed: BALL_BASE_SPEED,
            max_speed: BALL_MAX_SPEED,
            ball_radius: 0.0,
            launch_origin: Vec2::new(BALL_LAUNCH_X, BALL_LAUNCH_Y),
            launch_angle: LAUNCH_ANGLE,
            speed_policy: SpeedPolicy::Normalize,

            rows: BRICK_ROWS,
            columns: BRICK_COLUMNS,
            row_spacing: BRICK_ROW_SPACING,
            col_spacing: BRICK_COL_SPACING,
            grid_origin: Vec2::new(GRID_ORIGIN_X, GRID_ORIGIN_Y),
            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            palette: ["red", "yellow", "green", "blue", "orange"]
                .into_iter()
                .map(String::from)
                .collect(),
            final_brick_nudge: FINAL_BRICK_NUDGE,

            banner: BANNER.to_string(),
        }
    }
}

impl Settings {
    /// Parse a JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Top edge of the paddle, where a caught ball is parked
    pub fn paddle_top(&self) -> f32 {
        self.paddle_y + self.paddle_half_height
    }

    /// Reject parameter combinations the simulation's invariants can't hold under
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("paddle_speed", self.paddle_speed),
            ("paddle_half_width", self.paddle_half_width),
            ("base_speed", self.base_speed),
            ("max_speed", self.max_speed),
            ("wall_x", self.wall_x),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }
        if self.base_speed > self.max_speed {
            return Err(SettingsError::BaseAboveMax {
                base: self.base_speed,
                max: self.max_speed,
            });
        }
        if self.paddle_min_x > self.paddle_max_x {
            return Err(SettingsError::EmptyTravel {
                min: self.paddle_min_x,
                max: self.paddle_max_x,
            });
        }
        if self.floor_y >= self.top_y {
            return Err(SettingsError::FloorAboveTop {
                floor: self.floor_y,
                top: self.top_y,
            });
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(SettingsError::EmptyGrid);
        }
        if self.palette.is_empty() {
            return Err(SettingsError::EmptyPalette);
        }
        Ok(())
    }
}
