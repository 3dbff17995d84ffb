//! Presentation seam
//!
//! The simulation never draws anything. After each tick it hands out a
//! `Frame`: a read-only snapshot plus the one-shot events raised since the
//! previous frame. A `Presenter` maps frames onto whatever backend is in use.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GameState, SessionState};

/// Ball as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub moving: bool,
}

/// Everything a renderer needs for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub phase: SessionState,
    pub paddle: Vec2,
    pub ball: BallSnapshot,
    /// Creation indices of bricks still standing
    pub alive_bricks: Vec<usize>,
    /// Events raised since the previous frame, oldest first
    pub events: Vec<GameEvent>,
}

impl Frame {
    /// Snapshot the state and take its pending events
    pub fn capture(state: &mut GameState) -> Self {
        Self {
            tick: state.tick_count,
            phase: state.phase,
            paddle: state.paddle.pos,
            ball: BallSnapshot {
                pos: state.ball.pos,
                vel: state.ball.vel,
                moving: state.ball.moving,
            },
            alive_bricks: state.bricks.alive_bricks().map(|(i, _)| i).collect(),
            events: state.drain_events(),
        }
    }
}

/// Adapter from simulation frames to a rendering backend
pub trait Presenter {
    fn present(&mut self, frame: &Frame);
}

/// Presenter that writes events to the log; used by the headless driver
#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Message currently on screen, if any
    pub message: Option<String>,
    pub bricks_hidden: usize,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &Frame) {
        for event in &frame.events {
            match event {
                GameEvent::BrickHidden { index } => {
                    self.bricks_hidden += 1;
                    log::info!(
                        "[tick {}] hide brick {} ({} left)",
                        frame.tick,
                        index,
                        frame.alive_bricks.len()
                    );
                }
                GameEvent::ShowMessage { text, emphasized } => {
                    log::info!(
                        "[tick {}] show message {:?} (emphasized: {})",
                        frame.tick,
                        text,
                        emphasized
                    );
                    self.message = Some(text.clone());
                }
                GameEvent::ClearMessage => {
                    log::info!("[tick {}] clear message", frame.tick);
                    self.message = None;
                }
            }
        }
        log::trace!(
            "[tick {}] paddle x={:.1} ball=({:.1}, {:.1})",
            frame.tick,
            frame.paddle.x,
            frame.ball.pos.x,
            frame.ball.pos.y
        );
    }
}
