//! Simulation tick
//!
//! One `advance()` is one frame of physics: paddle, then ball, then the
//! collision passes in fixed order against the ball's post-move position.

use serde::{Deserialize, Serialize};

use super::collision::{
    ball_brick_collision, ball_crossed_floor, ball_paddle_collision, resolve_brick_hit,
    resolve_paddle_hit,
};
use super::state::{Direction, GameEvent, GameState, SessionState};
use crate::presenter::Frame;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Space,
}

/// Raw key transitions from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

impl GameState {
    /// Map a key event onto paddle intent or the launch trigger
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Left) => self.paddle.set_intent(Direction::Left, true),
            InputEvent::KeyUp(Key::Left) => self.paddle.set_intent(Direction::Left, false),
            InputEvent::KeyDown(Key::Right) => self.paddle.set_intent(Direction::Right, true),
            InputEvent::KeyUp(Key::Right) => self.paddle.set_intent(Direction::Right, false),
            InputEvent::KeyDown(Key::Space) => self.launch(),
            InputEvent::KeyUp(Key::Space) => {}
        }
    }

    /// Release the ball. Ignored while in play.
    pub fn launch(&mut self) {
        if self.phase == SessionState::InPlay {
            return;
        }
        if self.ball.launch() {
            self.phase = SessionState::InPlay;
            self.events.push(GameEvent::ClearMessage);
            log::info!(
                "Ball launched at tick {} with velocity ({:.3}, {:.3})",
                self.tick_count,
                self.ball.vel.x,
                self.ball.vel.y
            );
        }
    }

    /// Run one tick and snapshot the result
    pub fn advance(&mut self) -> Frame {
        tick(self);
        Frame::capture(self)
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) {
    state.tick_count += 1;

    state.paddle.tick();
    state.ball.tick();

    // Paddle
    let band = state.settings.paddle_band;
    if let Some(contact) = ball_paddle_collision(&state.ball, &state.paddle, band) {
        resolve_paddle_hit(
            &mut state.ball,
            &state.paddle,
            contact,
            state.settings.paddle_bias,
        );
        log::debug!("Paddle hit at offset {:.1}", contact.offset);
    }

    // Bricks: at most one per tick
    if let Some(index) = ball_brick_collision(&state.ball, &state.bricks) {
        let nudged = resolve_brick_hit(
            &mut state.ball,
            &mut state.bricks,
            index,
            state.settings.final_brick_nudge,
        );
        state.events.push(GameEvent::BrickHidden { index });
        log::debug!(
            "Brick {} destroyed, {} remaining{}",
            index,
            state.bricks.count(),
            if nudged { " (final-brick nudge)" } else { "" }
        );
        if state.bricks.is_cleared() {
            log::info!("All bricks cleared at tick {}", state.tick_count);
        }
    }

    // Floor
    if ball_crossed_floor(&state.ball, state.settings.floor_y) {
        state.ball.reset(state.settings.launch_origin);
        state.phase = SessionState::AwaitingLaunch;
        state.show_banner();
        log::info!("Ball lost at tick {}", state.tick_count);
    }
}
