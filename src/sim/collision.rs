//! Collision detection and response
//!
//! Detection functions are pure and only report what was hit. Resolution
//! functions mutate the ball (and grid) for a single contact. The tick
//! decides the order and calls each category at most once.

use glam::Vec2;

use super::bricks::BrickGrid;
use super::state::{Ball, Paddle};

/// Where the ball met the paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleContact {
    /// Ball x minus paddle x (negative = left of center)
    pub offset: f32,
}

/// Moving ball inside the catch band below the paddle's top edge and within its width
pub fn ball_paddle_collision(ball: &Ball, paddle: &Paddle, band: f32) -> Option<PaddleContact> {
    if !ball.moving {
        return None;
    }
    let top = paddle.top();
    let in_band = ball.pos.y < top && ball.pos.y > top - band;
    let offset = ball.pos.x - paddle.pos.x;
    if in_band && offset.abs() <= paddle.half_width {
        Some(PaddleContact { offset })
    } else {
        None
    }
}

/// Park the ball on the paddle's top edge and send it back up.
///
/// With a non-zero `bias` the horizontal velocity is replaced by
/// `bias * offset / half_width`, so edge hits leave at steeper angles.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle, contact: PaddleContact, bias: f32) {
    ball.pos.y = paddle.top();
    ball.vel.y = ball.vel.y.abs();
    if bias != 0.0 && paddle.half_width > 0.0 {
        ball.vel.x = bias * (contact.offset / paddle.half_width);
    }
    ball.normalize_speed();
}

/// First alive brick, in creation order, whose box (grown by the ball radius)
/// contains the center of a moving ball
pub fn ball_brick_collision(ball: &Ball, grid: &BrickGrid) -> Option<usize> {
    if !ball.moving {
        return None;
    }
    grid.alive_bricks()
        .find(|(_, brick)| brick.contains(ball.pos, ball.radius))
        .map(|(index, _)| index)
}

/// Destroy the brick and reflect vertically.
///
/// When the hit leaves exactly one brick standing the velocity is also rotated
/// by `nudge`, so the ball can't settle into a vertical loop between the last
/// brick and a wall. Returns whether the nudge fired.
pub fn resolve_brick_hit(ball: &mut Ball, grid: &mut BrickGrid, index: usize, nudge: f32) -> bool {
    if !grid.kill(index) {
        return false;
    }
    ball.vel = reflect_velocity(ball.vel, Vec2::Y);
    if grid.count() == 1 {
        ball.nudge_angle(nudge);
        return true;
    }
    false
}

/// Moving ball whose center has dropped below the floor
pub fn ball_crossed_floor(ball: &Ball, floor_y: f32) -> bool {
    ball.moving && ball.pos.y < floor_y
}

/// Reflect velocity off a surface with unit normal `normal`
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle_of;
    use crate::settings::Settings;

    fn setup() -> (Settings, Paddle, Ball) {
        let settings = Settings::default();
        let paddle = Paddle::new(&settings);
        let mut ball = Ball::new(&settings);
        ball.moving = true;
        (settings, paddle, ball)
    }

    #[test]
    fn test_paddle_band_hit() {
        let (settings, paddle, mut ball) = setup();
        ball.pos = Vec2::new(30.0, -243.0);
        let contact = ball_paddle_collision(&ball, &paddle, settings.paddle_band).unwrap();
        assert_eq!(contact.offset, 30.0);
    }

    #[test]
    fn test_paddle_miss_outside_band_or_width() {
        let (settings, paddle, mut ball) = setup();
        // Above the top edge
        ball.pos = Vec2::new(0.0, -239.0);
        assert!(ball_paddle_collision(&ball, &paddle, settings.paddle_band).is_none());
        // Below the band
        ball.pos = Vec2::new(0.0, -251.0);
        assert!(ball_paddle_collision(&ball, &paddle, settings.paddle_band).is_none());
        // Past the edge
        ball.pos = Vec2::new(60.5, -245.0);
        assert!(ball_paddle_collision(&ball, &paddle, settings.paddle_band).is_none());
        // Exactly on the edge counts
        ball.pos = Vec2::new(-60.0, -245.0);
        assert!(ball_paddle_collision(&ball, &paddle, settings.paddle_band).is_some());
    }

    #[test]
    fn test_resolve_paddle_hit_biases_by_offset() {
        let (settings, paddle, mut ball) = setup();
        ball.pos = Vec2::new(30.0, -245.0);
        ball.vel = Vec2::new(-1.0, -1.0);
        let contact = PaddleContact { offset: 30.0 };
        resolve_paddle_hit(&mut ball, &paddle, contact, settings.paddle_bias);

        assert_eq!(ball.pos.y, settings.paddle_top());
        assert!(ball.vel.y > 0.0);
        // Right-of-center hit steers right
        assert!(ball.vel.x > 0.0);
        assert!((ball.speed() - settings.base_speed).abs() < 1e-5);
    }

    #[test]
    fn test_resolve_paddle_hit_without_bias_keeps_vx_sign() {
        let (_, paddle, mut ball) = setup();
        ball.pos = Vec2::new(30.0, -245.0);
        ball.vel = Vec2::new(-1.0, -1.0);
        resolve_paddle_hit(&mut ball, &paddle, PaddleContact { offset: 30.0 }, 0.0);
        assert!(ball.vel.x < 0.0);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_first_brick_in_creation_order_wins() {
        let (_, _, mut ball) = setup();
        let mut grid = BrickGrid::build(
            1,
            2,
            21.0,
            10.0,
            Vec2::ZERO,
            Vec2::new(60.0, 20.0),
            &["red".to_string()],
        );
        // Overlaps both bricks
        ball.pos = Vec2::new(5.0, 0.0);
        assert_eq!(ball_brick_collision(&ball, &grid), Some(0));
        grid.kill(0);
        assert_eq!(ball_brick_collision(&ball, &grid), Some(1));
    }

    #[test]
    fn test_ball_radius_grows_brick_box() {
        let (_, _, mut ball) = setup();
        let grid = BrickGrid::build(1, 1, 21.0, 61.0, Vec2::ZERO, Vec2::new(60.0, 20.0), &[]);
        ball.pos = Vec2::new(0.0, 14.0);
        assert_eq!(ball_brick_collision(&ball, &grid), None);
        ball.radius = 5.0;
        assert_eq!(ball_brick_collision(&ball, &grid), Some(0));
    }

    #[test]
    fn test_brick_hit_reflects_and_kills() {
        let (settings, _, mut ball) = setup();
        let mut grid = BrickGrid::build(
            1,
            3,
            21.0,
            61.0,
            Vec2::ZERO,
            Vec2::new(60.0, 20.0),
            &settings.palette,
        );
        ball.vel = Vec2::new(1.0, 1.0);
        let nudged = resolve_brick_hit(&mut ball, &mut grid, 0, settings.final_brick_nudge);
        assert!(!nudged);
        assert_eq!(ball.vel, Vec2::new(1.0, -1.0));
        assert_eq!(grid.count(), 2);
    }

    #[test]
    fn test_brick_hit_leaving_one_nudges() {
        let (settings, _, mut ball) = setup();
        let mut grid = BrickGrid::build(
            1,
            2,
            21.0,
            61.0,
            Vec2::ZERO,
            Vec2::new(60.0, 20.0),
            &settings.palette,
        );
        ball.vel = Vec2::new(0.0, 1.2);
        let reflected = Vec2::new(0.0, -1.2);
        let nudged = resolve_brick_hit(&mut ball, &mut grid, 1, settings.final_brick_nudge);
        assert!(nudged);
        assert_eq!(grid.count(), 1);
        let turned = angle_of(ball.vel) - angle_of(reflected);
        assert!((turned - settings.final_brick_nudge).abs() < 1e-5);
        assert!((ball.speed() - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_dead_brick_cannot_be_resolved_twice() {
        let (settings, _, mut ball) = setup();
        let mut grid = BrickGrid::build(1, 2, 21.0, 61.0, Vec2::ZERO, Vec2::new(60.0, 20.0), &[]);
        ball.vel = Vec2::new(1.0, 1.0);
        resolve_brick_hit(&mut ball, &mut grid, 0, settings.final_brick_nudge);
        let vel = ball.vel;
        assert!(!resolve_brick_hit(&mut ball, &mut grid, 0, settings.final_brick_nudge));
        assert_eq!(ball.vel, vel);
    }

    #[test]
    fn test_floor_crossing() {
        let (settings, _, mut ball) = setup();
        ball.pos = Vec2::new(0.0, settings.floor_y - 0.1);
        assert!(ball_crossed_floor(&ball, settings.floor_y));
        ball.moving = false;
        assert!(!ball_crossed_floor(&ball, settings.floor_y));
        ball.moving = true;
        ball.pos.y = settings.floor_y;
        assert!(!ball_crossed_floor(&ball, settings.floor_y));
    }

    #[test]
    fn test_reflect_off_brick_face_flips_vy_only() {
        let up = reflect_velocity(Vec2::new(0.7, 1.1), Vec2::Y);
        assert!((up - Vec2::new(0.7, -1.1)).length() < 1e-6);

        // Same result from the underside or the top
        let down = reflect_velocity(Vec2::new(-0.3, -0.9), Vec2::Y);
        assert!((down - Vec2::new(-0.3, 0.9)).length() < 1e-6);
    }

    #[test]
    fn test_parked_ball_ignores_paddle_and_bricks() {
        let (settings, paddle, mut ball) = setup();
        ball.moving = false;
        ball.pos = Vec2::new(0.0, -245.0);
        assert!(ball_paddle_collision(&ball, &paddle, settings.paddle_band).is_none());

        let grid = BrickGrid::build(1, 1, 21.0, 61.0, Vec2::ZERO, Vec2::new(60.0, 20.0), &[]);
        ball.pos = Vec2::ZERO;
        assert_eq!(ball_brick_collision(&ball, &grid), None);
    }

    #[test]
    fn test_zero_width_paddle_keeps_velocity_finite() {
        let (_, mut paddle, mut ball) = setup();
        paddle.half_width = 0.0;
        ball.pos = Vec2::new(0.0, -245.0);
        ball.vel = Vec2::new(0.5, -1.0);
        resolve_paddle_hit(&mut ball, &paddle, PaddleContact { offset: 0.0 }, 2.0);
        assert!(ball.vel.is_finite());
        assert!(ball.vel.y > 0.0);
    }
}
