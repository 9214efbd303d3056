use glam::Vec3;
use rand::Rng;

use crate::{Config, GameRng, Params};

/// Which end of the table a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,  // player 1, x < 0
    Right, // player 2, x > 0
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// 1-based player number as shown on the scoreboard
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub z: f32, // Z position (clamped to reach)
}

impl Paddle {
    pub fn new(side: Side, z: f32) -> Self {
        Self { side, z }
    }

    /// Full 3D position given the table geometry
    pub fn position(&self, config: &Config) -> Vec3 {
        Vec3::new(config.paddle_x(self.side), Params::PADDLE_HEIGHT, self.z)
    }
}

/// Ball component - position, velocity and spin
///
/// Only `spin.z` feeds back into the physics; the other axes exist for the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    pub spin: Vec3,
}

impl Ball {
    pub fn new(pos: Vec3, vel: Vec3) -> Self {
        Self {
            pos,
            vel,
            spin: Vec3::ZERO,
        }
    }

    /// A freshly served ball
    pub fn serve(config: &Config, rng: &mut GameRng) -> Self {
        let mut ball = Self::new(Vec3::ZERO, Vec3::ZERO);
        ball.reset(config, rng);
        ball
    }

    /// Reset ball to the centre of the table, moving toward a random side
    /// at the minimum speed with a small sideways drift
    pub fn reset(&mut self, config: &Config, rng: &mut GameRng) -> Vec3 {
        let vx = if rng.0.gen_bool(0.5) {
            config.min_ball_speed
        } else {
            -config.min_ball_speed
        };
        let vz = rng
            .0
            .gen_range(-Params::SERVE_Z_JITTER..Params::SERVE_Z_JITTER);

        self.vel = Vec3::new(vx, 0.0, vz);
        self.spin = Vec3::ZERO;
        self.pos = Vec3::new(0.0, config.ball_rest_height, 0.0);
        self.pos
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleIntent {
    pub dir: i8, // -1 = up (towards -z), 0 = stop, 1 = down (towards +z)
}

impl PaddleIntent {
    pub const UP: Self = Self { dir: -1 };
    pub const STOP: Self = Self { dir: 0 };
    pub const DOWN: Self = Self { dir: 1 };

    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_places_ball_at_rest_position() {
        let config = Config::new();
        let mut rng = GameRng::new(7);
        let mut ball = Ball::new(Vec3::new(3.0, 0.1, -2.0), Vec3::new(0.14, 0.0, 0.05));
        ball.spin = Vec3::new(0.0, 0.0, 0.08);

        let pos = ball.reset(&config, &mut rng);

        assert_eq!(pos, Vec3::new(0.0, config.ball_rest_height, 0.0));
        assert_eq!(ball.pos, pos);
        assert_eq!(ball.spin, Vec3::ZERO);
        assert_eq!(ball.vel.x.abs(), config.min_ball_speed);
        assert_eq!(ball.vel.y, 0.0);
        assert!(ball.vel.z.abs() <= Params::SERVE_Z_JITTER);
    }

    #[test]
    fn test_serve_direction_varies() {
        let config = Config::new();
        let mut rng = GameRng::new(42);
        let mut saw_left = false;
        let mut saw_right = false;
        for _ in 0..64 {
            let ball = Ball::serve(&config, &mut rng);
            if ball.vel.x < 0.0 {
                saw_left = true;
            } else {
                saw_right = true;
            }
        }
        assert!(saw_left && saw_right, "Serve should go both ways");
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.opponent(), Side::Left);
        assert_eq!(Side::Left.player_number(), 1);
        assert_eq!(Side::Right.player_number(), 2);
    }
}
