use glam::Vec3;

use crate::components::Side;

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player1: u8, // Left paddle
    pub player2: u8, // Right paddle
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.player1 = self.player1.saturating_add(1),
            Side::Right => self.player2 = self.player2.saturating_add(1),
        }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.player1,
            Side::Right => self.player2,
        }
    }

    /// Points `side` is ahead by (negative when behind)
    pub fn lead(&self, side: Side) -> i32 {
        i32::from(self.get(side)) - i32::from(self.get(side.opponent()))
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.player1 >= win_score {
            Some(Side::Left)
        } else if self.player2 >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub ball_hit_wall: bool,
    pub ball_hit_paddle: Option<Side>,
    pub scored: Option<Side>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ball_hit_wall = false;
        self.ball_hit_paddle = None;
        self.scored = None;
    }
}

/// Plain copy of everything the physics mutates, for callers that should
/// not touch the world directly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub ball_position: Vec3,
    pub ball_velocity: Vec3,
    pub ball_spin: Vec3,
    pub paddle1_z: f32,
    pub paddle2_z: f32,
}
