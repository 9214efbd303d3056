//! Computer opponent
//!
//! The opponent only looks at the ball once per
//! [`Params::AI_UPDATE_INTERVAL_MS`]. In between it keeps executing the
//! move it last decided on, which is what makes it beatable.

use glam::Vec3;
use rand::Rng;

use crate::{Ball, Config, GameRng, Paddle, PaddleIntent, Params, Side};

/// How well the opponent plays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// 1.0 predicts perfectly; lower values widen the aiming error
    pub accuracy: f32,
    /// Chance per decision of an outright misread
    pub mistake_chance: f64,
    /// Paddle travel cap per tick
    pub max_speed: f32,
}

/// Difficulty bands picked from the opponent's lead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyTier {
    Close,
    /// Opponent far ahead: play worse
    Winning,
    /// Opponent far behind: play better
    Losing,
}

impl DifficultyTier {
    pub fn from_lead(lead: i32) -> Self {
        if lead > Params::AI_TIER_MARGIN {
            DifficultyTier::Winning
        } else if lead < -Params::AI_TIER_MARGIN {
            DifficultyTier::Losing
        } else {
            DifficultyTier::Close
        }
    }

    pub fn difficulty(self) -> Difficulty {
        match self {
            DifficultyTier::Close => Difficulty {
                accuracy: 0.15,
                mistake_chance: 0.10,
                max_speed: 0.12,
            },
            DifficultyTier::Winning => Difficulty {
                accuracy: 0.15,
                mistake_chance: 0.15,
                max_speed: 0.10,
            },
            DifficultyTier::Losing => Difficulty {
                accuracy: 0.15,
                mistake_chance: 0.05,
                max_speed: 0.14,
            },
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        DifficultyTier::Close.difficulty()
    }
}

/// What the opponent saw at its last look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub ball_pos: Vec3,
    pub ball_vel: Vec3,
}

pub struct Opponent {
    config: Config,
    side: Side,
    rng: GameRng,
    tier: DifficultyTier,
    difficulty: Difficulty,
    last_seen: Option<Observation>,
    target_z: f32,
    next_move: PaddleIntent,
    last_look_ms: Option<u64>,
    last_difficulty_ms: Option<u64>,
    looks: u64,
}

impl Opponent {
    pub fn new(config: &Config, side: Side, seed: u64) -> Self {
        Self {
            config: config.clone(),
            side,
            rng: GameRng::new(seed),
            tier: DifficultyTier::Close,
            difficulty: Difficulty::default(),
            last_seen: None,
            target_z: 0.0,
            next_move: PaddleIntent::STOP,
            last_look_ms: None,
            last_difficulty_ms: None,
            looks: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn target_z(&self) -> f32 {
        self.target_z
    }

    pub fn next_move(&self) -> PaddleIntent {
        self.next_move
    }

    pub fn last_seen(&self) -> Option<Observation> {
        self.last_seen
    }

    /// Number of times the opponent has looked at the ball
    pub fn looks(&self) -> u64 {
        self.looks
    }

    /// Run once per tick
    ///
    /// `lead` is this opponent's score minus the other player's.
    pub fn update(&mut self, ball: &Ball, paddle: &mut Paddle, lead: i32, now_ms: u64) {
        if Self::due(self.last_difficulty_ms, now_ms, Params::AI_DIFFICULTY_INTERVAL_MS + 1) {
            self.update_difficulty(lead);
            self.last_difficulty_ms = Some(now_ms);
        }

        if Self::due(self.last_look_ms, now_ms, Params::AI_UPDATE_INTERVAL_MS) {
            self.last_look_ms = Some(now_ms);
            self.looks += 1;
            let seen = Observation {
                ball_pos: ball.pos,
                ball_vel: ball.vel,
            };
            self.last_seen = Some(seen);
            self.decide_next_move(seen, paddle.z);
        }

        self.execute_move(paddle);
    }

    fn due(last_ms: Option<u64>, now_ms: u64, interval_ms: u64) -> bool {
        match last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= interval_ms,
        }
    }

    fn update_difficulty(&mut self, lead: i32) {
        let tier = DifficultyTier::from_lead(lead);
        if tier != self.tier {
            log::debug!("Opponent difficulty {:?} -> {:?} (lead {})", self.tier, tier, lead);
        }
        self.tier = tier;
        self.difficulty = tier.difficulty();
    }

    fn decide_next_move(&mut self, seen: Observation, paddle_z: f32) {
        self.target_z = match self.intercept_z(seen) {
            Some(perfect_z) => {
                let spread = (1.0 - self.difficulty.accuracy) * Params::AI_PREDICTION_ERROR;
                let mut target = perfect_z + self.jitter(spread);

                let mistake = self.difficulty.mistake_chance.clamp(0.0, 1.0);
                if self.rng.0.gen_bool(mistake) {
                    target += self.jitter(Params::AI_MISTAKE_SPREAD);
                }
                target
            }
            // Idle sway around the centre
            None => self.jitter(Params::AI_IDLE_SWAY),
        };

        self.next_move = if paddle_z < self.target_z - Params::AI_DEAD_ZONE {
            PaddleIntent::DOWN
        } else if paddle_z > self.target_z + Params::AI_DEAD_ZONE {
            PaddleIntent::UP
        } else {
            PaddleIntent::STOP
        };
    }

    /// Straight-line guess of where the ball crosses the paddle line
    ///
    /// `None` when the ball is heading away or too slowly toward us for the
    /// intercept time to mean anything.
    fn intercept_z(&self, seen: Observation) -> Option<f32> {
        let toward = match self.side {
            Side::Left => -seen.ball_vel.x,
            Side::Right => seen.ball_vel.x,
        };
        if !(toward > Params::AI_MIN_INTERCEPT_VX) {
            return None;
        }

        let paddle_x = self.config.paddle_x(self.side);
        let time_to_intercept = (paddle_x - seen.ball_pos.x) / seen.ball_vel.x;
        let z = seen.ball_pos.z + seen.ball_vel.z * time_to_intercept;
        z.is_finite().then_some(z)
    }

    /// Uniform value in `-half..half`
    fn jitter(&mut self, half: f32) -> f32 {
        if half > 0.0 {
            self.rng.0.gen_range(-half..half)
        } else {
            0.0
        }
    }

    fn execute_move(&self, paddle: &mut Paddle) {
        let distance = (paddle.z - self.target_z).abs();
        let speed = self
            .difficulty
            .max_speed
            .min(distance / Params::AI_APPROACH_DIVISOR);

        paddle.z = self
            .config
            .clamp_paddle_z(paddle.z + self.next_move.dir as f32 * speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(pos: Vec3, vel: Vec3) -> Ball {
        Ball::new(pos, vel)
    }

    fn precise(opponent: &mut Opponent) {
        opponent.difficulty = Difficulty {
            accuracy: 1.0,
            mistake_chance: 0.0,
            max_speed: 0.12,
        };
    }

    #[test]
    fn test_first_update_looks_immediately() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 1);
        let mut paddle = Paddle::new(Side::Right, 0.0);
        let b = ball(Vec3::new(1.0, 0.5, 0.4), Vec3::new(0.1, 0.0, 0.0));

        ai.update(&b, &mut paddle, 0, 0);

        assert_eq!(ai.looks(), 1);
        assert_eq!(ai.last_seen().unwrap().ball_pos, b.pos);
    }

    #[test]
    fn test_perception_is_stale_between_looks() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 1);
        let mut paddle = Paddle::new(Side::Right, 0.0);
        let first = ball(Vec3::new(1.0, 0.5, 0.4), Vec3::new(0.1, 0.0, 0.0));
        ai.update(&first, &mut paddle, 0, 10_000);

        let moved = ball(Vec3::new(2.0, 0.5, -1.0), Vec3::new(0.1, 0.0, -0.02));
        ai.update(&moved, &mut paddle, 0, 10_999);
        assert_eq!(ai.last_seen().unwrap().ball_pos, first.pos);
        assert_eq!(ai.looks(), 1);

        ai.update(&moved, &mut paddle, 0, 11_000);
        assert_eq!(ai.last_seen().unwrap().ball_pos, moved.pos);
        assert_eq!(ai.looks(), 2);
    }

    #[test]
    fn test_one_look_per_second_at_high_tick_rate() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 3);
        let mut paddle = Paddle::new(Side::Right, 0.0);
        let b = ball(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.1, 0.0, 0.01));

        // Five simulated seconds at 240 ticks per second
        for tick in 0..(240 * 5) {
            let now_ms = tick * 1000 / 240;
            ai.update(&b, &mut paddle, 0, now_ms);
        }

        assert!(ai.looks() <= 5, "looked {} times", ai.looks());
        assert!(ai.looks() >= 4);
    }

    #[test]
    fn test_precise_prediction_hits_intercept() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 5);
        precise(&mut ai);
        let seen = Observation {
            ball_pos: Vec3::new(0.9, 0.5, 0.0),
            ball_vel: Vec3::new(0.1, 0.0, 0.01),
        };

        ai.decide_next_move(seen, 0.0);

        // t = (4.9 - 0.9) / 0.1 = 40 ticks, z = 0.4
        assert!((ai.target_z() - 0.4).abs() < 1e-4);
        assert_eq!(ai.next_move(), PaddleIntent::DOWN);
    }

    #[test]
    fn test_left_side_opponent_predicts_too() {
        let mut ai = Opponent::new(&Config::new(), Side::Left, 5);
        precise(&mut ai);
        let seen = Observation {
            ball_pos: Vec3::new(-0.9, 0.5, 0.0),
            ball_vel: Vec3::new(-0.1, 0.0, -0.01),
        };

        ai.decide_next_move(seen, 0.0);

        assert!((ai.target_z() + 0.4).abs() < 1e-4);
        assert_eq!(ai.next_move(), PaddleIntent::UP);
    }

    #[test]
    fn test_noise_stays_within_bounds() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 8);
        let seen = Observation {
            ball_pos: Vec3::new(0.9, 0.5, 0.0),
            ball_vel: Vec3::new(0.1, 0.0, 0.01),
        };
        let limit = (1.0 - ai.difficulty().accuracy) * Params::AI_PREDICTION_ERROR
            + Params::AI_MISTAKE_SPREAD;

        for _ in 0..500 {
            ai.decide_next_move(seen, 0.0);
            assert!((ai.target_z() - 0.4).abs() <= limit + 1e-4);
        }
    }

    #[test]
    fn test_ball_moving_away_gives_idle_sway() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 2);
        let seen = Observation {
            ball_pos: Vec3::new(2.0, 0.5, 2.0),
            ball_vel: Vec3::new(-0.1, 0.0, 0.05),
        };

        for _ in 0..100 {
            ai.decide_next_move(seen, 0.0);
            assert!(ai.target_z().abs() <= Params::AI_IDLE_SWAY);
        }
    }

    #[test]
    fn test_near_zero_velocity_does_not_divide() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 2);
        for vx in [0.0, 1.0e-7, 1.0e-4] {
            let seen = Observation {
                ball_pos: Vec3::new(0.0, 0.5, 0.0),
                ball_vel: Vec3::new(vx, 0.0, 0.05),
            };
            ai.decide_next_move(seen, 0.0);
            assert!(ai.target_z().is_finite());
            assert!(ai.target_z().abs() <= Params::AI_IDLE_SWAY);
        }
    }

    #[test]
    fn test_dead_zone_holds_still() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 2);
        precise(&mut ai);
        let seen = Observation {
            ball_pos: Vec3::new(0.9, 0.5, 0.05),
            ball_vel: Vec3::new(0.1, 0.0, 0.0),
        };

        ai.decide_next_move(seen, 0.0);

        assert_eq!(ai.next_move(), PaddleIntent::STOP);
    }

    #[test]
    fn test_execution_slows_near_target() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 2);
        precise(&mut ai);
        ai.target_z = 1.0;
        ai.next_move = PaddleIntent::DOWN;
        let mut paddle = Paddle::new(Side::Right, 0.0);

        ai.execute_move(&mut paddle);
        assert!((paddle.z - 0.1).abs() < 1e-6, "distance / 10 under the cap");

        ai.target_z = 2.0;
        paddle.z = 0.0;
        ai.execute_move(&mut paddle);
        assert!((paddle.z - 0.12).abs() < 1e-6, "capped at max_speed");
    }

    #[test]
    fn test_never_leaves_reach() {
        let config = Config::new();
        let mut ai = Opponent::new(&config, Side::Right, 2);
        ai.target_z = 40.0;
        ai.next_move = PaddleIntent::DOWN;
        let mut paddle = Paddle::new(Side::Right, 2.45);

        for _ in 0..100 {
            ai.execute_move(&mut paddle);
            assert!(paddle.z <= config.paddle_reach);
        }
        assert_eq!(paddle.z, config.paddle_reach);
    }

    #[test]
    fn test_tier_from_lead() {
        assert_eq!(DifficultyTier::from_lead(0), DifficultyTier::Close);
        assert_eq!(DifficultyTier::from_lead(3), DifficultyTier::Close);
        assert_eq!(DifficultyTier::from_lead(-3), DifficultyTier::Close);
        assert_eq!(DifficultyTier::from_lead(4), DifficultyTier::Winning);
        assert_eq!(DifficultyTier::from_lead(-4), DifficultyTier::Losing);
        assert!(
            DifficultyTier::Losing.difficulty().max_speed
                > DifficultyTier::Winning.difficulty().max_speed
        );
    }

    #[test]
    fn test_difficulty_refreshes_every_five_seconds() {
        let mut ai = Opponent::new(&Config::new(), Side::Right, 2);
        let mut paddle = Paddle::new(Side::Right, 0.0);
        let b = ball(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.1, 0.0, 0.0));

        ai.update(&b, &mut paddle, 0, 0);
        assert_eq!(ai.tier(), DifficultyTier::Close);

        ai.update(&b, &mut paddle, -5, 5_000);
        assert_eq!(ai.tier(), DifficultyTier::Close, "Not yet due");

        ai.update(&b, &mut paddle, -5, 5_001);
        assert_eq!(ai.tier(), DifficultyTier::Losing);
        assert_eq!(ai.difficulty(), DifficultyTier::Losing.difficulty());
    }
}
