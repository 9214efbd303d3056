//! Match controller
//!
//! Owns the world and the score and walks a match through
//! `Serving -> Rallying -> PointScored -> Serving` until someone reaches
//! `points_to_win`.

use glam::Vec3;
use hecs::{Entity, World};

use crate::{
    create_ball, create_paddle, snapshot, step, Ball, Config, ConfigError, Events, GameRng,
    Opponent, Paddle, PaddleIntent, Params, Score, Side, SimulationState,
};

/// Match lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ball is at rest in the centre; the next tick puts it in play
    Serving,
    /// Ball in play
    Rallying,
    /// A point was just won; the next tick serves again
    PointScored,
    /// Someone reached `points_to_win`
    GameOver,
}

pub struct Game {
    world: World,
    config: Config,
    score: Score,
    events: Events,
    rng: GameRng,
    phase: Phase,
    winner: Option<Side>,
    tick: u32,
    ball: Entity,
    left: Entity,
    right: Entity,
}

impl Game {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        let left = create_paddle(&mut world, Side::Left, 0.0);
        let right = create_paddle(&mut world, Side::Right, 0.0);

        let served = Ball::serve(&config, &mut rng);
        let ball = create_ball(&mut world, served.pos, served.vel);

        Ok(Self {
            world,
            config,
            score: Score::new(),
            events: Events::new(),
            rng,
            phase: Phase::Serving,
            winner: None,
            tick: 0,
            ball,
            left,
            right,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    /// Simulated time since the match started
    pub fn elapsed_ms(&self) -> u64 {
        u64::from(self.tick) * 1000 / u64::from(Params::TICK_RATE_HZ)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> Option<SimulationState> {
        snapshot(&self.world)
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.get::<&Ball>(self.ball).ok().map(|ball| *ball)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .get::<&Paddle>(self.paddle_entity(side))
            .ok()
            .map(|paddle| *paddle)
    }

    fn paddle_entity(&self, side: Side) -> Entity {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_intent(&mut self, side: Side, intent: PaddleIntent) {
        let entity = self.paddle_entity(side);
        if let Ok(mut current) = self.world.get::<&mut PaddleIntent>(entity) {
            *current = intent;
        }
    }

    /// Serve a new ball from the centre; returns where it was placed
    pub fn reset_point(&mut self) -> Vec3 {
        self.phase = Phase::Serving;
        match self.world.get::<&mut Ball>(self.ball) {
            Ok(mut ball) => ball.reset(&self.config, &mut self.rng),
            Err(_) => Vec3::new(0.0, self.config.ball_rest_height, 0.0),
        }
    }

    /// Advance the match by one tick
    ///
    /// Returns the side that won a point on this tick.
    pub fn tick(&mut self) -> Option<Side> {
        match self.phase {
            Phase::GameOver => return None,
            Phase::PointScored => {
                self.events.clear();
                self.tick += 1;
                self.reset_point();
                return None;
            }
            Phase::Serving => self.phase = Phase::Rallying,
            Phase::Rallying => {}
        }

        self.tick += 1;
        let scorer = step(&mut self.world, &self.config, &mut self.events)?;

        self.score.increment(scorer);
        log::debug!(
            "Point to player {} ({}-{}) at tick {}",
            scorer.player_number(),
            self.score.player1,
            self.score.player2,
            self.tick
        );

        if let Some(winner) = self.score.has_winner(self.config.points_to_win) {
            log::info!("Player {} wins the match", winner.player_number());
            self.winner = Some(winner);
            self.phase = Phase::GameOver;
        } else {
            self.phase = Phase::PointScored;
        }

        Some(scorer)
    }

    /// Let the AI perceive the ball and steer its paddle
    pub fn update_opponent(&mut self, opponent: &mut Opponent, now_ms: u64) {
        let Some(ball) = self.ball() else {
            return;
        };
        let lead = self.score.lead(opponent.side());
        let entity = self.paddle_entity(opponent.side());
        if let Ok(mut paddle) = self.world.get::<&mut Paddle>(entity) {
            opponent.update(&ball, &mut paddle, lead, now_ms);
        }
    }

    /// Start a fresh match with the same config
    pub fn restart(&mut self) {
        self.score = Score::new();
        self.events.clear();
        self.winner = None;
        self.tick = 0;
        for side in [Side::Left, Side::Right] {
            let entity = self.paddle_entity(side);
            if let Ok(mut paddle) = self.world.get::<&mut Paddle>(entity) {
                paddle.z = 0.0;
            }
            self.set_intent(side, PaddleIntent::STOP);
        }
        self.reset_point();
    }
}
