use game_core::{Config, ConfigError, Game, Opponent, Paddle, PaddleIntent, Params, Side};
use glam::Vec3;
use proto::*;
use thiserror::Error;

use crate::fixed_step::FixedStep;
use crate::fsm::{FsmState, GameAction, GameFsm, TransitionResult};
use crate::input::{is_pause_key, KeyboardState};

/// Minimum spacing between periodic match state pushes
pub const STATE_REPORT_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid game config: {0}")]
    Config(#[from] ConfigError),
}

/// Failure talking to the match endpoint
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("endpoint answered with status {0}")]
    Rejected(u16),

    #[error("could not encode body: {0}")]
    Encode(#[from] serde_json::Error),
}

// Abstract clock for testing
pub trait Environment {
    fn now(&self) -> u64; // ms
}

/// Outbound side of the match persistence endpoint
///
/// Bodies arrive already JSON-encoded. Implementations must not block the
/// caller; the session logs and drops any error they return.
pub trait MatchReporter {
    /// Body is a [`MatchStateUpdate`]
    fn send_state(&self, match_id: u64, body: &str) -> Result<(), ReportError>;
    /// Body is a [`MatchResult`]
    fn finish_match(&self, match_id: u64, body: &str) -> Result<(), ReportError>;
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub mode: GameMode,
    pub seed: u64,
    /// Match record to report to; reporting is skipped without one
    pub match_id: Option<u64>,
}

/// One Pong match as seen by the page: input, tick driver and reporting
pub struct PongSession {
    env: Box<dyn Environment>,
    reporter: Box<dyn MatchReporter>,
    game: Game,
    opponent: Option<Opponent>,
    fsm: GameFsm,
    options: SessionOptions,
    keyboard: KeyboardState,
    clock: FixedStep,
    last_report_ms: u64,
    result_sent: bool,
}

impl PongSession {
    pub fn new(
        config: Config,
        options: SessionOptions,
        env: Box<dyn Environment>,
        reporter: Box<dyn MatchReporter>,
    ) -> Result<Self, SessionError> {
        let game = Game::new(config, options.seed)?;
        let opponent = Self::make_opponent(&game, &options);
        let now = env.now();

        Ok(Self {
            env,
            reporter,
            game,
            opponent,
            fsm: GameFsm::new(),
            options,
            keyboard: KeyboardState::new(),
            clock: FixedStep::new(Params::TICK_RATE_HZ, now),
            last_report_ms: now,
            result_sent: false,
        })
    }

    fn make_opponent(game: &Game, options: &SessionOptions) -> Option<Opponent> {
        match options.mode {
            GameMode::PlayerVsAi => Some(Opponent::new(
                game.config(),
                Side::Right,
                options.seed.wrapping_add(1),
            )),
            GameMode::PlayerVsPlayer => None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn opponent(&self) -> Option<&Opponent> {
        self.opponent.as_ref()
    }

    pub fn state(&self) -> FsmState {
        self.fsm.state()
    }

    pub fn match_id(&self) -> Option<u64> {
        self.options.match_id
    }

    /// Record the id handed back by the match endpoint
    pub fn set_match_id(&mut self, created: MatchCreated) {
        self.options.match_id = Some(created.match_id);
    }

    /// Body to create the match record with
    pub fn create_match_request(&self) -> CreateMatch {
        CreateMatch::pong(self.options.mode)
    }

    pub fn start(&mut self) -> TransitionResult {
        let result = self.fsm.transition(GameAction::Start);
        if result.success {
            log::info!("Starting {:?} match", self.options.mode);
            let now = self.env.now();
            self.clock.reset(now);
            self.last_report_ms = now;
        }
        result
    }

    pub fn toggle_pause(&mut self) -> TransitionResult {
        let result = self.fsm.transition(GameAction::TogglePause);
        if result.success {
            self.keyboard.clear();
            self.clock.reset(self.env.now());
        }
        result
    }

    pub fn play_again(&mut self) -> TransitionResult {
        let result = self.fsm.transition(GameAction::PlayAgain);
        if result.success {
            self.reset_match();
        }
        result
    }

    pub fn quit(&mut self) -> TransitionResult {
        let result = self.fsm.transition(GameAction::Quit);
        if result.success {
            self.reset_match();
        }
        result
    }

    fn reset_match(&mut self) {
        self.game.restart();
        self.opponent = Self::make_opponent(&self.game, &self.options);
        self.keyboard.clear();
        self.result_sent = false;
        let now = self.env.now();
        self.clock.reset(now);
        self.last_report_ms = now;
    }

    pub fn key_down(&mut self, key: &str) {
        if is_pause_key(key) {
            if self.fsm.state() != FsmState::Menu {
                self.toggle_pause();
            }
            return;
        }
        self.keyboard.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keyboard.key_up(key);
    }

    /// Advance one animation frame
    ///
    /// Runs as many fixed ticks as the time since the last frame calls for
    /// and does nothing unless the session is playing. Returns the side that
    /// won the last point on this frame.
    pub fn frame(&mut self) -> Option<Side> {
        if !self.fsm.is_playing() {
            return None;
        }
        let now = self.env.now();
        let ticks = self.clock.advance(now);

        let mut scorer = None;
        for _ in 0..ticks {
            if let Some(side) = self.tick_once() {
                scorer = Some(side);
                self.on_point(side, now);
                if !self.fsm.is_playing() {
                    break;
                }
            }
        }

        if scorer.is_none() && now.saturating_sub(self.last_report_ms) > STATE_REPORT_INTERVAL_MS {
            self.report_state(now);
        }
        scorer
    }

    fn tick_once(&mut self) -> Option<Side> {
        // Opponent timers run on simulated time, not the frame clock
        if let Some(opponent) = self.opponent.as_mut() {
            let sim_ms = self.game.elapsed_ms();
            self.game.update_opponent(opponent, sim_ms);
        }
        self.apply_keyboard();
        self.game.tick()
    }

    fn on_point(&mut self, side: Side, now: u64) {
        let score = self.game.score();
        log::info!(
            "Player {} scores ({}-{})",
            side.player_number(),
            score.player1,
            score.player2
        );
        if self.game.winner().is_some() {
            self.fsm.transition(GameAction::GameOver);
            self.report_result();
        }
        self.report_state(now);
    }

    fn apply_keyboard(&mut self) {
        self.game
            .set_intent(Side::Left, self.keyboard.intent(Side::Left));

        // The AI owns paddle 2 in single-player matches
        let right = match self.options.mode {
            GameMode::PlayerVsPlayer => self.keyboard.intent(Side::Right),
            GameMode::PlayerVsAi => PaddleIntent::STOP,
        };
        self.game.set_intent(Side::Right, right);
    }

    fn report_state(&mut self, now: u64) {
        self.last_report_ms = now;

        let Some(match_id) = self.options.match_id else {
            return;
        };
        let Some(update) = self.state_update() else {
            return;
        };
        let sent = update
            .to_json()
            .map_err(ReportError::from)
            .and_then(|body| self.reporter.send_state(match_id, &body));
        if let Err(err) = sent {
            log::warn!("Failed to update match state: {err}");
        }
    }

    fn report_result(&mut self) {
        if self.result_sent {
            return;
        }
        self.result_sent = true;

        let Some(match_id) = self.options.match_id else {
            return;
        };
        let sent = self
            .match_result()
            .to_json()
            .map_err(ReportError::from)
            .and_then(|body| self.reporter.finish_match(match_id, &body));
        if let Err(err) = sent {
            log::warn!("Failed to finish match: {err}");
        }
    }

    pub fn state_update(&self) -> Option<MatchStateUpdate> {
        let game_status = self.fsm.match_status()?;
        let state = self.game.state()?;
        let config = self.game.config();

        let paddle = |side: Side, z: f32| position(Paddle::new(side, z).position(config));

        Some(MatchStateUpdate {
            state: MatchState {
                score: self.score_board(),
                ball_position: position(state.ball_position),
                paddle_positions: PaddlePositions {
                    paddle1: paddle(Side::Left, state.paddle1_z),
                    paddle2: paddle(Side::Right, state.paddle2_z),
                },
                game_status,
            },
        })
    }

    pub fn match_result(&self) -> MatchResult {
        let score = self.score_board();
        MatchResult {
            score_player1: score.player1,
            score_player2: score.player2,
            winner: self.game.winner().map(|side| match side {
                Side::Left => Winner::Player1,
                Side::Right => Winner::Player2,
            }),
        }
    }

    pub fn frame_snapshot(&self) -> Option<FrameSnapshot> {
        let status = self.fsm.match_status()?;
        let state = self.game.state()?;
        Some(FrameSnapshot {
            tick: self.game.tick_count(),
            ball: position(state.ball_position),
            ball_spin_z: state.ball_spin.z,
            paddle1_z: state.paddle1_z,
            paddle2_z: state.paddle2_z,
            score: self.score_board(),
            status,
        })
    }

    fn score_board(&self) -> ScoreBoard {
        let score = self.game.score();
        ScoreBoard {
            player1: score.player1,
            player2: score.player2,
        }
    }
}

fn position(v: Vec3) -> Position {
    Position {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}
