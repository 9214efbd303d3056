/// Game tuning parameters for 3D Pong
///
/// Play happens in the x/z plane of the table; y is height above it.
/// Speeds are in table units per tick and assume a fixed 60 Hz tick.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Tick contract
    pub const TICK_RATE_HZ: u32 = 60;

    // Table
    pub const TABLE_HALF_LENGTH: f32 = 5.0; // |x| past this scores
    pub const WALL_HALF_WIDTH: f32 = 2.9; // side walls at |z|

    // Paddle
    pub const PADDLE_X: f32 = 4.9;
    pub const PADDLE_CONTACT_X: f32 = 4.7;
    pub const PADDLE_REACH: f32 = 2.5;
    pub const PADDLE_HITBOX_HALF_DEPTH: f32 = 0.7;
    pub const PADDLE_DEFLECT_HALF_DEPTH: f32 = 0.9;
    pub const PADDLE_HEIGHT: f32 = 0.5;
    pub const PADDLE_SPEED: f32 = 0.15;

    // Ball
    pub const BALL_REST_HEIGHT: f32 = 0.5;
    pub const BALL_SPEED_MIN: f32 = 0.1;
    pub const BALL_SPEED_MAX: f32 = 0.15;
    pub const BALL_SPEED_INCREASE: f32 = 1.05; // Multiply speed on paddle hit
    pub const SERVE_Z_JITTER: f32 = 0.02;
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    // Walls and spin
    pub const WALL_RESTITUTION: f32 = 0.9;
    pub const WALL_SPIN_DAMPING: f32 = 0.5;
    pub const SPIN_FEEDBACK: f32 = 0.01;
    pub const SPIN_PER_HIT: f32 = 0.1;

    // Score
    pub const POINTS_TO_WIN: u8 = 3;

    // Opponent
    pub const AI_UPDATE_INTERVAL_MS: u64 = 1000;
    pub const AI_DIFFICULTY_INTERVAL_MS: u64 = 5000;
    pub const AI_DEAD_ZONE: f32 = 0.1;
    pub const AI_APPROACH_DIVISOR: f32 = 10.0;
    pub const AI_PREDICTION_ERROR: f32 = 0.5; // scaled by (1 - accuracy)
    pub const AI_MISTAKE_SPREAD: f32 = 1.0;
    pub const AI_IDLE_SWAY: f32 = 0.25;
    pub const AI_MIN_INTERCEPT_VX: f32 = 1.0e-3;
    pub const AI_TIER_MARGIN: i32 = 3;
}
