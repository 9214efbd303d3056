use crate::{Ball, Config, Paddle, PaddleIntent};
use glam::Vec3;
use hecs::World;

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, config: &Config) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        if intent.dir != 0 {
            paddle.z += intent.dir as f32 * config.paddle_speed;

            // Clamp to reachable band
            paddle.z = config.clamp_paddle_z(paddle.z);
        }
    }
}

/// Curve the ball by its spin, then advance it one tick
///
/// Spin is never decayed here; only wall contact damps it.
pub fn move_ball(world: &mut World, config: &Config) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.vel.z += ball.spin.z * crate::Params::SPIN_FEEDBACK;
        ball.vel = clamp_speed(ball.vel, config);
        ball.pos += ball.vel;
    }
}

/// Scale a velocity so its length sits inside the configured envelope
pub fn clamp_speed(vel: Vec3, config: &Config) -> Vec3 {
    let speed = vel.length();
    if speed > config.max_ball_speed {
        vel * (config.max_ball_speed / speed)
    } else if speed > 0.0 && speed < config.min_ball_speed {
        vel * (config.min_ball_speed / speed)
    } else {
        vel
    }
}
