use crate::{Ball, Config, Events, Paddle, Params, Side};
use glam::Vec3;
use hecs::World;

/// Bounce the ball off the side walls
///
/// Each bounce keeps 90% of the sideways velocity and halves the spin.
pub fn check_wall_collision(world: &mut World, config: &Config, events: &mut Events) {
    let wall = config.wall_half_width;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.pos.z.abs() > wall {
            ball.vel.z = -ball.vel.z * Params::WALL_RESTITUTION;
            ball.spin.z *= Params::WALL_SPIN_DAMPING;
            ball.vel = restore_min_speed(ball.vel, config);

            events.ball_hit_wall = true;
        }
    }
}

/// Check ball against both paddles' hit boxes
pub fn check_paddle_collisions(world: &mut World, config: &Config, events: &mut Events) {
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        for paddle in &paddles {
            // Only a ball travelling toward the paddle can be returned
            let past_contact = match paddle.side {
                Side::Left => ball.pos.x < -config.paddle_contact_x && ball.vel.x < 0.0,
                Side::Right => ball.pos.x > config.paddle_contact_x && ball.vel.x > 0.0,
            };
            let within_paddle = (ball.pos.z - paddle.z).abs() < config.paddle_hitbox_half_depth;

            if past_contact && within_paddle {
                resolve_paddle_collision(ball, paddle.position(config), paddle.side, config);
                events.ball_hit_paddle = Some(paddle.side);
                break;
            }
        }
    }
}

/// Pull a ball that overshot a wall back onto the table
///
/// Runs after paddle resolution so a paddle hit in the same tick still sees
/// where the ball actually travelled to.
pub fn confine_ball(world: &mut World, config: &Config) {
    let wall = config.wall_half_width;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos.z = ball.pos.z.clamp(-wall, wall);
    }
}

/// Send the ball back from a paddle
///
/// Where the ball meets the paddle sets the outgoing angle (up to 45°);
/// speed grows by `ball_speed_increase` up to `max_ball_speed`.
pub fn resolve_paddle_collision(ball: &mut Ball, paddle_pos: Vec3, side: Side, config: &Config) {
    let relative_intersect_z = (paddle_pos.z - ball.pos.z) / config.paddle_deflect_half_depth;
    let bounce_angle = relative_intersect_z * Params::MAX_BOUNCE_ANGLE;

    let speed = (ball.speed() * config.ball_speed_increase).min(config.max_ball_speed);

    let vx = speed * bounce_angle.cos().abs();
    ball.vel.x = match side {
        Side::Left => vx,
        Side::Right => -vx,
    };
    ball.vel.z = speed * -bounce_angle.sin();

    ball.spin.z = relative_intersect_z * Params::SPIN_PER_HIT;
}

/// Wall damping may drop the ball under the minimum speed; make it up
/// along x so the reflected z velocity is left untouched
fn restore_min_speed(vel: Vec3, config: &Config) -> Vec3 {
    let min = config.min_ball_speed;
    if vel.length_squared() >= min * min {
        return vel;
    }
    let needed = (min * min - vel.y * vel.y - vel.z * vel.z).max(0.0);
    Vec3::new(vel.x.signum() * needed.sqrt(), vel.y, vel.z)
}
