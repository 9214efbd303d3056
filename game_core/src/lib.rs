pub mod ai;
pub mod components;
pub mod config;
pub mod game;
pub mod params;
pub mod resources;
pub mod systems;

pub use ai::*;
pub use components::*;
pub use config::*;
pub use game::*;
pub use params::*;
pub use resources::*;

use glam::Vec3;
use hecs::World;
use systems::*;

/// Run one fixed tick of the Pong simulation
///
/// There is no delta time: velocities are in units per tick and the caller
/// must tick at a constant rate (see [`Params::TICK_RATE_HZ`]). Returns the
/// side that won the point, if any.
pub fn step(world: &mut World, config: &Config, events: &mut Events) -> Option<Side> {
    // Clear events at start of tick
    events.clear();

    // 1. Move paddles based on intents
    move_paddles(world, config);

    // 2. Spin feedback, then move ball
    move_ball(world, config);

    // 3. Walls before paddles, paddles before scoring
    check_wall_collision(world, config, events);
    check_paddle_collisions(world, config, events);
    confine_ball(world, config);

    // 4. Check scoring (ball left the table)
    check_scoring(world, config, events)
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, z: f32) -> hecs::Entity {
    world.spawn((Paddle::new(side, z), PaddleIntent::new()))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: Vec3, vel: Vec3) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}

/// Copy the ball and both paddles out of the world
pub fn snapshot(world: &World) -> Option<SimulationState> {
    let ball = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| *ball)?;

    let mut paddle1_z = None;
    let mut paddle2_z = None;
    for (_e, paddle) in world.query::<&Paddle>().iter() {
        match paddle.side {
            Side::Left => paddle1_z = Some(paddle.z),
            Side::Right => paddle2_z = Some(paddle.z),
        }
    }

    Some(SimulationState {
        ball_position: ball.pos,
        ball_velocity: ball.vel,
        ball_spin: ball.spin,
        paddle1_z: paddle1_z?,
        paddle2_z: paddle2_z?,
    })
}
