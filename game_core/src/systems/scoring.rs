use crate::{Ball, Config, Events, Side};
use hecs::World;

/// Check if the ball left the table past a paddle
///
/// Returns the side that won the point. The ball is left where it is;
/// serving again is up to the caller.
pub fn check_scoring(world: &World, config: &Config, events: &mut Events) -> Option<Side> {
    let x = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| ball.pos.x)?;

    let scorer = if x < -config.table_half_length {
        Some(Side::Right)
    } else if x > config.table_half_length {
        Some(Side::Left)
    } else {
        None
    };

    events.scored = scorer;
    scorer
}
