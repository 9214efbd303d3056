//! Pong match session
//!
//! Drives a [`game_core::Game`] from an external per-frame scheduler, maps
//! keyboard state to paddle intents and pushes match state to the
//! persistence endpoint without ever blocking the tick.

pub mod fixed_step;
pub mod fsm;
pub mod game_session;
pub mod input;

pub use fixed_step::*;
pub use fsm::*;
pub use game_session::*;
pub use input::*;
