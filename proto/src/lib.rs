//! Wire payloads for the Pong match session
//!
//! JSON bodies for the match persistence endpoint, and a compact postcard
//! frame snapshot for the presentation layer.

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

// ============================================================================
// Shared pieces
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub player1: u8,
    pub player2: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Playing,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    #[serde(rename = "ai")]
    PlayerVsAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player1,
    Player2,
}

// ============================================================================
// Match endpoint bodies (JSON)
// ============================================================================

/// Body for creating a match record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMatch {
    pub game_type: String,
    pub mode: GameMode,
}

impl CreateMatch {
    pub fn pong(mode: GameMode) -> Self {
        Self {
            game_type: "PONG".to_string(),
            mode,
        }
    }
}

/// Reply to [`CreateMatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCreated {
    pub match_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddlePositions {
    pub paddle1: Position,
    pub paddle2: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub score: ScoreBoard,
    pub ball_position: Position,
    pub paddle_positions: PaddlePositions,
    pub game_status: MatchStatus,
}

/// Periodic match state push
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchStateUpdate {
    pub state: MatchState,
}

/// Final result, sent once when a match ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score_player1: u8,
    pub score_player2: u8,
    pub winner: Option<Winner>,
}

// ============================================================================
// Presentation snapshot (binary)
// ============================================================================

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u32,
    pub ball: Position,
    pub ball_spin_z: f32,
    pub paddle1_z: f32,
    pub paddle2_z: f32,
    pub score: ScoreBoard,
    pub status: MatchStatus,
}

// ============================================================================
// Serialization Helpers
// ============================================================================

macro_rules! json_body {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Serialize to a JSON request body
                pub fn to_json(&self) -> Result<String, serde_json::Error> {
                    serde_json::to_string(self)
                }

                /// Deserialize from a JSON body
                pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
                    serde_json::from_str(json)
                }
            }
        )*
    };
}

json_body!(CreateMatch, MatchCreated, MatchStateUpdate, MatchResult);

impl FrameSnapshot {
    /// Serialize snapshot to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize snapshot from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}
