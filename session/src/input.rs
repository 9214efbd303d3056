//! Keyboard input handling

use std::collections::HashSet;

use game_core::{PaddleIntent, Side};

/// Keys currently held down, lowercased
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event
    pub fn key_down(&mut self, key: &str) {
        self.keys.insert(key.to_lowercase());
    }

    /// Handle key up event
    pub fn key_up(&mut self, key: &str) {
        self.keys.remove(&key.to_lowercase());
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// W/S drive paddle 1, the arrow keys paddle 2
    pub fn intent(&self, side: Side) -> PaddleIntent {
        let (up, down) = match side {
            Side::Left => ("w", "s"),
            Side::Right => ("arrowup", "arrowdown"),
        };
        match (self.keys.contains(up), self.keys.contains(down)) {
            (true, false) => PaddleIntent::UP,
            (false, true) => PaddleIntent::DOWN,
            _ => PaddleIntent::STOP,
        }
    }
}

/// Space toggles pause
pub fn is_pause_key(key: &str) -> bool {
    key == " " || key.eq_ignore_ascii_case("space")
}
