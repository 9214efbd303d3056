//! Session State Machine
//!
//! Manages session state transitions for both player-vs-player and
//! player-vs-AI matches.

use proto::MatchStatus;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    Menu,
    Playing,
    Paused,
    Finished,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    TogglePause,
    GameOver,
    PlayAgain,
    Quit,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: FsmState,
    pub to_state: FsmState,
    pub action: GameAction,
}

/// Session Finite State Machine
#[derive(Debug, Clone)]
pub struct GameFsm {
    state: FsmState,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            state: FsmState::Menu,
        }
    }

    /// Get current state
    pub fn state(&self) -> FsmState {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: GameAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;

        match self.get_next_state(action) {
            Some(next_state) => {
                self.state = next_state;
                log::debug!("Session {:?} --{:?}--> {:?}", from_state, action, next_state);
                TransitionResult {
                    success: true,
                    from_state,
                    to_state: next_state,
                    action,
                }
            }
            None => TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            },
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: GameAction) -> Option<FsmState> {
        match (self.state, action) {
            // From Menu
            (FsmState::Menu, GameAction::Start) => Some(FsmState::Playing),

            // From Playing
            (FsmState::Playing, GameAction::TogglePause) => Some(FsmState::Paused),
            (FsmState::Playing, GameAction::GameOver) => Some(FsmState::Finished),
            (FsmState::Playing, GameAction::Quit) => Some(FsmState::Menu),

            // From Paused
            (FsmState::Paused, GameAction::TogglePause) => Some(FsmState::Playing),
            (FsmState::Paused, GameAction::Quit) => Some(FsmState::Menu),

            // From Finished
            (FsmState::Finished, GameAction::PlayAgain) => Some(FsmState::Playing),
            (FsmState::Finished, GameAction::Quit) => Some(FsmState::Menu),

            // Invalid transition
            _ => None,
        }
    }

    /// Check if currently ticking
    pub fn is_playing(&self) -> bool {
        self.state == FsmState::Playing
    }

    /// Status as reported to the match endpoint; nothing to report from the menu
    pub fn match_status(&self) -> Option<MatchStatus> {
        match self.state {
            FsmState::Menu => None,
            FsmState::Playing => Some(MatchStatus::Playing),
            FsmState::Paused => Some(MatchStatus::Paused),
            FsmState::Finished => Some(MatchStatus::Finished),
        }
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fsm = GameFsm::new();
        assert_eq!(fsm.state(), FsmState::Menu);
        assert_eq!(fsm.match_status(), None);
    }

    #[test]
    fn test_valid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::Start);
        assert!(result.success);
        assert_eq!(result.from_state, FsmState::Menu);
        assert_eq!(fsm.state(), FsmState::Playing);
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::GameOver);
        assert!(!result.success);
        assert_eq!(result.to_state, FsmState::Menu);
        assert_eq!(fsm.state(), FsmState::Menu);
    }

    #[test]
    fn test_pause_toggles() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::Start);
        fsm.transition(GameAction::TogglePause);
        assert_eq!(fsm.state(), FsmState::Paused);
        assert!(!fsm.is_playing());
        assert!(!fsm.can_transition(GameAction::GameOver));
        fsm.transition(GameAction::TogglePause);
        assert_eq!(fsm.state(), FsmState::Playing);
    }

    #[test]
    fn test_match_flow() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::Start);
        fsm.transition(GameAction::GameOver);
        assert_eq!(fsm.state(), FsmState::Finished);
        assert_eq!(fsm.match_status(), Some(MatchStatus::Finished));
        assert!(!fsm.can_transition(GameAction::TogglePause));
        fsm.transition(GameAction::PlayAgain);
        assert_eq!(fsm.state(), FsmState::Playing);
        fsm.transition(GameAction::Quit);
        assert_eq!(fsm.state(), FsmState::Menu);
    }
}
