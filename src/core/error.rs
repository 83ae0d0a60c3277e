use thiserror::Error;

use crate::games::hangman::GameStatus;

/// Contract violations inside the game core.
///
/// Wrong guesses and repeated guesses are regular outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("expected a single letter A-Z, got {0:?}")]
    InvalidInput(String),
    #[error("word must be non-empty and only contain letters A-Z, got {0:?}")]
    InvalidWord(String),
    #[error("draw step {step} is outside 0..={max}")]
    OutOfRangeStep { step: usize, max: usize },
    #[error("draw steps must advance one at a time: expected {expected}, got {got}")]
    StepOutOfOrder { expected: usize, got: usize },
    #[error("saved round is not a playable state: {0}")]
    InvalidState(String),
    #[error("game is already over ({0:?})")]
    GameFinished(GameStatus),
}

impl GameError {
    /// Errors that mean the game state and the drawing got out of sync.
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            GameError::OutOfRangeStep { .. } | GameError::StepOutOfOrder { .. }
        )
    }
}
