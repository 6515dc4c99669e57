use thiserror::Error;

/// Recoverable failures reported back to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Guess input was missing, not an integer, or out of range.
    #[error("{0}")]
    Validation(String),
    /// Guess submitted without an active game.
    #[error("{0}")]
    State(String),
}

impl GameError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn no_active_game() -> Self {
        Self::State("No active game. Start a new game first.".to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::State(_) => "state",
        }
    }
}
