//! Errors surfaced by the turn controller.

use crate::error::{ErrorSeverity, GameError, GridError};

/// A command the state machine refused to process.
///
/// Refusals leave the engine untouched. Blocked moves are not refusals; they are
/// reported through [`super::PlayerMoveOutcome::Blocked`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("the enemies are not acting")]
    NotEnemyTurn,

    #[error("the game is over")]
    GameOver,

    #[error("({dx}, {dy}) is not a single cardinal step")]
    InvalidDirection { dx: i32, dy: i32 },

    #[error("grid rejected an engine move: {0}")]
    Grid(#[from] GridError),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPlayerTurn | Self::NotEnemyTurn | Self::InvalidDirection { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::GameOver => ErrorSeverity::Fatal,
            Self::Grid(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPlayerTurn => "TURN_NOT_PLAYER",
            Self::NotEnemyTurn => "TURN_NOT_ENEMY",
            Self::GameOver => "TURN_GAME_OVER",
            Self::InvalidDirection { .. } => "TURN_INVALID_DIRECTION",
            Self::Grid(_) => "TURN_GRID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_game_over_is_fatal() {
        assert!(TurnError::NotPlayerTurn.severity().is_recoverable());
        assert!(TurnError::NotEnemyTurn.severity().is_recoverable());
        assert_eq!(TurnError::GameOver.severity(), ErrorSeverity::Fatal);
        assert_eq!(
            TurnError::InvalidDirection { dx: 1, dy: 1 }.to_string(),
            "(1, 1) is not a single cardinal step"
        );
    }
}
