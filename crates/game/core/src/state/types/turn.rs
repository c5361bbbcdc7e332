use std::collections::VecDeque;

use super::CharacterId;

/// Whose move budget is currently active.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    /// The player spends moves until the budget runs out or they attack.
    #[default]
    PlayerTurn,
    /// Enemies act in discrete steps. The queue holds the enemies still able
    /// to act, closest to the player first.
    EnemyTurn { queue: VecDeque<CharacterId> },
}

impl TurnPhase {
    pub fn is_player_turn(&self) -> bool {
        matches!(self, TurnPhase::PlayerTurn)
    }

    pub fn is_enemy_turn(&self) -> bool {
        matches!(self, TurnPhase::EnemyTurn { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::PlayerTurn => "player_turn",
            TurnPhase::EnemyTurn { .. } => "enemy_turn",
        }
    }
}

/// Turn bookkeeping for the whole session.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: TurnPhase,

    /// Completed player turns (incremented each time control returns to the player).
    pub round: u64,

    /// Enemy-turn steps processed during the current enemy phase.
    pub enemy_step: u64,

    /// Terminal flag. Once set no further commands are processed.
    pub game_over: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}
