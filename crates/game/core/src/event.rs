//! Combat and reward events emitted for the presentation layer.
//!
//! The engine buffers one [`CombatEvent`] per noteworthy step of a resolution.
//! Clients drain the buffer after each command and turn the records into
//! floating text or a log line; nothing in the core reads them back.

use crate::state::Position;

/// Colour category of an event label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventColor {
    Damage,
    Critical,
    Miss,
    Reward,
    Level,
}

impl EventColor {
    /// Suggested display colour as a `#rrggbb` string.
    pub const fn hint(self) -> &'static str {
        match self {
            EventColor::Damage => "#ff4040",
            EventColor::Critical => "#ffd700",
            EventColor::Miss => "#a0a0a0",
            EventColor::Reward => "#40c040",
            EventColor::Level => "#40a0ff",
        }
    }
}

/// One floating-text record anchored to a grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    pub position: Position,
    pub text: String,
    pub color: EventColor,
}

impl CombatEvent {
    pub fn new(position: Position, text: impl Into<String>, color: EventColor) -> Self {
        Self {
            position,
            text: text.into(),
            color,
        }
    }

    pub fn critical(position: Position) -> Self {
        Self::new(position, "Critical!", EventColor::Critical)
    }

    pub fn fumble(position: Position) -> Self {
        Self::new(position, "Fumble!", EventColor::Miss)
    }

    pub fn damage(position: Position, amount: u32) -> Self {
        Self::new(position, format!("-{amount}"), EventColor::Damage)
    }

    pub fn blocked(position: Position) -> Self {
        Self::new(position, "Blocked", EventColor::Miss)
    }

    pub fn defeated(position: Position) -> Self {
        Self::new(position, "Defeated", EventColor::Damage)
    }

    pub fn experience(position: Position, amount: u32) -> Self {
        Self::new(position, format!("+{amount} xp"), EventColor::Reward)
    }

    pub fn gold(position: Position, amount: u32) -> Self {
        Self::new(position, format!("+{amount} gold"), EventColor::Reward)
    }

    pub fn level_up(position: Position) -> Self {
        Self::new(position, "Level up!", EventColor::Level)
    }
}
