//! Common error infrastructure for game-core.
//!
//! This module provides the shared classification used across all error types in game-core.
//! Domain-specific errors (`MapError`, `GridError`, `TurnError`) are defined next to the
//! code that produces them.
//!
//! Rejected player input (walking into a wall, stepping off the map) is not an error at all:
//! it is reported as a regular outcome value and leaves the turn state untouched.

use crate::state::{CharacterId, Position};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the command can be retried later (e.g. it arrived during the wrong phase)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or a dead session.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Fatal problems found while building a dungeon from an ASCII map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("map row {row} has width {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("map has no player start marker '@'")]
    MissingPlayer,

    #[error("map has a second player start at {second:?} (first at {first:?})")]
    DuplicatePlayer { first: Position, second: Position },

    #[error("unknown map glyph {glyph:?} at {position:?}")]
    UnknownGlyph { glyph: char, position: Position },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "MAP_EMPTY",
            Self::RaggedRow { .. } => "MAP_RAGGED_ROW",
            Self::MissingPlayer => "MAP_MISSING_PLAYER",
            Self::DuplicatePlayer { .. } => "MAP_DUPLICATE_PLAYER",
            Self::UnknownGlyph { .. } => "MAP_UNKNOWN_GLYPH",
        }
    }
}

/// Errors reported by coordinate queries against the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    #[error("position {position:?} is out of bounds")]
    OutOfBounds { position: Position },

    #[error("position {position:?} is a wall")]
    Wall { position: Position },

    #[error("position {position:?} is already occupied")]
    Occupied { position: Position },

    #[error("character {id} does not exist")]
    MissingCharacter { id: CharacterId },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingCharacter { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            Self::Wall { .. } => "GRID_WALL",
            Self::Occupied { .. } => "GRID_OCCUPIED",
            Self::MissingCharacter { .. } => "GRID_MISSING_CHARACTER",
        }
    }
}
