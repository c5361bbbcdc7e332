//! Deterministic dungeon simulation core.
//!
//! `game-core` owns the rules of the dungeon: the tile grid and its entities,
//! the fog-of-war visibility pass, attack resolution, the greedy enemy AI and
//! the turn state machine tying them together. It performs no I/O. Maps and
//! stat tables come in as plain values, randomness through [`env::RngOracle`],
//! and every mutation flows through [`engine::GameEngine`].
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;
pub mod visibility;

pub use ai::EnemyIntent;
pub use combat::{AttackOutcome, AttackResolution, CombatantStats};
pub use config::GameConfig;
pub use engine::{
    EnemyAction, EnemyStepReport, EntityStats, GameEngine, Inspection, PlayerMoveOutcome,
    TileView, TurnError,
};
pub use env::{PcgRng, RngOracle, ScriptedRng, StatBlock, StatTable, StatsOracle};
pub use error::{ErrorSeverity, GameError, GridError, MapError};
pub use event::{CombatEvent, EventColor};
pub use state::{
    Character, CharacterId, CharacterKind, Dungeon, Grid, Occupant, OccupantSummary, Pickup,
    PickupId, Position, Progression, Tile, TileKind, TurnPhase, TurnState,
};
pub use visibility::{TileVisibility, VisibilityEngine, VisibilityReport};
