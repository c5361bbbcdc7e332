//! Turn controller driving the dungeon one logical step at a time.
//!
//! The [`GameEngine`] is the only writer of the [`Dungeon`] once a session has
//! started. Commands (`move_player`, `advance_enemy_turn`) validate against the
//! current [`TurnPhase`], mutate the dungeon, re-run the visibility pass and
//! buffer presentation events. Queries never mutate anything.
//!
//! ```text
//! PlayerTurn --budget spent or attack--> EnemyTurn { queue }
//!     ^                                        |
//!     +------------- queue empty --------------+
//! ```
//!
//! The player dying during any resolution sets the terminal game-over flag;
//! every later command is refused with [`TurnError::GameOver`].

mod errors;
mod exchange;
mod turns;
mod view;

pub use errors::TurnError;
pub use turns::{EnemyAction, EnemyStepReport, PlayerMoveOutcome};
pub use view::{EntityStats, Inspection, TileView};

use tracing::debug;

use crate::config::GameConfig;
use crate::error::GridError;
use crate::event::CombatEvent;
use crate::state::{CharacterId, Dungeon, Occupant, OccupantSummary, Position, TurnPhase, TurnState};
use crate::visibility::{TileVisibility, VisibilityEngine, VisibilityReport};

/// Owns a running session: dungeon, visibility epoch, rules, turn state and
/// the pending event buffer.
#[derive(Clone, Debug)]
pub struct GameEngine {
    dungeon: Dungeon,
    visibility: VisibilityEngine,
    config: GameConfig,
    turn: TurnState,
    events: Vec<CombatEvent>,
}

impl GameEngine {
    /// Starts a session in the player's turn and runs the first visibility pass.
    pub fn new(dungeon: Dungeon, config: GameConfig) -> Self {
        let mut engine = Self {
            dungeon,
            visibility: VisibilityEngine::new(),
            config,
            turn: TurnState::new(),
            events: Vec::new(),
        };
        engine.dungeon.player_mut().reset_moves();
        let report = engine.refresh_visibility();
        debug!(
            epoch = report.epoch,
            visible = report.visible_tiles,
            "session started"
        );
        engine
    }

    /// Re-runs the visibility pass from the player's current cell.
    ///
    /// Commands already do this after every mutation; drivers may call it on
    /// their own cadence as well.
    pub fn refresh_visibility(&mut self) -> VisibilityReport {
        self.visibility.recompute(&mut self.dungeon)
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.turn.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.turn.game_over
    }

    /// Epoch of the latest visibility pass.
    pub fn epoch(&self) -> u64 {
        self.visibility.epoch()
    }

    /// Takes every event buffered since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of one cell, filtered through fog of war.
    pub fn tile_view(&self, x: i32, y: i32) -> Result<TileView, GridError> {
        let position = Position::new(x, y);
        let tile = self.dungeon.tile_at(position)?;
        let visibility = self.visibility.classify(tile);

        let (kind, occupant) = match visibility {
            TileVisibility::Unseen => (None, None),
            TileVisibility::Remembered => (Some(tile.kind), None),
            TileVisibility::Visible => (Some(tile.kind), self.dungeon.occupant_summary(position)),
        };

        Ok(TileView {
            position,
            visibility,
            visibility_stamp: tile.visibility_stamp,
            kind,
            occupant,
        })
    }

    /// Stat snapshot of any character ever placed, dead ones included.
    pub fn entity_stats(&self, id: CharacterId) -> Option<EntityStats> {
        let character = self.dungeon.character(id)?;
        let gold = if id == self.dungeon.player_id() {
            self.dungeon.gold()
        } else {
            0
        };
        Some(EntityStats::capture(character, gold))
    }

    pub fn player_stats(&self) -> EntityStats {
        EntityStats::capture(self.dungeon.player(), self.dungeon.gold())
    }

    /// Describes what sits at `(x, y)` for the sidebar.
    ///
    /// Returns `None` off the map and for tiles never seen. Characters are only
    /// reported while their tile is currently visible.
    pub fn inspect(&self, x: i32, y: i32) -> Option<Inspection> {
        let view = self.tile_view(x, y).ok()?;
        let kind = view.kind?;
        if !kind.is_passable() {
            return Some(Inspection::Wall);
        }

        match view.occupant {
            Some(OccupantSummary::Gold(amount)) => Some(Inspection::Gold { amount }),
            Some(OccupantSummary::Player | OccupantSummary::Enemy(_)) => {
                let tile = self.dungeon.tile_at(view.position).ok()?;
                match tile.occupant? {
                    Occupant::Character(id) => self.entity_stats(id).map(Inspection::Character),
                    Occupant::Pickup(_) => None,
                }
            }
            None => Some(Inspection::Floor),
        }
    }
}
