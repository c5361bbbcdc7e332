//! Read-only snapshots handed to the presentation layer.

use crate::state::{Character, OccupantSummary, Position, TileKind};
use crate::visibility::TileVisibility;

/// What a client may know about one grid cell.
///
/// Occupants are only reported for tiles visible on the latest pass; a
/// remembered tile shows its terrain alone and an unseen tile shows nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileView {
    pub position: Position,
    pub visibility: TileVisibility,
    pub visibility_stamp: u64,
    /// `None` while the tile is unseen.
    pub kind: Option<TileKind>,
    pub occupant: Option<OccupantSummary>,
}

/// Stat snapshot of a single character, as shown in the sidebar.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityStats {
    pub name: &'static str,
    pub position: Position,
    /// Player only.
    pub level: Option<u32>,
    /// Player only.
    pub target_xp: Option<u32>,
    pub xp: u32,
    /// Gold carried. Always zero for enemies.
    pub gold: u32,
    pub speed: u32,
    pub move_remaining: u32,
    pub attack: u32,
    pub defend: u32,
    pub health: u32,
    pub max_health: u32,
    pub critical_chance: f64,
}

impl EntityStats {
    pub(crate) fn capture(character: &Character, gold: u32) -> Self {
        Self {
            name: character.name(),
            position: character.position(),
            level: character.level(),
            target_xp: character.target_xp(),
            xp: character.xp,
            gold,
            speed: character.speed,
            move_remaining: character.move_remaining,
            attack: character.attack,
            defend: character.defend,
            health: character.health,
            max_health: character.max_health,
            critical_chance: character.critical_chance,
        }
    }
}

/// Sidebar description of a clicked cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Inspection {
    Wall,
    Floor,
    Character(EntityStats),
    Gold { amount: u32 },
}

impl Inspection {
    /// Sidebar header text.
    pub fn title(&self) -> String {
        match self {
            Inspection::Wall => "Wall".to_string(),
            Inspection::Floor => "Floor".to_string(),
            Inspection::Character(stats) => stats.name.to_string(),
            Inspection::Gold { amount } => format!("Gold: {amount}"),
        }
    }

    /// `(label, value)` rows listed under the header.
    pub fn rows(&self) -> Vec<(&'static str, u32)> {
        match self {
            Inspection::Character(stats) => vec![
                ("xp", stats.xp),
                ("gold", stats.gold),
                ("attack", stats.attack),
                ("defend", stats.defend),
            ],
            _ => Vec::new(),
        }
    }
}
