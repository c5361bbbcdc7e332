//! Characters: the player and the enemies sharing the dungeon with them.

use crate::combat::{critical_chance_for_xp, next_target_xp};
use crate::config::GameConfig;
use crate::env::StatBlock;

use super::Position;

/// Closed set of character kinds.
///
/// Behaviour differences between kinds are expressed through the capability
/// methods below rather than per-kind hooks.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    Player,
    Goblin,
    Orc,
}

impl CharacterKind {
    /// Map glyph marking this kind's starting position.
    pub const fn glyph(self) -> char {
        match self {
            CharacterKind::Player => '@',
            CharacterKind::Goblin => '1',
            CharacterKind::Orc => '2',
        }
    }

    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '@' => Some(CharacterKind::Player),
            '1' => Some(CharacterKind::Goblin),
            '2' => Some(CharacterKind::Orc),
            _ => None,
        }
    }

    pub const fn is_enemy(self) -> bool {
        !matches!(self, CharacterKind::Player)
    }

    /// Whether AI activation is gated on the sticky `seen` flag.
    pub const fn uses_seen_flag(self) -> bool {
        self.is_enemy()
    }

    /// Whether this kind levels up from experience.
    pub const fn gains_experience(self) -> bool {
        matches!(self, CharacterKind::Player)
    }
}

/// Player-only levelling state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub level: u32,
    pub target_xp: u32,
}

/// A living (or dead) actor in the dungeon.
///
/// The position stored here always equals the grid cell whose occupant refers
/// to this character; only [`crate::state::Dungeon`] moves characters so both
/// sides are updated together.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub kind: CharacterKind,
    pub(crate) position: Position,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defend: u32,
    pub speed: u32,
    pub move_remaining: u32,
    pub xp: u32,
    pub critical_chance: f64,
    /// Present for kinds that gain experience.
    pub progression: Option<Progression>,
    fixed_critical: bool,
    seen: bool,
    alive: bool,
}

impl Character {
    /// Builds a character from its kind's base stats.
    pub fn new(kind: CharacterKind, position: Position, stats: StatBlock, config: &GameConfig) -> Self {
        let progression = kind.gains_experience().then_some(Progression {
            level: config.initial_level,
            target_xp: config.initial_target_xp,
        });

        Self {
            kind,
            position,
            health: stats.health,
            max_health: stats.health,
            attack: stats.attack,
            defend: stats.defend,
            speed: stats.speed,
            move_remaining: stats.speed,
            xp: stats.xp,
            critical_chance: stats
                .critical_chance
                .unwrap_or_else(|| critical_chance_for_xp(stats.xp)),
            progression,
            fixed_critical: stats.critical_chance.is_some(),
            seen: false,
            alive: true,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn name(&self) -> &'static str {
        self.kind.into()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_enemy(&self) -> bool {
        self.kind.is_enemy()
    }

    /// Sticky flag: true once the character has stood on a tile stamped visible.
    pub fn is_seen(&self) -> bool {
        self.seen
    }

    /// Marks the character as seen. Returns true on the first sighting.
    pub(crate) fn mark_seen(&mut self) -> bool {
        let first = !self.seen;
        self.seen = true;
        first
    }

    pub(crate) fn mark_dead(&mut self) {
        self.alive = false;
        self.health = 0;
        self.move_remaining = 0;
    }

    /// Restores the full move budget at the start of this character's turn.
    pub fn reset_moves(&mut self) {
        self.move_remaining = self.speed;
    }

    /// Consumes one move point. Returns the points left.
    pub fn spend_move(&mut self) -> u32 {
        self.move_remaining = self.move_remaining.saturating_sub(1);
        self.move_remaining
    }

    /// Ends this character's turn without spending further moves.
    pub fn exhaust_moves(&mut self) {
        self.move_remaining = 0;
    }

    pub fn level(&self) -> Option<u32> {
        self.progression.map(|p| p.level)
    }

    pub fn target_xp(&self) -> Option<u32> {
        self.progression.map(|p| p.target_xp)
    }

    /// Adds experience and applies at most one level-up.
    ///
    /// On reaching the target: level +1, the target is subtracted from xp and the
    /// next target is derived from the level curve. Critical chance is re-derived
    /// from the updated experience unless the stat table fixed it. Returns true if
    /// the character levelled up.
    pub fn gain_xp(&mut self, amount: u32, config: &GameConfig) -> bool {
        let Some(progression) = self.progression.as_mut() else {
            return false;
        };

        self.xp = self.xp.saturating_add(amount);
        let levelled = self.xp >= progression.target_xp;
        if levelled {
            progression.level += 1;
            self.xp -= progression.target_xp;
            progression.target_xp = next_target_xp(progression.target_xp, config);
        }

        if !self.fixed_critical {
            self.critical_chance = critical_chance_for_xp(self.xp);
        }
        levelled
    }
}
