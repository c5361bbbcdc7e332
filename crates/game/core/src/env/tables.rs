use crate::state::CharacterKind;

/// Oracle providing the base stats of every character kind.
///
/// Stats are copied onto characters when a dungeon is built; the oracle is
/// never consulted during play.
pub trait StatsOracle {
    fn stats_for(&self, kind: CharacterKind) -> StatBlock;
}

/// Fully enumerated base stats for one character kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub health: u32,
    /// Per-turn move budget ceiling.
    pub speed: u32,
    pub attack: u32,
    pub defend: u32,
    /// Starting experience for the player, experience awarded on death for enemies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp: u32,
    /// Fixed critical chance. `None` derives it from experience.
    #[cfg_attr(feature = "serde", serde(default))]
    pub critical_chance: Option<f64>,
}

impl StatBlock {
    pub const fn new(health: u32, speed: u32, attack: u32, defend: u32) -> Self {
        Self {
            health,
            speed,
            attack,
            defend,
            xp: 0,
            critical_chance: None,
        }
    }

    #[must_use]
    pub const fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    #[must_use]
    pub const fn with_critical_chance(mut self, chance: f64) -> Self {
        self.critical_chance = Some(chance);
        self
    }
}

/// Stat table covering every [`CharacterKind`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatTable {
    pub player: StatBlock,
    pub goblin: StatBlock,
    pub orc: StatBlock,
}

impl StatTable {
    pub const PLAYER: StatBlock = StatBlock::new(20, 3, 5, 4);
    pub const GOBLIN: StatBlock = StatBlock::new(3, 4, 3, 1).with_xp(10);
    pub const ORC: StatBlock = StatBlock::new(8, 2, 5, 2).with_xp(30);

    #[must_use]
    pub fn with(mut self, kind: CharacterKind, stats: StatBlock) -> Self {
        match kind {
            CharacterKind::Player => self.player = stats,
            CharacterKind::Goblin => self.goblin = stats,
            CharacterKind::Orc => self.orc = stats,
        }
        self
    }
}

impl Default for StatTable {
    fn default() -> Self {
        Self {
            player: Self::PLAYER,
            goblin: Self::GOBLIN,
            orc: Self::ORC,
        }
    }
}

impl StatsOracle for StatTable {
    fn stats_for(&self, kind: CharacterKind) -> StatBlock {
        match kind {
            CharacterKind::Player => self.player,
            CharacterKind::Goblin => self.goblin,
            CharacterKind::Orc => self.orc,
        }
    }
}
