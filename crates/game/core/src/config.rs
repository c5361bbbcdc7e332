/// Game configuration constants and tunable rule parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Sides of the base combat die (the `N` of every attack and defense roll).
    pub die_sides: u32,

    /// Gold granted by each `*` pickup placed from the map.
    pub gold_amount: u32,

    /// Level the player starts at.
    pub initial_level: u32,

    /// Experience required for the player's first level-up.
    pub initial_target_xp: u32,

    /// Growth factor of the level curve: `round(target * growth) * multiplier`.
    pub target_xp_growth: f64,

    /// Multiplier of the level curve.
    pub target_xp_multiplier: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Neighbours expanded per visibility frontier cell (left, down, right, up).
    pub const CARDINAL_NEIGHBOURS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DIE_SIDES: u32 = 6;
    pub const DEFAULT_GOLD_AMOUNT: u32 = 25;
    pub const DEFAULT_INITIAL_LEVEL: u32 = 1;
    pub const DEFAULT_INITIAL_TARGET_XP: u32 = 100;
    pub const DEFAULT_TARGET_XP_GROWTH: f64 = 0.24;
    pub const DEFAULT_TARGET_XP_MULTIPLIER: u32 = 5;

    pub fn new() -> Self {
        Self {
            die_sides: Self::DEFAULT_DIE_SIDES,
            gold_amount: Self::DEFAULT_GOLD_AMOUNT,
            initial_level: Self::DEFAULT_INITIAL_LEVEL,
            initial_target_xp: Self::DEFAULT_INITIAL_TARGET_XP,
            target_xp_growth: Self::DEFAULT_TARGET_XP_GROWTH,
            target_xp_multiplier: Self::DEFAULT_TARGET_XP_MULTIPLIER,
        }
    }

    /// Overrides the base die size. A zero-sided die is clamped to one side.
    #[must_use]
    pub fn with_die_sides(mut self, die_sides: u32) -> Self {
        self.die_sides = die_sides.max(1);
        self
    }

    #[must_use]
    pub fn with_gold_amount(mut self, gold_amount: u32) -> Self {
        self.gold_amount = gold_amount;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
