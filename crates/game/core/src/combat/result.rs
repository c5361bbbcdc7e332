//! Combat result types and attack resolution.

use crate::env::{RngOracle, roll_from_unit};
use crate::state::Character;

use super::damage::{critical_damage, regular_damage};

/// Combat-relevant stats captured when an attack starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatantStats {
    pub attack: u32,
    pub defend: u32,
    pub critical_chance: f64,
}

impl CombatantStats {
    pub const fn new(attack: u32, defend: u32, critical_chance: f64) -> Self {
        Self {
            attack,
            defend,
            critical_chance,
        }
    }
}

impl From<&Character> for CombatantStats {
    fn from(character: &Character) -> Self {
        Self::new(character.attack, character.defend, character.critical_chance)
    }
}

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// The first draw landed in the critical band; damage is doubled.
    Critical,
    /// The die showed a one. The attack fails and the defender strikes back.
    Fumble,
    /// The attack roll beat the defense roll.
    Hit,
    /// The defense roll matched or beat the attack roll.
    Defended,
}

impl AttackOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            AttackOutcome::Critical => "critical",
            AttackOutcome::Fumble => "fumble",
            AttackOutcome::Hit => "hit",
            AttackOutcome::Defended => "defended",
        }
    }
}

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResolution {
    pub outcome: AttackOutcome,

    /// Die face plus attack value. `None` for criticals and fumbles.
    pub attack_roll: Option<u32>,

    /// Die face plus defend value. `None` for fumbles, which end before defense.
    pub defense_roll: Option<u32>,

    /// Damage to apply to the defender (always 0 for fumbles and defended attacks).
    pub damage: u32,
}

impl AttackResolution {
    pub fn is_fumble(&self) -> bool {
        self.outcome == AttackOutcome::Fumble
    }
}

/// Resolve one attack.
///
/// # Procedure
///
/// ```text
/// r = unit draw
/// r > 1 - critical_chance      => Critical
/// face = 1 + floor(r * N)
/// face == 1                    => Fumble (no further draws)
/// attack_roll  = face + attack
/// defense_roll = 1 + floor(unit draw * N) + defend
/// Critical: damage = max(1, N + attack - defense_roll) * 2
/// attack_roll > defense_roll   => Hit, damage = attack_roll - defense_roll
/// otherwise                    => Defended
/// ```
///
/// Pure apart from the draws taken from `rng`.
pub fn resolve_attack(
    attacker: &CombatantStats,
    defender: &CombatantStats,
    die_sides: u32,
    rng: &mut (impl RngOracle + ?Sized),
) -> AttackResolution {
    let r = rng.next_unit();
    let critical = r > 1.0 - attacker.critical_chance;

    let attack_roll = if critical {
        None
    } else {
        let face = roll_from_unit(r, die_sides);
        if face == 1 {
            return AttackResolution {
                outcome: AttackOutcome::Fumble,
                attack_roll: None,
                defense_roll: None,
                damage: 0,
            };
        }
        Some(face + attacker.attack)
    };

    let defense_roll = rng.roll_die(die_sides) + defender.defend;

    let (outcome, damage) = match attack_roll {
        None => (
            AttackOutcome::Critical,
            critical_damage(die_sides, attacker.attack, defense_roll),
        ),
        Some(roll) => match regular_damage(roll, defense_roll) {
            Some(damage) => (AttackOutcome::Hit, damage),
            None => (AttackOutcome::Defended, 0),
        },
    };

    AttackResolution {
        outcome,
        attack_roll,
        defense_roll: Some(defense_roll),
        damage,
    }
}
