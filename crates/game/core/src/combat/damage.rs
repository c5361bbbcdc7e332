//! Damage calculation and application.

/// Damage of a critical hit.
///
/// # Formula
///
/// ```text
/// max(1, die_sides + attack - defense_roll) * 2
/// ```
///
/// A critical hit always deals at least 2.
pub fn critical_damage(die_sides: u32, attack: u32, defense_roll: u32) -> u32 {
    let raw = i64::from(die_sides) + i64::from(attack) - i64::from(defense_roll);
    u32::try_from(raw.max(1))
        .unwrap_or(u32::MAX)
        .saturating_mul(2)
}

/// Damage of a regular roll: the margin by which the attack beat the defense.
///
/// Returns `None` when the defender held (`attack_roll <= defense_roll`).
pub fn regular_damage(attack_roll: u32, defense_roll: u32) -> Option<u32> {
    attack_roll
        .checked_sub(defense_roll)
        .filter(|damage| *damage > 0)
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_damage_has_floor_of_two() {
        assert_eq!(critical_damage(6, 0, 20), 2);
        assert_eq!(critical_damage(6, 5, 5), 12);
        assert_eq!(critical_damage(6, 3, 9), 2);
    }

    #[test]
    fn critical_damage_saturates_on_huge_stats() {
        assert_eq!(critical_damage(u32::MAX, u32::MAX, 0), u32::MAX);
        assert_eq!(critical_damage(u32::MAX, 1, 0), u32::MAX);
    }

    #[test]
    fn regular_damage_is_the_margin() {
        assert_eq!(regular_damage(9, 6), Some(3));
        assert_eq!(regular_damage(6, 6), None);
        assert_eq!(regular_damage(2, 7), None);
    }

    #[test]
    fn damage_clamps_at_zero() {
        assert_eq!(apply_damage(5, 3), 2);
        assert_eq!(apply_damage(2, 3), 0);
    }
}
