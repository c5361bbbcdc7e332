//! Experience curves.

use crate::config::GameConfig;

/// Critical chance earned from experience: `(xp + 3) / (xp * 5 + 75)`.
pub fn critical_chance_for_xp(xp: u32) -> f64 {
    let xp = f64::from(xp);
    (xp + 3.0) / (xp * 5.0 + 75.0)
}

/// Next level threshold: `round(target * growth) * multiplier`, never below 1.
pub fn next_target_xp(target_xp: u32, config: &GameConfig) -> u32 {
    let scaled = (f64::from(target_xp) * config.target_xp_growth).round() as u32;
    scaled.saturating_mul(config.target_xp_multiplier).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_chance_starts_small_and_tends_to_a_fifth() {
        assert!((critical_chance_for_xp(0) - 0.04).abs() < 1e-12);
        assert!(critical_chance_for_xp(10) > critical_chance_for_xp(0));
        assert!(critical_chance_for_xp(100_000) < 0.2);
    }

    #[test]
    fn target_curve_matches_formula() {
        let config = GameConfig::default();
        assert_eq!(next_target_xp(100, &config), 120);
        assert_eq!(next_target_xp(120, &config), 145);
        assert_eq!(next_target_xp(0, &config), 1);
    }
}
