//! Combat resolution system.
//!
//! This module provides pure functions for resolving a single attack between
//! two combatants. Applying the result to the dungeon (deaths, experience,
//! the fumble counter-attack, events) is the engine's job.
//!
//! # Core Functions
//!
//! - `resolve_attack`: Complete attack resolution (critical / fumble / hit / defended)
//! - `critical_damage`: Damage of a critical hit
//! - `apply_damage`: HP reduction (clamped to 0)
//! - `critical_chance_for_xp`, `next_target_xp`: Progression curves

pub mod damage;
pub mod progression;
pub mod result;

pub use damage::{apply_damage, critical_damage, regular_damage};
pub use progression::{critical_chance_for_xp, next_target_xp};
pub use result::{AttackOutcome, AttackResolution, CombatantStats, resolve_attack};
