//! Applying attack resolutions to the dungeon.

use tracing::{debug, info};

use crate::combat::{AttackOutcome, AttackResolution, CombatantStats, apply_damage, resolve_attack};
use crate::env::RngOracle;
use crate::error::GridError;
use crate::event::CombatEvent;
use crate::state::{CharacterId, Position};

use super::{GameEngine, TurnError};

impl GameEngine {
    /// Resolves `attacker` striking `defender`.
    ///
    /// A fumble hands the defender exactly one counter-attack, resolved with the
    /// same rules. A fumble on the counter-attack ends the exchange. Returns the
    /// resolution of the initial attack.
    pub(super) fn resolve_exchange(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<AttackResolution, TurnError> {
        let resolution = self.strike(attacker, defender, rng)?;

        if resolution.is_fumble() && !self.turn.game_over {
            let counter = self.strike(defender, attacker, rng)?;
            debug!(
                %attacker,
                %defender,
                counter = counter.outcome.as_str(),
                "fumble answered by counter-attack"
            );
        }

        Ok(resolution)
    }

    /// One attack, its events, damage and any resulting death.
    fn strike(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<AttackResolution, TurnError> {
        let (attacker_stats, attacker_at) = self.combatant(attacker)?;
        let (defender_stats, defender_at) = self.combatant(defender)?;

        let resolution = resolve_attack(&attacker_stats, &defender_stats, self.config.die_sides, rng);
        debug!(
            %attacker,
            %defender,
            outcome = resolution.outcome.as_str(),
            attack_roll = ?resolution.attack_roll,
            defense_roll = ?resolution.defense_roll,
            damage = resolution.damage,
            "attack resolved"
        );

        match resolution.outcome {
            AttackOutcome::Critical => {
                self.events.push(CombatEvent::critical(attacker_at));
                self.events
                    .push(CombatEvent::damage(defender_at, resolution.damage));
            }
            AttackOutcome::Fumble => self.events.push(CombatEvent::fumble(attacker_at)),
            AttackOutcome::Hit => self
                .events
                .push(CombatEvent::damage(defender_at, resolution.damage)),
            AttackOutcome::Defended => self.events.push(CombatEvent::blocked(defender_at)),
        }

        if resolution.damage > 0 {
            let Some(target) = self.dungeon.character_mut(defender) else {
                return Err(GridError::MissingCharacter { id: defender }.into());
            };
            target.health = apply_damage(target.health, resolution.damage);
            if target.health == 0 {
                self.defeat(attacker, defender);
            }
        }

        Ok(resolution)
    }

    fn combatant(&self, id: CharacterId) -> Result<(CombatantStats, Position), TurnError> {
        let character = self
            .dungeon
            .character(id)
            .filter(|c| c.is_alive())
            .ok_or(GridError::MissingCharacter { id })?;
        Ok((CombatantStats::from(character), character.position()))
    }

    /// Handles a character dropping to zero health.
    fn defeat(&mut self, victor: CharacterId, fallen: CharacterId) {
        let Some(character) = self.dungeon.character(fallen) else {
            return;
        };
        let position = character.position();
        let reward = character.xp;
        let kind = character.kind;
        self.events.push(CombatEvent::defeated(position));

        if fallen == self.dungeon.player_id() {
            // The player stays on the grid at zero health.
            self.turn.game_over = true;
            info!(%victor, %position, "player defeated, game over");
            return;
        }

        self.dungeon.remove_character(fallen);
        info!(%fallen, %kind, %position, "enemy defeated");

        if victor == self.dungeon.player_id() {
            self.award_experience(reward);
        }
        self.dungeon.debug_assert_consistent();
    }

    fn award_experience(&mut self, amount: u32) {
        let position = self.dungeon.player().position();
        self.events.push(CombatEvent::experience(position, amount));

        let config = &self.config;
        let player = self.dungeon.player_mut();
        if player.gain_xp(amount, config) {
            let level = player.level().unwrap_or_default();
            let target_xp = player.target_xp().unwrap_or_default();
            self.events.push(CombatEvent::level_up(position));
            info!(level, target_xp, "player levelled up");
        }
    }
}
