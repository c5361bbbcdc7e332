//! Player commands and the stepped enemy phase.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::ai::{self, EnemyIntent};
use crate::combat::AttackResolution;
use crate::env::RngOracle;
use crate::event::CombatEvent;
use crate::state::{CharacterId, TurnPhase};

use super::{GameEngine, TurnError};

/// Result of a player move command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerMoveOutcome {
    /// Wall or map edge. Nothing changed and no move point was spent.
    Blocked,
    Moved { remaining: u32 },
    Collected { amount: u32, remaining: u32 },
    /// The destination held an enemy. The attack ends the player's turn.
    Attacked { result: AttackResolution },
}

/// What one enemy did during an enemy-phase step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAction {
    pub enemy: CharacterId,
    pub intent: EnemyIntent,
    /// Resolution of the enemy's attack, for [`EnemyIntent::Attack`].
    pub attack: Option<AttackResolution>,
}

/// Summary of one [`GameEngine::advance_enemy_turn`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStepReport {
    /// 1-based index of this step within the current enemy phase.
    pub step: u64,
    /// Actions in activation order.
    pub actions: Vec<EnemyAction>,
    /// Control went back to the player at the end of this step.
    pub returned_to_player: bool,
    pub game_over: bool,
}

impl GameEngine {
    /// Moves the player one cardinal step, or attacks the enemy standing there.
    ///
    /// A blocked destination is a no-op. Each accepted step spends one move
    /// point; spending the last one hands control to the enemies. Attacking
    /// spends the whole remaining budget.
    pub fn move_player(
        &mut self,
        dx: i32,
        dy: i32,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<PlayerMoveOutcome, TurnError> {
        if self.turn.game_over {
            return Err(TurnError::GameOver);
        }
        if !self.turn.phase.is_player_turn() {
            return Err(TurnError::NotPlayerTurn);
        }
        if dx.abs() + dy.abs() != 1 {
            return Err(TurnError::InvalidDirection { dx, dy });
        }

        let player = self.dungeon.player_id();
        let from = self.dungeon.player().position();
        let to = from.offset(dx, dy);

        if let Some(enemy) = self.dungeon.enemy_at(to) {
            debug!(%from, %to, %enemy, "player attacks");
            let result = self.resolve_exchange(player, enemy, rng)?;
            self.dungeon.player_mut().exhaust_moves();
            self.refresh_visibility();
            if !self.turn.game_over {
                self.enter_enemy_turn();
            }
            return Ok(PlayerMoveOutcome::Attacked { result });
        }

        if self.dungeon.is_blocked(to) {
            debug!(%from, %to, "player move blocked");
            return Ok(PlayerMoveOutcome::Blocked);
        }

        let collected = self.dungeon.move_character(player, to)?;
        let remaining = self.dungeon.player_mut().spend_move();
        if let Some(amount) = collected {
            self.events.push(CombatEvent::gold(to, amount));
        }
        debug!(%from, %to, remaining, gold = ?collected, "player moved");

        self.refresh_visibility();
        if remaining == 0 {
            self.enter_enemy_turn();
        }

        Ok(match collected {
            Some(amount) => PlayerMoveOutcome::Collected { amount, remaining },
            None => PlayerMoveOutcome::Moved { remaining },
        })
    }

    /// Processes one step of the enemy phase.
    ///
    /// Every enemy still in the queue decides against the state left by the
    /// enemies before it and applies its intent immediately. Enemies out of
    /// moves leave the queue; once it is empty control returns to the player.
    pub fn advance_enemy_turn(
        &mut self,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<EnemyStepReport, TurnError> {
        if self.turn.game_over {
            return Err(TurnError::GameOver);
        }
        let queue = match &mut self.turn.phase {
            TurnPhase::EnemyTurn { queue } => std::mem::take(queue),
            TurnPhase::PlayerTurn => return Err(TurnError::NotEnemyTurn),
        };

        self.turn.enemy_step += 1;
        let mut report = EnemyStepReport {
            step: self.turn.enemy_step,
            ..EnemyStepReport::default()
        };
        let mut still_active = VecDeque::with_capacity(queue.len());

        for enemy in queue {
            if self.turn.game_over {
                break;
            }
            if !self.dungeon.character(enemy).is_some_and(|c| c.is_alive()) {
                continue;
            }

            let action = self.act(enemy, rng)?;
            report.actions.push(action);

            let keeps_acting = self
                .dungeon
                .character(enemy)
                .is_some_and(|c| c.is_alive() && c.move_remaining > 0);
            if keeps_acting {
                still_active.push_back(enemy);
            }
        }

        self.refresh_visibility();
        debug!(
            step = report.step,
            acted = report.actions.len(),
            remaining = still_active.len(),
            "enemy step processed"
        );

        if self.turn.game_over {
            report.game_over = true;
            info!(round = self.turn.round, "game over during enemy turn");
        } else if still_active.is_empty() {
            self.begin_player_turn();
            report.returned_to_player = true;
        } else {
            self.turn.phase = TurnPhase::EnemyTurn {
                queue: still_active,
            };
        }

        Ok(report)
    }

    /// Steps the enemy phase until control returns to the player or the game ends.
    pub fn run_enemy_turn(
        &mut self,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<Vec<EnemyStepReport>, TurnError> {
        let mut reports = Vec::new();
        loop {
            let report = self.advance_enemy_turn(rng)?;
            let done = report.returned_to_player || report.game_over;
            reports.push(report);
            if done {
                return Ok(reports);
            }
        }
    }

    /// Decides and applies one enemy's intent.
    fn act(
        &mut self,
        enemy: CharacterId,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<EnemyAction, TurnError> {
        let intent = ai::decide(&self.dungeon, enemy, rng);
        let mut attack = None;

        match intent {
            EnemyIntent::Attack { target } => {
                attack = Some(self.resolve_exchange(enemy, target, rng)?);
                if let Some(character) = self.dungeon.character_mut(enemy) {
                    character.exhaust_moves();
                }
            }
            EnemyIntent::Step { dx, dy } => {
                let to = self
                    .dungeon
                    .character(enemy)
                    .map(|c| c.position().offset(dx, dy));
                if let Some(to) = to {
                    self.dungeon.move_character(enemy, to)?;
                    if let Some(character) = self.dungeon.character_mut(enemy) {
                        character.spend_move();
                    }
                }
            }
            EnemyIntent::Hold => {
                if let Some(character) = self.dungeon.character_mut(enemy) {
                    character.exhaust_moves();
                }
            }
        }

        debug!(%enemy, intent = intent.as_str(), "enemy acted");
        Ok(EnemyAction {
            enemy,
            intent,
            attack,
        })
    }

    /// Builds the activation queue and switches to the enemy phase.
    ///
    /// Only enemies already seen take part. Each gets a fresh budget, and the
    /// queue is ordered by taxicab distance to the player, ties keeping map
    /// order.
    fn enter_enemy_turn(&mut self) {
        let target = self.dungeon.player().position();
        let mut queue: Vec<(u32, CharacterId)> = self
            .dungeon
            .live_enemies()
            .iter()
            .copied()
            .filter_map(|id| {
                let enemy = self.dungeon.character(id)?;
                enemy
                    .is_seen()
                    .then(|| (enemy.position().taxicab(target), id))
            })
            .collect();
        queue.sort_by_key(|(distance, _)| *distance);

        for (_, id) in &queue {
            if let Some(enemy) = self.dungeon.character_mut(*id) {
                enemy.reset_moves();
            }
        }

        debug!(
            round = self.turn.round,
            active = queue.len(),
            "enemy turn started"
        );
        self.turn.enemy_step = 0;
        self.turn.phase = TurnPhase::EnemyTurn {
            queue: queue.into_iter().map(|(_, id)| id).collect(),
        };
    }

    fn begin_player_turn(&mut self) {
        self.dungeon.player_mut().reset_moves();
        self.turn.round += 1;
        self.turn.phase = TurnPhase::PlayerTurn;
        debug!(round = self.turn.round, "player turn started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{ScriptedRng, StatTable};
    use crate::state::{Dungeon, Position};

    fn engine(rows: &[&str]) -> GameEngine {
        let config = GameConfig::default();
        let dungeon = Dungeon::from_ascii(rows, &StatTable::default(), &config).unwrap();
        GameEngine::new(dungeon, config)
    }

    #[test]
    fn rejects_diagonal_and_long_steps() {
        let mut engine = engine(&["@  "]);
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert_eq!(
            engine.move_player(1, 1, &mut rng),
            Err(TurnError::InvalidDirection { dx: 1, dy: 1 })
        );
        assert_eq!(
            engine.move_player(0, 0, &mut rng),
            Err(TurnError::InvalidDirection { dx: 0, dy: 0 })
        );
        assert_eq!(engine.player_stats().move_remaining, 3);
    }

    #[test]
    fn blocked_move_spends_nothing() {
        let mut engine = engine(&["@#"]);
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert_eq!(engine.move_player(1, 0, &mut rng), Ok(PlayerMoveOutcome::Blocked));
        assert_eq!(engine.move_player(-1, 0, &mut rng), Ok(PlayerMoveOutcome::Blocked));
        assert_eq!(engine.player_stats().move_remaining, 3);
        assert!(engine.phase().is_player_turn());
    }

    #[test]
    fn collecting_gold_emits_reward() {
        let mut engine = engine(&["@* "]);
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert_eq!(
            engine.move_player(1, 0, &mut rng),
            Ok(PlayerMoveOutcome::Collected {
                amount: 25,
                remaining: 2
            })
        );
        assert_eq!(engine.player_stats().gold, 25);
        let events = engine.drain_events();
        assert_eq!(events, vec![CombatEvent::gold(Position::new(1, 0), 25)]);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn commands_are_refused_in_the_wrong_phase() {
        let mut engine = engine(&["@   "]);
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert_eq!(
            engine.advance_enemy_turn(&mut rng),
            Err(TurnError::NotEnemyTurn)
        );

        for _ in 0..3 {
            engine.move_player(1, 0, &mut rng).unwrap();
        }
        assert!(engine.phase().is_enemy_turn());
        assert_eq!(
            engine.move_player(1, 0, &mut rng),
            Err(TurnError::NotPlayerTurn)
        );
    }

    #[test]
    fn empty_enemy_phase_returns_control_in_one_step() {
        let mut engine = engine(&["@   "]);
        let mut rng = ScriptedRng::new(vec![0.5]);
        for _ in 0..3 {
            engine.move_player(1, 0, &mut rng).unwrap();
        }

        let report = engine.advance_enemy_turn(&mut rng).unwrap();
        assert!(report.actions.is_empty());
        assert!(report.returned_to_player);
        assert!(engine.phase().is_player_turn());
        assert_eq!(engine.player_stats().move_remaining, 3);
        assert_eq!(engine.turn().round, 1);
    }

    #[test]
    fn unseen_enemies_do_not_activate() {
        // The goblin sits behind a wall and is never stamped visible.
        let mut engine = engine(&["@  #1"]);
        let mut rng = ScriptedRng::new(vec![0.5]);
        for _ in 0..2 {
            engine.move_player(1, 0, &mut rng).unwrap();
        }
        engine.move_player(-1, 0, &mut rng).unwrap();

        assert_eq!(engine.phase(), &TurnPhase::EnemyTurn { queue: VecDeque::new() });
        let reports = engine.run_enemy_turn(&mut rng).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].actions.is_empty());
    }
}
