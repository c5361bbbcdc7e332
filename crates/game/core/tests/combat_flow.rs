use game_core::{
    AttackOutcome, CharacterKind, CombatEvent, Dungeon, EventColor, GameConfig, GameEngine,
    PlayerMoveOutcome, Position, ScriptedRng, StatBlock, StatTable, TurnError,
};

fn engine_with(rows: &[&str], stats: StatTable) -> GameEngine {
    let config = GameConfig::default();
    let dungeon = Dungeon::from_ascii(rows, &stats, &config).unwrap();
    GameEngine::new(dungeon, config)
}

/// Walks the player three tiles east so the goblin at the end of the
/// corridor gets its turn while adjacent.
fn goblin_turn(engine: &mut GameEngine, rng: &mut ScriptedRng) {
    for _ in 0..3 {
        engine.move_player(1, 0, rng).unwrap();
    }
    assert!(engine.phase().is_enemy_turn());
}

#[test]
fn goblin_hit_subtracts_margin_from_player_health() {
    let mut engine = engine_with(&["@   1"], StatTable::default());
    // Goblin draw 0.85: face 6 + 3 = 9 (below its critical band).
    // Player defense 0.0: face 1 + 4 = 5.
    let mut rng = ScriptedRng::new(vec![0.85, 0.0]);
    goblin_turn(&mut engine, &mut rng);

    let report = engine.advance_enemy_turn(&mut rng).unwrap();
    let attack = report.actions[0].attack.unwrap();
    assert_eq!(attack.outcome, AttackOutcome::Hit);
    assert_eq!(attack.attack_roll, Some(9));
    assert_eq!(attack.defense_roll, Some(5));
    assert_eq!(attack.damage, 4);
    assert_eq!(engine.player_stats().health, 16);

    let events = engine.drain_events();
    assert_eq!(events, vec![CombatEvent::damage(Position::new(3, 0), 4)]);
    assert_eq!(events[0].color, EventColor::Damage);
}

#[test]
fn killing_blow_awards_xp_and_levels_up() {
    let stats = StatTable::default().with(CharacterKind::Goblin, StatBlock::new(1, 4, 3, 1).with_xp(100));
    let mut engine = engine_with(&["@1"], stats);
    // Player draw 0.9: face 6 + 5 = 11. Goblin defense 0.0: face 1 + 1 = 2.
    let mut rng = ScriptedRng::new(vec![0.9, 0.0]);

    let outcome = engine.move_player(1, 0, &mut rng).unwrap();
    let PlayerMoveOutcome::Attacked { result } = outcome else {
        panic!("expected an attack, got {outcome:?}");
    };
    assert_eq!(result.damage, 9);

    assert!(engine.dungeon().live_enemies().is_empty());
    assert_eq!(engine.dungeon().character_at(Position::new(1, 0)), None);

    let player = engine.player_stats();
    assert_eq!(player.level, Some(2));
    assert_eq!(player.xp, 0);
    assert_eq!(player.target_xp, Some(120));
    assert_eq!(player.move_remaining, 0);
    // (0 + 3) / (0 * 5 + 75)
    assert!((player.critical_chance - 0.04).abs() < 1e-9);

    let labels: Vec<String> = engine.drain_events().into_iter().map(|e| e.text).collect();
    assert_eq!(labels, vec!["-9", "Defeated", "+100 xp", "Level up!"]);

    // Attacking ended the turn; no enemy was left to act.
    assert!(engine.phase().is_enemy_turn());
    let report = engine.advance_enemy_turn(&mut rng).unwrap();
    assert!(report.returned_to_player);
}

#[test]
fn attacking_ends_the_turn_even_with_moves_left() {
    let mut engine = engine_with(&["@1"], StatTable::default());
    // Player 0.5: face 4 + 5 = 9. Goblin defense 0.99: face 6 + 1 = 7.
    let mut rng = ScriptedRng::new(vec![0.5, 0.99]);

    let outcome = engine.move_player(1, 0, &mut rng).unwrap();
    assert!(matches!(outcome, PlayerMoveOutcome::Attacked { .. }));
    assert_eq!(engine.player_stats().move_remaining, 0);
    assert!(engine.phase().is_enemy_turn());

    let goblin = engine.dungeon().live_enemies()[0];
    assert_eq!(engine.entity_stats(goblin).unwrap().health, 1);
}

#[test]
fn fumble_gives_the_defender_one_counter_attack() {
    let mut engine = engine_with(&["@1"], StatTable::default());
    // Player fumbles (0.1 -> face 1). Goblin counters with 0.85 -> 6 + 3 = 9
    // against player defense 0.0 -> 1 + 4 = 5.
    let mut rng = ScriptedRng::new(vec![0.1, 0.85, 0.0]);

    let outcome = engine.move_player(1, 0, &mut rng).unwrap();
    let PlayerMoveOutcome::Attacked { result } = outcome else {
        panic!("expected an attack, got {outcome:?}");
    };
    assert_eq!(result.outcome, AttackOutcome::Fumble);
    assert_eq!(engine.player_stats().health, 16);
    assert_eq!(rng.consumed(), 3);

    let labels: Vec<String> = engine.drain_events().into_iter().map(|e| e.text).collect();
    assert_eq!(labels, vec!["Fumble!", "-4"]);
}

#[test]
fn fumbled_counter_attack_does_not_bounce_again() {
    let mut engine = engine_with(&["@1"], StatTable::default());
    let mut rng = ScriptedRng::new(vec![0.1, 0.1, 0.9]);

    engine.move_player(1, 0, &mut rng).unwrap();
    assert_eq!(rng.consumed(), 2);
    assert_eq!(engine.player_stats().health, 20);
    let labels: Vec<String> = engine.drain_events().into_iter().map(|e| e.text).collect();
    assert_eq!(labels, vec!["Fumble!", "Fumble!"]);
}

#[test]
fn critical_hit_doubles_and_floors_damage() {
    let stats = StatTable::default().with(
        CharacterKind::Player,
        StatBlock::new(20, 3, 5, 4).with_critical_chance(1.0),
    );
    let mut engine = engine_with(&["@2"], stats);
    // Critical draw 0.5; orc defense 0.99: face 6 + 2 = 8. max(1, 6 + 5 - 8) * 2 = 6.
    let mut rng = ScriptedRng::new(vec![0.5, 0.99]);

    let outcome = engine.move_player(1, 0, &mut rng).unwrap();
    let PlayerMoveOutcome::Attacked { result } = outcome else {
        panic!("expected an attack, got {outcome:?}");
    };
    assert_eq!(result.outcome, AttackOutcome::Critical);
    assert_eq!(result.damage, 6);

    let orc = engine.dungeon().live_enemies()[0];
    assert_eq!(engine.entity_stats(orc).unwrap().health, 2);
    let events = engine.drain_events();
    assert_eq!(events[0], CombatEvent::critical(Position::new(0, 0)));
    assert_eq!(events[1], CombatEvent::damage(Position::new(1, 0), 6));
}

#[test]
fn player_death_halts_the_session() {
    let stats = StatTable::default().with(CharacterKind::Player, StatBlock::new(1, 3, 5, 4));
    let mut engine = engine_with(&["@   1"], stats);
    let mut rng = ScriptedRng::new(vec![0.85, 0.0]);
    goblin_turn(&mut engine, &mut rng);

    let report = engine.advance_enemy_turn(&mut rng).unwrap();
    assert!(report.game_over);
    assert!(!report.returned_to_player);
    assert!(engine.is_game_over());
    assert_eq!(engine.player_stats().health, 0);

    assert_eq!(
        engine.advance_enemy_turn(&mut rng),
        Err(TurnError::GameOver)
    );
    assert_eq!(engine.move_player(1, 0, &mut rng), Err(TurnError::GameOver));
    assert_eq!(engine.run_enemy_turn(&mut rng), Err(TurnError::GameOver));
}
