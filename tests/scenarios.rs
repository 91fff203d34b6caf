//! End-to-end scenarios through the public engine API

use glam::Vec2;
use snowball_showdown::consts::*;
use snowball_showdown::sim::combat::kill_enemy;
use snowball_showdown::sim::player::take_damage;
use snowball_showdown::sim::{
    Enemy, EnemyKind, Engine, GameEvent, GamePhase, LevelConfig, PowerUpInventory, PowerUpKind, Projectile,
    ProjectileKind,
};
use snowball_showdown::{LevelLoadError, SoundCue, Tuning};

fn engine_on(level: LevelConfig) -> Engine {
    let mut engine = Engine::new(Tuning::default(), 2024);
    engine.load_level(level, 0.0);
    engine.drain_events();
    engine
}

fn boss_level(n: u32) -> LevelConfig {
    let mut level = LevelConfig::plain(n);
    level.is_boss_level = true;
    level
}

fn hit(engine: &mut Engine, amount: u32, now: f64) -> Vec<GameEvent> {
    let t = engine.tuning().clone();
    take_damage(engine.state_mut(), amount, now, &t);
    engine.drain_events()
}

fn add_minion(engine: &mut Engine, pos: Vec2) {
    let t = engine.tuning().clone();
    let state = engine.state_mut();
    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, EnemyKind::Snowman, pos, 0.0, &t, 0.0));
}

fn snowball(engine: &mut Engine, pos: Vec2, vel: Vec2, from_player: bool) {
    let state = engine.state_mut();
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos,
        vel,
        radius: SNOWBALL_RADIUS,
        color: "#e2e8f0",
        damage: 1,
        from_player,
        created_at: 0.0,
        kind: ProjectileKind::Snowball,
    });
}

fn count_completions(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
        .count()
}

#[test]
fn damage_is_debounced() {
    let mut engine = engine_on(LevelConfig::plain(1));

    let events = hit(&mut engine, 1, 1000.0);
    assert_eq!(engine.state().player.hp, 2);
    assert_eq!(engine.state().player.last_hit_time, Some(1000.0));
    assert!(events.contains(&GameEvent::HealthChanged {
        hp: 2,
        max_hp: 3,
        shield_hp: 0
    }));

    assert!(hit(&mut engine, 1, 1500.0).is_empty());
    assert_eq!(engine.state().player.hp, 2);

    hit(&mut engine, 1, 2001.0);
    assert_eq!(engine.state().player.hp, 1);
}

#[test]
fn shield_soaks_then_breaks() {
    let mut engine = engine_on(LevelConfig::plain(1));
    engine.set_powerups(PowerUpInventory::from_kinds([PowerUpKind::Shield]));
    engine.drain_events();
    assert_eq!(engine.state().player.shield_hp, 3);

    let events = hit(&mut engine, 1, 1000.0);
    assert_eq!(engine.state().player.shield_hp, 2);
    assert_eq!(engine.state().player.hp, 3);
    assert!(events.contains(&GameEvent::Sound(SoundCue::ShieldHit)));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::PowerUpRevoked { .. })));

    engine.state_mut().player.shield_hp = 1;
    let events = hit(&mut engine, 1, 2001.0);
    assert_eq!(engine.state().player.shield_hp, 0);
    assert!(events.contains(&GameEvent::Sound(SoundCue::ShieldBreak)));
    assert!(events.contains(&GameEvent::PowerUpRevoked {
        kind: PowerUpKind::Shield,
        count: 1
    }));
}

#[test]
fn lethal_hit_ends_the_run() {
    let mut engine = engine_on(LevelConfig::plain(1));
    engine.state_mut().player.hp = 1;
    let events = hit(&mut engine, 1, 1000.0);
    assert!(events.contains(&GameEvent::LifeLost));
    assert!(events.contains(&GameEvent::GameOver { score: 0 }));
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert!(engine.tick(1016.0).is_empty());
}

#[test]
fn tenth_kill_completes_level_once() {
    let mut engine = engine_on(LevelConfig::plain(1));
    engine.state_mut().kills = 8;
    let target = Vec2::new(100.0, 100.0);
    let mut completions = 0;

    for (round, now) in [16.0, 32.0, 48.0].into_iter().enumerate() {
        add_minion(&mut engine, target);
        snowball(&mut engine, target - Vec2::new(10.0, 0.0), Vec2::new(7.0, 0.0), true);
        let events = engine.tick(now);
        completions += count_completions(&events);
        match round {
            0 => {
                assert_eq!(engine.state().kills, 9);
                assert_eq!(completions, 0);
            }
            1 => {
                assert_eq!(engine.state().kills, 10);
                assert_eq!(completions, 1);
                assert_eq!(engine.phase(), GamePhase::LevelComplete);
            }
            _ => assert_eq!(completions, 1),
        }
    }
}

#[test]
fn boss_spawns_once_and_level_waits_for_stragglers() {
    let mut engine = engine_on(boss_level(7));

    engine.tick(16.0);
    let state = engine.state();
    assert_eq!(state.enemies.len(), 1);
    let boss = state.boss().expect("boss on the field");
    assert_eq!(boss.kind(), EnemyKind::BossBells);
    assert!((boss.pos.x - CANVAS_WIDTH / 2.0).abs() < 1e-3);
    assert!(boss.pos.y < 0.0, "enters from above the top edge");

    for i in 2..10 {
        engine.tick(16.0 * i as f64);
    }
    let bosses = engine.state().enemies.iter().filter(|e| e.is_boss()).count();
    assert_eq!(bosses, 1);

    // Boss down, one minion still around
    add_minion(&mut engine, Vec2::new(700.0, 500.0));
    let t = engine.tuning().clone();
    let state = engine.state_mut();
    let idx = state.enemies.iter().position(|e| e.is_boss()).unwrap();
    kill_enemy(state, idx, &t);
    state.projectiles.clear();

    let events = engine.tick(200.0);
    assert_eq!(count_completions(&events), 0);
    assert_eq!(engine.state().enemies.len(), 1, "no second boss");

    let state = engine.state_mut();
    kill_enemy(state, 0, &t);
    let events = engine.tick(216.0);
    assert_eq!(count_completions(&events), 1);
}

#[test]
fn rapid_fire_round_trip_restores_cooldown() {
    let mut engine = engine_on(LevelConfig::plain(1));
    let base = engine.tuning().fire_cooldown_ms;

    engine.set_powerups(PowerUpInventory::from_kinds([PowerUpKind::RapidFire]));
    assert_eq!(engine.powerups().fire_cooldown(engine.tuning()), engine.tuning().rapid_fire_cooldown_ms);

    engine.set_powerups(PowerUpInventory::new());
    assert_eq!(engine.powerups().fire_cooldown(engine.tuning()), base);
}

#[test]
fn edge_boundary_is_strict() {
    let mut engine = engine_on(LevelConfig::plain(1));
    // Lands exactly one radius from the left edge: survives
    snowball(&mut engine, Vec2::new(12.0, 100.0), Vec2::new(-7.0, 0.0), false);
    // Lands one unit further: gone
    snowball(&mut engine, Vec2::new(11.0, 200.0), Vec2::new(-7.0, 0.0), false);
    engine.tick(16.0);

    let hostile: Vec<&Projectile> = engine
        .state()
        .projectiles
        .iter()
        .filter(|p| !p.from_player)
        .collect();
    assert_eq!(hostile.len(), 1);
    assert_eq!(hostile[0].pos, Vec2::new(SNOWBALL_RADIUS, 100.0));
}

#[test]
fn failed_load_leaves_engine_idle() {
    let mut engine = Engine::new(Tuning::default(), 7);
    let err = LevelLoadError::Unavailable {
        level: 3,
        reason: "network".into(),
    };
    assert_eq!(engine.finish_level_load(Err(err.clone()), 0.0), Err(err));
    assert_eq!(engine.phase(), GamePhase::AwaitingLevel);

    let before = engine.state().player.pos;
    for i in 1..30 {
        assert!(engine.tick(i as f64 * 100.0).is_empty());
    }
    assert!(engine.state().enemies.is_empty());
    assert_eq!(engine.state().player.pos, before);
}
