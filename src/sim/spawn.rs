//! Enemy waves, boss arrival and the level-complete check

use glam::Vec2;
use rand::Rng;

use super::entity::{Enemy, EnemyKind};
use super::events::GameEvent;
use super::level::EnemyComposition;
use super::state::{GamePhase, SimulationState, TickContext};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::tuning::Tuning;

/// Chance a spawn tick brings two minions instead of one
const PAIR_CHANCE: f64 = 0.4;
/// Random scatter around the chosen edge point
const EDGE_SCATTER: f32 = 40.0;

/// Pick a minion kind from a uniform `roll` in [0, 1)
pub fn pick_minion(composition: EnemyComposition, level: u32, yetis_spawned: u32, roll: f64) -> EnemyKind {
    match composition {
        EnemyComposition::Chaos => {
            if roll > 0.9 && level > 10 {
                EnemyKind::Narwhal
            } else if roll > 0.85 {
                EnemyKind::Reindeer
            } else if roll > 0.7 && level > 7 {
                // Level 8 introduces the yeti: only one
                if level == 8 && yetis_spawned >= 1 {
                    EnemyKind::Snowman
                } else {
                    EnemyKind::Abominable
                }
            } else if roll > 0.5 {
                EnemyKind::BadKid
            } else {
                EnemyKind::Snowman
            }
        }
        EnemyComposition::Range if roll > 0.3 => EnemyKind::BadKid,
        EnemyComposition::Mixed if roll > 0.6 => EnemyKind::BadKid,
        _ => EnemyKind::Snowman,
    }
}

/// Minion speed on a given level
pub fn minion_speed(kind: EnemyKind, level: u32, multiplier: f32, t: &Tuning) -> f32 {
    let mut speed = kind.base_speed(t);
    if kind == EnemyKind::BadKid && level > t.bad_kid_fast_after_level {
        speed *= t.bad_kid_late_speed_factor;
    }
    speed * multiplier
}

/// A point just outside a random canvas edge
fn edge_point(rng: &mut impl Rng) -> Vec2 {
    let base = match rng.random_range(0..4) {
        0 => Vec2::new(rng.random_range(0.0..CANVAS_WIDTH), -ENEMY_RADIUS),
        1 => Vec2::new(CANVAS_WIDTH + ENEMY_RADIUS, rng.random_range(0.0..CANVAS_HEIGHT)),
        2 => Vec2::new(rng.random_range(0.0..CANVAS_WIDTH), CANVAS_HEIGHT + ENEMY_RADIUS),
        _ => Vec2::new(-ENEMY_RADIUS, rng.random_range(0.0..CANVAS_HEIGHT)),
    };
    let scatter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * EDGE_SCATTER;
    base + scatter
}

/// Minion wave on the level's spawn interval (never on boss levels)
pub fn spawn_minions(state: &mut SimulationState, ctx: &TickContext) {
    let level = ctx.level;
    if level.is_boss_level || ctx.now - state.last_spawn <= level.enemy_spawn_interval_ms {
        return;
    }

    let count = if state.rng.random_bool(PAIR_CHANCE) { 2 } else { 1 };
    for _ in 0..count {
        let pos = edge_point(&mut state.rng);
        let roll = state.rng.random::<f64>();
        let kind = pick_minion(level.enemy_composition, level.level_number, state.yetis_spawned, roll);
        if kind == EnemyKind::Abominable {
            state.yetis_spawned += 1;
        }
        let speed = minion_speed(kind, level.level_number, level.enemy_speed_multiplier, ctx.tuning);
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, kind, pos, speed, ctx.tuning, ctx.now));
        log::trace!("Spawned {} #{id} at ({:.0}, {:.0})", kind.as_str(), pos.x, pos.y);
    }

    state.cue(SoundCue::Spawn);
    state.last_spawn = ctx.now;
}

/// The level's boss enters from above the top edge, once
pub fn spawn_boss(state: &mut SimulationState, ctx: &TickContext) {
    let level = ctx.level;
    if !level.is_boss_level || state.boss_spawned || state.boss_id.is_some() || state.kills != 0 {
        return;
    }

    let kind = EnemyKind::boss_for_level(level.level_number);
    let pos = Vec2::new(CANVAS_WIDTH / 2.0, -kind.radius() * 2.0);
    let id = state.next_entity_id();
    let boss = Enemy::new(id, kind, pos, kind.base_speed(ctx.tuning), ctx.tuning, ctx.now);
    log::info!(
        "Boss {} arrives on level {} ({} hp)",
        kind.as_str(),
        level.level_number,
        boss.hp
    );
    state.enemies.push(boss);
    state.boss_id = Some(id);
    state.boss_spawned = true;
    state.cue(SoundCue::Spawn);
}

/// Boss levels end when the boss and every other enemy are gone; the rest
/// end on the kill quota. Signals once: the phase leaves `Playing`.
pub fn check_progress(state: &mut SimulationState, ctx: &TickContext) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let level = ctx.level;
    let complete = if level.is_boss_level {
        state.boss_spawned && state.boss_id.is_none() && state.enemies.is_empty()
    } else {
        state.kills >= ctx.tuning.kills_needed(level.level_number)
    };

    if complete {
        log::info!("Level {} complete, score {}", level.level_number, state.score);
        state.emit(GameEvent::LevelComplete { score: state.score });
        state.phase = GamePhase::LevelComplete;
    }
}
