//! Launching projectiles, player auto-fire and kill accounting

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::entity::{EntityId, Projectile, ProjectileKind};
use super::events::GameEvent;
use super::state::{SimulationState, TickContext};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::tuning::Tuning;

pub const PLAYER_SNOWBALL_COLOR: &str = "#e2e8f0";
pub const SHRAPNEL_COLOR: &str = "#fca5a5";

/// Everything needed to put a projectile in flight
#[derive(Debug, Clone, Copy)]
pub struct Launch {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub from_player: bool,
}

impl Launch {
    /// Hostile shot from `pos` along `angle` at `speed`
    pub fn hostile(kind: ProjectileKind, pos: Vec2, angle: f32, speed: f32, radius: f32, color: &'static str) -> Self {
        Self {
            kind,
            pos,
            vel: crate::unit_from_angle(angle) * speed,
            radius,
            color,
            from_player: false,
        }
    }
}

/// Queue a projectile; every projectile deals one point of damage
pub fn launch(state: &mut SimulationState, shot: Launch, now: f64) -> EntityId {
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: shot.pos,
        vel: shot.vel,
        radius: shot.radius,
        color: shot.color,
        damage: 1,
        from_player: shot.from_player,
        created_at: now,
        kind: shot.kind,
    });
    id
}

/// Fire at the boss if one is up, otherwise at the nearest enemy
pub fn auto_fire(state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    if state.player.frozen || ctx.now - state.last_shot <= ctx.powerups.fire_cooldown(t) {
        return;
    }

    let origin = state.player.pos;
    let target = state.boss().map(|b| b.pos).or_else(|| {
        state
            .enemies
            .iter()
            .min_by(|a, b| a.pos.distance_squared(origin).total_cmp(&b.pos.distance_squared(origin)))
            .map(|e| e.pos)
    });
    let Some(target) = target else {
        return;
    };

    let base = crate::angle_to(origin, target);
    let shots = ctx.powerups.shot_count();
    for i in 0..shots {
        let spread = if shots > 1 {
            (i as f32 - 1.0) * t.triple_shot_spread
        } else {
            0.0
        };
        let jitter = (state.rng.random::<f32>() - 0.5) * t.aim_jitter;
        let shot = Launch {
            kind: ProjectileKind::Snowball,
            pos: origin,
            vel: crate::unit_from_angle(base + spread + jitter) * t.snowball_speed,
            radius: SNOWBALL_RADIUS,
            color: PLAYER_SNOWBALL_COLOR,
            from_player: true,
        };
        launch(state, shot, ctx.now);
    }

    state.last_shot = ctx.now;
    state.cue(SoundCue::Throw);
}

/// Remove a dead enemy and credit the player
pub fn kill_enemy(state: &mut SimulationState, index: usize, t: &Tuning) {
    let enemy = state.enemies.remove(index);
    if enemy.is_boss() {
        state.score += t.score_boss_kill;
        state.boss_id = None;
        log::info!("{} defeated", enemy.kind().as_str());
    } else {
        state.score += t.score_per_kill;
        state.kills += 1;
        state.emit(GameEvent::KillProgress { kills: state.kills });
    }
    state.emit(GameEvent::ScoreChanged { score: state.score });
}

/// Deal `amount` to the enemy at `index`, killing it at zero.
/// Returns true when the enemy died.
pub fn damage_enemy(state: &mut SimulationState, index: usize, amount: f32, t: &Tuning) -> bool {
    let Some(enemy) = state.enemies.get_mut(index) else {
        return false;
    };
    enemy.hp -= amount;
    let dead = enemy.hp <= 0.0;
    if dead {
        kill_enemy(state, index, t);
    }
    state.cue(SoundCue::HitEnemy);
    dead
}

/// Ring of hostile shrapnel from a burst present
pub fn burst(state: &mut SimulationState, pos: Vec2, now: f64, t: &Tuning) {
    let n = t.shrapnel_count.max(1);
    for k in 0..n {
        let angle = TAU / n as f32 * k as f32;
        let shot = Launch::hostile(
            ProjectileKind::Shrapnel,
            pos,
            angle,
            t.shrapnel_speed,
            SHRAPNEL_RADIUS,
            SHRAPNEL_COLOR,
        );
        launch(state, shot, now);
    }
}
