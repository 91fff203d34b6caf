//! Allied helper drones
//!
//! Helpers follow the player, steer around obstacles and attack the nearest
//! enemy. Ranged helpers throw snowballs; melee helpers charge and shove.
//! A helper that runs out of hit points is destroyed and its power-up
//! stack revoked.

use glam::Vec2;

use super::combat::{Launch, damage_enemy, launch};
use super::entity::{HelperKind, ProjectileKind};
use super::events::GameEvent;
use super::geometry::{circles_overlap, direction_from, distance};
use super::state::{SimulationState, TickContext};
use crate::audio::SoundCue;
use crate::consts::SNOWBALL_RADIUS;
use crate::tuning::Tuning;

pub const HELPER_SHOT_COLOR: &str = "#93c5fd";

/// Obstacle clearance a helper tries to keep
const HELPER_AVOID_MARGIN: f32 = 30.0;
const HELPER_AVOID_WEIGHT: f32 = 5.0;
const MELEE_CHASE_FACTOR: f32 = 1.5;

pub fn update_helpers(state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;

    // Reverse so removals don't disturb the indices still to visit
    for i in (0..state.helpers.len()).rev() {
        let (kind, hpos, hradius) = {
            let h = &state.helpers[i];
            (h.kind, h.pos, h.radius)
        };

        let nearest = state
            .enemies
            .iter()
            .enumerate()
            .map(|(idx, e)| (idx, distance(hpos, e.pos)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let mut steer = Vec2::ZERO;
        let mut speed = t.helper_speed;
        match nearest {
            Some((idx, d)) if kind == HelperKind::Melee && d < t.helper_detect_range => {
                steer = direction_from(hpos, state.enemies[idx].pos).unwrap_or(Vec2::ZERO);
                speed *= MELEE_CHASE_FACTOR;
            }
            _ => {
                let player = state.player.pos;
                if distance(hpos, player) > kind.follow_distance() {
                    steer = direction_from(hpos, player).unwrap_or(Vec2::ZERO);
                }
            }
        }

        for obs in &ctx.level.obstacles {
            let d = distance(hpos, obs.pos);
            let avoid = obs.radius + hradius + HELPER_AVOID_MARGIN;
            if d < avoid {
                if let Some(away) = direction_from(obs.pos, hpos) {
                    steer += away * ((avoid - d) / avoid) * HELPER_AVOID_WEIGHT;
                }
            }
        }

        let hpos = hpos + steer.normalize_or_zero() * speed;
        state.helpers[i].pos = hpos;

        if let Some((idx, d)) = nearest {
            let cooldown = match kind {
                HelperKind::Range => t.helper_range_cooldown_ms,
                HelperKind::Melee => t.helper_melee_cooldown_ms,
            };
            if ctx.now - state.helpers[i].last_action > cooldown {
                helper_attack(state, i, idx, d, ctx.now, t);
            }
        }

        let touching = state
            .enemies
            .iter()
            .filter(|e| circles_overlap(hpos, hradius, e.pos, e.radius))
            .count();
        let helper = &mut state.helpers[i];
        helper.hp -= touching as f32 * t.helper_contact_damage;

        if helper.hp <= 0.0 {
            let lost = state.helpers.remove(i);
            log::debug!("{:?} helper {} destroyed", lost.kind, lost.id);
            state.cue(SoundCue::Squish);
            state.emit(GameEvent::PowerUpRevoked {
                kind: lost.kind.powerup(),
                count: 1,
            });
        }
    }
}

/// `dist` is the pre-move distance used for target selection
fn helper_attack(state: &mut SimulationState, helper: usize, target: usize, dist: f32, now: f64, t: &Tuning) {
    let hpos = state.helpers[helper].pos;
    let tpos = state.enemies[target].pos;
    let dir = direction_from(hpos, tpos).unwrap_or(Vec2::X);

    match state.helpers[helper].kind {
        HelperKind::Range if dist < t.helper_fire_range => {
            let shot = Launch {
                kind: ProjectileKind::Snowball,
                pos: hpos,
                vel: dir * t.snowball_speed,
                radius: SNOWBALL_RADIUS - 1.0,
                color: HELPER_SHOT_COLOR,
                from_player: true,
            };
            launch(state, shot, now);
            state.cue(SoundCue::Throw);
            state.helpers[helper].last_action = now;
        }
        HelperKind::Melee if dist < t.helper_melee_range => {
            state.enemies[target].pos += dir * t.helper_knockback;
            damage_enemy(state, target, 1.0, t);
            state.helpers[helper].last_action = now;
        }
        _ => {}
    }
}
