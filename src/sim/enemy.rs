//! Enemy AI
//!
//! One pass per tick over every enemy, dispatching on its behaviour. Minions
//! seek the player with obstacle avoidance and separation; specials and
//! bosses layer their own movement and attack timers on top. Any enemy that
//! ends its move touching the player deals contact damage, and minions are
//! consumed by the contact.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

use super::combat::{Launch, launch};
use super::entity::{Enemy, EnemyBehavior, EnemyKind, ProjectileKind};
use super::geometry::{circles_overlap, clamp_to_canvas, clamp_length, direction_from, distance};
use super::level::LevelConfig;
use super::player::take_damage;
use super::state::{SimulationState, TickContext};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::{angle_to, unit_from_angle};

pub const BAD_KID_SHOT_COLOR: &str = "#fecaca";
pub const LASER_COLOR: &str = "#ef4444";
pub const LIGHTNING_COLOR: &str = "#60a5fa";
pub const HAZARD_COLOR: &str = "#78350f";
pub const BELL_COLOR: &str = "#eab308";
pub const CANDY_CANE_COLOR: &str = "#ef4444";
pub const GUMBALL_COLOR: &str = "#f472b6";
pub const PRESENT_COLOR: &str = "#16a34a";

/// Throwers fire a little beyond the distance where they start strafing
const BAD_KID_FIRE_SLACK: f32 = 50.0;
const BAD_KID_SHOT_SPEED_FACTOR: f32 = 0.8;
const CANDY_CANE_COUNT: i32 = 5;

pub fn update_enemies(state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    let mut enemies = std::mem::take(&mut state.enemies);

    for i in (0..enemies.len()).rev() {
        let kind = enemies[i].kind();
        let separation = match kind {
            EnemyKind::Snowman => separation(&enemies, i, t.snowman_separation),
            EnemyKind::BadKid => separation(&enemies, i, t.bad_kid_separation),
            _ => Vec2::ZERO,
        };

        let e = &mut enemies[i];
        let before = e.pos;
        match kind {
            EnemyKind::Snowman | EnemyKind::BadKid => update_minion(e, separation, state, ctx),
            EnemyKind::Reindeer => update_reindeer(e, state, ctx),
            EnemyKind::Narwhal => update_narwhal(e, state, ctx),
            EnemyKind::Abominable => update_yeti(e, state, ctx),
            EnemyKind::BossBells => update_bells(e, state, ctx),
            EnemyKind::BossElf => update_elf(e, state, ctx),
            EnemyKind::BossGum => update_gum(e, state, ctx),
            EnemyKind::BossSanta => update_santa(e, state, ctx),
        }
        e.vel = e.pos - before;

        let player = &state.player;
        if circles_overlap(e.pos, e.radius, player.pos, player.radius) {
            if !e.is_boss() {
                enemies.remove(i);
            }
            take_damage(state, 1, ctx.now, t);
        }
    }

    enemies.append(&mut state.enemies);
    state.enemies = enemies;
}

/// Push away from every obstacle within `margin` of contact, stronger the closer
pub fn avoidance(pos: Vec2, radius: f32, level: &LevelConfig, margin: f32, weight: f32) -> Vec2 {
    let mut push = Vec2::ZERO;
    for obs in &level.obstacles {
        let d = distance(pos, obs.pos);
        let reach = obs.radius + radius + margin;
        if d < reach {
            if let Some(away) = direction_from(obs.pos, pos) {
                push += away * ((reach - d) / reach) * weight;
            }
        }
    }
    push
}

/// Keep minions from stacking on each other (bosses are ignored)
fn separation(enemies: &[Enemy], i: usize, weight: f32) -> Vec2 {
    let me = &enemies[i];
    enemies
        .iter()
        .enumerate()
        .filter(|(j, other)| *j != i && !other.is_boss())
        .filter(|(_, other)| distance(me.pos, other.pos) < me.radius * 2.0)
        .map(|(_, other)| (me.pos - other.pos) * weight)
        .sum()
}

fn update_minion(e: &mut Enemy, separation: Vec2, state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    let player = state.player.pos;
    let to_player = distance(e.pos, player);
    let angle = angle_to(e.pos, player);
    let mut steer = unit_from_angle(angle) * e.speed;

    if let EnemyBehavior::BadKid { jitter } = &mut e.behavior {
        if *jitter == Vec2::ZERO || state.rng.random_bool(t.bad_kid_jitter_resample_chance) {
            *jitter = Vec2::new(
                state.rng.random_range(-1.0..1.0),
                state.rng.random_range(-1.0..1.0),
            );
        }
        if to_player < e.attack_range {
            // Strafe around the player instead of closing in
            steer = unit_from_angle(angle + FRAC_PI_2) * e.speed * 0.5;
        }
        steer += *jitter;
    }

    steer += avoidance(e.pos, e.radius, ctx.level, t.avoid_margin, t.avoid_weight);
    steer += separation;

    let mut next = e.pos + clamp_length(steer, e.speed);
    for obs in &ctx.level.obstacles {
        if circles_overlap(next, e.radius, obs.pos, obs.radius) {
            if let Some(away) = direction_from(obs.pos, next) {
                let overlap = e.radius + obs.radius - distance(next, obs.pos);
                next += away * overlap;
            }
        }
    }
    e.pos = next;

    let cooldown = t.bad_kid_cooldown(ctx.level.level_number);
    if e.kind() == EnemyKind::BadKid
        && to_player < e.attack_range + BAD_KID_FIRE_SLACK
        && ctx.now - e.last_shot > cooldown
    {
        let shot = Launch::hostile(
            ProjectileKind::Snowball,
            e.pos,
            angle_to(e.pos, player),
            t.snowball_speed * BAD_KID_SHOT_SPEED_FACTOR,
            SNOWBALL_RADIUS,
            BAD_KID_SHOT_COLOR,
        );
        launch(state, shot, ctx.now);
        state.cue(SoundCue::Throw);
        e.last_shot = ctx.now;
    }
}

fn update_reindeer(e: &mut Enemy, state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    let EnemyBehavior::Reindeer { last_teleport } = &mut e.behavior else {
        return;
    };

    if ctx.now - *last_teleport > t.reindeer_teleport_cooldown_ms {
        for _ in 0..t.reindeer_teleport_attempts {
            let spot = Vec2::new(
                state.rng.random_range(50.0..CANVAS_WIDTH - 50.0),
                state.rng.random_range(50.0..CANVAS_HEIGHT - 50.0),
            );
            let clear_of_player = distance(spot, state.player.pos) >= t.reindeer_min_player_distance;
            let clear_of_terrain = !ctx
                .level
                .obstacles
                .iter()
                .any(|o| circles_overlap(spot, e.radius, o.pos, o.radius));
            if clear_of_player && clear_of_terrain {
                e.pos = spot;
                *last_teleport = ctx.now;
                state.cue(SoundCue::Teleport);
                break;
            }
        }
    }

    if ctx.now - *last_teleport > t.reindeer_aim_delay_ms
        && ctx.now - e.last_shot > t.reindeer_laser_cooldown_ms
    {
        let shot = Launch::hostile(
            ProjectileKind::Laser {
                bounces_left: t.laser_bounces,
            },
            e.pos,
            angle_to(e.pos, state.player.pos),
            t.laser_speed,
            LASER_RADIUS,
            LASER_COLOR,
        );
        launch(state, shot, ctx.now);
        state.cue(SoundCue::Laser);
        e.last_shot = ctx.now;
    }
}

fn update_narwhal(e: &mut Enemy, state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    let angle = angle_to(e.pos, state.player.pos);
    let steer = unit_from_angle(angle) * e.speed
        + avoidance(e.pos, e.radius, ctx.level, t.avoid_margin, t.avoid_weight);
    e.pos += steer.normalize_or_zero() * e.speed;

    if ctx.now - e.last_shot > t.narwhal_cooldown_ms {
        let shot = Launch::hostile(
            ProjectileKind::Lightning,
            e.pos,
            angle,
            t.lightning_speed,
            LIGHTNING_RADIUS,
            LIGHTNING_COLOR,
        );
        launch(state, shot, ctx.now);
        state.cue(SoundCue::Laser);
        e.last_shot = ctx.now;
    }
}

/// Dodges incoming snowballs sideways and leaves hazards behind
fn update_yeti(e: &mut Enemy, state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    let EnemyBehavior::Abominable {
        last_drop,
        last_dodge,
    } = &mut e.behavior
    else {
        return;
    };

    let mut dodge = None;
    if last_dodge.is_none_or(|at| ctx.now - at > t.yeti_dodge_cooldown_ms) {
        let threat = state.projectiles.iter().find(|p| {
            p.from_player
                && distance(p.pos, e.pos) < t.yeti_dodge_radius
                && p.vel.dot(e.pos - p.pos) > 0.0
        });
        if let Some(p) = threat {
            dodge = Some(p.vel.perp());
            *last_dodge = Some(ctx.now);
        }
    }

    let mut steer = dodge.unwrap_or_else(|| unit_from_angle(angle_to(e.pos, state.player.pos)) * e.speed);

    if ctx.now - *last_drop > t.yeti_drop_cooldown_ms {
        let blocked = ctx
            .level
            .obstacles
            .iter()
            .any(|o| circles_overlap(e.pos, HAZARD_RADIUS, o.pos, o.radius));
        if !blocked {
            let drop = Launch {
                kind: ProjectileKind::Hazard,
                pos: e.pos,
                vel: Vec2::ZERO,
                radius: HAZARD_RADIUS,
                color: HAZARD_COLOR,
                from_player: false,
            };
            launch(state, drop, ctx.now);
            state.cue(SoundCue::Squish);
            *last_drop = ctx.now;
        }
    }

    steer += avoidance(e.pos, e.radius, ctx.level, t.avoid_margin, t.avoid_weight);
    let factor = if dodge.is_some() {
        t.yeti_dodge_speed_factor
    } else {
        1.0
    };
    e.pos += steer.normalize_or_zero() * e.speed * factor;
}

fn update_bells(e: &mut Enemy, state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    let player = state.player.pos;
    e.pos += unit_from_angle(angle_to(e.pos, player)) * e.speed;

    if let EnemyBehavior::BossBells { last_voice_line } = &mut e.behavior {
        if ctx.now - *last_voice_line > t.boss_voice_cooldown_ms
            && state.rng.random_bool(t.boss_voice_chance)
        {
            state.cue(SoundCue::HoHoHo);
            *last_voice_line = ctx.now;
        }
    }

    if ctx.now - e.last_shot > t.boss_attack_cooldown_ms {
        let base = angle_to(e.pos, player);
        for k in -1..=1 {
            let shot = Launch::hostile(
                ProjectileKind::Bell,
                e.pos,
                base + k as f32 * t.boss_spread,
                t.bell_speed,
                BELL_RADIUS,
                BELL_COLOR,
            );
            launch(state, shot, ctx.now);
        }
        state.cue(SoundCue::Throw);
        e.last_shot = ctx.now;
    }
}

/// Blinks away from nearby snowballs and fans candy canes
fn update_elf(e: &mut Enemy, state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    let angle = angle_to(e.pos, state.player.pos);
    e.pos += unit_from_angle(angle) * e.speed
        + avoidance(e.pos, e.radius, ctx.level, t.avoid_margin, t.boss_avoid_weight);

    if let EnemyBehavior::BossElf { last_dodge } = &mut e.behavior {
        let ready = last_dodge.is_none_or(|at| ctx.now - at > t.elf_dodge_cooldown_ms);
        let threatened = state
            .projectiles
            .iter()
            .any(|p| p.from_player && distance(p.pos, e.pos) < t.elf_dodge_radius);
        if ready && threatened {
            let jump = Vec2::new(
                state.rng.random::<f32>() - 0.5,
                state.rng.random::<f32>() - 0.5,
            ) * t.elf_dodge_jump;
            e.pos = clamp_to_canvas(e.pos + jump, e.radius);
            *last_dodge = Some(ctx.now);
            state.cue(SoundCue::Throw);
        }
    }

    if ctx.now - e.last_shot > t.elf_attack_cooldown_ms {
        let half = CANDY_CANE_COUNT / 2;
        for k in 0..CANDY_CANE_COUNT {
            let spread = (k - half) as f32 * t.boss_spread;
            let shot = Launch::hostile(
                ProjectileKind::CandyCane,
                e.pos,
                angle + spread,
                t.candy_cane_speed,
                CANDY_CANE_RADIUS,
                CANDY_CANE_COLOR,
            );
            launch(state, shot, ctx.now);
        }
        state.cue(SoundCue::Throw);
        e.last_shot = ctx.now;
    }
}

fn update_gum(e: &mut Enemy, state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    let angle = angle_to(e.pos, state.player.pos);
    e.pos += unit_from_angle(angle) * e.speed
        + avoidance(e.pos, e.radius, ctx.level, t.avoid_margin, t.boss_avoid_weight);

    if ctx.now - e.last_shot > t.gum_attack_cooldown_ms {
        let shot = Launch::hostile(
            ProjectileKind::Gumball,
            e.pos,
            angle,
            t.gumball_speed,
            GUMBALL_RADIUS,
            GUMBALL_COLOR,
        );
        launch(state, shot, ctx.now);
        state.cue(SoundCue::Throw);
        e.last_shot = ctx.now;
    }
}

/// Drops in from above the canvas, then sways side to side lobbing presents
fn update_santa(e: &mut Enemy, state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    if e.pos.y < t.santa_hover_y {
        e.pos.y = (e.pos.y + e.speed).min(t.santa_hover_y);
    } else {
        e.pos.x += (ctx.now * 0.001).sin() as f32 * e.speed * 2.0;
        e.pos.x = e.pos.x.clamp(e.radius, CANVAS_WIDTH - e.radius);
    }

    if ctx.now - e.last_shot > t.santa_attack_cooldown_ms {
        let shot = Launch::hostile(
            ProjectileKind::Present,
            e.pos,
            angle_to(e.pos, state.player.pos),
            t.present_speed,
            PRESENT_RADIUS,
            PRESENT_COLOR,
        );
        launch(state, shot, ctx.now);
        state.cue(SoundCue::Throw);
        e.last_shot = ctx.now;
    }
}
