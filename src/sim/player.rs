//! Player physics, terrain interaction and the damage state machine

use glam::Vec2;
use rand::Rng;

use super::entity::HitOutcome;
use super::events::GameEvent;
use super::geometry::{circles_overlap, clamp_to_canvas, direction_from};
use super::input::InputState;
use super::powerup::PowerUpKind;
use super::state::{GamePhase, SimulationState, TickContext};
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Timed status effects: passive regen and freeze expiry
pub fn update_status(state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;

    if ctx.powerups.contains(PowerUpKind::Regen)
        && ctx.now - state.player.last_regen_time > t.regen_interval_ms
    {
        let p = &mut state.player;
        p.last_regen_time = ctx.now;
        if p.hp > 0 && p.hp < p.max_hp {
            p.hp += 1;
            state.emit_health();
        }
    }

    if state.player.frozen && ctx.now - state.player.freeze_time > t.freeze_duration_ms {
        state.player.frozen = false;
        state.cue(SoundCue::ShieldBreak);
    }
}

/// Integrate player movement for one tick.
///
/// Keys win over drag; a key press also ends the drag. Ice lowers friction
/// and weakens both kinds of steering.
pub fn move_player(state: &mut SimulationState, ctx: &TickContext, input: &InputState) {
    let t = ctx.tuning;
    let on_ice = ctx.level.on_ice(state.player.pos);
    let friction = if on_ice { t.ice_friction } else { t.snow_friction };

    let p = &mut state.player;
    if !p.frozen {
        if let Some(dir) = input.key_direction() {
            let impulse = if on_ice { t.key_impulse_ice } else { t.key_impulse_snow };
            p.vel += dir * impulse;
            p.dragging = false;
        } else if p.dragging {
            let diff = input.drag_target() - p.pos;
            if on_ice {
                // Constant pull so ice stays slippery however far the drag
                let d = diff.length();
                if d > t.drag_dead_zone {
                    p.vel += diff / d * t.drag_pull_ice;
                }
            } else {
                p.vel += diff * t.drag_spring_snow;
            }
        }
    }

    p.pos += p.vel;
    p.vel *= friction;

    let sliding = on_ice && (p.vel.x.abs() > t.slide_cue_speed || p.vel.y.abs() > t.slide_cue_speed);
    if sliding && state.rng.random_bool(t.slide_cue_chance) {
        state.cue(SoundCue::Slide);
    }

    let p = &mut state.player;
    p.pos = clamp_to_canvas(p.pos, p.radius);

    for obs in &ctx.level.obstacles {
        if circles_overlap(p.pos, p.radius, obs.pos, obs.radius) {
            let dir = direction_from(obs.pos, p.pos).unwrap_or(Vec2::NEG_Y);
            p.pos = obs.pos + dir * (obs.radius + p.radius + 1.0);
            p.vel *= 0.5;
        }
    }
}

/// Damage the player, honouring the invulnerability window and the shield.
///
/// At zero hit points both life-lost and game-over are signalled; the session
/// decides from its life count whether play continues.
pub fn take_damage(state: &mut SimulationState, amount: u32, now: f64, t: &Tuning) {
    let outcome = state.player.absorb_hit(amount, now, t.hit_debounce_ms);
    match outcome {
        HitOutcome::Ignored => return,
        HitOutcome::Shield { broken } => {
            state.cue(SoundCue::ShieldHit);
            if broken {
                state.cue(SoundCue::ShieldBreak);
                state.emit(GameEvent::PowerUpRevoked {
                    kind: PowerUpKind::Shield,
                    count: 1,
                });
            }
        }
        HitOutcome::Health { .. } => state.cue(SoundCue::HitPlayer),
    }

    state.emit_health();

    if let HitOutcome::Health { dead: true } = outcome {
        log::info!("Player down (score {})", state.score);
        state.emit(GameEvent::LifeLost);
        state.emit(GameEvent::GameOver { score: state.score });
        state.phase = GamePhase::GameOver;
    }
}

/// Lightning: freeze in place until the freeze runs out
pub fn freeze(state: &mut SimulationState, now: f64) {
    state.player.frozen = true;
    state.player.freeze_time = now;
    state.cue(SoundCue::Freeze);
}
