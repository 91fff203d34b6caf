//! Projectile flight, terrain interaction and hits

use glam::Vec2;

use super::combat::{burst, damage_enemy};
use super::entity::{ObstacleMaterial, Projectile, ProjectileKind};
use super::geometry::{circles_overlap, clamp_to_canvas, direction_from, edge_crossing, radial_point, with_length};
use super::player::{freeze, take_damage};
use super::state::{SimulationState, TickContext};
use crate::audio::SoundCue;

/// Advance every projectile one tick. Anything launched during the pass
/// (shrapnel) starts moving next tick.
pub fn update_projectiles(state: &mut SimulationState, ctx: &TickContext) {
    let mut projectiles = std::mem::take(&mut state.projectiles);
    projectiles.retain_mut(|p| step(p, state, ctx));
    let spawned = std::mem::replace(&mut state.projectiles, projectiles);
    state.projectiles.extend(spawned);
}

/// Returns false once the projectile is spent
fn step(p: &mut Projectile, state: &mut SimulationState, ctx: &TickContext) -> bool {
    let t = ctx.tuning;
    let now = ctx.now;

    if p.kind.is_hazard() {
        if p.expired(now, t) {
            return false;
        }
        let player = &state.player;
        if circles_overlap(p.pos, p.radius, player.pos, player.radius) {
            take_damage(state, t.hazard_damage, now, t);
            state.cue(SoundCue::Squish);
            return false;
        }
        return true;
    }

    if p.kind.seeking() {
        let dir = direction_from(p.pos, state.player.pos).unwrap_or(Vec2::ZERO);
        let blended = p.vel * (1.0 - t.homing_blend) + dir * t.gumball_speed * t.homing_blend;
        p.vel = with_length(blended, t.gumball_speed);
    }

    p.pos += p.vel;

    let edge = edge_crossing(p.pos, p.radius);
    if p.kind.bounces() {
        if edge.horizontal {
            p.vel.x = -p.vel.x;
        }
        if edge.vertical {
            p.vel.y = -p.vel.y;
        }
        if edge.any() {
            p.pos = clamp_to_canvas(p.pos, p.radius);
            state.cue(SoundCue::Bounce);
        }
    } else if edge.any() {
        return false;
    }

    if p.expired(now, t) {
        return false;
    }

    if let Some(obs) = ctx
        .level
        .obstacles
        .iter()
        .find(|o| circles_overlap(p.pos, p.radius, o.pos, o.radius))
    {
        match p.kind {
            ProjectileKind::Laser { bounces_left }
                if bounces_left > 0 && obs.material() == ObstacleMaterial::Rock =>
            {
                p.kind = ProjectileKind::Laser {
                    bounces_left: bounces_left - 1,
                };
                p.vel = -p.vel;
                if let Some(rim) = radial_point(obs.pos, p.pos, obs.radius + p.radius + 1.0) {
                    p.pos = rim;
                }
                state.cue(SoundCue::Bounce);
            }
            kind if kind.bounces() => {
                p.vel = -p.vel;
                state.cue(SoundCue::Bounce);
            }
            kind => {
                if kind.explosive() {
                    burst(state, p.pos, now, t);
                    state.cue(SoundCue::Squish);
                }
                return false;
            }
        }
    }

    if p.from_player {
        let hit = state
            .enemies
            .iter()
            .rposition(|e| circles_overlap(p.pos, p.radius, e.pos, e.radius));
        if let Some(idx) = hit {
            damage_enemy(state, idx, p.damage as f32, t);
            return false;
        }
        return true;
    }

    let mut alive = true;
    let player = &state.player;
    if circles_overlap(p.pos, p.radius, player.pos, player.radius) {
        if !p.kind.bounces() {
            alive = false;
            if p.kind.explosive() {
                burst(state, p.pos, now, t);
            }
        }
        if p.kind.freezes() {
            freeze(state, now);
        }
        take_damage(state, p.damage, now, t);
    }

    // Stray shots wear down helpers; bells keep bouncing through them
    if alive {
        for helper in state.helpers.iter_mut() {
            if circles_overlap(p.pos, p.radius, helper.pos, helper.radius) {
                helper.hp -= 1.0;
                if !p.kind.bounces() {
                    alive = false;
                    break;
                }
            }
        }
    }

    alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::{Enemy, EnemyKind, Helper, HelperKind, Obstacle};
    use crate::sim::events::GameEvent;
    use crate::sim::level::LevelConfig;
    use crate::sim::powerup::PowerUpInventory;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    struct Fixture {
        t: Tuning,
        level: LevelConfig,
        inv: PowerUpInventory,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                t: Tuning::default(),
                level: LevelConfig::plain(2),
                inv: PowerUpInventory::new(),
            }
        }

        fn ctx(&self, now: f64) -> TickContext<'_> {
            TickContext {
                level: &self.level,
                tuning: &self.t,
                powerups: &self.inv,
                now,
            }
        }
    }

    fn shot(kind: ProjectileKind, pos: Vec2, vel: Vec2, from_player: bool) -> Projectile {
        Projectile {
            id: 500,
            pos,
            vel,
            radius: 5.0,
            color: "#ffffff",
            damage: 1,
            from_player,
            created_at: 0.0,
            kind,
        }
    }

    fn playing(t: &Tuning) -> SimulationState {
        let mut state = SimulationState::new(5, t);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_snowball_leaves_canvas() {
        let f = Fixture::new();
        let mut state = playing(&f.t);
        state.projectiles.push(shot(
            ProjectileKind::Snowball,
            Vec2::new(8.0, 100.0),
            Vec2::new(-7.0, 0.0),
            true,
        ));
        update_projectiles(&mut state, &f.ctx(16.0));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_bell_reflects_off_wall() {
        let f = Fixture::new();
        let mut state = playing(&f.t);
        let mut bell = shot(
            ProjectileKind::Bell,
            Vec2::new(CANVAS_WIDTH - 15.0, 100.0),
            Vec2::new(6.0, 0.0),
            false,
        );
        bell.radius = BELL_RADIUS;
        state.projectiles.push(bell);
        update_projectiles(&mut state, &f.ctx(16.0));
        let p = &state.projectiles[0];
        assert_eq!(p.vel, Vec2::new(-6.0, 0.0));
        assert_eq!(p.pos.x, CANVAS_WIDTH - BELL_RADIUS);
        assert!(state.drain_events().contains(&GameEvent::Sound(SoundCue::Bounce)));
    }

    #[test]
    fn test_bell_expires() {
        let f = Fixture::new();
        let mut state = playing(&f.t);
        state.projectiles.push(shot(
            ProjectileKind::Bell,
            Vec2::new(100.0, 100.0),
            Vec2::new(1.0, 0.0),
            false,
        ));
        update_projectiles(&mut state, &f.ctx(3001.0));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_laser_bounce_budget_on_rock() {
        let mut f = Fixture::new();
        let rock = Vec2::new(300.0, 100.0);
        f.level
            .obstacles
            .push(Obstacle::new("rock", rock, 30.0, OBS_ROCK_COLOR));
        let mut state = playing(&f.t);
        state.projectiles.push(shot(
            ProjectileKind::Laser { bounces_left: 1 },
            Vec2::new(260.0, 100.0),
            Vec2::new(10.0, 0.0),
            false,
        ));
        update_projectiles(&mut state, &f.ctx(16.0));
        let p = &state.projectiles[0];
        assert_eq!(p.kind, ProjectileKind::Laser { bounces_left: 0 });
        assert!(p.vel.x < 0.0);
        assert!((p.pos.distance(rock) - (30.0 + 5.0 + 1.0)).abs() < 1e-3);

        // Budget spent: the next rock contact destroys it
        let p = &mut state.projectiles[0];
        p.vel = Vec2::new(10.0, 0.0);
        update_projectiles(&mut state, &f.ctx(32.0));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_present_bursts_on_tree() {
        let mut f = Fixture::new();
        f.level
            .obstacles
            .push(Obstacle::new("tree", Vec2::new(300.0, 100.0), 30.0, OBS_TREE_COLOR));
        let mut state = playing(&f.t);
        state.projectiles.push(shot(
            ProjectileKind::Present,
            Vec2::new(262.0, 100.0),
            Vec2::new(5.0, 0.0),
            false,
        ));
        update_projectiles(&mut state, &f.ctx(16.0));
        assert_eq!(state.projectiles.len(), 8);
        assert!(state
            .projectiles
            .iter()
            .all(|p| p.kind == ProjectileKind::Shrapnel));
    }

    #[test]
    fn test_hazard_hurts_and_vanishes() {
        let f = Fixture::new();
        let mut state = playing(&f.t);
        let at = state.player.pos;
        state
            .projectiles
            .push(shot(ProjectileKind::Hazard, at, Vec2::ZERO, false));
        update_projectiles(&mut state, &f.ctx(2000.0));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.hp, 2);
    }

    #[test]
    fn test_lightning_freezes_player() {
        let f = Fixture::new();
        let mut state = playing(&f.t);
        let at = state.player.pos - Vec2::new(20.0, 0.0);
        state.projectiles.push(shot(
            ProjectileKind::Lightning,
            at,
            Vec2::new(10.0, 0.0),
            false,
        ));
        update_projectiles(&mut state, &f.ctx(100.0));
        assert!(state.projectiles.is_empty());
        assert!(state.player.frozen);
        assert_eq!(state.player.freeze_time, 100.0);
        assert_eq!(state.player.hp, 2);
    }

    #[test]
    fn test_gumball_keeps_speed_while_homing() {
        let f = Fixture::new();
        let mut state = playing(&f.t);
        state.projectiles.push(shot(
            ProjectileKind::Gumball,
            Vec2::new(100.0, 100.0),
            Vec2::new(4.0, 0.0),
            false,
        ));
        update_projectiles(&mut state, &f.ctx(16.0));
        let p = &state.projectiles[0];
        assert!((p.vel.length() - f.t.gumball_speed).abs() < 1e-4);
        assert!(p.vel.y > 0.0, "curves toward the player below");
    }

    #[test]
    fn test_player_snowball_kills_minion() {
        let f = Fixture::new();
        let mut state = playing(&f.t);
        state.enemies.push(Enemy::new(
            77,
            EnemyKind::Snowman,
            Vec2::new(200.0, 200.0),
            1.0,
            &f.t,
            0.0,
        ));
        state.projectiles.push(shot(
            ProjectileKind::Snowball,
            Vec2::new(180.0, 200.0),
            Vec2::new(7.0, 0.0),
            true,
        ));
        update_projectiles(&mut state, &f.ctx(16.0));
        assert!(state.projectiles.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.kills, 1);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_enemy_shot_wears_down_helper() {
        let f = Fixture::new();
        let mut state = playing(&f.t);
        let at = Vec2::new(150.0, 150.0);
        state
            .helpers
            .push(Helper::new(9, HelperKind::Range, at, f.t.helper_hp));
        state.projectiles.push(shot(
            ProjectileKind::Snowball,
            at - Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 0.0),
            false,
        ));
        update_projectiles(&mut state, &f.ctx(16.0));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.helpers[0].hp, f.t.helper_hp - 1.0);
    }
}
