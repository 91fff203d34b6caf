//! Simulation controller
//!
//! The [`Engine`] owns the simulation state and the inputs it reads (level
//! config, tuning, power-up inventory, player input) and advances everything
//! with one `tick(now)` call per frame. The phase order inside a tick is
//! load-bearing: a projectile that kills the last enemy must be seen by the
//! progression check that runs after it.

use glam::Vec2;

use super::combat::auto_fire;
use super::enemy::update_enemies;
use super::entity::PowerUpItem;
use super::events::GameEvent;
use super::helper::update_helpers;
use super::input::{InputState, Key};
use super::level::LevelConfig;
use super::player::{move_player, update_status};
use super::powerup::{PowerUpInventory, apply_inventory, collect_pickups, spawn_pickups};
use super::projectile::update_projectiles;
use super::spawn::{check_progress, spawn_boss, spawn_minions};
use super::state::{GamePhase, SimulationState, TickContext};
use crate::error::LevelLoadError;
use crate::tuning::Tuning;

pub struct Engine {
    state: SimulationState,
    tuning: Tuning,
    level: Option<LevelConfig>,
    input: InputState,
    powerups: PowerUpInventory,
}

impl Engine {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            state: SimulationState::new(seed, &tuning),
            tuning,
            level: None,
            input: InputState::default(),
            powerups: PowerUpInventory::new(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for embedders and scenario setup
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn level(&self) -> Option<&LevelConfig> {
        self.level.as_ref()
    }

    pub fn powerups(&self) -> &PowerUpInventory {
        &self.powerups
    }

    /// Reset for a new session. The RNG stream carries on.
    pub fn new_game(&mut self) {
        let mut fresh = SimulationState::new(0, &self.tuning);
        std::mem::swap(&mut fresh.rng, &mut self.state.rng);
        self.state = fresh;
        self.level = None;
        self.powerups = PowerUpInventory::new();
        self.input.clear();
    }

    /// A level config has been requested; nothing ticks until it arrives
    pub fn request_level(&mut self) {
        self.level = None;
        self.state.phase = GamePhase::AwaitingLevel;
    }

    /// Deliver the outcome of a level request. Invalid or failed configs
    /// leave the engine waiting and are handed back for the caller to retry.
    pub fn finish_level_load(
        &mut self,
        result: Result<LevelConfig, LevelLoadError>,
        now: f64,
    ) -> Result<(), LevelLoadError> {
        let config = result.and_then(|config| config.validate().map(|()| config));
        match config {
            Ok(config) => {
                self.load_level(config, now);
                Ok(())
            }
            Err(err) => {
                log::warn!("Level load failed: {err}");
                self.request_level();
                Err(err)
            }
        }
    }

    /// Install a level: clear the field, place authored pickups, partially
    /// reset the player and start playing.
    pub fn load_level(&mut self, config: LevelConfig, now: f64) {
        log::info!(
            "Level {} \"{}\": {} obstacles, {} ice patches, spawn every {:.0}ms{}",
            config.level_number,
            config.theme_name,
            config.obstacles.len(),
            config.ice_patches.len(),
            config.enemy_spawn_interval_ms,
            if config.is_boss_level { " (boss)" } else { "" }
        );

        let state = &mut self.state;
        state.clear_level();
        for placement in &config.initial_powerups {
            let id = state.next_entity_id();
            state.items.push(PowerUpItem {
                id,
                pos: placement.pos,
                kind: placement.kind,
                created_at: now,
                persistent: true,
            });
        }

        state.player.reset_for_level(self.powerups.max_hp(&self.tuning), now);
        apply_inventory(state, &self.powerups, &self.tuning);
        self.input.clear();

        state.last_shot = now;
        state.last_spawn = now;
        state.now = now;
        state.phase = GamePhase::Playing;
        state.emit_health();
        state.emit(GameEvent::KillProgress { kills: 0 });
        self.level = Some(config);
    }

    /// Retry the current level after a lost life, at full health
    pub fn continue_level(&mut self, config: LevelConfig, now: f64) {
        self.load_level(config, now);
        let player = &mut self.state.player;
        player.hp = player.max_hp;
        self.state.emit_health();
    }

    /// Replace the power-up inventory; effects apply immediately
    pub fn set_powerups(&mut self, powerups: PowerUpInventory) {
        if powerups == self.powerups {
            return;
        }
        self.powerups = powerups;
        apply_inventory(&mut self.state, &self.powerups, &self.tuning);
    }

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Playing;
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Start a drag; the grab offset from the player is kept while dragging
    pub fn pointer_down(&mut self, point: Vec2) {
        self.input.press(point, self.state.player.pos);
        self.state.player.dragging = true;
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        self.input.move_to(point);
    }

    pub fn pointer_up(&mut self) {
        self.input.release();
        self.state.player.dragging = false;
    }

    /// Events queued outside a tick (level load, inventory changes)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Advance one frame at time `now` (milliseconds) and return what happened
    pub fn tick(&mut self, now: f64) -> Vec<GameEvent> {
        let Some(level) = self.level.as_ref() else {
            return self.state.drain_events();
        };
        if self.state.phase != GamePhase::Playing {
            return self.state.drain_events();
        }

        let ctx = TickContext {
            level,
            tuning: &self.tuning,
            powerups: &self.powerups,
            now,
        };
        let state = &mut self.state;
        state.now = now;

        update_status(state, &ctx);
        spawn_boss(state, &ctx);
        move_player(state, &ctx, &self.input);
        spawn_pickups(state, &ctx);
        collect_pickups(state, &ctx);
        auto_fire(state, &ctx);
        update_helpers(state, &ctx);
        spawn_minions(state, &ctx);
        update_projectiles(state, &ctx);
        update_enemies(state, &ctx);
        check_progress(state, &ctx);

        state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Enemy, EnemyKind, Projectile, ProjectileKind};
    use crate::sim::powerup::PowerUpKind;

    fn engine() -> Engine {
        Engine::new(Tuning::default(), 1234)
    }

    #[test]
    fn test_no_ticks_without_level() {
        let mut e = engine();
        let events = e.tick(1000.0);
        assert!(events.is_empty());
        assert_eq!(e.phase(), GamePhase::AwaitingLevel);
    }

    #[test]
    fn test_failed_load_keeps_waiting() {
        let mut e = engine();
        let err = LevelLoadError::Unavailable {
            level: 1,
            reason: "offline".into(),
        };
        assert!(e.finish_level_load(Err(err.clone()), 0.0).is_err());
        assert_eq!(e.phase(), GamePhase::AwaitingLevel);
        assert!(e.tick(100.0).is_empty());

        let mut bad = LevelConfig::plain(1);
        bad.enemy_speed_multiplier = 0.0;
        assert!(matches!(
            e.finish_level_load(Ok(bad), 0.0),
            Err(LevelLoadError::Invalid { .. })
        ));
        assert_eq!(e.phase(), GamePhase::AwaitingLevel);

        assert!(e.finish_level_load(Ok(LevelConfig::plain(1)), 0.0).is_ok());
        assert_eq!(e.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_load_emits_health_and_progress() {
        let mut e = engine();
        e.load_level(LevelConfig::plain(1), 0.0);
        let events = e.drain_events();
        assert!(events.contains(&GameEvent::HealthChanged {
            hp: 3,
            max_hp: 3,
            shield_hp: 0
        }));
        assert!(events.contains(&GameEvent::KillProgress { kills: 0 }));
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut e = engine();
        e.load_level(LevelConfig::plain(1), 0.0);
        e.key_down(Key::Right);
        e.pause();
        let before = e.state().player.pos;
        e.tick(16.0);
        assert_eq!(e.state().player.pos, before);
        e.resume();
        e.tick(32.0);
        assert!(e.state().player.pos.x > before.x);
    }

    #[test]
    fn test_drag_moves_player() {
        let mut e = engine();
        e.load_level(LevelConfig::plain(1), 0.0);
        let start = e.state().player.pos;
        e.pointer_down(start);
        e.pointer_move(start + Vec2::new(0.0, 100.0));
        e.tick(16.0);
        assert!(e.state().player.pos.y > start.y);
        e.pointer_up();
        assert!(!e.state().player.dragging);
    }

    #[test]
    fn test_last_kill_seen_by_progress_check_same_tick() {
        let mut e = engine();
        e.load_level(LevelConfig::plain(1), 0.0);
        e.state.kills = 9;
        let target = Vec2::new(100.0, 100.0);
        let t = Tuning::default();
        e.state
            .enemies
            .push(Enemy::new(500, EnemyKind::Snowman, target, 0.0, &t, 0.0));
        e.state.projectiles.push(Projectile {
            id: 501,
            pos: target - Vec2::new(10.0, 0.0),
            vel: Vec2::new(7.0, 0.0),
            radius: 5.0,
            color: "#e2e8f0",
            damage: 1,
            from_player: true,
            created_at: 0.0,
            kind: ProjectileKind::Snowball,
        });
        let events = e.tick(16.0);
        assert!(events.contains(&GameEvent::LevelComplete { score: 100 }));
        assert_eq!(e.phase(), GamePhase::LevelComplete);
        assert!(e.tick(32.0).is_empty());
    }

    #[test]
    fn test_set_powerups_applies_effects() {
        let mut e = engine();
        e.load_level(LevelConfig::plain(1), 0.0);
        e.set_powerups(PowerUpInventory::from_kinds([
            PowerUpKind::Vitality,
            PowerUpKind::Shield,
            PowerUpKind::HelperRange,
        ]));
        let p = &e.state().player;
        assert_eq!(p.max_hp, 4);
        assert_eq!(p.shield_hp, 3);
        assert_eq!(e.state().helpers.len(), 1);

        e.set_powerups(PowerUpInventory::new());
        assert_eq!(e.state().player.max_hp, 3);
        assert_eq!(e.state().player.shield_hp, 0);
        assert!(e.state().helpers.is_empty());
    }

    #[test]
    fn test_held_shield_not_refilled_on_level_load() {
        let mut e = engine();
        e.load_level(LevelConfig::plain(1), 0.0);
        e.set_powerups(PowerUpInventory::from_kinds([PowerUpKind::Shield]));
        let t = e.tuning().clone();
        crate::sim::player::take_damage(&mut e.state, 1, 1000.0, &t);
        crate::sim::player::take_damage(&mut e.state, 1, 2500.0, &t);
        assert_eq!(e.state().player.shield_hp, 1);

        e.load_level(LevelConfig::plain(2), 10_000.0);
        assert_ne!(e.state().player.shield_hp, 3);
        assert_eq!(e.state().player.shield_hp, 0);
        assert_eq!(e.state().player.max_shield_hp, 3);

        // Still held, so an unchanged inventory grants nothing
        e.set_powerups(PowerUpInventory::from_kinds([PowerUpKind::Shield]));
        assert_eq!(e.state().player.shield_hp, 0);
    }

    #[test]
    fn test_continue_restores_full_health() {
        let mut e = engine();
        e.load_level(LevelConfig::plain(4), 0.0);
        e.state.player.hp = 0;
        e.state.phase = GamePhase::GameOver;
        e.continue_level(LevelConfig::plain(4), 10_000.0);
        assert_eq!(e.state().player.hp, 3);
        assert_eq!(e.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_new_game_resets_everything() {
        let mut e = engine();
        e.load_level(LevelConfig::plain(3), 0.0);
        e.state.score = 999;
        e.set_powerups(PowerUpInventory::from_kinds([PowerUpKind::HelperMelee]));
        e.new_game();
        assert_eq!(e.state().score, 0);
        assert!(e.state().helpers.is_empty());
        assert!(e.powerups().is_empty());
        assert!(e.level().is_none());
        assert_eq!(e.phase(), GamePhase::AwaitingLevel);
    }
}
