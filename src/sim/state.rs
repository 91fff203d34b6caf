//! Simulation state
//!
//! Everything the tick mutates lives in [`SimulationState`]; the per-tick
//! read-only inputs travel alongside it in a [`TickContext`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Enemy, EntityId, Helper, Player, PowerUpItem, Projectile};
use super::events::GameEvent;
use super::level::LevelConfig;
use super::powerup::PowerUpInventory;
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No level config yet (loading, or the last load failed)
    AwaitingLevel,
    /// Ticking
    Playing,
    /// Frozen in place; resumes where it stopped
    Paused,
    /// Level goal reached and signalled; waiting for the next config
    LevelComplete,
    /// Player ran out of hit points; the session decides continue vs. final
    GameOver,
}

/// Read-only inputs for one tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub level: &'a LevelConfig,
    pub tuning: &'a Tuning,
    pub powerups: &'a PowerUpInventory,
    /// Milliseconds, monotonic
    pub now: f64,
}

/// Mutable simulation aggregate
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub helpers: Vec<Helper>,
    pub items: Vec<PowerUpItem>,
    /// Running score (survives level changes)
    pub score: u64,
    /// Minion kills on the current level
    pub kills: u32,
    /// The live boss, if any
    pub boss_id: Option<EntityId>,
    /// The level's boss has already appeared
    pub boss_spawned: bool,
    /// Yetis spawned on the current level
    pub yetis_spawned: u32,
    /// Player auto-fire stamp
    pub last_shot: f64,
    /// Minion spawn stamp
    pub last_spawn: f64,
    /// Time of the most recent tick
    pub now: f64,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl SimulationState {
    pub fn new(seed: u64, t: &Tuning) -> Self {
        Self {
            phase: GamePhase::AwaitingLevel,
            player: Player::new(t.player_base_hp, 0.0),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            helpers: Vec::new(),
            items: Vec::new(),
            score: 0,
            kills: 0,
            boss_id: None,
            boss_spawned: false,
            yetis_spawned: 0,
            last_shot: 0.0,
            last_spawn: 0.0,
            now: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Wipe per-level entities and counters (helpers survive: they follow the inventory)
    pub fn clear_level(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.items.clear();
        self.kills = 0;
        self.boss_id = None;
        self.boss_spawned = false;
        self.yetis_spawned = 0;
    }

    pub fn boss(&self) -> Option<&Enemy> {
        let id = self.boss_id?;
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn cue(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }

    pub fn emit_health(&mut self) {
        let p = &self.player;
        let event = GameEvent::HealthChanged {
            hp: p.hp,
            max_hp: p.max_hp,
            shield_hp: p.shield_hp,
        };
        self.events.push(event);
    }

    /// Take the queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
