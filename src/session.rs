//! Session controller
//!
//! Sits above the [`Engine`]: owns score, lives, the level counter, the
//! power-up inventory and the leaderboard, requests level configs from a
//! [`LevelSource`], and reacts to the events each tick returns.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::SoundCue;
use crate::leaderboard::Leaderboard;
use crate::levelgen::LevelSource;
use crate::sim::engine::Engine;
use crate::sim::events::GameEvent;
use crate::sim::powerup::{PowerUpInventory, PowerUpKind};
use crate::tuning::Tuning;

pub const STARTING_LIVES: u32 = 3;

/// Reward pool after clearing a boss level
const BOSS_REWARDS: [PowerUpKind; 3] = [PowerUpKind::RapidFire, PowerUpKind::TripleShot, PowerUpKind::Vitality];

const RETRY_MESSAGE: &str = "Snowstorm interference. Retrying...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Menu,
    /// Waiting on a level config; retried every frame until one arrives
    LoadingLevel,
    Playing,
    Paused,
    /// `can_continue` while lives remain; otherwise the run is over and
    /// `qualifies` says whether it earned a leaderboard place
    GameOver { can_continue: bool, qualifies: bool },
}

pub struct Session<S: LevelSource> {
    engine: Engine,
    source: S,
    leaderboard: Leaderboard,
    status: SessionStatus,
    level: u32,
    lives: u32,
    score: u64,
    powerups: PowerUpInventory,
    /// User-visible note while a level load is being retried
    load_message: Option<String>,
    game_over_message: Option<String>,
    rng: Pcg32,
}

impl<S: LevelSource> Session<S> {
    pub fn new(source: S, tuning: Tuning, seed: u64) -> Self {
        Self {
            engine: Engine::new(tuning, seed),
            source,
            leaderboard: Leaderboard::new(),
            status: SessionStatus::Menu,
            level: 1,
            lives: STARTING_LIVES,
            score: 0,
            powerups: PowerUpInventory::new(),
            load_message: None,
            game_over_message: None,
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
        }
    }

    pub fn with_leaderboard(mut self, leaderboard: Leaderboard) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn powerups(&self) -> &PowerUpInventory {
        &self.powerups
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn load_message(&self) -> Option<&str> {
        self.load_message.as_deref()
    }

    pub fn game_over_message(&self) -> Option<&str> {
        self.game_over_message.as_deref()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// For feeding input
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// New run from level 1
    pub fn start(&mut self, now: f64) {
        log::info!("New game");
        self.engine.new_game();
        self.level = 1;
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.powerups = PowerUpInventory::new();
        self.game_over_message = None;
        self.load_level(now);
    }

    /// Ask the source for the current level and hand the result to the engine
    fn load_level(&mut self, now: f64) {
        self.status = SessionStatus::LoadingLevel;
        self.engine.request_level();

        let offensive = self.powerups.offensive_count();
        let result = self.source.generate(self.level, offensive);
        match self.engine.finish_level_load(result, now) {
            Ok(()) => {
                self.load_message = None;
                self.status = SessionStatus::Playing;
            }
            Err(err) => {
                log::debug!("Level {} load will be retried: {err}", self.level);
                self.load_message = Some(RETRY_MESSAGE.to_string());
            }
        }
    }

    /// Drive one frame. Returns the frame's events, including sound cues the
    /// session itself raises.
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        match self.status {
            SessionStatus::LoadingLevel => {
                self.load_level(now);
                self.engine.drain_events()
            }
            SessionStatus::Playing => {
                let mut events = self.engine.tick(now);
                let mut extra = Vec::new();
                for event in &events {
                    self.handle(event, now, &mut extra);
                }
                events.extend(extra);
                events.extend(self.engine.drain_events());
                events
            }
            _ => Vec::new(),
        }
    }

    fn handle(&mut self, event: &GameEvent, now: f64, out: &mut Vec<GameEvent>) {
        match *event {
            GameEvent::ScoreChanged { score } => self.score = score,
            GameEvent::PowerUpGranted { kind } => {
                self.powerups.add(kind);
                self.engine.set_powerups(self.powerups.clone());
            }
            GameEvent::PowerUpRevoked { kind, count } => {
                self.powerups.remove(kind, count);
                self.engine.set_powerups(self.powerups.clone());
            }
            GameEvent::LifeLost => {
                self.lives = self.lives.saturating_sub(1);
            }
            GameEvent::GameOver { score } => {
                self.score = score;
                let can_continue = self.lives > 0;
                let qualifies = !can_continue && self.leaderboard.qualifies(score);
                self.game_over_message = Some(self.source.game_over_message(score, self.level));
                self.status = SessionStatus::GameOver { can_continue, qualifies };
                log::info!(
                    "Game over on level {} with {} (lives left {}, leaderboard {})",
                    self.level,
                    score,
                    self.lives,
                    qualifies
                );
            }
            GameEvent::LevelComplete { score } => {
                self.score = score;
                out.push(GameEvent::Sound(SoundCue::JingleBells));
                self.advance(now);
            }
            _ => {}
        }
    }

    /// Prune the inventory, grant the boss reward, and load the next level
    fn advance(&mut self, now: f64) {
        let mut next = self.powerups.pruned();
        if self.level % 7 == 0 {
            let reward = BOSS_REWARDS[self.rng.random_range(0..BOSS_REWARDS.len())];
            log::info!("Boss reward: {}", reward.as_str());
            next.add(reward);
        }
        self.powerups = next;
        self.engine.set_powerups(self.powerups.clone());
        self.level += 1;
        self.load_level(now);
    }

    /// Retry the level after a lost life. Only valid while lives remain.
    pub fn continue_game(&mut self, now: f64) -> bool {
        if !matches!(self.status, SessionStatus::GameOver { can_continue: true, .. }) {
            return false;
        }
        let Some(config) = self.engine.level().cloned() else {
            self.load_level(now);
            return true;
        };
        log::info!("Continuing level {} ({} lives left)", self.level, self.lives);
        self.engine.continue_level(config, now);
        self.game_over_message = None;
        self.status = SessionStatus::Playing;
        true
    }

    /// Record the finished run. Returns the rank on success.
    pub fn submit_score(&mut self, name: &str, timestamp: f64) -> Option<usize> {
        if !matches!(self.status, SessionStatus::GameOver { qualifies: true, .. }) {
            return None;
        }
        let rank = self.leaderboard.submit(name, self.score, self.level, timestamp)?;
        self.status = SessionStatus::GameOver {
            can_continue: false,
            qualifies: false,
        };
        Some(rank)
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            SessionStatus::Playing => {
                self.engine.pause();
                self.status = SessionStatus::Paused;
            }
            SessionStatus::Paused => {
                self.engine.resume();
                self.status = SessionStatus::Playing;
            }
            _ => {}
        }
    }
}
