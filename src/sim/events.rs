//! Notifications emitted by the simulation during a tick
//!
//! Events are queued in emission order and handed to the session controller
//! when the tick returns.

use serde::Serialize;

use super::powerup::PowerUpKind;
use crate::audio::SoundCue;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Running score total
    ScoreChanged { score: u64 },
    HealthChanged {
        hp: u32,
        max_hp: u32,
        shield_hp: u32,
    },
    /// Minion kills on the current level
    KillProgress { kills: u32 },
    /// A world pickup was collected
    PowerUpGranted { kind: PowerUpKind },
    /// Stacks lost (shield broken, helper destroyed)
    PowerUpRevoked { kind: PowerUpKind, count: u32 },
    LifeLost,
    LevelComplete { score: u64 },
    GameOver { score: u64 },
    Sound(SoundCue),
}
