//! Sound cues
//!
//! The simulation only names the sounds; synthesis belongs to the platform shell.
//! Cues are fire-and-forget and rate-limited by the cooldowns of whatever emits them.

use serde::{Deserialize, Serialize};

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Any snowball/projectile launch
    Throw,
    /// Player-side attack lands on an enemy
    HitEnemy,
    /// Player loses a hit point
    HitPlayer,
    /// Minion wave or boss arrives
    Spawn,
    /// Reindeer blinks
    Teleport,
    /// Laser or lightning fired
    Laser,
    /// Projectile reflects off a wall or rock
    Bounce,
    /// Hazard dropped/stepped in, helper destroyed, present bursts
    Squish,
    /// Player frozen by lightning
    Freeze,
    /// Shield absorbs a hit
    ShieldHit,
    /// Shield depleted (also played when a freeze thaws)
    ShieldBreak,
    /// Sliding on ice
    Slide,
    /// World pickup appeared
    PowerupSpawn,
    /// World pickup collected
    PowerupCollect,
    /// Level cleared
    JingleBells,
    /// Boss taunt
    HoHoHo,
}

impl SoundCue {
    pub const ALL: [SoundCue; 16] = [
        SoundCue::Throw,
        SoundCue::HitEnemy,
        SoundCue::HitPlayer,
        SoundCue::Spawn,
        SoundCue::Teleport,
        SoundCue::Laser,
        SoundCue::Bounce,
        SoundCue::Squish,
        SoundCue::Freeze,
        SoundCue::ShieldHit,
        SoundCue::ShieldBreak,
        SoundCue::Slide,
        SoundCue::PowerupSpawn,
        SoundCue::PowerupCollect,
        SoundCue::JingleBells,
        SoundCue::HoHoHo,
    ];

    /// Stable cue name as the audio layer knows it
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Throw => "throw",
            SoundCue::HitEnemy => "hit_enemy",
            SoundCue::HitPlayer => "hit_player",
            SoundCue::Spawn => "spawn",
            SoundCue::Teleport => "teleport",
            SoundCue::Laser => "laser",
            SoundCue::Bounce => "bounce",
            SoundCue::Squish => "squish",
            SoundCue::Freeze => "freeze",
            SoundCue::ShieldHit => "shield_hit",
            SoundCue::ShieldBreak => "shield_break",
            SoundCue::Slide => "slide",
            SoundCue::PowerupSpawn => "powerup_spawn",
            SoundCue::PowerupCollect => "powerup_collect",
            SoundCue::JingleBells => "jingle_bells",
            SoundCue::HoHoHo => "ho_ho_ho",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cue| cue.as_str() == s)
    }
}
