//! Snowball Showdown - a top-down snowball arcade shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, enemy AI, projectiles, progression)
//! - `levelgen`: Procedural level configurations consumed by the simulation
//! - `session`: Score/lives/inventory controller driving the simulation
//! - `leaderboard`: Top scores table
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cue names emitted by the simulation

pub mod audio;
pub mod error;
pub mod leaderboard;
pub mod levelgen;
pub mod session;
pub mod sim;
pub mod tuning;

pub use audio::SoundCue;
pub use error::{LevelLoadError, TuningError};
pub use leaderboard::Leaderboard;
pub use levelgen::{LevelSource, ProceduralLevels};
pub use session::{Session, SessionStatus};
pub use tuning::Tuning;

use glam::Vec2;

/// Arena geometry and entity sizes
pub mod consts {
    /// Canvas dimensions (world units == pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_COLOR: &str = "#3b82f6";

    pub const ENEMY_RADIUS: f32 = 18.0;
    pub const YETI_RADIUS: f32 = 28.0;
    pub const NARWHAL_RADIUS: f32 = 25.0;
    pub const BOSS_RADIUS: f32 = 40.0;
    pub const BOSS_ELF_RADIUS: f32 = 30.0;
    pub const BOSS_GUM_RADIUS: f32 = 45.0;
    pub const BOSS_SANTA_RADIUS: f32 = 50.0;

    pub const SNOWBALL_RADIUS: f32 = 5.0;
    pub const BELL_RADIUS: f32 = 12.0;
    pub const HAZARD_RADIUS: f32 = 10.0;
    pub const LASER_RADIUS: f32 = 3.0;
    pub const LIGHTNING_RADIUS: f32 = 4.0;
    pub const CANDY_CANE_RADIUS: f32 = 8.0;
    pub const GUMBALL_RADIUS: f32 = 8.0;
    pub const PRESENT_RADIUS: f32 = 12.0;
    pub const SHRAPNEL_RADIUS: f32 = 3.0;

    pub const HELPER_RADIUS: f32 = 10.0;
    /// Pickup diameter; collection tests against half of it
    pub const POWERUP_SIZE: f32 = 20.0;

    /// Obstacle colours double as their material tag
    pub const OBS_TREE_COLOR: &str = "#166534";
    pub const OBS_ROCK_COLOR: &str = "#64748b";
    pub const OBS_SNOW_COLOR: &str = "#f8fafc";
    pub const OBS_BOX_COLOR: &str = "#92400e";
}

/// Canvas centre, where the player (re)spawns
#[inline]
pub fn canvas_center() -> Vec2 {
    Vec2::new(consts::CANVAS_WIDTH / 2.0, consts::CANVAS_HEIGHT / 2.0)
}

/// Bearing (radians) from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for a bearing
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_angle_to_cardinal() {
        let o = Vec2::ZERO;
        assert!(angle_to(o, Vec2::new(10.0, 0.0)).abs() < 1e-6);
        assert!((angle_to(o, Vec2::new(0.0, 10.0)) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_unit_from_angle_is_unit() {
        for i in 0..16 {
            let v = unit_from_angle(i as f32 * 0.4);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }
}
