//! Level configuration consumed by the simulation
//!
//! Produced by a [`crate::levelgen::LevelSource`]; immutable for the level's duration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{IcePatch, Obstacle};
use super::powerup::PowerUpKind;
use crate::error::LevelLoadError;

/// Minion mix for non-boss levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyComposition {
    #[default]
    Mixed,
    /// Snowmen only
    Rush,
    /// Mostly throwers
    Range,
    /// Everything, including late-game specials
    Chaos,
}

/// A level-authored pickup placement (never despawns)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialPowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level_number: u32,
    pub theme_name: String,
    pub description: String,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub ice_patches: Vec<IcePatch>,
    #[serde(default)]
    pub initial_powerups: Vec<InitialPowerUp>,
    /// Milliseconds between minion spawn ticks
    pub enemy_spawn_interval_ms: f64,
    pub enemy_speed_multiplier: f32,
    #[serde(default)]
    pub boss_message: Option<String>,
    #[serde(default)]
    pub enemy_composition: EnemyComposition,
    pub is_boss_level: bool,
}

impl LevelConfig {
    /// An empty snowfield: no terrain, default pacing
    pub fn plain(level_number: u32) -> Self {
        Self {
            level_number,
            theme_name: "Open Field".into(),
            description: String::new(),
            obstacles: Vec::new(),
            ice_patches: Vec::new(),
            initial_powerups: Vec::new(),
            enemy_spawn_interval_ms: 1800.0,
            enemy_speed_multiplier: 1.0,
            boss_message: None,
            enemy_composition: EnemyComposition::Mixed,
            is_boss_level: false,
        }
    }

    /// Reject configs the simulation cannot run
    pub fn validate(&self) -> Result<(), LevelLoadError> {
        let invalid = |reason: String| LevelLoadError::Invalid {
            level: self.level_number,
            reason,
        };
        if self.level_number == 0 {
            return Err(invalid("levels are numbered from 1".into()));
        }
        if !self.enemy_spawn_interval_ms.is_finite() || self.enemy_spawn_interval_ms <= 0.0 {
            return Err(invalid(format!(
                "spawn interval must be positive, got {}",
                self.enemy_spawn_interval_ms
            )));
        }
        if !self.enemy_speed_multiplier.is_finite() || self.enemy_speed_multiplier <= 0.0 {
            return Err(invalid(format!(
                "speed multiplier must be positive, got {}",
                self.enemy_speed_multiplier
            )));
        }
        if let Some(o) = self.obstacles.iter().find(|o| o.radius <= 0.0) {
            return Err(invalid(format!("obstacle {} has radius {}", o.id, o.radius)));
        }
        if let Some(p) = self
            .ice_patches
            .iter()
            .find(|p| p.radius_x <= 0.0 || p.radius_y <= 0.0)
        {
            return Err(invalid(format!("ice patch {} is degenerate", p.id)));
        }
        Ok(())
    }

    /// Is `p` on ice?
    pub fn on_ice(&self, p: Vec2) -> bool {
        self.ice_patches.iter().any(|ice| ice.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_valid() {
        assert!(LevelConfig::plain(1).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_spawn_interval() {
        let mut cfg = LevelConfig::plain(3);
        cfg.enemy_spawn_interval_ms = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(LevelLoadError::Invalid { level: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_level_zero() {
        assert!(LevelConfig::plain(0).validate().is_err());
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "level_number": 2,
            "theme_name": "Frozen Tundra",
            "description": "",
            "enemy_spawn_interval_ms": 1500.0,
            "enemy_speed_multiplier": 1.1,
            "is_boss_level": false
        }"#;
        let cfg: LevelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.enemy_composition, EnemyComposition::Mixed);
        assert!(cfg.obstacles.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_on_ice() {
        let mut cfg = LevelConfig::plain(1);
        cfg.ice_patches.push(IcePatch {
            id: "ice-1".into(),
            pos: Vec2::new(200.0, 200.0),
            radius_x: 50.0,
            radius_y: 30.0,
            rotation: 0.0,
        });
        assert!(cfg.on_ice(Vec2::new(240.0, 200.0)));
        assert!(!cfg.on_ice(Vec2::new(200.0, 240.0)));
    }
}
