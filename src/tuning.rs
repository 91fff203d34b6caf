//! Game balance data
//!
//! Every speed, cooldown and hit-point constant the simulation reads. Defaults
//! reproduce the shipped balance; a JSON file may override any subset.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Balance constants. Speeds are world units per tick, times are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_base_hp: u32,
    /// Keyboard impulse on snow / ice
    pub key_impulse_snow: f32,
    pub key_impulse_ice: f32,
    /// Drag spring factor on snow (proportional to offset)
    pub drag_spring_snow: f32,
    /// Drag pull on ice (constant magnitude)
    pub drag_pull_ice: f32,
    /// No ice pull when the drag target is closer than this
    pub drag_dead_zone: f32,
    pub ice_friction: f32,
    pub snow_friction: f32,
    /// Velocity component above which ice sliding plays a cue
    pub slide_cue_speed: f32,
    pub slide_cue_chance: f64,
    /// Invulnerability window after a hit
    pub hit_debounce_ms: f64,
    pub freeze_duration_ms: f64,
    pub shield_max_hp: u32,
    pub regen_interval_ms: f64,

    // === Player fire ===
    pub snowball_speed: f32,
    pub fire_cooldown_ms: f64,
    pub rapid_fire_cooldown_ms: f64,
    pub triple_shot_spread: f32,
    /// Random aim error, total width in radians
    pub aim_jitter: f32,

    // === Scoring / progression ===
    pub score_per_kill: u64,
    pub score_boss_kill: u64,
    pub base_kills_needed: u32,
    pub kills_increase_per_level: u32,

    // === Minions ===
    pub snowman_speed: f32,
    pub bad_kid_speed: f32,
    /// bad_kid speed factor above `bad_kid_fast_after_level`
    pub bad_kid_late_speed_factor: f32,
    pub bad_kid_fast_after_level: u32,
    pub bad_kid_range: f32,
    pub bad_kid_cooldown_ms: f64,
    pub bad_kid_cooldown_step_ms: f64,
    pub bad_kid_cooldown_floor_ms: f64,
    pub bad_kid_jitter_resample_chance: f64,
    pub reindeer_speed: f32,
    pub reindeer_hp: f32,
    pub reindeer_teleport_cooldown_ms: f64,
    pub reindeer_laser_cooldown_ms: f64,
    pub reindeer_aim_delay_ms: f64,
    pub reindeer_min_player_distance: f32,
    pub reindeer_teleport_attempts: u32,
    pub laser_speed: f32,
    pub laser_bounces: u32,
    pub narwhal_speed: f32,
    pub narwhal_hp: f32,
    pub narwhal_cooldown_ms: f64,
    pub lightning_speed: f32,
    pub lightning_lifetime_ms: f64,
    pub yeti_speed: f32,
    pub yeti_hp: f32,
    pub yeti_drop_cooldown_ms: f64,
    pub yeti_dodge_cooldown_ms: f64,
    pub yeti_dodge_radius: f32,
    pub yeti_dodge_speed_factor: f32,
    pub hazard_damage: u32,
    pub hazard_lifetime_ms: f64,
    /// Extra clearance kept from obstacles by steering
    pub avoid_margin: f32,
    pub avoid_weight: f32,
    pub snowman_separation: f32,
    pub bad_kid_separation: f32,

    // === Bosses ===
    pub boss_hp: f32,
    pub boss_speed: f32,
    pub boss_attack_cooldown_ms: f64,
    pub boss_voice_cooldown_ms: f64,
    pub boss_voice_chance: f64,
    pub bell_speed: f32,
    pub bell_lifetime_ms: f64,
    pub boss_spread: f32,
    pub boss_avoid_weight: f32,
    pub elf_hp: f32,
    pub elf_speed: f32,
    pub elf_attack_cooldown_ms: f64,
    pub elf_dodge_cooldown_ms: f64,
    pub elf_dodge_radius: f32,
    pub elf_dodge_jump: f32,
    pub candy_cane_speed: f32,
    pub gum_hp: f32,
    pub gum_speed: f32,
    pub gum_attack_cooldown_ms: f64,
    pub gumball_speed: f32,
    /// Fraction of the target bearing blended into a homing velocity per tick
    pub homing_blend: f32,
    pub santa_hp: f32,
    pub santa_speed: f32,
    pub santa_attack_cooldown_ms: f64,
    /// Santa descends to this row before oscillating
    pub santa_hover_y: f32,
    pub present_speed: f32,
    pub shrapnel_count: u32,
    pub shrapnel_speed: f32,

    // === Power-ups ===
    pub powerup_spawn_chance: f64,
    pub powerup_lifetime_ms: f64,
    pub powerup_spawn_attempts: u32,

    // === Helpers ===
    pub helper_hp: f32,
    pub helper_speed: f32,
    pub helper_range_cooldown_ms: f64,
    pub helper_melee_cooldown_ms: f64,
    pub helper_melee_range: f32,
    pub helper_detect_range: f32,
    pub helper_fire_range: f32,
    pub helper_knockback: f32,
    pub helper_contact_damage: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_base_hp: 3,
            key_impulse_snow: 2.0,
            key_impulse_ice: 0.2,
            drag_spring_snow: 0.2,
            drag_pull_ice: 0.3,
            drag_dead_zone: 5.0,
            ice_friction: 0.98,
            snow_friction: 0.6,
            slide_cue_speed: 0.5,
            slide_cue_chance: 0.1,
            hit_debounce_ms: 1000.0,
            freeze_duration_ms: 1500.0,
            shield_max_hp: 3,
            regen_interval_ms: 5000.0,

            snowball_speed: 7.0,
            fire_cooldown_ms: 400.0,
            rapid_fire_cooldown_ms: 250.0,
            triple_shot_spread: 0.2,
            aim_jitter: 0.05,

            score_per_kill: 100,
            score_boss_kill: 5000,
            base_kills_needed: 10,
            kills_increase_per_level: 5,

            snowman_speed: 1.5,
            bad_kid_speed: 1.2,
            bad_kid_late_speed_factor: 1.3,
            bad_kid_fast_after_level: 7,
            bad_kid_range: 250.0,
            bad_kid_cooldown_ms: 2000.0,
            bad_kid_cooldown_step_ms: 100.0,
            bad_kid_cooldown_floor_ms: 500.0,
            bad_kid_jitter_resample_chance: 0.05,
            reindeer_speed: 0.8,
            reindeer_hp: 2.0,
            reindeer_teleport_cooldown_ms: 4000.0,
            reindeer_laser_cooldown_ms: 2500.0,
            reindeer_aim_delay_ms: 1500.0,
            reindeer_min_player_distance: 200.0,
            reindeer_teleport_attempts: 10,
            laser_speed: 15.0,
            laser_bounces: 2,
            narwhal_speed: 0.5,
            narwhal_hp: 5.0,
            narwhal_cooldown_ms: 4000.0,
            lightning_speed: 15.0,
            lightning_lifetime_ms: 500.0,
            yeti_speed: 1.25,
            yeti_hp: 5.0,
            yeti_drop_cooldown_ms: 3000.0,
            yeti_dodge_cooldown_ms: 2000.0,
            yeti_dodge_radius: 150.0,
            yeti_dodge_speed_factor: 2.5,
            hazard_damage: 1,
            hazard_lifetime_ms: 10_000.0,
            avoid_margin: 40.0,
            avoid_weight: 3.0,
            snowman_separation: 0.02,
            bad_kid_separation: 0.05,

            boss_hp: 30.0,
            boss_speed: 0.8,
            boss_attack_cooldown_ms: 2500.0,
            boss_voice_cooldown_ms: 5000.0,
            boss_voice_chance: 0.005,
            bell_speed: 6.0,
            bell_lifetime_ms: 3000.0,
            boss_spread: 0.3,
            boss_avoid_weight: 2.0,
            elf_hp: 120.0,
            elf_speed: 1.8,
            elf_attack_cooldown_ms: 1500.0,
            elf_dodge_cooldown_ms: 1000.0,
            elf_dodge_radius: 100.0,
            elf_dodge_jump: 100.0,
            candy_cane_speed: 6.0,
            gum_hp: 80.0,
            gum_speed: 0.5,
            gum_attack_cooldown_ms: 1500.0,
            gumball_speed: 4.0,
            homing_blend: 0.05,
            santa_hp: 150.0,
            santa_speed: 1.5,
            santa_attack_cooldown_ms: 2000.0,
            santa_hover_y: 100.0,
            present_speed: 5.0,
            shrapnel_count: 8,
            shrapnel_speed: 5.0,

            powerup_spawn_chance: 0.001,
            powerup_lifetime_ms: 10_000.0,
            powerup_spawn_attempts: 5,

            helper_hp: 3.0,
            helper_speed: 2.0,
            helper_range_cooldown_ms: 800.0,
            helper_melee_cooldown_ms: 1000.0,
            helper_melee_range: 60.0,
            helper_detect_range: 400.0,
            helper_fire_range: 300.0,
            helper_knockback: 30.0,
            helper_contact_damage: 0.05,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, friction) in [
            ("ice_friction", self.ice_friction),
            ("snow_friction", self.snow_friction),
        ] {
            if !(0.0..1.0).contains(&friction) {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("friction must be in [0, 1), got {friction}"),
                });
            }
        }
        if self.player_base_hp == 0 {
            return Err(TuningError::Invalid {
                field: "player_base_hp",
                reason: "player needs at least one hit point".into(),
            });
        }
        if self.hit_debounce_ms < 0.0 {
            return Err(TuningError::Invalid {
                field: "hit_debounce_ms",
                reason: format!("negative window {}", self.hit_debounce_ms),
            });
        }
        for (field, chance) in [
            ("powerup_spawn_chance", self.powerup_spawn_chance),
            ("slide_cue_chance", self.slide_cue_chance),
            ("boss_voice_chance", self.boss_voice_chance),
            ("bad_kid_jitter_resample_chance", self.bad_kid_jitter_resample_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("probability must be in [0, 1], got {chance}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.homing_blend) {
            return Err(TuningError::Invalid {
                field: "homing_blend",
                reason: format!("blend must be in [0, 1], got {}", self.homing_blend),
            });
        }
        Ok(())
    }

    /// Minion kills that complete a non-boss level
    pub fn kills_needed(&self, level: u32) -> u32 {
        self.base_kills_needed + level.saturating_sub(1) * self.kills_increase_per_level
    }

    /// bad_kid fire cooldown, shortening with level down to a floor
    pub fn bad_kid_cooldown(&self, level: u32) -> f64 {
        let reduction = level.saturating_sub(1) as f64 * self.bad_kid_cooldown_step_ms;
        (self.bad_kid_cooldown_ms - reduction).max(self.bad_kid_cooldown_floor_ms)
    }
}
