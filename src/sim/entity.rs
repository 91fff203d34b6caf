//! Simulated bodies
//!
//! Every moving body is a circle with a position, velocity, radius and a
//! colour hint for the renderer. Static terrain comes from the level config.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::point_in_rotated_ellipse;
use super::powerup::PowerUpKind;
use crate::consts::*;
use crate::tuning::Tuning;

/// Identity of a simulated body (unique within a session)
pub type EntityId = u32;

/// What a hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Inside the invulnerability window
    Ignored,
    /// Shield took it; `broken` when the shield is now empty
    Shield { broken: bool },
    /// Hit points took it; `dead` when none are left
    Health { dead: bool },
}

/// The player avatar
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub hp: u32,
    pub max_hp: u32,
    pub shield_hp: u32,
    pub max_shield_hp: u32,
    /// Pointer drag steering is active
    pub dragging: bool,
    /// Time of the last hit that was applied
    pub last_hit_time: Option<f64>,
    pub frozen: bool,
    pub freeze_time: f64,
    pub last_regen_time: f64,
}

impl Player {
    pub fn new(max_hp: u32, now: f64) -> Self {
        Self {
            pos: crate::canvas_center(),
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            color: PLAYER_COLOR,
            hp: max_hp,
            max_hp,
            shield_hp: 0,
            max_shield_hp: 0,
            dragging: false,
            last_hit_time: None,
            frozen: false,
            freeze_time: 0.0,
            last_regen_time: now,
        }
    }

    /// Level (re)load: recentre, heal one point, drop shield points and freeze.
    /// The shield capacity stays so a held SHIELD is not granted again.
    pub fn reset_for_level(&mut self, max_hp: u32, now: f64) {
        self.pos = crate::canvas_center();
        self.vel = Vec2::ZERO;
        self.dragging = false;
        self.frozen = false;
        self.max_hp = max_hp;
        self.hp = (self.hp + 1).min(max_hp);
        self.shield_hp = 0;
        self.last_hit_time = None;
        self.last_regen_time = now;
    }

    /// Apply `amount` damage unless a previous hit landed within `debounce_ms`.
    /// The shield soaks the whole hit while it has any points left.
    pub fn absorb_hit(&mut self, amount: u32, now: f64, debounce_ms: f64) -> HitOutcome {
        if self.last_hit_time.is_some_and(|last| now - last < debounce_ms) {
            return HitOutcome::Ignored;
        }
        self.last_hit_time = Some(now);

        if self.shield_hp > 0 {
            self.shield_hp = self.shield_hp.saturating_sub(amount);
            HitOutcome::Shield {
                broken: self.shield_hp == 0,
            }
        } else {
            self.hp = self.hp.saturating_sub(amount);
            HitOutcome::Health { dead: self.hp == 0 }
        }
    }
}

/// Enemy kinds (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Snowman,
    BadKid,
    Reindeer,
    Abominable,
    Narwhal,
    BossBells,
    BossElf,
    BossGum,
    BossSanta,
}

impl EnemyKind {
    pub fn is_boss(&self) -> bool {
        matches!(
            self,
            EnemyKind::BossBells | EnemyKind::BossElf | EnemyKind::BossGum | EnemyKind::BossSanta
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Snowman => "snowman",
            EnemyKind::BadKid => "bad_kid",
            EnemyKind::Reindeer => "reindeer",
            EnemyKind::Abominable => "abominable",
            EnemyKind::Narwhal => "narwhal",
            EnemyKind::BossBells => "boss_bells",
            EnemyKind::BossElf => "boss_elf",
            EnemyKind::BossGum => "boss_gum",
            EnemyKind::BossSanta => "boss_santa",
        }
    }

    /// Which boss guards a boss level
    pub fn boss_for_level(level: u32) -> Self {
        match level {
            14 => EnemyKind::BossElf,
            21 => EnemyKind::BossGum,
            28 => EnemyKind::BossSanta,
            _ => EnemyKind::BossBells,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            EnemyKind::Abominable => YETI_RADIUS,
            EnemyKind::Narwhal => NARWHAL_RADIUS,
            EnemyKind::BossBells => BOSS_RADIUS,
            EnemyKind::BossElf => BOSS_ELF_RADIUS,
            EnemyKind::BossGum => BOSS_GUM_RADIUS,
            EnemyKind::BossSanta => BOSS_SANTA_RADIUS,
            _ => ENEMY_RADIUS,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EnemyKind::Snowman => "#ffffff",
            EnemyKind::BadKid => "#16a34a",
            EnemyKind::Reindeer => "#92400e",
            EnemyKind::Abominable => "#e2e8f0",
            EnemyKind::Narwhal => "#64748b",
            EnemyKind::BossBells => "#ef4444",
            EnemyKind::BossElf => "#dc2626",
            EnemyKind::BossGum => "#ec4899",
            EnemyKind::BossSanta => "#991b1b",
        }
    }

    /// Starting hit points
    pub fn base_hp(&self, t: &Tuning) -> f32 {
        match self {
            EnemyKind::Snowman | EnemyKind::BadKid => 1.0,
            EnemyKind::Reindeer => t.reindeer_hp,
            EnemyKind::Abominable => t.yeti_hp,
            EnemyKind::Narwhal => t.narwhal_hp,
            EnemyKind::BossBells => t.boss_hp,
            EnemyKind::BossElf => t.elf_hp,
            EnemyKind::BossGum => t.gum_hp,
            EnemyKind::BossSanta => t.santa_hp,
        }
    }

    /// Base speed before level scaling
    pub fn base_speed(&self, t: &Tuning) -> f32 {
        match self {
            EnemyKind::Snowman => t.snowman_speed,
            EnemyKind::BadKid => t.bad_kid_speed,
            EnemyKind::Reindeer => t.reindeer_speed,
            EnemyKind::Abominable => t.yeti_speed,
            EnemyKind::Narwhal => t.narwhal_speed,
            EnemyKind::BossBells => t.boss_speed,
            EnemyKind::BossElf => t.elf_speed,
            EnemyKind::BossGum => t.gum_speed,
            EnemyKind::BossSanta => t.santa_speed,
        }
    }
}

/// Per-kind behaviour state. Each case carries the timers only its kind uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EnemyBehavior {
    Snowman,
    /// Wanders with a per-instance jitter that is occasionally resampled
    BadKid { jitter: Vec2 },
    Reindeer { last_teleport: f64 },
    Abominable { last_drop: f64, last_dodge: Option<f64> },
    Narwhal,
    BossBells { last_voice_line: f64 },
    BossElf { last_dodge: Option<f64> },
    BossGum,
    BossSanta,
}

impl EnemyBehavior {
    /// Behaviour state for a freshly spawned enemy
    pub fn spawn(kind: EnemyKind, now: f64) -> Self {
        match kind {
            EnemyKind::Snowman => EnemyBehavior::Snowman,
            EnemyKind::BadKid => EnemyBehavior::BadKid { jitter: Vec2::ZERO },
            EnemyKind::Reindeer => EnemyBehavior::Reindeer { last_teleport: now },
            EnemyKind::Abominable => EnemyBehavior::Abominable {
                last_drop: now,
                last_dodge: None,
            },
            EnemyKind::Narwhal => EnemyBehavior::Narwhal,
            EnemyKind::BossBells => EnemyBehavior::BossBells {
                last_voice_line: now,
            },
            EnemyKind::BossElf => EnemyBehavior::BossElf { last_dodge: None },
            EnemyKind::BossGum => EnemyBehavior::BossGum,
            EnemyKind::BossSanta => EnemyBehavior::BossSanta,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            EnemyBehavior::Snowman => EnemyKind::Snowman,
            EnemyBehavior::BadKid { .. } => EnemyKind::BadKid,
            EnemyBehavior::Reindeer { .. } => EnemyKind::Reindeer,
            EnemyBehavior::Abominable { .. } => EnemyKind::Abominable,
            EnemyBehavior::Narwhal => EnemyKind::Narwhal,
            EnemyBehavior::BossBells { .. } => EnemyKind::BossBells,
            EnemyBehavior::BossElf { .. } => EnemyKind::BossElf,
            EnemyBehavior::BossGum => EnemyKind::BossGum,
            EnemyBehavior::BossSanta => EnemyKind::BossSanta,
        }
    }
}

/// A hostile body
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    /// Displacement applied on the last tick (for presentation)
    pub vel: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    pub last_shot: f64,
    pub attack_range: f32,
    pub behavior: EnemyBehavior,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2, speed: f32, t: &Tuning, now: f64) -> Self {
        let hp = kind.base_hp(t);
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: kind.radius(),
            color: kind.color(),
            hp,
            max_hp: hp,
            speed,
            last_shot: now,
            attack_range: if kind.is_boss() { 1000.0 } else { t.bad_kid_range },
            behavior: EnemyBehavior::spawn(kind, now),
        }
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }

    #[inline]
    pub fn is_boss(&self) -> bool {
        self.kind().is_boss()
    }
}

/// Projectile kinds; the kind selects the special update rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectileKind {
    Snowball,
    /// Reindeer beam, reflects off rocks while it has bounces left
    Laser { bounces_left: u32 },
    /// Narwhal bolt, freezes on hit
    Lightning,
    /// Boss bell, reflects off canvas edges until it expires
    Bell,
    /// Santa's present, bursts into shrapnel on impact
    Present,
    /// Gum boss bullet, steers toward the player
    Gumball,
    CandyCane,
    /// Stationary yeti droppings
    Hazard,
    Shrapnel,
}

impl ProjectileKind {
    #[inline]
    pub fn seeking(&self) -> bool {
        matches!(self, ProjectileKind::Gumball)
    }

    #[inline]
    pub fn bounces(&self) -> bool {
        matches!(self, ProjectileKind::Bell)
    }

    #[inline]
    pub fn explosive(&self) -> bool {
        matches!(self, ProjectileKind::Present)
    }

    #[inline]
    pub fn is_hazard(&self) -> bool {
        matches!(self, ProjectileKind::Hazard)
    }

    #[inline]
    pub fn freezes(&self) -> bool {
        matches!(self, ProjectileKind::Lightning)
    }

    /// Maximum age, for kinds that expire on their own
    pub fn lifetime(&self, t: &Tuning) -> Option<f64> {
        match self {
            ProjectileKind::Bell => Some(t.bell_lifetime_ms),
            ProjectileKind::Hazard => Some(t.hazard_lifetime_ms),
            ProjectileKind::Lightning => Some(t.lightning_lifetime_ms),
            _ => None,
        }
    }
}

/// A thrown, fired or dropped damaging body
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub damage: u32,
    pub from_player: bool,
    pub created_at: f64,
    pub kind: ProjectileKind,
}

impl Projectile {
    /// Age-based expiry
    pub fn expired(&self, now: f64, t: &Tuning) -> bool {
        self.kind
            .lifetime(t)
            .is_some_and(|life| now - self.created_at > life)
    }
}

/// Helper drone flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelperKind {
    Range,
    Melee,
}

impl HelperKind {
    /// The power-up that grants (and is revoked with) this helper
    pub fn powerup(&self) -> PowerUpKind {
        match self {
            HelperKind::Range => PowerUpKind::HelperRange,
            HelperKind::Melee => PowerUpKind::HelperMelee,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            HelperKind::Range => "#60a5fa",
            HelperKind::Melee => "#4ade80",
        }
    }

    /// Distance kept from the player while idle
    pub fn follow_distance(&self) -> f32 {
        match self {
            HelperKind::Range => 80.0,
            HelperKind::Melee => 50.0,
        }
    }
}

/// Allied drone
#[derive(Debug, Clone, Serialize)]
pub struct Helper {
    pub id: EntityId,
    pub kind: HelperKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub hp: f32,
    pub max_hp: f32,
    pub last_action: f64,
}

impl Helper {
    pub fn new(id: EntityId, kind: HelperKind, pos: Vec2, hp: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: HELPER_RADIUS,
            color: kind.color(),
            hp,
            max_hp: hp,
            last_action: 0.0,
        }
    }
}

/// A pickup lying in the world
#[derive(Debug, Clone, Serialize)]
pub struct PowerUpItem {
    pub id: EntityId,
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub created_at: f64,
    /// Level-authored placements never time out
    pub persistent: bool,
}

/// Obstacle material, encoded by colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleMaterial {
    Tree,
    Rock,
    Snowbank,
    FactoryBox,
    Other,
}

/// Static circular blocker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    pub pos: Vec2,
    pub radius: f32,
    pub color: String,
}

impl Obstacle {
    pub fn new(id: impl Into<String>, pos: Vec2, radius: f32, color: &str) -> Self {
        Self {
            id: id.into(),
            pos,
            radius,
            color: color.to_string(),
        }
    }

    pub fn material(&self) -> ObstacleMaterial {
        match self.color.as_str() {
            OBS_TREE_COLOR => ObstacleMaterial::Tree,
            OBS_ROCK_COLOR => ObstacleMaterial::Rock,
            OBS_SNOW_COLOR => ObstacleMaterial::Snowbank,
            OBS_BOX_COLOR => ObstacleMaterial::FactoryBox,
            _ => ObstacleMaterial::Other,
        }
    }
}

/// Low-friction elliptical ground zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcePatch {
    pub id: String,
    pub pos: Vec2,
    pub radius_x: f32,
    pub radius_y: f32,
    /// Radians
    pub rotation: f32,
}

impl IcePatch {
    pub fn contains(&self, p: Vec2) -> bool {
        point_in_rotated_ellipse(p, self.pos, self.radius_x, self.radius_y, self.rotation)
    }
}
