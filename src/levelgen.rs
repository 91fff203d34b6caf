//! Level configurations
//!
//! The simulation consumes [`LevelConfig`]s from a [`LevelSource`]. The
//! built-in source, [`ProceduralLevels`], lays out terrain from a seeded RNG
//! and scales pacing with the level number and the player's hoard of
//! offensive power-ups.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::canvas_center;
use crate::error::LevelLoadError;
use crate::sim::entity::{IcePatch, Obstacle};
use crate::sim::level::{EnemyComposition, InitialPowerUp, LevelConfig};
use crate::sim::powerup::PowerUpKind;

/// Every seventh level is a boss level
pub const BOSS_LEVEL_EVERY: u32 = 7;
/// Every fifth non-boss level is a factory maze
pub const FACTORY_LEVEL_EVERY: u32 = 5;

/// Obstacles keep this far (plus their radius) from the player spawn
const SPAWN_CLEARANCE: f32 = 150.0;
const PLACEMENT_ATTEMPTS: u32 = 20;

const FACTORY_COLS: u32 = 6;
const FACTORY_ROWS: u32 = 5;

const THEMES: [&str; 7] = [
    "Winter Wonderland",
    "Frozen Tundra",
    "Icy Archipelago",
    "Glacial Pass",
    "Snowy Forest",
    "Blizzard Beach",
    "Frosty Peaks",
];

const DESCRIPTIONS: [&str; 6] = [
    "Watch your step, it's slippery out here!",
    "The snowmen have fortified their position.",
    "Perfect weather for a snowball fight.",
    "Don't eat the yellow snow.",
    "It's quiet... too quiet.",
    "Reinforcements have arrived!",
];

const GAME_OVER_LINES: [&str; 8] = [
    "You got iced!",
    "Chill out, it's just a game.",
    "That was cold.",
    "Snow way you lost that.",
    "You've been put on ice.",
    "Better luck next winter.",
    "Frostbitten and forgotten.",
    "The snowmen claim another victim.",
];

/// Where level configs come from
pub trait LevelSource {
    /// Produce the config for `level`. `offensive_powerups` is the number of
    /// non-vitality power-ups the player is carrying.
    fn generate(&mut self, level: u32, offensive_powerups: usize) -> Result<LevelConfig, LevelLoadError>;

    /// Flavour line for the game-over screen
    fn game_over_message(&mut self, _score: u64, _level: u32) -> String {
        GAME_OVER_LINES[5].to_string()
    }
}

pub fn is_boss_level(level: u32) -> bool {
    level % BOSS_LEVEL_EVERY == 0
}

pub fn is_factory_level(level: u32) -> bool {
    level % FACTORY_LEVEL_EVERY == 0 && !is_boss_level(level)
}

/// Enemy speed multiplier: linear growth, reset at the start of each act, capped
pub fn speed_multiplier(level: u32) -> f32 {
    let multiplier = match level {
        8 | 9 | 15 => 1.0,
        _ => 1.0 + level as f32 * 0.05,
    };
    multiplier.min(2.0)
}

/// Milliseconds between minion spawn ticks
pub fn spawn_interval_ms(level: u32, offensive_powerups: usize) -> f64 {
    let adjusted = match level {
        l if l > 14 => l - 8,
        l if l > 7 => l - 4,
        l => l,
    };
    let mut interval = (1800.0 - adjusted as f64 * 120.0).max(400.0);

    if level > 10 {
        interval = (interval * 0.6).max(250.0);
    }

    // Hoarding offensive power-ups speeds the waves up
    let extra = offensive_powerups.saturating_sub(5);
    if extra > 0 {
        interval = (interval * 0.9f64.powi(extra as i32)).max(150.0);
    }
    interval
}

/// Theme, description and boss taunt for a boss level
fn boss_flavour(level: u32) -> (Option<&'static str>, &'static str, &'static str) {
    match level {
        14 => (
            Some("Santa's Workshop Gone Wrong"),
            "The Elf Foreman is here to cancel your Christmas.",
            "Back to work!",
        ),
        21 => (Some("Candy Kingdom"), "It sticks to everything!", "Chew on this!"),
        28 => (
            Some("Silent Night"),
            "He sees you when you're sleeping...",
            "HO HO HO! NO SURVIVORS!",
        ),
        _ => (None, "A giant foe approaches!", "I will crush you!"),
    }
}

/// Seeded procedural level generator
pub struct ProceduralLevels {
    rng: Pcg32,
}

impl ProceduralLevels {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn composition(&mut self, level: u32) -> EnemyComposition {
        if is_boss_level(level) {
            return EnemyComposition::Mixed;
        }
        if level > 8 {
            EnemyComposition::Chaos
        } else if level > 5 && self.rng.random_bool(0.3) {
            EnemyComposition::Rush
        } else {
            EnemyComposition::Mixed
        }
    }

    /// 6x5 grid of boxes with loot in some of the gaps; the centre four cells stay open
    fn factory_layout(&mut self) -> (Vec<Obstacle>, Vec<InitialPowerUp>) {
        let cell = Vec2::new(
            CANVAS_WIDTH / FACTORY_COLS as f32,
            CANVAS_HEIGHT / FACTORY_ROWS as f32,
        );
        let radius = cell.min_element() * 0.35;
        let mut boxes = Vec::new();
        let mut loot = Vec::new();

        for r in 0..FACTORY_ROWS {
            for c in 0..FACTORY_COLS {
                if (r == 2 || r == 3) && (c == 2 || c == 3) {
                    continue;
                }
                let pos = Vec2::new(c as f32 + 0.5, r as f32 + 0.5) * cell;
                if self.rng.random_bool(0.6) {
                    boxes.push(Obstacle::new(format!("box-{r}-{c}"), pos, radius, OBS_BOX_COLOR));
                } else if self.rng.random_bool(0.4) {
                    let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
                    loot.push(InitialPowerUp { pos, kind });
                }
            }
        }
        (boxes, loot)
    }

    /// Scattered trees, rocks and snowbanks that neither overlap each other
    /// nor crowd the player spawn
    fn field_obstacles(&mut self, level: u32, count: u32) -> Vec<Obstacle> {
        let center = canvas_center();
        let mut obstacles: Vec<Obstacle> = Vec::new();

        for i in 0..count {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let roll = self.rng.random::<f32>();
                let color = if roll > 0.6 {
                    OBS_TREE_COLOR
                } else if roll > 0.3 {
                    OBS_ROCK_COLOR
                } else {
                    OBS_SNOW_COLOR
                };
                let radius = self.rng.random_range(20.0..60.0);
                let pos = Vec2::new(
                    self.rng.random_range(radius..CANVAS_WIDTH - radius),
                    self.rng.random_range(radius..CANVAS_HEIGHT - radius),
                );

                if pos.distance(center) < SPAWN_CLEARANCE + radius {
                    continue;
                }
                if obstacles
                    .iter()
                    .any(|o| pos.distance(o.pos) < radius + o.radius)
                {
                    continue;
                }
                obstacles.push(Obstacle::new(format!("obs-{level}-{i}"), pos, radius, color));
                break;
            }
        }
        obstacles
    }

    fn ice_patches(&mut self, level: u32, count: u32) -> Vec<IcePatch> {
        (0..count)
            .map(|i| {
                let radius_x = self.rng.random_range(30.0..80.0);
                let radius_y = self.rng.random_range(30.0..80.0);
                IcePatch {
                    id: format!("ice-{level}-{i}"),
                    pos: Vec2::new(
                        self.rng.random_range(radius_x..CANVAS_WIDTH - radius_x),
                        self.rng.random_range(radius_y..CANVAS_HEIGHT - radius_y),
                    ),
                    radius_x,
                    radius_y,
                    rotation: self.rng.random_range(0.0..std::f32::consts::PI),
                }
            })
            .collect()
    }
}

impl LevelSource for ProceduralLevels {
    fn generate(&mut self, level: u32, offensive_powerups: usize) -> Result<LevelConfig, LevelLoadError> {
        if level == 0 {
            return Err(LevelLoadError::Invalid {
                level,
                reason: "levels are numbered from 1".into(),
            });
        }

        let boss = is_boss_level(level);
        let mut theme_name = THEMES[level as usize % THEMES.len()].to_string();
        let mut description = DESCRIPTIONS[level as usize % DESCRIPTIONS.len()].to_string();
        let (obstacles, ice_patches, initial_powerups) = if is_factory_level(level) {
            theme_name = "Toy Factory".into();
            description = "Navigate the maze and grab the loot!".into();
            let (boxes, loot) = self.factory_layout();
            (boxes, Vec::new(), loot)
        } else {
            let count = if boss {
                self.rng.random_range(2..=5)
            } else {
                self.rng.random_range(6..=12)
            };
            let obstacles = self.field_obstacles(level, count);
            let ice = self.rng.random_range(1..=4);
            (obstacles, self.ice_patches(level, ice), Vec::new())
        };

        let mut boss_message = None;
        if boss {
            let (theme, blurb, taunt) = boss_flavour(level);
            if let Some(theme) = theme {
                theme_name = theme.into();
            }
            description = blurb.into();
            boss_message = Some(taunt.to_string());
        }

        let config = LevelConfig {
            level_number: level,
            theme_name,
            description,
            obstacles,
            ice_patches,
            initial_powerups,
            enemy_spawn_interval_ms: spawn_interval_ms(level, offensive_powerups),
            enemy_speed_multiplier: speed_multiplier(level),
            boss_message,
            enemy_composition: self.composition(level),
            is_boss_level: boss,
        };

        log::info!(
            "Generated level {}: {} ({:?}, {} obstacles, {} loot)",
            level,
            config.theme_name,
            config.enemy_composition,
            config.obstacles.len(),
            config.initial_powerups.len()
        );
        Ok(config)
    }

    fn game_over_message(&mut self, _score: u64, _level: u32) -> String {
        GAME_OVER_LINES[self.rng.random_range(0..GAME_OVER_LINES.len())].to_string()
    }
}
