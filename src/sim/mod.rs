//! Per-frame simulation module
//!
//! All gameplay logic lives here. The tick is deterministic given its inputs:
//! - Time comes in as a caller-supplied millisecond stamp
//! - Randomness comes from the seeded RNG in [`SimulationState`]
//! - Entity lists keep insertion order
//! - No rendering, audio or platform dependencies; sounds are emitted as cues

pub mod combat;
pub mod enemy;
pub mod engine;
pub mod entity;
pub mod events;
pub mod geometry;
pub mod helper;
pub mod input;
pub mod level;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod spawn;
pub mod state;

pub use engine::Engine;
pub use entity::{
    Enemy, EnemyBehavior, EnemyKind, EntityId, Helper, HelperKind, IcePatch, Obstacle, ObstacleMaterial, Player,
    PowerUpItem, Projectile, ProjectileKind,
};
pub use events::GameEvent;
pub use input::{InputState, Key};
pub use level::{EnemyComposition, InitialPowerUp, LevelConfig};
pub use powerup::{PowerUpInventory, PowerUpKind};
pub use state::{GamePhase, SimulationState, TickContext};
