//! Power-ups: the inventory multiset, its effects on the player, helper
//! reconciliation, and world pickups.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Helper, HelperKind, PowerUpItem};
use super::events::GameEvent;
use super::geometry::circles_overlap;
use super::state::{SimulationState, TickContext};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerUpKind {
    RapidFire,
    TripleShot,
    Vitality,
    HelperRange,
    HelperMelee,
    Shield,
    Regen,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::RapidFire,
        PowerUpKind::TripleShot,
        PowerUpKind::Vitality,
        PowerUpKind::HelperRange,
        PowerUpKind::HelperMelee,
        PowerUpKind::Shield,
        PowerUpKind::Regen,
    ];

    /// Only vitality keeps duplicate stacks across levels
    pub fn stacks(&self) -> bool {
        *self == PowerUpKind::Vitality
    }

    /// Counts toward the difficulty signal handed to the level generator
    pub fn is_offensive(&self) -> bool {
        *self != PowerUpKind::Vitality
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::RapidFire => "RAPID_FIRE",
            PowerUpKind::TripleShot => "TRIPLE_SHOT",
            PowerUpKind::Vitality => "VITALITY",
            PowerUpKind::HelperRange => "HELPER_RANGE",
            PowerUpKind::HelperMelee => "HELPER_MELEE",
            PowerUpKind::Shield => "SHIELD",
            PowerUpKind::Regen => "REGEN",
        }
    }
}

/// Active power-ups, in acquisition order. Duplicates are allowed while a
/// level is running; [`PowerUpInventory::pruned`] collapses them between levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpInventory {
    items: Vec<PowerUpKind>,
}

impl PowerUpInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = PowerUpKind>) -> Self {
        Self {
            items: kinds.into_iter().collect(),
        }
    }

    pub fn add(&mut self, kind: PowerUpKind) {
        self.items.push(kind);
    }

    /// Remove up to `count` stacks of `kind`; returns how many were removed
    pub fn remove(&mut self, kind: PowerUpKind, count: u32) -> u32 {
        let mut removed = 0;
        while removed < count {
            match self.items.iter().position(|k| *k == kind) {
                Some(idx) => {
                    self.items.remove(idx);
                    removed += 1;
                }
                None => break,
            }
        }
        removed
    }

    pub fn count(&self, kind: PowerUpKind) -> usize {
        self.items.iter().filter(|k| **k == kind).count()
    }

    pub fn contains(&self, kind: PowerUpKind) -> bool {
        self.items.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PowerUpKind> + '_ {
        self.items.iter().copied()
    }

    /// Non-vitality stacks (difficulty signal)
    pub fn offensive_count(&self) -> usize {
        self.items.iter().filter(|k| k.is_offensive()).count()
    }

    /// Keep every vitality stack and the first copy of everything else
    pub fn pruned(&self) -> Self {
        let mut items = Vec::with_capacity(self.items.len());
        for kind in &self.items {
            if kind.stacks() || !items.contains(kind) {
                items.push(*kind);
            }
        }
        Self { items }
    }

    /// Auto-fire cooldown under this inventory
    pub fn fire_cooldown(&self, t: &Tuning) -> f64 {
        if self.contains(PowerUpKind::RapidFire) {
            t.rapid_fire_cooldown_ms
        } else {
            t.fire_cooldown_ms
        }
    }

    /// Snowballs per volley under this inventory
    pub fn shot_count(&self) -> u32 {
        if self.contains(PowerUpKind::TripleShot) { 3 } else { 1 }
    }

    /// Player max hp under this inventory
    pub fn max_hp(&self, t: &Tuning) -> u32 {
        t.player_base_hp + self.count(PowerUpKind::Vitality) as u32
    }
}

/// Helpers added/removed by a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelperDelta {
    pub spawned: u32,
    pub dropped: u32,
}

impl HelperDelta {
    pub fn is_empty(&self) -> bool {
        self.spawned == 0 && self.dropped == 0
    }
}

/// Bring the helper population in line with the inventory: one helper per
/// stacked helper power-up. Extra helpers are dropped from the back; missing
/// ones appear near the player.
pub fn reconcile_helpers(
    state: &mut SimulationState,
    inventory: &PowerUpInventory,
    t: &Tuning,
) -> HelperDelta {
    let mut delta = HelperDelta::default();

    for kind in [HelperKind::Range, HelperKind::Melee] {
        let target = inventory.count(kind.powerup());
        let mut current = state.helpers.iter().filter(|h| h.kind == kind).count();

        while current > target {
            if let Some(idx) = state.helpers.iter().rposition(|h| h.kind == kind) {
                state.helpers.remove(idx);
            }
            current -= 1;
            delta.dropped += 1;
        }

        while current < target {
            let offset = Vec2::new(
                state.rng.random_range(-25.0..25.0),
                state.rng.random_range(-25.0..25.0),
            );
            let id = state.next_entity_id();
            let pos = state.player.pos + offset;
            state.helpers.push(Helper::new(id, kind, pos, t.helper_hp));
            current += 1;
            delta.spawned += 1;
        }
    }

    if !delta.is_empty() {
        log::debug!(
            "Helpers reconciled: +{} -{} (now {})",
            delta.spawned,
            delta.dropped,
            state.helpers.len()
        );
    }
    delta
}

/// Apply an inventory change: shield buffer, vitality max hp, helpers.
/// Emits a health notification when the player's numbers moved.
pub fn apply_inventory(state: &mut SimulationState, inventory: &PowerUpInventory, t: &Tuning) {
    let before = (state.player.hp, state.player.max_hp, state.player.shield_hp);
    let player = &mut state.player;

    if inventory.contains(PowerUpKind::Shield) {
        // Full shield only on first acquisition
        if player.max_shield_hp == 0 {
            player.max_shield_hp = t.shield_max_hp;
            player.shield_hp = t.shield_max_hp;
        }
    } else {
        player.max_shield_hp = 0;
        player.shield_hp = 0;
    }

    player.max_hp = inventory.max_hp(t);
    player.hp = player.hp.min(player.max_hp);

    let after = (player.hp, player.max_hp, player.shield_hp);
    if before != after {
        state.emit_health();
    }

    reconcile_helpers(state, inventory, t);
}

/// Random world pickups (non-boss levels only)
pub fn spawn_pickups(state: &mut SimulationState, ctx: &TickContext) {
    let t = ctx.tuning;
    if ctx.level.is_boss_level || !state.rng.random_bool(t.powerup_spawn_chance) {
        return;
    }

    let mut spot = None;
    for _ in 0..t.powerup_spawn_attempts {
        let p = Vec2::new(
            state.rng.random_range(50.0..CANVAS_WIDTH - 50.0),
            state.rng.random_range(50.0..CANVAS_HEIGHT - 50.0),
        );
        let blocked = ctx
            .level
            .obstacles
            .iter()
            .any(|o| circles_overlap(p, POWERUP_SIZE, o.pos, o.radius));
        if !blocked {
            spot = Some(p);
            break;
        }
    }

    if let Some(pos) = spot {
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        let id = state.next_entity_id();
        state.items.push(PowerUpItem {
            id,
            pos,
            kind,
            created_at: ctx.now,
            persistent: false,
        });
        state.cue(SoundCue::PowerupSpawn);
    }
}

/// Collect pickups the player touches and expire stale ones
pub fn collect_pickups(state: &mut SimulationState, ctx: &TickContext) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let lifetime = ctx.tuning.powerup_lifetime_ms;

    let mut collected = Vec::new();
    state.items.retain(|item| {
        if circles_overlap(player_pos, player_radius, item.pos, POWERUP_SIZE / 2.0) {
            collected.push(item.kind);
            false
        } else {
            item.persistent || ctx.now - item.created_at <= lifetime
        }
    });

    for kind in collected {
        log::debug!("Collected {}", kind.as_str());
        state.emit(GameEvent::PowerUpGranted { kind });
        state.cue(SoundCue::PowerupCollect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelConfig;

    fn inv(kinds: &[PowerUpKind]) -> PowerUpInventory {
        PowerUpInventory::from_kinds(kinds.iter().copied())
    }

    #[test]
    fn test_remove_counts() {
        let mut i = inv(&[PowerUpKind::Shield, PowerUpKind::Vitality, PowerUpKind::Shield]);
        assert_eq!(i.remove(PowerUpKind::Shield, 1), 1);
        assert_eq!(i.count(PowerUpKind::Shield), 1);
        assert_eq!(i.remove(PowerUpKind::Regen, 2), 0);
        assert_eq!(i.remove(PowerUpKind::Shield, 5), 1);
        assert_eq!(i.len(), 1);
    }

    #[test]
    fn test_pruned_keeps_vitality_stacks() {
        let i = inv(&[
            PowerUpKind::Vitality,
            PowerUpKind::RapidFire,
            PowerUpKind::Vitality,
            PowerUpKind::RapidFire,
            PowerUpKind::HelperRange,
            PowerUpKind::HelperRange,
        ]);
        let p = i.pruned();
        assert_eq!(p.count(PowerUpKind::Vitality), 2);
        assert_eq!(p.count(PowerUpKind::RapidFire), 1);
        assert_eq!(p.count(PowerUpKind::HelperRange), 1);
        assert_eq!(p.offensive_count(), 2);
    }

    #[test]
    fn test_fire_modifiers() {
        let t = Tuning::default();
        assert_eq!(inv(&[]).fire_cooldown(&t), 400.0);
        assert_eq!(inv(&[PowerUpKind::RapidFire]).fire_cooldown(&t), 250.0);
        assert_eq!(inv(&[PowerUpKind::TripleShot]).shot_count(), 3);
        assert_eq!(inv(&[PowerUpKind::Vitality, PowerUpKind::Vitality]).max_hp(&t), 5);
    }

    #[test]
    fn test_reconcile_spawns_and_drops() {
        let t = Tuning::default();
        let mut state = SimulationState::new(7, &t);
        let two_range = inv(&[PowerUpKind::HelperRange, PowerUpKind::HelperRange, PowerUpKind::HelperMelee]);
        let d = reconcile_helpers(&mut state, &two_range, &t);
        assert_eq!(d, HelperDelta { spawned: 3, dropped: 0 });

        let again = reconcile_helpers(&mut state, &two_range, &t);
        assert!(again.is_empty());

        let one_range = inv(&[PowerUpKind::HelperRange]);
        let d = reconcile_helpers(&mut state, &one_range, &t);
        assert_eq!(d, HelperDelta { spawned: 0, dropped: 2 });
        assert_eq!(state.helpers.len(), 1);
        assert_eq!(state.helpers[0].kind, HelperKind::Range);
    }

    #[test]
    fn test_shield_granted_once() {
        let t = Tuning::default();
        let mut state = SimulationState::new(7, &t);
        let shielded = inv(&[PowerUpKind::Shield]);
        apply_inventory(&mut state, &shielded, &t);
        assert_eq!(state.player.shield_hp, 3);

        state.player.shield_hp = 1;
        apply_inventory(&mut state, &shielded, &t);
        assert_eq!(state.player.shield_hp, 1, "no refill while still held");

        apply_inventory(&mut state, &inv(&[]), &t);
        assert_eq!(state.player.shield_hp, 0);
        assert_eq!(state.player.max_shield_hp, 0);
    }

    #[test]
    fn test_collect_and_expire() {
        let t = Tuning::default();
        let level = LevelConfig::plain(1);
        let powerups = PowerUpInventory::new();
        let mut state = SimulationState::new(7, &t);
        let center = state.player.pos;
        state.items.push(PowerUpItem {
            id: 1,
            pos: center,
            kind: PowerUpKind::Regen,
            created_at: 0.0,
            persistent: false,
        });
        state.items.push(PowerUpItem {
            id: 2,
            pos: Vec2::new(50.0, 50.0),
            kind: PowerUpKind::Shield,
            created_at: 0.0,
            persistent: false,
        });
        state.items.push(PowerUpItem {
            id: 3,
            pos: Vec2::new(700.0, 50.0),
            kind: PowerUpKind::Shield,
            created_at: 0.0,
            persistent: true,
        });

        let ctx = TickContext {
            level: &level,
            tuning: &t,
            powerups: &powerups,
            now: 10_001.0,
        };
        collect_pickups(&mut state, &ctx);

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, 3);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PowerUpGranted { kind: PowerUpKind::Regen }));
        assert!(events.contains(&GameEvent::Sound(SoundCue::PowerupCollect)));
    }
}
