//! Player input: held direction keys and pointer drag

use glam::Vec2;

/// Direction keys (WASD and arrows map onto these)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map a browser-style key name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Input state sampled once per tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    /// Latest pointer position
    pub pointer: Vec2,
    /// Player-minus-pointer offset captured at press, so the grab point stays put
    pub drag_offset: Vec2,
    pub pointer_down: bool,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn key_up(&mut self, key: Key) {
        self.set(key, false);
    }

    fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
        }
    }

    /// Press at `point` while the player stands at `player_pos`
    pub fn press(&mut self, point: Vec2, player_pos: Vec2) {
        self.pointer = point;
        self.drag_offset = player_pos - point;
        self.pointer_down = true;
    }

    pub fn move_to(&mut self, point: Vec2) {
        self.pointer = point;
    }

    pub fn release(&mut self) {
        self.pointer_down = false;
    }

    /// Where drag steering wants the player
    pub fn drag_target(&self) -> Vec2 {
        self.pointer + self.drag_offset
    }

    /// Unit direction from held keys, `None` when idle or cancelled out
    pub fn key_direction(&self) -> Option<Vec2> {
        let mut d = Vec2::ZERO;
        if self.up {
            d.y -= 1.0;
        }
        if self.down {
            d.y += 1.0;
        }
        if self.left {
            d.x -= 1.0;
        }
        if self.right {
            d.x += 1.0;
        }
        (d != Vec2::ZERO).then(|| d.normalize())
    }

    /// Drop everything (level load, new game)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
