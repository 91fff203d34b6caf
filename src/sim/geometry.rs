//! Geometry helpers for circular bodies and elliptical terrain
//!
//! Everything the simulation collides is a circle, except ice patches which
//! are rotated ellipses. All helpers are pure.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Distances below this are treated as coincident points
pub const EPSILON: f32 = 1e-4;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Strict circle-circle overlap (touching circles do not overlap)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    distance(a, b) < ra + rb
}

/// Is `p` inside (or on) an ellipse centred at `center` with semi-axes
/// `rx`/`ry`, rotated by `rotation` radians?
pub fn point_in_rotated_ellipse(p: Vec2, center: Vec2, rx: f32, ry: f32, rotation: f32) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let (sin, cos) = rotation.sin_cos();
    let d = p - center;
    // Rotate into the ellipse's local frame
    let tx = cos * d.x + sin * d.y;
    let ty = -sin * d.x + cos * d.y;
    (tx * tx) / (rx * rx) + (ty * ty) / (ry * ry) <= 1.0
}

/// Unit vector pointing from `center` to `pos`, or `None` if they coincide
#[inline]
pub fn direction_from(center: Vec2, pos: Vec2) -> Option<Vec2> {
    let d = pos - center;
    let len = d.length();
    (len > EPSILON).then(|| d / len)
}

/// Position on the rim of a circle (`center`, `radius`) along the radial
/// direction of `pos`, or `None` when `pos` sits exactly on the centre
#[inline]
pub fn radial_point(center: Vec2, pos: Vec2, radius: f32) -> Option<Vec2> {
    direction_from(center, pos).map(|dir| center + dir * radius)
}

/// Rescale `v` to `len`, leaving zero vectors untouched
#[inline]
pub fn with_length(v: Vec2, len: f32) -> Vec2 {
    v.normalize_or_zero() * len
}

/// Cap the magnitude of `v` at `max`
#[inline]
pub fn clamp_length(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max && len > EPSILON {
        v * (max / len)
    } else {
        v
    }
}

/// Clamp a circle's centre so it stays fully inside the canvas
#[inline]
pub fn clamp_to_canvas(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, CANVAS_WIDTH - radius),
        pos.y.clamp(radius, CANVAS_HEIGHT - radius),
    )
}

/// Which canvas edges a circle has crossed (strictly beyond `radius` of the edge)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeCrossing {
    pub horizontal: bool,
    pub vertical: bool,
}

impl EdgeCrossing {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Edge test for a circle: a centre exactly `radius` from an edge has not crossed it
#[inline]
pub fn edge_crossing(pos: Vec2, radius: f32) -> EdgeCrossing {
    EdgeCrossing {
        horizontal: pos.x < radius || pos.x > CANVAS_WIDTH - radius,
        vertical: pos.y < radius || pos.y > CANVAS_HEIGHT - radius,
    }
}
