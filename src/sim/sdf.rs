//! Signed distance functions for table geometry
//!
//! Every collidable shape answers "how far is this point from my surface".
//! A ball overlaps a shape when the distance at its center is below its
//! radius, which gives exact circle-vs-shape tests without pixel masks.

use glam::Vec2;

/// Signed distance to an axis-aligned box
pub fn sd_box(p: Vec2, center: Vec2, half_extents: Vec2) -> f32 {
    let d = (p - center).abs() - half_extents;
    let outside = d.max(Vec2::ZERO).length();
    let inside = d.x.max(d.y).min(0.0);
    outside + inside
}

/// Signed distance to a thick segment (a bar with rounded ends)
pub fn sd_segment(p: Vec2, a: Vec2, b: Vec2, half_thickness: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let len_sq = ba.length_squared();
    let t = if len_sq < 0.0001 {
        0.0
    } else {
        (pa.dot(ba) / len_sq).clamp(0.0, 1.0)
    };
    (pa - ba * t).length() - half_thickness
}

/// Reflect velocity off a surface with given unit normal
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Whether a circle overlaps the shape described by `sdf`
#[inline]
pub fn circle_overlaps<F>(center: Vec2, radius: f32, sdf: F) -> bool
where
    F: Fn(Vec2) -> f32,
{
    sdf(center) < radius
}
