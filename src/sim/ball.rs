//! The ball and its per-tick integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// The single ball on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position (pixels)
    pub pos: Vec2,
    /// Velocity (pixels/s)
    pub vel: Vec2,
    /// Bounding box size
    pub size: Vec2,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
}

impl Ball {
    pub fn new(pos: Vec2, size: f32, gravity: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(size),
            gravity,
        }
    }

    /// Collision radius of the round ball inside its box
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x.min(self.size.y) / 2.0
    }

    /// Axis-aligned bounding box
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Advance one tick: gravity first, then a pixel-rounded move
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y += self.gravity * dt;
        let displacement = self.vel * dt;
        self.pos += displacement.round();
    }

    /// Put the ball at rest at `pos`
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x + self.size.x / 2.0;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x / 2.0;
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y + self.size.y / 2.0;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y / 2.0;
    }
}
