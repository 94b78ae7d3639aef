//! Flippers
//!
//! A flipper has two poses and no velocity memory. Engaging it while the
//! ball touches the bar kicks the ball upward once; the kick re-arms only
//! after the ball has left the bar.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::rect::Rect;
use super::sdf::{circle_overlaps, sd_segment};
use crate::settings::Settings;

/// Bar pivot and tip inside the flipper box, as fractions of the box size
/// (left flipper, resting pose)
const PIVOT: Vec2 = Vec2::new(0.15, 0.3);
const TIP: Vec2 = Vec2::new(0.75, 0.7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipperSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flipper {
    pub side: FlipperSide,
    /// Box the bar lives in
    pub rect: Rect,
    pub thickness: f32,
    /// Upward speed given on a hit
    pub impulse: f32,
    /// Sideways speed added on a hit
    pub kick: f32,
    /// Activated pose (bar tip raised)
    pub engaged: bool,
    /// Set once a hit lands; cleared when the ball leaves the bar
    contact_latched: bool,
}

impl Flipper {
    /// Flipper whose box has its left edge at `x` and vertical center at `y`
    pub fn new(side: FlipperSide, x: f32, y: f32, settings: &Settings) -> Self {
        let size = settings.flipper_size;
        Self {
            side,
            rect: Rect::new(x, y - size / 2.0, size, size),
            thickness: settings.flipper_thickness,
            impulse: settings.flipper_impulse,
            kick: settings.flipper_kick,
            engaged: false,
            contact_latched: false,
        }
    }

    /// Bar endpoints (pivot, tip) in the current pose
    pub fn bar(&self) -> (Vec2, Vec2) {
        let place = |frac: Vec2| {
            let mut f = frac;
            if self.side == FlipperSide::Right {
                f.x = 1.0 - f.x;
            }
            if self.engaged {
                f.y = 1.0 - f.y;
            }
            Vec2::new(self.rect.left, self.rect.top) + f * self.rect.size()
        };
        (place(PIVOT), place(TIP))
    }

    pub fn touches(&self, ball: &Ball) -> bool {
        let (pivot, tip) = self.bar();
        circle_overlaps(ball.pos, ball.radius(), |p| {
            sd_segment(p, pivot, tip, self.thickness / 2.0)
        })
    }

    /// Raise the flipper. Returns true if the ball was hit.
    pub fn engage(&mut self, ball: &mut Ball) -> bool {
        let hit = !self.contact_latched && self.touches(ball);
        if hit {
            self.strike(ball);
            self.contact_latched = true;
            log::debug!("{:?} flipper hit, ball vel {:?}", self.side, ball.vel);
        }
        self.engaged = true;
        hit
    }

    /// Lower the flipper. The ball is left alone.
    pub fn disengage(&mut self) {
        self.engaged = false;
    }

    /// Re-arm the hit once the ball is clear of the bar (call every tick)
    pub fn track_contact(&mut self, ball: &Ball) {
        if self.contact_latched && !self.touches(ball) {
            self.contact_latched = false;
        }
    }

    /// Back to resting pose, hit armed
    pub fn reset(&mut self) {
        self.engaged = false;
        self.contact_latched = false;
    }

    pub fn is_latched(&self) -> bool {
        self.contact_latched
    }

    fn strike(&self, ball: &mut Ball) {
        // Push away from the flipper center on the left, toward it on the right
        let outward = ball.pos.x > self.rect.center().x;
        let push = match (self.side, outward) {
            (FlipperSide::Left, true) | (FlipperSide::Right, false) => self.kick,
            (FlipperSide::Left, false) | (FlipperSide::Right, true) => -self.kick,
        };
        ball.vel.x += push;
        ball.vel.y = -self.impulse;
    }
}
