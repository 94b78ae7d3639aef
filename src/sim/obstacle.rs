//! Static table geometry: walls and rails
//!
//! Each obstacle is a plain record dispatched on its kind. Walls damp,
//! reflect and unstick the ball; rails only slide it along their slope.
//!
//! Straight walls unstick *before* reflecting (the push direction comes
//! from the incoming velocity, or from the ball's side of the wall when it
//! has no motion along the normal), diagonal walls reflect *before*
//! unsticking.
//! Swapping either order lets fast balls tunnel.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::rect::Rect;
use super::sdf::{circle_overlaps, reflect, sd_box, sd_segment};
use crate::consts::{RESTITUTION, UNSTICK_MARGIN};
use crate::error::{ConfigError, check_restitution};

/// Direction of a 45° piece, as seen left to right on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slope {
    /// Top-left to bottom-right
    Down,
    /// Bottom-left to top-right
    Up,
}

impl Slope {
    /// Unit direction of the bar's long axis
    fn axis(self) -> Vec2 {
        match self {
            Slope::Down => Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            Slope::Up => Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        }
    }

    /// Unit reflection normal
    fn normal(self) -> Vec2 {
        match self {
            Slope::Down => Vec2::new(-1.0, 1.0).normalize(),
            Slope::Up => Vec2::new(-1.0, -1.0).normalize(),
        }
    }

    /// Signed offset of `p` from the line through `center`
    ///
    /// Zero on the line. Down: Δy - Δx, Up: Δy + Δx.
    fn offset(self, p: Vec2, center: Vec2) -> f32 {
        let d = p - center;
        match self {
            Slope::Down => d.y - d.x,
            Slope::Up => d.y + d.x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    VerticalWall,
    HorizontalWall,
    DiagonalWall(Slope),
    Rail(Slope),
}

/// A wall or rail owned by the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Bounding box (exact for straight walls)
    pub rect: Rect,
    pub thickness: f32,
    /// Length along the long axis
    pub length: f32,
    /// Fraction of speed kept on a bounce
    pub restitution: f32,
}

impl Obstacle {
    fn new(kind: ObstacleKind, rect: Rect, thickness: f32, length: f32) -> Self {
        Self {
            kind,
            rect,
            thickness,
            length,
            restitution: RESTITUTION,
        }
    }

    /// Side of the square box around a 45° bar
    fn diagonal_extent(thickness: f32, length: f32) -> f32 {
        (thickness + length) * FRAC_1_SQRT_2
    }

    /// Vertical wall with its top-left corner at (x, y)
    pub fn vertical_wall(x: f32, y: f32, thickness: f32, length: f32) -> Self {
        let rect = Rect::new(x, y, thickness, length);
        Self::new(ObstacleKind::VerticalWall, rect, thickness, length)
    }

    /// Horizontal wall with its top-left corner at (x, y)
    pub fn horizontal_wall(x: f32, y: f32, thickness: f32, length: f32) -> Self {
        let rect = Rect::new(x, y, length, thickness);
        Self::new(ObstacleKind::HorizontalWall, rect, thickness, length)
    }

    /// Top-left to bottom-right wall, box anchored at its top-left corner
    pub fn diagonal_down(x: f32, y: f32, thickness: f32, length: f32) -> Self {
        let side = Self::diagonal_extent(thickness, length);
        let rect = Rect::new(x, y, side, side);
        Self::new(ObstacleKind::DiagonalWall(Slope::Down), rect, thickness, length)
    }

    /// Bottom-left to top-right wall, box anchored at its top-right corner
    pub fn diagonal_up(x: f32, y: f32, thickness: f32, length: f32) -> Self {
        let side = Self::diagonal_extent(thickness, length);
        let rect = Rect::from_top_right(x, y, side, side);
        Self::new(ObstacleKind::DiagonalWall(Slope::Up), rect, thickness, length)
    }

    /// Top-left to bottom-right rail, box anchored at its top-left corner
    pub fn rail_down(x: f32, y: f32, thickness: f32, length: f32) -> Self {
        let side = Self::diagonal_extent(thickness, length);
        let rect = Rect::new(x, y, side, side);
        Self::new(ObstacleKind::Rail(Slope::Down), rect, thickness, length)
    }

    /// Bottom-left to top-right rail, box anchored at its top-right corner
    pub fn rail_up(x: f32, y: f32, thickness: f32, length: f32) -> Self {
        let side = Self::diagonal_extent(thickness, length);
        let rect = Rect::from_top_right(x, y, side, side);
        Self::new(ObstacleKind::Rail(Slope::Up), rect, thickness, length)
    }

    /// Override the bounce restitution
    pub fn with_restitution(mut self, restitution: f32) -> Result<Self, ConfigError> {
        self.restitution = check_restitution(restitution)?;
        Ok(self)
    }

    pub fn is_rail(&self) -> bool {
        matches!(self.kind, ObstacleKind::Rail(_))
    }

    pub fn is_wall(&self) -> bool {
        !self.is_rail()
    }

    /// Centerline endpoints of a diagonal piece
    pub fn segment(&self) -> Option<(Vec2, Vec2)> {
        match self.kind {
            ObstacleKind::DiagonalWall(slope) | ObstacleKind::Rail(slope) => {
                let half = slope.axis() * (self.length / 2.0);
                let c = self.rect.center();
                Some((c - half, c + half))
            }
            _ => None,
        }
    }

    /// Signed distance from `p` to the obstacle's surface
    pub fn distance(&self, p: Vec2) -> f32 {
        match self.segment() {
            Some((a, b)) => sd_segment(p, a, b, self.thickness / 2.0),
            None => sd_box(p, self.rect.center(), self.rect.half_extents()),
        }
    }

    /// Shape overlap test against the ball
    pub fn detects_collision(&self, ball: &Ball) -> bool {
        circle_overlaps(ball.pos, ball.radius(), |p| self.distance(p))
    }

    /// Apply this obstacle's response to the ball
    pub fn resolve(&self, ball: &mut Ball) {
        match self.kind {
            ObstacleKind::VerticalWall => {
                self.damp(ball);
                if approaches_from_high_side(ball.vel.x, ball.pos.x, self.rect.center().x) {
                    ball.set_left(self.rect.right() + UNSTICK_MARGIN);
                } else {
                    ball.set_right(self.rect.left - UNSTICK_MARGIN);
                }
                ball.vel = reflect(ball.vel, Vec2::X);
            }
            ObstacleKind::HorizontalWall => {
                self.damp(ball);
                if approaches_from_high_side(ball.vel.y, ball.pos.y, self.rect.center().y) {
                    ball.set_top(self.rect.bottom() + UNSTICK_MARGIN);
                } else {
                    ball.set_bottom(self.rect.top - UNSTICK_MARGIN);
                }
                ball.vel = reflect(ball.vel, Vec2::Y);
            }
            ObstacleKind::DiagonalWall(slope) => {
                self.damp(ball);
                ball.vel = reflect(ball.vel, slope.normal());
                ball.pos.y += slope.offset(ball.pos, self.rect.center());
            }
            ObstacleKind::Rail(slope) => {
                // Puts the ball center back on the rail line, speed untouched
                let offset = slope.offset(ball.pos, self.rect.center());
                match slope {
                    Slope::Down => ball.pos.x += offset,
                    Slope::Up => ball.pos.x -= offset,
                }
            }
        }
    }

    #[inline]
    fn damp(&self, ball: &mut Ball) {
        ball.vel *= self.restitution;
    }

    /// Move the obstacle (calibration only)
    pub fn translate(&mut self, delta: Vec2) {
        self.rect.translate(delta);
    }
}

/// Whether the ball sits on the high-coordinate side of a straight wall
/// (right of a vertical wall, below a horizontal one)
///
/// The incoming velocity decides. With no motion along the wall normal the
/// ball keeps whichever side its center is on.
fn approaches_from_high_side(vel: f32, ball_center: f32, wall_center: f32) -> bool {
    if vel != 0.0 {
        vel < 0.0
    } else {
        ball_center > wall_center
    }
}
