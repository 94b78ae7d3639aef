//! Axis-aligned rectangles in screen space
//!
//! Screen coordinates: +x right, +y down. A rectangle is anchored at its
//! top-left corner, and the edge/center setters move it without resizing,
//! which is how balls get pushed flush against walls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    pub fn from_top_right(right: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(right - width, top, width, height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size() / 2.0
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.left = center.x - self.width / 2.0;
        self.top = center.y - self.height / 2.0;
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        let x_overlap = self.right() > other.left && self.left < other.right();
        let y_overlap = self.bottom() > other.top && self.top < other.bottom();
        x_overlap && y_overlap
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.left += delta.x;
        self.top += delta.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_from_center_and_top_right() {
        let r = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.left, 90.0);
        assert_eq!(r.top, 95.0);

        let r = Rect::from_top_right(650.0, 100.0, 50.0, 50.0);
        assert_eq!(r.left, 600.0);
        assert_eq!(r.right(), 650.0);
    }

    #[test]
    fn test_overlaps_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.0, 9.0, 5.0, 5.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_set_center_keeps_size() {
        let mut r = Rect::new(0.0, 0.0, 25.0, 30.0);
        r.set_center(Vec2::new(633.0, 660.0));
        assert_eq!(r.size(), Vec2::new(25.0, 30.0));
        assert_eq!(r.center(), Vec2::new(633.0, 660.0));
    }
}
