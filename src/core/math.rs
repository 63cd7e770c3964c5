// Math utilities and helper functions

use glam::Vec2;

/// Axis-aligned rectangle in floating point pixel space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a square cell of `size` with its top-left corner at `origin`
    pub fn square(origin: Vec2, size: f32) -> Self {
        Self::new(origin.x, origin.y, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Intersection of two rectangles, `None` if they do not overlap
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_overlapping() {
        let a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let b = Rect::new(16.0, 8.0, 32.0, 32.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(16.0, 8.0, 16.0, 24.0)));
        assert_eq!(b.intersection(&a), a.intersection(&b));
    }

    #[test]
    fn test_intersection_touching_edges() {
        let a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let b = Rect::new(32.0, 0.0, 32.0, 32.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_intersection_disjoint() {
        let a = Rect::square(Vec2::ZERO, 32.0);
        let b = Rect::square(Vec2::new(100.0, 100.0), 32.0);
        assert!(a.intersection(&b).is_none());
    }
}
