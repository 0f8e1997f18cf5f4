//! Axis-aligned rectangles on the ground plane.
//!
//! The ground plane has two horizontal axes: `x` runs along a rectangle's
//! width and `y` along its length. Height is a separate, vertical quantity.

use glam::Vec2;

/// Tolerance used by the overlap and containment tests, in world units.
pub const RECT_EPSILON: f32 = 1e-3;

/// An axis-aligned rectangle anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub length: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, length: f32) -> Self {
        Self {
            x,
            y,
            width,
            length,
        }
    }

    /// A square with edge `size` anchored at `(x, y)`.
    pub const fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    /// Minimum (reference) corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Corner opposite the origin.
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.length)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.length)
    }

    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() * 0.5
    }

    /// Length of the shorter edge. Negative when the rectangle is degenerate.
    pub fn min_edge(&self) -> f32 {
        self.width.min(self.length)
    }

    /// Area, treating negative extents as empty.
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.length.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.length <= 0.0
    }

    /// True if `other` lies inside `self` (edges may touch).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let (min, max) = (self.origin(), self.max());
        let (other_min, other_max) = (other.origin(), other.max());
        other_min.x >= min.x - RECT_EPSILON
            && other_min.y >= min.y - RECT_EPSILON
            && other_max.x <= max.x + RECT_EPSILON
            && other_max.y <= max.y + RECT_EPSILON
    }

    /// Overlapping region of two rectangles, if it has positive area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.origin().max(other.origin());
        let max = self.max().min(other.max());
        let size = max - min;
        if size.x > 0.0 && size.y > 0.0 {
            Some(Rect::new(min.x, min.y, size.x, size.y))
        } else {
            None
        }
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let min = self.origin().min(other.origin());
        let max = self.max().max(other.max());
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// True if the interiors overlap by more than [`RECT_EPSILON`] on both axes.
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.intersection(other)
            .is_some_and(|r| r.width > RECT_EPSILON && r.length > RECT_EPSILON)
    }
}
