//! Axis-aligned integer rectangles and bounding-box derivation

use glam::{Affine2, Vec2};

/// Axis-aligned rectangle in integer pixel space.
///
/// `right()` and `bottom()` are exclusive pixel edges: a rectangle at x = 0
/// with width 10 covers columns 0..10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build from edges (right/bottom exclusive)
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Closed-interval overlap test: rectangles sharing only an edge intersect
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    /// Shared pixel region, or `None` when no pixel is covered by both
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        let overlap = Rect::from_edges(left, top, right, bottom);
        (!overlap.is_empty()).then_some(overlap)
    }
}

/// Slack absorbed before truncating the corner extent
const EXTENT_SNAP: f32 = 1e-3;

/// Bounding rectangle of a `width` x `height` pixel quad placed by `transform`.
///
/// The top-left edge is the min corner truncated toward zero. The size is the
/// truncated corner extent, so a translated texture keeps its dimensions on
/// either side of the origin.
pub fn compute(transform: &Affine2, width: u32, height: u32) -> Rect {
    let (w, h) = (width as f32, height as f32);
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(0.0, h),
        Vec2::new(w, h),
    ]
    .map(|corner| transform.transform_point2(corner));

    let (min, max) = corners[1..]
        .iter()
        .fold((corners[0], corners[0]), |(min, max), &p| (min.min(p), max.max(p)));

    let extent = max - min + Vec2::splat(EXTENT_SNAP);
    Rect::new(min.x as i32, min.y as i32, extent.x as i32, extent.y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::transform;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_unrotated_bounds_match_texture() {
        let t = transform::compute(Vec2::new(100.0, 40.0), 0.0, 1.0, Vec2::ZERO);
        assert_eq!(compute(&t, 32, 16), Rect::new(100, 40, 32, 16));
    }

    #[test]
    fn test_quarter_turn_swaps_extent() {
        let origin = Vec2::new(16.0, 8.0);
        let t = transform::compute(Vec2::new(100.0, 100.0), FRAC_PI_2, 1.0, origin);
        let r = compute(&t, 32, 16);
        assert!((r.width - 16).abs() <= 1);
        assert!((r.height - 32).abs() <= 1);
    }

    #[test]
    fn test_rotated_bounds_enclose_corners() {
        let t = transform::compute(Vec2::new(50.0, 50.0), FRAC_PI_4, 2.0, Vec2::new(5.0, 5.0));
        let r = compute(&t, 10, 10);
        for corner in [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), Vec2::splat(10.0)] {
            let p = t.transform_point2(corner);
            assert!(p.x >= r.left() as f32 - 1.0 && p.x <= r.right() as f32 + 1.0);
            assert!(p.y >= r.top() as f32 - 1.0 && p.y <= r.bottom() as f32 + 1.0);
        }
    }

    #[test]
    fn test_truncation_not_rounding() {
        let t = transform::compute(Vec2::new(10.9, 20.9), 0.0, 1.0, Vec2::ZERO);
        assert_eq!(compute(&t, 4, 4), Rect::new(10, 20, 4, 4));
    }

    #[test]
    fn test_intersects_closed_on_shared_edge() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(a.intersects(&b));
        // Touching rectangles share no pixels
        assert_eq!(a.intersection(&b), None);
        assert!(!a.intersects(&Rect::new(11, 0, 5, 5)));
    }

    #[test]
    fn test_intersection_region() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 3, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 3, 5, 7)));
    }

    #[test]
    fn test_negative_fraction_keeps_texture_size() {
        let t = transform::compute(Vec2::new(-3.5, 5.0), 0.0, 1.0, Vec2::ZERO);
        assert_eq!(compute(&t, 10, 10), Rect::new(-3, 5, 10, 10));

        let t = transform::compute(Vec2::new(7.25, -0.75), 0.0, 1.0, Vec2::ZERO);
        assert_eq!(compute(&t, 6, 4), Rect::new(7, 0, 6, 4));
    }
}
