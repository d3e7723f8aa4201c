//! Axis-aligned bounding boxes in screen space.
//!
//! Coordinates follow the screen convention: `x` grows to the right and `y`
//! grows downward, so `top()` is numerically smaller than `bottom()`. Every
//! box is anchored at its center, which is also where sprites are drawn.

use glam::Vec2;

/// Tolerance used wherever two edges are compared for "touching".
pub const EDGE_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center_x: f32,
    pub center_y: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Aabb {
    pub fn new(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            center_x,
            center_y,
            half_w: width / 2.0,
            half_h: height / 2.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_y)
    }

    pub fn width(&self) -> f32 {
        self.half_w * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_h * 2.0
    }

    pub fn left(&self) -> f32 {
        self.center_x - self.half_w
    }

    pub fn right(&self) -> f32 {
        self.center_x + self.half_w
    }

    pub fn top(&self) -> f32 {
        self.center_y - self.half_h
    }

    pub fn bottom(&self) -> f32 {
        self.center_y + self.half_h
    }

    /// Strict overlap test: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Move vertically so the bottom edge sits exactly on `y`.
    pub fn set_bottom(&mut self, y: f32) {
        self.center_y = y - self.half_h;
    }

    /// Change the box size while keeping its bottom edge where it was.
    pub fn resize_keep_bottom(&mut self, width: f32, height: f32) {
        let bottom = self.bottom();
        self.half_w = width / 2.0;
        self.half_h = height / 2.0;
        self.set_bottom(bottom);
    }

    /// True when the horizontal center lies strictly between the other box's
    /// left and right edges.
    pub fn center_within_x(&self, other: &Aabb) -> bool {
        self.center_x > other.left() && self.center_x < other.right()
    }
}

/// Epsilon-tolerant float equality for edge comparisons.
pub fn edges_touch(a: f32, b: f32) -> bool {
    (a - b).abs() <= EDGE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_intersect() {
        let a = Aabb::new(10.0, 10.0, 10.0, 10.0);
        let b = Aabb::new(14.0, 12.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn boxes_sharing_an_edge_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        let beside = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&beside));
    }

    #[test]
    fn edges_follow_screen_convention() {
        let a = Aabb::new(100.0, 50.0, 20.0, 40.0);
        assert_eq!(a.left(), 90.0);
        assert_eq!(a.right(), 110.0);
        assert_eq!(a.top(), 30.0);
        assert_eq!(a.bottom(), 70.0);
        assert_eq!(a.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn resize_keeps_bottom_edge() {
        let mut a = Aabb::new(0.0, 100.0, 20.0, 40.0);
        let bottom = a.bottom();
        a.resize_keep_bottom(30.0, 60.0);
        assert_eq!(a.bottom(), bottom);
        assert_eq!(a.height(), 60.0);
        assert_eq!(a.width(), 30.0);
        assert_eq!(a.center_y, 90.0);
    }

    #[test]
    fn edges_touch_tolerates_rounding() {
        assert!(edges_touch(100.0, 100.0 + EDGE_EPSILON / 2.0));
        assert!(!edges_touch(100.0, 100.1));
    }
}
