//! 2D boxes and the rotated-box bounding transform

use core::ops::{Add, Sub};

use crate::dispatch::Dispatcher;

/// 2D point or extent
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotate by `angle` radians about `origin`
    pub fn rotated_about(self, angle: f32, origin: Vec2) -> Self {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Self::new(cos * dx - sin * dy + origin.x, cos * dy + sin * dx + origin.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline] fn add(self, rhs: Self) -> Self { Self::new(self.x + rhs.x, self.y + rhs.y) }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline] fn sub(self, rhs: Self) -> Self { Self::new(self.x - rhs.x, self.y - rhs.y) }
}

/// Axis-aligned 2D box, y pointing up
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Box2 {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Box2 {
    /// Unit square centred on the origin
    pub const UNIT_CENTERED: Self = Self::new(-0.5, -0.5, 0.5, 0.5);

    #[inline]
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self { left, bottom, right, top }
    }

    /// Create from two corners
    #[inline]
    pub fn from_corners(bottom_left: Vec2, top_right: Vec2) -> Self {
        Self::new(bottom_left.x, bottom_left.y, top_right.x, top_right.y)
    }

    /// Create from the bottom-left corner and a size
    #[inline]
    pub fn from_dimensions(bottom_left: Vec2, size: Vec2) -> Self {
        Self::new(
            bottom_left.x,
            bottom_left.y,
            bottom_left.x + size.x,
            bottom_left.y + size.y,
        )
    }

    /// Create a box of `size` centred on `center`
    #[inline]
    pub fn centered_around(center: Vec2, size: Vec2) -> Self {
        let half = Vec2::new(size.x * 0.5, size.y * 0.5);
        Self::from_corners(center - half, center + half)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.bottom + self.top) * 0.5)
    }

    #[inline]
    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left, self.bottom)
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right, self.bottom)
    }

    #[inline]
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right, self.top)
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Check if a point is inside (edges included)
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right &&
        point.y >= self.bottom && point.y <= self.top
    }

    /// Smallest box containing both
    #[inline]
    pub fn union(&self, other: &Box2) -> Self {
        Self::new(
            self.left.min(other.left),
            self.bottom.min(other.bottom),
            self.right.max(other.right),
            self.top.max(other.top),
        )
    }

    /// Move by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(
            self.left + offset.x,
            self.bottom + offset.y,
            self.right + offset.x,
            self.top + offset.y,
        )
    }
}

/// A [`Box2`] rotated by an angle about an origin
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Box2Rotated {
    /// The box before rotation
    pub bounds: Box2,
    /// Counter-clockwise rotation in radians
    pub rotation: f32,
    /// Point the box rotates about
    pub origin: Vec2,
}

impl Box2Rotated {
    #[inline]
    pub const fn new(bounds: Box2, rotation: f32, origin: Vec2) -> Self {
        Self { bounds, rotation, origin }
    }

    /// Rotate about the box's own centre
    #[inline]
    pub fn about_center(bounds: Box2, rotation: f32) -> Self {
        Self::new(bounds, rotation, bounds.center())
    }

    /// Corners after rotation: bottom-left, bottom-right, top-right, top-left
    pub fn corners(&self) -> [Vec2; 4] {
        let b = &self.bounds;
        [b.bottom_left(), b.bottom_right(), b.top_right(), b.top_left()]
            .map(|corner| corner.rotated_about(self.rotation, self.origin))
    }

    /// Axis-aligned box enclosing the rotated box, using the process-wide dispatcher
    pub fn calc_bounding_box(&self) -> Box2 {
        self.calc_bounding_box_with(Dispatcher::global())
    }

    /// Axis-aligned box enclosing the rotated box.
    ///
    /// All four corners go through one 4-lane transform followed by a
    /// horizontal min/max, or through the scalar loop when no 128-bit path is
    /// available. Paths agree within float tolerance, not bit for bit: vector
    /// paths may fuse multiply-adds.
    pub fn calc_bounding_box_with(&self, dispatcher: &Dispatcher) -> Box2 {
        let b = &self.bounds;
        let (sin, cos) = self.rotation.sin_cos();

        let [left, bottom, right, top] = dispatcher.rotated_bounds(
            [b.left, b.right, b.right, b.left],
            [b.bottom, b.bottom, b.top, b.top],
            cos,
            sin,
            (self.origin.x, self.origin.y),
        );

        Box2::new(left, bottom, right, top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_box_eq(a: Box2, b: Box2, epsilon: f32) {
        assert_relative_eq!(a.left, b.left, epsilon = epsilon);
        assert_relative_eq!(a.bottom, b.bottom, epsilon = epsilon);
        assert_relative_eq!(a.right, b.right, epsilon = epsilon);
        assert_relative_eq!(a.top, b.top, epsilon = epsilon);
    }

    #[test]
    fn test_box_extents() {
        let b = Box2::from_dimensions(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(b, Box2::new(1.0, 2.0, 4.0, 6.0));
        assert_eq!(b.size(), Vec2::new(3.0, 4.0));
        assert_eq!(b.center(), Vec2::new(2.5, 4.0));
        assert!(b.contains_point(Vec2::new(4.0, 6.0)));
        assert!(!b.contains_point(Vec2::new(0.0, 3.0)));
    }

    #[test]
    fn test_centered_and_union() {
        let a = Box2::centered_around(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert_eq!(a, Box2::UNIT_CENTERED);

        let b = a.translated(Vec2::new(2.0, 0.0));
        assert_eq!(a.union(&b), Box2::new(-0.5, -0.5, 2.5, 0.5));
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let unit = Box2::new(0.0, 0.0, 1.0, 1.0);
        for dispatcher in [Dispatcher::scalar(), *Dispatcher::global()] {
            let rotated = Box2Rotated::about_center(unit, 0.0);
            assert_box_eq(rotated.calc_bounding_box_with(&dispatcher), unit, 1e-6);

            let rotated = Box2Rotated::new(unit, 0.0, Vec2::ZERO);
            assert_box_eq(rotated.calc_bounding_box_with(&dispatcher), unit, 1e-6);
        }
    }

    #[test]
    fn test_quarter_turn_swaps_extents() {
        let b = Box2::new(0.0, 0.0, 4.0, 2.0);
        let rotated = Box2Rotated::about_center(b, FRAC_PI_2).calc_bounding_box();

        assert_relative_eq!(rotated.width(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.height(), 4.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.center().x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.center().y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_half_turn_about_origin() {
        let b = Box2::new(1.0, 1.0, 2.0, 3.0);
        let rotated = Box2Rotated::new(b, PI, Vec2::ZERO).calc_bounding_box();
        assert_box_eq(rotated, Box2::new(-2.0, -3.0, -1.0, -1.0), 1e-5);
    }

    #[test]
    fn test_eighth_turn_grows_square() {
        let rotated = Box2Rotated::new(Box2::UNIT_CENTERED, FRAC_PI_4, Vec2::ZERO);
        let half_diagonal = 0.5 * 2.0f32.sqrt();
        assert_box_eq(
            rotated.calc_bounding_box(),
            Box2::new(-half_diagonal, -half_diagonal, half_diagonal, half_diagonal),
            1e-5,
        );
    }

    #[test]
    fn test_bounds_contain_corners() {
        let rotated = Box2Rotated::new(Box2::new(-1.0, 0.5, 3.0, 2.0), 0.7, Vec2::new(0.3, -0.2));
        let bounds = rotated.calc_bounding_box();
        let grown = Box2::new(bounds.left - 1e-5, bounds.bottom - 1e-5, bounds.right + 1e-5, bounds.top + 1e-5);
        for corner in rotated.corners() {
            assert!(grown.contains_point(corner), "{corner:?} outside {bounds:?}");
        }
    }
}
