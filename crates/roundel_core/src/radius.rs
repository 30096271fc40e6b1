//! Corner radii for rounded quads
//!
//! A [`Radius`] is an elliptical corner radius expressed as a pair of [`Dim`]s,
//! so pixel and proportional radii share one representation. A
//! [`BorderRadius`] holds one radius per corner.
//!
//! The scale channel of a radius is relative to the owning quad's half-extent:
//! `Radius::circular_scale(1.0)` rounds a corner all the way to the box midline.

use std::fmt;

use crate::dim::{Dim, Dim2};
use crate::geometry::Vec2;

/// Elliptical corner radius
///
/// Both channels of both axes are floored at zero on construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Radius {
    x: Dim,
    y: Dim,
}

fn non_negative(d: Dim) -> Dim {
    d.max(Dim::ZERO)
}

impl Radius {
    pub const ZERO: Radius = Radius {
        x: Dim::ZERO,
        y: Dim::ZERO,
    };

    /// Elliptical radius with independent horizontal and vertical extents
    pub fn elliptical(radii: Dim2) -> Self {
        Self {
            x: non_negative(radii.x),
            y: non_negative(radii.y),
        }
    }

    /// Circular radius (equal on both axes)
    pub fn circular(r: Dim) -> Self {
        let r = non_negative(r);
        Self { x: r, y: r }
    }

    pub fn elliptical_pixels(x: f32, y: f32) -> Self {
        Self::elliptical(Dim2::from_pixels(x, y))
    }

    pub fn elliptical_scale(x: f32, y: f32) -> Self {
        Self::elliptical(Dim2::from_scale(x, y))
    }

    pub fn circular_pixels(r: f32) -> Self {
        Self::circular(Dim::from_pixels(r))
    }

    pub fn circular_scale(r: f32) -> Self {
        Self::circular(Dim::from_scale(r))
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Horizontal radius
    pub fn x(&self) -> Dim {
        self.x
    }

    /// Vertical radius
    pub fn y(&self) -> Dim {
        self.y
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Resolve to pixels against the quad's half-extent
    pub fn resolve_pixels(&self, extent: Vec2) -> Vec2 {
        Vec2::new(self.x.to_pixels(extent.x), self.y.to_pixels(extent.y))
    }

    /// Resolve to fractions of the quad's half-extent
    pub fn resolve_scale(&self, extent: Vec2) -> Vec2 {
        Vec2::new(self.x.to_scale(extent.x), self.y.to_scale(extent.y))
    }

    /// Equivalent radius carried only in the pixel channel
    pub fn to_pixels(&self, extent: Vec2) -> Radius {
        let px = self.resolve_pixels(extent);
        Radius::elliptical_pixels(px.x, px.y)
    }

    /// Equivalent radius carried only in the scale channel
    pub fn to_scale(&self, extent: Vec2) -> Radius {
        let sc = self.resolve_scale(extent);
        Radius::elliptical_scale(sc.x, sc.y)
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={}, y={})", self.x, self.y)
    }
}

/// Per-corner border radius
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BorderRadius {
    pub top_left: Radius,
    pub top_right: Radius,
    pub bottom_left: Radius,
    pub bottom_right: Radius,
}

impl BorderRadius {
    pub const ZERO: BorderRadius = BorderRadius {
        top_left: Radius::ZERO,
        top_right: Radius::ZERO,
        bottom_left: Radius::ZERO,
        bottom_right: Radius::ZERO,
    };

    /// Order: top_left, top_right, bottom_left, bottom_right
    pub fn new(
        top_left: Radius,
        top_right: Radius,
        bottom_left: Radius,
        bottom_right: Radius,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Same radius on all four corners
    pub fn all(radius: Radius) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    /// Circular radius on all four corners
    pub fn circular(radius: Dim) -> Self {
        Self::all(Radius::circular(radius))
    }

    pub fn circular_pixels(radius: f32) -> Self {
        Self::all(Radius::circular_pixels(radius))
    }

    pub fn circular_scale(radius: f32) -> Self {
        Self::all(Radius::circular_scale(radius))
    }

    /// `left` on both left corners, `right` on both right corners
    pub fn horizontal(left: Radius, right: Radius) -> Self {
        Self::new(left, right, left, right)
    }

    /// `top` on both top corners, `bottom` on both bottom corners
    pub fn vertical(top: Radius, bottom: Radius) -> Self {
        Self::new(top, top, bottom, bottom)
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub fn with_top_left(mut self, radius: Radius) -> Self {
        self.top_left = radius;
        self
    }

    pub fn with_top_right(mut self, radius: Radius) -> Self {
        self.top_right = radius;
        self
    }

    pub fn with_bottom_left(mut self, radius: Radius) -> Self {
        self.bottom_left = radius;
        self
    }

    pub fn with_bottom_right(mut self, radius: Radius) -> Self {
        self.bottom_right = radius;
        self
    }

    /// Corners in `[top_left, top_right, bottom_left, bottom_right]` order
    pub fn corners(&self) -> [Radius; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    fn map(&self, f: impl Fn(&Radius) -> Radius) -> Self {
        Self::new(
            f(&self.top_left),
            f(&self.top_right),
            f(&self.bottom_left),
            f(&self.bottom_right),
        )
    }

    pub fn to_pixels(&self, extent: Vec2) -> Self {
        self.map(|r| r.to_pixels(extent))
    }

    pub fn to_scale(&self, extent: Vec2) -> Self {
        self.map(|r| r.to_scale(extent))
    }
}

impl fmt::Display for BorderRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(TL={}, TR={}, BL={}, BR={})",
            self.top_left, self.top_right, self.bottom_left, self.bottom_right
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_constructors_floor_at_zero() {
        let r = Radius::elliptical(Dim2::from_parts(-4.0, 0.3, 6.0, -0.2));
        assert_eq!(r.x(), Dim::new(0.0, 0.3));
        assert_eq!(r.y(), Dim::new(6.0, 0.0));

        let c = Radius::circular_pixels(-10.0);
        assert!(c.is_zero());
    }

    #[test]
    fn test_scale_round_trip() {
        let extent = Vec2::new(320.0, 75.0);
        let original = Radius::elliptical_scale(0.3, 0.8);
        let back = original.to_pixels(extent).to_scale(extent);
        assert!((back.x().scale - 0.3).abs() < EPS);
        assert!((back.y().scale - 0.8).abs() < EPS);
        assert_eq!(back.x().pixels, 0.0);
    }

    #[test]
    fn test_mixed_radius_resolves_additively() {
        let r = Radius::elliptical(Dim2::from_parts(10.0, 0.5, 0.0, 0.25));
        let px = r.resolve_pixels(Vec2::new(100.0, 40.0));
        assert_eq!(px, Vec2::new(60.0, 10.0));
    }

    #[test]
    fn test_factories() {
        let a = Radius::circular_pixels(4.0);
        let b = Radius::circular_pixels(8.0);

        let h = BorderRadius::horizontal(a, b);
        assert_eq!(h.corners(), [a, b, a, b]);

        let v = BorderRadius::vertical(a, b);
        assert_eq!(v.corners(), [a, a, b, b]);

        let single = BorderRadius::zero().with_bottom_right(b);
        assert_eq!(single.corners(), [Radius::ZERO, Radius::ZERO, Radius::ZERO, b]);

        assert_eq!(BorderRadius::circular_pixels(4.0), BorderRadius::all(a));
    }
}
