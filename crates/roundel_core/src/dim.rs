//! Hybrid pixel + proportional lengths
//!
//! A [`Dim`] carries two independent channels: an absolute pixel offset and a
//! scale factor relative to some reference extent (usually the viewport or the
//! parent box). Both channels combine additively when resolved:
//!
//! ```text
//! pixels(extent) = pixels + scale * extent
//! ```
//!
//! No normalization is ever performed, so `Dim::new(10.0, 0.5)` means "half the
//! extent plus ten pixels".

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::geometry::Vec2;

/// A length with independent pixel and scale channels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dim {
    /// Absolute pixels, independent of the reference extent
    pub pixels: f32,
    /// Fraction of the reference extent (usually in [0, 1])
    pub scale: f32,
}

impl Dim {
    pub const ZERO: Dim = Dim {
        pixels: 0.0,
        scale: 0.0,
    };

    pub const fn new(pixels: f32, scale: f32) -> Self {
        Self { pixels, scale }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub const fn from_pixels(pixels: f32) -> Self {
        Self { pixels, scale: 0.0 }
    }

    pub const fn from_scale(scale: f32) -> Self {
        Self { pixels: 0.0, scale }
    }

    /// Componentwise maximum (each channel independently)
    pub fn max(self, other: Dim) -> Dim {
        Dim::new(self.pixels.max(other.pixels), self.scale.max(other.scale))
    }

    /// Componentwise minimum (each channel independently)
    pub fn min(self, other: Dim) -> Dim {
        Dim::new(self.pixels.min(other.pixels), self.scale.min(other.scale))
    }

    /// Componentwise clamp (each channel independently)
    pub fn clamp(self, min: Dim, max: Dim) -> Dim {
        self.max(min).min(max)
    }

    /// Resolve to pixels against a reference extent
    pub fn to_pixels(self, extent: f32) -> f32 {
        self.pixels + self.scale * extent
    }

    /// Resolve to a scale factor against a reference extent
    ///
    /// The extent must be nonzero.
    pub fn to_scale(self, extent: f32) -> f32 {
        debug_assert!(extent != 0.0, "Dim::to_scale with zero extent");
        self.scale + self.pixels / extent
    }
}

impl Add for Dim {
    type Output = Dim;

    fn add(self, rhs: Dim) -> Dim {
        Dim::new(self.pixels + rhs.pixels, self.scale + rhs.scale)
    }
}

impl AddAssign for Dim {
    fn add_assign(&mut self, rhs: Dim) {
        *self = *self + rhs;
    }
}

impl Neg for Dim {
    type Output = Dim;

    fn neg(self) -> Dim {
        Dim::new(-self.pixels, -self.scale)
    }
}

impl Sub for Dim {
    type Output = Dim;

    fn sub(self, rhs: Dim) -> Dim {
        self + -rhs
    }
}

impl SubAssign for Dim {
    fn sub_assign(&mut self, rhs: Dim) {
        *self += -rhs;
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}px, {}sc)", self.pixels, self.scale)
    }
}

/// A pair of independent [`Dim`]s, one per axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dim2 {
    pub x: Dim,
    pub y: Dim,
}

impl Dim2 {
    pub const ZERO: Dim2 = Dim2 {
        x: Dim::ZERO,
        y: Dim::ZERO,
    };

    pub const fn new(x: Dim, y: Dim) -> Self {
        Self { x, y }
    }

    /// Build from separate channels: `(pixels_x, scale_x, pixels_y, scale_y)`
    pub const fn from_parts(pixels_x: f32, scale_x: f32, pixels_y: f32, scale_y: f32) -> Self {
        Self {
            x: Dim::new(pixels_x, scale_x),
            y: Dim::new(pixels_y, scale_y),
        }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub const fn from_pixels(x: f32, y: f32) -> Self {
        Self {
            x: Dim::from_pixels(x),
            y: Dim::from_pixels(y),
        }
    }

    pub const fn from_scale(x: f32, y: f32) -> Self {
        Self {
            x: Dim::from_scale(x),
            y: Dim::from_scale(y),
        }
    }

    pub fn max(self, other: Dim2) -> Dim2 {
        Dim2::new(self.x.max(other.x), self.y.max(other.y))
    }

    pub fn min(self, other: Dim2) -> Dim2 {
        Dim2::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn clamp(self, min: Dim2, max: Dim2) -> Dim2 {
        Dim2::new(self.x.clamp(min.x, max.x), self.y.clamp(min.y, max.y))
    }

    /// Resolve both axes to pixels against a reference size
    pub fn to_pixels(self, extent: Vec2) -> Vec2 {
        Vec2::new(self.x.to_pixels(extent.x), self.y.to_pixels(extent.y))
    }

    /// Resolve both axes to scale against a reference size
    pub fn to_scale(self, extent: Vec2) -> Vec2 {
        Vec2::new(self.x.to_scale(extent.x), self.y.to_scale(extent.y))
    }
}

impl Add for Dim2 {
    type Output = Dim2;

    fn add(self, rhs: Dim2) -> Dim2 {
        Dim2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Dim2 {
    fn add_assign(&mut self, rhs: Dim2) {
        *self = *self + rhs;
    }
}

impl Neg for Dim2 {
    type Output = Dim2;

    fn neg(self) -> Dim2 {
        Dim2::new(-self.x, -self.y)
    }
}

impl Sub for Dim2 {
    type Output = Dim2;

    fn sub(self, rhs: Dim2) -> Dim2 {
        self + -rhs
    }
}

impl SubAssign for Dim2 {
    fn sub_assign(&mut self, rhs: Dim2) {
        *self += -rhs;
    }
}

impl From<(Dim, Dim)> for Dim2 {
    fn from((x, y): (Dim, Dim)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Dim2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_resolution_is_linear() {
        let a = Dim::new(12.0, 0.25);
        let b = Dim::new(-3.0, 0.5);
        for extent in [0.0, 1.0, 640.0, 1920.0] {
            let lhs = (a + b).to_pixels(extent);
            let rhs = a.to_pixels(extent) + b.to_pixels(extent);
            assert!((lhs - rhs).abs() < EPS, "extent {extent}: {lhs} != {rhs}");
        }
    }

    #[test]
    fn test_channels_are_not_normalized() {
        let d = Dim::new(10.0, 0.5);
        assert_eq!(d.to_pixels(200.0), 110.0);
        assert!((d.to_scale(200.0) - 0.55).abs() < EPS);
    }

    #[test]
    fn test_negation_and_subtraction() {
        let a = Dim::new(5.0, 0.2);
        assert_eq!(-a, Dim::new(-5.0, -0.2));
        assert_eq!(a - a, Dim::ZERO);

        let mut b = a;
        b -= Dim::from_pixels(5.0);
        assert_eq!(b, Dim::from_scale(0.2));
    }

    #[test]
    fn test_clamp_is_per_channel() {
        let d = Dim::new(50.0, 0.9);
        let clamped = d.clamp(Dim::new(0.0, 0.0), Dim::new(20.0, 1.0));
        assert_eq!(clamped, Dim::new(20.0, 0.9));

        assert_eq!(Dim::new(1.0, 0.8).max(Dim::new(4.0, 0.1)), Dim::new(4.0, 0.8));
        assert_eq!(Dim::new(1.0, 0.8).min(Dim::new(4.0, 0.1)), Dim::new(1.0, 0.1));
    }

    #[test]
    fn test_dim2_resolves_per_axis() {
        let d = Dim2::from_parts(10.0, 0.5, 0.0, 0.25);
        let px = d.to_pixels(Vec2::new(100.0, 400.0));
        assert_eq!(px, Vec2::new(60.0, 100.0));

        let sum = Dim2::from_pixels(1.0, 2.0) + Dim2::from_scale(0.5, 0.5);
        assert_eq!(sum, Dim2::from_parts(1.0, 0.5, 2.0, 0.5));
    }
}
