//! Corner overlap correction and per-corner shader parameters
//!
//! Radii arrive here as fractions of the quad's half-extents. Two corners that
//! share an edge must not sum past 1.0 along that edge, otherwise their
//! ellipses would cross. Offending pairs are shrunk uniformly (both axes) by
//! `1 / sum`, one edge at a time:
//!
//! | edge     | pair           |
//! |----------|----------------|
//! | left-Y   | `TL.y + BL.y`  |
//! | right-Y  | `TR.y + BR.y`  |
//! | top-X    | `TL.x + TR.x`  |
//! | bottom-X | `BL.x + BR.x`  |
//!
//! Each pass can only shrink radii, so one sweep over the four edges is enough.

use crate::geometry::Vec2;
use crate::radius::{BorderRadius, Radius};

/// Four resolved corner radii, in fractions of the quad half-extents
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

fn shrink_pair(a: &mut Vec2, b: &mut Vec2, sum: f32) {
    if sum > 1.0 {
        let div = 1.0 / sum;
        *a = *a * div;
        *b = *b * div;
    }
}

impl CornerRadii {
    /// Resolve a border radius against the quad's half-extent in pixels
    ///
    /// An axis with no extent has nothing to round, so every corner is sharp
    /// along it.
    pub fn resolve(border: &BorderRadius, half_extent: Vec2) -> Self {
        let collapsed = (half_extent.x <= 0.0, half_extent.y <= 0.0);
        let resolve = |radius: &Radius| -> Vec2 {
            let x = if collapsed.0 { 0.0 } else { radius.x().to_scale(half_extent.x) };
            let y = if collapsed.1 { 0.0 } else { radius.y().to_scale(half_extent.y) };
            Vec2::new(x, y)
        };

        Self {
            top_left: resolve(&border.top_left),
            top_right: resolve(&border.top_right),
            bottom_left: resolve(&border.bottom_left),
            bottom_right: resolve(&border.bottom_right),
        }
    }

    /// Shrink overlapping edge pairs, then clamp every component to [0, 1]
    pub fn corrected(mut self) -> Self {
        let sum = self.top_left.y + self.bottom_left.y;
        shrink_pair(&mut self.top_left, &mut self.bottom_left, sum);

        let sum = self.top_right.y + self.bottom_right.y;
        shrink_pair(&mut self.top_right, &mut self.bottom_right, sum);

        let sum = self.top_left.x + self.top_right.x;
        shrink_pair(&mut self.top_left, &mut self.top_right, sum);

        let sum = self.bottom_left.x + self.bottom_right.x;
        shrink_pair(&mut self.bottom_left, &mut self.bottom_right, sum);

        let (lo, hi) = (Vec2::ZERO, Vec2::ONE);
        self.top_left = self.top_left.clamp(lo, hi);
        self.top_right = self.top_right.clamp(lo, hi);
        self.bottom_left = self.bottom_left.clamp(lo, hi);
        self.bottom_right = self.bottom_right.clamp(lo, hi);
        self
    }

    /// Shader parameters in `[top_left, top_right, bottom_left, bottom_right]` order
    pub fn params(&self) -> [CornerParams; 4] {
        [
            CornerParams::new(self.top_left),
            CornerParams::new(self.top_right),
            CornerParams::new(self.bottom_left),
            CornerParams::new(self.bottom_right),
        ]
    }
}

/// Per-corner data consumed by the quad fragment shader
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerParams {
    /// Corrected radius (fractions of half-extent)
    pub radius: Vec2,
    /// `1 / radius²` per axis, zero when the check is inactive
    pub inv_radius_sq: Vec2,
    /// Whether the ellipse inside-test runs for this corner
    pub active: bool,
}

impl CornerParams {
    pub fn new(radius: Vec2) -> Self {
        // A zero component on either axis means a sharp corner
        if radius.x * radius.y > 0.0 {
            Self {
                radius,
                inv_radius_sq: Vec2::new(
                    1.0 / (radius.x * radius.x),
                    1.0 / (radius.y * radius.y),
                ),
                active: true,
            }
        } else {
            Self {
                radius,
                inv_radius_sq: Vec2::ZERO,
                active: false,
            }
        }
    }
}

/// Resolve, correct and pack the corners of a quad in one step
pub fn corner_params(border: &BorderRadius, half_extent: Vec2) -> [CornerParams; 4] {
    CornerRadii::resolve(border, half_extent).corrected().params()
}
