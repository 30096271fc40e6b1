//! Roundel Core
//!
//! Foundational value types for the Roundel renderer:
//!
//! - **Dimensions**: [`Dim`] / [`Dim2`] lengths with independent pixel and scale channels
//! - **Border radii**: per-corner elliptical [`Radius`] values
//! - **Corner correction**: overlap-free radii and per-corner shader parameters
//! - **Quad tree**: parent/child rounded quads with cached transforms
//!
//! # Example
//!
//! ```rust
//! use roundel_core::{BorderRadius, Dim2, Quad, QuadTree, Vec2};
//!
//! let mut tree = QuadTree::new();
//! let root = tree.insert(
//!     Quad::new(Dim2::from_scale(0.5, 0.5), Dim2::from_pixels(100.0, 50.0))
//!         .with_border_radius(BorderRadius::circular_pixels(12.0)),
//! );
//!
//! let draws = tree.draw_list(Vec2::new(800.0, 600.0));
//! assert_eq!(draws[0].id, root);
//! assert_eq!(draws[0].half_extent, Vec2::new(100.0, 50.0));
//! ```

pub mod corners;
pub mod dim;
pub mod geometry;
pub mod quad;
pub mod radius;

pub use corners::{corner_params, CornerParams, CornerRadii};
pub use dim::{Dim, Dim2};
pub use geometry::{Color, Mat4, Vec2};
pub use quad::{LocalTransform, Quad, QuadDraw, QuadId, QuadTree};
pub use radius::{BorderRadius, Radius};
