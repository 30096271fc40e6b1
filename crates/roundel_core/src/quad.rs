//! Rounded quads and the quad tree
//!
//! Quads live in a [`QuadTree`] arena and are addressed by [`QuadId`]. Every
//! quad carries a position and size as [`Dim2`]s, resolved against a reference
//! extent: the window size for root quads, the parent's full pixel extent for
//! children.
//!
//! `size` is the half-extent of the box: the unit quad spans `[-1, 1]` on both
//! axes before the model matrix is applied. The anchor point picks which part
//! of the box `position` refers to:
//!
//! ```text
//! center = position - size * (anchor * 2 - 1)
//! ```
//!
//! so `(0, 0)` makes `position` the top-left corner, `(0.5, 0.5)` the center
//! and `(1, 1)` the bottom-right corner.
//!
//! Local matrices are cached per quad and rebuilt only when one of their
//! inputs changes. Children inherit their parent's frame (translation and
//! rotation, not scale), so child positions are relative to the parent center.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::corners::{corner_params, CornerParams};
use crate::dim::Dim2;
use crate::geometry::{Color, Mat4, Vec2};
use crate::radius::BorderRadius;

new_key_type! {
    /// Handle to a quad stored in a [`QuadTree`]
    pub struct QuadId;
}

/// Cached local transform of a quad
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    /// Reference extent the transform was resolved against
    pub reference: Vec2,
    /// Resolved half-extent in pixels
    pub half_extent: Vec2,
    /// Translation and rotation (inherited by children)
    pub frame: Mat4,
    /// `frame` followed by the half-extent scale
    pub model: Mat4,
}

/// A rounded rectangle
#[derive(Clone, Debug)]
pub struct Quad {
    position: Dim2,
    size: Dim2,
    rotation: f32,
    color: Color,
    anchor: Vec2,
    border_radius: BorderRadius,
    parent: Option<QuadId>,
    children: SmallVec<[QuadId; 4]>,
    cache: Option<LocalTransform>,
}

impl Default for Quad {
    fn default() -> Self {
        Self::new(Dim2::ZERO, Dim2::ZERO)
    }
}

impl Quad {
    /// Create a quad at `position` with half-extent `size`
    pub fn new(position: Dim2, size: Dim2) -> Self {
        Self {
            position,
            size,
            rotation: 0.0,
            color: Color::WHITE,
            anchor: Vec2::splat(0.5),
            border_radius: BorderRadius::ZERO,
            parent: None,
            children: SmallVec::new(),
            cache: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.set_rotation(radians);
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.set_anchor(anchor);
        self
    }

    pub fn with_border_radius(mut self, border_radius: BorderRadius) -> Self {
        self.border_radius = border_radius;
        self
    }

    pub fn position(&self) -> Dim2 {
        self.position
    }

    pub fn set_position(&mut self, position: Dim2) {
        if self.position != position {
            self.position = position;
            self.cache = None;
        }
    }

    pub fn size(&self) -> Dim2 {
        self.size
    }

    pub fn set_size(&mut self, size: Dim2) {
        if self.size != size {
            self.size = size;
            self.cache = None;
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, radians: f32) {
        if self.rotation != radians {
            self.rotation = radians;
            self.cache = None;
        }
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Set the anchor point, clamped to `[0, 1]` on both axes
    pub fn set_anchor(&mut self, anchor: Vec2) {
        let anchor = anchor.clamp(Vec2::ZERO, Vec2::ONE);
        if self.anchor != anchor {
            self.anchor = anchor;
            self.cache = None;
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn border_radius(&self) -> BorderRadius {
        self.border_radius
    }

    pub fn set_border_radius(&mut self, border_radius: BorderRadius) {
        self.border_radius = border_radius;
    }

    pub fn parent(&self) -> Option<QuadId> {
        self.parent
    }

    pub fn children(&self) -> &[QuadId] {
        &self.children
    }

    /// Anchor-adjusted center of the box, in pixels of the reference space
    pub fn corrected_position(&self, reference: Vec2) -> Vec2 {
        let pos = self.position.to_pixels(reference);
        let size = self.size.to_pixels(reference);
        pos - size * (self.anchor * 2.0 - Vec2::ONE)
    }

    /// Whether a cached transform exists for `reference`
    pub fn is_cached(&self, reference: Vec2) -> bool {
        matches!(self.cache, Some(c) if c.reference == reference)
    }

    /// Local transform against `reference`, rebuilt only if an input changed
    pub fn local_transform(&mut self, reference: Vec2) -> LocalTransform {
        if let Some(cache) = self.cache {
            if cache.reference == reference {
                return cache;
            }
        }

        tracing::trace!("rebuilding quad transform against {:?}", reference);
        let half_extent = self.size.to_pixels(reference);
        let center = self.corrected_position(reference);
        let frame = Mat4::translation(center.x, center.y, 0.0).mul(&Mat4::rotation_z(self.rotation));
        let model = frame.mul(&Mat4::scale(half_extent.x, half_extent.y, 1.0));

        let transform = LocalTransform {
            reference,
            half_extent,
            frame,
            model,
        };
        self.cache = Some(transform);
        transform
    }
}

/// Everything the renderer needs to draw one quad
#[derive(Clone, Copy, Debug)]
pub struct QuadDraw {
    pub id: QuadId,
    /// Unit quad (`[-1, 1]²`) to pixel space
    pub model: Mat4,
    pub color: Color,
    /// Half-extent in pixels
    pub half_extent: Vec2,
    /// Corrected corners in `[top_left, top_right, bottom_left, bottom_right]` order
    pub corners: [CornerParams; 4],
}

/// Arena of quads forming a forest of parent/child trees
#[derive(Default)]
pub struct QuadTree {
    quads: SlotMap<QuadId, Quad>,
    roots: Vec<QuadId>,
}

impl QuadTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root quad
    pub fn insert(&mut self, mut quad: Quad) -> QuadId {
        quad.parent = None;
        quad.children.clear();
        let id = self.quads.insert(quad);
        self.roots.push(id);
        id
    }

    /// Insert a quad as the last child of `parent`
    pub fn insert_child(&mut self, parent: QuadId, mut quad: Quad) -> Option<QuadId> {
        if !self.quads.contains_key(parent) {
            return None;
        }
        quad.parent = Some(parent);
        quad.children.clear();
        let id = self.quads.insert(quad);
        self.quads[parent].children.push(id);
        Some(id)
    }

    /// Move an existing quad (and its subtree) under `parent`
    ///
    /// Returns `false` if either id is unknown or the move would create a cycle.
    pub fn add_child(&mut self, parent: QuadId, child: QuadId) -> bool {
        if parent == child || !self.quads.contains_key(parent) || !self.quads.contains_key(child) {
            return false;
        }
        if self.is_ancestor(child, parent) {
            return false;
        }

        self.detach(child);
        let quad = &mut self.quads[child];
        quad.parent = Some(parent);
        quad.cache = None;
        self.quads[parent].children.push(child);
        true
    }

    fn is_ancestor(&self, ancestor: QuadId, mut node: QuadId) -> bool {
        while let Some(parent) = self.quads.get(node).and_then(|q| q.parent) {
            if parent == ancestor {
                return true;
            }
            node = parent;
        }
        false
    }

    fn detach(&mut self, id: QuadId) {
        match self.quads.get(id).and_then(|q| q.parent) {
            Some(parent) => {
                if let Some(p) = self.quads.get_mut(parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
    }

    /// Remove a quad and its whole subtree
    pub fn remove(&mut self, id: QuadId) -> Option<Quad> {
        if !self.quads.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut stack: Vec<QuadId> = self.quads[id].children.to_vec();
        while let Some(next) = stack.pop() {
            if let Some(q) = self.quads.remove(next) {
                stack.extend(q.children.iter().copied());
            }
        }
        self.quads.remove(id)
    }

    pub fn get(&self, id: QuadId) -> Option<&Quad> {
        self.quads.get(id)
    }

    pub fn get_mut(&mut self, id: QuadId) -> Option<&mut Quad> {
        self.quads.get_mut(id)
    }

    pub fn roots(&self) -> &[QuadId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
        self.roots.clear();
    }

    /// Resolve every quad for a viewport, parents before children
    pub fn draw_list(&mut self, viewport: Vec2) -> Vec<QuadDraw> {
        let mut draws = Vec::with_capacity(self.quads.len());
        let roots = self.roots.clone();
        for root in roots {
            self.collect(root, viewport, Mat4::IDENTITY, &mut draws);
        }
        draws
    }

    fn collect(&mut self, id: QuadId, reference: Vec2, parent_frame: Mat4, out: &mut Vec<QuadDraw>) {
        let Some(quad) = self.quads.get_mut(id) else {
            return;
        };

        let local = quad.local_transform(reference);
        let world_frame = parent_frame.mul(&local.frame);
        let model = parent_frame.mul(&local.model);

        out.push(QuadDraw {
            id,
            model,
            color: quad.color,
            half_extent: local.half_extent,
            corners: corner_params(&quad.border_radius, local.half_extent),
        });

        let child_reference = local.half_extent * 2.0;
        let children = quad.children.clone();
        for child in children {
            self.collect(child, child_reference, world_frame, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dim::Dim;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn test_anchor_offsets_step_by_size() {
        let base = Quad::new(Dim2::from_pixels(100.0, 100.0), Dim2::from_pixels(40.0, 20.0));
        let size = Vec2::new(40.0, 20.0);

        let tl = base.clone().with_anchor(Vec2::ZERO).corrected_position(VIEWPORT);
        let center = base.clone().with_anchor(Vec2::splat(0.5)).corrected_position(VIEWPORT);
        let br = base.with_anchor(Vec2::ONE).corrected_position(VIEWPORT);

        assert!(approx(tl - center, size));
        assert!(approx(center - br, size));
        assert!(approx(tl - br, size * 2.0));
        assert!(approx(center, Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_anchor_is_clamped() {
        let q = Quad::default().with_anchor(Vec2::new(-3.0, 7.0));
        assert_eq!(q.anchor(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_transform_cached_until_input_changes() {
        let mut q = Quad::new(Dim2::from_scale(0.5, 0.5), Dim2::from_pixels(10.0, 10.0));
        assert!(!q.is_cached(VIEWPORT));

        let first = q.local_transform(VIEWPORT);
        assert!(q.is_cached(VIEWPORT));

        // Color and radius do not touch the matrix
        q.set_color(Color::RED);
        q.set_border_radius(BorderRadius::circular_pixels(3.0));
        assert!(q.is_cached(VIEWPORT));

        q.set_rotation(1.0);
        assert!(!q.is_cached(VIEWPORT));
        let second = q.local_transform(VIEWPORT);
        assert_ne!(first.model, second.model);

        // Viewport resize invalidates as well
        assert!(!q.is_cached(Vec2::new(1024.0, 768.0)));
    }

    #[test]
    fn test_model_maps_unit_corners() {
        let mut q = Quad::new(Dim2::from_pixels(100.0, 50.0), Dim2::from_pixels(20.0, 10.0))
            .with_anchor(Vec2::ZERO);
        let t = q.local_transform(VIEWPORT);
        assert!(approx(t.model.transform_point(Vec2::new(-1.0, -1.0)), Vec2::new(100.0, 50.0)));
        assert!(approx(t.model.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(140.0, 70.0)));
    }

    #[test]
    fn test_children_follow_parent_frame() {
        let mut tree = QuadTree::new();
        let parent = tree.insert(Quad::new(
            Dim2::from_pixels(400.0, 300.0),
            Dim2::from_pixels(100.0, 50.0),
        ));
        // Child centered on the parent's right edge: 0.5 of the parent's full width
        let child = tree
            .insert_child(
                parent,
                Quad::new(
                    Dim2::new(Dim::from_scale(0.5), Dim::ZERO),
                    Dim2::from_scale(0.1, 0.1),
                ),
            )
            .unwrap();

        let draws = tree.draw_list(VIEWPORT);
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].id, parent);
        assert_eq!(draws[1].id, child);
        assert!(approx(draws[1].half_extent, Vec2::new(20.0, 10.0)));
        assert!(approx(draws[1].model.transform_point(Vec2::ZERO), Vec2::new(500.0, 300.0)));

        // Rotating the parent a half turn swings the child to the left edge
        tree.get_mut(parent).unwrap().set_rotation(std::f32::consts::PI);
        let draws = tree.draw_list(VIEWPORT);
        assert!(approx(draws[1].model.transform_point(Vec2::ZERO), Vec2::new(300.0, 300.0)));
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut tree = QuadTree::new();
        let a = tree.insert(Quad::default());
        let b = tree.insert_child(a, Quad::default()).unwrap();
        let c = tree.insert_child(b, Quad::default()).unwrap();
        let d = tree.insert(Quad::default());

        assert_eq!(tree.len(), 4);
        assert!(tree.remove(b).is_some());
        assert_eq!(tree.len(), 2);
        assert!(tree.get(c).is_none());
        assert!(tree.get(a).unwrap().children().is_empty());
        assert_eq!(tree.roots(), &[a, d]);
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let mut tree = QuadTree::new();
        let a = tree.insert(Quad::default());
        let b = tree.insert_child(a, Quad::default()).unwrap();

        assert!(!tree.add_child(b, a));
        assert!(!tree.add_child(a, a));

        let c = tree.insert(Quad::default());
        assert!(tree.add_child(b, c));
        assert_eq!(tree.roots(), &[a]);
        assert_eq!(tree.get(c).unwrap().parent(), Some(b));
    }

    #[test]
    fn test_draw_list_with_zero_sized_quads() {
        let mut tree = QuadTree::new();
        tree.insert(Quad::default());
        tree.insert(
            Quad::new(Dim2::from_pixels(100.0, 100.0), Dim2::from_pixels(50.0, 0.0))
                .with_border_radius(BorderRadius::circular_pixels(8.0)),
        );

        let draws = tree.draw_list(VIEWPORT);
        assert_eq!(draws.len(), 2);
        for draw in &draws {
            assert!(draw.corners.iter().all(|c| !c.active));
            assert!(draw
                .corners
                .iter()
                .all(|c| c.radius.x.is_finite() && c.radius.y.is_finite()));
        }
    }
}
