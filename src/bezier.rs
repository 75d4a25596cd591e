//! Permanent link curves anchored to their endpoint nodes.
//!
//! A curve never stores free-standing geometry: its four control points are rebuilt from
//! the endpoint nodes' positions plus two fixed corner-relative offsets whenever either
//! endpoint moves.

use crate::constants::{CURVE_CONTROL_OFFSET, MAX_BEZIERS};
use crate::error::EditorError;
use crate::store::NodeStore;
use crate::types::NodeRef;
use egui::{vec2, Pos2, Vec2};

/// Cubic curve points for a link running from `start` to `end`: start, control 1 to the
/// right of the start, control 2 to the left of the end, end.
pub fn control_points(start: Pos2, end: Pos2) -> [Pos2; 4] {
    [
        start,
        start + vec2(CURVE_CONTROL_OFFSET, 0.0),
        end - vec2(CURVE_CONTROL_OFFSET, 0.0),
        end,
    ]
}

/// The visual path of a completed link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCurve {
    /// Start, control 1, control 2, end
    pub points: [Pos2; 4],
    /// Start relative to the from-node's corner, end relative to the to-node's corner
    pub offsets: [Vec2; 2],
    /// Node owning the output end
    pub from: NodeRef,
    /// Node owning the input end
    pub to: NodeRef,
}

impl BezierCurve {
    /// Creates a curve whose ends sit at `start` and `end`, remembering where they lie
    /// relative to the endpoint nodes' top-left corners.
    ///
    /// # Arguments
    ///
    /// * `from` / `from_corner` - The origin node and its current position
    /// * `to` / `to_corner` - The target node and its current position
    /// * `start` / `end` - Absolute curve endpoints at creation time
    pub fn anchored(
        from: NodeRef,
        from_corner: Pos2,
        to: NodeRef,
        to_corner: Pos2,
        start: Pos2,
        end: Pos2,
    ) -> Self {
        let mut curve = Self {
            points: [start, start, end, end],
            offsets: [start - from_corner, end - to_corner],
            from,
            to,
        };
        curve.refresh(from_corner, to_corner);
        curve
    }

    /// Rebuilds the absolute points from the endpoint nodes' current corners.
    pub fn refresh(&mut self, from_corner: Pos2, to_corner: Pos2) {
        self.points = control_points(from_corner + self.offsets[0], to_corner + self.offsets[1]);
    }

    /// Returns true if either endpoint is `node`.
    pub fn involves(&self, node: NodeRef) -> bool {
        self.from == node || self.to == node
    }
}

/// Bounded, gap-free list of permanent curves.
#[derive(Debug, Clone)]
pub struct BezierRegistry {
    curves: Vec<BezierCurve>,
    capacity: usize,
}

impl Default for BezierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BezierRegistry {
    /// Creates an empty registry holding up to [`MAX_BEZIERS`] curves.
    pub fn new() -> Self {
        Self::with_capacity(MAX_BEZIERS)
    }

    /// Creates an empty registry holding up to `capacity` curves.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            curves: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of stored curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if no curve is stored.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Maximum number of curves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All curves in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BezierCurve> {
        self.curves.iter()
    }

    /// The curve at `index`.
    pub fn get(&self, index: usize) -> Option<&BezierCurve> {
        self.curves.get(index)
    }

    /// Appends a curve, or reports [`EditorError::CurveRegistryFull`].
    pub fn push(&mut self, curve: BezierCurve) -> Result<(), EditorError> {
        if self.curves.len() >= self.capacity {
            return Err(EditorError::CurveRegistryFull {
                capacity: self.capacity,
            });
        }
        self.curves.push(curve);
        Ok(())
    }

    /// Removes every curve touching `node`, compacting the list. Returns the number removed.
    pub fn remove_involving(&mut self, node: NodeRef) -> usize {
        let before = self.curves.len();
        self.curves.retain(|c| !c.involves(node));
        before - self.curves.len()
    }

    /// Removes every curve drawn from `from` to `to`. Returns the number removed.
    pub fn remove_link(&mut self, from: NodeRef, to: NodeRef) -> usize {
        let before = self.curves.len();
        self.curves.retain(|c| !(c.from == from && c.to == to));
        before - self.curves.len()
    }

    /// Re-anchors every curve touching `node` to the current node positions.
    pub fn refresh_for(&mut self, node: NodeRef, store: &NodeStore) {
        for curve in self.curves.iter_mut().filter(|c| c.involves(node)) {
            Self::refresh_curve(curve, store);
        }
    }

    /// Re-anchors every curve to the current node positions.
    pub fn refresh_all(&mut self, store: &NodeStore) {
        for curve in &mut self.curves {
            Self::refresh_curve(curve, store);
        }
    }

    fn refresh_curve(curve: &mut BezierCurve, store: &NodeStore) {
        if let (Some(from), Some(to)) = (store.get(curve.from), store.get(curve.to)) {
            curve.refresh(from.position, to.position);
        }
    }
}
