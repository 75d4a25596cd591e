//! Rectangular scenes grouping the nodes that lie inside them.
//!
//! Membership is recomputed every frame with double buffering: the previous frame's member
//! list decides how a node is classified, so a node that is already a member is treated
//! differently from one that is just arriving. Scenes grow to fit their contents, can be
//! dragged (carrying their members along), resized, and shrunk back to a tight fit.
//!
//! No operation here ever leaves two scene rectangles overlapping.

use crate::bezier::BezierRegistry;
use crate::config::{EditorConfig, MemberExitPolicy};
use crate::constants::*;
use crate::error::EditorError;
use crate::geometry::{has_area, icon_rect, point_in_rect, rects_overlap, square_around};
use crate::store::NodeStore;
use crate::types::NodeRef;
use egui::{pos2, vec2, Pos2, Rect, Vec2};

/// Which edge of a scene a resize gesture moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    /// Right edge, width only
    Right,
    /// Bottom edge, height only
    Bottom,
    /// Bottom-right corner, both
    Corner,
}

/// The part of a scene under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePart {
    /// Delete icon in the label bar
    DeleteIcon,
    /// Shrink-to-fit icon in the label bar
    ShrinkIcon,
    /// Label bar outside the icons; dragging it moves the scene
    LabelBar,
    /// One of the resize handles
    Resize(ResizeEdge),
    /// Anywhere else inside the rectangle
    Body,
}

/// A named rectangular region and the nodes inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOutline {
    /// Region on the canvas
    pub bounds: Rect,
    /// Display name
    pub name: String,
    /// Members found by the latest recompute
    pub members: Vec<NodeRef>,
    /// Members found by the recompute before that
    pub previous: Vec<NodeRef>,
}

impl SceneOutline {
    /// Creates an empty scene.
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            bounds,
            name: name.into(),
            members: Vec::with_capacity(MAX_SCENE_NODES),
            previous: Vec::with_capacity(MAX_SCENE_NODES),
        }
    }

    /// Number of current members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of members in the previous snapshot.
    pub fn previous_count(&self) -> usize {
        self.previous.len()
    }

    /// Returns true if `node` is a current member.
    pub fn has_member(&self, node: NodeRef) -> bool {
        self.members.contains(&node)
    }

    /// Strip along the top edge used to drag the scene.
    pub fn label_bar_rect(&self) -> Rect {
        Rect::from_min_size(
            self.bounds.min,
            vec2(self.bounds.width(), SCENE_LABEL_BAR_HEIGHT),
        )
    }

    /// Delete icon at the right end of the label bar.
    pub fn delete_icon_rect(&self) -> Rect {
        icon_rect(
            pos2(
                self.bounds.max.x - ICON_SIZE - ICON_PADDING,
                self.bounds.min.y + ICON_PADDING,
            ),
            ICON_SIZE,
        )
    }

    /// Shrink-to-fit icon, left of the delete icon.
    pub fn shrink_icon_rect(&self) -> Rect {
        icon_rect(
            pos2(
                self.bounds.max.x - 2.0 * (ICON_SIZE + ICON_PADDING),
                self.bounds.min.y + ICON_PADDING,
            ),
            ICON_SIZE,
        )
    }

    /// Returns the resize handle under `p`, if any. The corner wins over the edges.
    pub fn resize_handle_at(&self, p: Pos2) -> Option<ResizeEdge> {
        let b = self.bounds;
        let h = SCENE_RESIZE_HANDLE;
        let right = Rect::from_min_max(
            pos2(b.max.x - h, b.min.y + SCENE_LABEL_BAR_HEIGHT),
            pos2(b.max.x + h, b.max.y),
        );
        let bottom = Rect::from_min_max(pos2(b.min.x, b.max.y - h), pos2(b.max.x, b.max.y + h));

        if point_in_rect(p, square_around(b.max, h)) {
            Some(ResizeEdge::Corner)
        } else if point_in_rect(p, right) {
            Some(ResizeEdge::Right)
        } else if point_in_rect(p, bottom) {
            Some(ResizeEdge::Bottom)
        } else {
            None
        }
    }

    /// Classifies `p` against the scene's interactive parts.
    pub fn part_at(&self, p: Pos2) -> Option<ScenePart> {
        if let Some(edge) = self.resize_handle_at(p) {
            return Some(ScenePart::Resize(edge));
        }
        if !point_in_rect(p, self.bounds) {
            return None;
        }
        Some(if point_in_rect(p, self.delete_icon_rect()) {
            ScenePart::DeleteIcon
        } else if point_in_rect(p, self.shrink_icon_rect()) {
            ScenePart::ShrinkIcon
        } else if point_in_rect(p, self.label_bar_rect()) {
            ScenePart::LabelBar
        } else {
            ScenePart::Body
        })
    }

    /// Smallest size the scene may be resized to: wide enough for its name and icons.
    pub fn min_size(&self, config: &EditorConfig) -> Vec2 {
        let label = self.name.chars().count() as f32 * config.label_char_width;
        vec2(
            label + 2.0 * SCENE_LABEL_PADDING + 2.0 * (ICON_SIZE + ICON_PADDING),
            config.min_scene_height.max(SCENE_LABEL_BAR_HEIGHT),
        )
    }

    /// Drops `node` from both member lists.
    pub fn forget(&mut self, node: NodeRef) {
        self.members.retain(|m| *m != node);
        self.previous.retain(|m| *m != node);
    }

    fn admit(&mut self, node: NodeRef) -> Result<(), EditorError> {
        if self.members.len() >= MAX_SCENE_NODES {
            return Err(EditorError::SceneMembersFull {
                scene: self.name.clone(),
                capacity: MAX_SCENE_NODES,
            });
        }
        self.members.push(node);
        Ok(())
    }

    /// Recomputes membership against the live nodes in `store`.
    ///
    /// The current list is first kept as the previous snapshot, then every live node is
    /// classified:
    /// - corner newly inside: the scene grows on every side to enclose the node plus padding
    /// - member still inside: right and bottom grow to keep enclosing it, unless it is the
    ///   node being dragged
    /// - member whose corner left: dropped, or kept while overlapping depending on policy
    /// - overlapping but never a member: the scene grows to pull the corner inside
    ///
    /// Growth that would overlap a rectangle in `others` is skipped.
    ///
    /// # Arguments
    ///
    /// * `store` - Node storage to classify
    /// * `dragged` - Node currently being dragged, if any
    /// * `config` - Padding and exit policy
    /// * `others` - Rectangles of the other scenes
    pub fn recompute_membership(
        &mut self,
        store: &NodeStore,
        dragged: Option<NodeRef>,
        config: &EditorConfig,
        others: &[Rect],
    ) {
        std::mem::swap(&mut self.previous, &mut self.members);
        self.members.clear();

        let pad = vec2(config.scene_padding, config.scene_padding);
        let fits = |r: Rect| !others.iter().any(|o| rects_overlap(r, *o));

        for (node, n) in store.iter_live() {
            let node_box = n.bounds();
            let corner_inside = point_in_rect(n.position, self.bounds);
            let intersects = rects_overlap(node_box, self.bounds);
            let was_member = self.previous.contains(&node);

            let admitted = if !was_member && corner_inside {
                let grown = self.bounds.union(node_box.expand2(pad));
                if self.members.len() >= MAX_SCENE_NODES {
                    Err(EditorError::SceneMembersFull {
                        scene: self.name.clone(),
                        capacity: MAX_SCENE_NODES,
                    })
                } else if !fits(grown) {
                    Err(EditorError::SceneOverlap)
                } else {
                    self.bounds = grown;
                    self.admit(node)
                }
            } else if was_member && corner_inside {
                if dragged != Some(node) {
                    let grown = Rect::from_min_max(self.bounds.min, self.bounds.max.max(node_box.max + pad));
                    if fits(grown) {
                        self.bounds = grown;
                    }
                }
                self.admit(node)
            } else if was_member {
                match config.member_exit_policy {
                    MemberExitPolicy::RetainWhileOverlapping if intersects => self.admit(node),
                    _ => Ok(()),
                }
            } else if intersects {
                let grown = Rect::from_min_max(
                    self.bounds.min.min(n.position - pad),
                    self.bounds.max.max(node_box.max + pad),
                );
                if self.members.len() >= MAX_SCENE_NODES {
                    Err(EditorError::SceneMembersFull {
                        scene: self.name.clone(),
                        capacity: MAX_SCENE_NODES,
                    })
                } else if !fits(grown) {
                    Err(EditorError::SceneOverlap)
                } else {
                    self.bounds = grown;
                    if point_in_rect(n.position, self.bounds) {
                        self.admit(node)
                    } else {
                        Ok(())
                    }
                }
            } else {
                Ok(())
            };

            if let Err(err) = admitted {
                log::debug!("scene '{}' skipped node {node}: {err}", self.name);
            }
        }
    }

    /// Replaces the bounds with the tight box around the live members plus `padding`.
    /// Members that no longer exist are dropped first. A scene without live members is
    /// left unchanged.
    ///
    /// # Returns
    ///
    /// The new bounds, or `None` if there was nothing to fit.
    pub fn fitted_bounds(&mut self, store: &NodeStore, padding: f32) -> Option<Rect> {
        self.members.retain(|m| store.is_live(*m));
        self.previous.retain(|m| store.is_live(*m));

        self.members
            .iter()
            .filter_map(|m| store.get(*m))
            .map(|n| n.bounds())
            .reduce(|a, b| a.union(b))
            .map(|r| r.expand(padding))
    }
}

/// Bounded list of scenes.
#[derive(Debug, Clone)]
pub struct SceneList {
    scenes: Vec<SceneOutline>,
    capacity: usize,
    created: u32,
}

impl Default for SceneList {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneList {
    /// Creates an empty list holding up to [`MAX_SCENES`] scenes.
    pub fn new() -> Self {
        Self::with_capacity(MAX_SCENES)
    }

    /// Creates an empty list holding up to `capacity` scenes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            scenes: Vec::with_capacity(capacity),
            capacity,
            created: 0,
        }
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns true if there are no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// All scenes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneOutline> {
        self.scenes.iter()
    }

    /// The scene at `index`.
    pub fn get(&self, index: usize) -> Option<&SceneOutline> {
        self.scenes.get(index)
    }

    /// Index of the last scene containing `p`.
    pub fn scene_at(&self, p: Pos2) -> Option<usize> {
        self.scenes
            .iter()
            .rposition(|s| point_in_rect(p, s.bounds))
    }

    /// The last scene with an interactive part under `p`, and that part.
    pub fn part_at(&self, p: Pos2) -> Option<(usize, ScenePart)> {
        self.scenes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, s)| s.part_at(p).map(|part| (i, part)))
    }

    /// Returns true if `rect` overlaps any scene other than `except`.
    pub fn overlaps_any(&self, rect: Rect, except: Option<usize>) -> bool {
        self.scenes
            .iter()
            .enumerate()
            .any(|(i, s)| Some(i) != except && rects_overlap(rect, s.bounds))
    }

    fn other_bounds(&self, index: usize) -> Vec<Rect> {
        self.scenes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, s)| s.bounds)
            .collect()
    }

    /// Adds a scene covering `bounds`, named `Scene N`.
    ///
    /// # Returns
    ///
    /// The new scene's index, or an error if the rectangle has no area, overlaps an
    /// existing scene, or the list is full.
    pub fn create(&mut self, bounds: Rect) -> Result<usize, EditorError> {
        if !has_area(bounds) {
            return Err(EditorError::DegenerateScene);
        }
        if self.scenes.len() >= self.capacity {
            return Err(EditorError::SceneListFull {
                capacity: self.capacity,
            });
        }
        if self.overlaps_any(bounds, None) {
            return Err(EditorError::SceneOverlap);
        }

        self.created += 1;
        let name = format!("Scene {}", self.created);
        log::info!("created {name} at {bounds:?}");
        self.scenes.push(SceneOutline::new(name, bounds));
        Ok(self.scenes.len() - 1)
    }

    /// Removes the scene at `index`, shifting later scenes down.
    pub fn remove(&mut self, index: usize) -> Result<SceneOutline, EditorError> {
        if index >= self.scenes.len() {
            return Err(EditorError::InvalidScene(index));
        }
        let scene = self.scenes.remove(index);
        log::info!("deleted {}", scene.name);
        Ok(scene)
    }

    /// Drops `node` from every scene's member lists.
    pub fn forget_node(&mut self, node: NodeRef) {
        for scene in &mut self.scenes {
            scene.forget(node);
        }
    }

    /// Recomputes every scene's membership. See [`SceneOutline::recompute_membership`].
    pub fn update_membership(
        &mut self,
        store: &NodeStore,
        dragged: Option<NodeRef>,
        config: &EditorConfig,
    ) {
        for i in 0..self.scenes.len() {
            let others = self.other_bounds(i);
            self.scenes[i].recompute_membership(store, dragged, config, &others);
        }
    }

    /// Keeps a dragged member's top-left corner inside the scenes it still overlaps.
    ///
    /// Under [`MemberExitPolicy::Drop`], a member whose corner would cross the top or left
    /// edge while its box still overlaps the scene pulls that edge out to the corner plus
    /// padding. If another scene is in the way the corner is clamped to the edge instead.
    /// Other policies leave the corner alone.
    ///
    /// # Arguments
    ///
    /// * `node` - The dragged node
    /// * `target` - The node's box at its intended position
    /// * `config` - Padding and exit policy
    ///
    /// # Returns
    ///
    /// The corner the node should move to.
    pub fn snap_dragged(&mut self, node: NodeRef, target: Rect, config: &EditorConfig) -> Pos2 {
        let mut corner = target.min;
        if config.member_exit_policy != MemberExitPolicy::Drop {
            return corner;
        }

        let pad = vec2(config.scene_padding, config.scene_padding);
        for index in 0..self.scenes.len() {
            let bounds = self.scenes[index].bounds;
            let node_box = Rect::from_min_size(corner, target.size());
            if !self.scenes[index].has_member(node)
                || point_in_rect(corner, bounds)
                || !rects_overlap(node_box, bounds)
            {
                continue;
            }

            let grown = Rect::from_min_max(bounds.min.min(corner - pad), bounds.max);
            if self.overlaps_any(grown, Some(index)) {
                corner = corner.max(bounds.min);
                log::debug!("node {node} held at the edge of '{}'", self.scenes[index].name);
            } else {
                self.scenes[index].bounds = grown;
            }
        }
        corner
    }

    /// Moves every scene by `delta`.
    pub fn translate_all(&mut self, delta: Vec2) {
        for scene in &mut self.scenes {
            scene.bounds = scene.bounds.translate(delta);
        }
    }

    /// Moves the scene at `index` so its top-left corner is at `new_min`, carrying every
    /// member node and the curves anchored to them along.
    ///
    /// The move is refused if the new rectangle would overlap another scene.
    pub fn drag_scene(
        &mut self,
        index: usize,
        new_min: Pos2,
        store: &mut NodeStore,
        curves: &mut BezierRegistry,
    ) -> Result<(), EditorError> {
        let scene = self.scenes.get(index).ok_or(EditorError::InvalidScene(index))?;
        let delta = new_min - scene.bounds.min;
        if delta == Vec2::ZERO {
            return Ok(());
        }
        let moved = scene.bounds.translate(delta);
        if self.overlaps_any(moved, Some(index)) {
            return Err(EditorError::SceneOverlap);
        }

        let scene = &mut self.scenes[index];
        scene.bounds = moved;
        for member in &scene.members {
            if let Some(node) = store.get_mut(*member) {
                node.translate(delta);
                curves.refresh_for(*member, store);
            }
        }
        Ok(())
    }

    /// Resizes the scene at `index` by moving `edge` so the scene measures `size`,
    /// clamped to the scene's minimum size.
    ///
    /// The resize is refused if the new rectangle would overlap another scene.
    pub fn resize_scene(
        &mut self,
        index: usize,
        edge: ResizeEdge,
        size: Vec2,
        config: &EditorConfig,
    ) -> Result<(), EditorError> {
        let scene = self.scenes.get(index).ok_or(EditorError::InvalidScene(index))?;
        let min = scene.min_size(config);
        let current = scene.bounds.size();
        let target = match edge {
            ResizeEdge::Right => vec2(size.x, current.y),
            ResizeEdge::Bottom => vec2(current.x, size.y),
            ResizeEdge::Corner => size,
        }
        .max(min);

        let resized = Rect::from_min_size(scene.bounds.min, target);
        if self.overlaps_any(resized, Some(index)) {
            return Err(EditorError::SceneOverlap);
        }
        self.scenes[index].bounds = resized;
        Ok(())
    }

    /// Shrinks (or grows) the scene at `index` to the tight box around its live members
    /// plus padding. Refused if the fitted rectangle would overlap another scene.
    pub fn shrink_to_fit(
        &mut self,
        index: usize,
        store: &NodeStore,
        config: &EditorConfig,
    ) -> Result<(), EditorError> {
        let scene = self
            .scenes
            .get_mut(index)
            .ok_or(EditorError::InvalidScene(index))?;
        let Some(fitted) = scene.fitted_bounds(store, config.scene_padding) else {
            return Ok(());
        };
        if self.overlaps_any(fitted, Some(index)) {
            return Err(EditorError::SceneOverlap);
        }
        self.scenes[index].bounds = fitted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_min_max(pos2(x0, y0), pos2(x1, y1))
    }

    fn config() -> EditorConfig {
        EditorConfig::default()
    }

    #[test]
    fn test_newly_included_node_expands_scene() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(150.0, 150.0)).unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();

        scenes.update_membership(&store, None, &config());

        let scene = scenes.get(0).unwrap();
        assert_eq!(scene.members, vec![node]);
        assert_eq!(scene.bounds, rect(100.0, 100.0, 370.0, 250.0));
        let padded = store.get(node).unwrap().bounds().expand(20.0);
        assert!(scene.bounds.contains_rect(padded));
    }

    #[test]
    fn test_recompute_snapshots_previous_members() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(150.0, 150.0)).unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();

        scenes.update_membership(&store, None, &config());
        assert_eq!(scenes.get(0).unwrap().previous_count(), 0);

        scenes.update_membership(&store, None, &config());
        let scene = scenes.get(0).unwrap();
        assert_eq!(scene.previous, vec![node]);
        assert_eq!(scene.members, vec![node]);
    }

    #[test]
    fn test_member_growth_skips_dragged_node() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(150.0, 150.0)).unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();
        scenes.update_membership(&store, None, &config());
        let settled = scenes.get(0).unwrap().bounds;

        // Move right while dragging: no growth
        store.get_mut(node).unwrap().translate(vec2(100.0, 0.0));
        scenes.update_membership(&store, Some(node), &config());
        assert_eq!(scenes.get(0).unwrap().bounds, settled);
        assert!(scenes.get(0).unwrap().has_member(node));

        // Released: right edge grows to keep enclosing it
        scenes.update_membership(&store, None, &config());
        assert_eq!(scenes.get(0).unwrap().bounds.max.x, 470.0);
    }

    #[test]
    fn test_member_leaving_through_right_edge_is_dropped() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(150.0, 150.0)).unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();
        scenes.update_membership(&store, None, &config());

        store.get_mut(node).unwrap().move_to(pos2(400.0, 150.0));
        scenes.update_membership(&store, Some(node), &config());

        assert_eq!(scenes.get(0).unwrap().member_count(), 0);
    }

    #[test]
    fn test_retain_policy_keeps_overlapping_member() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(150.0, 150.0)).unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();
        let cfg = EditorConfig {
            member_exit_policy: MemberExitPolicy::RetainWhileOverlapping,
            ..config()
        };
        scenes.update_membership(&store, None, &cfg);

        // Corner slides above the top edge, body still overlaps
        store.get_mut(node).unwrap().move_to(pos2(150.0, 80.0));
        scenes.update_membership(&store, Some(node), &cfg);
        assert!(scenes.get(0).unwrap().has_member(node));

        let mut dropping = scenes.clone();
        dropping.update_membership(&store, Some(node), &config());
        // Already a member last frame under the retain policy, so Drop removes it now
        assert!(!dropping.get(0).unwrap().has_member(node));
    }

    #[test]
    fn test_dragged_member_pulls_top_and_left_edges() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(150.0, 150.0)).unwrap();
        let size = store.get(node).unwrap().bounds().size();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 370.0, 250.0)).unwrap();
        scenes.update_membership(&store, None, &config());

        let target = Rect::from_min_size(pos2(60.0, 70.0), size);
        let corner = scenes.snap_dragged(node, target, &config());

        assert_eq!(corner, pos2(60.0, 70.0));
        assert_eq!(scenes.get(0).unwrap().bounds.min, pos2(40.0, 50.0));
    }

    #[test]
    fn test_dragged_member_is_held_when_growth_is_blocked() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(150.0, 150.0)).unwrap();
        let size = store.get(node).unwrap().bounds().size();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 370.0, 250.0)).unwrap();
        scenes.create(rect(100.0, 0.0, 370.0, 40.0)).unwrap();
        scenes.update_membership(&store, None, &config());

        let target = Rect::from_min_size(pos2(150.0, 50.0), size);
        let corner = scenes.snap_dragged(node, target, &config());

        assert_eq!(corner, pos2(150.0, 100.0));
        assert_eq!(scenes.get(0).unwrap().bounds, rect(100.0, 100.0, 370.0, 250.0));
    }

    #[test]
    fn test_snap_leaves_non_members_and_retain_policy_alone() {
        let mut store = NodeStore::with_capacity(4);
        let member = store.allocate(pos2(150.0, 150.0)).unwrap();
        let size = store.get(member).unwrap().bounds().size();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 370.0, 250.0)).unwrap();
        scenes.update_membership(&store, None, &config());
        let target = Rect::from_min_size(pos2(150.0, 70.0), size);

        let retain = EditorConfig {
            member_exit_policy: MemberExitPolicy::RetainWhileOverlapping,
            ..config()
        };
        assert_eq!(scenes.snap_dragged(member, target, &retain), target.min);
        assert_eq!(scenes.snap_dragged(NodeRef(3), target, &config()), target.min);
        assert_eq!(scenes.get(0).unwrap().bounds.min, pos2(100.0, 100.0));
    }

    #[test]
    fn test_touching_node_is_pulled_in() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(50.0, 150.0)).unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();

        scenes.update_membership(&store, None, &config());

        let scene = scenes.get(0).unwrap();
        assert!(scene.has_member(node));
        assert_eq!(scene.bounds.min, pos2(30.0, 100.0));
        assert!(point_in_rect(pos2(50.0, 150.0), scene.bounds));
    }

    #[test]
    fn test_growth_never_overlaps_other_scene() {
        let mut store = NodeStore::with_capacity(4);
        let node = store.allocate(pos2(150.0, 150.0)).unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();
        scenes.create(rect(310.0, 100.0, 500.0, 250.0)).unwrap();

        scenes.update_membership(&store, None, &config());

        let a = scenes.get(0).unwrap();
        let b = scenes.get(1).unwrap();
        assert!(!rects_overlap(a.bounds, b.bounds));
        assert!(!a.has_member(node));
        assert_eq!(a.bounds, rect(100.0, 100.0, 300.0, 250.0));
    }

    #[test]
    fn test_member_capacity() {
        let mut store = NodeStore::with_capacity(MAX_SCENE_NODES + 2);
        for _ in 0..MAX_SCENE_NODES + 1 {
            store.allocate(pos2(150.0, 150.0)).unwrap();
        }
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();

        scenes.update_membership(&store, None, &config());

        assert_eq!(scenes.get(0).unwrap().member_count(), MAX_SCENE_NODES);
    }

    #[test]
    fn test_create_rejections() {
        let mut scenes = SceneList::with_capacity(2);
        scenes.create(rect(0.0, 0.0, 100.0, 100.0)).unwrap();

        assert_eq!(
            scenes.create(rect(50.0, 50.0, 150.0, 150.0)),
            Err(EditorError::SceneOverlap)
        );
        assert_eq!(
            scenes.create(rect(200.0, 0.0, 200.0, 100.0)),
            Err(EditorError::DegenerateScene)
        );
        // Touching is allowed
        assert_eq!(scenes.create(rect(100.0, 0.0, 200.0, 100.0)), Ok(1));
        assert_eq!(
            scenes.create(rect(500.0, 0.0, 600.0, 100.0)),
            Err(EditorError::SceneListFull { capacity: 2 })
        );
        assert_eq!(scenes.get(1).unwrap().name, "Scene 2");
    }

    #[test]
    fn test_remove_compacts() {
        let mut scenes = SceneList::new();
        scenes.create(rect(0.0, 0.0, 100.0, 100.0)).unwrap();
        scenes.create(rect(200.0, 0.0, 300.0, 100.0)).unwrap();

        let removed = scenes.remove(0).unwrap();
        assert_eq!(removed.name, "Scene 1");
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes.get(0).unwrap().name, "Scene 2");
        assert_eq!(scenes.remove(5), Err(EditorError::InvalidScene(5)));
    }

    #[test]
    fn test_drag_scene_moves_members_and_curves() {
        use crate::bezier::BezierCurve;

        let mut store = NodeStore::with_capacity(4);
        let inside = store.allocate(pos2(150.0, 150.0)).unwrap();
        let outside = store.allocate(pos2(600.0, 150.0)).unwrap();
        let mut curves = BezierRegistry::new();
        curves
            .push(BezierCurve::anchored(
                inside,
                pos2(150.0, 150.0),
                outside,
                pos2(600.0, 150.0),
                pos2(340.0, 180.0),
                pos2(610.0, 180.0),
            ))
            .unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 300.0, 250.0)).unwrap();
        scenes.update_membership(&store, None, &config());

        scenes
            .drag_scene(0, pos2(100.0, 300.0), &mut store, &mut curves)
            .unwrap();

        assert_eq!(store.get(inside).unwrap().position, pos2(150.0, 350.0));
        assert_eq!(store.get(outside).unwrap().position, pos2(600.0, 150.0));
        let curve = curves.get(0).unwrap();
        assert_eq!(curve.points[0], pos2(340.0, 380.0));
        assert_eq!(curve.points[3], pos2(610.0, 180.0));
    }

    #[test]
    fn test_drag_scene_refuses_overlap() {
        let mut store = NodeStore::with_capacity(1);
        let mut curves = BezierRegistry::new();
        let mut scenes = SceneList::new();
        scenes.create(rect(0.0, 0.0, 100.0, 100.0)).unwrap();
        scenes.create(rect(200.0, 0.0, 300.0, 100.0)).unwrap();

        let result = scenes.drag_scene(0, pos2(150.0, 0.0), &mut store, &mut curves);

        assert_eq!(result, Err(EditorError::SceneOverlap));
        assert_eq!(scenes.get(0).unwrap().bounds, rect(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_resize_clamps_to_label_width() {
        let mut scenes = SceneList::new();
        scenes.create(rect(0.0, 0.0, 300.0, 200.0)).unwrap();
        let cfg = config();
        let min = scenes.get(0).unwrap().min_size(&cfg);

        scenes
            .resize_scene(0, ResizeEdge::Corner, vec2(1.0, 1.0), &cfg)
            .unwrap();
        assert_eq!(scenes.get(0).unwrap().bounds.size(), min);

        scenes
            .resize_scene(0, ResizeEdge::Right, vec2(400.0, 999.0), &cfg)
            .unwrap();
        assert_eq!(scenes.get(0).unwrap().bounds.size(), vec2(400.0, min.y));
    }

    #[test]
    fn test_resize_refuses_overlap() {
        let mut scenes = SceneList::new();
        scenes.create(rect(0.0, 0.0, 200.0, 200.0)).unwrap();
        scenes.create(rect(250.0, 0.0, 400.0, 200.0)).unwrap();

        let result = scenes.resize_scene(0, ResizeEdge::Right, vec2(300.0, 0.0), &config());

        assert_eq!(result, Err(EditorError::SceneOverlap));
    }

    #[test]
    fn test_shrink_to_fit_ignores_deleted_members() {
        let mut store = NodeStore::with_capacity(4);
        let a = store.allocate(pos2(150.0, 150.0)).unwrap();
        let b = store.allocate(pos2(150.0, 400.0)).unwrap();
        let mut scenes = SceneList::new();
        scenes.create(rect(100.0, 100.0, 500.0, 600.0)).unwrap();
        scenes.update_membership(&store, None, &config());
        assert_eq!(scenes.get(0).unwrap().member_count(), 2);

        store.free(b).unwrap();
        scenes.shrink_to_fit(0, &store, &config()).unwrap();

        let scene = scenes.get(0).unwrap();
        assert_eq!(scene.members, vec![a]);
        assert_eq!(scene.bounds, rect(130.0, 130.0, 370.0, 230.0));
    }

    #[test]
    fn test_shrink_to_fit_without_members_is_noop() {
        let store = NodeStore::with_capacity(1);
        let mut scenes = SceneList::new();
        scenes.create(rect(0.0, 0.0, 100.0, 100.0)).unwrap();

        scenes.shrink_to_fit(0, &store, &config()).unwrap();

        assert_eq!(scenes.get(0).unwrap().bounds, rect(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_part_at() {
        let mut scenes = SceneList::new();
        scenes.create(rect(0.0, 0.0, 300.0, 200.0)).unwrap();
        let scene = scenes.get(0).unwrap();

        assert_eq!(scene.part_at(pos2(290.0, 10.0)), Some(ScenePart::DeleteIcon));
        assert_eq!(scene.part_at(pos2(270.0, 10.0)), Some(ScenePart::ShrinkIcon));
        assert_eq!(scene.part_at(pos2(50.0, 10.0)), Some(ScenePart::LabelBar));
        assert_eq!(scene.part_at(pos2(50.0, 100.0)), Some(ScenePart::Body));
        assert_eq!(scene.part_at(pos2(302.0, 100.0)), Some(ScenePart::Resize(ResizeEdge::Right)));
        assert_eq!(scene.part_at(pos2(50.0, 203.0)), Some(ScenePart::Resize(ResizeEdge::Bottom)));
        assert_eq!(scene.part_at(pos2(301.0, 201.0)), Some(ScenePart::Resize(ResizeEdge::Corner)));
        assert_eq!(scene.part_at(pos2(400.0, 400.0)), None);
        assert_eq!(scenes.part_at(pos2(50.0, 10.0)), Some((0, ScenePart::LabelBar)));
    }
}
