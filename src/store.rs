//! Fixed-capacity node arena and the z-order list threaded through it.
//!
//! The arena is allocated once and never grows. The z-order list links live slots by index
//! through [`Node::next_z`]: the head is drawn first (bottom), the tail last (topmost).

use crate::constants::MAX_NODES;
use crate::error::EditorError;
use crate::geometry::point_in_rect;
use crate::types::{Node, NodeRef};
use egui::{Pos2, Vec2};

/// Owner of every node slot plus the head of the z-order list.
#[derive(Debug, Clone)]
pub struct NodeStore {
    slots: Vec<Node>,
    head: Option<NodeRef>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates a store with [`MAX_NODES`] unused slots.
    pub fn new() -> Self {
        Self::with_capacity(MAX_NODES)
    }

    /// Creates a store with `capacity` unused slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Node::unused()).collect(),
            head: None,
        }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|n| n.is_live()).count()
    }

    /// Returns true if no slot holds a live node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First node of the z-order list (drawn at the bottom).
    pub fn head(&self) -> Option<NodeRef> {
        self.head
    }

    /// Returns the node in slot `node` if it is live.
    pub fn get(&self, node: NodeRef) -> Option<&Node> {
        self.slots.get(node.0).filter(|n| n.is_live())
    }

    /// Mutable access to the node in slot `node` if it is live.
    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut Node> {
        self.slots.get_mut(node.0).filter(|n| n.is_live())
    }

    /// Raw slot access, including unused slots.
    pub fn slot(&self, node: NodeRef) -> Option<&Node> {
        self.slots.get(node.0)
    }

    /// Returns true if `node` refers to a live slot.
    pub fn is_live(&self, node: NodeRef) -> bool {
        self.get(node).is_some()
    }

    /// Iterates live nodes in slot order.
    pub fn iter_live(&self) -> impl Iterator<Item = (NodeRef, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_live())
            .map(|(i, n)| (NodeRef(i), n))
    }

    /// Claims the first unused slot for a new default node at `position` and places it
    /// on top of the z-order.
    ///
    /// # Returns
    ///
    /// The new node's handle, or [`EditorError::StoreFull`] with the store unchanged.
    pub fn allocate(&mut self, position: Pos2) -> Result<NodeRef, EditorError> {
        let index = self
            .slots
            .iter()
            .position(|n| !n.is_live())
            .ok_or(EditorError::StoreFull {
                capacity: self.capacity(),
            })?;

        let node = NodeRef(index);
        self.slots[index] = Node::new(position);
        self.append(node);
        Ok(node)
    }

    /// Frees a live node: unlinks it from the z-order, clears every connection that
    /// references it and returns the slot to the pool.
    ///
    /// A node that is not found in the z-order list is left untouched.
    pub fn free(&mut self, node: NodeRef) -> Result<(), EditorError> {
        if !self.is_live(node) {
            return Err(EditorError::InvalidNode(node));
        }
        if !self.unlink(node) {
            return Err(EditorError::NotInZOrder(node));
        }

        let mut cleared = 0;
        for (i, other) in self.slots.iter_mut().enumerate() {
            if i != node.0 && other.is_live() {
                cleared += other.clear_references_to(node);
            }
        }
        log::debug!("freed node {node}, cleared {cleared} connection(s) pointing at it");

        self.slots[node.0] = Node::unused();
        Ok(())
    }

    /// Moves `node` to the tail of the z-order list so it is drawn and hit-tested last.
    pub fn bring_to_front(&mut self, node: NodeRef) -> Result<(), EditorError> {
        if !self.is_live(node) {
            return Err(EditorError::InvalidNode(node));
        }
        if self.topmost() == Some(node) {
            return Ok(());
        }
        if !self.unlink(node) {
            return Err(EditorError::NotInZOrder(node));
        }
        self.append(node);
        Ok(())
    }

    /// Live nodes from bottom to top.
    pub fn z_order(&self) -> Vec<NodeRef> {
        self.iter_z().collect()
    }

    /// Iterates the z-order list from bottom to top. The walk stops after `capacity`
    /// steps even if the list is cyclic.
    pub fn iter_z(&self) -> ZOrderIter<'_> {
        ZOrderIter {
            store: self,
            current: self.head,
            remaining: self.capacity(),
        }
    }

    /// The node drawn on top, i.e. the tail of the z-order list.
    pub fn topmost(&self) -> Option<NodeRef> {
        self.iter_z().last()
    }

    /// The topmost live node whose bounds contain `p`.
    pub fn topmost_at(&self, p: Pos2) -> Option<NodeRef> {
        self.iter_z()
            .filter(|r| self.get(*r).is_some_and(|n| point_in_rect(p, n.bounds())))
            .last()
    }

    /// Moves every live node by `delta`.
    pub fn translate_all(&mut self, delta: Vec2) {
        for node in self.slots.iter_mut().filter(|n| n.is_live()) {
            node.translate(delta);
        }
    }

    /// Walks the z-order list with a guard counter and checks it against the arena.
    ///
    /// # Returns
    ///
    /// The number of nodes in the list, or an error describing a cycle, an unused slot
    /// in the chain, or a live node missing from it.
    pub fn validate_z_order(&self) -> Result<usize, EditorError> {
        let mut visited = 0;
        let mut current = self.head;
        while let Some(node) = current {
            if visited >= self.capacity() {
                return Err(EditorError::ZOrderCorrupted { visited });
            }
            let slot = self
                .slot(node)
                .ok_or(EditorError::ZOrderCorrupted { visited })?;
            if !slot.is_live() {
                return Err(EditorError::ZOrderContainsUnused(node));
            }
            visited += 1;
            current = slot.next_z;
        }
        if visited != self.len() {
            return Err(EditorError::ZOrderCorrupted { visited });
        }
        Ok(visited)
    }

    /// Logs the z-order list at debug level, warning if it is corrupted.
    pub fn debug_dump(&self) {
        log::debug!("---- node list ----");
        for (depth, node) in self.iter_z().enumerate() {
            if let Some(n) = self.slot(node) {
                log::debug!(
                    "z {depth}: slot {node} | {:?} | pos ({:.1}, {:.1}) | id {}",
                    n.kind,
                    n.position.x,
                    n.position.y,
                    n.id
                );
            }
        }
        if let Err(err) = self.validate_z_order() {
            log::warn!("{err}");
        }
    }

    fn append(&mut self, node: NodeRef) {
        self.slots[node.0].next_z = None;
        match self.topmost() {
            Some(tail) => self.slots[tail.0].next_z = Some(node),
            None => self.head = Some(node),
        }
    }

    /// Removes `node` from the list. Returns false if it was not found.
    fn unlink(&mut self, node: NodeRef) -> bool {
        let Some(head) = self.head else {
            return false;
        };
        if head == node {
            self.head = self.slots[node.0].next_z.take();
            return true;
        }

        let mut prev = head;
        for _ in 0..self.capacity() {
            match self.slots[prev.0].next_z {
                Some(next) if next == node => {
                    self.slots[prev.0].next_z = self.slots[node.0].next_z.take();
                    return true;
                }
                Some(next) => prev = next,
                None => return false,
            }
        }
        false
    }
}

/// Guarded bottom-to-top walk over the z-order list.
#[derive(Debug)]
pub struct ZOrderIter<'a> {
    store: &'a NodeStore,
    current: Option<NodeRef>,
    remaining: usize,
}

impl Iterator for ZOrderIter<'_> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.current?;
        self.remaining -= 1;
        self.current = self.store.slot(node).and_then(|n| n.next_z);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{INPUT_CONNECTOR, OUTPUT_CONNECTOR};
    use crate::types::{Connection, NodeType};
    use egui::{pos2, vec2};

    fn store_with(n: usize) -> (NodeStore, Vec<NodeRef>) {
        let mut store = NodeStore::with_capacity(8);
        let refs = (0..n)
            .map(|i| store.allocate(pos2(i as f32 * 10.0, 0.0)).unwrap())
            .collect();
        (store, refs)
    }

    #[test]
    fn test_allocate_appends_on_top() {
        let (store, refs) = store_with(3);
        assert_eq!(store.z_order(), refs);
        assert_eq!(store.topmost(), Some(refs[2]));
        assert_eq!(store.head(), Some(refs[0]));
        assert_eq!(store.validate_z_order(), Ok(3));
    }

    #[test]
    fn test_allocate_beyond_capacity_is_rejected() {
        let mut store = NodeStore::with_capacity(2);
        store.allocate(pos2(0.0, 0.0)).unwrap();
        store.allocate(pos2(1.0, 0.0)).unwrap();
        let before = store.z_order();

        let result = store.allocate(pos2(2.0, 0.0));

        assert_eq!(result, Err(EditorError::StoreFull { capacity: 2 }));
        assert_eq!(store.len(), 2);
        assert_eq!(store.z_order(), before);
    }

    #[test]
    fn test_free_reuses_slot() {
        let (mut store, refs) = store_with(3);
        store.free(refs[1]).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.z_order(), vec![refs[0], refs[2]]);
        assert_eq!(store.slot(refs[1]).unwrap().kind, NodeType::Unused);

        let reused = store.allocate(pos2(99.0, 99.0)).unwrap();
        assert_eq!(reused, refs[1]);
        assert_eq!(store.topmost(), Some(reused));
    }

    #[test]
    fn test_free_head_and_tail() {
        let (mut store, refs) = store_with(3);
        store.free(refs[0]).unwrap();
        assert_eq!(store.head(), Some(refs[1]));
        store.free(refs[2]).unwrap();
        assert_eq!(store.z_order(), vec![refs[1]]);
        store.free(refs[1]).unwrap();
        assert_eq!(store.head(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_free_invalid_is_noop() {
        let (mut store, refs) = store_with(1);
        store.free(refs[0]).unwrap();
        assert_eq!(store.free(refs[0]), Err(EditorError::InvalidNode(refs[0])));
        assert_eq!(store.free(NodeRef(100)), Err(EditorError::InvalidNode(NodeRef(100))));
    }

    #[test]
    fn test_free_clears_connections() {
        let (mut store, refs) = store_with(3);
        let link = Connection::new(refs[0], refs[1]);
        store.get_mut(refs[0]).unwrap().connectors[OUTPUT_CONNECTOR]
            .as_mut()
            .unwrap()
            .with = Some(link);
        store.get_mut(refs[1]).unwrap().connectors[INPUT_CONNECTOR]
            .as_mut()
            .unwrap()
            .with = Some(link);

        store.free(refs[0]).unwrap();

        let b = store.get(refs[1]).unwrap();
        assert!(b.connectors[INPUT_CONNECTOR].unwrap().with.is_none());
        assert!(store.iter_live().all(|(_, n)| n.all_connections().is_empty()));
    }

    #[test]
    fn test_bring_to_front() {
        let (mut store, refs) = store_with(3);

        store.bring_to_front(refs[0]).unwrap();
        assert_eq!(store.z_order(), vec![refs[1], refs[2], refs[0]]);

        store.bring_to_front(refs[2]).unwrap();
        assert_eq!(store.z_order(), vec![refs[1], refs[0], refs[2]]);

        // Already on top
        store.bring_to_front(refs[2]).unwrap();
        assert_eq!(store.z_order(), vec![refs[1], refs[0], refs[2]]);
        assert_eq!(store.validate_z_order(), Ok(3));
    }

    #[test]
    fn test_topmost_at_prefers_tail() {
        let mut store = NodeStore::with_capacity(4);
        let a = store.allocate(pos2(0.0, 0.0)).unwrap();
        let b = store.allocate(pos2(50.0, 0.0)).unwrap();

        assert_eq!(store.topmost_at(pos2(60.0, 10.0)), Some(b));
        assert_eq!(store.topmost_at(pos2(10.0, 10.0)), Some(a));
        assert_eq!(store.topmost_at(pos2(10.0, 100.0)), None);

        store.bring_to_front(a).unwrap();
        assert_eq!(store.topmost_at(pos2(60.0, 10.0)), Some(a));
    }

    #[test]
    fn test_translate_all() {
        let (mut store, refs) = store_with(2);
        store.translate_all(vec2(5.0, -5.0));
        assert_eq!(store.get(refs[1]).unwrap().position, pos2(15.0, -5.0));
    }

    #[test]
    fn test_validate_detects_cycle() {
        let (mut store, refs) = store_with(2);
        store.slots[refs[1].0].next_z = Some(refs[0]);

        assert!(matches!(
            store.validate_z_order(),
            Err(EditorError::ZOrderCorrupted { .. })
        ));
        // The guarded walk still terminates
        assert_eq!(store.z_order().len(), store.capacity());
    }

    #[test]
    fn test_validate_detects_unused_slot_in_chain() {
        let (mut store, refs) = store_with(2);
        let unused = NodeRef(5);
        store.slots[refs[1].0].next_z = Some(unused);
        store.slots[unused.0].next_z = None;

        assert_eq!(
            store.validate_z_order(),
            Err(EditorError::ZOrderContainsUnused(unused))
        );
        // Dumping a corrupted list only logs
        store.debug_dump();

        store.slots[refs[1].0].next_z = None;
        assert_eq!(store.validate_z_order(), Ok(2));
        store.debug_dump();
    }
}
