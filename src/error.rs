//! Rejection reasons reported by the editor core.
//!
//! None of these reach the user: the frame dispatcher logs them and carries on, leaving
//! the previous state untouched.

use crate::types::NodeRef;
use thiserror::Error;

/// Reasons an editor operation was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Every node slot is in use
    #[error("node store is full ({capacity} slots in use)")]
    StoreFull {
        /// Number of slots in the store
        capacity: usize,
    },

    /// No room for another curve
    #[error("curve registry is full ({capacity} curves)")]
    CurveRegistryFull {
        /// Maximum number of curves
        capacity: usize,
    },

    /// No room for another scene
    #[error("scene list is full ({capacity} scenes)")]
    SceneListFull {
        /// Maximum number of scenes
        capacity: usize,
    },

    /// A scene already holds its maximum number of members
    #[error("scene '{scene}' cannot hold more than {capacity} members")]
    SceneMembersFull {
        /// Scene name
        scene: String,
        /// Maximum number of members
        capacity: usize,
    },

    /// The slot is free or out of range
    #[error("node slot {0} is not a live node")]
    InvalidNode(NodeRef),

    /// A live node is missing from the z-order list
    #[error("node slot {0} is not linked into the z-order list")]
    NotInZOrder(NodeRef),

    /// No scene at this index
    #[error("scene index {0} does not exist")]
    InvalidScene(usize),

    /// A scene drawing gesture started inside another scene
    #[error("scene drawing cannot start inside an existing scene")]
    StartInsideScene,

    /// Scenes may not overlap
    #[error("scene rectangle would overlap an existing scene")]
    SceneOverlap,

    /// Zero width or height
    #[error("scene rectangle has no area")]
    DegenerateScene,

    /// Output and input belong to the same node
    #[error("a node cannot be linked to itself")]
    SelfLink,

    /// The node has no connector at this index
    #[error("connector {index} does not exist on node slot {node}")]
    InvalidConnector {
        /// Node that was asked
        node: NodeRef,
        /// Connector index
        index: usize,
    },

    /// The z-order list is cyclic, broken or out of step with the arena
    #[error("z-order traversal exceeded {visited} steps; the list is cyclic or corrupted")]
    ZOrderCorrupted {
        /// Steps taken before giving up
        visited: usize,
    },

    /// A free slot is still linked into the z-order list
    #[error("z-order list contains unused slot {0}")]
    ZOrderContainsUnused(NodeRef),
}
