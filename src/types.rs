//! Core data types for the narrative graph.
//!
//! This module defines nodes, their connectors and connections, and the per-type payloads.
//! Nodes never own each other: every cross-reference is a [`NodeRef`] slot index that the
//! store sweeps away when the referenced node is freed.

use crate::constants::*;
use crate::geometry::{icon_rect, point_in_circle};
use egui::{pos2, vec2, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable handle to a slot in the node store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef(pub usize);

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kinds of narrative nodes, plus the sentinel marking a free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NodeType {
    /// Plain dialogue text with a single follow-up
    Default,
    /// Strands popped from the top of a stack as they complete
    Stack,
    /// Picks one random strand
    Random,
    /// Picks a random strand and removes it from future draws
    RandomBag,
    /// Lets the player choose the next strand
    UserChoice,
    /// Strand locked behind a skill check
    SkillGate,
    /// Jumps to another node
    GoTo,
    /// Follows a pass or fail path based on a condition
    Conditional,
    /// Sentinel: the slot holds no node
    #[default]
    Unused,
}

impl NodeType {
    /// Every live node type, in cycle order.
    pub const LIVE: [NodeType; 8] = [
        NodeType::Default,
        NodeType::Stack,
        NodeType::Random,
        NodeType::RandomBag,
        NodeType::UserChoice,
        NodeType::SkillGate,
        NodeType::GoTo,
        NodeType::Conditional,
    ];

    /// Returns the type the cycle icon switches to. The sentinel never cycles.
    pub fn next(self) -> NodeType {
        match Self::LIVE.iter().position(|t| *t == self) {
            Some(i) => Self::LIVE[(i + 1) % Self::LIVE.len()],
            None => NodeType::Unused,
        }
    }

    /// Human readable name shown in the node header.
    pub fn display_name(self) -> &'static str {
        match self {
            NodeType::Default => "Dialogue Node",
            NodeType::Stack => "Stack Node",
            NodeType::Random => "Random Node",
            NodeType::RandomBag => "Random Bag",
            NodeType::UserChoice => "User Choice",
            NodeType::SkillGate => "Skill Gate",
            NodeType::GoTo => "Go To",
            NodeType::Conditional => "If/Else",
            NodeType::Unused => "Unknown",
        }
    }

    /// Returns true for the free-slot sentinel.
    pub fn is_unused(self) -> bool {
        self == NodeType::Unused
    }
}

/// A link between one node's output and another node's input.
///
/// Both ends are always present; a connector without a link holds `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Node owning the output connector
    pub from: NodeRef,
    /// Node owning the input connector
    pub to: NodeRef,
}

impl Connection {
    /// Creates a connection from `from` to `to`.
    pub fn new(from: NodeRef, to: NodeRef) -> Self {
        Self { from, to }
    }

    /// Returns true if either end is `node`.
    pub fn involves(&self, node: NodeRef) -> bool {
        self.from == node || self.to == node
    }
}

/// Which way a connector points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorDirection {
    /// Receives links
    Input,
    /// Originates links
    Output,
}

/// An attachment point on a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    /// Center of the hit circle
    pub center: Pos2,
    /// Radius of the hit circle
    pub radius: f32,
    /// Input or output
    pub direction: ConnectorDirection,
    /// The link attached here, if any
    pub with: Option<Connection>,
}

impl Connector {
    /// Returns true if `p` is inside this connector's hit circle.
    pub fn hit(&self, p: Pos2) -> bool {
        point_in_circle(p, self.center, self.radius)
    }
}

/// Type-specific content of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodePayload {
    /// Dialogue text and the strand that follows it
    Default {
        /// Line shown to the player
        text: String,
        /// Following strand
        next: Option<Connection>,
    },
    /// Strands to be completed first, consumed from the top
    Stack {
        /// Next entry to consume
        stack_index: usize,
        /// Queued strands
        next: [Option<Connection>; MAX_STACK_CONNECTIONS],
    },
    /// Random pick; the seed makes runs reproducible
    Random {
        /// Generator seed
        seed: u32,
    },
    /// Random pick without replacement
    RandomBag {
        /// Generator seed
        seed: u32,
    },
    /// Player choice between a number of strands
    UserChoice {
        /// Number of choices offered
        choices: u32,
    },
    /// Strand gated by a skill check
    SkillGate {
        /// Strand taken when the check passes
        pass: Option<Connection>,
        /// Skill the check tests
        required_skill_id: i32,
    },
    /// Jump to another node
    GoTo {
        /// Jump target
        target: Option<Connection>,
    },
    /// Branch on an externally evaluated condition
    Conditional {
        /// Strand taken when the condition holds
        pass: Option<Connection>,
        /// Strand taken otherwise
        fail: Option<Connection>,
        /// Condition evaluated by the game
        condition_id: i32,
    },
    /// Free slot
    Unused,
}

impl Default for NodePayload {
    fn default() -> Self {
        NodePayload::Unused
    }
}

impl NodePayload {
    /// Returns the empty payload for `kind`.
    pub fn default_for(kind: NodeType) -> Self {
        match kind {
            NodeType::Default => NodePayload::Default {
                text: String::new(),
                next: None,
            },
            NodeType::Stack => NodePayload::Stack {
                stack_index: 0,
                next: [None; MAX_STACK_CONNECTIONS],
            },
            NodeType::Random => NodePayload::Random { seed: 0 },
            NodeType::RandomBag => NodePayload::RandomBag { seed: 0 },
            NodeType::UserChoice => NodePayload::UserChoice { choices: 0 },
            NodeType::SkillGate => NodePayload::SkillGate {
                pass: None,
                required_skill_id: 0,
            },
            NodeType::GoTo => NodePayload::GoTo { target: None },
            NodeType::Conditional => NodePayload::Conditional {
                pass: None,
                fail: None,
                condition_id: 0,
            },
            NodeType::Unused => NodePayload::Unused,
        }
    }

    /// The node type this payload belongs to.
    pub fn kind(&self) -> NodeType {
        match self {
            NodePayload::Default { .. } => NodeType::Default,
            NodePayload::Stack { .. } => NodeType::Stack,
            NodePayload::Random { .. } => NodeType::Random,
            NodePayload::RandomBag { .. } => NodeType::RandomBag,
            NodePayload::UserChoice { .. } => NodeType::UserChoice,
            NodePayload::SkillGate { .. } => NodeType::SkillGate,
            NodePayload::GoTo { .. } => NodeType::GoTo,
            NodePayload::Conditional { .. } => NodeType::Conditional,
            NodePayload::Unused => NodeType::Unused,
        }
    }

    /// Mutable access to every connection slot in the payload.
    fn connection_slots_mut(&mut self) -> Vec<&mut Option<Connection>> {
        match self {
            NodePayload::Default { next, .. } => vec![next],
            NodePayload::Stack { next, .. } => next.iter_mut().collect(),
            NodePayload::SkillGate { pass, .. } => vec![pass],
            NodePayload::GoTo { target } => vec![target],
            NodePayload::Conditional { pass, fail, .. } => vec![pass, fail],
            NodePayload::Random { .. }
            | NodePayload::RandomBag { .. }
            | NodePayload::UserChoice { .. }
            | NodePayload::Unused => Vec::new(),
        }
    }

    /// Every connection currently stored in the payload.
    pub fn connections(&self) -> Vec<Connection> {
        match self {
            NodePayload::Default { next, .. } => next.iter().copied().collect(),
            NodePayload::Stack { next, .. } => next.iter().flatten().copied().collect(),
            NodePayload::SkillGate { pass, .. } => pass.iter().copied().collect(),
            NodePayload::GoTo { target } => target.iter().copied().collect(),
            NodePayload::Conditional { pass, fail, .. } => {
                pass.iter().chain(fail.iter()).copied().collect()
            }
            NodePayload::Random { .. }
            | NodePayload::RandomBag { .. }
            | NodePayload::UserChoice { .. }
            | NodePayload::Unused => Vec::new(),
        }
    }

    /// Clears every payload connection touching `node`, returning how many were cleared.
    pub fn clear_references_to(&mut self, node: NodeRef) -> usize {
        let mut cleared = 0;
        for slot in self.connection_slots_mut() {
            if slot.is_some_and(|c| c.involves(node)) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }
}

/// A single slot of the node store.
///
/// Unused slots keep `kind == NodeType::Unused` and are never part of the z-order list.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Top-left corner on the canvas
    pub position: Pos2,
    /// Width in canvas units
    pub width: f32,
    /// Collapsed height in canvas units
    pub height: f32,
    /// Whether the node is expanded
    pub expanded: bool,
    /// Node type, or the unused sentinel
    pub kind: NodeType,
    /// Connector slots; slot 0 is the input, slot 1 the output
    pub connectors: [Option<Connector>; MAX_CONNECTORS],
    /// Next node in the z-order list (towards the top)
    pub next_z: Option<NodeRef>,
    /// Random 8 character identifier
    pub id: String,
    /// Type-specific content
    pub payload: NodePayload,
}

impl Default for Node {
    fn default() -> Self {
        Self::unused()
    }
}

impl Node {
    /// An empty slot.
    pub fn unused() -> Self {
        Self {
            position: Pos2::ZERO,
            width: 0.0,
            height: 0.0,
            expanded: false,
            kind: NodeType::Unused,
            connectors: [None; MAX_CONNECTORS],
            next_z: None,
            id: String::new(),
            payload: NodePayload::Unused,
        }
    }

    /// A fresh default node at `position` with default size, a new identifier and
    /// both default connectors registered.
    pub fn new(position: Pos2) -> Self {
        let mut node = Self {
            position,
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
            kind: NodeType::Default,
            id: generate_node_id(),
            payload: NodePayload::default_for(NodeType::Default),
            ..Self::unused()
        };
        node.register_default_connectors();
        node
    }

    /// Returns true unless the slot is marked unused.
    pub fn is_live(&self) -> bool {
        !self.kind.is_unused()
    }

    /// Height currently occupied on the canvas.
    pub fn visible_height(&self) -> f32 {
        if self.expanded {
            self.height * EXPANDED_HEIGHT_FACTOR
        } else {
            self.height
        }
    }

    /// Hit rectangle and bounding box of the node.
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, vec2(self.width, self.visible_height()))
    }

    /// Delete icon in the top-right corner.
    pub fn delete_icon_rect(&self) -> Rect {
        icon_rect(
            pos2(
                self.position.x + self.width - ICON_SIZE - ICON_PADDING,
                self.position.y + ICON_PADDING,
            ),
            ICON_SIZE,
        )
    }

    /// Expand icon, left of the delete icon.
    pub fn expand_icon_rect(&self) -> Rect {
        icon_rect(
            pos2(
                self.position.x + self.width - 2.0 * (ICON_SIZE + ICON_PADDING),
                self.position.y + ICON_PADDING,
            ),
            ICON_SIZE,
        )
    }

    /// Type cycle icon in the top-left corner.
    pub fn cycle_icon_rect(&self) -> Rect {
        icon_rect(
            pos2(self.position.x + ICON_PADDING, self.position.y + ICON_PADDING),
            ICON_SIZE,
        )
    }

    fn input_center(&self) -> Pos2 {
        pos2(
            self.position.x + CONNECTOR_PADDING + CONNECTOR_RADIUS,
            self.position.y + self.height / 2.0,
        )
    }

    fn output_center(&self) -> Pos2 {
        pos2(
            self.position.x + self.width - CONNECTOR_PADDING - CONNECTOR_RADIUS,
            self.position.y + self.height / 2.0,
        )
    }

    /// Installs one input connector on the left edge and one output on the right edge.
    pub fn register_default_connectors(&mut self) {
        self.connectors[INPUT_CONNECTOR] = Some(Connector {
            center: self.input_center(),
            radius: CONNECTOR_RADIUS,
            direction: ConnectorDirection::Input,
            with: None,
        });
        self.connectors[OUTPUT_CONNECTOR] = Some(Connector {
            center: self.output_center(),
            radius: CONNECTOR_RADIUS,
            direction: ConnectorDirection::Output,
            with: None,
        });
    }

    /// Recomputes every connector center from the current position and size.
    pub fn refresh_connector_positions(&mut self) {
        let input = self.input_center();
        let output = self.output_center();
        for connector in self.connectors.iter_mut().flatten() {
            connector.center = match connector.direction {
                ConnectorDirection::Input => input,
                ConnectorDirection::Output => output,
            };
        }
    }

    /// Moves the node so its top-left corner is at `position`.
    pub fn move_to(&mut self, position: Pos2) {
        self.position = position;
        self.refresh_connector_positions();
    }

    /// Moves the node by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.move_to(self.position + delta);
    }

    /// Switches the node to `kind`, resetting the payload to that type's default.
    pub fn set_kind(&mut self, kind: NodeType) {
        self.kind = kind;
        self.payload = NodePayload::default_for(kind);
    }

    /// Live connectors together with their slot index.
    pub fn connectors(&self) -> impl Iterator<Item = (usize, &Connector)> {
        self.connectors
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (i, c)))
    }

    /// Clears every connector and payload connection touching `node`.
    pub fn clear_references_to(&mut self, node: NodeRef) -> usize {
        let mut cleared = 0;
        for connector in self.connectors.iter_mut().flatten() {
            if connector.with.is_some_and(|c| c.involves(node)) {
                connector.with = None;
                cleared += 1;
            }
        }
        cleared + self.payload.clear_references_to(node)
    }

    /// Every connection held by this node's connectors and payload.
    pub fn all_connections(&self) -> Vec<Connection> {
        let mut out: Vec<Connection> = self.connectors().filter_map(|(_, c)| c.with).collect();
        out.extend(self.payload.connections());
        out
    }
}

/// Generates an 8 character identifier from the alphabet `A-Z0-9`.
pub fn generate_node_id() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(NODE_ID_LEN)
        .map(|b| CHARSET[*b as usize % CHARSET.len()] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(pos2(200.0, 200.0));

        assert_eq!(node.kind, NodeType::Default);
        assert_eq!(node.width, NODE_WIDTH);
        assert_eq!(node.height, NODE_HEIGHT);
        assert!(!node.expanded);
        assert!(node.is_live());
        assert_eq!(node.id.len(), NODE_ID_LEN);
        assert!(matches!(node.payload, NodePayload::Default { .. }));
    }

    #[test]
    fn test_default_connectors_positions() {
        let node = Node::new(pos2(200.0, 200.0));

        let input = node.connectors[INPUT_CONNECTOR].expect("input connector");
        let output = node.connectors[OUTPUT_CONNECTOR].expect("output connector");
        assert_eq!(input.direction, ConnectorDirection::Input);
        assert_eq!(output.direction, ConnectorDirection::Output);
        assert_eq!(input.center, pos2(210.0, 230.0));
        assert_eq!(output.center, pos2(390.0, 230.0));
        assert_eq!(node.connectors().count(), 2);
    }

    #[test]
    fn test_translate_moves_connectors() {
        let mut node = Node::new(pos2(200.0, 200.0));
        node.translate(vec2(50.0, 50.0));

        assert_eq!(node.position, pos2(250.0, 250.0));
        assert_eq!(node.connectors[INPUT_CONNECTOR].unwrap().center, pos2(260.0, 280.0));
        assert_eq!(node.connectors[OUTPUT_CONNECTOR].unwrap().center, pos2(440.0, 280.0));
    }

    #[test]
    fn test_expanded_bounds() {
        let mut node = Node::new(pos2(0.0, 0.0));
        assert_eq!(node.bounds().height(), 60.0);
        node.expanded = true;
        assert_eq!(node.bounds().height(), 300.0);
        // Connectors stay anchored to the collapsed header
        node.refresh_connector_positions();
        assert_eq!(node.connectors[INPUT_CONNECTOR].unwrap().center.y, 30.0);
    }

    #[test]
    fn test_icon_rects() {
        let node = Node::new(pos2(200.0, 200.0));
        assert_eq!(node.delete_icon_rect().min, pos2(380.0, 204.0));
        assert_eq!(node.expand_icon_rect().min, pos2(360.0, 204.0));
        assert_eq!(node.cycle_icon_rect().min, pos2(204.0, 204.0));
    }

    #[test]
    fn test_type_cycle_wraps() {
        let mut kind = NodeType::Default;
        for expected in NodeType::LIVE.iter().skip(1) {
            kind = kind.next();
            assert_eq!(kind, *expected);
        }
        assert_eq!(kind.next(), NodeType::Default);
        assert_eq!(NodeType::Unused.next(), NodeType::Unused);
    }

    #[test]
    fn test_set_kind_resets_payload() {
        let mut node = Node::new(pos2(0.0, 0.0));
        node.set_kind(NodeType::Conditional);
        assert_eq!(node.payload.kind(), NodeType::Conditional);
        node.set_kind(NodeType::Conditional.next());
        assert_eq!(node.payload, NodePayload::default_for(NodeType::Default));
    }

    #[test]
    fn test_clear_references_covers_payload() {
        let me = NodeRef(0);
        let gone = NodeRef(3);
        let other = NodeRef(4);

        let mut node = Node::new(pos2(0.0, 0.0));
        node.set_kind(NodeType::Conditional);
        node.payload = NodePayload::Conditional {
            pass: Some(Connection::new(me, gone)),
            fail: Some(Connection::new(me, other)),
            condition_id: 1,
        };
        if let Some(c) = node.connectors[OUTPUT_CONNECTOR].as_mut() {
            c.with = Some(Connection::new(me, gone));
        }

        assert_eq!(node.clear_references_to(gone), 2);
        assert!(node.connectors[OUTPUT_CONNECTOR].unwrap().with.is_none());
        assert_eq!(node.all_connections(), vec![Connection::new(me, other)]);
    }

    #[test]
    fn test_generated_ids_use_charset() {
        let id = generate_node_id();
        assert_eq!(id.len(), NODE_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(NodeType::Default.display_name(), "Dialogue Node");
        assert_eq!(NodeType::Conditional.display_name(), "If/Else");
        assert_eq!(NodeType::Unused.display_name(), "Unknown");
    }
}
