//! The fixed per-node behavior pipeline.

use super::{discard, Editor, FrameInput};
use crate::geometry::point_in_rect;
use crate::types::{Node, NodeRef};
use egui::Rect;

/// One step of the per-node pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeBehavior {
    /// Click/drag disambiguation and dragging
    Drag,
    /// Raise the pressed node
    Focus,
    /// Start, hover and complete links
    ConnectorClick,
    /// Delete icon
    Delete,
    /// Expand/collapse icon
    Expand,
    /// Type-cycle icon
    CycleType,
}

impl NodeBehavior {
    /// Every behavior in the order it runs for each node.
    pub const ALL: [NodeBehavior; 6] = [
        NodeBehavior::Drag,
        NodeBehavior::Focus,
        NodeBehavior::ConnectorClick,
        NodeBehavior::Delete,
        NodeBehavior::Expand,
        NodeBehavior::CycleType,
    ];
}

impl Editor {
    /// Runs every behavior on every live node, bottom to top.
    ///
    /// The z-order is snapshotted first; nodes deleted along the way are skipped. Presses
    /// only act on the topmost node under the pointer.
    pub(super) fn run_node_behaviors(&mut self, input: &FrameInput) {
        let target = if input.primary.pressed {
            self.store.topmost_at(input.pointer)
        } else {
            None
        };

        for node in self.store.z_order() {
            for behavior in NodeBehavior::ALL {
                if !self.store.is_live(node) {
                    break;
                }
                self.apply_behavior(behavior, node, target, input);
            }
        }
    }

    fn apply_behavior(
        &mut self,
        behavior: NodeBehavior,
        node: NodeRef,
        target: Option<NodeRef>,
        input: &FrameInput,
    ) {
        let pressed = target == Some(node);
        match behavior {
            NodeBehavior::Drag => self.drag_node(node, pressed, input),
            NodeBehavior::Focus => {
                if pressed {
                    self.state.bring_to_front = Some(node);
                }
            }
            NodeBehavior::ConnectorClick => self.connector_click(node, pressed, input),
            NodeBehavior::Delete => {
                if pressed && self.icon_hit(node, input, |n| n.delete_icon_rect()) {
                    discard("delete node", self.delete_node(node));
                }
            }
            NodeBehavior::Expand => {
                if pressed && self.icon_hit(node, input, |n| n.expand_icon_rect()) {
                    if let Some(n) = self.store.get_mut(node) {
                        n.expanded = !n.expanded;
                        log::debug!("node {node} expanded: {}", n.expanded);
                    }
                }
            }
            NodeBehavior::CycleType => {
                if pressed && self.icon_hit(node, input, |n| n.cycle_icon_rect()) {
                    if let Some(n) = self.store.get_mut(node) {
                        n.set_kind(n.kind.next());
                        log::debug!("node {node} is now {}", n.kind.display_name());
                    }
                }
            }
        }
    }

    fn icon_hit(
        &self,
        node: NodeRef,
        input: &FrameInput,
        icon: impl Fn(&Node) -> Rect,
    ) -> bool {
        self.store
            .get(node)
            .is_some_and(|n| point_in_rect(input.pointer, icon(n)))
    }
}
