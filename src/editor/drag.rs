//! Node drag controller: Idle, Candidate, Dragging.
//!
//! A press on a node only makes it a candidate. The press turns into a drag once the
//! button has been held for `drag_threshold_secs`; releasing earlier is a plain click.
//! A dragged scene member cannot slide its corner out through the scene's top or left
//! edge while it still overlaps the scene.

use super::{Editor, FrameInput};
use crate::types::NodeRef;
use egui::Rect;

impl Editor {
    /// Drag behavior for one node.
    ///
    /// # Arguments
    ///
    /// * `node` - Node being processed
    /// * `pressed` - The primary button went down on this node this frame
    /// * `input` - Frame input
    pub(super) fn drag_node(&mut self, node: NodeRef, pressed: bool, input: &FrameInput) {
        if self.state.link.origin_node() == Some(node) {
            return;
        }

        let drag = &mut self.state.drag;
        if pressed && drag.is_idle() {
            drag.candidate = Some(node);
            drag.press_time = input.time;
            drag.press_pos = input.pointer;
            self.state.bring_to_front = Some(node);
            return;
        }

        if drag.candidate == Some(node) {
            if !input.primary.down {
                log::debug!("node {node} clicked");
                drag.candidate = None;
                return;
            }
            if input.time - drag.press_time < self.config.drag_threshold_secs {
                return;
            }
            let Some(n) = self.store.get(node) else {
                drag.candidate = None;
                return;
            };
            drag.offset = drag.press_pos - n.position;
            drag.dragging = Some(node);
            drag.candidate = None;
            log::debug!("dragging node {node}");
        }

        if self.state.drag.dragging == Some(node) {
            if !input.primary.down {
                log::debug!("dropped node {node}");
                self.state.drag.dragging = None;
                return;
            }
            let Some(size) = self.store.get(node).map(|n| n.bounds().size()) else {
                self.state.drag.dragging = None;
                return;
            };
            let target = Rect::from_min_size(input.pointer - self.state.drag.offset, size);
            let target = self.scenes.snap_dragged(node, target, &self.config);
            if let Some(n) = self.store.get_mut(node) {
                if n.position != target {
                    n.move_to(target);
                    self.curves.refresh_for(node, &self.store);
                }
            }
        }
    }
}
