//! The per-frame input dispatcher.
//!
//! [`Editor`] owns the node store, the curve registry, the scene list and the transient
//! interaction state. The host calls [`Editor::step`] once per frame with a [`FrameInput`];
//! the step runs every behavior in a fixed order and the host then renders the result
//! read-only.
//!
//! Frame order:
//! 1. screen toggle and window size
//! 2. double-click node creation
//! 3. canvas panning
//! 4. scene gestures (draw, drag, resize, icons)
//! 5. per-node behaviors in z-order, see [`NodeBehavior::ALL`]
//! 6. link cancellation and preview refresh
//! 7. deferred bring-to-front
//! 8. scene membership recompute
//! 9. curve refresh

mod behaviors;
mod canvas;
mod drag;
mod input;
mod link;
mod state;


pub use behaviors::NodeBehavior;
pub use input::{ButtonState, FrameInput};
pub use state::{DragState, EditorState, LinkState, PanState, SceneGesture, ScreenMode};

use crate::bezier::BezierRegistry;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::scene::SceneList;
use crate::store::NodeStore;
use crate::types::NodeRef;
use egui::{Pos2, Rect, Vec2};

/// What the host has to do after a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutput {
    /// Resize the window to this size
    pub resize_to: Option<Vec2>,
}

/// The canvas editor core.
#[derive(Debug, Clone)]
pub struct Editor {
    /// Timing and layout settings
    pub config: EditorConfig,
    /// Node slots and z-order
    pub store: NodeStore,
    /// Permanent link curves
    pub curves: BezierRegistry,
    /// Scene outlines
    pub scenes: SceneList,
    /// Gesture bookkeeping
    pub state: EditorState,
    /// Current window preset
    pub screen: ScreenMode,
    /// Last window size reported by the host
    pub window_size: Vec2,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Creates an empty editor with full-size stores.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_parts(config, NodeStore::new(), BezierRegistry::new(), SceneList::new())
    }

    /// Creates an editor from pre-sized parts.
    pub fn with_parts(
        config: EditorConfig,
        store: NodeStore,
        curves: BezierRegistry,
        scenes: SceneList,
    ) -> Self {
        let screen = ScreenMode::default();
        Self {
            config,
            store,
            curves,
            scenes,
            state: EditorState::default(),
            screen,
            window_size: screen.size(),
        }
    }

    /// Runs one frame of the interaction pipeline.
    ///
    /// # Arguments
    ///
    /// * `input` - Pointer, button, time and window input polled by the host
    ///
    /// # Returns
    ///
    /// Requests for the host, such as a window resize
    pub fn step(&mut self, input: &FrameInput) -> FrameOutput {
        let mut output = FrameOutput::default();

        if let Some(size) = input.window_size {
            self.window_size = size;
        }
        if input.toggle_screen {
            output.resize_to = Some(self.toggle_screen());
        }

        self.handle_double_click(input);
        self.handle_panning(input);
        self.handle_scene_gestures(input);
        self.run_node_behaviors(input);
        self.cancel_stray_link(input);
        self.refresh_link_preview(input);

        if let Some(node) = self.state.bring_to_front.take() {
            discard("bring to front", self.store.bring_to_front(node));
        }
        if !self.state.scene.is_resizing() {
            self.scenes
                .update_membership(&self.store, self.state.drag.dragging, &self.config);
        }
        self.curves.refresh_all(&self.store);

        output
    }

    /// Creates a default node with its top-left corner at `position`.
    pub fn create_node_at(&mut self, position: Pos2) -> Result<NodeRef, EditorError> {
        let node = self.store.allocate(position)?;
        log::debug!("created node {node} at {position:?}");
        Ok(node)
    }

    /// Deletes `node` and every reference to it: connections, curves, scene membership
    /// and gesture state.
    pub fn delete_node(&mut self, node: NodeRef) -> Result<(), EditorError> {
        self.store.free(node)?;
        let curves = self.curves.remove_involving(node);
        self.scenes.forget_node(node);
        self.state.forget_node(node);
        log::debug!("deleted node {node}, removed {curves} curve(s)");
        Ok(())
    }

    /// Switches between the two window presets and returns the new window size.
    pub fn toggle_screen(&mut self) -> Vec2 {
        self.screen = self.screen.toggled();
        self.window_size = self.screen.size();
        log::info!("screen switched to {:?}", self.window_size);
        self.window_size
    }

    /// Curve from the link origin to the pointer while a link is being dragged.
    pub fn link_preview(&self) -> Option<[Pos2; 4]> {
        self.state.link.preview
    }

    /// Input connector highlighted under the pointer while a link is being dragged.
    pub fn hovered_input(&self) -> Option<(NodeRef, usize)> {
        self.state.link.hovered_input
    }

    /// Scene rectangle being drawn, if any.
    pub fn scene_draw_preview(&self) -> Option<Rect> {
        self.state.scene.draw_preview()
    }
}

/// Logs and drops a rejected operation. Rejections never reach the user.
fn discard<T>(what: &str, result: Result<T, EditorError>) {
    if let Err(err) = result {
        log::debug!("{what} ignored: {err}");
    }
}
