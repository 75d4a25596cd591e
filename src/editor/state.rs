//! Transient interaction state shared by the per-frame behaviors.
//!
//! One [`EditorState`] lives inside the editor for the whole session. It only holds
//! gesture bookkeeping; the graph itself lives in the store, the curve registry and the
//! scene list.

use crate::constants::{SCREEN_LARGE, SCREEN_SMALL};
use crate::scene::ResizeEdge;
use crate::types::NodeRef;
use egui::{vec2, Pos2, Rect, Vec2};

/// Click/drag disambiguation for nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Node pressed but not yet dragged
    pub candidate: Option<NodeRef>,
    /// When the candidate was pressed
    pub press_time: f64,
    /// Where the candidate was pressed
    pub press_pos: Pos2,
    /// Node being dragged
    pub dragging: Option<NodeRef>,
    /// Pointer position minus node position, fixed for the whole drag
    pub offset: Vec2,
}

impl DragState {
    /// Returns true if no node is pressed or dragged.
    pub fn is_idle(&self) -> bool {
        self.candidate.is_none() && self.dragging.is_none()
    }
}

/// Connect-by-dragging gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkState {
    /// Origin node and output connector slot
    pub origin: Option<(NodeRef, usize)>,
    /// Input connector currently under the pointer
    pub hovered_input: Option<(NodeRef, usize)>,
    /// Curve from the origin connector to the pointer
    pub preview: Option<[Pos2; 4]>,
}

impl LinkState {
    /// Returns true while a link is being dragged out.
    pub fn is_connecting(&self) -> bool {
        self.origin.is_some()
    }

    /// Node the link is being dragged from.
    pub fn origin_node(&self) -> Option<NodeRef> {
        self.origin.map(|(node, _)| node)
    }

    /// Back to idle.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Canvas panning with the middle button.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanState {
    /// Pointer position on the previous panning frame
    pub last_pointer: Option<Pos2>,
}

/// Gesture operating on scenes rather than nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SceneGesture {
    /// Nothing in progress
    #[default]
    Idle,
    /// Drawing a new scene with the secondary button
    Drawing {
        /// Where the button went down
        start: Pos2,
        /// Latest pointer position
        current: Pos2,
    },
    /// Moving a scene by its label bar
    Dragging {
        /// Scene index
        index: usize,
        /// Pointer position relative to the scene's top-left corner
        grab: Vec2,
    },
    /// Moving a scene's right edge, bottom edge or corner
    Resizing {
        /// Scene index
        index: usize,
        /// Handle being moved
        edge: ResizeEdge,
        /// Pointer position when the gesture started
        start_pointer: Pos2,
        /// Scene size when the gesture started
        start_size: Vec2,
    },
}

impl SceneGesture {
    /// Rectangle being drawn, if any.
    pub fn draw_preview(&self) -> Option<Rect> {
        match *self {
            SceneGesture::Drawing { start, current } => Some(Rect::from_two_pos(start, current)),
            _ => None,
        }
    }

    /// Returns true while a scene is being resized.
    pub fn is_resizing(&self) -> bool {
        matches!(self, SceneGesture::Resizing { .. })
    }
}

/// Window size presets toggled by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScreenMode {
    /// 1280x720
    #[default]
    Small,
    /// 1920x1080
    Large,
}

impl ScreenMode {
    /// The other preset.
    pub fn toggled(self) -> Self {
        match self {
            ScreenMode::Small => ScreenMode::Large,
            ScreenMode::Large => ScreenMode::Small,
        }
    }

    /// Window size for this preset.
    pub fn size(self) -> Vec2 {
        let (w, h) = match self {
            ScreenMode::Small => SCREEN_SMALL,
            ScreenMode::Large => SCREEN_LARGE,
        };
        vec2(w, h)
    }
}

/// All transient interaction state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    /// Node drag controller
    pub drag: DragState,
    /// Link gesture
    pub link: LinkState,
    /// Canvas pan
    pub pan: PanState,
    /// Scene draw, drag or resize
    pub scene: SceneGesture,
    /// Time of the last unpaired primary press, for double-click detection
    pub last_click: Option<f64>,
    /// Node to raise once the per-node behaviors have run
    pub bring_to_front: Option<NodeRef>,
}

impl EditorState {
    /// Clears every reference to `node`, cancelling a link that starts from it.
    pub fn forget_node(&mut self, node: NodeRef) {
        if self.drag.candidate == Some(node) {
            self.drag.candidate = None;
        }
        if self.drag.dragging == Some(node) {
            self.drag.dragging = None;
        }
        if self.bring_to_front == Some(node) {
            self.bring_to_front = None;
        }
        if self.link.origin_node() == Some(node) {
            self.link.clear();
        } else if self.link.hovered_input.is_some_and(|(n, _)| n == node) {
            self.link.hovered_input = None;
        }
    }
}
