//! Canvas-level gestures: double-click creation, panning and scene gestures.

use super::{discard, Editor, FrameInput, SceneGesture};
use crate::error::EditorError;
use crate::scene::ScenePart;
use egui::{Rect, Vec2};

impl Editor {
    /// Creates a node at the pointer when two primary presses land less than
    /// `double_click_secs` apart. The pair is consumed, so a third press starts a new pair.
    pub(super) fn handle_double_click(&mut self, input: &FrameInput) {
        if !input.primary.pressed {
            return;
        }

        match self.state.last_click {
            Some(previous) if input.time - previous < self.config.double_click_secs => {
                self.state.last_click = None;
                if let Some(node) = self.store.topmost_at(input.pointer) {
                    log::debug!("double-click on node {node} ignored");
                    return;
                }
                discard("create node", self.create_node_at(input.pointer));
            }
            _ => self.state.last_click = Some(input.time),
        }
    }

    /// Middle-button panning: every node, scene and curve moves with the pointer.
    pub(super) fn handle_panning(&mut self, input: &FrameInput) {
        if !input.middle.down {
            self.state.pan.last_pointer = None;
            return;
        }

        if let Some(last) = self.state.pan.last_pointer {
            let delta = input.pointer - last;
            if delta != Vec2::ZERO {
                self.store.translate_all(delta);
                self.scenes.translate_all(delta);
                self.curves.refresh_all(&self.store);
            }
        }
        self.state.pan.last_pointer = Some(input.pointer);
    }

    /// Scene draw, drag, resize and icon gestures.
    pub(super) fn handle_scene_gestures(&mut self, input: &FrameInput) {
        let pointer = input.pointer;
        match self.state.scene {
            SceneGesture::Idle => {
                if input.secondary.pressed {
                    if self.scenes.scene_at(pointer).is_some() {
                        log::debug!("scene draw refused: {}", EditorError::StartInsideScene);
                    } else {
                        self.state.scene = SceneGesture::Drawing {
                            start: pointer,
                            current: pointer,
                        };
                    }
                } else if input.primary.pressed && self.store.topmost_at(pointer).is_none() {
                    self.start_scene_gesture(input);
                }
            }
            SceneGesture::Drawing { start, .. } => {
                if input.secondary.down {
                    self.state.scene = SceneGesture::Drawing {
                        start,
                        current: pointer,
                    };
                } else {
                    self.state.scene = SceneGesture::Idle;
                    discard("draw scene", self.scenes.create(Rect::from_two_pos(start, pointer)));
                }
            }
            SceneGesture::Dragging { index, grab } => {
                if input.primary.down {
                    discard(
                        "drag scene",
                        self.scenes
                            .drag_scene(index, pointer - grab, &mut self.store, &mut self.curves),
                    );
                } else {
                    self.state.scene = SceneGesture::Idle;
                }
            }
            SceneGesture::Resizing {
                index,
                edge,
                start_pointer,
                start_size,
            } => {
                if input.primary.down {
                    let size = start_size + (pointer - start_pointer);
                    discard(
                        "resize scene",
                        self.scenes.resize_scene(index, edge, size, &self.config),
                    );
                } else {
                    self.state.scene = SceneGesture::Idle;
                }
            }
        }
    }

    fn start_scene_gesture(&mut self, input: &FrameInput) {
        let Some((index, part)) = self.scenes.part_at(input.pointer) else {
            return;
        };
        let Some(bounds) = self.scenes.get(index).map(|s| s.bounds) else {
            return;
        };

        match part {
            ScenePart::DeleteIcon => discard("delete scene", self.scenes.remove(index)),
            ScenePart::ShrinkIcon => discard(
                "shrink scene",
                self.scenes.shrink_to_fit(index, &self.store, &self.config),
            ),
            ScenePart::LabelBar => {
                self.state.scene = SceneGesture::Dragging {
                    index,
                    grab: input.pointer - bounds.min,
                };
            }
            ScenePart::Resize(edge) => {
                self.state.scene = SceneGesture::Resizing {
                    index,
                    edge,
                    start_pointer: input.pointer,
                    start_size: bounds.size(),
                };
            }
            ScenePart::Body => {}
        }
    }
}
