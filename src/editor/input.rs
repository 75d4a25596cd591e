//! Per-frame input snapshot consumed by [`super::Editor::step`].
//!
//! The host polls its windowing layer once per frame and fills a [`FrameInput`]; the editor
//! core never reads input from anywhere else.

use egui::{Pos2, Vec2};

/// State of one pointer button during a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this frame
    pub pressed: bool,
    /// Is held at the end of this frame
    pub down: bool,
    /// Went up this frame
    pub released: bool,
}

impl ButtonState {
    /// Not touched.
    pub const IDLE: Self = Self {
        pressed: false,
        down: false,
        released: false,
    };

    /// Pressed this frame.
    pub fn press() -> Self {
        Self {
            pressed: true,
            down: true,
            released: false,
        }
    }

    /// Held from an earlier frame.
    pub fn hold() -> Self {
        Self {
            pressed: false,
            down: true,
            released: false,
        }
    }

    /// Released this frame.
    pub fn release() -> Self {
        Self {
            pressed: false,
            down: false,
            released: true,
        }
    }
}

/// Everything the editor needs from the host for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position in canvas coordinates
    pub pointer: Pos2,
    /// Wall-clock time in seconds
    pub time: f64,
    /// Left button
    pub primary: ButtonState,
    /// Right button
    pub secondary: ButtonState,
    /// Middle button
    pub middle: ButtonState,
    /// The screen toggle key was pressed
    pub toggle_screen: bool,
    /// New window size, if the window was resized
    pub window_size: Option<Vec2>,
}

impl FrameInput {
    /// A frame at `time` with the pointer at `pointer` and no buttons touched.
    pub fn at(time: f64, pointer: Pos2) -> Self {
        Self {
            pointer,
            time,
            primary: ButtonState::IDLE,
            secondary: ButtonState::IDLE,
            middle: ButtonState::IDLE,
            toggle_screen: false,
            window_size: None,
        }
    }

    /// Sets the primary button state.
    pub fn primary(mut self, state: ButtonState) -> Self {
        self.primary = state;
        self
    }

    /// Sets the secondary button state.
    pub fn secondary(mut self, state: ButtonState) -> Self {
        self.secondary = state;
        self
    }

    /// Sets the middle button state.
    pub fn middle(mut self, state: ButtonState) -> Self {
        self.middle = state;
        self
    }

    /// Marks the screen toggle key as pressed.
    pub fn toggling_screen(mut self) -> Self {
        self.toggle_screen = true;
        self
    }
}
