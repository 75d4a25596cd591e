//! eframe host for the canvas editor.
//!
//! The host is a thin shell around [`crate::editor::Editor`]: each frame it polls egui
//! input once, runs the editor step, forwards window requests and paints the result.
//!
//! # Module Organization
//!
//! - `state` - The application struct and configuration restore
//! - `rendering` - Read-only painting of scenes, curves and nodes

mod rendering;
mod state;


pub use state::{EditorApp, CONFIG_KEY};

use crate::editor::{ButtonState, FrameInput};
use eframe::egui;

impl eframe::App for EditorApp {
    /// Persist the editor configuration between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.editor.config.to_json() {
            Ok(json) => storage.set_string(CONFIG_KEY, json),
            Err(err) => log::error!("Failed to serialize editor config: {err}"),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_frame(ctx);
    }
}

impl EditorApp {
    /// Polls input, steps the editor and paints the canvas.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    pub fn run_frame(&mut self, ctx: &egui::Context) {
        let input = poll_input(ctx, self.last_pointer, self.editor.window_size);
        self.last_pointer = input.pointer;

        let output = self.editor.step(&input);
        if let Some(size) = output.resize_to {
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(rendering::BACKGROUND))
            .show(ctx, |ui| {
                let canvas = ui.max_rect();
                self.render(ui.painter(), canvas);
            });

        // Drag thresholds and double-clicks are timed, so keep frames coming
        ctx.request_repaint();
    }
}

/// Reads one frame of input from egui.
///
/// # Arguments
///
/// * `ctx` - The egui context
/// * `last_pointer` - Position to report while the pointer is outside the window
/// * `window_size` - Window size the editor currently knows about
///
/// # Returns
///
/// The input snapshot for [`crate::editor::Editor::step`]
pub fn poll_input(
    ctx: &egui::Context,
    last_pointer: egui::Pos2,
    window_size: egui::Vec2,
) -> FrameInput {
    ctx.input(|i| {
        let button = |b: egui::PointerButton| ButtonState {
            pressed: i.pointer.button_pressed(b),
            down: i.pointer.button_down(b),
            released: i.pointer.button_released(b),
        };

        FrameInput {
            pointer: i.pointer.latest_pos().unwrap_or(last_pointer),
            time: i.time,
            primary: button(egui::PointerButton::Primary),
            secondary: button(egui::PointerButton::Secondary),
            middle: button(egui::PointerButton::Middle),
            toggle_screen: i.key_pressed(egui::Key::F1),
            window_size: i
                .viewport()
                .inner_rect
                .map(|r| r.size())
                .filter(|size| *size != window_size),
        }
    })
}
