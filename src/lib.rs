//! # Node Prose
//!
//! A node based canvas editor for authoring branching videogame narratives. Narrative
//! beats are nodes on a 2D canvas, linked output to input with curves, and grouped into
//! rectangular scenes.
//!
//! ## Features
//! - Double-click node creation, click-to-raise and timed click/drag disambiguation
//! - Connect-by-dragging links whose curves stay anchored to moving nodes
//! - Scenes that track their member nodes frame to frame and grow to fit them
//! - Scene drag, resize and shrink-to-fit
//! - Middle-button canvas panning
//!
//! The editor core ([`Editor`]) is independent of any window: the host feeds it one
//! [`FrameInput`] per frame and paints the result.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod bezier;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod store;
pub mod types;
mod ui;

// Re-export public types and functions
pub use bezier::{BezierCurve, BezierRegistry};
pub use config::{EditorConfig, MemberExitPolicy};
pub use editor::{ButtonState, Editor, FrameInput, FrameOutput};
pub use error::EditorError;
pub use scene::{SceneList, SceneOutline};
pub use store::NodeStore;
pub use types::*;
pub use ui::EditorApp;

/// Runs the editor application with default settings.
///
/// This function opens a 1280x720 window, restores the saved editor configuration and
/// starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     node_prose::run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let (width, height) = constants::SCREEN_SMALL;
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_title("Node Prose"),
        ..Default::default()
    };
    eframe::run_native(
        "Node Prose",
        options,
        Box::new(|cc| Ok(Box::new(EditorApp::from_storage(cc.storage)))),
    )
}
