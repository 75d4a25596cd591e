//! Application state for the eframe host.
//!
//! The host owns the editor core plus the little bit of state needed to poll input
//! across frames. Only the editor configuration is persisted.

use crate::config::EditorConfig;
use crate::editor::Editor;
use eframe::egui;

/// Storage key holding the serialized [`EditorConfig`].
pub const CONFIG_KEY: &str = "editor_config";

/// Main application state.
pub struct EditorApp {
    /// The canvas editor core
    pub editor: Editor,
    /// Last known pointer position, reused while the pointer is outside the window
    pub last_pointer: egui::Pos2,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorApp {
    /// Creates an application with an empty canvas.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(config),
            last_pointer: egui::Pos2::ZERO,
        }
    }

    /// Creates an application from a previously saved configuration.
    ///
    /// Missing or unreadable configuration falls back to the defaults.
    ///
    /// # Arguments
    ///
    /// * `saved` - JSON previously stored under [`CONFIG_KEY`], if any
    pub fn from_saved_config(saved: Option<String>) -> Self {
        let config = match saved {
            Some(json) => EditorConfig::from_json(&json).unwrap_or_else(|err| {
                log::warn!("Ignoring saved editor config: {err}");
                EditorConfig::default()
            }),
            None => EditorConfig::default(),
        };
        Self::new(config)
    }

    /// Creates an application, restoring the configuration from eframe storage.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        Self::from_saved_config(storage.and_then(|s| s.get_string(CONFIG_KEY)))
    }
}
