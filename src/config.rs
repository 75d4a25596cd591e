//! Tunable editor settings.
//!
//! The settings are plain serde data so the host can persist them between sessions.
//! Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

/// What happens to a scene member whose top-left corner leaves the scene rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MemberExitPolicy {
    /// The node stops being a member as soon as its corner leaves
    #[default]
    Drop,
    /// The node stays a member while its bounds still overlap the rectangle
    RetainWhileOverlapping,
}

/// Timing and layout settings for the editor core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How long a node must stay pressed before the press becomes a drag, in seconds
    pub drag_threshold_secs: f64,
    /// Two presses closer together than this form a double-click, in seconds
    pub double_click_secs: f64,
    /// Padding kept between scene edges and the nodes they enclose
    pub scene_padding: f32,
    /// Smallest height a scene can be resized to
    pub min_scene_height: f32,
    /// Approximate width of one label character, used for the minimum scene width
    pub label_char_width: f32,
    /// Membership rule for nodes whose corner leaves a scene
    pub member_exit_policy: MemberExitPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_threshold_secs: 0.09,
            double_click_secs: 0.25,
            scene_padding: 20.0,
            min_scene_height: 60.0,
            label_char_width: 9.0,
            member_exit_policy: MemberExitPolicy::Drop,
        }
    }
}

impl EditorConfig {
    /// Serialize the configuration to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
