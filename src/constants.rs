//! Shared application-wide constants.
//! Centralizes the fixed capacities and geometry used across the editor core and rendering.

// Capacities
/// Number of node slots in the store.
pub const MAX_NODES: usize = 250;
/// Connector slots per node.
pub const MAX_CONNECTORS: usize = 12;
/// Number of permanent curves the registry can hold.
pub const MAX_BEZIERS: usize = 300;
/// Number of scenes inside a project.
pub const MAX_SCENES: usize = 50;
/// Member capacity of a single scene (applies to current and previous lists).
pub const MAX_SCENE_NODES: usize = 32;
/// Connection slots carried by a stack node payload.
pub const MAX_STACK_CONNECTIONS: usize = 10;

// Node dimensions
/// Default node width in canvas units.
pub const NODE_WIDTH: f32 = 200.0;
/// Default node height in canvas units.
pub const NODE_HEIGHT: f32 = 60.0;
/// Height multiplier applied to expanded nodes.
pub const EXPANDED_HEIGHT_FACTOR: f32 = 5.0;
/// Length of the random node identifier.
pub const NODE_ID_LEN: usize = 8;

// Connectors
/// Radius of a connector hit circle.
pub const CONNECTOR_RADIUS: f32 = 6.0;
/// Gap between a connector and the node edge.
pub const CONNECTOR_PADDING: f32 = 4.0;
/// Connector slot holding the input connector.
pub const INPUT_CONNECTOR: usize = 0;
/// Connector slot holding the output connector.
pub const OUTPUT_CONNECTOR: usize = 1;

// Icons
/// Edge length of node and scene icons.
pub const ICON_SIZE: f32 = 16.0;
/// Padding between icons and the owning rectangle's edges.
pub const ICON_PADDING: f32 = 4.0;

// Curves
/// Horizontal distance between a curve endpoint and its control point.
pub const CURVE_CONTROL_OFFSET: f32 = 50.0;

// Scenes
/// Height of the label bar used to drag a scene.
pub const SCENE_LABEL_BAR_HEIGHT: f32 = 24.0;
/// Half-thickness of the resize hit strips along the right and bottom edges.
pub const SCENE_RESIZE_HANDLE: f32 = 6.0;
/// Horizontal padding around the scene name inside the label bar.
pub const SCENE_LABEL_PADDING: f32 = 8.0;

// Screen
/// Window size in the small screen mode.
pub const SCREEN_SMALL: (f32, f32) = (1280.0, 720.0);
/// Window size in the large screen mode.
pub const SCREEN_LARGE: (f32, f32) = (1920.0, 1080.0);

// Background
/// Spacing between background dots.
pub const DOT_SPACING: f32 = 20.0;
/// Radius of background dots.
pub const DOT_RADIUS: f32 = 2.0;
