//! Canvas rendering for scenes, curves and nodes.
//!
//! Rendering never mutates the editor. Layers are painted back to front: background
//! dots, scenes, permanent curves, nodes in z-order, then the in-progress gestures.

use super::state::EditorApp;
use crate::constants::{DOT_RADIUS, DOT_SPACING, SCENE_LABEL_PADDING};
use crate::scene::SceneOutline;
use crate::types::{ConnectorDirection, Node, NodeRef};
use eframe::egui;
use eframe::epaint::{CubicBezierShape, StrokeKind};

/// Canvas background colour.
pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(30, 30, 36);
const DOT_COLOR: egui::Color32 = egui::Color32::from_rgb(58, 58, 66);
const NODE_FILL: egui::Color32 = egui::Color32::from_rgb(52, 56, 70);
const NODE_BORDER: egui::Color32 = egui::Color32::from_rgb(110, 115, 135);
const TOPMOST_BORDER: egui::Color32 = egui::Color32::from_rgb(220, 60, 60);
const CURVE_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 200, 210);
const PREVIEW_COLOR: egui::Color32 = egui::Color32::from_rgb(240, 200, 80);
const SCENE_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(24, 30, 40, 40);
const SCENE_BORDER: egui::Color32 = egui::Color32::from_rgb(90, 130, 180);
const TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 230, 235);

impl EditorApp {
    /// Paints every editor element inside `canvas`.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas` - The screen-space rectangle of the canvas area
    pub fn render(&self, painter: &egui::Painter, canvas: egui::Rect) {
        draw_dots(painter, canvas);

        for scene in self.editor.scenes.iter() {
            draw_scene(painter, scene);
        }

        for curve in self.editor.curves.iter() {
            painter.add(CubicBezierShape::from_points_stroke(
                curve.points,
                false,
                egui::Color32::TRANSPARENT,
                egui::Stroke::new(2.0, CURVE_COLOR),
            ));
        }

        let topmost = self.editor.store.topmost();
        let hovered = self.editor.hovered_input();
        for node in self.editor.store.iter_z() {
            if let Some(n) = self.editor.store.get(node) {
                draw_node(painter, node, n, topmost == Some(node), hovered);
            }
        }

        if let Some(points) = self.editor.link_preview() {
            painter.add(CubicBezierShape::from_points_stroke(
                points,
                false,
                egui::Color32::TRANSPARENT,
                egui::Stroke::new(2.0, PREVIEW_COLOR),
            ));
        }

        if let Some(rect) = self.editor.scene_draw_preview() {
            painter.rect_stroke(
                rect,
                0.0,
                egui::Stroke::new(1.0, PREVIEW_COLOR),
                StrokeKind::Inside,
            );
        }
    }
}

fn draw_dots(painter: &egui::Painter, canvas: egui::Rect) {
    let mut y = (canvas.min.y / DOT_SPACING).ceil() * DOT_SPACING;
    while y < canvas.max.y {
        let mut x = (canvas.min.x / DOT_SPACING).ceil() * DOT_SPACING;
        while x < canvas.max.x {
            painter.circle_filled(egui::pos2(x, y), DOT_RADIUS, DOT_COLOR);
            x += DOT_SPACING;
        }
        y += DOT_SPACING;
    }
}

fn draw_scene(painter: &egui::Painter, scene: &SceneOutline) {
    let stroke = egui::Stroke::new(1.5, SCENE_BORDER);
    painter.rect_filled(scene.bounds, 4.0, SCENE_FILL);
    painter.rect_stroke(scene.bounds, 4.0, stroke, StrokeKind::Inside);

    let bar = scene.label_bar_rect();
    painter.rect_filled(bar, 4.0, SCENE_BORDER.gamma_multiply(0.4));
    painter.text(
        egui::pos2(bar.min.x + SCENE_LABEL_PADDING, bar.center().y),
        egui::Align2::LEFT_CENTER,
        &scene.name,
        egui::FontId::proportional(14.0),
        TEXT_COLOR,
    );

    draw_icon(painter, scene.shrink_icon_rect(), "-");
    draw_icon(painter, scene.delete_icon_rect(), "x");
}

fn draw_node(
    painter: &egui::Painter,
    node: NodeRef,
    n: &Node,
    is_topmost: bool,
    hovered: Option<(NodeRef, usize)>,
) {
    let rect = n.bounds();
    let border = if is_topmost { TOPMOST_BORDER } else { NODE_BORDER };
    painter.rect_filled(rect, 5.0, NODE_FILL);
    painter.rect_stroke(rect, 5.0, egui::Stroke::new(2.0, border), StrokeKind::Inside);

    painter.text(
        egui::pos2(rect.center().x, n.position.y + n.height / 2.0),
        egui::Align2::CENTER_CENTER,
        n.kind.display_name(),
        egui::FontId::proportional(14.0),
        TEXT_COLOR,
    );
    painter.text(
        egui::pos2(rect.min.x + 24.0, rect.min.y + 12.0),
        egui::Align2::LEFT_CENTER,
        &n.id,
        egui::FontId::monospace(10.0),
        NODE_BORDER,
    );

    draw_icon(painter, n.cycle_icon_rect(), "~");
    draw_icon(painter, n.expand_icon_rect(), if n.expanded { "-" } else { "+" });
    draw_icon(painter, n.delete_icon_rect(), "x");

    for (index, connector) in n.connectors() {
        let highlighted = hovered == Some((node, index));
        let color = match connector.direction {
            ConnectorDirection::Input => egui::Color32::from_rgb(90, 170, 110),
            ConnectorDirection::Output => egui::Color32::from_rgb(90, 140, 210),
        };
        let stroke = egui::Stroke::new(if highlighted { 3.0 } else { 1.5 }, color);
        if connector.with.is_some() || highlighted {
            painter.circle_filled(connector.center, connector.radius, color);
        }
        painter.circle_stroke(connector.center, connector.radius, stroke);
    }
}

fn draw_icon(painter: &egui::Painter, rect: egui::Rect, glyph: &str) {
    painter.rect_stroke(
        rect,
        2.0,
        egui::Stroke::new(1.0, NODE_BORDER),
        StrokeKind::Inside,
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        glyph,
        egui::FontId::monospace(12.0),
        TEXT_COLOR,
    );
}
