//! Link state machine: Idle, Connecting, then Completed or Cancelled.
//!
//! A press on an output connector starts a link. While connecting, a press on another
//! node's input connector completes it; a press anywhere else outside the origin node
//! cancels it.

use super::{Editor, FrameInput};
use crate::bezier::{control_points, BezierCurve};
use crate::error::EditorError;
use crate::geometry::point_in_rect;
use crate::types::{Connection, Connector, ConnectorDirection, NodeRef};
use egui::Pos2;

impl Editor {
    /// Connector behavior for one node.
    pub(super) fn connector_click(&mut self, node: NodeRef, pressed: bool, input: &FrameInput) {
        let Some(n) = self.store.get(node) else {
            return;
        };
        let hit = |direction: ConnectorDirection| {
            n.connectors()
                .find(|(_, c)| c.direction == direction && c.hit(input.pointer))
                .map(|(i, c)| (i, c.center))
        };

        if !self.state.link.is_connecting() {
            if !pressed {
                return;
            }
            if let Some((index, center)) = hit(ConnectorDirection::Output) {
                self.state.link.origin = Some((node, index));
                self.state.link.preview = Some(control_points(center, input.pointer));
                if self.state.drag.candidate == Some(node) {
                    self.state.drag.candidate = None;
                }
                log::debug!("link started from node {node} connector {index}");
            }
            return;
        }

        match hit(ConnectorDirection::Input) {
            Some((index, _)) if self.state.link.origin_node() != Some(node) => {
                self.state.link.hovered_input = Some((node, index));
                if pressed {
                    if let Err(err) = self.complete_link(node, index, input.pointer) {
                        log::debug!("link to node {node} refused: {err}");
                    }
                }
            }
            Some((_, _)) if pressed => {
                log::debug!("link refused: {}", EditorError::SelfLink);
            }
            _ => {
                if self.state.link.hovered_input.is_some_and(|(h, _)| h == node) {
                    self.state.link.hovered_input = None;
                }
            }
        }
    }

    /// Connects the link origin to input connector `to_index` of `to`.
    ///
    /// Connections already held by either connector are replaced: their other end is
    /// cleared and their curve removed. If the curve registry is full the connection is
    /// still made, just without a curve.
    ///
    /// # Arguments
    ///
    /// * `to` - Target node
    /// * `to_index` - Input connector slot on the target
    /// * `end` - Curve end point, normally the pointer position
    pub fn complete_link(
        &mut self,
        to: NodeRef,
        to_index: usize,
        end: Pos2,
    ) -> Result<(), EditorError> {
        let Some((from, from_index)) = self.state.link.origin else {
            return Ok(());
        };
        if from == to {
            return Err(EditorError::SelfLink);
        }

        let start = self.connector(from, from_index)?.center;
        let from_corner = self.node_corner(from)?;
        let to_corner = self.node_corner(to)?;
        self.connector(to, to_index)?;

        for (node, index) in [(from, from_index), (to, to_index)] {
            if let Some(old) = self.connector(node, index)?.with {
                self.disconnect(old);
            }
        }

        let connection = Connection::new(from, to);
        for (node, index) in [(from, from_index), (to, to_index)] {
            if let Some(connector) = self.connector_mut(node, index) {
                connector.with = Some(connection);
            }
        }

        let curve = BezierCurve::anchored(from, from_corner, to, to_corner, start, end);
        if let Err(err) = self.curves.push(curve) {
            log::warn!("link {from} -> {to} has no curve: {err}");
        }
        log::info!("linked node {from} to node {to}");
        self.state.link.clear();
        Ok(())
    }

    /// Removes `old` from both of its connectors and drops its curve.
    fn disconnect(&mut self, old: Connection) {
        for end in [old.from, old.to] {
            if let Some(n) = self.store.get_mut(end) {
                for connector in n.connectors.iter_mut().flatten() {
                    if connector.with == Some(old) {
                        connector.with = None;
                    }
                }
            }
        }
        self.curves.remove_link(old.from, old.to);
        log::debug!("replaced link {} -> {}", old.from, old.to);
    }

    /// Cancels the link when a press lands neither on a hovered input nor on the origin
    /// node. Runs after the per-node behaviors so a completing press is seen first.
    pub(super) fn cancel_stray_link(&mut self, input: &FrameInput) {
        if !input.primary.pressed {
            return;
        }
        let Some(origin) = self.state.link.origin_node() else {
            return;
        };
        let on_input = self.state.link.hovered_input.is_some();
        let in_origin = self
            .store
            .get(origin)
            .is_some_and(|n| point_in_rect(input.pointer, n.bounds()));

        if !on_input && !in_origin {
            log::info!("link from node {origin} cancelled");
            self.state.link.clear();
        }
    }

    /// Re-seeds the live preview from the origin connector to the pointer.
    pub(super) fn refresh_link_preview(&mut self, input: &FrameInput) {
        let Some((node, index)) = self.state.link.origin else {
            return;
        };
        match self.connector(node, index) {
            Ok(connector) => {
                let center = connector.center;
                self.state.link.preview = Some(control_points(center, input.pointer));
            }
            Err(err) => {
                log::debug!("link preview dropped: {err}");
                self.state.link.clear();
            }
        }
    }

    fn node_corner(&self, node: NodeRef) -> Result<Pos2, EditorError> {
        self.store
            .get(node)
            .map(|n| n.position)
            .ok_or(EditorError::InvalidNode(node))
    }

    fn connector(&self, node: NodeRef, index: usize) -> Result<&Connector, EditorError> {
        self.store
            .get(node)
            .ok_or(EditorError::InvalidNode(node))?
            .connectors
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(EditorError::InvalidConnector { node, index })
    }

    fn connector_mut(&mut self, node: NodeRef, index: usize) -> Option<&mut Connector> {
        self.store
            .get_mut(node)?
            .connectors
            .get_mut(index)?
            .as_mut()
    }
}
