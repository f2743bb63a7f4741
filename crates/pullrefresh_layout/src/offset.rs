//! Scroll offset controller
//!
//! Owns the container's virtual offset `scroll_y`. Negative values reveal the
//! header, positive values reveal the footer and zero is rest. Drag motion is
//! damped before it is applied, and the offset may only enter an edge the
//! caller currently allows.

use crate::state::Edge;

/// Which edges a drag may move the offset onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeGate {
    pub header: bool,
    pub footer: bool,
}

impl EdgeGate {
    pub const BOTH: EdgeGate = EdgeGate {
        header: true,
        footer: true,
    };

    pub fn allows(&self, edge: Edge) -> bool {
        match edge {
            Edge::Header => self.header,
            Edge::Footer => self.footer,
        }
    }
}

/// Result of applying one drag step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetUpdate {
    pub previous: f32,
    pub current: f32,
    /// Edge the offset is on after the step
    pub edge: Option<Edge>,
    /// Edge the offset was on before the step, if it is no longer on it
    pub left: Option<Edge>,
    /// `|scroll_y|` is at or past the current edge's trigger distance
    pub at_trigger: bool,
    /// `min(1, |scroll_y| / trigger)` for the current edge
    pub ratio: f32,
}

impl OffsetUpdate {
    pub fn applied(&self) -> f32 {
        self.current - self.previous
    }
}

#[derive(Debug, Clone)]
pub struct OffsetController {
    scroll_y: f32,
    drag_rate: f32,
    refresh_trigger: f32,
    load_more_trigger: f32,
}

impl OffsetController {
    pub fn new(drag_rate: f32, refresh_trigger: f32, load_more_trigger: f32) -> Self {
        Self {
            scroll_y: 0.0,
            drag_rate,
            refresh_trigger,
            load_more_trigger,
        }
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn drag_rate(&self) -> f32 {
        self.drag_rate
    }

    /// Offset change for a finger movement of `finger_dy` (positive = down)
    pub fn damp(&self, finger_dy: f32) -> f32 {
        -finger_dy * self.drag_rate
    }

    /// Move the offset by `over`, refusing to enter an edge `gate` forbids
    pub fn apply(&mut self, over: f32, gate: EdgeGate) -> OffsetUpdate {
        let previous = self.scroll_y;
        let mut target = previous + over;

        let from = Edge::from_offset(previous);
        if let Some(to) = Edge::from_offset(target) {
            if from != Some(to) && !gate.allows(to) {
                target = 0.0;
            }
        }
        self.scroll_y = target;

        let edge = Edge::from_offset(target);
        let left = from.filter(|f| edge != Some(*f));

        tracing::trace!(
            "offset: {:.1} + {:.1} -> {:.1} ({:?})",
            previous,
            over,
            target,
            edge
        );

        OffsetUpdate {
            previous,
            current: target,
            edge,
            left,
            at_trigger: edge.map_or(false, |e| self.reached_trigger(e)),
            ratio: self.ratio(),
        }
    }

    /// Set the offset directly (settle animation frames)
    pub fn set(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }

    pub fn trigger(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Header => self.refresh_trigger,
            Edge::Footer => self.load_more_trigger,
        }
    }

    /// Raise an edge's trigger distance to at least `size`; it never shrinks
    pub fn grow_trigger(&mut self, edge: Edge, size: f32) {
        let trigger = match edge {
            Edge::Header => &mut self.refresh_trigger,
            Edge::Footer => &mut self.load_more_trigger,
        };
        if size > *trigger {
            tracing::debug!("offset: {} trigger {:.1} -> {:.1}", edge, *trigger, size);
            *trigger = size;
        }
    }

    /// Whether the offset sits on `edge` at or past its trigger distance
    pub fn reached_trigger(&self, edge: Edge) -> bool {
        Edge::from_offset(self.scroll_y) == Some(edge) && self.scroll_y.abs() >= self.trigger(edge)
    }

    /// Pull fraction on the current edge, 0 at rest
    pub fn ratio(&self) -> f32 {
        match Edge::from_offset(self.scroll_y) {
            None => 0.0,
            Some(edge) => {
                let trigger = self.trigger(edge);
                if trigger <= 0.0 {
                    1.0
                } else {
                    (self.scroll_y.abs() / trigger).min(1.0)
                }
            }
        }
    }
}
