//! Touch arbitration
//!
//! Decides per event whether a gesture belongs to the container or to the
//! content. Until the container claims a gesture every event goes through
//! interception; once claimed, moves and releases drive the pull directly
//! until the session ends.

use pullrefresh_core::TouchEvent;

use crate::refresh_layout::PullToRefreshLayout;
use crate::state::Edge;

impl PullToRefreshLayout {
    /// Route one touch event
    ///
    /// Returns true if the container consumed the event. A false return
    /// means the host should deliver the event to the content.
    pub fn dispatch_touch_event(&mut self, event: &TouchEvent) -> bool {
        if matches!(event, TouchEvent::Down { .. }) || !self.drag.is_being_dragged() {
            self.on_intercept_touch_event(event)
        } else {
            self.on_touch_event(event)
        }
    }

    /// Observe an event before the content sees it; true claims the gesture
    pub fn on_intercept_touch_event(&mut self, event: &TouchEvent) -> bool {
        if !self.enabled || self.nested.in_progress {
            return false;
        }

        match event {
            TouchEvent::Down { pointer } => {
                self.drag.begin(*pointer);
            }
            TouchEvent::Move { .. } => {
                let Some(position) = self.drag.active_position(event) else {
                    return false;
                };
                let Some(dy) = self.drag.vertical_intent(position, self.config.touch_slop) else {
                    return false;
                };
                let edge = if dy > 0.0 { Edge::Header } else { Edge::Footer };
                if self.can_pull(edge) {
                    tracing::debug!("touch: claiming drag toward {} (dy={:.1})", edge, dy);
                    self.drag.claim();
                }
            }
            TouchEvent::PointerUp { pointer, pointers } => {
                self.drag.on_pointer_up(pointer.id, pointers);
            }
            TouchEvent::Up { .. } | TouchEvent::Cancel => {
                self.drag.end();
            }
            TouchEvent::PointerDown { .. } => {}
        }

        self.drag.is_being_dragged()
    }

    /// Handle an event of a gesture the container owns
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> bool {
        if !self.enabled || self.nested.in_progress {
            return false;
        }

        match event {
            TouchEvent::Down { pointer } => {
                self.drag.begin(*pointer);
                false
            }
            TouchEvent::Move { .. } => {
                let Some(position) = self.drag.active_position(event) else {
                    return false;
                };
                let Some(delta) = self.drag.delta_y(position.y) else {
                    return false;
                };
                if self.is_passthrough(delta) {
                    return false;
                }
                self.drag.commit_y(position.y);
                let over = self.offset.damp(delta);
                self.move_drag(over);
                true
            }
            TouchEvent::PointerDown { pointer, .. } => {
                self.drag.on_pointer_down(*pointer);
                true
            }
            TouchEvent::PointerUp { pointer, pointers } => {
                let was_dragging = self.drag.is_being_dragged();
                self.drag.on_pointer_up(pointer.id, pointers);
                if was_dragging && self.drag.session().is_none() {
                    self.finish_drag();
                }
                true
            }
            TouchEvent::Up { .. } => {
                if self.drag.active_position(event).is_none() {
                    return false;
                }
                let was_dragging = self.drag.is_being_dragged();
                self.drag.end();
                if was_dragging {
                    self.finish_drag();
                }
                was_dragging
            }
            TouchEvent::Cancel => {
                if self.drag.end().is_some() {
                    tracing::debug!(
                        "touch: cancelled, offset left at {:.1}",
                        self.offset.scroll_y()
                    );
                }
                false
            }
        }
    }

    /// Motion that would reveal an edge the container may not open
    fn is_passthrough(&self, finger_dy: f32) -> bool {
        let scroll_y = self.offset.scroll_y();
        (finger_dy > 0.0 && scroll_y <= 0.0 && !self.edge_enabled(Edge::Header))
            || (finger_dy < 0.0 && scroll_y >= 0.0 && !self.edge_enabled(Edge::Footer))
    }
}
