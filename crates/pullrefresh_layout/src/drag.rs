//! Drag tracking
//!
//! Follows one active pointer through a touch sequence and turns its motion
//! into per-event vertical deltas. The tracker knows nothing about edges or
//! offsets; the container decides what a delta means.

use pullrefresh_core::{PointerId, TouchEvent, TouchPointer};

/// State of one touch interaction, from first down to up/cancel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer whose motion drives the drag
    pub active_pointer: PointerId,
    pub initial_x: f32,
    pub initial_y: f32,
    /// Y of the active pointer at the last applied delta
    pub last_y: f32,
    /// The container owns this gesture
    pub is_being_dragged: bool,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session at the first touch-down, replacing any stale one
    pub fn begin(&mut self, pointer: TouchPointer) {
        if self.session.is_some() {
            tracing::debug!("drag: discarding stale session on new touch-down");
        }
        self.session = Some(DragSession {
            active_pointer: pointer.id,
            initial_x: pointer.x,
            initial_y: pointer.y,
            last_y: pointer.y,
            is_being_dragged: false,
        });
    }

    /// Drop the session
    pub fn end(&mut self) -> Option<DragSession> {
        self.session.take()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_being_dragged(&self) -> bool {
        self.session.map_or(false, |s| s.is_being_dragged)
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.session.map(|s| s.active_pointer)
    }

    /// Position of the active pointer in `event`
    ///
    /// `None` when there is no session or the event does not carry the
    /// active pointer; the latter is logged and the event should be ignored.
    pub fn active_position(&self, event: &TouchEvent) -> Option<TouchPointer> {
        let session = self.session.as_ref()?;
        let found = event.find(session.active_pointer);
        if found.is_none() {
            tracing::warn!(
                "drag: {} event without active pointer {}",
                event.name(),
                session.active_pointer
            );
        }
        found
    }

    /// Vertical travel from the initial down if the motion reads as a
    /// vertical drag past `slop`
    pub fn vertical_intent(&self, position: TouchPointer, slop: f32) -> Option<f32> {
        let session = self.session.as_ref()?;
        let dx = position.x - session.initial_x;
        let dy = position.y - session.initial_y;
        (dx.abs() < dy.abs() && dy.abs() > slop).then_some(dy)
    }

    /// Mark the gesture as owned by the container
    pub fn claim(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.is_being_dragged = true;
        }
    }

    /// Finger travel since the last committed position
    pub fn delta_y(&self, y: f32) -> Option<f32> {
        self.session.map(|s| y - s.last_y)
    }

    /// Accept `y` as the new reference for the next delta
    pub fn commit_y(&mut self, y: f32) {
        if let Some(session) = self.session.as_mut() {
            session.last_y = y;
        }
    }

    /// A new finger takes over the drag
    pub fn on_pointer_down(&mut self, pointer: TouchPointer) {
        if let Some(session) = self.session.as_mut() {
            tracing::trace!(
                "drag: pointer {} takes over from {}",
                pointer.id,
                session.active_pointer
            );
            session.active_pointer = pointer.id;
            session.last_y = pointer.y;
        }
    }

    /// A finger lifted while `remaining` stay down
    ///
    /// If it was the active pointer, tracking moves to the first remaining
    /// pointer without resetting the drag; with nothing left the session ends.
    pub fn on_pointer_up(&mut self, lifted: PointerId, remaining: &[TouchPointer]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.active_pointer != lifted {
            return;
        }

        match remaining.iter().find(|p| p.id != lifted) {
            Some(next) => {
                tracing::trace!("drag: active pointer {} lifted, following {}", lifted, next.id);
                session.active_pointer = next.id;
                session.last_y = next.y;
            }
            None => {
                tracing::debug!("drag: active pointer {} lifted with no other pointer", lifted);
                self.session = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_at(x: f32, y: f32) -> DragTracker {
        let mut tracker = DragTracker::new();
        tracker.begin(TouchPointer::new(0, x, y));
        tracker
    }

    #[test]
    fn test_vertical_intent_requires_slop() {
        let tracker = tracker_at(50.0, 100.0);

        assert_eq!(tracker.vertical_intent(TouchPointer::new(0, 50.0, 108.0), 8.0), None);
        assert_eq!(
            tracker.vertical_intent(TouchPointer::new(0, 50.0, 109.0), 8.0),
            Some(9.0)
        );
        assert_eq!(
            tracker.vertical_intent(TouchPointer::new(0, 50.0, 80.0), 8.0),
            Some(-20.0)
        );
    }

    #[test]
    fn test_horizontal_motion_is_not_intent() {
        let tracker = tracker_at(50.0, 100.0);
        assert_eq!(tracker.vertical_intent(TouchPointer::new(0, 80.0, 120.0), 8.0), None);
        assert_eq!(tracker.vertical_intent(TouchPointer::new(0, 70.0, 120.0), 8.0), None);
    }

    #[test]
    fn test_delta_is_relative_to_committed_y() {
        let mut tracker = tracker_at(0.0, 100.0);
        tracker.claim();

        assert_eq!(tracker.delta_y(140.0), Some(40.0));
        tracker.commit_y(140.0);
        assert_eq!(tracker.delta_y(165.0), Some(25.0));
        assert!(tracker.is_being_dragged());
    }

    #[test]
    fn test_unknown_pointer_is_ignored() {
        let tracker = tracker_at(0.0, 100.0);
        assert_eq!(tracker.active_position(&TouchEvent::move_to(5, 0.0, 150.0)), None);
        assert!(tracker.active_position(&TouchEvent::move_to(0, 0.0, 150.0)).is_some());
    }

    #[test]
    fn test_active_pointer_lift_reassigns() {
        let mut tracker = tracker_at(0.0, 100.0);
        tracker.claim();
        tracker.on_pointer_down(TouchPointer::new(1, 0.0, 300.0));
        assert_eq!(tracker.active_pointer(), Some(1));

        tracker.on_pointer_up(1, &[TouchPointer::new(0, 0.0, 120.0)]);
        let session = tracker.session().copied().unwrap();
        assert_eq!(session.active_pointer, 0);
        assert_eq!(session.last_y, 120.0);
        assert!(session.is_being_dragged);
    }

    #[test]
    fn test_inactive_pointer_lift_keeps_tracking() {
        let mut tracker = tracker_at(0.0, 100.0);
        tracker.on_pointer_up(3, &[TouchPointer::new(0, 0.0, 100.0)]);
        assert_eq!(tracker.active_pointer(), Some(0));
    }

    #[test]
    fn test_last_pointer_lift_ends_session() {
        let mut tracker = tracker_at(0.0, 100.0);
        tracker.on_pointer_up(0, &[]);
        assert!(tracker.session().is_none());
        assert!(!tracker.is_being_dragged());
    }
}
