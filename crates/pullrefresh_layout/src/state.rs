//! Pull edge states
//!
//! Each edge (header and footer) runs its own copy of the same machine:
//!
//! ```text
//! RESET -> PULL <-> RELEASE -> ACTIVE -> SUCCESS -> RESET   (header)
//!                                     -> RESET              (footer)
//! ```
//!
//! `PULL`/`RELEASE` describe a drag in progress: would a release start the
//! operation or not. `ACTIVE` means the operation was requested and has not
//! completed. `SUCCESS` holds the header's acknowledgment before it resets.

use std::fmt;

use pullrefresh_core::{EventId, StateTransitions};

/// Pull state machine events
pub mod pull_events {
    use pullrefresh_core::EventId;

    /// Drag moved the offset onto the edge, short of the trigger distance
    pub const DRAG_BELOW_TRIGGER: EventId = 1;
    /// Drag moved the offset to or past the trigger distance
    pub const DRAG_AT_TRIGGER: EventId = 2;
    /// Released at or past the trigger distance
    pub const RELEASE_ARMED: EventId = 3;
    /// Released short of the trigger distance
    pub const RELEASE_SHORT: EventId = 4;
    /// Offset went back to rest or crossed to the other edge
    pub const LEFT_EDGE: EventId = 5;
    /// Refresh completed
    pub const REFRESH_SUCCEEDED: EventId = 10;
    /// Load-more completed
    pub const LOAD_COMPLETED: EventId = 11;
    /// Success acknowledgment delay elapsed
    pub const SUCCESS_ELAPSED: EventId = 12;
    /// Content scrolled to its bottom with scroll-load enabled
    pub const AUTO_LOAD: EventId = 20;
}

/// One of the two pull zones
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top zone, revealed by pulling down (negative offset)
    Header,
    /// Bottom zone, revealed by pulling up (positive offset)
    Footer,
}

impl Edge {
    /// Edge revealed by a signed offset, `None` at rest
    pub fn from_offset(scroll_y: f32) -> Option<Edge> {
        if scroll_y < 0.0 {
            Some(Edge::Header)
        } else if scroll_y > 0.0 {
            Some(Edge::Footer)
        } else {
            None
        }
    }

    /// Sign of offsets on this edge
    pub fn sign(&self) -> f32 {
        match self {
            Edge::Header => -1.0,
            Edge::Footer => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Edge::Header => "header",
            Edge::Footer => "footer",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visual state of one edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeState {
    #[default]
    Reset,
    /// Dragging, release would not trigger
    Pull,
    /// Dragging, release would trigger
    Release,
    /// Operation in flight
    Active,
    /// Refresh finished, acknowledgment visible
    Success,
}

impl StateTransitions for EdgeState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use pull_events::*;
        match (self, event) {
            (EdgeState::Reset | EdgeState::Release, DRAG_BELOW_TRIGGER) => Some(EdgeState::Pull),
            (EdgeState::Reset | EdgeState::Pull, DRAG_AT_TRIGGER) => Some(EdgeState::Release),
            (EdgeState::Pull | EdgeState::Release, RELEASE_ARMED) => Some(EdgeState::Active),
            (EdgeState::Pull | EdgeState::Release, RELEASE_SHORT | LEFT_EDGE) => {
                Some(EdgeState::Reset)
            }
            (EdgeState::Active, REFRESH_SUCCEEDED) => Some(EdgeState::Success),
            (EdgeState::Active, LOAD_COMPLETED) => Some(EdgeState::Reset),
            (EdgeState::Success, SUCCESS_ELAPSED) => Some(EdgeState::Reset),
            (EdgeState::Reset, AUTO_LOAD) => Some(EdgeState::Active),
            _ => None,
        }
    }
}

impl EdgeState {
    /// Drag feedback states
    pub fn is_dragging(&self) -> bool {
        matches!(self, EdgeState::Pull | EdgeState::Release)
    }
}

#[cfg(test)]
mod tests {
    use super::pull_events::*;
    use super::*;
    use pullrefresh_core::StateCell;

    #[test]
    fn test_header_full_cycle() {
        let mut cell = StateCell::new(EdgeState::Reset);

        cell.send(DRAG_BELOW_TRIGGER);
        cell.send(DRAG_AT_TRIGGER);
        cell.send(RELEASE_ARMED);
        cell.send(REFRESH_SUCCEEDED);
        cell.send(SUCCESS_ELAPSED);

        assert_eq!(
            cell.visited(),
            vec![
                EdgeState::Pull,
                EdgeState::Release,
                EdgeState::Active,
                EdgeState::Success,
                EdgeState::Reset,
            ]
        );
    }

    #[test]
    fn test_pull_release_toggle() {
        let mut cell = StateCell::new(EdgeState::Reset);

        assert_eq!(cell.send(DRAG_BELOW_TRIGGER), Some(EdgeState::Pull));
        assert_eq!(cell.send(DRAG_BELOW_TRIGGER), None);
        assert_eq!(cell.send(DRAG_AT_TRIGGER), Some(EdgeState::Release));
        assert_eq!(cell.send(DRAG_BELOW_TRIGGER), Some(EdgeState::Pull));
        assert_eq!(cell.send(RELEASE_SHORT), Some(EdgeState::Reset));
    }

    #[test]
    fn test_first_update_past_trigger() {
        assert_eq!(
            EdgeState::Reset.on_event(DRAG_AT_TRIGGER),
            Some(EdgeState::Release)
        );
    }

    #[test]
    fn test_active_ignores_drag_events() {
        for event in [DRAG_BELOW_TRIGGER, DRAG_AT_TRIGGER, RELEASE_ARMED, LEFT_EDGE] {
            assert_eq!(EdgeState::Active.on_event(event), None);
        }
        assert_eq!(EdgeState::Success.on_event(DRAG_AT_TRIGGER), None);
    }

    #[test]
    fn test_footer_completion() {
        assert_eq!(
            EdgeState::Active.on_event(LOAD_COMPLETED),
            Some(EdgeState::Reset)
        );
        assert_eq!(EdgeState::Reset.on_event(LOAD_COMPLETED), None);
        assert_eq!(EdgeState::Reset.on_event(AUTO_LOAD), Some(EdgeState::Active));
    }

    #[test]
    fn test_edge_from_offset() {
        assert_eq!(Edge::from_offset(-1.0), Some(Edge::Header));
        assert_eq!(Edge::from_offset(0.5), Some(Edge::Footer));
        assert_eq!(Edge::from_offset(0.0), None);
        assert_eq!(Edge::Header.sign(), -1.0);
    }
}
