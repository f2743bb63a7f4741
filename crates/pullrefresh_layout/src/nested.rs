//! Nested scrolling
//!
//! Cooperative scrolling between a scrollable child and its ancestors. A
//! nested-scroll-aware content view reports each scroll step twice: before
//! scrolling itself (pre-scroll, so ancestors may take part of the delta
//! first) and after (post-scroll, offering whatever it could not consume).
//!
//! Deltas use content scroll direction: positive `dy` scrolls the content
//! toward its bottom, which is the finger moving up.
//!
//! The container plays both roles. As a parent it turns leftover scroll at
//! the content's extremities into pull offset, and unwinds that offset first
//! when the scroll reverses. As a child it forwards what it does not use to
//! an optional ancestor through [`NestedScrollDispatcher`].

use std::sync::{Arc, Mutex, MutexGuard};

use pullrefresh_core::ScrollAxes;

use crate::refresh_layout::PullToRefreshLayout;
use crate::state::Edge;

/// Parent side of the nested scrolling protocol
pub trait NestedScrollParent {
    /// A descendant starts scrolling along `axes`; return true to take part
    fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool;

    /// Called after `on_start_nested_scroll` returned true
    fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes);

    /// Take part of a delta before the child scrolls; returns what was consumed
    fn on_nested_pre_scroll(&mut self, dx: f32, dy: f32) -> (f32, f32);

    /// Offer what the child could not consume; returns what was consumed of it
    fn on_nested_scroll(
        &mut self,
        dx_consumed: f32,
        dy_consumed: f32,
        dx_unconsumed: f32,
        dy_unconsumed: f32,
    ) -> (f32, f32);

    fn on_stop_nested_scroll(&mut self);

    /// Return true to consume the fling before the child sees it
    fn on_nested_pre_fling(&mut self, _velocity_x: f32, _velocity_y: f32) -> bool {
        false
    }

    /// Return true if the fling was handled
    fn on_nested_fling(&mut self, _velocity_x: f32, _velocity_y: f32, _consumed: bool) -> bool {
        false
    }

    /// Axes of the nested scroll currently accepted
    fn nested_scroll_axes(&self) -> ScrollAxes;
}

fn lock<T>(shared: &Mutex<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: NestedScrollParent> NestedScrollParent for Arc<Mutex<T>> {
    fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        lock(self).on_start_nested_scroll(axes)
    }

    fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes) {
        lock(self).on_nested_scroll_accepted(axes);
    }

    fn on_nested_pre_scroll(&mut self, dx: f32, dy: f32) -> (f32, f32) {
        lock(self).on_nested_pre_scroll(dx, dy)
    }

    fn on_nested_scroll(
        &mut self,
        dx_consumed: f32,
        dy_consumed: f32,
        dx_unconsumed: f32,
        dy_unconsumed: f32,
    ) -> (f32, f32) {
        lock(self).on_nested_scroll(dx_consumed, dy_consumed, dx_unconsumed, dy_unconsumed)
    }

    fn on_stop_nested_scroll(&mut self) {
        lock(self).on_stop_nested_scroll();
    }

    fn on_nested_pre_fling(&mut self, velocity_x: f32, velocity_y: f32) -> bool {
        lock(self).on_nested_pre_fling(velocity_x, velocity_y)
    }

    fn on_nested_fling(&mut self, velocity_x: f32, velocity_y: f32, consumed: bool) -> bool {
        lock(self).on_nested_fling(velocity_x, velocity_y, consumed)
    }

    fn nested_scroll_axes(&self) -> ScrollAxes {
        lock(self).nested_scroll_axes()
    }
}

/// Child side of the protocol: forwards to the nearest accepting ancestor
#[derive(Default)]
pub struct NestedScrollDispatcher {
    parent: Option<Box<dyn NestedScrollParent>>,
    enabled: bool,
    active: bool,
}

impl NestedScrollDispatcher {
    pub fn new(enabled: bool) -> Self {
        Self {
            parent: None,
            enabled,
            active: false,
        }
    }

    pub fn set_parent(&mut self, parent: Box<dyn NestedScrollParent>) {
        self.stop();
        self.parent = Some(parent);
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Disabling stops any nested scroll in progress
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.stop();
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// An ancestor accepted the current nested scroll
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self, axes: ScrollAxes) -> bool {
        if self.active {
            return true;
        }
        if !self.enabled || axes.is_empty() {
            return false;
        }
        if let Some(parent) = self.parent.as_deref_mut() {
            if parent.on_start_nested_scroll(axes) {
                parent.on_nested_scroll_accepted(axes);
                self.active = true;
            }
        }
        self.active
    }

    pub fn pre_scroll(&mut self, dx: f32, dy: f32) -> (f32, f32) {
        if !self.active || (dx == 0.0 && dy == 0.0) {
            return (0.0, 0.0);
        }
        match self.parent.as_deref_mut() {
            Some(parent) => parent.on_nested_pre_scroll(dx, dy),
            None => (0.0, 0.0),
        }
    }

    pub fn scroll(
        &mut self,
        dx_consumed: f32,
        dy_consumed: f32,
        dx_unconsumed: f32,
        dy_unconsumed: f32,
    ) -> (f32, f32) {
        if !self.active {
            return (0.0, 0.0);
        }
        match self.parent.as_deref_mut() {
            Some(parent) => {
                parent.on_nested_scroll(dx_consumed, dy_consumed, dx_unconsumed, dy_unconsumed)
            }
            None => (0.0, 0.0),
        }
    }

    pub fn pre_fling(&mut self, velocity_x: f32, velocity_y: f32) -> bool {
        if !self.active {
            return false;
        }
        self.parent
            .as_deref_mut()
            .map_or(false, |parent| parent.on_nested_pre_fling(velocity_x, velocity_y))
    }

    pub fn fling(&mut self, velocity_x: f32, velocity_y: f32, consumed: bool) -> bool {
        if !self.active {
            return false;
        }
        self.parent
            .as_deref_mut()
            .map_or(false, |parent| parent.on_nested_fling(velocity_x, velocity_y, consumed))
    }

    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(parent) = self.parent.as_deref_mut() {
            parent.on_stop_nested_scroll();
        }
    }
}

/// Per-container nested scrolling state
#[derive(Default)]
pub(crate) struct NestedState {
    /// Header-side leftover taken from the content (>= 0)
    pub(crate) total_unconsumed: f32,
    /// Footer-side leftover taken from the content (<= 0)
    pub(crate) total_load_unconsumed: f32,
    pub(crate) in_progress: bool,
    pub(crate) axes: ScrollAxes,
    pub(crate) dispatcher: NestedScrollDispatcher,
}

impl NestedState {
    pub(crate) fn new(dispatch_enabled: bool) -> Self {
        Self {
            dispatcher: NestedScrollDispatcher::new(dispatch_enabled),
            ..Default::default()
        }
    }
}

impl NestedScrollParent for PullToRefreshLayout {
    fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        self.enabled && axes.vertical()
    }

    fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes) {
        tracing::debug!("nested: scroll accepted, axes={:#b}", axes.bits());
        self.nested.axes = axes;
        self.nested.dispatcher.start(ScrollAxes::VERTICAL);
        self.nested.total_unconsumed = 0.0;
        self.nested.total_load_unconsumed = 0.0;
        self.nested.in_progress = true;
    }

    fn on_nested_pre_scroll(&mut self, dx: f32, dy: f32) -> (f32, f32) {
        let rate = self.offset.drag_rate();
        let mut consumed_y = 0.0;

        // Unwind a pull this interaction built up before the content scrolls
        if self.config.pull_refresh_enabled && dy > 0.0 && self.nested.total_unconsumed > 0.0 {
            let take = dy.min(self.nested.total_unconsumed);
            self.nested.total_unconsumed -= take;
            consumed_y += take;
            self.move_drag(take * rate);
        } else if self.config.pull_load_enabled
            && dy < 0.0
            && self.nested.total_load_unconsumed < 0.0
        {
            let take = dy.max(self.nested.total_load_unconsumed);
            self.nested.total_load_unconsumed -= take;
            consumed_y += take;
            self.move_drag(take * rate);
        }

        // Then push a parked in-flight indicator back toward rest, undamped
        let remaining = dy - consumed_y;
        let scroll_y = self.offset.scroll_y();
        if self.in_flight(Edge::Header) && remaining > 0.0 && scroll_y < 0.0 {
            let take = remaining.min(-scroll_y);
            consumed_y += take;
            self.move_drag(take);
        } else if self.in_flight(Edge::Footer) && remaining < 0.0 && scroll_y > 0.0 {
            let take = remaining.max(-scroll_y);
            consumed_y += take;
            self.move_drag(take);
        }

        let (parent_x, parent_y) = self.nested.dispatcher.pre_scroll(dx, dy - consumed_y);
        (parent_x, consumed_y + parent_y)
    }

    fn on_nested_scroll(
        &mut self,
        dx_consumed: f32,
        dy_consumed: f32,
        dx_unconsumed: f32,
        dy_unconsumed: f32,
    ) -> (f32, f32) {
        // Ancestors get the first look at the leftover
        let (parent_x, parent_y) = self.nested.dispatcher.scroll(
            dx_consumed,
            dy_consumed,
            dx_unconsumed,
            dy_unconsumed,
        );
        let dy = dy_unconsumed - parent_y;
        let rate = self.offset.drag_rate();
        let mut taken = 0.0;

        if dy < 0.0 && self.can_pull(Edge::Header) {
            self.nested.total_unconsumed += -dy;
            self.move_drag(dy * rate);
            taken = dy;
        } else if dy > 0.0 && self.can_pull(Edge::Footer) {
            self.nested.total_load_unconsumed -= dy;
            self.move_drag(dy * rate);
            taken = dy;
        }

        if dy_consumed > 0.0 {
            self.try_auto_load();
        }

        (parent_x, parent_y + taken)
    }

    fn on_stop_nested_scroll(&mut self) {
        tracing::debug!(
            "nested: scroll stopped, unconsumed={:.1}/{:.1}",
            self.nested.total_unconsumed,
            self.nested.total_load_unconsumed
        );
        self.nested.in_progress = false;
        self.nested.axes = ScrollAxes::NONE;

        if self.nested.total_unconsumed > 0.0 || self.nested.total_load_unconsumed < 0.0 {
            self.finish_drag();
        }
        self.nested.total_unconsumed = 0.0;
        self.nested.total_load_unconsumed = 0.0;

        self.nested.dispatcher.stop();
    }

    fn on_nested_pre_fling(&mut self, velocity_x: f32, velocity_y: f32) -> bool {
        self.nested.dispatcher.pre_fling(velocity_x, velocity_y)
    }

    fn on_nested_fling(&mut self, velocity_x: f32, velocity_y: f32, consumed: bool) -> bool {
        self.nested.dispatcher.fling(velocity_x, velocity_y, consumed)
    }

    fn nested_scroll_axes(&self) -> ScrollAxes {
        self.nested.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ListViewport;
    use crate::indicator::IndicatorSlot;
    use crate::state::EdgeState;

    #[derive(Default)]
    struct GreedyParent {
        accepted: bool,
        stopped: bool,
        pre_scroll_seen: Vec<f32>,
    }

    impl NestedScrollParent for GreedyParent {
        fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
            axes.vertical()
        }

        fn on_nested_scroll_accepted(&mut self, _axes: ScrollAxes) {
            self.accepted = true;
        }

        fn on_nested_pre_scroll(&mut self, _dx: f32, dy: f32) -> (f32, f32) {
            self.pre_scroll_seen.push(dy);
            (0.0, 0.0)
        }

        fn on_nested_scroll(&mut self, _: f32, _: f32, _: f32, dy_unconsumed: f32) -> (f32, f32) {
            // Swallow everything
            (0.0, dy_unconsumed)
        }

        fn on_stop_nested_scroll(&mut self) {
            self.stopped = true;
        }

        fn nested_scroll_axes(&self) -> ScrollAxes {
            ScrollAxes::VERTICAL
        }
    }

    fn layout() -> PullToRefreshLayout {
        let mut layout = PullToRefreshLayout::builder(ListViewport::new(100.0, 800.0))
            .header(IndicatorSlot::passive(60.0))
            .footer(IndicatorSlot::passive(50.0))
            .build()
            .unwrap();
        layout.measure(480.0, 800.0);
        layout
    }

    fn start(layout: &mut PullToRefreshLayout) {
        assert!(layout.on_start_nested_scroll(ScrollAxes::VERTICAL));
        layout.on_nested_scroll_accepted(ScrollAxes::VERTICAL);
    }

    #[test]
    fn test_rejects_horizontal_and_disabled() {
        let mut layout = layout();
        assert!(!layout.on_start_nested_scroll(ScrollAxes::HORIZONTAL));

        layout.set_enabled(false);
        assert!(!layout.on_start_nested_scroll(ScrollAxes::VERTICAL));
    }

    #[test]
    fn test_post_scroll_pulls_header() {
        let mut layout = layout();
        start(&mut layout);

        let consumed = layout.on_nested_scroll(0.0, 0.0, 0.0, -100.0);
        assert_eq!(consumed, (0.0, -100.0));
        assert_eq!(layout.scroll_y(), -50.0);
        assert_eq!(layout.header_state(), EdgeState::Pull);
        assert!(layout.is_nested_scroll_in_progress());
    }

    #[test]
    fn test_pre_scroll_unwinds_pull() {
        let mut layout = layout();
        start(&mut layout);
        layout.on_nested_scroll(0.0, 0.0, 0.0, -100.0);

        let consumed = layout.on_nested_pre_scroll(0.0, 40.0);
        assert_eq!(consumed, (0.0, 40.0));
        assert_eq!(layout.scroll_y(), -30.0);
        assert_eq!(layout.nested.total_unconsumed, 60.0);
    }

    #[test]
    fn test_pre_scroll_ignores_unrelated_direction() {
        let mut layout = layout();
        start(&mut layout);
        layout.on_nested_scroll(0.0, 0.0, 0.0, -100.0);

        assert_eq!(layout.on_nested_pre_scroll(0.0, -10.0), (0.0, 0.0));
        assert_eq!(layout.scroll_y(), -50.0);
    }

    #[test]
    fn test_stop_with_no_pull_does_nothing() {
        let mut layout = layout();
        start(&mut layout);
        layout.on_stop_nested_scroll();

        assert!(!layout.is_nested_scroll_in_progress());
        assert!(!layout.is_settling());
        assert_eq!(layout.header_state(), EdgeState::Reset);
    }

    #[test]
    fn test_ancestor_gets_first_look_at_leftover() {
        let mut layout = layout();
        let parent = Arc::new(Mutex::new(GreedyParent::default()));
        layout.set_nested_scroll_parent(parent.clone());
        start(&mut layout);
        assert!(parent.lock().unwrap().accepted);

        let consumed = layout.on_nested_scroll(0.0, 0.0, 0.0, -100.0);
        assert_eq!(consumed, (0.0, -100.0));
        assert_eq!(layout.scroll_y(), 0.0);

        layout.on_stop_nested_scroll();
        assert!(parent.lock().unwrap().stopped);
    }

    #[test]
    fn test_dispatch_disabled_skips_ancestor() {
        let mut layout = layout();
        let parent = Arc::new(Mutex::new(GreedyParent::default()));
        layout.set_nested_scroll_parent(parent.clone());
        layout.set_nested_scrolling_enabled(false);
        start(&mut layout);

        layout.on_nested_scroll(0.0, 0.0, 0.0, -100.0);
        assert!(!parent.lock().unwrap().accepted);
        assert_eq!(layout.scroll_y(), -50.0);
    }

    #[test]
    fn test_pre_scroll_remainder_forwarded() {
        let mut layout = layout();
        let parent = Arc::new(Mutex::new(GreedyParent::default()));
        layout.set_nested_scroll_parent(parent.clone());
        start(&mut layout);

        layout.on_nested_pre_scroll(0.0, 25.0);
        assert_eq!(parent.lock().unwrap().pre_scroll_seen, vec![25.0]);
    }

    #[test]
    fn test_dispatcher_without_parent() {
        let mut dispatcher = NestedScrollDispatcher::new(true);
        assert!(!dispatcher.start(ScrollAxes::VERTICAL));
        assert_eq!(dispatcher.pre_scroll(0.0, 10.0), (0.0, 0.0));
        assert!(!dispatcher.pre_fling(0.0, 100.0));
        dispatcher.stop();
    }
}
