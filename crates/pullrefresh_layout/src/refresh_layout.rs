//! Pull-to-refresh container
//!
//! [`PullToRefreshLayout`] wraps one scrollable content child between an
//! optional header and an optional footer. Dragging past the content's top
//! reveals the header, dragging past its bottom reveals the footer, and
//! releasing beyond the trigger distance starts a refresh or load-more.
//!
//! Offsets follow scroll convention: `scroll_y < 0` means the header is
//! showing by `|scroll_y|` pixels, `scroll_y > 0` means the footer is.
//!
//! Touch input arrives through [`dispatch_touch_event`](PullToRefreshLayout::dispatch_touch_event),
//! nested scrolling through the [`NestedScrollParent`](crate::NestedScrollParent)
//! impl. Both paths move the offset through the same `move_drag` step and
//! release through the same `finish_drag` step. Animations advance in
//! [`tick`](PullToRefreshLayout::tick), which the host calls once per frame
//! while it returns true.
//!
//! # Example
//!
//! ```rust
//! use pullrefresh_layout::prelude::*;
//!
//! let mut layout = PullToRefreshLayout::builder(ListViewport::new(2000.0, 800.0))
//!     .header(IndicatorSlot::new(60.0, ArrowIndicator::default()))
//!     .footer(IndicatorSlot::new(50.0, SpinnerIndicator::default()))
//!     .build()
//!     .unwrap();
//! layout.measure(480.0, 800.0);
//!
//! layout.set_on_refresh_listener(|layout| {
//!     // Fetch, then later:
//!     layout.set_pull_down_refresh_complete();
//! });
//!
//! layout.dispatch_touch_event(&TouchEvent::down(0, 100.0, 100.0));
//! layout.dispatch_touch_event(&TouchEvent::move_to(0, 100.0, 110.0));
//! layout.dispatch_touch_event(&TouchEvent::move_to(0, 100.0, 240.0));
//! layout.dispatch_touch_event(&TouchEvent::up(0, 100.0, 240.0));
//!
//! while layout.tick(16.0) {}
//! assert_eq!(layout.scroll_y(), 0.0);
//! ```

use pullrefresh_core::StateCell;

use crate::config::PullConfig;
use crate::content::ContentView;
use crate::drag::DragTracker;
use crate::error::{PullError, Result};
use crate::indicator::{IndicatorSlot, LoadingLayout};
use crate::nested::{NestedScrollParent, NestedState};
use crate::offset::{EdgeGate, OffsetController};
use crate::settle::{SettleController, SettleTask};
use crate::state::{pull_events, Edge, EdgeState};

/// Callback invoked with the container when an operation is requested
pub type PullListener = Box<dyn FnMut(&mut PullToRefreshLayout)>;

/// A child handed to [`PullToRefreshLayout::from_children`], tagged by role
pub enum ChildView {
    Header(IndicatorSlot),
    Content(Box<dyn ContentView>),
    Footer(IndicatorSlot),
    /// A child without a container role; counted, then ignored
    Unassigned(String),
}

impl ChildView {
    pub fn content(content: impl ContentView + 'static) -> Self {
        ChildView::Content(Box::new(content))
    }

    fn role(&self) -> &'static str {
        match self {
            ChildView::Header(_) => "header",
            ChildView::Content(_) => "content",
            ChildView::Footer(_) => "footer",
            ChildView::Unassigned(_) => "unassigned",
        }
    }
}

/// Axis-aligned rectangle in container coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Child frames from a layout pass
///
/// Frames are unscrolled; render everything translated by `translate_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutFrame {
    pub header: Option<Rect>,
    pub content: Rect,
    pub footer: Option<Rect>,
    pub translate_y: f32,
}

/// Builder for [`PullToRefreshLayout`]
pub struct PullToRefreshBuilder {
    config: PullConfig,
    content: Box<dyn ContentView>,
    header: Option<IndicatorSlot>,
    footer: Option<IndicatorSlot>,
}

impl PullToRefreshBuilder {
    pub fn config(mut self, config: PullConfig) -> Self {
        self.config = config;
        self
    }

    pub fn header(mut self, header: IndicatorSlot) -> Self {
        self.header = Some(header);
        self
    }

    pub fn footer(mut self, footer: IndicatorSlot) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn build(self) -> Result<PullToRefreshLayout> {
        let mut children = Vec::with_capacity(3);
        if let Some(header) = self.header {
            children.push(ChildView::Header(header));
        }
        children.push(ChildView::Content(self.content));
        if let Some(footer) = self.footer {
            children.push(ChildView::Footer(footer));
        }
        PullToRefreshLayout::from_children(self.config, children)
    }
}

/// Pull-to-refresh / pull-up-to-load-more container
pub struct PullToRefreshLayout {
    pub(crate) config: PullConfig,
    pub(crate) enabled: bool,
    pub(crate) content: Box<dyn ContentView>,
    pub(crate) header: Option<IndicatorSlot>,
    pub(crate) footer: Option<IndicatorSlot>,
    pub(crate) drag: DragTracker,
    pub(crate) offset: OffsetController,
    header_state: StateCell<EdgeState>,
    footer_state: StateCell<EdgeState>,
    refreshing: bool,
    loading: bool,
    pub(crate) nested: NestedState,
    settle: SettleController,
    on_refresh: Option<PullListener>,
    on_load_more: Option<PullListener>,
    size: (f32, f32),
}

impl PullToRefreshLayout {
    /// Container with default config around `content`, without header or footer
    pub fn new(content: impl ContentView + 'static) -> Self {
        Self::assemble(PullConfig::default(), Box::new(content), None, None)
    }

    pub fn builder(content: impl ContentView + 'static) -> PullToRefreshBuilder {
        PullToRefreshBuilder {
            config: PullConfig::default(),
            content: Box::new(content),
            header: None,
            footer: None,
        }
    }

    /// Assemble from role-tagged children
    ///
    /// At most three children are accepted and exactly one must be the
    /// content. A missing header or footer leaves that edge inert.
    pub fn from_children(config: PullConfig, children: Vec<ChildView>) -> Result<Self> {
        if children.len() > 3 {
            return Err(PullError::TooManyChildren(children.len()));
        }
        config.validate()?;

        let mut header = None;
        let mut content = None;
        let mut footer = None;
        for child in children {
            let role = child.role();
            let duplicate = match child {
                ChildView::Header(slot) => header.replace(slot).is_some(),
                ChildView::Content(view) => content.replace(view).is_some(),
                ChildView::Footer(slot) => footer.replace(slot).is_some(),
                ChildView::Unassigned(name) => {
                    tracing::warn!("pull layout: ignoring child {:?} without a role", name);
                    false
                }
            };
            if duplicate {
                return Err(PullError::DuplicateRole(role));
            }
        }

        let content = content.ok_or(PullError::MissingContent)?;
        if header.is_none() {
            tracing::debug!("pull layout: no header child, pull-down refresh is inert");
        }
        if footer.is_none() {
            tracing::debug!("pull layout: no footer child, pull-up load is inert");
        }

        Ok(Self::assemble(config, content, header, footer))
    }

    fn assemble(
        config: PullConfig,
        content: Box<dyn ContentView>,
        header: Option<IndicatorSlot>,
        footer: Option<IndicatorSlot>,
    ) -> Self {
        let mut offset = OffsetController::new(
            config.drag_rate,
            config.refresh_trigger_offset,
            config.load_more_trigger_offset,
        );
        if let Some(slot) = &header {
            offset.grow_trigger(Edge::Header, slot.measured_height);
        }
        if let Some(slot) = &footer {
            offset.grow_trigger(Edge::Footer, slot.measured_height);
        }

        let settle = SettleController::new(
            config.settle_duration_ms,
            config.reset_delay_ms,
            config.settle_easing,
        );
        let nested = NestedState::new(config.nested_scrolling_enabled);

        let mut layout = Self {
            config,
            enabled: true,
            content,
            header,
            footer,
            drag: DragTracker::new(),
            offset,
            header_state: StateCell::new(EdgeState::Reset),
            footer_state: StateCell::new(EdgeState::Reset),
            refreshing: false,
            loading: false,
            nested,
            settle,
            on_refresh: None,
            on_load_more: None,
            size: (0.0, 0.0),
        };
        layout.notify(Edge::Header, |indicator| indicator.on_reset());
        layout.notify(Edge::Footer, |indicator| indicator.on_reset());
        layout
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Measure header and footer at most `height` tall; trigger distances
    /// grow to the measured sizes
    pub fn measure(&mut self, width: f32, height: f32) {
        self.size = (width, height);
        if let Some(slot) = self.header.as_mut() {
            let measured = slot.measure(height);
            self.offset.grow_trigger(Edge::Header, measured);
        }
        if let Some(slot) = self.footer.as_mut() {
            let measured = slot.measure(height);
            self.offset.grow_trigger(Edge::Footer, measured);
        }
    }

    /// Place children: header just above the content, footer just below it
    pub fn layout(&self) -> LayoutFrame {
        let (width, height) = self.size;
        LayoutFrame {
            header: self
                .header
                .as_ref()
                .map(|slot| Rect::new(0.0, -slot.measured_height, width, slot.measured_height)),
            content: Rect::new(0.0, 0.0, width, height),
            footer: self
                .footer
                .as_ref()
                .map(|slot| Rect::new(0.0, height, width, slot.measured_height)),
            translate_y: -self.offset.scroll_y(),
        }
    }

    // =========================================================================
    // Control surface
    // =========================================================================

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_pull_refresh_enabled(&mut self, enabled: bool) {
        self.config.pull_refresh_enabled = enabled;
    }

    pub fn is_pull_refresh_enabled(&self) -> bool {
        self.config.pull_refresh_enabled
    }

    pub fn set_pull_load_enabled(&mut self, enabled: bool) {
        self.config.pull_load_enabled = enabled;
    }

    pub fn is_pull_load_enabled(&self) -> bool {
        self.config.pull_load_enabled
    }

    pub fn set_scroll_load_enabled(&mut self, enabled: bool) {
        self.config.scroll_load_enabled = enabled;
    }

    pub fn is_scroll_load_enabled(&self) -> bool {
        self.config.scroll_load_enabled
    }

    pub fn set_on_refresh_listener(
        &mut self,
        listener: impl FnMut(&mut PullToRefreshLayout) + 'static,
    ) {
        self.on_refresh = Some(Box::new(listener));
    }

    pub fn set_on_load_more_listener(
        &mut self,
        listener: impl FnMut(&mut PullToRefreshLayout) + 'static,
    ) {
        self.on_load_more = Some(Box::new(listener));
    }

    /// Forward a "last updated" text to the header
    pub fn set_last_updated_label(&mut self, label: &str) {
        self.notify(Edge::Header, |indicator| indicator.set_last_updated_label(label));
    }

    /// Content is at its top, so a downward drag may reveal the header
    pub fn is_ready_for_pull_down(&self) -> bool {
        !self.content.can_scroll_up()
    }

    /// Content is at its bottom, so an upward drag may reveal the footer
    pub fn is_ready_for_pull_up(&self) -> bool {
        !self.content.can_scroll_down()
    }

    /// Acknowledge a finished refresh
    ///
    /// The header shows its success state, then after the reset delay the
    /// offset settles to rest and the header resets.
    pub fn set_pull_down_refresh_complete(&mut self) {
        if !self.refreshing {
            tracing::debug!("pull layout: refresh complete without a refresh in flight");
            return;
        }
        if self
            .transition(Edge::Header, pull_events::REFRESH_SUCCEEDED)
            .is_some()
        {
            self.settle.schedule_header_reset();
        }
    }

    /// Acknowledge a finished load-more; the footer settles away immediately
    pub fn set_pull_up_refresh_complete(&mut self) {
        if !self.loading {
            tracing::debug!("pull layout: load complete without a load in flight");
            return;
        }
        let scroll_y = self.offset.scroll_y();
        if scroll_y > 0.0 {
            self.settle.settle_to(scroll_y, 0.0);
        }
        self.loading = false;
        self.transition(Edge::Footer, pull_events::LOAD_COMPLETED);
    }

    /// Tell the container its content scrolled on its own
    ///
    /// With scroll-load enabled, reaching the bottom starts a load-more.
    pub fn notify_content_scrolled(&mut self) {
        self.try_auto_load();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn scroll_y(&self) -> f32 {
        self.offset.scroll_y()
    }

    pub fn state(&self, edge: Edge) -> EdgeState {
        self.state_cell(edge).current()
    }

    pub fn header_state(&self) -> EdgeState {
        self.header_state.current()
    }

    pub fn footer_state(&self) -> EdgeState {
        self.footer_state.current()
    }

    /// States entered by `edge`, oldest first
    pub fn state_history(&self, edge: Edge) -> Vec<EdgeState> {
        self.state_cell(edge).visited()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn refresh_trigger_offset(&self) -> f32 {
        self.offset.trigger(Edge::Header)
    }

    pub fn load_more_trigger_offset(&self) -> f32 {
        self.offset.trigger(Edge::Footer)
    }

    pub fn is_being_dragged(&self) -> bool {
        self.drag.is_being_dragged()
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_settling()
    }

    pub fn is_nested_scroll_in_progress(&self) -> bool {
        self.nested.in_progress
    }

    /// Install the enclosing nested-scroll ancestor
    pub fn set_nested_scroll_parent(&mut self, parent: impl NestedScrollParent + 'static) {
        self.nested.dispatcher.set_parent(Box::new(parent));
    }

    pub fn set_nested_scrolling_enabled(&mut self, enabled: bool) {
        self.nested.dispatcher.set_enabled(enabled);
    }

    pub fn is_nested_scrolling_enabled(&self) -> bool {
        self.nested.dispatcher.is_enabled()
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance settle animation, delayed resets and indicator animations
    ///
    /// Returns true while another frame is needed.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let frame = self.settle.tick(dt_ms);
        if let Some(scroll_y) = frame.offset {
            self.offset.set(scroll_y);
        }
        if frame.finished && self.offset.scroll_y() == 0.0 {
            self.reset_idle_edges();
        }
        for task in frame.tasks {
            match task {
                SettleTask::ResetHeader => self.reset_header(),
            }
        }

        let header_animating = self.header.as_mut().map_or(false, |slot| slot.tick(dt_ms));
        let footer_animating = self.footer.as_mut().map_or(false, |slot| slot.tick(dt_ms));

        self.settle.has_pending_work() || header_animating || footer_animating
    }

    pub fn has_pending_work(&self) -> bool {
        self.settle.has_pending_work()
    }

    // =========================================================================
    // Pull logic
    // =========================================================================

    pub(crate) fn edge_enabled(&self, edge: Edge) -> bool {
        match edge {
            Edge::Header => self.config.pull_refresh_enabled && self.header.is_some(),
            Edge::Footer => self.config.pull_load_enabled && self.footer.is_some(),
        }
    }

    pub(crate) fn content_ready(&self, edge: Edge) -> bool {
        match edge {
            Edge::Header => self.is_ready_for_pull_down(),
            Edge::Footer => self.is_ready_for_pull_up(),
        }
    }

    /// Edge enabled, present and content pinned at that extremity
    pub(crate) fn can_pull(&self, edge: Edge) -> bool {
        self.edge_enabled(edge) && self.content_ready(edge)
    }

    pub(crate) fn in_flight(&self, edge: Edge) -> bool {
        match edge {
            Edge::Header => self.refreshing,
            Edge::Footer => self.loading,
        }
    }

    fn state_cell(&self, edge: Edge) -> &StateCell<EdgeState> {
        match edge {
            Edge::Header => &self.header_state,
            Edge::Footer => &self.footer_state,
        }
    }

    fn slot_mut(&mut self, edge: Edge) -> Option<&mut IndicatorSlot> {
        match edge {
            Edge::Header => self.header.as_mut(),
            Edge::Footer => self.footer.as_mut(),
        }
    }

    fn slot_size(&self, edge: Edge) -> f32 {
        let slot = match edge {
            Edge::Header => self.header.as_ref(),
            Edge::Footer => self.footer.as_ref(),
        };
        slot.map_or(0.0, |slot| slot.measured_height)
    }

    /// Offset at which an in-flight indicator stays visible
    fn park_offset(&self, edge: Edge) -> f32 {
        edge.sign() * self.slot_size(edge)
    }

    fn notify(&mut self, edge: Edge, f: impl FnOnce(&mut dyn LoadingLayout)) {
        if let Some(slot) = self.slot_mut(edge) {
            slot.notify(f);
        }
    }

    /// Apply a state event to `edge` and notify its indicator of the new state
    fn transition(&mut self, edge: Edge, event: pullrefresh_core::EventId) -> Option<EdgeState> {
        let cell = match edge {
            Edge::Header => &mut self.header_state,
            Edge::Footer => &mut self.footer_state,
        };
        let from = cell.current();
        let to = cell.send(event)?;
        tracing::debug!("pull layout: {} {:?} -> {:?}", edge, from, to);

        let ratio = self.offset.ratio();
        self.notify(edge, |indicator| match to {
            EdgeState::Reset => indicator.on_reset(),
            EdgeState::Pull => indicator.on_pull_to_refresh(ratio),
            EdgeState::Release => indicator.on_release_to_refresh(),
            EdgeState::Active => indicator.on_refreshing(),
            EdgeState::Success => indicator.on_refresh_success(),
        });
        Some(to)
    }

    /// Single entry point for drag-driven offset changes
    pub(crate) fn move_drag(&mut self, over: f32) {
        self.settle.abort();

        let gate = EdgeGate {
            header: self.can_pull(Edge::Header),
            footer: self.can_pull(Edge::Footer),
        };
        let update = self.offset.apply(over, gate);

        if let Some(left) = update.left {
            if !self.in_flight(left) {
                self.transition(left, pull_events::LEFT_EDGE);
            }
        }

        let Some(edge) = update.edge else {
            return;
        };
        if self.in_flight(edge) {
            return;
        }

        let event = if update.at_trigger {
            pull_events::DRAG_AT_TRIGGER
        } else {
            pull_events::DRAG_BELOW_TRIGGER
        };
        if self.transition(edge, event).is_none() && self.state(edge) == EdgeState::Pull {
            // Still pulling: keep the indicator's fraction current
            let ratio = update.ratio;
            self.notify(edge, |indicator| indicator.on_pull_to_refresh(ratio));
        }
    }

    /// Release logic shared by finger lift and nested-scroll stop
    pub(crate) fn finish_drag(&mut self) {
        let scroll_y = self.offset.scroll_y();
        let Some(edge) = Edge::from_offset(scroll_y) else {
            return;
        };
        let park = self.park_offset(edge);

        if self.in_flight(edge) {
            // Never reissue; just tuck an over-pulled indicator back
            if scroll_y.abs() > park.abs() {
                self.settle.settle_to(scroll_y, park);
            }
            return;
        }

        if self.offset.reached_trigger(edge) {
            tracing::debug!("pull layout: {} released at {:.1}, triggering", edge, scroll_y);
            self.settle.settle_to(scroll_y, park);
            self.transition(edge, pull_events::DRAG_AT_TRIGGER);
            self.transition(edge, pull_events::RELEASE_ARMED);
            self.start_operation(edge);
        } else {
            tracing::debug!("pull layout: {} released short at {:.1}", edge, scroll_y);
            self.settle.settle_to(scroll_y, 0.0);
            self.transition(edge, pull_events::RELEASE_SHORT);
        }
    }

    /// Set the in-flight flag and invoke the edge's listener
    fn start_operation(&mut self, edge: Edge) {
        match edge {
            Edge::Header => {
                self.refreshing = true;
                if let Some(mut listener) = self.on_refresh.take() {
                    listener(self);
                    if self.on_refresh.is_none() {
                        self.on_refresh = Some(listener);
                    }
                }
            }
            Edge::Footer => {
                self.loading = true;
                if let Some(mut listener) = self.on_load_more.take() {
                    listener(self);
                    if self.on_load_more.is_none() {
                        self.on_load_more = Some(listener);
                    }
                }
            }
        }
    }

    /// Start a load-more because the content reached its bottom by itself
    pub(crate) fn try_auto_load(&mut self) {
        if !self.config.scroll_load_enabled
            || !self.edge_enabled(Edge::Footer)
            || self.loading
            || self.drag.is_being_dragged()
            || self.offset.scroll_y() != 0.0
            || !self.is_ready_for_pull_up()
        {
            return;
        }
        if self.transition(Edge::Footer, pull_events::AUTO_LOAD).is_none() {
            return;
        }

        tracing::debug!("pull layout: content reached bottom, loading more");
        let park = self.park_offset(Edge::Footer);
        self.settle.settle_to(0.0, park);
        self.start_operation(Edge::Footer);
    }

    /// Delayed end of the header success state
    fn reset_header(&mut self) {
        let scroll_y = self.offset.scroll_y();
        if scroll_y < 0.0 {
            self.settle.settle_to(scroll_y, 0.0);
        }
        self.refreshing = false;
        self.transition(Edge::Header, pull_events::SUCCESS_ELAPSED);
    }

    /// Offset came to rest: drop drag feedback on edges with nothing in flight
    fn reset_idle_edges(&mut self) {
        for edge in [Edge::Header, Edge::Footer] {
            if !self.in_flight(edge) && self.state(edge).is_dragging() {
                self.transition(edge, pull_events::LEFT_EDGE);
            }
        }
    }
}

impl std::fmt::Debug for PullToRefreshLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullToRefreshLayout")
            .field("scroll_y", &self.offset.scroll_y())
            .field("header_state", &self.header_state.current())
            .field("footer_state", &self.footer_state.current())
            .field("refreshing", &self.refreshing)
            .field("loading", &self.loading)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .finish_non_exhaustive()
    }
}
