//! Pull-to-refresh layout
//!
//! A container that wraps one scrollable content view between a header and
//! a footer indicator and adds two gestures on top of ordinary scrolling:
//!
//! - **Pull down to refresh**: dragging past the content's top reveals the
//!   header; releasing beyond the trigger distance starts a refresh
//! - **Pull up to load more**: the same at the bottom with the footer, or
//!   automatically when the content scrolls to its end (scroll-load)
//!
//! # Modules
//!
//! - [`drag`]: active-pointer tracking and vertical intent detection
//! - [`offset`]: damped container offset and trigger thresholds
//! - [`state`]: per-edge pull state machine
//! - [`nested`]: cooperative scrolling with nested-scroll-aware content
//! - [`settle`]: settle animation and delayed header reset
//! - [`indicator`]: header/footer visual protocol and stock renderers
//! - [`touch`]: gesture ownership arbitration
//!
//! Everything runs on the caller's thread. The host feeds touch events or
//! nested-scroll callbacks and calls [`PullToRefreshLayout::tick`] once per
//! frame while it returns true.

pub mod config;
pub mod content;
pub mod drag;
pub mod error;
pub mod indicator;
pub mod nested;
pub mod offset;
pub mod refresh_layout;
pub mod settle;
pub mod state;
pub mod touch;

pub use config::PullConfig;
pub use content::{ContentView, ListViewport};
pub use drag::{DragSession, DragTracker};
pub use error::{PullError, Result};
pub use indicator::{
    ArrowIndicator, IndicatorLabels, IndicatorSlot, IndicatorView, LoadingLayout,
    SpinnerIndicator,
};
pub use nested::{NestedScrollDispatcher, NestedScrollParent};
pub use offset::{EdgeGate, OffsetController, OffsetUpdate};
pub use refresh_layout::{
    ChildView, LayoutFrame, PullListener, PullToRefreshBuilder, PullToRefreshLayout, Rect,
};
pub use settle::{SettleController, SettleFrame, SettleTask};
pub use state::{pull_events, Edge, EdgeState};

/// Everything a host needs to embed the container
pub mod prelude {
    pub use crate::{
        ArrowIndicator, ChildView, ContentView, Edge, EdgeState, IndicatorLabels, IndicatorSlot,
        ListViewport, LoadingLayout, NestedScrollParent, PullConfig, PullError,
        PullToRefreshLayout, SpinnerIndicator,
    };
    pub use pullrefresh_core::{ScrollAxes, TouchEvent, TouchPointer};
}
