//! Content view capability
//!
//! The container never scrolls its content. It only asks whether the content
//! is pinned at one of its extremities, which decides whether a drag belongs
//! to the container or to the content.

use std::sync::{Arc, Mutex};

/// Scroll extremity queries for the wrapped content
pub trait ContentView {
    /// Whether the content can still scroll toward its top (finger moving down)
    fn can_scroll_up(&self) -> bool;

    /// Whether the content can still scroll toward its bottom (finger moving up)
    fn can_scroll_down(&self) -> bool;
}

/// Shared content, so the owner can keep scrolling it while the container holds it
impl<T: ContentView> ContentView for Arc<Mutex<T>> {
    fn can_scroll_up(&self) -> bool {
        self.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .can_scroll_up()
    }

    fn can_scroll_down(&self) -> bool {
        self.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .can_scroll_down()
    }
}

/// A vertically scrolling viewport over a list of known height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListViewport {
    /// Distance scrolled from the top (0 = at top)
    pub scroll_offset: f32,
    /// Total height of the list content
    pub content_height: f32,
    /// Visible height
    pub viewport_height: f32,
}

impl ListViewport {
    pub fn new(content_height: f32, viewport_height: f32) -> Self {
        Self {
            scroll_offset: 0.0,
            content_height,
            viewport_height,
        }
    }

    /// Maximum scroll offset (0 when the content fits)
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scroll by `dy` (positive = toward the bottom), clamped to bounds
    ///
    /// Returns the portion of `dy` actually consumed.
    pub fn scroll_by(&mut self, dy: f32) -> f32 {
        let previous = self.scroll_offset;
        self.scroll_offset = (self.scroll_offset + dy).clamp(0.0, self.max_scroll());
        self.scroll_offset - previous
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0.0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Grow the list, e.g. after a page of items was appended
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    pub fn is_at_top(&self) -> bool {
        self.scroll_offset <= 0.0
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset >= self.max_scroll()
    }
}

impl ContentView for ListViewport {
    fn can_scroll_up(&self) -> bool {
        !self.is_at_top()
    }

    fn can_scroll_down(&self) -> bool {
        !self.is_at_bottom()
    }
}
