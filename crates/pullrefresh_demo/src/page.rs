//! Simulated list page
//!
//! A list inside the pull container whose refreshes and loads complete
//! after a simulated network delay. Gestures are scripted: touch drags for
//! the pull gestures, nested scroll steps for a list that scrolls itself.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use pullrefresh_animation::FrameScheduler;
use pullrefresh_layout::prelude::*;
use pullrefresh_layout::IndicatorView;

use crate::config::DemoConfig;

/// Finger travel per scripted move event
const MOVE_STEP: f32 = 10.0;

/// Where scripted touches land
const TOUCH_X: f32 = 240.0;

/// Simulated fetch results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageTask {
    Refreshed,
    Loaded,
}

pub struct DemoPage {
    layout: PullToRefreshLayout,
    list: Arc<Mutex<ListViewport>>,
    header: Arc<Mutex<ArrowIndicator>>,
    footer: Arc<Mutex<SpinnerIndicator>>,
    fetches: Rc<RefCell<FrameScheduler<PageTask>>>,
    page_size: usize,
    item_height: f32,
    max_pages: usize,
    items: usize,
    elapsed_ms: f32,
}

impl DemoPage {
    pub fn new(config: &DemoConfig) -> Result<Self> {
        let page = &config.page;
        let items = page.page_size;
        let list = Arc::new(Mutex::new(ListViewport::new(
            items as f32 * page.item_height,
            page.viewport_height,
        )));
        let header = Arc::new(Mutex::new(ArrowIndicator::new(config.header.clone())));
        let footer = Arc::new(Mutex::new(SpinnerIndicator::new(config.footer.clone())));

        let mut layout = PullToRefreshLayout::builder(list.clone())
            .config(config.pull.clone())
            .header(IndicatorSlot::new(page.header_height, header.clone()))
            .footer(IndicatorSlot::new(page.footer_height, footer.clone()))
            .build()?;
        layout.measure(page.viewport_width, page.viewport_height);

        let fetches = Rc::new(RefCell::new(FrameScheduler::new()));
        let delay = page.fetch_delay_ms;

        let scheduler = fetches.clone();
        layout.set_on_refresh_listener(move |_| {
            tracing::info!("page: refreshing, result in {:.0}ms", delay);
            scheduler.borrow_mut().post_delayed(delay, PageTask::Refreshed);
        });

        let scheduler = fetches.clone();
        layout.set_on_load_more_listener(move |_| {
            tracing::info!("page: loading more, result in {:.0}ms", delay);
            scheduler.borrow_mut().post_delayed(delay, PageTask::Loaded);
        });

        Ok(Self {
            layout,
            list,
            header,
            footer,
            fetches,
            page_size: page.page_size,
            item_height: page.item_height,
            max_pages: page.max_pages,
            items,
            elapsed_ms: 0.0,
        })
    }

    pub fn items(&self) -> usize {
        self.items
    }

    pub fn layout(&self) -> &PullToRefreshLayout {
        &self.layout
    }

    pub fn header_view(&self) -> IndicatorView {
        lock(&self.header).view()
    }

    pub fn footer_view(&self) -> IndicatorView {
        lock(&self.footer).view()
    }

    pub fn list_offset(&self) -> f32 {
        lock(&self.list).scroll_offset
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance one frame; true while anything is still running
    pub fn frame(&mut self, dt_ms: f32) -> bool {
        self.elapsed_ms += dt_ms;

        let done = self.fetches.borrow_mut().advance(dt_ms);
        for task in done {
            match task {
                PageTask::Refreshed => self.finish_refresh(),
                PageTask::Loaded => self.finish_load(),
            }
        }

        let animating = self.layout.tick(dt_ms);
        animating || self.fetches.borrow().has_pending()
    }

    /// Run frames until idle or `max_frames` elapse; returns frames run
    pub fn run_until_idle(&mut self, dt_ms: f32, max_frames: u32) -> u32 {
        for frame in 1..=max_frames {
            if !self.frame(dt_ms) {
                return frame;
            }
        }
        tracing::warn!("page: still busy after {} frames", max_frames);
        max_frames
    }

    fn finish_refresh(&mut self) {
        self.items = self.page_size;
        self.set_item_count();
        lock(&self.list).scroll_to_top();

        let label = format!("Last updated at {:.1}s", self.elapsed_ms / 1000.0);
        self.layout.set_last_updated_label(&label);
        self.layout.set_pull_down_refresh_complete();
        tracing::info!("page: refreshed, {} items", self.items);
    }

    fn finish_load(&mut self) {
        if self.items < self.page_size * self.max_pages {
            self.items += self.page_size;
            self.set_item_count();
        } else {
            tracing::info!("page: no more items");
        }
        self.layout.set_pull_up_refresh_complete();
        tracing::info!("page: loaded, {} items", self.items);
    }

    fn set_item_count(&mut self) {
        let height = self.items as f32 * self.item_height;
        lock(&self.list).set_content_height(height);
    }

    // =========================================================================
    // Scripted input
    // =========================================================================

    /// Touch drag from `from_y` to `to_y` in small steps, then lift
    pub fn drag(&mut self, from_y: f32, to_y: f32, dt_ms: f32) {
        tracing::debug!("script: drag {:.0} -> {:.0}", from_y, to_y);
        self.layout
            .dispatch_touch_event(&TouchEvent::down(0, TOUCH_X, from_y));

        let direction = (to_y - from_y).signum();
        let mut y = from_y;
        while (to_y - y) * direction > 0.0 {
            y = if (to_y - y).abs() < MOVE_STEP {
                to_y
            } else {
                y + MOVE_STEP * direction
            };
            self.layout
                .dispatch_touch_event(&TouchEvent::move_to(0, TOUCH_X, y));
            self.frame(dt_ms);
        }

        self.layout
            .dispatch_touch_event(&TouchEvent::up(0, TOUCH_X, y));
    }

    /// Pull the header down by `distance` of finger travel
    pub fn pull_down(&mut self, distance: f32, dt_ms: f32) {
        let top = 100.0;
        self.drag(top, top + distance, dt_ms);
    }

    /// Pull the footer up by `distance` of finger travel
    pub fn pull_up(&mut self, distance: f32, dt_ms: f32) {
        let bottom = 700.0;
        self.drag(bottom, bottom - distance, dt_ms);
    }

    /// Scroll the list by `dy` (positive toward its bottom) the way a
    /// nested-scroll-aware list would, one `step` per frame
    pub fn scroll_list(&mut self, dy: f32, step: f32, dt_ms: f32) {
        tracing::debug!("script: nested scroll {:.0}", dy);
        if !self.layout.on_start_nested_scroll(ScrollAxes::VERTICAL) {
            lock(&self.list).scroll_by(dy);
            self.layout.notify_content_scrolled();
            return;
        }
        self.layout.on_nested_scroll_accepted(ScrollAxes::VERTICAL);

        let direction = dy.signum();
        let mut remaining = dy.abs();
        while remaining > 0.0 {
            let delta = remaining.min(step) * direction;
            remaining -= delta.abs();

            let (_, pre_consumed) = self.layout.on_nested_pre_scroll(0.0, delta);
            let left = delta - pre_consumed;
            let consumed = lock(&self.list).scroll_by(left);
            self.layout.on_nested_scroll(0.0, consumed, 0.0, left - consumed);
            self.frame(dt_ms);
        }

        self.layout.on_stop_nested_scroll();
    }
}

fn lock<T>(shared: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
