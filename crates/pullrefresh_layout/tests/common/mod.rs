//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use pullrefresh_layout::prelude::*;

pub const HEADER_HEIGHT: f32 = 60.0;
pub const FOOTER_HEIGHT: f32 = 50.0;
pub const FRAME_MS: f32 = 16.0;

/// One notification received by a [`RecordingIndicator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    Pull(f32),
    Release,
    Refreshing,
    Success,
    Reset,
}

/// Indicator that remembers every notification
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub notices: Vec<Notice>,
    pub last_updated: Option<String>,
}

impl RecordingIndicator {
    pub fn shared() -> Arc<Mutex<RecordingIndicator>> {
        Arc::new(Mutex::new(RecordingIndicator::default()))
    }
}

impl LoadingLayout for RecordingIndicator {
    fn on_pull_to_refresh(&mut self, fraction: f32) {
        self.notices.push(Notice::Pull(fraction));
    }

    fn on_release_to_refresh(&mut self) {
        self.notices.push(Notice::Release);
    }

    fn on_refreshing(&mut self) {
        self.notices.push(Notice::Refreshing);
    }

    fn on_refresh_success(&mut self) {
        self.notices.push(Notice::Success);
    }

    fn on_reset(&mut self) {
        self.notices.push(Notice::Reset);
    }

    fn set_last_updated_label(&mut self, label: &str) {
        self.last_updated = Some(label.to_string());
    }
}

/// A container around a shared list with recording indicators
pub struct Harness {
    pub layout: PullToRefreshLayout,
    pub list: Arc<Mutex<ListViewport>>,
    pub header: Arc<Mutex<RecordingIndicator>>,
    pub footer: Arc<Mutex<RecordingIndicator>>,
    pub refreshes: Rc<Cell<u32>>,
    pub loads: Rc<Cell<u32>>,
}

impl Harness {
    /// Short list that fits the viewport: ready for both pulls
    pub fn new() -> Self {
        Self::with_list(ListViewport::new(400.0, 800.0), PullConfig::default())
    }

    pub fn with_config(config: PullConfig) -> Self {
        Self::with_list(ListViewport::new(400.0, 800.0), config)
    }

    pub fn with_list(list: ListViewport, config: PullConfig) -> Self {
        let list = Arc::new(Mutex::new(list));
        let header = RecordingIndicator::shared();
        let footer = RecordingIndicator::shared();

        let mut layout = PullToRefreshLayout::builder(list.clone())
            .config(config)
            .header(IndicatorSlot::new(HEADER_HEIGHT, header.clone()))
            .footer(IndicatorSlot::new(FOOTER_HEIGHT, footer.clone()))
            .build()
            .unwrap();
        layout.measure(480.0, 800.0);

        let refreshes = Rc::new(Cell::new(0));
        let counter = refreshes.clone();
        layout.set_on_refresh_listener(move |_| counter.set(counter.get() + 1));

        let loads = Rc::new(Cell::new(0));
        let counter = loads.clone();
        layout.set_on_load_more_listener(move |_| counter.set(counter.get() + 1));

        Self {
            layout,
            list,
            header,
            footer,
            refreshes,
            loads,
        }
    }

    pub fn touch(&mut self, event: TouchEvent) -> bool {
        self.layout.dispatch_touch_event(&event)
    }

    /// Down at `from`, then one move per entry of `path`, single pointer at x = 100
    pub fn drag(&mut self, from: f32, path: &[f32]) {
        self.touch(TouchEvent::down(0, 100.0, from));
        for &y in path {
            self.touch(TouchEvent::move_to(0, 100.0, y));
        }
    }

    pub fn release(&mut self, y: f32) -> bool {
        self.touch(TouchEvent::up(0, 100.0, y))
    }

    /// Tick until the container is idle; returns elapsed milliseconds
    pub fn settle(&mut self) -> f32 {
        let mut elapsed = 0.0;
        while self.layout.tick(FRAME_MS) {
            elapsed += FRAME_MS;
            assert!(elapsed < 10_000.0, "container never settled");
        }
        elapsed + FRAME_MS
    }

    /// Tick for at least `ms`
    pub fn run_for(&mut self, ms: f32) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            self.layout.tick(FRAME_MS);
            elapsed += FRAME_MS;
        }
    }

    pub fn header_notices(&self) -> Vec<Notice> {
        self.header.lock().unwrap().notices.clone()
    }

    pub fn footer_notices(&self) -> Vec<Notice> {
        self.footer.lock().unwrap().notices.clone()
    }

    pub fn clear_notices(&self) {
        self.header.lock().unwrap().notices.clear();
        self.footer.lock().unwrap().notices.clear();
    }
}
