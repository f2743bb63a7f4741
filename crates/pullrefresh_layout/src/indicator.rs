//! Header and footer indicators
//!
//! The container drives its header and footer through [`LoadingLayout`], a
//! five-notification visual protocol. A slot without an indicator is passive:
//! it still occupies space and sets the trigger distance, but receives no
//! notifications.
//!
//! Two headless renderers are provided. [`ArrowIndicator`] is the header
//! style (label, flipping arrow, spinner, success acknowledgment) and
//! [`SpinnerIndicator`] the footer style. Both expose an [`IndicatorView`]
//! snapshot for whatever actually paints them.

use std::sync::{Arc, Mutex, MutexGuard};

use pullrefresh_animation::{Easing, Tween};
use serde::{Deserialize, Serialize};

/// Arrow rotation when flipped to "release" (degrees)
const ARROW_FLIPPED_DEGREES: f32 = -180.0;

/// Arrow flip duration
const ARROW_FLIP_MS: u32 = 500;

/// Visual-state protocol implemented by header and footer renderers
pub trait LoadingLayout {
    /// Dragging short of the trigger distance; `fraction` is in `[0, 1]`
    fn on_pull_to_refresh(&mut self, fraction: f32);

    /// Dragging at or past the trigger distance
    fn on_release_to_refresh(&mut self);

    /// Operation in flight
    fn on_refreshing(&mut self);

    /// Refresh completed (header only)
    fn on_refresh_success(&mut self);

    fn on_reset(&mut self);

    /// Advance internal animations; true while more frames are needed
    fn tick(&mut self, _dt_ms: f32) -> bool {
        false
    }

    fn set_last_updated_label(&mut self, _label: &str) {}
}

fn lock<T>(shared: &Mutex<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Shared indicators, so the owner can inspect what the container drove
impl<T: LoadingLayout> LoadingLayout for Arc<Mutex<T>> {
    fn on_pull_to_refresh(&mut self, fraction: f32) {
        lock(self).on_pull_to_refresh(fraction);
    }

    fn on_release_to_refresh(&mut self) {
        lock(self).on_release_to_refresh();
    }

    fn on_refreshing(&mut self) {
        lock(self).on_refreshing();
    }

    fn on_refresh_success(&mut self) {
        lock(self).on_refresh_success();
    }

    fn on_reset(&mut self) {
        lock(self).on_reset();
    }

    fn tick(&mut self, dt_ms: f32) -> bool {
        lock(self).tick(dt_ms)
    }

    fn set_last_updated_label(&mut self, label: &str) {
        lock(self).set_last_updated_label(label);
    }
}

/// A header or footer child of the container
pub struct IndicatorSlot {
    /// Height the child asks for
    pub preferred_height: f32,
    /// Height granted by the last measure pass
    pub measured_height: f32,
    indicator: Option<Box<dyn LoadingLayout>>,
}

impl IndicatorSlot {
    /// Slot driven by `indicator`
    pub fn new(preferred_height: f32, indicator: impl LoadingLayout + 'static) -> Self {
        Self {
            preferred_height,
            measured_height: preferred_height,
            indicator: Some(Box::new(indicator)),
        }
    }

    /// Slot that takes space but has no visual states
    pub fn passive(preferred_height: f32) -> Self {
        Self {
            preferred_height,
            measured_height: preferred_height,
            indicator: None,
        }
    }

    pub fn is_passive(&self) -> bool {
        self.indicator.is_none()
    }

    /// Measure at most `available`
    pub fn measure(&mut self, available: f32) -> f32 {
        self.measured_height = self.preferred_height.min(available).max(0.0);
        self.measured_height
    }

    /// Run `f` against the indicator, if there is one
    pub fn notify(&mut self, f: impl FnOnce(&mut dyn LoadingLayout)) {
        if let Some(indicator) = self.indicator.as_deref_mut() {
            f(indicator);
        }
    }

    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.indicator
            .as_deref_mut()
            .map_or(false, |indicator| indicator.tick(dt_ms))
    }
}

impl std::fmt::Debug for IndicatorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorSlot")
            .field("preferred_height", &self.preferred_height)
            .field("measured_height", &self.measured_height)
            .field("passive", &self.is_passive())
            .finish()
    }
}

/// Texts shown by an indicator in each state
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndicatorLabels {
    pub pull: String,
    pub release: String,
    pub running: String,
    pub success: String,
}

impl Default for IndicatorLabels {
    fn default() -> Self {
        Self::header()
    }
}

impl IndicatorLabels {
    pub fn header() -> Self {
        Self {
            pull: "Pull down to refresh".to_string(),
            release: "Release to refresh".to_string(),
            running: "Refreshing...".to_string(),
            success: "Refresh succeeded".to_string(),
        }
    }

    pub fn footer() -> Self {
        Self {
            pull: "Pull up to load more".to_string(),
            release: "Release to load more".to_string(),
            running: "Loading...".to_string(),
            success: String::new(),
        }
    }
}

/// What an indicator currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorView {
    pub label: Option<String>,
    pub last_updated: Option<String>,
    pub spinner_visible: bool,
    pub arrow_visible: bool,
    /// Arrow rotation in degrees, 0 pointing toward the pull direction
    pub arrow_rotation: f32,
    /// Last reported pull fraction
    pub fraction: f32,
}

/// Arrow that flips between its resting and release orientation
#[derive(Debug, Clone)]
struct FlipArrow {
    rotation: Tween,
    flipped: bool,
}

impl FlipArrow {
    fn new() -> Self {
        Self {
            rotation: Tween::new(0.0, ARROW_FLIP_MS, Easing::Linear),
            flipped: false,
        }
    }

    fn flip(&mut self) {
        if !self.flipped {
            self.flipped = true;
            self.rotation.animate_to(ARROW_FLIPPED_DEGREES);
        }
    }

    fn unflip(&mut self) {
        if self.flipped {
            self.flipped = false;
            self.rotation.animate_to(0.0);
        }
    }
}

/// Header-style indicator: label, flipping arrow, spinner and success text
#[derive(Debug, Clone)]
pub struct ArrowIndicator {
    labels: IndicatorLabels,
    label: Option<String>,
    last_updated: Option<String>,
    spinner_visible: bool,
    arrow_visible: bool,
    arrow: FlipArrow,
    fraction: f32,
}

impl Default for ArrowIndicator {
    fn default() -> Self {
        Self::new(IndicatorLabels::header())
    }
}

impl ArrowIndicator {
    pub fn new(labels: IndicatorLabels) -> Self {
        let mut indicator = Self {
            labels,
            label: None,
            last_updated: None,
            spinner_visible: false,
            arrow_visible: false,
            arrow: FlipArrow::new(),
            fraction: 0.0,
        };
        indicator.on_reset();
        indicator
    }

    pub fn view(&self) -> IndicatorView {
        IndicatorView {
            label: self.label.clone(),
            last_updated: self.last_updated.clone(),
            spinner_visible: self.spinner_visible,
            arrow_visible: self.arrow_visible,
            arrow_rotation: self.arrow.rotation.value(),
            fraction: self.fraction,
        }
    }
}

impl LoadingLayout for ArrowIndicator {
    fn on_pull_to_refresh(&mut self, fraction: f32) {
        self.label = Some(self.labels.pull.clone());
        self.spinner_visible = false;
        self.arrow_visible = true;
        self.fraction = fraction;
        self.arrow.unflip();
    }

    fn on_release_to_refresh(&mut self) {
        self.label = Some(self.labels.release.clone());
        self.spinner_visible = false;
        self.arrow_visible = true;
        self.fraction = 1.0;
        self.arrow.flip();
    }

    fn on_refreshing(&mut self) {
        self.label = Some(self.labels.running.clone());
        self.spinner_visible = true;
        self.arrow_visible = false;
    }

    fn on_refresh_success(&mut self) {
        self.label = Some(self.labels.success.clone());
        self.spinner_visible = false;
        self.arrow_visible = false;
    }

    fn on_reset(&mut self) {
        self.label = None;
        self.spinner_visible = false;
        self.arrow_visible = false;
        self.fraction = 0.0;
        self.arrow.unflip();
    }

    fn tick(&mut self, dt_ms: f32) -> bool {
        self.arrow.rotation.tick(dt_ms)
    }

    fn set_last_updated_label(&mut self, label: &str) {
        self.last_updated = (!label.is_empty()).then(|| label.to_string());
    }
}

/// Footer-style indicator: label, flipping arrow and spinner
#[derive(Debug, Clone)]
pub struct SpinnerIndicator {
    labels: IndicatorLabels,
    label: Option<String>,
    spinner_visible: bool,
    arrow_visible: bool,
    arrow: FlipArrow,
    fraction: f32,
}

impl Default for SpinnerIndicator {
    fn default() -> Self {
        Self::new(IndicatorLabels::footer())
    }
}

impl SpinnerIndicator {
    pub fn new(labels: IndicatorLabels) -> Self {
        Self {
            labels,
            label: None,
            spinner_visible: false,
            arrow_visible: true,
            arrow: FlipArrow::new(),
            fraction: 0.0,
        }
    }

    pub fn view(&self) -> IndicatorView {
        IndicatorView {
            label: self.label.clone(),
            last_updated: None,
            spinner_visible: self.spinner_visible,
            arrow_visible: self.arrow_visible,
            arrow_rotation: self.arrow.rotation.value(),
            fraction: self.fraction,
        }
    }
}

impl LoadingLayout for SpinnerIndicator {
    fn on_pull_to_refresh(&mut self, fraction: f32) {
        self.label = Some(self.labels.pull.clone());
        self.spinner_visible = false;
        self.arrow_visible = true;
        self.fraction = fraction;
        self.arrow.unflip();
    }

    fn on_release_to_refresh(&mut self) {
        self.label = Some(self.labels.release.clone());
        self.spinner_visible = false;
        self.arrow_visible = true;
        self.fraction = 1.0;
        self.arrow.flip();
    }

    fn on_refreshing(&mut self) {
        self.label = Some(self.labels.running.clone());
        self.spinner_visible = true;
        self.arrow_visible = false;
    }

    // The footer has no acknowledgment state
    fn on_refresh_success(&mut self) {}

    fn on_reset(&mut self) {
        self.label = None;
        self.spinner_visible = false;
        self.arrow_visible = true;
        self.fraction = 0.0;
    }

    fn tick(&mut self, dt_ms: f32) -> bool {
        self.arrow.rotation.tick(dt_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_indicator_states() {
        let mut header = ArrowIndicator::default();
        assert_eq!(header.view().label, None);
        assert!(!header.view().arrow_visible);

        header.on_pull_to_refresh(0.4);
        let view = header.view();
        assert_eq!(view.label.as_deref(), Some("Pull down to refresh"));
        assert!(view.arrow_visible);
        assert_eq!(view.fraction, 0.4);

        header.on_refreshing();
        assert!(header.view().spinner_visible);
        assert!(!header.view().arrow_visible);

        header.on_refresh_success();
        assert_eq!(header.view().label.as_deref(), Some("Refresh succeeded"));
        assert!(!header.view().spinner_visible);
    }

    #[test]
    fn test_arrow_flips_on_release() {
        let mut header = ArrowIndicator::default();
        header.on_pull_to_refresh(0.9);
        header.on_release_to_refresh();

        while header.tick(16.0) {}
        assert_eq!(header.view().arrow_rotation, ARROW_FLIPPED_DEGREES);

        header.on_pull_to_refresh(0.8);
        assert!(header.tick(16.0));
        while header.tick(16.0) {}
        assert_eq!(header.view().arrow_rotation, 0.0);
    }

    #[test]
    fn test_repeated_release_does_not_restart_flip() {
        let mut header = ArrowIndicator::default();
        header.on_release_to_refresh();
        header.tick(250.0);
        let mid = header.view().arrow_rotation;

        header.on_release_to_refresh();
        assert_eq!(header.view().arrow_rotation, mid);
    }

    #[test]
    fn test_last_updated_label() {
        let mut header = ArrowIndicator::default();
        header.set_last_updated_label("Updated 12:00");
        assert_eq!(header.view().last_updated.as_deref(), Some("Updated 12:00"));

        header.set_last_updated_label("");
        assert_eq!(header.view().last_updated, None);
    }

    #[test]
    fn test_spinner_indicator_ignores_success() {
        let mut footer = SpinnerIndicator::default();
        footer.on_refreshing();
        footer.on_refresh_success();
        assert_eq!(footer.view().label.as_deref(), Some("Loading..."));

        footer.on_reset();
        assert_eq!(footer.view().label, None);
        assert!(footer.view().arrow_visible);
    }

    #[test]
    fn test_passive_slot() {
        let mut slot = IndicatorSlot::passive(60.0);
        assert!(slot.is_passive());

        let mut called = false;
        slot.notify(|_| called = true);
        assert!(!called);
        assert_eq!(slot.measure(40.0), 40.0);
        assert_eq!(slot.measure(400.0), 60.0);
    }

    #[test]
    fn test_shared_indicator_slot() {
        let shared = Arc::new(Mutex::new(ArrowIndicator::default()));
        let mut slot = IndicatorSlot::new(60.0, shared.clone());

        slot.notify(|indicator| indicator.on_refreshing());
        assert!(shared.lock().unwrap().view().spinner_visible);
    }
}
