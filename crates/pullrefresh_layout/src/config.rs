//! Container configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! drag_rate = 0.4
//! settle_easing = "ease_out_cubic"
//! pull_load_enabled = false
//! ```

use std::fs;
use std::path::Path;

use pullrefresh_animation::Easing;
use serde::{Deserialize, Serialize};

use crate::error::{PullError, Result};

/// Tunables and capability flags for [`PullToRefreshLayout`](crate::PullToRefreshLayout)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PullConfig {
    /// Fraction of finger travel applied to the offset
    pub drag_rate: f32,
    /// Vertical travel before a drag is claimed (pixels)
    pub touch_slop: f32,
    /// Duration of settle animations
    pub settle_duration_ms: u32,
    /// How long the refresh success state stays visible
    pub reset_delay_ms: u32,
    /// Curve for settle animations
    pub settle_easing: Easing,
    /// Minimum header trigger distance; grows to the measured header height
    pub refresh_trigger_offset: f32,
    /// Minimum footer trigger distance; grows to the measured footer height
    pub load_more_trigger_offset: f32,
    pub pull_refresh_enabled: bool,
    pub pull_load_enabled: bool,
    /// Start load-more when the content scrolls itself to the bottom
    pub scroll_load_enabled: bool,
    pub nested_scrolling_enabled: bool,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            drag_rate: 0.5,
            touch_slop: 8.0,
            settle_duration_ms: 500,
            reset_delay_ms: 500,
            settle_easing: Easing::ViscousFluid,
            refresh_trigger_offset: 0.0,
            load_more_trigger_offset: 0.0,
            pull_refresh_enabled: true,
            pull_load_enabled: true,
            scroll_load_enabled: false,
            nested_scrolling_enabled: true,
        }
    }
}

impl PullConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: PullConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| PullError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.drag_rate > 0.0 && self.drag_rate <= 1.0) {
            return Err(PullError::InvalidConfig(format!(
                "drag_rate must be in (0, 1], got {}",
                self.drag_rate
            )));
        }
        if !(self.touch_slop >= 0.0 && self.touch_slop.is_finite()) {
            return Err(PullError::InvalidConfig(format!(
                "touch_slop must be a non-negative number, got {}",
                self.touch_slop
            )));
        }
        for (name, value) in [
            ("refresh_trigger_offset", self.refresh_trigger_offset),
            ("load_more_trigger_offset", self.load_more_trigger_offset),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(PullError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn drag_rate(mut self, rate: f32) -> Self {
        self.drag_rate = rate;
        self
    }

    pub fn touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    pub fn settle_duration_ms(mut self, ms: u32) -> Self {
        self.settle_duration_ms = ms;
        self
    }

    pub fn reset_delay_ms(mut self, ms: u32) -> Self {
        self.reset_delay_ms = ms;
        self
    }

    pub fn settle_easing(mut self, easing: Easing) -> Self {
        self.settle_easing = easing;
        self
    }

    pub fn refresh_trigger_offset(mut self, offset: f32) -> Self {
        self.refresh_trigger_offset = offset;
        self
    }

    pub fn load_more_trigger_offset(mut self, offset: f32) -> Self {
        self.load_more_trigger_offset = offset;
        self
    }

    pub fn pull_refresh_enabled(mut self, enabled: bool) -> Self {
        self.pull_refresh_enabled = enabled;
        self
    }

    pub fn pull_load_enabled(mut self, enabled: bool) -> Self {
        self.pull_load_enabled = enabled;
        self
    }

    pub fn scroll_load_enabled(mut self, enabled: bool) -> Self {
        self.scroll_load_enabled = enabled;
        self
    }

    pub fn nested_scrolling_enabled(mut self, enabled: bool) -> Self {
        self.nested_scrolling_enabled = enabled;
        self
    }
}
