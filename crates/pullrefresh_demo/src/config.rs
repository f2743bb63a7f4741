//! Demo configuration file handling

use anyhow::{Context, Result};
use pullrefresh_layout::{IndicatorLabels, PullConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level demo configuration (demo.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub pull: PullConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default = "IndicatorLabels::header")]
    pub header: IndicatorLabels,
    #[serde(default = "IndicatorLabels::footer")]
    pub footer: IndicatorLabels,
}

/// Simulated list page
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    /// Items added by each refresh or load
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_item_height")]
    pub item_height: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_header_height")]
    pub header_height: f32,
    #[serde(default = "default_footer_height")]
    pub footer_height: f32,
    /// Simulated network time for a refresh or a load
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: f32,
    /// Loads stop adding items after this many pages
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_page_size() -> usize {
    20
}

fn default_item_height() -> f32 {
    48.0
}

fn default_viewport_height() -> f32 {
    800.0
}

fn default_viewport_width() -> f32 {
    480.0
}

fn default_header_height() -> f32 {
    60.0
}

fn default_footer_height() -> f32 {
    50.0
}

fn default_fetch_delay_ms() -> f32 {
    2000.0
}

fn default_max_pages() -> usize {
    5
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            item_height: default_item_height(),
            viewport_height: default_viewport_height(),
            viewport_width: default_viewport_width(),
            header_height: default_header_height(),
            footer_height: default_footer_height(),
            fetch_delay_ms: default_fetch_delay_ms(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pull: PullConfig::default(),
            page: PageConfig::default(),
            header: IndicatorLabels::header(),
            footer: IndicatorLabels::footer(),
        }
    }
}

impl DemoConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: DemoConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config
            .pull
            .validate()
            .with_context(|| format!("Invalid [pull] table in {}", path.display()))?;

        if config.page.page_size == 0 {
            anyhow::bail!("[page] page_size must be at least 1");
        }

        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
