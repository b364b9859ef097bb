// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Palette, stroke widths, the accidental-click threshold for circles and
//! the allowed playback speeds. Read from `<config dir>/swingmark/config.yaml`
//! when present; every field falls back to its default.

use crate::models::style::{default_palette, Color, NamedColor, Style};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Markup editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    pub palette: Vec<NamedColor>,
    pub stroke_widths: Vec<u32>,
    pub default_style: Style,
    /// Circles must be strictly wider and taller than this to be kept.
    pub min_circle_extent: f64,
    pub font_size: f32,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            stroke_widths: vec![1, 2, 3, 4, 5],
            default_style: Style::default(),
            min_circle_extent: 10.0,
            font_size: 16.0,
        }
    }
}

impl MarkupConfig {
    pub fn allows_color(&self, color: Color) -> bool {
        self.palette.iter().any(|entry| entry.color == color)
    }

    pub fn allows_stroke_width(&self, width: u32) -> bool {
        self.stroke_widths.contains(&width)
    }
}

/// Scrub/transport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub speeds: Vec<f64>,
    pub tick_count: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            speeds: vec![0.5, 1.0],
            tick_count: 6,
        }
    }
}

impl TransportConfig {
    pub fn allows_speed(&self, speed: f64) -> bool {
        self.speeds.iter().any(|s| (s - speed).abs() < f64::EPSILON)
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub markup: MarkupConfig,
    pub transport: TransportConfig,
}

impl EditorConfig {
    /// Default location of the config file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("swingmark")
            .join("config.yaml")
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config.sanitized())
    }

    /// Replace empty selection sets with defaults so the editor always has
    /// something to offer.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.markup.palette.is_empty() {
            self.markup.palette = defaults.markup.palette;
        }
        if self.markup.stroke_widths.is_empty() {
            self.markup.stroke_widths = defaults.markup.stroke_widths;
        }
        if !self.markup.allows_color(self.markup.default_style.color) {
            self.markup.default_style.color = self.markup.palette[0].color;
        }
        if !self.markup.allows_stroke_width(self.markup.default_style.stroke_width) {
            self.markup.default_style.stroke_width = self.markup.stroke_widths[0];
        }
        self.transport.speeds.retain(|s| s.is_finite() && *s > 0.0);
        if self.transport.speeds.is_empty() {
            self.transport.speeds = defaults.transport.speeds;
        }
        self
    }
}
