// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved markup document.
//!
//! This is what the host writes when the editor hands back its shape
//! list: the frame it was drawn on plus the shapes themselves.

use super::shape::Shape;
use serde::{Deserialize, Serialize};

/// Complete markup data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupDocument {
    pub source_image: String,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Media time (seconds) the frame was captured at, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<f64>,
    pub shapes: Vec<Shape>,
}

impl MarkupDocument {
    /// Create a document for the given frame and shapes.
    pub fn new(source_image: String, frame_width: u32, frame_height: u32, shapes: Vec<Shape>) -> Self {
        Self {
            source_image,
            frame_width,
            frame_height,
            captured_at: None,
            shapes,
        }
    }

    pub fn with_captured_at(mut self, seconds: f64) -> Self {
        self.captured_at = Some(seconds);
        self
    }
}
