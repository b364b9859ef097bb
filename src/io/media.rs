// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Source frame loading.
//!
//! This module decodes captured video frames (any format the `image`
//! crate understands) into RGBA pixels suitable for display in egui.

use crate::error::{MarkupError, Result};
use std::path::{Path, PathBuf};

/// Where a source frame comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    /// Encoded image bytes plus a name used in logs and errors.
    Bytes { name: String, data: Vec<u8> },
}

impl ImageSource {
    pub fn name(&self) -> String {
        match self {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Bytes { name, .. } => name.clone(),
        }
    }
}

/// A decoded frame at its natural size.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// Unpremultiplied RGBA8, row-major.
    pub pixels: Vec<u8>,
}

/// Decode a frame from a source.
pub fn load(source: &ImageSource) -> Result<LoadedImage> {
    let decoded = match source {
        ImageSource::Path(path) => image::open(path),
        ImageSource::Bytes { data, .. } => image::load_from_memory(data),
    };

    let img = decoded.map_err(|reason| MarkupError::ImageLoad {
        source_name: source.name(),
        reason,
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Decode a frame from a file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    load(&ImageSource::Path(path.to_path_buf()))
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([20, 120, 40, 255]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}
