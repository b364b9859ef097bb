// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Errors surfaced to the host by the markup editor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    /// The source frame could not be read or decoded. The canvas stays
    /// unusable for drawing until a later load succeeds.
    #[error("failed to load source image {source_name}: {reason}")]
    ImageLoad {
        source_name: String,
        #[source]
        reason: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, MarkupError>;
