// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: shapes, styles, playback state and saved documents.

pub mod playback;
pub mod project;
pub mod shape;
pub mod style;
