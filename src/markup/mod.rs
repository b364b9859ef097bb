// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame markup editor: gesture handling and canvas rendering.

pub mod engine;
pub mod render;

pub use engine::{AnnotationEngine, EditMode, GestureStart};
pub use render::{DisplayList, DrawCommand, Stroke};
