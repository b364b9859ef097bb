// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! swingmark - swing video review tools
//!
//! Two widgets for coach-side swing review: a markup editor that turns
//! pointer gestures over a captured frame into circles, lines, freehand
//! strokes and text, and a scrub track that maps pointer positions to seek
//! times and keeps a list of keyframe markers. Both are pure state over
//! host-supplied inputs; the `app` module is an egui host that drives them.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod markup;
pub mod models;
pub mod scrub;
pub mod ui;
pub mod util;
