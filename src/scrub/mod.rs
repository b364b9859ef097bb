// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video scrub track with keyframe markers.

pub mod controller;
pub mod view;

pub use controller::{ScrubController, TransportHost};
pub use view::{format_time, KeyframeMarker, ScrubFrame, Track};
