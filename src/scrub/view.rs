// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Visual model of the scrub track.
//!
//! A pure function of transport props and keyframes; the painter only
//! has to place the pieces.

use crate::models::playback::TransportState;
use crate::util::geometry::progress_fraction;

/// Horizontal extent of the track on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Track {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeMarker {
    pub time: f64,
    /// Offset from the track's left edge.
    pub x: f64,
}

/// Everything needed to paint the scrubber for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubFrame {
    pub fill_fraction: f64,
    pub fill_width: f64,
    /// Handle center, offset from the track's left edge.
    pub handle_x: f64,
    pub markers: Vec<KeyframeMarker>,
    /// Tick offsets from the track's left edge.
    pub ticks: Vec<f64>,
    pub current_label: String,
    pub duration_label: String,
    pub is_playing: bool,
    pub playback_speed: f64,
    pub keyframe_summary: String,
}

/// Build the scrub frame for the given props.
pub fn build(state: &TransportState, keyframes: &[f64], track: Track, tick_count: usize) -> ScrubFrame {
    let width = track.width.max(0.0);
    let fill_fraction = progress_fraction(state.current_time, state.duration);

    let markers = keyframes
        .iter()
        .map(|&time| KeyframeMarker {
            time,
            x: progress_fraction(time, state.duration) * width,
        })
        .collect();

    let ticks = match tick_count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| i as f64 * width / (n - 1) as f64).collect(),
    };

    let keyframe_summary = if keyframes.is_empty() {
        "No keyframes".to_string()
    } else {
        format!("Keyframes: {}", keyframes.len())
    };

    ScrubFrame {
        fill_fraction,
        fill_width: fill_fraction * width,
        handle_x: fill_fraction * width,
        markers,
        ticks,
        current_label: format_time(state.current_time),
        duration_label: format_time(state.duration),
        is_playing: state.is_playing,
        playback_speed: state.playback_speed,
        keyframe_summary,
    }
}

/// Format seconds as `m:ss.t`.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 { seconds } else { 0.0 };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = seconds.floor() as u64 % 60;
    let tenths = ((seconds % 1.0) * 10.0).floor() as u64;
    format!("{}:{:02}.{}", mins, secs, tenths)
}
