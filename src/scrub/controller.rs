// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scrub/transport controller.
//!
//! Holds no clock of its own. The host passes a [`TransportState`] snapshot
//! in on every render and receives seek, play/pause and speed intents
//! through [`TransportHost`]. Seeking is live: every pointer or touch
//! position during a drag is forwarded immediately.

use super::view::{self, ScrubFrame, Track};
use crate::config::TransportConfig;
use crate::models::playback::TransportState;
use crate::util::geometry::track_fraction;

/// Callbacks into the host that owns the media element.
pub trait TransportHost {
    fn seek(&mut self, time: f64);
    fn toggle_play_pause(&mut self);
    fn set_speed(&mut self, speed: f64);
    /// Notification after a keyframe was added at `time`.
    fn keyframe_added(&mut self, _time: f64) {}
}

/// The seekable progress track plus its keyframe markers.
pub struct ScrubController {
    config: TransportConfig,
    /// Props from the most recent render.
    state: TransportState,
    track: Track,
    keyframes: Vec<f64>,
    dragging: bool,
}

impl ScrubController {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            state: TransportState::default(),
            track: Track::default(),
            keyframes: Vec::new(),
            dragging: false,
        }
    }

    /// Record the latest props and build the visual model for them.
    pub fn render(&mut self, state: TransportState, track: Track) -> ScrubFrame {
        self.state = state;
        self.track = track;
        view::build(&state, &self.keyframes, track, self.config.tick_count)
    }

    pub fn speeds(&self) -> &[f64] {
        &self.config.speeds
    }

    pub fn keyframes(&self) -> &[f64] {
        &self.keyframes
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Seek time for an absolute pointer x, clamped to `[0, duration]`.
    pub fn time_at(&self, x: f64) -> f64 {
        let duration = if self.state.duration.is_finite() {
            self.state.duration.max(0.0)
        } else {
            0.0
        };
        track_fraction(x, self.track.left, self.track.width) * duration
    }

    fn seek_to(&self, x: f64, host: &mut dyn TransportHost) {
        host.seek(self.time_at(x));
    }

    pub fn pointer_down(&mut self, x: f64, host: &mut dyn TransportHost) {
        self.dragging = true;
        self.seek_to(x, host);
    }

    /// Seeks only while a drag is in progress.
    pub fn pointer_move(&mut self, x: f64, host: &mut dyn TransportHost) {
        if self.dragging {
            self.seek_to(x, host);
        }
    }

    /// Ends the drag. The last move already seeked to the final position.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn pointer_leave(&mut self) {
        self.dragging = false;
    }

    pub fn touch_start(&mut self, x: f64, host: &mut dyn TransportHost) {
        self.dragging = true;
        self.seek_to(x, host);
    }

    pub fn touch_move(&mut self, x: f64, host: &mut dyn TransportHost) {
        self.seek_to(x, host);
    }

    pub fn touch_end(&mut self) {
        self.dragging = false;
    }

    pub fn toggle_play_pause(&self, host: &mut dyn TransportHost) {
        host.toggle_play_pause();
    }

    /// Forward a speed change. Speeds outside the configured set are
    /// rejected.
    pub fn set_speed(&self, speed: f64, host: &mut dyn TransportHost) -> bool {
        if !self.config.allows_speed(speed) {
            log::warn!("Playback speed {} is not available", speed);
            return false;
        }
        host.set_speed(speed);
        true
    }

    /// Append the current time (as last rendered) as a keyframe.
    pub fn add_keyframe_at_current_time(&mut self, host: &mut dyn TransportHost) -> f64 {
        let time = self.state.current_time;
        self.keyframes.push(time);
        host.keyframe_added(time);
        time
    }

    /// Remove every keyframe exactly equal to `time`, keeping the rest in
    /// order. Returns how many were removed.
    pub fn remove_keyframe(&mut self, time: f64) -> usize {
        let before = self.keyframes.len();
        self.keyframes.retain(|&k| k != time);
        before - self.keyframes.len()
    }

    /// Drop all keyframes and any drag in progress.
    pub fn reset(&mut self) {
        self.keyframes.clear();
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        seeks: Vec<f64>,
        toggles: usize,
        speeds: Vec<f64>,
        added: Vec<f64>,
    }

    impl TransportHost for RecordingHost {
        fn seek(&mut self, time: f64) {
            self.seeks.push(time);
        }

        fn toggle_play_pause(&mut self) {
            self.toggles += 1;
        }

        fn set_speed(&mut self, speed: f64) {
            self.speeds.push(speed);
        }

        fn keyframe_added(&mut self, time: f64) {
            self.added.push(time);
        }
    }

    fn controller(current_time: f64, duration: f64) -> ScrubController {
        let mut scrub = ScrubController::new(TransportConfig::default());
        scrub.render(
            TransportState {
                current_time,
                duration,
                ..TransportState::default()
            },
            Track {
                left: 100.0,
                width: 400.0,
            },
        );
        scrub
    }

    #[test]
    fn test_drag_seeks_live() {
        let mut scrub = controller(0.0, 60.0);
        let mut host = RecordingHost::default();

        scrub.pointer_move(200.0, &mut host);
        assert!(host.seeks.is_empty());

        scrub.pointer_down(200.0, &mut host);
        scrub.pointer_move(300.0, &mut host);
        scrub.pointer_move(300.0, &mut host);
        scrub.pointer_move(500.0, &mut host);
        scrub.pointer_up();
        scrub.pointer_move(100.0, &mut host);

        assert_eq!(host.seeks, vec![15.0, 30.0, 30.0, 60.0]);
        assert!(!scrub.is_dragging());
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let mut scrub = controller(0.0, 90.0);
        let mut host = RecordingHost::default();
        for x in [-1000.0, 0.0, 99.9, 500.1, 1e9] {
            scrub.pointer_down(x, &mut host);
        }
        assert_eq!(host.seeks, vec![0.0, 0.0, 0.0, 90.0, 90.0]);
    }

    #[test]
    fn test_unknown_duration_seeks_to_zero() {
        let mut scrub = controller(0.0, 0.0);
        let mut host = RecordingHost::default();
        scrub.touch_start(300.0, &mut host);
        assert_eq!(host.seeks, vec![0.0]);
    }

    #[test]
    fn test_touch_moves_always_seek() {
        let mut scrub = controller(0.0, 40.0);
        let mut host = RecordingHost::default();
        scrub.touch_move(300.0, &mut host);
        scrub.touch_start(100.0, &mut host);
        scrub.touch_end();
        assert_eq!(host.seeks, vec![20.0, 0.0]);
        assert!(!scrub.is_dragging());
    }

    #[test]
    fn test_leave_ends_drag_without_seek() {
        let mut scrub = controller(0.0, 40.0);
        let mut host = RecordingHost::default();
        scrub.pointer_down(300.0, &mut host);
        scrub.pointer_leave();
        assert_eq!(host.seeks.len(), 1);
        assert!(!scrub.is_dragging());

        scrub.pointer_move(350.0, &mut host);
        assert_eq!(host.seeks.len(), 1);
    }

    #[test]
    fn test_play_pause_and_speed_forwarded() {
        let scrub = controller(0.0, 40.0);
        let mut host = RecordingHost::default();
        scrub.toggle_play_pause(&mut host);
        assert!(scrub.set_speed(0.5, &mut host));
        assert!(!scrub.set_speed(3.0, &mut host));
        assert_eq!(host.toggles, 1);
        assert_eq!(host.speeds, vec![0.5]);
    }

    #[test]
    fn test_keyframe_scenario() {
        let mut scrub = ScrubController::new(TransportConfig::default());
        let mut host = RecordingHost::default();
        for t in [5.0, 12.0, 47.0] {
            scrub.render(
                TransportState {
                    current_time: t,
                    duration: 60.0,
                    ..TransportState::default()
                },
                Track {
                    left: 0.0,
                    width: 600.0,
                },
            );
            scrub.add_keyframe_at_current_time(&mut host);
        }
        assert_eq!(host.added, vec![5.0, 12.0, 47.0]);

        assert_eq!(scrub.remove_keyframe(12.0), 1);
        assert_eq!(scrub.keyframes(), &[5.0, 47.0]);
        assert_eq!(scrub.remove_keyframe(30.0), 0);
    }

    #[test]
    fn test_remove_keyframe_removes_duplicates() {
        let mut scrub = controller(8.0, 60.0);
        let mut host = RecordingHost::default();
        scrub.add_keyframe_at_current_time(&mut host);
        scrub.add_keyframe_at_current_time(&mut host);
        assert_eq!(scrub.remove_keyframe(8.0), 2);
        assert!(scrub.keyframes().is_empty());
    }

    #[test]
    fn test_render_uses_keyframes_and_reset() {
        let mut scrub = controller(30.0, 120.0);
        let mut host = RecordingHost::default();
        scrub.add_keyframe_at_current_time(&mut host);
        let frame = scrub.render(
            TransportState {
                current_time: 30.0,
                duration: 120.0,
                ..TransportState::default()
            },
            Track {
                left: 0.0,
                width: 400.0,
            },
        );
        assert_eq!(frame.markers.len(), 1);
        assert_eq!(frame.markers[0].x, 100.0);

        scrub.reset();
        assert!(scrub.keyframes().is_empty());
    }
}
