// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback state shared between the host and the scrub controller.
//!
//! The host's media element is the source of truth for time. The scrub
//! controller only receives a [`TransportState`] snapshot on every render
//! and sends intents back through [`TransportHost`].

use crate::scrub::TransportHost;

/// Snapshot of the host's media element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportState {
    /// Seconds, `0 <= current_time <= duration`.
    pub current_time: f64,
    /// Seconds; 0 means not loaded yet.
    pub duration: f64,
    pub is_playing: bool,
    pub playback_speed: f64,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 0.0,
            is_playing: false,
            playback_speed: 1.0,
        }
    }
}

/// A simple media clock standing in for a video element.
///
/// Advances with wall time while playing and stops at the end of the clip.
#[derive(Debug, Clone)]
pub struct MediaClock {
    state: TransportState,
}

impl MediaClock {
    pub fn new(duration: f64) -> Self {
        Self {
            state: TransportState {
                duration: duration.max(0.0),
                ..TransportState::default()
            },
        }
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Advance by `dt` seconds of wall time.
    pub fn tick(&mut self, dt: f64) {
        if !self.state.is_playing {
            return;
        }
        let next = self.state.current_time + dt * self.state.playback_speed;
        if next >= self.state.duration {
            self.state.current_time = self.state.duration;
            self.state.is_playing = false;
            log::debug!("Playback reached end at {:.2}s", self.state.duration);
        } else {
            self.state.current_time = next;
        }
    }
}

impl TransportHost for MediaClock {
    fn seek(&mut self, time: f64) {
        self.state.current_time = time.clamp(0.0, self.state.duration);
    }

    fn toggle_play_pause(&mut self) {
        // Restart from the top when play is pressed at the end.
        if !self.state.is_playing && self.state.current_time >= self.state.duration {
            self.state.current_time = 0.0;
        }
        self.state.is_playing = !self.state.is_playing && self.state.duration > 0.0;
    }

    fn set_speed(&mut self, speed: f64) {
        self.state.playback_speed = speed;
    }

    fn keyframe_added(&mut self, time: f64) {
        log::info!("Keyframe added at {:.2}s", time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_respects_speed_and_end() {
        let mut clock = MediaClock::new(10.0);
        clock.tick(1.0);
        assert_eq!(clock.state().current_time, 0.0);

        clock.toggle_play_pause();
        clock.set_speed(0.5);
        clock.tick(2.0);
        assert!((clock.state().current_time - 1.0).abs() < 1e-9);

        clock.tick(100.0);
        assert_eq!(clock.state().current_time, 10.0);
        assert!(!clock.state().is_playing);
    }

    #[test]
    fn test_seek_is_clamped() {
        let mut clock = MediaClock::new(60.0);
        clock.seek(-3.0);
        assert_eq!(clock.state().current_time, 0.0);
        clock.seek(75.0);
        assert_eq!(clock.state().current_time, 60.0);
    }

    #[test]
    fn test_cannot_play_unknown_duration() {
        let mut clock = MediaClock::new(0.0);
        clock.toggle_play_pause();
        assert!(!clock.state().is_playing);
    }

    #[test]
    fn test_duration_is_fixed_at_construction() {
        let clock = MediaClock::new(-5.0);
        assert_eq!(clock.state().duration, 0.0);
        assert_eq!(MediaClock::new(42.5).state().duration, 42.5);
    }
}
