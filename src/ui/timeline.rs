// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber control.
//!
//! Paints the scrub track from the controller's [`ScrubFrame`] and feeds
//! pointer and touch input back into it. Intents go straight to the
//! media clock, which stands in for the host's video element.

use crate::models::playback::{MediaClock, TransportState};
use crate::scrub::{ScrubController, ScrubFrame, Track};

const TRACK_HEIGHT: f32 = 32.0;
const MARKER_HIT_RADIUS: f32 = 6.0;

/// Display the scrub track and transport controls.
pub fn show(ui: &mut egui::Ui, scrub: &mut ScrubController, clock: &mut MediaClock) {
    let desired = egui::vec2(ui.available_width(), TRACK_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());
    let track = Track {
        left: rect.left() as f64,
        width: rect.width() as f64,
    };

    // Sync props before handling input so seeks use this frame's geometry.
    let state = clock.state();
    scrub.render(state, track);
    let host = clock;

    let touches: Vec<(egui::TouchPhase, egui::Pos2)> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|e| match e {
                egui::Event::Touch { phase, pos, .. } => Some((*phase, *pos)),
                _ => None,
            })
            .collect()
    });

    if touches.is_empty() {
        if response.drag_started() || response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                scrub.pointer_down(pos.x as f64, host);
            }
        } else if response.dragged() {
            match drag_position(rect, response.interact_pointer_pos()) {
                Some(x) => scrub.pointer_move(x, host),
                None => scrub.pointer_leave(),
            }
        }
        if response.drag_stopped() || response.clicked() {
            scrub.pointer_up();
        }
    } else {
        for (phase, pos) in touches {
            match phase {
                egui::TouchPhase::Start if rect.contains(pos) => scrub.touch_start(pos.x as f64, host),
                egui::TouchPhase::Move if scrub.is_dragging() => scrub.touch_move(pos.x as f64, host),
                egui::TouchPhase::End | egui::TouchPhase::Cancel => scrub.touch_end(),
                _ => {}
            }
        }
    }

    if response.secondary_clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            remove_marker_near(scrub, state, track, pos.x);
        }
    }

    // Paint with the state after any seek this frame.
    let frame = scrub.render(host.state(), track);
    paint_track(ui, rect, &frame);

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&frame.current_label).monospace());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(&frame.duration_label).monospace());
        });
    });

    ui.horizontal(|ui| {
        let play_label = if frame.is_playing { "⏸ Pause" } else { "▶ Play" };
        if ui.button(play_label).clicked() {
            scrub.toggle_play_pause(host);
        }

        ui.separator();
        ui.label("Speed:");
        let speeds = scrub.speeds().to_vec();
        for speed in speeds {
            let selected = (frame.playback_speed - speed).abs() < f64::EPSILON;
            if ui.selectable_label(selected, format!("{:.1}x", speed)).clicked() {
                scrub.set_speed(speed, host);
            }
        }

        ui.separator();
        if ui.button("＋ Keyframe").clicked() {
            scrub.add_keyframe_at_current_time(host);
        }
        ui.label(egui::RichText::new(&frame.keyframe_summary).weak());
    });
}

/// Track x of a drag sample, or `None` once the pointer has left the track.
fn drag_position(rect: egui::Rect, pointer: Option<egui::Pos2>) -> Option<f64> {
    pointer.filter(|pos| rect.contains(*pos)).map(|pos| pos.x as f64)
}

fn remove_marker_near(scrub: &mut ScrubController, state: TransportState, track: Track, x: f32) {
    let frame = scrub.render(state, track);
    let hit = frame
        .markers
        .iter()
        .find(|m| ((track.left + m.x) as f32 - x).abs() <= MARKER_HIT_RADIUS)
        .map(|m| m.time);
    if let Some(time) = hit {
        let removed = scrub.remove_keyframe(time);
        log::info!("Removed {} keyframe(s) at {:.2}s", removed, time);
    }
}

fn paint_track(ui: &egui::Ui, rect: egui::Rect, frame: &ScrubFrame) {
    let painter = ui.painter_at(rect);
    let mid_y = rect.center().y;

    painter.rect_filled(rect, 6.0, egui::Color32::from_gray(35));

    let fill = egui::Rect::from_min_size(rect.min, egui::vec2(frame.fill_width as f32, rect.height()));
    painter.rect_filled(fill, 6.0, egui::Color32::from_rgb(34, 197, 94));

    for &tick in &frame.ticks {
        let x = (rect.left() + tick as f32).clamp(rect.left() + 1.0, rect.right() - 1.0);
        painter.line_segment(
            [egui::pos2(x, mid_y - 4.0), egui::pos2(x, mid_y + 4.0)],
            egui::Stroke::new(1.0, egui::Color32::from_white_alpha(50)),
        );
    }

    for marker in &frame.markers {
        let center = egui::pos2(rect.left() + marker.x as f32, mid_y);
        painter.circle_filled(center, 4.0, egui::Color32::WHITE);
        painter.circle_stroke(center, 4.0, egui::Stroke::new(1.0, egui::Color32::from_gray(90)));
    }

    let handle = egui::pos2(rect.left() + frame.handle_x as f32, mid_y);
    painter.circle_filled(handle, 6.0, egui::Color32::WHITE);
    painter.circle_stroke(handle, 6.0, egui::Stroke::new(2.0, egui::Color32::from_gray(30)));
}
