// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Markup properties panel.
//!
//! Read-only list of committed shapes and the keyframe list with seek and
//! remove buttons.

use crate::models::shape::{Geometry, Shape};
use crate::scrub::format_time;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    SeekTo(f64),
    RemoveKeyframe(f64),
}

fn describe(shape: &Shape) -> String {
    let a = shape.anchor;
    match &shape.geometry {
        Geometry::Circle { width, height } => {
            format!("Circle at ({:.0}, {:.0}) {:.0}×{:.0}", a.x, a.y, width, height)
        }
        Geometry::StraightLine { path } | Geometry::Polyline { path } => {
            format!("{} from ({:.0}, {:.0}), {} points", shape.kind().label(), a.x, a.y, path.len())
        }
        Geometry::Text { text } => format!("\"{}\" at ({:.0}, {:.0})", text, a.x, a.y),
    }
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, shapes: &[Shape], keyframes: &[f64]) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Markup");
    ui.separator();

    if shapes.is_empty() {
        ui.label(egui::RichText::new("Nothing drawn yet").weak());
    }
    egui::ScrollArea::vertical()
        .id_source("shape_list")
        .max_height(ui.available_height() * 0.6)
        .show(ui, |ui| {
            for (idx, shape) in shapes.iter().enumerate() {
                ui.horizontal(|ui| {
                    let c = shape.style.color;
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, egui::Color32::from_rgb(c.r, c.g, c.b));
                    ui.label(format!("{}. {}", idx + 1, describe(shape)))
                        .on_hover_text(shape.id.to_string());
                });
            }
        });

    ui.add_space(12.0);
    ui.heading("Keyframes");
    ui.separator();

    if keyframes.is_empty() {
        ui.label(egui::RichText::new("No keyframes").weak());
    }
    for &time in keyframes {
        ui.horizontal(|ui| {
            if ui.link(format_time(time)).clicked() {
                action = PropertiesAction::SeekTo(time);
            }
            if ui.small_button("×").on_hover_text("Remove keyframe").clicked() {
                action = PropertiesAction::RemoveKeyframe(time);
            }
        });
    }

    action
}
