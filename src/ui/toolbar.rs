// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! Tool, color and stroke-width pickers plus the undo/clear/save actions.

use crate::config::MarkupConfig;
use crate::models::shape::ShapeKind;
use crate::models::style::Style;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SelectTool(ShapeKind),
    SelectStyle(Style),
    Undo,
    Clear,
    Save,
}

/// Display the toolbar.
pub fn show(
    ui: &mut egui::Ui,
    current_tool: ShapeKind,
    current_style: Style,
    config: &MarkupConfig,
    can_undo: bool,
    loaded: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");
        for kind in ShapeKind::ALL {
            let glyph = match kind {
                ShapeKind::Circle => "◯",
                ShapeKind::StraightLine => "⟋",
                ShapeKind::Polyline => "〰",
                ShapeKind::Text => "T",
            };
            if ui
                .selectable_label(current_tool == kind, format!("{} {}", glyph, kind.label()))
                .clicked()
            {
                action = ToolbarAction::SelectTool(kind);
            }
        }

        ui.separator();

        for entry in &config.palette {
            let selected = entry.color == current_style.color;
            let fill = egui::Color32::from_rgb(entry.color.r, entry.color.g, entry.color.b);
            let outline = if selected {
                egui::Stroke::new(2.0, egui::Color32::from_gray(230))
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_gray(90))
            };
            let swatch = egui::Button::new("")
                .fill(fill)
                .stroke(outline)
                .min_size(egui::vec2(18.0, 18.0));
            if ui.add(swatch).on_hover_text(&entry.name).clicked() {
                action = ToolbarAction::SelectStyle(Style {
                    color: entry.color,
                    ..current_style
                });
            }
        }

        ui.separator();

        ui.label("Width:");
        for &width in &config.stroke_widths {
            if ui
                .selectable_label(current_style.stroke_width == width, width.to_string())
                .clicked()
            {
                action = ToolbarAction::SelectStyle(Style {
                    stroke_width: width,
                    ..current_style
                });
            }
        }

        ui.separator();

        if ui.add_enabled(can_undo, egui::Button::new("↺ Undo")).clicked() {
            action = ToolbarAction::Undo;
        }
        if ui.add_enabled(loaded, egui::Button::new("Clear")).clicked() {
            action = ToolbarAction::Clear;
        }
        if ui.add_enabled(loaded, egui::Button::new("💾 Save")).clicked() {
            action = ToolbarAction::Save;
        }

        ui.separator();

        let hint = match current_tool {
            ShapeKind::Circle => "Drag out from the center",
            ShapeKind::StraightLine => "Drag from start to end",
            ShapeKind::Polyline => "Drag to draw freehand",
            ShapeKind::Text => "Click to place text",
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
