// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the captured frame and its markup.
//!
//! This module paints the engine's display list over the frame texture,
//! scaled to fit the panel, and turns pointer input into canvas-space
//! gesture actions.

use crate::markup::{DisplayList, DrawCommand};
use crate::models::shape::{Point, ShapeKind};
use crate::models::style::Color;
use crate::util::geometry::{canvas_to_display, display_to_canvas, ellipse_outline, fit_size, DisplayRect};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    Press(Point),
    Drag(Point),
    Release,
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// Display the canvas and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    frame: &DisplayList,
    image_texture: &Option<egui::TextureHandle>,
    current_tool: ShapeKind,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(texture) = image_texture else {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(
                        egui::RichText::new("Swing Markup")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("File → Open Frame... to start marking up")
                            .weak()
                            .color(egui::Color32::from_gray(150)),
                    );
                });
            });
            return;
        };

        let available = ui.available_size();
        let (display_width, display_height) =
            fit_size(frame.width, frame.height, available.x as f64, available.y as f64);

        // Center the frame
        let x_offset = (available.x - display_width as f32) / 2.0;
        let y_offset = (available.y - display_height as f32) / 2.0;
        let image_rect = egui::Rect::from_min_size(
            ui.min_rect().min + egui::vec2(x_offset, y_offset),
            egui::vec2(display_width as f32, display_height as f32),
        );
        let display = DisplayRect {
            left: image_rect.min.x as f64,
            top: image_rect.min.y as f64,
            width: image_rect.width() as f64,
            height: image_rect.height() as f64,
        };

        let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());
        let to_canvas = |pos: egui::Pos2| {
            let p = display_to_canvas(pos.x as f64, pos.y as f64, &display, frame.width, frame.height);
            Point::new(p.x.clamp(0.0, frame.width as f64), p.y.clamp(0.0, frame.height as f64))
        };

        if current_tool == ShapeKind::Text {
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    action = CanvasAction::Press(to_canvas(pos));
                }
            }
        } else if response.drag_started() {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = origin {
                action = CanvasAction::Press(to_canvas(pos));
            }
        } else if response.drag_stopped() {
            action = CanvasAction::Release;
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::Drag(to_canvas(pos));
            }
        }

        let painter = ui.painter_at(image_rect);
        let scale = if frame.width > 0 {
            display.width / frame.width as f64
        } else {
            1.0
        };
        paint(&painter, frame, texture, image_rect, &display, scale);

        if current_tool != ShapeKind::Text && response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Tool: {}", current_tool.label()));
        ui.separator();
        if image_texture.is_some() {
            ui.label(format!("{}x{}", frame.width, frame.height));
        } else {
            ui.label("No frame loaded");
        }
    });

    action
}

/// Replay a display list.
fn paint(
    painter: &egui::Painter,
    frame: &DisplayList,
    texture: &egui::TextureHandle,
    image_rect: egui::Rect,
    display: &DisplayRect,
    scale: f64,
) {
    let to_screen = |p: &Point| {
        let (x, y) = canvas_to_display(p, display, frame.width, frame.height);
        egui::pos2(x as f32, y as f32)
    };
    let stroke_of = |s: &crate::markup::Stroke| {
        egui::Stroke::new((s.width as f64 * scale).max(1.0) as f32, to_color32(s.color))
    };

    for command in &frame.commands {
        match command {
            DrawCommand::Clear => {
                painter.rect_filled(image_rect, 0.0, egui::Color32::from_gray(40));
            }
            DrawCommand::SourceImage => {
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            DrawCommand::Ellipse {
                center,
                radius_x,
                radius_y,
                stroke,
            } => {
                let points = ellipse_outline(*center, *radius_x, *radius_y, 64)
                    .iter()
                    .map(to_screen)
                    .collect();
                painter.add(egui::Shape::closed_line(points, stroke_of(stroke)));
            }
            DrawCommand::Segment { from, to, stroke } => {
                painter.line_segment([to_screen(from), to_screen(to)], stroke_of(stroke));
            }
            DrawCommand::Polyline { points, stroke } => {
                let points = points.iter().map(to_screen).collect();
                painter.add(egui::Shape::line(points, stroke_of(stroke)));
            }
            DrawCommand::Text {
                origin,
                text,
                color,
                font_size,
            } => {
                painter.text(
                    to_screen(origin),
                    egui::Align2::LEFT_BOTTOM,
                    text,
                    egui::FontId::proportional((*font_size as f64 * scale) as f32),
                    to_color32(*color),
                );
            }
        }
    }
}
