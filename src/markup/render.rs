// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Full-redraw rendering of the markup canvas into a display list.
//!
//! Every frame is rebuilt from scratch: clear, the source image at its
//! natural size, committed shapes in insertion order, then the draft.
//! Painters (egui or anything else) replay the commands in order.

use crate::models::shape::{Geometry, Point, Shape};
use crate::models::style::Color;

/// Stroke parameters for outline primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// One painting step, in canvas pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    /// Source image drawn at the origin at natural size.
    SourceImage,
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
        stroke: Stroke,
    },
    Segment {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    /// Filled glyph run with its baseline starting at `origin`.
    Text {
        origin: Point,
        text: String,
        color: Color,
        font_size: f32,
    },
}

/// A rendered canvas frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Number of shape commands (everything after the clear and image).
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::Clear | DrawCommand::SourceImage))
            .count()
    }
}

/// Build a complete frame.
pub fn render(width: u32, height: u32, shapes: &[Shape], draft: Option<&Shape>, font_size: f32) -> DisplayList {
    let mut commands = Vec::with_capacity(shapes.len() + 3);
    commands.push(DrawCommand::Clear);
    commands.push(DrawCommand::SourceImage);

    for shape in shapes.iter().chain(draft) {
        if let Some(command) = draw_shape(shape, font_size) {
            commands.push(command);
        }
    }

    DisplayList {
        width,
        height,
        commands,
    }
}

/// Draw routine for a single shape. Shapes whose geometry is still
/// degenerate (a zero-size circle, a one-point path, empty text) draw
/// nothing.
fn draw_shape(shape: &Shape, font_size: f32) -> Option<DrawCommand> {
    let stroke = Stroke {
        color: shape.style.color,
        width: shape.style.stroke_width as f32,
    };

    match &shape.geometry {
        Geometry::Circle { width, height } => {
            if *width == 0.0 || *height == 0.0 {
                return None;
            }
            Some(DrawCommand::Ellipse {
                center: shape.anchor,
                radius_x: width / 2.0,
                radius_y: height / 2.0,
                stroke,
            })
        }
        Geometry::StraightLine { path } => match path.as_slice() {
            [from, to, ..] => Some(DrawCommand::Segment {
                from: *from,
                to: *to,
                stroke,
            }),
            _ => None,
        },
        Geometry::Polyline { path } => {
            if path.len() < 2 {
                return None;
            }
            Some(DrawCommand::Polyline {
                points: path.clone(),
                stroke,
            })
        }
        Geometry::Text { text } => {
            if text.is_empty() {
                return None;
            }
            Some(DrawCommand::Text {
                origin: shape.anchor,
                text: text.clone(),
                color: shape.style.color,
                font_size,
            })
        }
    }
}
