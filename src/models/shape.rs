// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Markup shape data structures.
//!
//! A shape is a tagged union over the four markup primitives (circle,
//! straight line, freehand polyline and text) sharing an id, an anchor
//! point and a style. Coordinates are canvas pixels of the source frame.

use super::style::Style;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A 2D point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Unique shape identifier, stable for the lifetime of the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Markup tool / shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Circle,
    StraightLine,
    Polyline,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::StraightLine,
        ShapeKind::Polyline,
        ShapeKind::Text,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::StraightLine => "Line",
            ShapeKind::Polyline => "Freehand",
            ShapeKind::Text => "Text",
        }
    }
}

/// Kind-specific geometry. Line and polyline paths include the anchor
/// as their first vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Geometry {
    /// Ellipse centered on the anchor with the given diameters.
    Circle { width: f64, height: f64 },
    StraightLine { path: Vec<Point> },
    Polyline { path: Vec<Point> },
    Text { text: String },
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Circle { .. } => ShapeKind::Circle,
            Geometry::StraightLine { .. } => ShapeKind::StraightLine,
            Geometry::Polyline { .. } => ShapeKind::Polyline,
            Geometry::Text { .. } => ShapeKind::Text,
        }
    }
}

/// A markup shape, either a draft still being drawn or a committed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub anchor: Point,
    pub style: Style,
    pub geometry: Geometry,
}

impl Shape {
    /// Start a draft for a drag-drawn kind. Returns `None` for text, which
    /// has no draft phase.
    pub fn draft(kind: ShapeKind, anchor: Point, style: Style) -> Option<Self> {
        let geometry = match kind {
            ShapeKind::Circle => Geometry::Circle {
                width: 0.0,
                height: 0.0,
            },
            ShapeKind::StraightLine => Geometry::StraightLine { path: vec![anchor] },
            ShapeKind::Polyline => Geometry::Polyline { path: vec![anchor] },
            ShapeKind::Text => return None,
        };

        Some(Self {
            id: ShapeId::new(),
            anchor,
            style,
            geometry,
        })
    }

    /// Create a fully formed text shape.
    pub fn text(origin: Point, text: String, style: Style) -> Self {
        Self {
            id: ShapeId::new(),
            anchor: origin,
            style,
            geometry: Geometry::Text { text },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Grow the geometry towards `point` as the pointer moves.
    ///
    /// Circles stay centered on the anchor with `point` on a corner of the
    /// bounding box, straight lines keep exactly a start and a live end, and
    /// polylines record every point.
    pub fn extend_to(&mut self, point: Point) {
        let anchor = self.anchor;
        match &mut self.geometry {
            Geometry::Circle { width, height } => {
                *width = 2.0 * (point.x - anchor.x).abs();
                *height = 2.0 * (point.y - anchor.y).abs();
            }
            Geometry::StraightLine { path } => {
                path.clear();
                path.push(anchor);
                path.push(point);
            }
            Geometry::Polyline { path } => path.push(point),
            Geometry::Text { .. } => {}
        }
    }

    /// Whether this shape satisfies its kind's invariant and may be
    /// committed. Circles must exceed `min_extent` in both dimensions.
    pub fn is_committable(&self, min_extent: f64) -> bool {
        match &self.geometry {
            Geometry::Circle { width, height } => *width > min_extent && *height > min_extent,
            Geometry::StraightLine { path } => path.len() == 2,
            Geometry::Polyline { path } => path.len() >= 2,
            Geometry::Text { text } => !text.trim().is_empty(),
        }
    }

    /// Whether a shape read back from storage has the form the editor
    /// itself produces: finite coordinates, paths that start at the anchor
    /// and text without surrounding whitespace.
    pub fn is_well_formed(&self) -> bool {
        if !self.anchor.is_finite() {
            return false;
        }
        match &self.geometry {
            Geometry::Circle { width, height } => width.is_finite() && height.is_finite(),
            Geometry::StraightLine { path } | Geometry::Polyline { path } => {
                path.first() == Some(&self.anchor) && path.iter().all(Point::is_finite)
            }
            Geometry::Text { text } => text.trim() == text,
        }
    }
}
