// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! Coordinate transforms between on-screen display rectangles and canvas
//! pixel space, track offsets to fractions, and ellipse tessellation for
//! painters without a native ellipse primitive.

use crate::models::shape::Point;

/// Axis-aligned rectangle in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale an image to fit the available area, keeping its aspect ratio.
/// Images smaller than the area are shown at natural size.
pub fn fit_size(image_width: u32, image_height: u32, available_width: f64, available_height: f64) -> (f64, f64) {
    if image_width == 0 || image_height == 0 {
        return (0.0, 0.0);
    }
    let (w, h) = (image_width as f64, image_height as f64);
    let scale = (available_width / w).min(available_height / h).min(1.0).max(0.0);
    (w * scale, h * scale)
}

/// Convert a display position inside `rect` to canvas pixel coordinates.
pub fn display_to_canvas(x: f64, y: f64, rect: &DisplayRect, canvas_width: u32, canvas_height: u32) -> Point {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Point::default();
    }
    Point {
        x: (x - rect.left) / rect.width * canvas_width as f64,
        y: (y - rect.top) / rect.height * canvas_height as f64,
    }
}

/// Convert canvas pixel coordinates to a display position inside `rect`.
pub fn canvas_to_display(point: &Point, rect: &DisplayRect, canvas_width: u32, canvas_height: u32) -> (f64, f64) {
    if canvas_width == 0 || canvas_height == 0 {
        return (rect.left, rect.top);
    }
    (
        rect.left + point.x / canvas_width as f64 * rect.width,
        rect.top + point.y / canvas_height as f64 * rect.height,
    )
}

/// Fraction of the way along a horizontal track, clamped to `[0, 1]`.
/// Degenerate tracks map everything to 0.
pub fn track_fraction(x: f64, track_left: f64, track_width: f64) -> f64 {
    if !(track_width > 0.0) {
        return 0.0;
    }
    let fraction = (x - track_left) / track_width;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// `value / total` clamped to `[0, 1]`, exactly 0 for unknown totals.
pub fn progress_fraction(value: f64, total: f64) -> f64 {
    if !(total > 0.0) || !total.is_finite() {
        return 0.0;
    }
    let fraction = value / total;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Points along an axis-aligned ellipse outline, first point not repeated.
pub fn ellipse_outline(center: Point, radius_x: f64, radius_y: f64, segments: usize) -> Vec<Point> {
    let segments = segments.max(8);
    (0..segments)
        .map(|i| {
            let t = i as f64 / segments as f64 * std::f64::consts::TAU;
            Point {
                x: center.x + radius_x * t.cos(),
                y: center.y + radius_y * t.sin(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_canvas_roundtrip() {
        let rect = DisplayRect {
            left: 10.0,
            top: 20.0,
            width: 400.0,
            height: 300.0,
        };
        let point = display_to_canvas(210.0, 170.0, &rect, 800, 600);
        assert!((point.x - 400.0).abs() < 1e-9);
        assert!((point.y - 300.0).abs() < 1e-9);

        let (x, y) = canvas_to_display(&point, &rect, 800, 600);
        assert!((x - 210.0).abs() < 1e-9);
        assert!((y - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_size_never_upscales() {
        assert_eq!(fit_size(800, 600, 1600.0, 1200.0), (800.0, 600.0));
        assert_eq!(fit_size(800, 600, 400.0, 600.0), (400.0, 300.0));
        assert_eq!(fit_size(0, 600, 400.0, 600.0), (0.0, 0.0));
    }

    #[test]
    fn test_track_fraction_clamps() {
        assert_eq!(track_fraction(-50.0, 0.0, 200.0), 0.0);
        assert_eq!(track_fraction(500.0, 0.0, 200.0), 1.0);
        assert_eq!(track_fraction(150.0, 100.0, 200.0), 0.25);
        assert_eq!(track_fraction(150.0, 100.0, 0.0), 0.0);
    }

    #[test]
    fn test_progress_fraction_zero_total() {
        assert_eq!(progress_fraction(30.0, 0.0), 0.0);
        assert_eq!(progress_fraction(30.0, f64::NAN), 0.0);
        assert_eq!(progress_fraction(30.0, 120.0), 0.25);
    }

    #[test]
    fn test_ellipse_outline_on_curve() {
        let center = Point::new(100.0, 100.0);
        for p in ellipse_outline(center, 40.0, 30.0, 32) {
            let v = ((p.x - 100.0) / 40.0).powi(2) + ((p.y - 100.0) / 30.0).powi(2);
            assert!((v - 1.0).abs() < 1e-9);
        }
    }
}
