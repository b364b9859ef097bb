// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation canvas engine.
//!
//! Turns a source frame plus a stream of pointer gestures into an ordered
//! list of markup shapes. The engine owns the committed list for one
//! editing session; it only ever grows by append and shrinks by undo or
//! clear. Rendering is a full redraw after every mutation.

use super::render::{render, DisplayList};
use crate::config::MarkupConfig;
use crate::error::Result;
use crate::io::media::{self, ImageSource, LoadedImage};
use crate::models::shape::{Point, Shape, ShapeId, ShapeKind};
use crate::models::style::{Color, Style};

/// Editing state.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    Idle,
    /// A drag-drawn shape is being defined.
    Drafting(Shape),
    /// The text tool was pressed here and the host is prompting for text.
    AwaitingText { at: Point },
}

/// What a pointer-down did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStart {
    /// No surface, or another gesture still owns the draft.
    Ignored,
    Drafting,
    /// The host should open a text prompt anchored here.
    TextPrompt(Point),
}

/// The markup canvas for one source frame.
pub struct AnnotationEngine {
    config: MarkupConfig,
    /// Canvas size, equal to the source frame's natural size once loaded.
    surface: Option<(u32, u32)>,
    tool: ShapeKind,
    style: Style,
    shapes: Vec<Shape>,
    mode: EditMode,
    frame: DisplayList,
    generation: u64,
}

impl AnnotationEngine {
    pub fn new(config: MarkupConfig) -> Self {
        let style = config.default_style;
        Self {
            config,
            surface: None,
            tool: ShapeKind::Circle,
            style,
            shapes: Vec::new(),
            mode: EditMode::Idle,
            frame: DisplayList::default(),
            generation: 0,
        }
    }

    /// Load the source frame and start a fresh session sized to it.
    ///
    /// On failure the surface is detached so no shapes can be placed, and
    /// the error is handed back for the host to report.
    pub fn initialize(&mut self, source: &ImageSource) -> Result<LoadedImage> {
        match media::load(source) {
            Ok(loaded) => {
                log::info!("Loaded source frame {} ({}x{})", source.name(), loaded.width, loaded.height);
                self.attach_surface(loaded.width, loaded.height);
                Ok(loaded)
            }
            Err(e) => {
                self.fail_load();
                Err(e)
            }
        }
    }

    /// Start a fresh session on a surface of the given size. Used by hosts
    /// that decode the frame themselves.
    pub fn attach_surface(&mut self, width: u32, height: u32) {
        self.surface = Some((width, height));
        self.shapes.clear();
        self.mode = EditMode::Idle;
        self.redraw();
    }

    /// Detach the surface after the host failed to load a frame. Drops the
    /// session's shapes; gestures are ignored until a frame is attached.
    pub fn fail_load(&mut self) {
        self.surface = None;
        self.shapes.clear();
        self.mode = EditMode::Idle;
        self.frame = DisplayList::default();
    }

    /// Start a fresh session seeded with previously saved shapes. Shapes
    /// the editor could not have committed itself are dropped: broken kind
    /// invariants, malformed coordinates or text, and styles outside the
    /// configured palette and widths.
    pub fn resume(&mut self, width: u32, height: u32, shapes: Vec<Shape>) {
        let total = shapes.len();
        let kept: Vec<Shape> = shapes
            .into_iter()
            .filter(|shape| self.accepts_saved(shape))
            .collect();
        if kept.len() != total {
            log::warn!("Dropped {} invalid shapes while resuming", total - kept.len());
        }

        self.surface = Some((width, height));
        self.shapes = kept;
        self.mode = EditMode::Idle;
        self.redraw();
    }

    pub fn is_loaded(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface
    }

    pub fn tool(&self) -> ShapeKind {
        self.tool
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn draft(&self) -> Option<&Shape> {
        match &self.mode {
            EditMode::Drafting(shape) => Some(shape),
            _ => None,
        }
    }

    /// Where the pending text prompt is anchored, if one is open.
    pub fn pending_text(&self) -> Option<Point> {
        match self.mode {
            EditMode::AwaitingText { at } => Some(at),
            _ => None,
        }
    }

    /// The most recent full redraw.
    pub fn frame(&self) -> &DisplayList {
        &self.frame
    }

    /// Incremented on every redraw.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_undo(&self) -> bool {
        !self.shapes.is_empty()
    }

    /// Set the kind used by subsequent gestures.
    pub fn select_tool(&mut self, kind: ShapeKind) {
        if self.tool != kind {
            log::debug!("Tool changed to {:?}", kind);
        }
        self.tool = kind;
    }

    /// Set the style used by subsequent new shapes. Values outside the
    /// configured palette or width set are rejected and the current style
    /// is kept.
    pub fn select_style(&mut self, color: Color, stroke_width: u32) -> bool {
        if !self.config.allows_color(color) {
            log::warn!("Color {} is not in the palette", color);
            return false;
        }
        if !self.config.allows_stroke_width(stroke_width) {
            log::warn!("Stroke width {} is not available", stroke_width);
            return false;
        }
        self.style = Style { color, stroke_width };
        true
    }

    /// Pointer-down on the canvas.
    pub fn begin_gesture(&mut self, point: Point) -> GestureStart {
        if self.surface.is_none() {
            log::debug!("Ignoring gesture, no source frame loaded");
            return GestureStart::Ignored;
        }
        if matches!(self.mode, EditMode::Drafting(_)) {
            log::debug!("Ignoring pointer-down while a draft is open");
            return GestureStart::Ignored;
        }

        if self.tool == ShapeKind::Text {
            self.mode = EditMode::AwaitingText { at: point };
            return GestureStart::TextPrompt(point);
        }

        match Shape::draft(self.tool, point, self.style) {
            Some(draft) => {
                self.mode = EditMode::Drafting(draft);
                self.redraw();
                GestureStart::Drafting
            }
            None => GestureStart::Ignored,
        }
    }

    /// Pointer-move while a draft is open.
    pub fn extend_gesture(&mut self, point: Point) {
        if let EditMode::Drafting(draft) = &mut self.mode {
            draft.extend_to(point);
            self.redraw();
        }
    }

    /// Pointer-up. Commits the draft if it is valid, otherwise discards it.
    pub fn end_gesture(&mut self) -> Option<ShapeId> {
        let draft = match std::mem::replace(&mut self.mode, EditMode::Idle) {
            EditMode::Drafting(draft) => draft,
            other => {
                self.mode = other;
                return None;
            }
        };

        let committed = if draft.is_committable(self.config.min_circle_extent) {
            let id = draft.id;
            log::info!("Committed {:?} {}", draft.kind(), id);
            self.shapes.push(draft);
            Some(id)
        } else {
            log::debug!("Discarded {:?} draft below commit threshold", draft.kind());
            None
        };

        self.redraw();
        committed
    }

    /// Commit a text shape at `point`. Whitespace-only text is a no-op and
    /// leaves any open prompt in place.
    pub fn text_commit(&mut self, point: Point, text: &str) -> Option<ShapeId> {
        if self.surface.is_none() {
            return None;
        }
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let shape = Shape::text(point, text.to_string(), self.style);
        let id = shape.id;
        self.shapes.push(shape);
        if matches!(self.mode, EditMode::AwaitingText { .. }) {
            self.mode = EditMode::Idle;
        }
        log::info!("Committed text {}", id);
        self.redraw();
        Some(id)
    }

    /// Close the text prompt without adding anything.
    pub fn cancel_text(&mut self) {
        if matches!(self.mode, EditMode::AwaitingText { .. }) {
            self.mode = EditMode::Idle;
        }
    }

    /// Remove the most recently committed shape.
    pub fn undo(&mut self) -> Option<Shape> {
        let removed = self.shapes.pop();
        if let Some(ref shape) = removed {
            log::info!("Undo removed {:?} {}, total: {}", shape.kind(), shape.id, self.shapes.len());
        }
        self.redraw();
        removed
    }

    /// Remove every committed shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        if matches!(self.mode, EditMode::Drafting(_)) {
            self.mode = EditMode::Idle;
        }
        self.redraw();
    }

    /// The committed shapes in insertion order. Never includes a draft.
    pub fn save(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    fn accepts_saved(&self, shape: &Shape) -> bool {
        shape.is_committable(self.config.min_circle_extent)
            && shape.is_well_formed()
            && self.config.allows_color(shape.style.color)
            && self.config.allows_stroke_width(shape.style.stroke_width)
    }

    fn redraw(&mut self) {
        let Some((width, height)) = self.surface else {
            return;
        };
        self.frame = render(width, height, &self.shapes, self.draft(), self.config.font_size);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::encode_png;
    use crate::markup::render::DrawCommand;
    use crate::models::shape::Geometry;

    fn loaded_engine() -> AnnotationEngine {
        let mut engine = AnnotationEngine::new(MarkupConfig::default());
        engine.attach_surface(800, 600);
        engine
    }

    fn drag(engine: &mut AnnotationEngine, from: (f64, f64), to: (f64, f64)) -> Option<ShapeId> {
        engine.begin_gesture(Point::new(from.0, from.1));
        engine.extend_gesture(Point::new(to.0, to.1));
        engine.end_gesture()
    }

    #[test]
    fn test_initialize_sizes_surface_to_image() {
        let mut engine = AnnotationEngine::new(MarkupConfig::default());
        let source = ImageSource::Bytes {
            name: "frame.png".into(),
            data: encode_png(8, 6),
        };
        engine.initialize(&source).unwrap();
        assert_eq!(engine.surface_size(), Some((8, 6)));
        assert_eq!(engine.frame().commands, vec![DrawCommand::Clear, DrawCommand::SourceImage]);
    }

    #[test]
    fn test_failed_load_disables_drawing() {
        let mut engine = loaded_engine();
        drag(&mut engine, (0.0, 0.0), (50.0, 50.0));
        let source = ImageSource::Bytes {
            name: "broken".into(),
            data: vec![1, 2, 3],
        };
        assert!(engine.initialize(&source).is_err());
        assert!(!engine.is_loaded());
        assert!(engine.shapes().is_empty());
        assert_eq!(engine.begin_gesture(Point::new(1.0, 1.0)), GestureStart::Ignored);
        assert_eq!(engine.text_commit(Point::new(1.0, 1.0), "hi"), None);
    }

    #[test]
    fn test_circle_scenario() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::Circle);
        assert!(engine.select_style(Color::RED, 2));
        assert!(drag(&mut engine, (100.0, 100.0), (140.0, 130.0)).is_some());

        let saved = engine.save();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].kind(), ShapeKind::Circle);
        assert_eq!(saved[0].anchor, Point::new(100.0, 100.0));
        assert_eq!(
            saved[0].geometry,
            Geometry::Circle {
                width: 80.0,
                height: 60.0
            }
        );
        assert_eq!(saved[0].style, Style { color: Color::RED, stroke_width: 2 });
    }

    #[test]
    fn test_small_circles_are_discarded() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::Circle);
        let cases = [
            ((100.0, 100.0), (100.0, 100.0), false),
            ((100.0, 100.0), (105.0, 140.0), false),
            ((100.0, 100.0), (140.0, 104.0), false),
            ((100.0, 100.0), (105.0, 105.0), false),
            ((100.0, 100.0), (105.1, 105.1), true),
            ((100.0, 100.0), (60.0, 60.0), true),
        ];
        for (from, to, kept) in cases {
            let before = engine.shapes().len();
            drag(&mut engine, from, to);
            let expected = if kept { before + 1 } else { before };
            assert_eq!(engine.shapes().len(), expected, "drag {:?} -> {:?}", from, to);
        }
    }

    #[test]
    fn test_circle_tap_without_move_is_discarded() {
        let mut engine = loaded_engine();
        engine.begin_gesture(Point::new(10.0, 10.0));
        assert_eq!(engine.end_gesture(), None);
        assert!(engine.shapes().is_empty());
        assert_eq!(engine.mode(), &EditMode::Idle);
    }

    #[test]
    fn test_polyline_with_two_moves_commits() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::Polyline);
        engine.begin_gesture(Point::new(0.0, 0.0));
        engine.extend_gesture(Point::new(3.0, 4.0));
        engine.extend_gesture(Point::new(6.0, 1.0));
        assert!(engine.end_gesture().is_some());
        match &engine.shapes()[0].geometry {
            Geometry::Polyline { path } => assert_eq!(path.len(), 3),
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_line_needs_a_move() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::StraightLine);
        engine.begin_gesture(Point::new(0.0, 0.0));
        assert_eq!(engine.end_gesture(), None);

        assert!(drag(&mut engine, (0.0, 0.0), (0.0, 0.0)).is_some());
        assert!(drag(&mut engine, (10.0, 10.0), (90.0, 40.0)).is_some());
        assert_eq!(engine.shapes().len(), 2);
    }

    #[test]
    fn test_text_scenario() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::Text);
        let at = Point::new(50.0, 50.0);
        assert_eq!(engine.begin_gesture(at), GestureStart::TextPrompt(at));
        assert!(engine.draft().is_none());

        assert_eq!(engine.text_commit(at, ""), None);
        assert_eq!(engine.text_commit(at, "   "), None);
        assert!(engine.shapes().is_empty());
        assert_eq!(engine.pending_text(), Some(at));

        assert!(engine.text_commit(at, "check wrist").is_some());
        assert_eq!(engine.pending_text(), None);
        let shape = &engine.shapes()[0];
        assert_eq!(shape.kind(), ShapeKind::Text);
        assert_eq!(shape.anchor, at);
        assert_eq!(
            shape.geometry,
            Geometry::Text {
                text: "check wrist".into()
            }
        );
    }

    #[test]
    fn test_text_is_trimmed_and_cancel_closes_prompt() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::Text);
        engine.begin_gesture(Point::new(1.0, 2.0));
        engine.cancel_text();
        assert_eq!(engine.mode(), &EditMode::Idle);

        engine.text_commit(Point::new(1.0, 2.0), "  grip  ");
        assert_eq!(
            engine.shapes()[0].geometry,
            Geometry::Text { text: "grip".into() }
        );
    }

    #[test]
    fn test_second_pointer_down_is_ignored_while_drafting() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::StraightLine);
        assert_eq!(engine.begin_gesture(Point::new(0.0, 0.0)), GestureStart::Drafting);
        assert_eq!(engine.begin_gesture(Point::new(500.0, 500.0)), GestureStart::Ignored);
        engine.extend_gesture(Point::new(20.0, 0.0));
        engine.end_gesture();
        assert_eq!(engine.shapes()[0].anchor, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_tool_change_mid_draft_keeps_draft_kind() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::Polyline);
        engine.begin_gesture(Point::new(0.0, 0.0));
        engine.select_tool(ShapeKind::Circle);
        engine.extend_gesture(Point::new(1.0, 1.0));
        engine.end_gesture();
        assert_eq!(engine.shapes()[0].kind(), ShapeKind::Polyline);
    }

    #[test]
    fn test_style_applies_to_new_shapes_only() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::StraightLine);
        drag(&mut engine, (0.0, 0.0), (10.0, 10.0));
        assert!(engine.select_style(Color::BLUE, 5));
        drag(&mut engine, (0.0, 0.0), (10.0, 10.0));

        assert_eq!(engine.shapes()[0].style, Style { color: Color::RED, stroke_width: 2 });
        assert_eq!(engine.shapes()[1].style, Style { color: Color::BLUE, stroke_width: 5 });
    }

    #[test]
    fn test_style_outside_palette_rejected() {
        let mut engine = loaded_engine();
        assert!(!engine.select_style(Color::rgb(1, 2, 3), 2));
        assert!(!engine.select_style(Color::BLUE, 9));
        assert_eq!(engine.style(), Style::default());
    }

    #[test]
    fn test_undo_removes_tail() {
        let mut engine = loaded_engine();
        assert_eq!(engine.undo(), None);
        assert_eq!(engine.shapes().len(), 0);

        engine.select_tool(ShapeKind::StraightLine);
        let first = drag(&mut engine, (0.0, 0.0), (10.0, 0.0)).unwrap();
        let second = drag(&mut engine, (0.0, 0.0), (20.0, 0.0)).unwrap();
        assert_eq!(engine.undo().map(|s| s.id), Some(second));
        assert_eq!(engine.shapes().len(), 1);
        assert_eq!(engine.shapes()[0].id, first);
    }

    #[test]
    fn test_clear_empties_list() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::StraightLine);
        for i in 0..4 {
            drag(&mut engine, (0.0, 0.0), (i as f64, 10.0));
        }
        engine.clear();
        assert!(engine.shapes().is_empty());
        assert!(!engine.can_undo());
        engine.clear();
        assert!(engine.shapes().is_empty());
    }

    #[test]
    fn test_save_excludes_draft_and_keeps_order() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::StraightLine);
        let a = drag(&mut engine, (0.0, 0.0), (10.0, 0.0)).unwrap();
        engine.select_tool(ShapeKind::Text);
        let b = engine.text_commit(Point::new(5.0, 5.0), "b").unwrap();
        engine.select_tool(ShapeKind::Polyline);
        engine.begin_gesture(Point::new(1.0, 1.0));
        engine.extend_gesture(Point::new(2.0, 2.0));

        let saved = engine.save();
        assert_eq!(saved.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a, b]);
        assert!(engine.draft().is_some());
        assert_eq!(engine.save(), saved);
    }

    #[test]
    fn test_every_mutation_redraws() {
        let mut engine = loaded_engine();
        let start = engine.generation();
        engine.select_tool(ShapeKind::StraightLine);
        engine.begin_gesture(Point::new(0.0, 0.0));
        engine.extend_gesture(Point::new(5.0, 5.0));
        assert_eq!(engine.frame().shape_count(), 1);
        engine.end_gesture();
        engine.undo();
        engine.clear();
        assert_eq!(engine.generation(), start + 5);
        assert_eq!(engine.frame().shape_count(), 0);
    }

    #[test]
    fn test_resume_drops_invalid_shapes() {
        let style = Style::default();
        let mut tiny = Shape::draft(ShapeKind::Circle, Point::new(0.0, 0.0), style).unwrap();
        tiny.extend_to(Point::new(2.0, 2.0));
        let text = Shape::text(Point::new(0.0, 0.0), "ok".into(), style);

        let mut engine = AnnotationEngine::new(MarkupConfig::default());
        engine.resume(640, 480, vec![tiny, text.clone()]);
        assert_eq!(engine.shapes(), &[text]);
        assert_eq!(engine.surface_size(), Some((640, 480)));
    }

    #[test]
    fn test_resume_keeps_only_shapes_the_editor_could_commit() {
        let style = Style::default();
        let origin = Point::new(10.0, 10.0);
        let three_point_line = Shape {
            id: ShapeId::new(),
            anchor: origin,
            style,
            geometry: Geometry::StraightLine {
                path: vec![origin, Point::new(20.0, 20.0), Point::new(30.0, 10.0)],
            },
        };
        let padded_text = Shape::text(origin, "  wrist  ".into(), style);
        let off_palette = Shape::text(
            origin,
            "grip".into(),
            Style {
                color: Color::rgb(1, 2, 3),
                stroke_width: 2,
            },
        );
        let too_wide = Shape::text(
            origin,
            "grip".into(),
            Style {
                color: Color::BLUE,
                stroke_width: 40,
            },
        );
        let endless_circle = Shape {
            id: ShapeId::new(),
            anchor: origin,
            style,
            geometry: Geometry::Circle {
                width: f64::INFINITY,
                height: 40.0,
            },
        };
        let detached_polyline = Shape {
            id: ShapeId::new(),
            anchor: origin,
            style,
            geometry: Geometry::Polyline {
                path: vec![Point::new(90.0, 90.0), Point::new(95.0, 95.0)],
            },
        };
        let good_line = Shape {
            id: ShapeId::new(),
            anchor: origin,
            style,
            geometry: Geometry::StraightLine {
                path: vec![origin, Point::new(40.0, 40.0)],
            },
        };

        let mut engine = AnnotationEngine::new(MarkupConfig::default());
        engine.resume(
            100,
            100,
            vec![
                three_point_line,
                padded_text,
                off_palette,
                too_wide,
                endless_circle,
                detached_polyline,
                good_line.clone(),
            ],
        );
        assert_eq!(engine.shapes(), &[good_line]);
        assert_eq!(engine.frame().shape_count(), 1);
    }

    #[test]
    fn test_fail_load_detaches_surface() {
        let mut engine = loaded_engine();
        engine.select_tool(ShapeKind::StraightLine);
        drag(&mut engine, (0.0, 0.0), (50.0, 50.0));
        engine.begin_gesture(Point::new(5.0, 5.0));

        engine.fail_load();
        assert!(!engine.is_loaded());
        assert!(engine.shapes().is_empty());
        assert!(engine.draft().is_none());
        assert!(engine.frame().commands.is_empty());
        assert_eq!(engine.begin_gesture(Point::new(1.0, 1.0)), GestureStart::Ignored);
        assert_eq!(engine.text_commit(Point::new(1.0, 1.0), "hi"), None);

        engine.attach_surface(320, 240);
        assert_eq!(engine.begin_gesture(Point::new(1.0, 1.0)), GestureStart::Drafting);
    }
}
