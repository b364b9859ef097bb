// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Review host: egui App wiring the markup editor and the scrub track.
//!
//! The host owns the media clock and the frame texture. It feeds time
//! state down into the scrub controller, receives seek/play/speed intents
//! back, and persists whatever shape list the markup editor hands it on
//! save.

use crate::config::EditorConfig;
use crate::io::media::{self, ImageSource, LoadedImage};
use crate::io::serialization;
use crate::markup::{AnnotationEngine, GestureStart};
use crate::models::playback::MediaClock;
use crate::models::project::MarkupDocument;
use crate::models::shape::Shape;
use crate::scrub::{ScrubController, TransportHost};
use crate::ui::{canvas, properties, text_prompt, timeline, toolbar};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// Result of background frame loading.
struct LoadedFrame {
    path: PathBuf,
    image: LoadedImage,
    document: Option<MarkupDocument>,
}

/// Main application state.
pub struct ReviewApp {
    config: EditorConfig,

    /// Markup editor for the current frame
    engine: AnnotationEngine,

    /// Scrub track and keyframes
    scrubber: ScrubController,

    /// Stand-in for the video element
    clock: MediaClock,

    /// Path of the frame being marked up
    frame_path: Option<PathBuf>,

    /// Frame texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Text typed into the text prompt
    text_buffer: String,

    /// Receiver for background frame loading
    image_loader: Option<Receiver<Result<LoadedFrame, String>>>,

    /// Loading state message
    loading_message: Option<String>,
}

impl ReviewApp {
    /// Create a review host with the given config and clip duration.
    pub fn new(config: EditorConfig, duration: f64) -> Self {
        Self {
            engine: AnnotationEngine::new(config.markup.clone()),
            scrubber: ScrubController::new(config.transport.clone()),
            clock: MediaClock::new(duration),
            config,
            frame_path: None,
            image_texture: None,
            text_buffer: String::new(),
            image_loader: None,
            loading_message: None,
        }
    }

    /// Load a frame synchronously (used at startup).
    pub fn open_frame_now(&mut self, path: PathBuf, ctx: &egui::Context) {
        match self.engine.initialize(&ImageSource::Path(path.clone())) {
            Ok(image) => {
                self.install_texture(&image, ctx);
                self.frame_path = Some(path);
            }
            Err(e) => {
                log::error!("{}", e);
                self.fail_load();
            }
        }
    }

    /// Load a frame file on a background thread.
    fn open_frame(&mut self, path: PathBuf) {
        self.spawn_loader("Loading frame...", move || {
            let image = media::load_image(&path).map_err(|e| e.to_string())?;
            Ok(LoadedFrame {
                path,
                image,
                document: None,
            })
        });
    }

    /// Load saved markup and the frame it references on a background thread.
    fn open_markup(&mut self, path: PathBuf) {
        self.spawn_loader("Loading markup and frame...", move || {
            let document = serialization::import(&path).map_err(|e| format!("{:#}", e))?;
            log::info!("Imported {} shapes from {}", document.shapes.len(), path.display());

            let frame_path = PathBuf::from(&document.source_image);
            if !frame_path.exists() {
                return Err(format!("Referenced frame not found: {}", frame_path.display()));
            }
            let image = media::load_image(&frame_path).map_err(|e| e.to_string())?;
            Ok(LoadedFrame {
                path: frame_path,
                image,
                document: Some(document),
            })
        });
    }

    fn spawn_loader<F>(&mut self, message: &str, load: F)
    where
        F: FnOnce() -> Result<LoadedFrame, String> + Send + 'static,
    {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some(message.to_string());

        std::thread::spawn(move || {
            let _ = sender.send(load());
        });
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                let (width, height) = (loaded.image.width, loaded.image.height);
                self.install_texture(&loaded.image, ctx);
                match loaded.document {
                    Some(document) => {
                        if (document.frame_width, document.frame_height) != (width, height) {
                            log::warn!(
                                "Markup was drawn on a {}x{} frame, loaded frame is {}x{}",
                                document.frame_width,
                                document.frame_height,
                                width,
                                height
                            );
                        }
                        if let Some(at) = document.captured_at {
                            self.clock.seek(at);
                        }
                        self.engine.resume(width, height, document.shapes);
                    }
                    None => self.engine.attach_surface(width, height),
                }
                log::info!("Loaded frame {} ({}x{})", loaded.path.display(), width, height);
                self.frame_path = Some(loaded.path);
            }
            Err(e) => {
                log::error!("Failed to load frame: {}", e);
                self.fail_load();
            }
        }
    }

    /// Drop the current frame so nothing is drawn over a stale image.
    fn fail_load(&mut self) {
        self.engine.fail_load();
        self.image_texture = None;
        self.frame_path = None;
    }

    fn install_texture(&mut self, image: &LoadedImage, ctx: &egui::Context) {
        let size = [image.width as usize, image.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
        self.image_texture = Some(ctx.load_texture("frame", color_image, egui::TextureOptions::LINEAR));
    }

    /// Persist the shape list handed back by the editor.
    fn save_markup(&self, shapes: Vec<Shape>, path: &Path) {
        let (Some(frame_path), Some((width, height))) = (&self.frame_path, self.engine.surface_size()) else {
            return;
        };
        let document = MarkupDocument::new(frame_path.display().to_string(), width, height, shapes)
            .with_captured_at(self.clock.state().current_time);

        match serialization::export(&document, path) {
            Ok(_) => log::info!("Saved {} shapes to {}", document.shapes.len(), path.display()),
            Err(e) => log::error!("Failed to save markup: {:#}", e),
        }
    }

    fn prompt_save(&self) {
        let shapes = self.engine.save();
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("YAML", &["yaml", "yml"])
            .set_file_name("markup.json")
            .save_file()
        {
            self.save_markup(shapes, &path);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Frame...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "webp"])
                            .pick_file()
                        {
                            self.open_frame(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Open Markup...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Markup", &["json", "yaml", "yml"])
                            .pick_file()
                        {
                            self.open_markup(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(self.engine.is_loaded(), egui::Button::new("Save Markup..."))
                        .clicked()
                    {
                        self.prompt_save();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.engine.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.engine.undo();
                        ui.close_menu();
                    }
                    if ui.button("Clear Markup").clicked() {
                        self.engine.clear();
                        ui.close_menu();
                    }
                    if ui.button("Reset Keyframes").clicked() {
                        self.scrubber.reset();
                        ui.close_menu();
                    }
                });
            });
        });
    }
}

impl eframe::App for ReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.clock.tick(dt);
        if self.clock.state().is_playing || self.loading_message.is_some() {
            ctx.request_repaint();
        }

        self.menu_bar(ctx);

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    self.engine.tool(),
                    self.engine.style(),
                    &self.config.markup,
                    self.engine.can_undo(),
                    self.engine.is_loaded(),
                )
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::SelectTool(kind) => self.engine.select_tool(kind),
            toolbar::ToolbarAction::SelectStyle(style) => {
                self.engine.select_style(style.color, style.stroke_width);
            }
            toolbar::ToolbarAction::Undo => {
                self.engine.undo();
            }
            toolbar::ToolbarAction::Clear => self.engine.clear(),
            toolbar::ToolbarAction::Save => self.prompt_save(),
            toolbar::ToolbarAction::None => {}
        }

        // Scrub track (bottom)
        egui::TopBottomPanel::bottom("timeline").show(ctx, |ui| {
            ui.add_space(6.0);
            timeline::show(ui, &mut self.scrubber, &mut self.clock);
            ui.add_space(6.0);
        });

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, self.engine.shapes(), self.scrubber.keyframes()))
            .inner;

        match properties_action {
            properties::PropertiesAction::SeekTo(time) => self.clock.seek(time),
            properties::PropertiesAction::RemoveKeyframe(time) => {
                self.scrubber.remove_keyframe(time);
            }
            properties::PropertiesAction::None => {}
        }

        // Undo shortcut, unless a text field has focus
        if !ctx.wants_keyboard_input()
            && ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z))
        {
            self.engine.undo();
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.label(egui::RichText::new(message).size(16.0));
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    canvas::show(ui, self.engine.frame(), &self.image_texture, self.engine.tool())
                }
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::Press(point) => {
                if let GestureStart::TextPrompt(_) = self.engine.begin_gesture(point) {
                    self.text_buffer.clear();
                }
            }
            canvas::CanvasAction::Drag(point) => self.engine.extend_gesture(point),
            canvas::CanvasAction::Release => {
                self.engine.end_gesture();
            }
            canvas::CanvasAction::None => {}
        }

        // Text prompt
        if let Some(at) = self.engine.pending_text() {
            match text_prompt::show(ctx, &mut self.text_buffer) {
                text_prompt::TextPromptAction::Submit => {
                    if self.engine.text_commit(at, &self.text_buffer).is_some() {
                        self.text_buffer.clear();
                    }
                }
                text_prompt::TextPromptAction::Cancel => {
                    self.engine.cancel_text();
                    self.text_buffer.clear();
                }
                text_prompt::TextPromptAction::None => {}
            }
        }
    }
}
