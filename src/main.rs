// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! swingmark - swing video review host
//!
//! Opens a captured swing frame for markup alongside a scrub track for the
//! clip it came from.
//!
//! Usage: `swingmark [FRAME_IMAGE] [DURATION_SECONDS]`

use anyhow::{Context, Result};
use std::path::PathBuf;
use swingmark::app::ReviewApp;
use swingmark::config::EditorConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frame_path = args.next().map(PathBuf::from);
    let duration = match args.next() {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("invalid clip duration {:?}", raw))?,
        None => 0.0,
    };

    let config = EditorConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Swing Markup"),
        ..Default::default()
    };

    eframe::run_native(
        "swingmark",
        options,
        Box::new(move |cc| {
            let mut app = ReviewApp::new(config, duration);
            if let Some(path) = frame_path {
                app.open_frame_now(path, &cc.egui_ctx);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
