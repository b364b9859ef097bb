// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Modal prompt for text markup.

/// Result of the text prompt.
pub enum TextPromptAction {
    None,
    Submit,
    Cancel,
}

/// Show the prompt while the engine is waiting for text. The buffer is
/// owned by the caller and cleared once a submission is accepted.
pub fn show(ctx: &egui::Context, buffer: &mut String) -> TextPromptAction {
    let mut action = TextPromptAction::None;

    egui::Window::new("Add text")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            let edit = ui.add(
                egui::TextEdit::singleline(buffer)
                    .hint_text("Enter text")
                    .desired_width(260.0),
            );
            edit.request_focus();

            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = TextPromptAction::Submit;
            }

            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    action = TextPromptAction::Submit;
                }
                if ui.button("Cancel").clicked() {
                    action = TextPromptAction::Cancel;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = TextPromptAction::Cancel;
    }

    action
}
