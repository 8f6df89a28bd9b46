// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Prompt entry and submission bar.
//!
//! This module provides the bottom bar where the user types the
//! inpainting prompt and submits the mask, plus a status readout for
//! load/compose progress and errors.

/// Result of prompt bar interaction.
pub enum PromptAction {
    None,
    /// The user pressed Submit.
    Submit,
}

/// Display the prompt bar with the submit button and status line.
pub fn show(
    ui: &mut egui::Ui,
    prompt: &mut String,
    submit_enabled: bool,
    status_text: &str,
    status_is_error: bool,
) -> PromptAction {
    let mut action = PromptAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Prompt:");

        ui.add(
            egui::TextEdit::singleline(prompt)
                .hint_text("Describe what should replace the painted region")
                .desired_width(360.0),
        );

        // Disabled while no image is loaded or a submission is in flight
        if ui
            .add_enabled(submit_enabled, egui::Button::new("Submit"))
            .clicked()
        {
            action = PromptAction::Submit;
        }

        ui.separator();

        let status_color = if status_is_error {
            egui::Color32::LIGHT_RED
        } else {
            egui::Color32::from_gray(180)
        };
        ui.label(egui::RichText::new(status_text).color(status_color).italics());
    });

    action
}
