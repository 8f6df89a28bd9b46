// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, coordinating the drawing canvas, the prompt
//! bar, and the background work of loading images and composing masks.

use crate::io::{
    media,
    payload::{self, SubmissionPayload},
};
use crate::mask;
use crate::models::{session::MaskSession, stroke::Stroke};
use crate::ui::{canvas, prompt};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Result of background image loading.
struct LoadedImageData {
    /// File name (not path) recorded in the session and the payload
    filename: String,
    image: media::LoadedImage,
}

/// Main application state.
pub struct ScrawlApp {
    /// Active mask-authoring session (present once an image has loaded)
    session: Option<MaskSession>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Stroke currently under the pointer; committed on release
    in_progress_stroke: Option<Stroke>,

    /// User-entered inpainting prompt, passed through to the payload
    prompt: String,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Receiver for the in-flight submission. While this is set the
    /// Submit button stays disabled, so only one submission runs at a
    /// time.
    submission: Option<Receiver<Result<PathBuf, String>>>,

    /// Fixed submission destination from the command line; when unset
    /// each submission asks with a save dialog
    output_path: Option<PathBuf>,

    /// Destination of the last successful submission
    last_submission: Option<PathBuf>,

    /// Last error surfaced to the user
    last_error: Option<String>,
}

impl Default for ScrawlApp {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl ScrawlApp {
    /// Create a new scrawl application instance.
    ///
    /// `initial_image` is loaded immediately when given. `output_path`
    /// makes submissions write there instead of asking with a dialog.
    pub fn new(initial_image: Option<PathBuf>, output_path: Option<PathBuf>) -> Self {
        let mut app = Self {
            session: None,
            image_texture: None,
            in_progress_stroke: None,
            prompt: String::new(),
            image_loader: None,
            loading_message: None,
            submission: None,
            output_path,
            last_submission: None,
            last_error: None,
        };

        if let Some(path) = initial_image {
            if media::is_supported_image(&path) {
                app.load_image_file(path);
            } else {
                log::error!("Unsupported image file: {}", path.display());
                app.last_error = Some(format!("Unsupported image file: {}", path.display()));
            }
        }

        app
    }

    /// Load a source image and start a fresh session for it (asynchronously).
    pub fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());
        self.last_error = None;

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedImageData, String> {
                let image = media::load_image(&path)
                    .map_err(|e| format!("Failed to load image: {:#}", e))?;

                log::info!(
                    "Loaded image: {} ({}x{})",
                    path.display(),
                    image.width,
                    image.height
                );

                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());

                Ok(LoadedImageData { filename, image })
            })();

            let _ = sender.send(result);
        });
    }

    /// Commit the in-progress stroke to the session.
    fn commit_stroke(&mut self) {
        if let Some(stroke) = self.in_progress_stroke.take() {
            if let Some(ref mut session) = self.session {
                log::info!(
                    "Committed stroke with {} points, total strokes: {}",
                    stroke.point_count(),
                    session.stroke_count() + 1
                );
                session.commit_stroke(stroke);
                // New strokes belong to the next submission; retire the
                // previous success message
                self.last_submission = None;
            }
        }
    }

    /// Apply the canvas interaction result to the session state.
    fn apply_canvas_action(&mut self, action: canvas::CanvasAction) {
        match action {
            canvas::CanvasAction::StrokeTapped(point) => {
                // A tap is a complete gesture: begin and commit in one step
                self.in_progress_stroke = Some(Stroke::begin(point));
                self.commit_stroke();
            }
            canvas::CanvasAction::StrokeStarted(point) => {
                self.in_progress_stroke = Some(Stroke::begin(point));
            }
            canvas::CanvasAction::StrokeMoved(point) => {
                if let Some(ref mut stroke) = self.in_progress_stroke {
                    stroke.push(point);
                }
            }
            canvas::CanvasAction::StrokeFinished => {
                self.commit_stroke();
            }
            canvas::CanvasAction::None => {}
        }
    }

    /// Kick off a submission: resolve the destination, then compose the
    /// mask and write the payload on a background thread.
    fn start_submission(&mut self) {
        let Some(ref session) = self.session else {
            return;
        };

        // The save dialog has to run on the UI thread
        let path = match self.output_path {
            Some(ref path) => path.clone(),
            None => match rfd::FileDialog::new()
                .add_filter("Submission", &["json", "yaml", "yml"])
                .set_file_name("submission.json")
                .save_file()
            {
                Some(path) => path,
                None => return, // cancelled
            },
        };

        // Snapshot the session; strokes committed after this instant
        // belong to the next submission
        let snapshot = session.clone();
        let prompt = self.prompt.clone();

        let (sender, receiver) = channel();
        self.submission = Some(receiver);
        self.last_error = None;
        self.last_submission = None;

        // Spawn background thread for composing and writing
        std::thread::spawn(move || {
            let result = (|| -> Result<PathBuf, String> {
                let artifact = mask::compose(&snapshot)
                    .map_err(|e| format!("Failed to compose mask: {:#}", e))?;

                log::info!(
                    "Composed {}x{} mask from {} strokes",
                    artifact.width,
                    artifact.height,
                    snapshot.stroke_count()
                );

                let submission =
                    SubmissionPayload::new(snapshot.image_filename, prompt, artifact);

                payload::export(&submission, &path)
                    .map_err(|e| format!("Failed to write submission: {:#}", e))?;

                Ok(path)
            })();

            let _ = sender.send(result);
        });
    }

    /// Export the current mask as a standalone PNG image.
    fn export_mask_png(&mut self, path: PathBuf) {
        let Some(ref session) = self.session else {
            return;
        };

        let result = mask::compose(session)
            .and_then(|artifact| std::fs::write(&path, &artifact.png).map_err(Into::into));

        match result {
            Ok(()) => log::info!("Exported mask to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export mask: {:#}", e);
                self.last_error = Some(format!("Failed to export mask: {:#}", e));
            }
        }
    }

    /// One-line status for the prompt bar.
    fn status_line(&self) -> (String, bool) {
        if let Some(ref error) = self.last_error {
            return (error.clone(), true);
        }
        if self.submission.is_some() {
            return ("Composing mask...".to_string(), false);
        }
        if let Some(ref message) = self.loading_message {
            return (message.clone(), false);
        }
        if let Some(ref path) = self.last_submission {
            return (format!("Submitted to {}", path.display()), false);
        }
        match self.session {
            Some(ref session) => (
                format!(
                    "{} - {}x{} - {} strokes",
                    session.image_filename,
                    session.width,
                    session.height,
                    session.stroke_count()
                ),
                false,
            ),
            None => ("No image loaded".to_string(), false),
        }
    }
}

impl eframe::App for ScrawlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed image loading
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                self.loading_message = None;

                match result {
                    Ok(loaded_data) => {
                        // Create egui texture from the loaded image data
                        let size = [
                            loaded_data.image.width as usize,
                            loaded_data.image.height as usize,
                        ];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &loaded_data.image.pixels);
                        let texture = ctx.load_texture(
                            "source_image",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        );

                        self.image_texture = Some(texture);
                        // Fresh session; its dimensions are fixed from here on
                        self.session = Some(MaskSession::new(
                            loaded_data.filename,
                            loaded_data.image.width,
                            loaded_data.image.height,
                        ));
                        self.in_progress_stroke = None;
                        self.last_submission = None;

                        log::info!("Session ready");
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        self.last_error = Some(e);
                    }
                }
            }
        }

        // Check for a completed submission
        if let Some(ref receiver) = self.submission {
            if let Ok(result) = receiver.try_recv() {
                self.submission = None;

                match result {
                    Ok(path) => {
                        log::info!("Submission written to {}", path.display());
                        self.last_submission = Some(path);
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        self.last_error = Some(e);
                    }
                }
            }
        }

        // Request repaint while background work is pending (to update
        // the spinner and keep polling the channels)
        if self.loading_message.is_some() || self.submission.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        // Open native file picker
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", media::SUPPORTED_EXTENSIONS)
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_session = self.session.is_some();
                    if ui
                        .add_enabled(has_session, egui::Button::new("Export Mask PNG..."))
                        .clicked()
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PNG", &["png"])
                            .set_file_name("mask.png")
                            .save_file()
                        {
                            self.export_mask_png(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Prompt and submission bar (bottom)
        let submit_enabled = self.session.is_some()
            && self.submission.is_none()
            && self.loading_message.is_none();
        let (status_text, status_is_error) = self.status_line();

        let prompt_action = egui::TopBottomPanel::bottom("prompt_bar")
            .show(ctx, |ui| {
                prompt::show(
                    ui,
                    &mut self.prompt,
                    submit_enabled,
                    &status_text,
                    status_is_error,
                )
            })
            .inner;

        match prompt_action {
            prompt::PromptAction::Submit => self.start_submission(),
            prompt::PromptAction::None => {}
        }

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    canvas::show(
                        ui,
                        &self.session,
                        &self.image_texture,
                        &self.in_progress_stroke,
                    )
                }
            })
            .inner;

        // Handle canvas actions
        self.apply_canvas_action(canvas_action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stroke::Point;
    use crate::ui::canvas::CanvasAction;

    fn app_with_session() -> ScrawlApp {
        let mut app = ScrawlApp::default();
        app.session = Some(MaskSession::new("test.png".to_string(), 640, 480));
        app
    }

    #[test]
    fn test_tap_action_commits_a_one_point_stroke() {
        let mut app = app_with_session();

        app.apply_canvas_action(CanvasAction::StrokeTapped(Point::new(10.0, 20.0)));

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.stroke_count(), 1);
        assert_eq!(session.strokes()[0].point_count(), 1);
        assert!(app.in_progress_stroke.is_none());
    }

    #[test]
    fn test_drag_actions_build_a_single_stroke() {
        let mut app = app_with_session();

        app.apply_canvas_action(CanvasAction::StrokeStarted(Point::new(1.0, 1.0)));
        app.apply_canvas_action(CanvasAction::StrokeMoved(Point::new(2.0, 1.0)));
        app.apply_canvas_action(CanvasAction::StrokeMoved(Point::new(3.0, 1.0)));
        app.apply_canvas_action(CanvasAction::StrokeFinished);

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.stroke_count(), 1);
        assert_eq!(session.strokes()[0].point_count(), 3);
    }

    #[test]
    fn test_submitted_status_retires_when_painting_resumes() {
        let mut app = app_with_session();
        app.last_submission = Some(PathBuf::from("/tmp/submission.json"));

        let (text, _) = app.status_line();
        assert!(text.starts_with("Submitted to"));

        app.apply_canvas_action(CanvasAction::StrokeTapped(Point::new(5.0, 5.0)));

        let (text, is_error) = app.status_line();
        assert!(!is_error);
        assert!(!text.contains("Submitted"), "stale status: {}", text);
        assert!(text.contains("1 strokes"));
    }
}
