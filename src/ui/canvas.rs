// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and stroke capture.
//!
//! This module provides the main canvas area where users view the
//! source image and paint free-hand strokes over the region to be
//! masked. Strokes are captured in source-image pixel coordinates.

use crate::models::{
    session::MaskSession,
    stroke::{Point, Stroke, BRUSH_WIDTH},
};
use crate::util::geometry;

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    None,
    /// Press and release without drag motion; a complete one-point stroke.
    StrokeTapped(Point),
    /// A drag began over the image; a stroke begins at the press position.
    StrokeStarted(Point),
    /// Pointer moved while painting.
    StrokeMoved(Point),
    /// Pointer released; the in-progress stroke is complete.
    StrokeFinished,
}

/// Display the main canvas area and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    session: &Option<MaskSession>,
    image_texture: &Option<egui::TextureHandle>,
    in_progress_stroke: &Option<Stroke>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    // Create a frame for the canvas
    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        if let (Some(texture), Some(session)) = (image_texture, session) {
            // Scale the image to fit the available space
            let avail_rect = egui::Rect::from_min_size(ui.min_rect().min, ui.available_size());
            let image_rect = geometry::fit_rect(avail_rect, session.width, session.height);

            // Draw the image
            ui.painter().image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            // Capture free-hand strokes. Motion arrives as a drag; a
            // tap arrives as a click, even when its press and release
            // land in the same input batch.
            let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    action = CanvasAction::StrokeTapped(geometry::screen_to_image(
                        pos,
                        &image_rect,
                        session.width,
                        session.height,
                    ));
                }
            }
            if response.drag_started() {
                // The drag is recognized a few pixels in; the stroke
                // still begins at the press position.
                let start = ui
                    .input(|i| i.pointer.press_origin())
                    .or_else(|| response.interact_pointer_pos());
                if let Some(pos) = start {
                    action = CanvasAction::StrokeStarted(geometry::screen_to_image(
                        pos,
                        &image_rect,
                        session.width,
                        session.height,
                    ));
                }
            } else if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    // Positions are clamped to the image bounds, so a
                    // drag wandering outside keeps painting at the edge.
                    action = CanvasAction::StrokeMoved(geometry::screen_to_image(
                        pos,
                        &image_rect,
                        session.width,
                        session.height,
                    ));
                }
            }
            if response.drag_stopped() {
                action = CanvasAction::StrokeFinished;
            }

            // Draw stroke previews on top of the image
            let painter = ui.painter();

            // Committed strokes
            for stroke in session.strokes() {
                draw_stroke(painter, stroke, &image_rect, session.width, session.height);
            }

            // In-progress stroke
            if let Some(stroke) = in_progress_stroke {
                draw_stroke(painter, stroke, &image_rect, session.width, session.height);
            }

            // Brush cursor so the fixed width is visible before painting
            if let Some(hover_pos) = response.hover_pos() {
                let radius = BRUSH_WIDTH / 2.0 * geometry::display_scale(&image_rect, session.width);
                painter.circle_stroke(
                    hover_pos,
                    radius,
                    egui::Stroke::new(1.0, egui::Color32::WHITE),
                );
            }
        } else if session.is_some() {
            // Session exists but no image texture (shouldn't happen normally)
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Loading image...").color(egui::Color32::WHITE));
            });
        } else {
            // Show welcome message when no image is loaded
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(
                        egui::RichText::new("SCRAWL")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.label(
                        egui::RichText::new("Freehand inpainting mask authoring")
                            .size(14.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Open an image, then paint over the region to replace")
                            .color(egui::Color32::from_gray(180)),
                    );
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("File → Open Image...")
                            .weak()
                            .color(egui::Color32::from_gray(130)),
                    );
                });
            });
        }
    });

    action
}

/// Draw a stroke preview over the displayed image.
///
/// The rasterizer is the source of truth for mask coverage; this
/// preview approximates it with a round-capped polyline at display
/// scale.
fn draw_stroke(
    painter: &egui::Painter,
    stroke: &Stroke,
    image_rect: &egui::Rect,
    image_width: u32,
    image_height: u32,
) {
    if stroke.points.is_empty() {
        return;
    }

    let scale = geometry::display_scale(image_rect, image_width);
    let display_width = stroke.width * scale;
    let color = egui::Color32::from_gray(stroke.luma);

    let screen_points: Vec<egui::Pos2> = stroke
        .points
        .iter()
        .map(|p| geometry::image_to_screen(p, image_rect, image_width, image_height))
        .collect();

    // A disc at every captured point gives round caps and joins
    for point in &screen_points {
        painter.circle_filled(*point, display_width / 2.0, color);
    }

    if screen_points.len() >= 2 {
        painter.add(egui::Shape::line(
            screen_points,
            egui::Stroke::new(display_width, color),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_fixture() -> (egui::Context, Option<MaskSession>, Option<egui::TextureHandle>) {
        let ctx = egui::Context::default();
        let session = Some(MaskSession::new("test.png".to_string(), 800, 600));
        let texture = Some(ctx.load_texture(
            "test_source",
            egui::ColorImage::new([800, 600], egui::Color32::WHITE),
            egui::TextureOptions::LINEAR,
        ));
        (ctx, session, texture)
    }

    /// Run one frame with the canvas as the whole UI and collect the
    /// reported action.
    fn run_frame(
        ctx: &egui::Context,
        events: Vec<egui::Event>,
        session: &Option<MaskSession>,
        texture: &Option<egui::TextureHandle>,
    ) -> CanvasAction {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };

        let mut action = CanvasAction::None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = show(ui, session, texture, &None);
            });
        });
        action
    }

    fn press(pos: egui::Pos2) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::default(),
        }
    }

    fn release(pos: egui::Pos2) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::default(),
        }
    }

    #[test]
    fn test_tap_coalesced_into_one_frame_yields_a_tap() {
        let (ctx, session, texture) = canvas_fixture();
        let pos = egui::pos2(400.0, 300.0);

        // First frame registers the canvas for hit testing
        assert_eq!(run_frame(&ctx, vec![], &session, &texture), CanvasAction::None);

        // Press and release arrive in the same input batch
        let tap = run_frame(
            &ctx,
            vec![egui::Event::PointerMoved(pos), press(pos), release(pos)],
            &session,
            &texture,
        );
        let CanvasAction::StrokeTapped(point) = tap else {
            panic!("expected a tap, got {:?}", tap);
        };
        assert!(point.x > 300.0 && point.x < 500.0);
        assert!(point.y > 200.0 && point.y < 400.0);

        // Nothing lingers into the following frame
        assert_eq!(run_frame(&ctx, vec![], &session, &texture), CanvasAction::None);
    }

    #[test]
    fn test_motionless_tap_across_frames_yields_a_tap() {
        let (ctx, session, texture) = canvas_fixture();
        let pos = egui::pos2(200.0, 200.0);

        let _ = run_frame(&ctx, vec![], &session, &texture);
        let down = run_frame(
            &ctx,
            vec![egui::Event::PointerMoved(pos), press(pos)],
            &session,
            &texture,
        );
        assert_eq!(down, CanvasAction::None);

        let up = run_frame(&ctx, vec![release(pos)], &session, &texture);
        assert!(
            matches!(up, CanvasAction::StrokeTapped(_)),
            "expected a tap, got {:?}",
            up
        );
    }

    #[test]
    fn test_drag_yields_start_moves_finish() {
        let (ctx, session, texture) = canvas_fixture();

        let _ = run_frame(&ctx, vec![], &session, &texture);
        let down = run_frame(
            &ctx,
            vec![
                egui::Event::PointerMoved(egui::pos2(300.0, 300.0)),
                press(egui::pos2(300.0, 300.0)),
            ],
            &session,
            &texture,
        );
        assert_eq!(down, CanvasAction::None);

        let started = run_frame(
            &ctx,
            vec![egui::Event::PointerMoved(egui::pos2(400.0, 300.0))],
            &session,
            &texture,
        );
        let CanvasAction::StrokeStarted(first) = started else {
            panic!("expected the stroke to start, got {:?}", started);
        };

        let moved = run_frame(
            &ctx,
            vec![egui::Event::PointerMoved(egui::pos2(450.0, 300.0))],
            &session,
            &texture,
        );
        let CanvasAction::StrokeMoved(second) = moved else {
            panic!("expected the stroke to extend, got {:?}", moved);
        };

        // The stroke begins at the press position, not where the drag
        // was recognized
        assert!(first.x < 350.0, "stroke started at x={}", first.x);
        assert!(first.x < second.x);

        let stopped = run_frame(
            &ctx,
            vec![release(egui::pos2(450.0, 300.0))],
            &session,
            &texture,
        );
        assert_eq!(stopped, CanvasAction::StrokeFinished);
    }
}
