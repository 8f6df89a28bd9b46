// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! scrawl - freehand inpainting mask authoring
//!
//! A cross-platform desktop application for painting a binary mask over
//! an image and packaging it, with a prompt, into a submission payload
//! for an inpainting backend.

mod app;
mod io;
mod mask;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::ScrawlApp;
use clap::Parser;
use std::path::PathBuf;

/// Command-line options.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source image to open at startup (png/jpg/jpeg); images can also
    /// be opened later from the File menu
    image: Option<PathBuf>,

    /// Write submission payloads to this file (.json, .yaml or .yml)
    /// instead of asking with a save dialog
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let Args { image, output } = Args::parse();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("scrawl - inpainting mask authoring"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "scrawl",
        options,
        Box::new(move |_cc| Ok(Box::new(ScrawlApp::new(image, output)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
