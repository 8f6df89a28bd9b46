// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Source image loading.
//!
//! This module handles decoding source images and converting them to a
//! format suitable both for display in egui and for sizing the mask
//! raster.

use anyhow::{Context, Result};
use std::path::Path;

/// File extensions accepted for source images.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// A decoded source image ready for texture upload.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
}

/// Check whether a path carries one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode an image file into RGBA8 pixels.
///
/// Malformed or unreadable files surface here as errors; there is no
/// further validation of the content.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();

    Ok(LoadedImage {
        width,
        height,
        pixels: image.into_raw(),
    })
}
