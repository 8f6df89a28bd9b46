// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Submission payload assembly and export.
//!
//! The payload is the outgoing form submission: the source image's
//! file name, the user's prompt, and the composed mask as a data URI.
//! Writing it to disk is this tool's transmission boundary; posting it
//! to an inpainting backend is out of scope.

use crate::mask::MaskArtifact;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// The key/value submission consumed by the inpainting backend.
///
/// `mask_data` is not optional: a payload can only be assembled from a
/// composed [`MaskArtifact`], so a submission without a mask cannot be
/// constructed.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    pub image_filename: String,
    pub prompt: String,
    pub mask_data: String,
}

impl SubmissionPayload {
    /// Assemble the payload, consuming the mask artifact.
    pub fn new(image_filename: String, prompt: String, mask: MaskArtifact) -> Self {
        Self {
            image_filename,
            prompt,
            mask_data: mask.into_data_uri(),
        }
    }
}

/// Export the payload to YAML format.
pub fn export_yaml(payload: &SubmissionPayload, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(payload)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export the payload to JSON format.
pub fn export_json(payload: &SubmissionPayload, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(payload)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export the payload, picking the format from the file extension.
/// Anything other than `.yaml`/`.yml` is written as JSON, which is what
/// the backend expects by default.
pub fn export(payload: &SubmissionPayload, path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(payload, path),
        _ => export_json(payload, path),
    }
}
