// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation request types and input filtering

use super::errors::GenerationError;

/// Style label used when the client does not send one
pub const DEFAULT_STYLE_LABEL: &str = "neutral";

/// Default clip length for video workflows, in seconds
pub const DEFAULT_DURATION_SECS: u32 = 4;

/// Maximum number of reference images forwarded to a workflow
pub const MAX_INPUT_IMAGES: usize = 5;

/// File extensions accepted for reference images
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// A reference image uploaded by the client
#[derive(Debug, Clone, PartialEq)]
pub struct InputImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl InputImage {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lower-cased extension of the original file name, if any
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn has_allowed_extension(&self) -> bool {
        self.extension()
            .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// MIME type sent to the provider when uploading this image
    pub fn mime_type(&self) -> String {
        if let Some(ref content_type) = self.content_type {
            if !content_type.is_empty() {
                return content_type.clone();
            }
        }
        match self.extension().as_deref() {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("bmp") => "image/bmp",
            _ => "image/jpeg",
        }
        .to_string()
    }
}

/// Image generation input after form extraction
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub description: String,
    pub images: Vec<InputImage>,
    pub style_label: String,
}

impl GenerationRequest {
    /// Build a request, trimming the description and applying the image
    /// allow-list before truncating to [`MAX_INPUT_IMAGES`].
    pub fn new(
        description: &str,
        images: Vec<InputImage>,
        style_label: Option<&str>,
    ) -> Self {
        let style_label = style_label
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STYLE_LABEL)
            .to_string();

        Self {
            description: description.trim().to_string(),
            images: filter_images(images),
            style_label,
        }
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.description.is_empty() {
            return Err(GenerationError::Validation(
                "Description is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Drop images outside the extension allow-list, then keep the first five
pub fn filter_images(images: Vec<InputImage>) -> Vec<InputImage> {
    images
        .into_iter()
        .filter(InputImage::has_allowed_extension)
        .take(MAX_INPUT_IMAGES)
        .collect()
}
