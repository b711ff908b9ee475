// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video-with-audio request parsing

use std::path::Path;

use crate::api::form::{FormBody, UploadedFile};
use crate::generation::request::DEFAULT_DURATION_SECS;

pub const MISSING_FIELDS_MESSAGE: &str = "Description and image are required";

/// Fields of POST /generate-video-with-audio before the image is resolved
#[derive(Debug, Clone, PartialEq)]
pub struct VideoWithAudioRequest {
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub duration: u32,
    /// Uploaded image, which takes precedence over `image_url`
    pub image: Option<UploadedFile>,
}

impl VideoWithAudioRequest {
    /// Errors only when `duration` is present and not an integer
    pub fn from_form(form: &FormBody) -> Result<Self, String> {
        let duration = match form.text("duration") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| format!("duration must be an integer, got {:?}", raw))?,
            None => DEFAULT_DURATION_SECS,
        };

        let image = form
            .file("image")
            .filter(|f| f.file_name.as_deref().is_some_and(|n| !n.is_empty()))
            .cloned();

        Ok(Self {
            description: form.text("description").map(str::to_string),
            image_url: form.text("image_url").map(str::to_string),
            duration,
            image,
        })
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some() || self.image_url.is_some()
    }
}

/// Strip any directory components a client put in the file name
pub fn safe_file_name(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && n != "..")
}
