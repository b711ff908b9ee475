// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Short animation request parsing

use crate::api::form::FormBody;
use crate::generation::imaging::encode_data_uri;

const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Validated input for POST /generate-short-animation
#[derive(Debug, Clone, PartialEq)]
pub struct ShortAnimationRequest {
    pub description: String,
    /// Public URL, or a `data:` URI built from an uploaded file
    pub image_url: String,
}

impl ShortAnimationRequest {
    /// Multipart bodies carry `description` and an `image` file; JSON bodies
    /// carry `description` and `image_url`.
    pub fn from_form(form: &FormBody) -> Result<Self, String> {
        let description = form
            .text("description")
            .ok_or_else(|| "description is required".to_string())?
            .to_string();

        let image_url = if form.is_multipart {
            let image = form
                .file("image")
                .ok_or_else(|| "image file is required".to_string())?;
            let media_type = image
                .content_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MEDIA_TYPE);
            encode_data_uri(media_type, &image.data)
        } else {
            form.text("image_url")
                .ok_or_else(|| "image_url is required".to_string())?
                .to_string()
        };

        Ok(Self {
            description,
            image_url,
        })
    }
}
