// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request fields

use crate::api::form::FormBody;
use crate::generation::request::{GenerationRequest, InputImage};

/// Fields of POST /generate-image
#[derive(Debug, Clone, Default)]
pub struct GenerateImageRequest {
    pub description: Option<String>,
    pub style_label: Option<String>,
    pub images: Vec<InputImage>,
}

impl GenerateImageRequest {
    pub fn from_form(form: &FormBody) -> Self {
        let images = form
            .files("images")
            .into_iter()
            .map(|file| {
                let image = InputImage::new(
                    file.file_name.clone().unwrap_or_default(),
                    file.data.clone(),
                );
                match &file.content_type {
                    Some(content_type) => image.with_content_type(content_type.clone()),
                    None => image,
                }
            })
            .collect();

        Self {
            description: form.text("description").map(str::to_string),
            style_label: form.text("style_label").map(str::to_string),
            images,
        }
    }

    /// Convert to a pipeline request; images outside the allow-list are dropped
    pub fn into_generation_request(self) -> GenerationRequest {
        GenerationRequest::new(
            self.description.as_deref().unwrap_or(""),
            self.images,
            self.style_label.as_deref(),
        )
    }
}
