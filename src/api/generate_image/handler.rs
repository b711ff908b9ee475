// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use super::request::GenerateImageRequest;
use crate::api::errors::ApiError;
use crate::api::form::FormBody;
use crate::api::http_server::AppState;
use crate::generation::errors::GenerationError;

/// Attachment name of the returned PNG
pub const GENERATED_IMAGE_FILE_NAME: &str = "generated_image.png";

/// POST /generate-image - Generate an image from a description and up to
/// five reference images
///
/// Pipeline:
/// 1. Read multipart (or JSON) fields
/// 2. Validate the description (400 if blank)
/// 3. Classify and run the remote or placeholder pathway
/// 4. Return the PNG as an attachment
pub async fn generate_image_handler(
    State(state): State<AppState>,
    form: FormBody,
) -> Result<Response, ApiError> {
    let request = GenerateImageRequest::from_form(&form).into_generation_request();
    debug!(
        "Image generation request received: description_len={}, images={}, style={}",
        request.description.len(),
        request.images.len(),
        request.style_label
    );

    let generated = state
        .image_generator
        .generate(&request)
        .await
        .map_err(|e| match e {
            GenerationError::Validation(message) => {
                warn!("Image generation validation failed: {}", message);
                ApiError::ValidationError(message)
            }
            other => {
                warn!("Image generation failed: {}", other);
                ApiError::InternalError(format!("Image generation failed: {}", other))
            }
        })?;

    info!(
        "Image served: pathway={}, placeholder={}, {} bytes, {}ms",
        generated.pathway.as_str(),
        generated.placeholder,
        generated.png.len(),
        generated.processing_time_ms
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", GENERATED_IMAGE_FILE_NAME),
            ),
        ],
        generated.png,
    )
        .into_response())
}
