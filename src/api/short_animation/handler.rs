// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Short animation endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info, warn};

use super::request::ShortAnimationRequest;
use crate::api::errors::{ApiError, FailureContext};
use crate::api::form::FormBody;
use crate::api::http_server::AppState;
use crate::api::media::VideoResponse;
use crate::generation::media::generate_short_animation;

pub const SHORT_ANIMATION_FAILURE: FailureContext = FailureContext {
    prefix: "Short animation generation failed",
    missing_url: "Failed to retrieve video URL from workflow result",
    expose_raw: true,
};

/// POST /generate-short-animation - Animate a single reference image
pub async fn generate_short_animation_handler(
    State(state): State<AppState>,
    form: FormBody,
) -> Result<Json<VideoResponse>, ApiError> {
    let provider = state.provider.as_ref().ok_or_else(|| {
        warn!("Short animation requested without FAL_KEY");
        ApiError::MissingCredential
    })?;

    let request = ShortAnimationRequest::from_form(&form).map_err(|e| {
        warn!("Short animation validation failed: {}", e);
        ApiError::ValidationError(e)
    })?;
    debug!(
        "Short animation request received: multipart={}, description_len={}",
        form.is_multipart,
        request.description.len()
    );

    let video = generate_short_animation(provider, &request.description, &request.image_url)
        .await
        .map_err(|e| {
            warn!("Short animation generation failed: {}", e);
            ApiError::from_generation(e, SHORT_ANIMATION_FAILURE)
        })?;

    info!("Short animation served: {}", video.file_name);
    Ok(Json(VideoResponse::new(&video)))
}
