// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video-with-audio endpoint handler

use axum::{extract::State, Json};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::request::{safe_file_name, VideoWithAudioRequest, MISSING_FIELDS_MESSAGE};
use crate::api::errors::{ApiError, FailureContext};
use crate::api::form::{FormBody, UploadedFile};
use crate::api::http_server::AppState;
use crate::api::media::VideoResponse;
use crate::api::staging::StagedUpload;
use crate::generation::media::generate_video_with_audio;
use crate::provider::ProviderClient;

pub const VIDEO_WITH_AUDIO_FAILURE: FailureContext = FailureContext {
    prefix: "Video with audio generation failed",
    missing_url: "Failed to generate video or missing URL in response",
    expose_raw: true,
};

/// POST /generate-video-with-audio - Animate an image with a soundtrack
///
/// An uploaded `image` is staged to disk and pushed to provider storage;
/// otherwise `image_url` is forwarded as-is.
pub async fn generate_video_with_audio_handler(
    State(state): State<AppState>,
    form: FormBody,
) -> Result<Json<VideoResponse>, ApiError> {
    let provider = state.provider.as_ref().ok_or_else(|| {
        warn!("Video with audio requested without FAL_KEY");
        ApiError::MissingCredential
    })?;

    let request = VideoWithAudioRequest::from_form(&form).map_err(|e| {
        warn!("Video with audio validation failed: {}", e);
        ApiError::ValidationError(e)
    })?;
    debug!(
        "Video with audio request received: duration={}, uploaded_image={}, image_url={}",
        request.duration,
        request.image.is_some(),
        request.image_url.is_some()
    );

    let description = match (&request.description, request.has_image()) {
        (Some(description), true) => description.clone(),
        _ => return Err(ApiError::ValidationError(MISSING_FIELDS_MESSAGE.to_string())),
    };

    let image_url = match &request.image {
        Some(image) => stage_and_upload(provider, state.config.staging_dir.as_deref(), image)
            .await
            .map_err(|e| {
                warn!("Reference image upload failed: {}", e);
                e
            })?,
        None => request.image_url.clone().unwrap_or_default(),
    };

    let video = generate_video_with_audio(provider, &description, &image_url, request.duration)
        .await
        .map_err(|e| {
            warn!("Video with audio generation failed: {}", e);
            ApiError::from_generation(e, VIDEO_WITH_AUDIO_FAILURE)
        })?;

    info!("Video with audio served: {}", video.file_name);
    Ok(Json(VideoResponse::new(&video)))
}

/// Write the upload to a temp file, push it to provider storage and remove
/// the temp file whatever the outcome
async fn stage_and_upload(
    provider: &ProviderClient,
    staging_dir: Option<&Path>,
    image: &UploadedFile,
) -> Result<String, ApiError> {
    let original = image
        .file_name
        .as_deref()
        .and_then(safe_file_name)
        .unwrap_or_else(|| "image.jpg".to_string());
    let extension = Path::new(&original)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpg");
    let upload_name = format!("{}.{}", Uuid::new_v4(), extension);
    let content_type = image
        .content_type
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "image/jpeg".to_string());

    let staged = StagedUpload::create(staging_dir, &image.data, &content_type, &original)
        .map_err(|e| {
            ApiError::InternalError(format!(
                "{}: cannot stage upload: {}",
                VIDEO_WITH_AUDIO_FAILURE.prefix, e
            ))
        })?;

    let uploaded = provider
        .upload_file(staged.path(), &staged.content_type, &upload_name)
        .await;
    staged.cleanup();

    uploaded.map_err(|e| ApiError::from_generation(e, VIDEO_WITH_AUDIO_FAILURE))
}
