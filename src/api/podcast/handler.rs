// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Podcast endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info, warn};

use super::request::GeneratePodcastRequest;
use super::response::GeneratePodcastResponse;
use crate::api::errors::{ApiError, FailureContext};
use crate::api::form::FormBody;
use crate::api::http_server::AppState;
use crate::generation::media::generate_podcast;

pub const PODCAST_FAILURE: FailureContext = FailureContext {
    prefix: "Podcast generation failed",
    missing_url: "Failed to generate audio or retrieve URL from Fal workflow",
    expose_raw: false,
};

/// POST /generate-podcast - Two-speaker audio podcast from a prompt
pub async fn generate_podcast_handler(
    State(state): State<AppState>,
    form: FormBody,
) -> Result<Json<GeneratePodcastResponse>, ApiError> {
    let provider = state.provider.as_ref().ok_or_else(|| {
        warn!("Podcast requested without FAL_KEY");
        ApiError::MissingCredential
    })?;

    let request = GeneratePodcastRequest::from_form(&form);
    request.validate().map_err(ApiError::ValidationError)?;
    debug!("Podcast request received: prompt_len={}", request.prompt.len());

    let podcast = generate_podcast(provider, &request.prompt)
        .await
        .map_err(|e| {
            warn!("Podcast generation failed: {}", e);
            ApiError::from_generation(e, PODCAST_FAILURE)
        })?;

    info!("Podcast served: {}", podcast.audio.file_name);
    Ok(Json(GeneratePodcastResponse::from(&podcast)))
}
