// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Audio and video pipelines
//!
//! Unlike images these have no local fallback: every provider or
//! normalization failure is returned to the caller.

use serde_json::Value;
use std::time::Instant;
use tracing::info;

use super::errors::GenerationError;
use super::outcome::NormalizedArtifact;
use crate::provider::normalize::{normalize, MediaKind};
use crate::provider::workflows::{
    PodcastArguments, ShortAnimationArguments, VideoWithAudioArguments,
};
use crate::provider::ProviderClient;

/// Generated podcast audio plus whatever duration the workflow reported
#[derive(Debug, Clone, PartialEq)]
pub struct PodcastAudio {
    pub audio: NormalizedArtifact,
    pub duration: Option<Value>,
}

/// Two-speaker podcast from a free-text prompt
pub async fn generate_podcast(
    provider: &ProviderClient,
    prompt: &str,
) -> Result<PodcastAudio, GenerationError> {
    if prompt.is_empty() {
        return Err(GenerationError::Validation("Prompt is required".to_string()));
    }

    let start = Instant::now();
    let raw = provider
        .subscribe(&provider.workflows().podcast, &PodcastArguments::new(prompt))
        .await?;

    let audio = normalize(&raw, MediaKind::Audio)?;
    let duration = raw.get("duration").filter(|d| !d.is_null()).cloned();

    info!(
        "Podcast generated in {}ms: {}",
        start.elapsed().as_millis(),
        audio.file_name
    );
    Ok(PodcastAudio { audio, duration })
}

/// Short silent animation of a reference image. `image_url` may be a
/// public URL or a `data:` URI.
pub async fn generate_short_animation(
    provider: &ProviderClient,
    description: &str,
    image_url: &str,
) -> Result<NormalizedArtifact, GenerationError> {
    let start = Instant::now();
    let arguments = ShortAnimationArguments::new(description, image_url);
    let raw = provider
        .subscribe(&provider.workflows().short_animation, &arguments)
        .await?;

    let video = normalize(&raw, MediaKind::Video)?;
    info!(
        "Short animation generated in {}ms: {}",
        start.elapsed().as_millis(),
        video.file_name
    );
    Ok(video)
}

/// Short animation with a generated soundtrack
pub async fn generate_video_with_audio(
    provider: &ProviderClient,
    description: &str,
    image_url: &str,
    duration: u32,
) -> Result<NormalizedArtifact, GenerationError> {
    let start = Instant::now();
    let arguments = VideoWithAudioArguments::new(description, image_url, duration);
    let raw = provider
        .subscribe(&provider.workflows().video_with_audio, &arguments)
        .await?;

    let video = normalize(&raw, MediaKind::Video)?;
    info!(
        "Video with audio ({}s) generated in {}ms: {}",
        duration,
        start.elapsed().as_millis(),
        video.file_name
    );
    Ok(video)
}
