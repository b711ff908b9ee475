// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation orchestration
//!
//! Pipeline:
//! 1. Validate the request
//! 2. Classify the input into a pathway
//! 3. For remote pathways: upload references, run the workflow, normalize,
//!    fetch and re-encode as PNG
//! 4. On any remote failure (or no provider client), render the placeholder

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::classifier::{classify, Pathway};
use super::errors::GenerationError;
use super::imaging::to_png;
use super::outcome::{GenerationOutcome, NormalizedArtifact};
use super::placeholder::placeholder;
use super::request::GenerationRequest;
use crate::provider::normalize::{normalize, MediaKind};
use crate::provider::upload::UploadBlob;
use crate::provider::workflows::{MultiImageArguments, TextToImageArguments};
use crate::provider::{ArtifactFetcher, ProviderClient};

/// Final PNG for an image request
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub png: Vec<u8>,
    pub pathway: Pathway,
    /// True when the placeholder produced the bytes
    pub placeholder: bool,
    pub processing_time_ms: u64,
}

/// Routes image requests between the provider and the local placeholder
pub struct ImageGenerator {
    provider: Option<Arc<ProviderClient>>,
    fetcher: ArtifactFetcher,
}

impl ImageGenerator {
    pub fn new(provider: Option<Arc<ProviderClient>>, fetcher: ArtifactFetcher) -> Self {
        Self { provider, fetcher }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Produce PNG bytes for the request. Only validation errors and an
    /// unrenderable placeholder reach the caller.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, GenerationError> {
        request.validate()?;

        let start = Instant::now();
        let pathway = classify(request.images.len(), &request.description);
        debug!(
            "Image request: pathway={}, images={}, style={}",
            pathway.as_str(),
            request.images.len(),
            request.style_label
        );

        if pathway.is_remote() {
            match self.attempt_remote(pathway, request).await {
                GenerationOutcome::Success(artifact) => match self.materialize_png(&artifact).await {
                    Ok(png) => {
                        let elapsed = start.elapsed().as_millis() as u64;
                        info!(
                            "Image generated remotely: pathway={}, {} bytes, {}ms",
                            pathway.as_str(),
                            png.len(),
                            elapsed
                        );
                        return Ok(GeneratedImage {
                            png,
                            pathway,
                            placeholder: false,
                            processing_time_ms: elapsed,
                        });
                    }
                    Err(e) => warn!("Remote artifact unusable, using placeholder: {}", e),
                },
                GenerationOutcome::Failure(e) if !e.is_recoverable_for_images() => return Err(e),
                GenerationOutcome::Failure(e) => {
                    warn!(
                        "Remote {} pathway failed, using placeholder: {}",
                        pathway.as_str(),
                        e
                    );
                }
            }
        }

        let png = placeholder(&request.images, &request.style_label)?;
        let elapsed = start.elapsed().as_millis() as u64;
        info!(
            "Placeholder image rendered: pathway={}, {} bytes, {}ms",
            pathway.as_str(),
            png.len(),
            elapsed
        );

        Ok(GeneratedImage {
            png,
            pathway,
            placeholder: true,
            processing_time_ms: elapsed,
        })
    }

    /// Invoke the provider for a remote pathway and normalize its answer
    pub async fn attempt_remote(&self, pathway: Pathway, request: &GenerationRequest) -> GenerationOutcome {
        let provider = match self.provider.as_ref() {
            Some(provider) => provider,
            None => return GenerationOutcome::Failure(GenerationError::MissingCredential),
        };

        let raw = match pathway {
            Pathway::MultiImageRemote => self.run_multi_image(provider, request).await,
            Pathway::TextOnlyRemote => {
                let arguments = TextToImageArguments::new(&request.description, &request.style_label);
                provider
                    .run(&provider.workflows().text_to_image, &arguments)
                    .await
            }
            Pathway::SingleImagePlaceholder | Pathway::LocalPlaceholder => {
                return GenerationOutcome::Failure(GenerationError::Submission(format!(
                    "{} has no remote workflow",
                    pathway.as_str()
                )))
            }
        };

        raw.and_then(|result| normalize(&result, MediaKind::Image).map_err(GenerationError::from))
            .into()
    }

    async fn run_multi_image(
        &self,
        provider: &ProviderClient,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        let mut image_urls = Vec::with_capacity(request.images.len());
        for image in &request.images {
            let blob = UploadBlob::new(image.data.clone(), image.mime_type(), image.file_name.clone());
            image_urls.push(provider.upload(&blob).await?);
        }

        let arguments =
            MultiImageArguments::new(&request.description, &request.style_label, image_urls);
        provider
            .run(&provider.workflows().multi_image, &arguments)
            .await
    }

    async fn materialize_png(&self, artifact: &NormalizedArtifact) -> Result<Vec<u8>, GenerationError> {
        let bytes = self.fetcher.materialize(artifact).await?;
        to_png(&bytes).map_err(|e| GenerationError::Download(format!("artifact is not an image: {}", e)))
    }
}
