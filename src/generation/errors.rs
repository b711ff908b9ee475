// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for generation requests
//!
//! Upload, submission, normalization and download failures are recovered by
//! the placeholder for images and surfaced to the caller for audio and video.

use serde_json::Value;
use thiserror::Error;

/// Errors raised while turning a provider payload into an artifact
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationFailure {
    /// No known extraction path matched the payload
    #[error("unrecognized provider response shape")]
    UnrecognizedShape { raw: Value },

    /// A path matched but the candidate cannot be an artifact location
    #[error("invalid artifact url: {0:?}")]
    InvalidUrl(String),
}

/// Errors that can occur while serving a generation request
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Missing or empty required field
    #[error("{0}")]
    Validation(String),

    /// Provider credential not configured
    #[error("FAL_KEY not set")]
    MissingCredential,

    /// Every upload mechanism failed
    #[error("upload failed: {0}")]
    Upload(String),

    /// Remote workflow invocation failed
    #[error("workflow submission failed: {0}")]
    Submission(String),

    #[error(transparent)]
    Normalization(#[from] NormalizationFailure),

    /// Fetching a remote artifact failed or returned non-200
    #[error("artifact download failed: {0}")]
    Download(String),

    /// Local fallback could not render
    #[error("placeholder rendering failed: {0}")]
    Placeholder(String),
}

impl GenerationError {
    /// Whether image generation may substitute the placeholder for this error
    pub fn is_recoverable_for_images(&self) -> bool {
        matches!(
            self,
            GenerationError::Upload(_)
                | GenerationError::Submission(_)
                | GenerationError::Normalization(_)
                | GenerationError::Download(_)
                | GenerationError::MissingCredential
        )
    }

    /// Raw provider payload attached to an unrecognized shape, if any
    pub fn raw_payload(&self) -> Option<&Value> {
        match self {
            GenerationError::Normalization(NormalizationFailure::UnrecognizedShape { raw }) => {
                Some(raw)
            }
            _ => None,
        }
    }
}
