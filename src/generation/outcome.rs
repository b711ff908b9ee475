// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Normalized artifacts and per-request outcomes

use super::errors::GenerationError;
use super::imaging::{encode_data_uri, InlineData};

/// Where the bytes of a generated artifact live
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactLocation {
    /// Must be fetched over HTTP(S)
    Remote(String),
    /// Already decoded from a `data:` URI
    Inline(InlineData),
}

/// Canonical output of a successful generation, whatever the pathway
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedArtifact {
    pub location: ArtifactLocation,
    pub content_type: String,
    pub file_name: String,
}

impl NormalizedArtifact {
    /// URL handed back to clients; inline payloads are re-encoded as a data URI
    pub fn url(&self) -> String {
        match &self.location {
            ArtifactLocation::Remote(url) => url.clone(),
            ArtifactLocation::Inline(inline) => encode_data_uri(&inline.media_type, &inline.bytes),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.location, ArtifactLocation::Inline(_))
    }
}

/// Result of one generation attempt. Built once, never mutated.
#[derive(Debug)]
pub enum GenerationOutcome {
    Success(NormalizedArtifact),
    Failure(GenerationError),
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success(_))
    }

    pub fn into_result(self) -> Result<NormalizedArtifact, GenerationError> {
        match self {
            GenerationOutcome::Success(artifact) => Ok(artifact),
            GenerationOutcome::Failure(err) => Err(err),
        }
    }
}

impl From<Result<NormalizedArtifact, GenerationError>> for GenerationOutcome {
    fn from(result: Result<NormalizedArtifact, GenerationError>) -> Self {
        match result {
            Ok(artifact) => GenerationOutcome::Success(artifact),
            Err(err) => GenerationOutcome::Failure(err),
        }
    }
}
