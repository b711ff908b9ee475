// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetching generated artifacts

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ARTIFACT_DOWNLOAD_TIMEOUT;
use crate::generation::errors::GenerationError;
use crate::generation::outcome::{ArtifactLocation, NormalizedArtifact};

/// Downloads remote artifacts with a bounded timeout
#[derive(Debug, Clone)]
pub struct ArtifactFetcher {
    client: Client,
}

impl ArtifactFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_default_timeout() -> anyhow::Result<Self> {
        Self::new(ARTIFACT_DOWNLOAD_TIMEOUT)
    }

    /// Bytes of an artifact. Inline payloads never touch the network.
    pub async fn materialize(&self, artifact: &NormalizedArtifact) -> Result<Vec<u8>, GenerationError> {
        match &artifact.location {
            ArtifactLocation::Inline(inline) => {
                debug!("Using inline artifact ({} bytes)", inline.bytes.len());
                Ok(inline.bytes.clone())
            }
            ArtifactLocation::Remote(url) => self.fetch(url).await,
        }
    }

    /// GET a remote artifact; anything but 200 is a download failure
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, GenerationError> {
        debug!("Fetching artifact from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Artifact fetch failed for {}: {}", url, e);
            if e.is_timeout() {
                GenerationError::Download(format!("timed out fetching {}", url))
            } else {
                GenerationError::Download(e.to_string())
            }
        })?;

        if response.status() != StatusCode::OK {
            return Err(GenerationError::Download(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                url
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Download(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
