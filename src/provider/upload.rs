// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Blob upload to the provider's storage
//!
//! The provider exposes several equivalent upload entry points with
//! inconsistent availability. Strategies are tried in order and the first
//! success wins.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::generation::errors::GenerationError;

/// Bytes to upload, with the metadata the provider wants
#[derive(Debug, Clone, PartialEq)]
pub struct UploadBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl UploadBlob {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            file_name: file_name.into(),
        }
    }
}

/// One way of getting a blob onto the provider's storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadStrategy: Send + Sync {
    /// Name for logging
    fn name(&self) -> &'static str;

    /// Upload the blob and return its public URL
    async fn upload(&self, blob: &UploadBlob) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct InitiateUploadRequest<'a> {
    content_type: &'a str,
    file_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct InitiateUploadResponse {
    upload_url: String,
    file_url: String,
}

#[derive(Debug, Deserialize)]
struct CdnUploadResponse {
    access_url: String,
}

/// Two-step upload: ask the storage API for a signed URL, then PUT the bytes
pub struct StorageInitiateUpload {
    client: Client,
    api_key: String,
    rest_url: String,
}

impl StorageInitiateUpload {
    pub fn new(client: Client, api_key: &str, rest_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            rest_url: rest_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UploadStrategy for StorageInitiateUpload {
    fn name(&self) -> &'static str {
        "storage-initiate"
    }

    async fn upload(&self, blob: &UploadBlob) -> Result<String, GenerationError> {
        let url = format!(
            "{}/storage/upload/initiate?storage_type=fal-cdn-v3",
            self.rest_url
        );
        debug!("Initiating upload POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", self.api_key))
            .json(&InitiateUploadRequest {
                content_type: &blob.content_type,
                file_name: &blob.file_name,
            })
            .send()
            .await
            .map_err(|e| GenerationError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upload(format!(
                "initiate returned {}: {}",
                status, text
            )));
        }

        let initiated: InitiateUploadResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Upload(format!("bad initiate response: {}", e)))?;

        let put = self
            .client
            .put(&initiated.upload_url)
            .header("Content-Type", blob.content_type.as_str())
            .body(blob.bytes.clone())
            .send()
            .await
            .map_err(|e| GenerationError::Upload(e.to_string()))?;

        if !put.status().is_success() {
            return Err(GenerationError::Upload(format!(
                "signed PUT returned {}",
                put.status()
            )));
        }

        Ok(initiated.file_url)
    }
}

/// Single POST of the raw bytes to the CDN
pub struct CdnDirectUpload {
    client: Client,
    api_key: String,
    cdn_url: String,
}

impl CdnDirectUpload {
    pub fn new(client: Client, api_key: &str, cdn_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UploadStrategy for CdnDirectUpload {
    fn name(&self) -> &'static str {
        "cdn-direct"
    }

    async fn upload(&self, blob: &UploadBlob) -> Result<String, GenerationError> {
        let url = format!("{}/files/upload", self.cdn_url);
        debug!("Direct CDN upload POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", self.api_key))
            .header("Content-Type", blob.content_type.as_str())
            .header("X-Fal-File-Name", blob.file_name.as_str())
            .body(blob.bytes.clone())
            .send()
            .await
            .map_err(|e| GenerationError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upload(format!(
                "cdn returned {}: {}",
                status, text
            )));
        }

        let uploaded: CdnUploadResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Upload(format!("bad cdn response: {}", e)))?;

        Ok(uploaded.access_url)
    }
}

/// Ordered list of upload strategies
pub struct Uploader {
    strategies: Vec<Box<dyn UploadStrategy>>,
}

impl Uploader {
    pub fn new(strategies: Vec<Box<dyn UploadStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Try each strategy in order; first success short-circuits
    pub async fn upload(&self, blob: &UploadBlob) -> Result<String, GenerationError> {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            match strategy.upload(blob).await {
                Ok(url) if !url.trim().is_empty() => {
                    info!(
                        "Uploaded {} ({} bytes) via {}",
                        blob.file_name,
                        blob.bytes.len(),
                        strategy.name()
                    );
                    return Ok(url);
                }
                Ok(_) => {
                    warn!("Upload strategy {} returned an empty URL", strategy.name());
                    failures.push(format!("{}: empty url", strategy.name()));
                }
                Err(e) => {
                    warn!(
                        "Upload strategy {} failed: {}, trying next",
                        strategy.name(),
                        e
                    );
                    failures.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        if failures.is_empty() {
            return Err(GenerationError::Upload(
                "no upload strategies configured".to_string(),
            ));
        }
        Err(GenerationError::Upload(failures.join("; ")))
    }
}
