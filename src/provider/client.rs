// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Provider client for remote generative-media workflows
//!
//! Constructed once per process with the credential injected, then shared by
//! every request through the axum state.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::upload::{CdnDirectUpload, StorageInitiateUpload, UploadBlob, Uploader};
use crate::config::{ProviderConfig, WorkflowIds};
use crate::generation::errors::GenerationError;

/// Handle to a queued workflow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobHandle {
    pub request_id: String,
    pub status_url: String,
    pub response_url: String,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    request_id: String,
    #[serde(default)]
    status_url: Option<String>,
    #[serde(default)]
    response_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    #[serde(default)]
    error: Option<Value>,
}

/// Queue states reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    InQueue,
    InProgress,
    Completed,
    Other(String),
}

impl JobStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "IN_QUEUE" => JobStatus::InQueue,
            "IN_PROGRESS" => JobStatus::InProgress,
            "COMPLETED" => JobStatus::Completed,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

/// Client for the provider's run, queue and storage APIs
pub struct ProviderClient {
    client: Client,
    api_key: String,
    config: ProviderConfig,
    uploader: Uploader,
}

impl ProviderClient {
    /// Create a client with the credential injected
    pub fn new(config: ProviderConfig, api_key: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        let uploader = Uploader::new(vec![
            Box::new(StorageInitiateUpload::new(
                client.clone(),
                api_key,
                &config.rest_url,
            )),
            Box::new(CdnDirectUpload::new(client.clone(), api_key, &config.cdn_url)),
        ]);

        info!(
            "Provider client configured: run={}, queue={}, uploads={:?}",
            config.run_url,
            config.queue_url,
            uploader.strategy_names()
        );

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            config,
            uploader,
        })
    }

    /// Build a client from config; `None` when no credential is configured
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Option<Self>> {
        match config.api_key.as_deref() {
            Some(key) => Ok(Some(Self::new(config.clone(), key)?)),
            None => Ok(None),
        }
    }

    /// Replace the upload chain
    pub fn with_uploader(mut self, uploader: Uploader) -> Self {
        self.uploader = uploader;
        self
    }

    pub fn workflows(&self) -> &WorkflowIds {
        &self.config.workflows
    }

    fn authorization(&self) -> String {
        format!("Key {}", self.api_key)
    }

    /// Upload a blob, trying every upload mechanism in order
    pub async fn upload(&self, blob: &UploadBlob) -> Result<String, GenerationError> {
        self.uploader.upload(blob).await
    }

    /// Upload a staged file
    pub async fn upload_file(
        &self,
        path: &Path,
        content_type: &str,
        file_name: &str,
    ) -> Result<String, GenerationError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GenerationError::Upload(format!("cannot read staged file: {}", e)))?;
        self.upload(&UploadBlob::new(bytes, content_type, file_name)).await
    }

    /// Run a short-latency workflow synchronously
    pub async fn run<A>(&self, workflow_id: &str, arguments: &A) -> Result<Value, GenerationError>
    where
        A: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.config.run_url.trim_end_matches('/'), workflow_id);
        debug!("Workflow run POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.authorization())
            .json(arguments)
            .send()
            .await
            .map_err(|e| GenerationError::Submission(e.to_string()))?;

        read_json(response).await
    }

    /// Queue a workflow run and return its handle
    pub async fn submit<A>(&self, workflow_id: &str, arguments: &A) -> Result<JobHandle, GenerationError>
    where
        A: Serialize + ?Sized,
    {
        let queue_url = self.config.queue_url.trim_end_matches('/');
        let url = format!("{}/{}", queue_url, workflow_id);
        debug!("Workflow submit POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.authorization())
            .json(arguments)
            .send()
            .await
            .map_err(|e| GenerationError::Submission(e.to_string()))?;

        let submitted: SubmitResponse = serde_json::from_value(read_json(response).await?)
            .map_err(|e| GenerationError::Submission(format!("bad submit response: {}", e)))?;

        let base = format!("{}/requests/{}", url, submitted.request_id);
        let handle = JobHandle {
            status_url: submitted
                .status_url
                .unwrap_or_else(|| format!("{}/status", base)),
            response_url: submitted.response_url.unwrap_or(base),
            request_id: submitted.request_id,
        };

        info!("Workflow {} queued as {}", workflow_id, handle.request_id);
        Ok(handle)
    }

    /// Wait for a queued job and fetch its result, bounded by the job timeout
    pub async fn resolve(&self, handle: &JobHandle) -> Result<Value, GenerationError> {
        self.resolve_within(handle, self.config.job_timeout).await
    }

    pub async fn resolve_within(
        &self,
        handle: &JobHandle,
        max_wait: Duration,
    ) -> Result<Value, GenerationError> {
        let deadline = Instant::now() + max_wait;

        loop {
            let response = self
                .client
                .get(&handle.status_url)
                .header("Authorization", self.authorization())
                .send()
                .await
                .map_err(|e| GenerationError::Submission(e.to_string()))?;

            let status: StatusResponse = serde_json::from_value(read_json(response).await?)
                .map_err(|e| GenerationError::Submission(format!("bad status response: {}", e)))?;

            match JobStatus::parse(&status.status) {
                JobStatus::Completed => {
                    if let Some(error) = status.error.filter(|e| !e.is_null()) {
                        return Err(GenerationError::Submission(format!(
                            "job {} failed: {}",
                            handle.request_id, error
                        )));
                    }
                    break;
                }
                JobStatus::InQueue | JobStatus::InProgress => {
                    debug!("Job {} is {}", handle.request_id, status.status);
                }
                JobStatus::Other(other) => {
                    warn!("Job {} reported status {}", handle.request_id, other);
                    return Err(GenerationError::Submission(format!(
                        "job {} ended with status {}",
                        handle.request_id, other
                    )));
                }
            }

            if Instant::now() + self.config.poll_interval > deadline {
                return Err(GenerationError::Submission(format!(
                    "job {} did not complete within {}s",
                    handle.request_id,
                    max_wait.as_secs()
                )));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }

        let response = self
            .client
            .get(&handle.response_url)
            .header("Authorization", self.authorization())
            .send()
            .await
            .map_err(|e| GenerationError::Submission(e.to_string()))?;

        read_json(response).await
    }

    /// Submit and block until the remote job completes
    pub async fn subscribe<A>(&self, workflow_id: &str, arguments: &A) -> Result<Value, GenerationError>
    where
        A: Serialize + ?Sized,
    {
        let handle = self.submit(workflow_id, arguments).await?;
        self.resolve(&handle).await
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, GenerationError> {
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(GenerationError::Submission(format!(
            "provider returned {}: {}",
            status, text
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| GenerationError::Submission(format!("invalid JSON from provider: {}", e)))
}
