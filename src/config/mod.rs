// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service and provider configuration loaded from environment variables

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RUN_URL: &str = "https://fal.run";
pub const DEFAULT_QUEUE_URL: &str = "https://queue.fal.run";
pub const DEFAULT_REST_URL: &str = "https://rest.alpha.fal.ai";
pub const DEFAULT_CDN_URL: &str = "https://v3.fal.media";

pub const MULTI_IMAGE_WORKFLOW: &str = "fal-ai/flux-pro/kontext/max/multi";
pub const TEXT_TO_IMAGE_WORKFLOW: &str = "fal-ai/flux-pro/kontext/text-to-image";
pub const PODCAST_WORKFLOW: &str = "workflows/odtboun/couplepodcast";
pub const SHORT_ANIMATION_WORKFLOW: &str = "workflows/odtboun/short-couple-video";
pub const VIDEO_AUDIO_WORKFLOW: &str = "workflows/odtboun/short-couple-video-audio";

/// Upper bound for fetching a generated artifact
pub const ARTIFACT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote workflow identifiers, fixed for the lifetime of the process
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowIds {
    pub multi_image: String,
    pub text_to_image: String,
    pub podcast: String,
    pub short_animation: String,
    pub video_with_audio: String,
}

impl Default for WorkflowIds {
    fn default() -> Self {
        Self {
            multi_image: MULTI_IMAGE_WORKFLOW.to_string(),
            text_to_image: TEXT_TO_IMAGE_WORKFLOW.to_string(),
            podcast: PODCAST_WORKFLOW.to_string(),
            short_animation: SHORT_ANIMATION_WORKFLOW.to_string(),
            video_with_audio: VIDEO_AUDIO_WORKFLOW.to_string(),
        }
    }
}

/// Provider endpoints and timeouts
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider credential; `None` disables every remote pathway
    pub api_key: Option<String>,
    /// Base URL for synchronous workflow runs
    pub run_url: String,
    /// Base URL for queued submissions
    pub queue_url: String,
    /// Base URL for the storage REST API
    pub rest_url: String,
    /// Base URL for direct CDN uploads
    pub cdn_url: String,
    pub workflows: WorkflowIds,
    /// Per-request timeout for provider calls
    pub request_timeout: Duration,
    /// Upper bound for resolving a queued job
    pub job_timeout: Duration,
    /// Delay between job status polls
    pub poll_interval: Duration,
    /// Timeout for fetching generated artifacts
    pub download_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            run_url: DEFAULT_RUN_URL.to_string(),
            queue_url: DEFAULT_QUEUE_URL.to_string(),
            rest_url: DEFAULT_REST_URL.to_string(),
            cdn_url: DEFAULT_CDN_URL.to_string(),
            workflows: WorkflowIds::default(),
            request_timeout: Duration::from_secs(120),
            job_timeout: Duration::from_secs(600),
            poll_interval: Duration::from_millis(1000),
            download_timeout: ARTIFACT_DOWNLOAD_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    /// Point every provider endpoint at one base URL (mock servers)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        self.run_url = base.clone();
        self.queue_url = base.clone();
        self.rest_url = base.clone();
        self.cdn_url = base;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub provider: ProviderConfig,
    /// Maximum accepted request body, in bytes
    pub max_upload_bytes: usize,
    /// Directory for staged uploads; system temp dir when unset
    pub staging_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            provider: ProviderConfig::default(),
            max_upload_bytes: 50 * 1024 * 1024,
            staging_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServiceConfig::default();
        let provider_defaults = defaults.provider.clone();
        let workflow_defaults = provider_defaults.workflows.clone();

        let string = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let provider = ProviderConfig {
            api_key: lookup("FAL_KEY")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            run_url: string("FAL_RUN_URL", provider_defaults.run_url),
            queue_url: string("FAL_QUEUE_URL", provider_defaults.queue_url),
            rest_url: string("FAL_REST_URL", provider_defaults.rest_url),
            cdn_url: string("FAL_CDN_URL", provider_defaults.cdn_url),
            workflows: WorkflowIds {
                multi_image: string("FAL_MULTI_IMAGE_WORKFLOW", workflow_defaults.multi_image),
                text_to_image: string(
                    "FAL_TEXT_TO_IMAGE_WORKFLOW",
                    workflow_defaults.text_to_image,
                ),
                podcast: string("FAL_PODCAST_WORKFLOW", workflow_defaults.podcast),
                short_animation: string(
                    "FAL_SHORT_ANIMATION_WORKFLOW",
                    workflow_defaults.short_animation,
                ),
                video_with_audio: string(
                    "FAL_VIDEO_AUDIO_WORKFLOW",
                    workflow_defaults.video_with_audio,
                ),
            },
            request_timeout: Duration::from_secs(number(
                "FAL_REQUEST_TIMEOUT_SECS",
                provider_defaults.request_timeout.as_secs(),
            )),
            job_timeout: Duration::from_secs(number(
                "FAL_JOB_TIMEOUT_SECS",
                provider_defaults.job_timeout.as_secs(),
            )),
            poll_interval: Duration::from_millis(number(
                "FAL_POLL_INTERVAL_MS",
                provider_defaults.poll_interval.as_millis() as u64,
            )),
            download_timeout: provider_defaults.download_timeout,
        };

        Self {
            host: string("HOST", defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            provider,
            max_upload_bytes: number("MAX_UPLOAD_BYTES", defaults.max_upload_bytes as u64)
                as usize,
            staging_dir: lookup("STAGING_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_upload_bytes == 0 {
            return Err("MAX_UPLOAD_BYTES must be greater than 0".to_string());
        }
        if self.provider.poll_interval.is_zero() {
            return Err("FAL_POLL_INTERVAL_MS must be greater than 0".to_string());
        }
        if self.provider.job_timeout < self.provider.poll_interval {
            return Err("FAL_JOB_TIMEOUT_SECS must exceed the poll interval".to_string());
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
