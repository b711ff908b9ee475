// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Podcast response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::media::MediaFile;
use crate::generation::media::PodcastAudio;

/// Response for POST /generate-podcast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratePodcastResponse {
    pub audio: MediaFile,
    /// Whatever duration the workflow reported, or null
    pub duration: Option<Value>,
    pub error: Option<String>,
}

impl From<&PodcastAudio> for GeneratePodcastResponse {
    fn from(podcast: &PodcastAudio) -> Self {
        Self {
            audio: (&podcast.audio).into(),
            duration: podcast.duration.clone(),
            error: None,
        }
    }
}
