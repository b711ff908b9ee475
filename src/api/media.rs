// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! JSON bodies shared by the audio and video endpoints

use serde::{Deserialize, Serialize};

use crate::generation::outcome::NormalizedArtifact;

/// Location and metadata of a generated media file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaFile {
    pub url: String,
    pub content_type: String,
    pub file_name: String,
}

impl From<&NormalizedArtifact> for MediaFile {
    fn from(artifact: &NormalizedArtifact) -> Self {
        Self {
            url: artifact.url(),
            content_type: artifact.content_type.clone(),
            file_name: artifact.file_name.clone(),
        }
    }
}

/// Success body for the video endpoints; `error` is always null
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoResponse {
    pub video: MediaFile,
    pub error: Option<String>,
}

impl VideoResponse {
    pub fn new(video: &NormalizedArtifact) -> Self {
        Self {
            video: video.into(),
            error: None,
        }
    }
}
