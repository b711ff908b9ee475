// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Podcast request types and validation

use serde::{Deserialize, Serialize};

use crate::api::form::FormBody;

/// Request for POST /generate-podcast
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePodcastRequest {
    #[serde(default)]
    pub prompt: String,
}

impl GeneratePodcastRequest {
    pub fn from_form(form: &FormBody) -> Self {
        Self {
            prompt: form.raw_text("prompt").unwrap_or_default().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.is_empty() {
            return Err("Prompt is required".to_string());
        }
        Ok(())
    }
}
