// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Argument payloads for the remote workflows
//!
//! Each workflow's argument schema is a fixed contract with the provider.

use serde::{Deserialize, Serialize};

/// Instruction sent with every podcast request
pub const PODCAST_SYSTEM_PROMPT: &str = "the output should be an audio podcast script about a couple, the podcast speakers are not the couple \
they are just talking about the couple. script has exactly 2 speakers, with the following format: \"Speaker 0: \
VibeVoice is now available on Fal. Isn't that right, ?\\nSpeaker 1: That's right, and it supports two speakers at once. \
Try it now!\". keep the script to less then 20 lines total.";

/// Style labels that add nothing to a text-only prompt
const EMPTY_STYLE_LABELS: &[&str] = &["", "none"];

/// Multi-reference-image generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiImageArguments {
    pub prompt: String,
    pub image_urls: Vec<String>,
    pub sync_mode: bool,
    pub output_format: String,
    pub safety_tolerance: String,
    pub enhance_prompt: bool,
    pub aspect_ratio: String,
    pub num_images: u32,
}

impl MultiImageArguments {
    pub fn new(description: &str, style_label: &str, image_urls: Vec<String>) -> Self {
        Self {
            prompt: format!("{} (style: {})", description, style_label),
            image_urls,
            sync_mode: false,
            output_format: "jpeg".to_string(),
            safety_tolerance: "4".to_string(),
            enhance_prompt: true,
            aspect_ratio: "1:1".to_string(),
            num_images: 1,
        }
    }
}

/// Text-to-image generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextToImageArguments {
    pub prompt: String,
    pub num_images: u32,
    pub output_format: String,
    pub aspect_ratio: String,
    pub sync_mode: bool,
}

impl TextToImageArguments {
    pub fn new(description: &str, style_label: &str) -> Self {
        let prompt = if EMPTY_STYLE_LABELS.contains(&style_label) {
            description.to_string()
        } else {
            format!("{}, {} style", description, style_label)
        };

        Self {
            prompt,
            num_images: 1,
            output_format: "jpeg".to_string(),
            aspect_ratio: "1:1".to_string(),
            sync_mode: false,
        }
    }
}

/// Two-speaker podcast about a couple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastArguments {
    pub prompt: String,
    pub system_prompt: String,
}

impl PodcastArguments {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            system_prompt: PODCAST_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Short silent animation from one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortAnimationArguments {
    pub concept_description: String,
    pub image_url_field: String,
    pub negative_prompt: String,
}

impl ShortAnimationArguments {
    pub fn new(description: &str, image_url: &str) -> Self {
        Self {
            concept_description: description.to_string(),
            image_url_field: image_url.to_string(),
            negative_prompt: String::new(),
        }
    }
}

/// Short animation with a generated soundtrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoWithAudioArguments {
    pub concept_description: String,
    pub image_url_field: String,
    pub duration: u32,
}

impl VideoWithAudioArguments {
    pub fn new(description: &str, image_url: &str, duration: u32) -> Self {
        Self {
            concept_description: description.to_string(),
            image_url_field: image_url.to_string(),
            duration,
        }
    }
}
