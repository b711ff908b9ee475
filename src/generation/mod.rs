// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation pipelines: request model, pathway classification, placeholder
//! rendering and the image/audio/video orchestration on top of the provider.

pub mod classifier;
pub mod errors;
pub mod imaging;
pub mod media;
pub mod orchestrator;
pub mod outcome;
pub mod placeholder;
pub mod request;

pub use classifier::{classify, Pathway};
pub use errors::{GenerationError, NormalizationFailure};
pub use imaging::{ImageError, InlineData};
pub use media::{generate_podcast, generate_short_animation, generate_video_with_audio, PodcastAudio};
pub use orchestrator::{GeneratedImage, ImageGenerator};
pub use outcome::{ArtifactLocation, GenerationOutcome, NormalizedArtifact};
pub use placeholder::{placeholder, style_color, PLACEHOLDER_SIDE};
pub use request::{GenerationRequest, InputImage, DEFAULT_DURATION_SECS, DEFAULT_STYLE_LABEL};
