// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod form;
pub mod generate_image;
pub mod http_server;
pub mod media;
pub mod podcast;
pub mod short_animation;
pub mod staging;
pub mod video_with_audio;

pub use errors::{ApiError, ErrorResponse, FailureContext};
pub use form::{FormBody, UploadedFile};
pub use generate_image::{generate_image_handler, GenerateImageRequest};
pub use http_server::{create_app, start_server, AppState};
pub use media::{MediaFile, VideoResponse};
pub use podcast::{generate_podcast_handler, GeneratePodcastRequest, GeneratePodcastResponse};
pub use short_animation::{generate_short_animation_handler, ShortAnimationRequest};
pub use staging::StagedUpload;
pub use video_with_audio::{generate_video_with_audio_handler, VideoWithAudioRequest};
