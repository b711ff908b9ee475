// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video-with-audio API endpoint module

pub mod handler;
pub mod request;

pub use handler::generate_video_with_audio_handler;
pub use request::VideoWithAudioRequest;
