// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Podcast API endpoint module
//!
//! Provides POST /generate-podcast.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::generate_podcast_handler;
pub use request::GeneratePodcastRequest;
pub use response::GeneratePodcastResponse;
