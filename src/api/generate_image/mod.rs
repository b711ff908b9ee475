// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation API endpoint module
//!
//! Provides POST /generate-image returning a PNG attachment.

pub mod handler;
pub mod request;

pub use handler::{generate_image_handler, GENERATED_IMAGE_FILE_NAME};
pub use request::GenerateImageRequest;
