// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Short animation API endpoint module

pub mod handler;
pub mod request;

pub use handler::generate_short_animation_handler;
pub use request::ShortAnimationRequest;
