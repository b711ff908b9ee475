// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod generation;
pub mod provider;
pub mod version;

pub use api::{create_app, start_server, AppState};
pub use config::{ProviderConfig, ServiceConfig};
pub use generation::{GenerationError, GenerationRequest, ImageGenerator, InputImage, Pathway};
pub use provider::ProviderClient;
