// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::generate_image::generate_image_handler;
use super::podcast::generate_podcast_handler;
use super::short_animation::generate_short_animation_handler;
use super::video_with_audio::generate_video_with_audio_handler;
use crate::config::ServiceConfig;
use crate::generation::orchestrator::ImageGenerator;
use crate::provider::{ArtifactFetcher, ProviderClient};
use crate::version;

pub const SERVICE_NAME: &str = "Veramo API";

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    /// `None` when FAL_KEY is not configured
    pub provider: Option<Arc<ProviderClient>>,
    pub image_generator: Arc<ImageGenerator>,
    pub started_at: Instant,
}

impl AppState {
    pub fn from_config(config: ServiceConfig) -> anyhow::Result<Self> {
        let provider = ProviderClient::from_config(&config.provider)?.map(Arc::new);
        let fetcher = ArtifactFetcher::new(config.provider.download_timeout)?;

        if provider.is_none() {
            info!("FAL_KEY not set: image requests use the local placeholder, media endpoints return 500");
        }

        Ok(Self {
            image_generator: Arc::new(ImageGenerator::new(provider.clone(), fetcher)),
            provider,
            config: Arc::new(config),
            started_at: Instant::now(),
        })
    }

    /// State with default config and no provider credential
    pub fn new_for_test() -> Self {
        let fetcher = ArtifactFetcher::with_default_timeout()
            .expect("default artifact fetcher must build");
        Self {
            config: Arc::new(ServiceConfig::default()),
            provider: None,
            image_generator: Arc::new(ImageGenerator::new(None, fetcher)),
            started_at: Instant::now(),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/status", get(status_handler))
        .route("/generate-image", post(generate_image_handler))
        .route("/generate-podcast", post(generate_podcast_handler))
        .route(
            "/generate-short-animation",
            post(generate_short_animation_handler),
        )
        .route(
            "/generate-video-with-audio",
            post(generate_video_with_audio_handler),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.listen_addr();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "message": "Veramo Backend API is running!",
        "version": version::VERSION_NUMBER,
        "build": version::get_version_info(),
        "endpoints": {
            "health": "/health",
            "api": "/api/status",
            "generate_image": "/generate-image",
            "generate_podcast": "/generate-podcast",
            "generate_short_animation": "/generate-short-animation",
            "generate_video_with_audio": "/generate-video-with-audio",
        }
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({"status": "OK"}))
}

async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "service": SERVICE_NAME,
        "version": version::VERSION_NUMBER,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "provider_configured": state.image_generator.has_provider(),
    }))
}
