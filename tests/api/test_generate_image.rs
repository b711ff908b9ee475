// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /generate-image

use axum::http::{header, StatusCode};
use image::GenericImageView;
use serde_json::json;
use tower::util::ServiceExt;
use veramo_backend::api::{create_app, AppState};

use super::helpers::{
    body_bytes, body_json, json_request, multipart_request, solid_png, state_with_provider,
};

// Nothing listens on the discard port, so every remote call fails fast
const UNREACHABLE_PROVIDER: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_unreachable_provider_returns_flat_placeholder() {
    let app = create_app(state_with_provider(UNREACHABLE_PROVIDER));
    let request = multipart_request(
        "/generate-image",
        &[("description", "a cat"), ("style_label", "cool")],
        &[],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"generated_image.png\""
    );

    let png = body_bytes(response).await;
    let image = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (512, 512));
    assert!(image.pixels().all(|p| p.0 == [150, 200, 255]));
}

#[tokio::test]
async fn test_missing_description_is_400() {
    let app = create_app(AppState::new_for_test());
    let request = multipart_request("/generate-image", &[("style_label", "warm")], &[]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Description is required"})
    );
}

#[tokio::test]
async fn test_blank_description_is_400() {
    let app = create_app(AppState::new_for_test());
    let request = multipart_request("/generate-image", &[("description", "   ")], &[]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_without_credential_defaults_to_neutral_placeholder() {
    let app = create_app(AppState::new_for_test());
    let request = json_request("/generate-image", json!({"description": "a picnic"}));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let image = image::load_from_memory(&body_bytes(response).await)
        .unwrap()
        .to_rgb8();
    assert!(image.pixels().all(|p| p.0 == [200, 200, 200]));
}

#[tokio::test]
async fn test_single_reference_image_is_rotated_and_cropped() {
    let app = create_app(AppState::new_for_test());
    let reference = solid_png(6, 4, [10, 20, 30]);
    let request = multipart_request(
        "/generate-image",
        &[("description", "us")],
        &[("images", "image_0.png", "image/png", &reference)],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let image = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!(image.dimensions(), (4, 4));
}

#[tokio::test]
async fn test_disallowed_files_are_ignored() {
    let app = create_app(AppState::new_for_test());
    let request = multipart_request(
        "/generate-image",
        &[("description", "a cat"), ("style_label", "muted")],
        &[("images", "notes.txt", "text/plain", b"hello")],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let image = image::load_from_memory(&body_bytes(response).await)
        .unwrap()
        .to_rgb8();
    assert_eq!(image.dimensions(), (512, 512));
    assert!(image.pixels().all(|p| p.0 == [150, 150, 150]));
}

#[tokio::test]
async fn test_undecodable_single_image_is_500() {
    let app = create_app(AppState::new_for_test());
    let request = multipart_request(
        "/generate-image",
        &[("description", "a cat")],
        &[("images", "broken.jpg", "image/jpeg", b"definitely not a jpeg")],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Image generation failed:"));
}
