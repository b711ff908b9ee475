// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image orchestration tests against a mock provider

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, Rgb, RgbImage};
use serde_json::json;
use std::sync::Arc;
use veramo_backend::config::ProviderConfig;
use veramo_backend::generation::imaging::encode_png;
use veramo_backend::generation::{GenerationRequest, ImageGenerator, InputImage, Pathway};
use veramo_backend::provider::{ArtifactFetcher, ProviderClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_TO_IMAGE: &str = "/fal-ai/flux-pro/kontext/text-to-image";
const MULTI_IMAGE: &str = "/fal-ai/flux-pro/kontext/max/multi";

fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode_png(&DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))).unwrap()
}

fn generator_for(server: &MockServer) -> ImageGenerator {
    let config = ProviderConfig::default()
        .with_base_url(&server.uri())
        .with_api_key("test-key");
    let provider = ProviderClient::new(config, "test-key").unwrap();
    ImageGenerator::new(
        Some(Arc::new(provider)),
        ArtifactFetcher::with_default_timeout().unwrap(),
    )
}

fn decode(png: &[u8]) -> RgbImage {
    image::load_from_memory(png).unwrap().to_rgb8()
}

#[tokio::test]
async fn test_text_only_prefers_nested_images_path() {
    let server = MockServer::start().await;
    let first = format!("{}/files/first.png", server.uri());
    let second = format!("{}/files/second.png", server.uri());

    Mock::given(method("POST"))
        .and(path(TEXT_TO_IMAGE))
        .and(header("Authorization", "Key test-key"))
        .and(body_partial_json(json!({"prompt": "a cat, cool style", "num_images": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"images": [{"url": first}]},
            "url": second
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/first.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(solid_png(3, 3, [255, 0, 0])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/second.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(solid_png(3, 3, [0, 255, 0])))
        .expect(0)
        .mount(&server)
        .await;

    let generator = generator_for(&server);
    let request = GenerationRequest::new("a cat", vec![], Some("cool"));
    let generated = generator.generate(&request).await.unwrap();

    assert_eq!(generated.pathway, Pathway::TextOnlyRemote);
    assert!(!generated.placeholder);
    let image = decode(&generated.png);
    assert_eq!(image.dimensions(), (3, 3));
    assert!(image.pixels().all(|p| p.0 == [255, 0, 0]));
}

#[tokio::test]
async fn test_data_uri_result_needs_no_download() {
    let server = MockServer::start().await;
    let png = solid_png(2, 2, [1, 2, 3]);
    let data_uri = format!("data:image/png;base64,{}", STANDARD.encode(&png));

    Mock::given(method("POST"))
        .and(path(TEXT_TO_IMAGE))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"images": [{"url": data_uri}]})),
        )
        .mount(&server)
        .await;

    let generated = generator_for(&server)
        .generate(&GenerationRequest::new("a cat", vec![], None))
        .await
        .unwrap();

    assert!(!generated.placeholder);
    assert_eq!(generated.png, png);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "only the workflow run should hit the network");
}

#[tokio::test]
async fn test_unrecognized_shape_falls_back_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_TO_IMAGE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foo": "bar"})))
        .mount(&server)
        .await;

    let generated = generator_for(&server)
        .generate(&GenerationRequest::new("a cat", vec![], Some("cool")))
        .await
        .unwrap();

    assert!(generated.placeholder);
    let image = decode(&generated.png);
    assert_eq!(image.dimensions(), (512, 512));
    assert!(image.pixels().all(|p| p.0 == [150, 200, 255]));
}

#[tokio::test]
async fn test_provider_error_and_missing_artifact_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_TO_IMAGE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{}/files/gone.jpg", server.uri())
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let generated = generator_for(&server)
        .generate(&GenerationRequest::new("a cat", vec![], Some("warm")))
        .await
        .unwrap();
    assert!(generated.placeholder);
    assert!(decode(&generated.png).pixels().all(|p| p.0 == [255, 200, 150]));
}

#[tokio::test]
async fn test_multi_image_uploads_in_order_then_runs() {
    let server = MockServer::start().await;
    let cdn_url = format!("{}/cdn/ref.png", server.uri());

    // Storage API down; direct CDN upload works
    Mock::given(method("POST"))
        .and(path("/storage/upload/initiate"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_url": cdn_url})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MULTI_IMAGE))
        .and(body_partial_json(json!({
            "prompt": "us at the beach (style: warm)",
            "image_urls": [cdn_url, cdn_url],
            "output_format": "jpeg"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [{"url": format!("{}/files/out.jpg", server.uri())}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/out.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(solid_png(8, 8, [9, 9, 9])))
        .mount(&server)
        .await;

    let images = vec![
        InputImage::new("a.png", solid_png(4, 4, [0, 0, 0])),
        InputImage::new("b.png", solid_png(4, 4, [0, 0, 0])),
    ];
    let generated = generator_for(&server)
        .generate(&GenerationRequest::new("us at the beach", images, Some("warm")))
        .await
        .unwrap();

    assert_eq!(generated.pathway, Pathway::MultiImageRemote);
    assert!(!generated.placeholder);
    assert_eq!(decode(&generated.png).dimensions(), (8, 8));
}

#[tokio::test]
async fn test_single_image_stays_local() {
    let server = MockServer::start().await;
    let images = vec![InputImage::new("only.png", solid_png(6, 4, [5, 5, 5]))];

    let generated = generator_for(&server)
        .generate(&GenerationRequest::new("a cat", images, None))
        .await
        .unwrap();

    assert_eq!(generated.pathway, Pathway::SingleImagePlaceholder);
    assert!(generated.placeholder);
    assert_eq!(decode(&generated.png).dimensions(), (4, 4));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_no_provider_uses_placeholder() {
    let generator = ImageGenerator::new(None, ArtifactFetcher::with_default_timeout().unwrap());
    let generated = generator
        .generate(&GenerationRequest::new("a cat", vec![], Some("vibrant")))
        .await
        .unwrap();
    assert_eq!(generated.pathway, Pathway::TextOnlyRemote);
    assert!(generated.placeholder);
    assert!(decode(&generated.png).pixels().all(|p| p.0 == [255, 100, 100]));
}

#[tokio::test]
async fn test_blank_description_is_validation_error() {
    let generator = ImageGenerator::new(None, ArtifactFetcher::with_default_timeout().unwrap());
    let err = generator
        .generate(&GenerationRequest::new("   ", vec![], None))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Description is required");
}
