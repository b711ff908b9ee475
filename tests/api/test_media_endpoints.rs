// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Podcast, short animation and video-with-audio endpoints

use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt;
use veramo_backend::api::{create_app, AppState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{
    body_json, json_request, mount_queued_workflow, multipart_request, state_with_provider,
    submitted_arguments,
};

const PODCAST: &str = "workflows/odtboun/couplepodcast";
const SHORT_ANIMATION: &str = "workflows/odtboun/short-couple-video";
const VIDEO_AUDIO: &str = "workflows/odtboun/short-couple-video-audio";

// ---------------------------------------------------------------------------
// Missing credential
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_credential_is_500_for_every_media_endpoint() {
    for uri in [
        "/generate-podcast",
        "/generate-short-animation",
        "/generate-video-with-audio",
    ] {
        let app = create_app(AppState::new_for_test());
        let response = app.oneshot(json_request(uri, json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body_json(response).await, json!({"error": "FAL_KEY not set"}));
    }
}

// ---------------------------------------------------------------------------
// Podcast
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_podcast_requires_prompt() {
    let server = MockServer::start().await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request("/generate-podcast", json!({"prompt": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Prompt is required"}));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_podcast_success_envelope() {
    let server = MockServer::start().await;
    mount_queued_workflow(
        &server,
        PODCAST,
        json!({"audio": {"url": "https://cdn.example/a/pod.mp3"}, "duration": 31.5}),
    )
    .await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request("/generate-podcast", json!({"prompt": "our anniversary"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "audio": {
                "url": "https://cdn.example/a/pod.mp3",
                "content_type": "application/octet-stream",
                "file_name": "pod.mp3"
            },
            "duration": 31.5,
            "error": null
        })
    );
    assert_eq!(
        submitted_arguments(&server, PODCAST).await["prompt"],
        "our anniversary"
    );
}

#[tokio::test]
async fn test_podcast_without_audio_url_is_500() {
    let server = MockServer::start().await;
    mount_queued_workflow(&server, PODCAST, json!({"transcript": "..."})).await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request("/generate-podcast", json!({"prompt": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Failed to generate audio or retrieve URL from Fal workflow"})
    );
}

#[tokio::test]
async fn test_podcast_prompt_forwarded_verbatim() {
    let server = MockServer::start().await;
    mount_queued_workflow(
        &server,
        PODCAST,
        json!({"audio": {"url": "https://cdn.example/a/pod.mp3"}}),
    )
    .await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request("/generate-podcast", json!({"prompt": "  our anniversary\n"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        submitted_arguments(&server, PODCAST).await["prompt"],
        "  our anniversary\n"
    );
}

// ---------------------------------------------------------------------------
// Short animation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_short_animation_validation_messages() {
    let server = MockServer::start().await;

    let cases = [
        (
            json_request("/generate-short-animation", json!({"image_url": "https://x.example/a.jpg"})),
            "description is required",
        ),
        (
            json_request("/generate-short-animation", json!({"description": "dance"})),
            "image_url is required",
        ),
        (
            multipart_request("/generate-short-animation", &[("description", "dance")], &[]),
            "image file is required",
        ),
    ];

    for (request, expected) in cases {
        let app = create_app(state_with_provider(&server.uri()));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": expected}));
    }
}

#[tokio::test]
async fn test_short_animation_multipart_forwards_data_uri() {
    let server = MockServer::start().await;
    mount_queued_workflow(
        &server,
        SHORT_ANIMATION,
        json!({"video": {"url": "https://cdn.example/v/anim.mp4"}}),
    )
    .await;
    let app = create_app(state_with_provider(&server.uri()));

    let request = multipart_request(
        "/generate-short-animation",
        &[("description", "dance")],
        &[("image", "photo.png", "image/png", &[1, 2, 3])],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "video": {
                "url": "https://cdn.example/v/anim.mp4",
                "content_type": "video/mp4",
                "file_name": "anim.mp4"
            },
            "error": null
        })
    );

    let arguments = submitted_arguments(&server, SHORT_ANIMATION).await;
    assert_eq!(
        arguments,
        json!({
            "concept_description": "dance",
            "image_url_field": "data:image/png;base64,AQID",
            "negative_prompt": ""
        })
    );
}

#[tokio::test]
async fn test_short_animation_unrecognized_shape_is_502_with_raw() {
    let server = MockServer::start().await;
    mount_queued_workflow(&server, SHORT_ANIMATION, json!({"frames": 48})).await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request(
            "/generate-short-animation",
            json!({"description": "dance", "image_url": "https://x.example/a.jpg"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Failed to retrieve video URL from workflow result",
            "raw": {"frames": 48}
        })
    );
}

#[tokio::test]
async fn test_short_animation_output_list_shape() {
    let server = MockServer::start().await;
    mount_queued_workflow(
        &server,
        SHORT_ANIMATION,
        json!({"output": [{"video_url": "https://cdn.example/out/clip.mp4"}]}),
    )
    .await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request(
            "/generate-short-animation",
            json!({"description": "dance", "image_url": "https://x.example/a.jpg"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["video"]["url"], "https://cdn.example/out/clip.mp4");
    assert_eq!(body["video"]["file_name"], "clip.mp4");
}

// ---------------------------------------------------------------------------
// Video with audio
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_video_with_audio_requires_description_and_image() {
    let server = MockServer::start().await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request("/generate-video-with-audio", json!({"description": "walk"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Description and image are required"})
    );
}

#[tokio::test]
async fn test_video_with_audio_rejects_non_integer_duration() {
    let server = MockServer::start().await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request(
            "/generate-video-with-audio",
            json!({
                "description": "walk",
                "image_url": "https://x.example/a.jpg",
                "duration": "four"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_video_with_audio_json_defaults_duration() {
    let server = MockServer::start().await;
    mount_queued_workflow(
        &server,
        VIDEO_AUDIO,
        json!({"url": "https://cdn.example/v/with-audio.mp4"}),
    )
    .await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request(
            "/generate-video-with-audio",
            json!({"description": "walk", "image_url": "https://x.example/a.jpg"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["video"]["file_name"],
        "with-audio.mp4"
    );
    assert_eq!(
        submitted_arguments(&server, VIDEO_AUDIO).await,
        json!({
            "concept_description": "walk",
            "image_url_field": "https://x.example/a.jpg",
            "duration": 4
        })
    );
}

#[tokio::test]
async fn test_video_with_audio_uploads_image_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/upload/initiate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_url": "https://v3.cdn.example/uploaded.jpg"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_queued_workflow(
        &server,
        VIDEO_AUDIO,
        json!({"video": {"url": "https://cdn.example/v/final.mp4", "content_type": "video/mp4"}}),
    )
    .await;
    let app = create_app(state_with_provider(&server.uri()));

    let request = multipart_request(
        "/generate-video-with-audio",
        &[("description", "walk"), ("duration", "6")],
        &[("image", "us.jpg", "image/jpeg", b"jpeg-bytes")],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["video"]["url"],
        "https://cdn.example/v/final.mp4"
    );

    let arguments = submitted_arguments(&server, VIDEO_AUDIO).await;
    assert_eq!(arguments["image_url_field"], "https://v3.cdn.example/uploaded.jpg");
    assert_eq!(arguments["duration"], 6);
}

#[tokio::test]
async fn test_video_with_audio_unrecognized_shape_is_502() {
    let server = MockServer::start().await;
    mount_queued_workflow(&server, VIDEO_AUDIO, json!({"status": "done"})).await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request(
            "/generate-video-with-audio",
            json!({"description": "walk", "image_url": "https://x.example/a.jpg"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to generate video or missing URL in response");
    assert_eq!(body["raw"], json!({"status": "done"}));
}

#[tokio::test]
async fn test_short_animation_empty_url_falls_back_to_signed_url() {
    let server = MockServer::start().await;
    mount_queued_workflow(
        &server,
        SHORT_ANIMATION,
        json!({"video": {"url": "", "signed_url": "https://cdn.example/v/signed.mp4"}}),
    )
    .await;
    let app = create_app(state_with_provider(&server.uri()));

    let response = app
        .oneshot(json_request(
            "/generate-short-animation",
            json!({"description": "dance", "image_url": "https://x.example/a.jpg"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["video"]["url"], "https://cdn.example/v/signed.mp4");
    assert_eq!(body["video"]["file_name"], "signed.mp4");
}
