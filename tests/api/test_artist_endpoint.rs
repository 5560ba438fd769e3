// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /artist/finish tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use bytes::Bytes;
use serde_json::{json, Value};
use std::sync::Arc;
use sun_api::api::errors::SAFETY_FILTER_DETAIL;
use sun_api::artist::prompts::UNIVERSAL_PROMPT;
use sun_api::{create_app, GatewayConfig, UpstreamResponse};
use tower::util::ServiceExt;

use crate::common::{
    api_error, image_ok, moderation_blocked, multipart_body, multipart_content_type,
    state_with, state_with_config, FormPart, ScriptedProvider,
};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nsketch";

fn finish_request(content_type: &str, body: Bytes) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/artist/finish")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

fn sketch_form(field: &str, style: Option<&str>) -> Bytes {
    let mut parts = vec![FormPart::File {
        name: field,
        filename: "drawing.png",
        content_type: "image/png",
        data: PNG,
    }];
    if let Some(style) = style {
        parts.push(FormPart::Text("style", style));
    }
    multipart_body(&parts)
}

async fn call(provider: &Arc<ScriptedProvider>, request: Request<Body>) -> (StatusCode, Value) {
    let app = create_app(state_with(provider.clone()));
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_comic_scenario_returns_second_attempt_image() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_edit(moderation_blocked(400))
            .with_edit(image_ok("AAA")),
    );

    let (status, json) = call(
        &provider,
        finish_request(&multipart_content_type(), sketch_form("image", Some("comic"))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"image": "data:image/png;base64,AAA"}));
    assert_eq!(provider.edit_calls().len(), 2);
}

#[tokio::test]
async fn test_princess_all_blocked_returns_safety_filter() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_edit(moderation_blocked(400))
            .with_edit(moderation_blocked(400))
            .with_edit(moderation_blocked(400)),
    );

    let (status, json) = call(
        &provider,
        finish_request(&multipart_content_type(), sketch_form("image", Some("princess"))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({"error": "safety_filter", "detail": SAFETY_FILTER_DETAIL})
    );
    let prompts = provider.edit_prompts();
    assert_eq!(prompts.len(), 3);
    assert_eq!(prompts[2], UNIVERSAL_PROMPT);
}

#[tokio::test]
async fn test_other_error_relays_status_and_payload() {
    let provider = Arc::new(ScriptedProvider::new().with_edit(api_error(401, "invalid_api_key")));

    let (status, json) = call(
        &provider,
        finish_request(&multipart_content_type(), sketch_form("image", None)),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "OpenAI error");
    assert_eq!(json["detail"]["error"]["code"], "invalid_api_key");
    assert_eq!(provider.edit_calls().len(), 1);
}

#[tokio::test]
async fn test_success_without_image_is_500() {
    let provider = Arc::new(ScriptedProvider::new().with_edit(Ok(UpstreamResponse::json_body(
        200,
        &json!({"data": [{}]}),
    ))));

    let (status, json) = call(
        &provider,
        finish_request(&multipart_content_type(), sketch_form("image", None)),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "No image in response");
    assert_eq!(json["detail"], json!({"data": [{}]}));
}

#[tokio::test]
async fn test_non_json_error_page_relayed_as_provider_error() {
    let provider = Arc::new(ScriptedProvider::new().with_edit(Ok(UpstreamResponse::new(
        502,
        Bytes::from_static(b"<html><body>502 Bad Gateway</body></html>"),
    ))));

    let (status, json) = call(
        &provider,
        finish_request(&multipart_content_type(), sketch_form("image", None)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json, json!({"error": "OpenAI error", "detail": null}));
    assert_eq!(provider.edit_calls().len(), 1);
}

#[tokio::test]
async fn test_upload_over_limit_is_413() {
    let provider = Arc::new(ScriptedProvider::new().with_edit(image_ok("UNUSED")));
    let config = GatewayConfig {
        max_upload_bytes: 1024,
        ..Default::default()
    };
    let app = create_app(state_with_config(config, provider.clone()));
    let large = vec![0u8; 4096];
    let body = multipart_body(&[FormPart::File {
        name: "image",
        filename: "big.png",
        content_type: "image/png",
        data: &large,
    }]);

    let response = app
        .oneshot(finish_request(&multipart_content_type(), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(provider.edit_calls().is_empty());
}

#[tokio::test]
async fn test_default_style_is_comic() {
    let provider = Arc::new(ScriptedProvider::new().with_edit(image_ok("Z")));

    call(
        &provider,
        finish_request(&multipart_content_type(), sketch_form("image", None)),
    )
    .await;

    let prompts = provider.edit_prompts();
    assert!(prompts[0].contains("만화풍"));
}

#[tokio::test]
async fn test_alternate_field_names_accepted() {
    for field in ["file", "photo", "drawing", "upload"] {
        let provider = Arc::new(ScriptedProvider::new().with_edit(image_ok("B")));
        let (status, _) = call(
            &provider,
            finish_request(&multipart_content_type(), sketch_form(field, Some("oil"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "field {} not accepted", field);

        let calls = provider.edit_calls();
        assert_eq!(calls[0].image, Bytes::from_static(PNG));
        assert_eq!(calls[0].filename, "drawing.png");
        assert_eq!(calls[0].content_type.as_deref(), Some("image/png"));
    }
}

#[tokio::test]
async fn test_blank_filename_defaults_to_input_png() {
    let provider = Arc::new(ScriptedProvider::new().with_edit(image_ok("B")));
    let body = multipart_body(&[FormPart::File {
        name: "image",
        filename: "",
        content_type: "image/png",
        data: PNG,
    }]);

    let (status, _) = call(&provider, finish_request(&multipart_content_type(), body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.edit_calls()[0].filename, "input.png");
}

#[tokio::test]
async fn test_non_multipart_rejected() {
    let provider = Arc::new(ScriptedProvider::new());
    let (status, json) = call(
        &provider,
        finish_request("application/json", Bytes::from_static(b"{}")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Use multipart/form-data. Example: curl -F image=@file.png -F style=comic"
    );
    assert!(provider.edit_calls().is_empty());
}

#[tokio::test]
async fn test_no_file_reports_keys() {
    let provider = Arc::new(ScriptedProvider::new());
    let body = multipart_body(&[FormPart::Text("style", "oil"), FormPart::Text("note", "x")]);

    let (status, json) = call(&provider, finish_request(&multipart_content_type(), body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "No file found", "gotKeys": ["style", "note"]}));
}

#[tokio::test]
async fn test_text_value_in_image_field_rejected() {
    let provider = Arc::new(ScriptedProvider::new());
    let body = multipart_body(&[FormPart::Text("image", "not a file")]);

    let (status, json) = call(&provider, finish_request(&multipart_content_type(), body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Uploaded value is not a file/blob");
    assert_eq!(json["gotType"], "string");
    assert_eq!(json["gotKeys"], json!(["image"]));
}

#[tokio::test]
async fn test_empty_file_rejected() {
    let provider = Arc::new(ScriptedProvider::new());
    let body = multipart_body(&[FormPart::File {
        name: "image",
        filename: "a.png",
        content_type: "image/png",
        data: b"",
    }]);

    let (status, json) = call(&provider, finish_request(&multipart_content_type(), body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Uploaded file is empty");
    assert!(provider.edit_calls().is_empty());
}
