//! Operator HTTP surface, exercised in-process.

mod common;

use std::fs;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::{server_config, RecordingReloader};
use vhost_provisioner::http::{AppState, HttpServer};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_needs_no_auth() {
    let root = tempfile::tempdir().unwrap();
    let config = server_config(root.path());
    let state = AppState::with_reloader(config.clone(), RecordingReloader::new());
    let server = HttpServer::with_state(&config, state);

    let response = server
        .router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_requires_bearer_key() {
    let root = tempfile::tempdir().unwrap();
    let config = server_config(root.path());
    let state = AppState::with_reloader(config.clone(), RecordingReloader::new());
    let server = HttpServer::with_state(&config, state);

    let missing = server
        .router()
        .oneshot(Request::get("/admin/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = server
        .router()
        .oneshot(
            Request::get("/admin/status")
                .header(header::AUTHORIZATION, "Bearer wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let ok = server
        .router()
        .oneshot(
            Request::get("/admin/status")
                .header(header::AUTHORIZATION, "Bearer test-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert_eq!(json["status"], "operational");
}

#[tokio::test]
async fn provision_round_trip() {
    let root = tempfile::tempdir().unwrap();
    let config = server_config(root.path());
    fs::write(&config.provisioning.map_file, "").unwrap();

    let reloader = RecordingReloader::new();
    let state = AppState::with_reloader(config.clone(), reloader.clone());
    let server = HttpServer::with_state(&config, state);

    let response = server
        .router()
        .oneshot(
            Request::post("/admin/provision")
                .header(header::AUTHORIZATION, "Bearer test-key")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"domain":"  MyShop.Example.com  "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["domain"], "myshop.example.com");

    assert!(root
        .path()
        .join("home/myshop.example.com/public_html")
        .is_dir());
    let map = fs::read_to_string(&config.provisioning.map_file).unwrap();
    assert!(map.contains("virtualHost myshop.example.com myshop.example.com\n"));
    assert_eq!(reloader.calls(), 1);
}

#[tokio::test]
async fn provision_rejects_traversal_input() {
    let root = tempfile::tempdir().unwrap();
    let config = server_config(root.path());

    let reloader = RecordingReloader::new();
    let state = AppState::with_reloader(config.clone(), reloader.clone());
    let server = HttpServer::with_state(&config, state);

    let response = server
        .router()
        .oneshot(
            Request::post("/admin/provision")
                .header(header::AUTHORIZATION, "Bearer test-key")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"domain":"../../etc"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["stage"], "validate");

    assert!(!root.path().join("home").exists());
    assert_eq!(reloader.calls(), 0);
}
