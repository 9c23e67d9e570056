//! HTTP API tests for the health, tools, and validate endpoints.

mod common;

use common::TestServer;
use serde_json::json;

#[tokio::test]
async fn health_returns_ok() {
    let server = TestServer::spawn_default().await;

    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn tools_endpoint_lists_known_tools() {
    let server = TestServer::spawn_default().await;

    let response = server
        .client
        .get(server.url("/api/tools"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"yt-dlp"));
    assert!(names.contains(&"ffmpeg"));
}

#[tokio::test]
async fn config_endpoint_reports_active_settings() {
    let mut config = clipfetch_core::config::Config::default();
    config.providers.ssstik_url = "https://ssstik.example".to_string();
    let server = TestServer::spawn(config).await;

    let response = server
        .client
        .get(server.url("/api/config"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["server"]["port"], 8080);
    assert_eq!(body["providers"]["ssstik_url"], "https://ssstik.example");
}

#[tokio::test]
async fn validate_without_url_is_rejected() {
    let server = TestServer::spawn_default().await;

    let response = server
        .client
        .post(server.url("/api/validate"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "URL is required");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn validate_rejects_foreign_domain() {
    let server = TestServer::spawn_default().await;

    let response = server
        .client
        .post(server.url("/api/validate"))
        .json(&json!({ "url": "https://example.com/watch?v=abc" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid or unsupported URL");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let server = TestServer::spawn_default().await;

    let response = server
        .client
        .post(server.url("/api/validate"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn supplied_request_id_is_echoed() {
    let server = TestServer::spawn_default().await;

    let response = server
        .client
        .post(server.url("/api/validate"))
        .header("x-request-id", "test-req-42")
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers()["x-request-id"].to_str().unwrap(),
        "test-req-42"
    );
}

#[cfg(unix)]
mod with_stub_ytdlp {
    use super::*;
    use clipfetch_core::config::Config;
    use common::stubs;

    #[tokio::test]
    async fn validate_returns_probed_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.tools.ytdlp_path = Some(stubs::working_ytdlp(dir.path()));
        let server = TestServer::spawn(config).await;

        let response = server
            .client
            .post(server.url("/api/validate"))
            .json(&json!({ "url": "https://www.tiktok.com/@u/video/1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["title"], "stub clip");
        assert_eq!(body["duration"], 12.0);
    }

    #[tokio::test]
    async fn validate_maps_probe_failure_to_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.tools.ytdlp_path = Some(stubs::failing_ytdlp(dir.path()));
        let server = TestServer::spawn(config).await;

        let response = server
            .client
            .post(server.url("/api/validate"))
            .json(&json!({ "url": "https://www.tiktok.com/@u/video/1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid or unsupported URL");
    }
}
