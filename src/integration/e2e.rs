//! End-to-end integration tests
//!
//! These bind a real listener on an ephemeral port and talk to the server
//! with an HTTP client. The live extraction test needs a yt-dlp install
//! and network access, so it is ignored by default.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::http::create_router;
use crate::state::AppState;

async fn spawn_server(config: ServerConfig) -> String {
    let state = Arc::new(AppState::new(config));
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health_over_http() {
    let base = spawn_server(ServerConfig::default()).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "captions-server");
}

#[tokio::test]
async fn test_validation_error_over_http() {
    let base = spawn_server(ServerConfig::default()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/extract-subtitles", base))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "videoId is required");
}

#[tokio::test]
#[ignore]
async fn test_live_extraction() {
    let base = spawn_server(ServerConfig::default()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/extract-subtitles", base))
        .json(&serde_json::json!({"videoId": "dQw4w9WgXcQ", "language": "en"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["method"], "yt-dlp");
    assert!(json["size"].as_u64().unwrap() > 0);
    assert!(json["srtContent"].as_str().unwrap().contains("-->"));
}
