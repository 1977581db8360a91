use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ddg_search::SearchClient;
use ddg_search::api::create_router;
use ddg_search::config::SearchConfig;
use ddg_search::data_models::ResultEnvelope;

async fn spawn_api() -> SocketAddr {
    // upstream is unreachable: every run fails fast with a network error
    let config = SearchConfig {
        handshake_url: "http://127.0.0.1:1/".to_string(),
        results_url: "http://127.0.0.1:1/d.js".to_string(),
        timeout: Duration::from_millis(500),
        ..SearchConfig::default()
    };
    let client = Arc::new(SearchClient::new(config).unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(client)).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_run_endpoint_wraps_failures_in_envelope() {
    let addr = spawn_api().await;
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/api/run"))
        .json(&serde_json::json!({ "message": "rust" }))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());

    let envelope: ResultEnvelope = res.json().await.unwrap();
    assert!(envelope.message.starts_with("Error: token request failed"));
}

#[tokio::test]
async fn test_run_endpoint_accepts_full_tool_call() {
    let addr = spawn_api().await;
    let envelope: ResultEnvelope = reqwest::Client::new()
        .post(format!("http://{addr}/api/run"))
        .json(&serde_json::json!({
            "configurations": {},
            "parameters": { "message": "" }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(envelope.message, "Error: search query cannot be empty");
}

#[tokio::test]
async fn test_definition_endpoint() {
    let addr = spawn_api().await;
    let def: serde_json::Value = reqwest::get(format!("http://{addr}/api/definition"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(def["id"], "shinkai-tool-duckduckgo-search");
    assert_eq!(def["author"], "Shinkai");
}

#[tokio::test]
async fn test_run_endpoint_wraps_bad_body_in_envelope() {
    let addr = spawn_api().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{addr}/api/run"))
        .json(&serde_json::json!({ "query": "rust" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let envelope: ResultEnvelope = res.json().await.unwrap();
    assert!(envelope.is_error());
    assert!(
        envelope.message.starts_with("Error: Failed to deserialize"),
        "{}",
        envelope.message
    );

    // not JSON at all
    let res = client
        .post(format!("http://{addr}/api/run"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let envelope: ResultEnvelope = res.json().await.unwrap();
    assert!(envelope.is_error());
}
