use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::integration::{init_tracing, joined};
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_healthz_reports_stats() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    let _client = TestClient::connect(&server.ws_url(Some("valid-1")))
        .await
        .unwrap();

    let response = server.get("/healthz").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats: Value = response.json().await.unwrap();
    assert_eq!(stats["connections"], 1);
    assert_eq!(stats["rooms"], 1);
    assert_eq!(stats["inRooms"], 0);
}

#[tokio::test]
async fn test_voice_roster_requires_token() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    let mut x = TestClient::connect(&server.ws_url(Some("valid-1")))
        .await
        .unwrap();
    let mut y = TestClient::connect(&server.ws_url(Some("valid-2")))
        .await
        .unwrap();
    x.join_voice("c1").await.unwrap();
    x.expect_silence(200).await.unwrap();
    y.join_voice("c1").await.unwrap();
    assert_eq!(x.next_event().await.unwrap(), joined("u2", "c1"));

    let response = server.get("/voice/c1/members").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/voice/c1/members?token=valid-3")
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let roster: Value = response.json().await.unwrap();
    assert_eq!(roster["channelId"], "c1");
    assert_eq!(roster["members"], json!(["u1", "u2"]));
}
