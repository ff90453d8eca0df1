use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

async fn expect_rejected(url: &str) {
    match connect_async(url).await {
        Err(WsError::Http(response)) => assert_eq!(response.status().as_u16(), 401),
        Err(other) => panic!("expected an HTTP rejection, got {other:?}"),
        Ok(_) => panic!("handshake should have been refused"),
    }
}

#[tokio::test]
async fn test_handshake_greets_with_identity() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    let client = TestClient::connect(&server.ws_url(Some("valid-1")))
        .await
        .unwrap();

    assert_eq!(client.identity.as_str(), "u1");
    assert_eq!(server.relay.stats().await.unwrap().connections, 1);
}

#[tokio::test]
async fn test_missing_token_rejected() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    expect_rejected(&server.ws_url(None)).await;

    assert_eq!(server.relay.stats().await.unwrap().connections, 0);
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    expect_rejected(&server.ws_url(Some("forged"))).await;

    assert_eq!(server.relay.stats().await.unwrap().connections, 0);
}

#[tokio::test]
async fn test_revoked_token_rejected() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    server.tokens.revoke("valid-3");
    expect_rejected(&server.ws_url(Some("valid-3"))).await;
}
