use parley_server::RelayStatus;
use reqwest::StatusCode;
use std::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::integration::init_tracing;
use crate::utils::{EVENT_TIMEOUT_MS, TestServer};

async fn expect_unavailable(server: &TestServer) {
    let response = server.get("/healthz").await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    match connect_async(server.ws_url(Some("valid-1"))).await {
        Err(WsError::Http(response)) => assert_eq!(response.status().as_u16(), 503),
        Err(other) => panic!("expected an HTTP rejection, got {other:?}"),
        Ok(_) => panic!("handshake should have been refused"),
    }
}

#[tokio::test]
async fn test_gateway_unavailable_before_start() {
    init_tracing();

    let (server, _hub) = TestServer::unstarted().await.unwrap();
    assert_eq!(server.relay.status(), RelayStatus::Starting);

    expect_unavailable(&server).await;
}

#[tokio::test]
async fn test_gateway_unavailable_after_shutdown() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    server.relay.shutdown().await.unwrap();

    tokio::time::timeout(Duration::from_millis(EVENT_TIMEOUT_MS), async {
        while server.relay.status() != RelayStatus::Stopped {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("relay did not stop");

    expect_unavailable(&server).await;
}
