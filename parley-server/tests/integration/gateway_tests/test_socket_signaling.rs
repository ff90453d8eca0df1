use parley_core::{ClientEvent, RelayEvent, ServerEvent};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_offer_answer_ice_over_sockets() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    let mut caller = TestClient::connect(&server.ws_url(Some("valid-1")))
        .await
        .unwrap();
    let mut callee = TestClient::connect(&server.ws_url(Some("valid-2")))
        .await
        .unwrap();

    let offer = json!({"type": "offer", "sdp": "v=0"});
    caller
        .send(&ClientEvent::Offer {
            target_user_id: "u2".into(),
            offer: offer.clone(),
        })
        .await
        .unwrap();
    assert_eq!(
        callee.next_event().await.unwrap(),
        ServerEvent::Relay(RelayEvent::Offer {
            offer,
            from_user_id: "u1".into(),
        })
    );

    let answer = json!({"type": "answer", "sdp": "v=0"});
    callee
        .send(&ClientEvent::Answer {
            target_user_id: "u1".into(),
            answer: answer.clone(),
        })
        .await
        .unwrap();
    assert_eq!(
        caller.next_event().await.unwrap(),
        ServerEvent::Relay(RelayEvent::Answer {
            answer,
            from_user_id: "u2".into(),
        })
    );

    let candidate = json!({"candidate": "candidate:1 1 udp 2122260223 10.0.0.1 5000 typ host"});
    caller
        .send(&ClientEvent::IceCandidate {
            target_user_id: "u2".into(),
            candidate: candidate.clone(),
        })
        .await
        .unwrap();
    assert_eq!(
        callee.next_event().await.unwrap(),
        ServerEvent::Relay(RelayEvent::IceCandidate {
            candidate,
            from_user_id: "u1".into(),
        })
    );
}

#[tokio::test]
async fn test_offer_to_offline_user_goes_nowhere() {
    init_tracing();

    let server = TestServer::start().await.unwrap();
    let mut caller = TestClient::connect(&server.ws_url(Some("valid-1")))
        .await
        .unwrap();
    let mut bystander = TestClient::connect(&server.ws_url(Some("valid-3")))
        .await
        .unwrap();

    caller
        .send(&ClientEvent::Offer {
            target_user_id: "u2".into(),
            offer: json!({"type": "offer", "sdp": "v=0"}),
        })
        .await
        .unwrap();

    caller.expect_silence(200).await.unwrap();
    bystander.expect_silence(200).await.unwrap();
}
