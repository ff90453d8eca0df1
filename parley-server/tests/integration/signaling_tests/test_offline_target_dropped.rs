use parley_core::{SignalEnvelope, SignalKind};
use serde_json::json;

use crate::integration::{connect, init_tracing, start_relay};
use crate::utils::{barrier, drain};

#[tokio::test]
async fn test_offline_target_dropped() {
    init_tracing();

    let relay = start_relay().await;
    let mut sender = connect(&relay, "u1").await;
    let mut bystander = connect(&relay, "u3").await;

    relay.join_voice(sender.id, "c1").await.unwrap();
    relay.join_voice(bystander.id, "c1").await.unwrap();
    barrier(&relay).await;
    drain(&mut sender);

    let result = relay
        .relay(
            sender.id,
            SignalEnvelope::new(SignalKind::Offer, "u2".into(), json!({"sdp": "v=0"})),
        )
        .await;
    assert!(result.is_ok(), "unreachable target is not an error");

    barrier(&relay).await;
    assert!(drain(&mut sender).is_empty());
    assert!(drain(&mut bystander).is_empty());
}

#[tokio::test]
async fn test_departed_connection_cannot_signal() {
    init_tracing();

    let relay = start_relay().await;
    let gone = connect(&relay, "u1").await;
    let mut target = connect(&relay, "u2").await;

    relay.disconnect(gone.id).await.unwrap();
    relay
        .relay(
            gone.id,
            SignalEnvelope::new(SignalKind::Offer, "u2".into(), json!({})),
        )
        .await
        .unwrap();

    barrier(&relay).await;
    assert!(drain(&mut target).is_empty());
}
