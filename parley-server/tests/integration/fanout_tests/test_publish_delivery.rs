use parley_core::{DomainEvent, DomainEventKind, Identity, RoomKey, ServerEvent};
use parley_server::{EventPublisher, Fanout, Relay, RelayConfig, RelayError};
use serde_json::json;
use std::sync::Arc;

use crate::integration::{connect, init_tracing, start_relay};
use crate::utils::{barrier, drain, next_event};

#[tokio::test]
async fn test_publish_reaches_identity_room() {
    init_tracing();

    let relay = start_relay().await;
    let mut desktop = connect(&relay, "u1").await;
    let mut phone = connect(&relay, "u1").await;
    let mut other = connect(&relay, "u2").await;

    let fanout = Fanout::new(Arc::new(relay.clone()));
    fanout
        .to_user(
            &Identity::from("u1"),
            DomainEventKind::FriendRequest,
            json!({"from": "u2"}),
        )
        .await
        .unwrap();

    let expected = ServerEvent::Domain(DomainEvent::new(
        DomainEventKind::FriendRequest,
        json!({"from": "u2"}),
    ));
    assert_eq!(next_event(&mut desktop).await.unwrap(), expected);
    assert_eq!(next_event(&mut phone).await.unwrap(), expected);

    barrier(&relay).await;
    assert!(drain(&mut other).is_empty());
}

#[tokio::test]
async fn test_publish_to_channel_viewers() {
    init_tracing();

    let relay = start_relay().await;
    let mut viewer = connect(&relay, "u1").await;
    let mut elsewhere = connect(&relay, "u2").await;

    relay
        .join_room(viewer.id, RoomKey::conversation("general"))
        .await
        .unwrap();

    let fanout = Fanout::new(Arc::new(relay.clone()));
    fanout
        .to_channel("general", DomainEventKind::NewMessage, json!({"id": "m1"}))
        .await
        .unwrap();

    match next_event(&mut viewer).await.unwrap() {
        ServerEvent::Domain(event) => {
            assert_eq!(event.event, DomainEventKind::NewMessage);
            assert_eq!(event.data["id"], "m1");
        }
        other => panic!("unexpected {other:?}"),
    }

    barrier(&relay).await;
    assert!(drain(&mut elsewhere).is_empty());
}

#[tokio::test]
async fn test_publish_without_subscribers_is_ok() {
    init_tracing();

    let relay = start_relay().await;
    let result = relay
        .publish(
            RoomKey::conversation("empty"),
            DomainEvent::new(DomainEventKind::Mention, json!({})),
        )
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_publish_before_start_is_not_ready() {
    init_tracing();

    let (relay, _hub) = Relay::new(&RelayConfig::default());
    let publisher: Arc<dyn EventPublisher> = Arc::new(relay);

    let err = publisher
        .publish(
            RoomKey::user(&Identity::from("u1")),
            DomainEvent::new(DomainEventKind::SettingsUpdated, json!({})),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::RelayNotReady));
}
