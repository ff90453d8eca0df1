use parley_core::RoomKey;

use crate::integration::{connect, init_tracing, start_relay};
use crate::utils::{barrier, drain};

#[tokio::test]
async fn test_join_after_disconnect_leaves_no_phantom() {
    init_tracing();

    let relay = start_relay().await;
    let a = connect(&relay, "u1").await;
    let mut b = connect(&relay, "u2").await;
    relay.join_voice(b.id, "c").await.unwrap();

    // The socket dropped while a join was still in flight.
    relay.disconnect(a.id).await.unwrap();
    relay.join_voice(a.id, "c").await.unwrap();
    relay
        .join_room(a.id, RoomKey::conversation("x"))
        .await
        .unwrap();
    barrier(&relay).await;

    let members = relay.members_of(RoomKey::voice("c")).await.unwrap();
    assert_eq!(members.len(), 1);
    assert!(relay
        .members_of(RoomKey::conversation("x"))
        .await
        .unwrap()
        .is_empty());
    assert!(drain(&mut b).is_empty(), "no presence for a dead connection");
}

#[tokio::test]
async fn test_concurrent_joins_and_disconnects_settle_clean() {
    init_tracing();

    let relay = start_relay().await;
    let mut sessions = Vec::new();
    for n in 0..16 {
        sessions.push(connect(&relay, &format!("user-{n}")).await);
    }

    let mut tasks = Vec::new();
    for session in &sessions {
        let relay = relay.clone();
        let id = session.id;
        tasks.push(tokio::spawn(async move {
            relay.join_voice(id, "busy").await.unwrap();
            relay.disconnect(id).await.unwrap();
            relay.join_voice(id, "busy").await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert!(relay
        .members_of(RoomKey::voice("busy"))
        .await
        .unwrap()
        .is_empty());
    let stats = relay.stats().await.unwrap();
    assert_eq!(stats.connections, 0);
    assert_eq!(stats.rooms, 0);
}
