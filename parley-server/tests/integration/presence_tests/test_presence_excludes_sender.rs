use crate::integration::{connect, init_tracing, joined, start_relay};
use crate::utils::{barrier, drain};

#[tokio::test]
async fn test_presence_excludes_sender() {
    init_tracing();

    let relay = start_relay().await;
    let mut a = connect(&relay, "u1").await;
    let mut b = connect(&relay, "u2").await;

    relay.join_voice(a.id, "room1").await.unwrap();
    relay.join_voice(b.id, "room1").await.unwrap();
    barrier(&relay).await;

    assert_eq!(drain(&mut a), vec![joined("u2", "room1")]);
    assert!(drain(&mut b).is_empty(), "B must not hear about its own join");
}

#[tokio::test]
async fn test_first_member_hears_nothing() {
    init_tracing();

    let relay = start_relay().await;
    let mut a = connect(&relay, "u1").await;

    relay.join_voice(a.id, "lonely").await.unwrap();
    barrier(&relay).await;

    assert!(drain(&mut a).is_empty());
}
