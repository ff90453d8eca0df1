use crate::error::Result;
use crate::fanout::EventPublisher;
use parley_core::{DomainEvent, DomainEventKind, Identity, RoomKey};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Routes domain events to the rooms that should see them.
#[derive(Clone)]
pub struct Fanout {
    publisher: Arc<dyn EventPublisher>,
}

impl Fanout {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Every session of one user.
    pub async fn to_user(
        &self,
        identity: &Identity,
        kind: DomainEventKind,
        payload: Value,
    ) -> Result<()> {
        self.publisher
            .publish(RoomKey::user(identity), DomainEvent::new(kind, payload))
            .await
    }

    /// Stops at the first failure; recipients before it already got the event.
    pub async fn to_users<'a, I>(&self, identities: I, kind: DomainEventKind, payload: Value) -> Result<()>
    where
        I: IntoIterator<Item = &'a Identity>,
    {
        for identity in identities {
            self.to_user(identity, kind, payload.clone()).await?;
        }
        Ok(())
    }

    /// Everyone currently viewing a channel or conversation.
    pub async fn to_channel(
        &self,
        channel_id: &str,
        kind: DomainEventKind,
        payload: Value,
    ) -> Result<()> {
        debug!(channel = channel_id, event = %kind, "Channel fan-out");
        self.publisher
            .publish(
                RoomKey::conversation(channel_id),
                DomainEvent::new(kind, payload),
            )
            .await
    }
}
