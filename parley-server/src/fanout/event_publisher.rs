use crate::error::Result;
use crate::relay::RelayHandle;
use async_trait::async_trait;
use parley_core::{DomainEvent, RoomKey};

/// What request handlers depend on to push events after a write is persisted.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Delivers to the room's members at call time. No subscribers is fine;
    /// an uninitialised relay is `RelayNotReady`.
    async fn publish(&self, room: RoomKey, event: DomainEvent) -> Result<()>;
}

#[async_trait]
impl EventPublisher for RelayHandle {
    async fn publish(&self, room: RoomKey, event: DomainEvent) -> Result<()> {
        RelayHandle::publish(self, room, event).await
    }
}
