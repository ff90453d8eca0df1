use crate::registry::RoomRegistry;
use parley_core::{ConnectionId, Identity, PresenceEvent, RoomKey};

/// What a disconnect removed, and who has to hear about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eviction {
    pub identity: Identity,
    pub rooms: Vec<RoomKey>,
}

impl Eviction {
    /// One `left-voice` per voice room the connection was in. Same shape as an
    /// explicit leave, so peers cannot tell the two apart.
    pub fn departures(&self) -> impl Iterator<Item = (&RoomKey, PresenceEvent)> {
        self.rooms.iter().filter_map(|room| {
            room.voice_channel()
                .map(|channel| (room, PresenceEvent::left(self.identity.clone(), channel)))
        })
    }
}

/// Pulls the connection out of every room in one step.
pub fn evict(registry: &mut RoomRegistry, connection: ConnectionId, identity: Identity) -> Eviction {
    let rooms = registry.leave_all(connection);
    Eviction { identity, rooms }
}
