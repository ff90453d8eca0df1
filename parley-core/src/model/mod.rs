mod connection;
mod domain;
mod frame;
mod presence;
mod room;
mod signaling;

pub use connection::{ConnectionId, Identity};
pub use domain::{DomainEvent, DomainEventKind, UnknownEventKind};
pub use frame::ServerEvent;
pub use presence::{PresenceEvent, PresenceKind};
pub use room::{RoomKey, RoomKind};
pub use signaling::{ClientEvent, IceServerConfig, RelayEvent, SignalEnvelope, SignalKind};
