use crate::relay::{Member, RelayStats};
use parley_core::{ConnectionId, DomainEvent, Identity, RoomKey, ServerEvent, SignalEnvelope};
use tokio::sync::{mpsc, oneshot};

/// Commands consumed by the relay hub loop, in arrival order.
#[derive(Debug)]
pub enum RelayCommand {
    /// An authenticated socket is ready to receive events.
    Connect {
        connection: ConnectionId,
        identity: Identity,
        outbound: mpsc::UnboundedSender<ServerEvent>,
    },

    JoinRoom {
        connection: ConnectionId,
        room: RoomKey,
    },

    LeaveRoom {
        connection: ConnectionId,
        room: RoomKey,
    },

    JoinVoice {
        connection: ConnectionId,
        channel_id: String,
    },

    LeaveVoice {
        connection: ConnectionId,
        channel_id: String,
    },

    /// Offer/answer/ICE candidate for every session of the target identity.
    Signal {
        connection: ConnectionId,
        envelope: SignalEnvelope,
    },

    /// Domain event from the request-handling layer.
    Publish { room: RoomKey, event: DomainEvent },

    /// The transport is gone (close, error or idle timeout).
    Disconnect { connection: ConnectionId },

    MembersOf {
        room: RoomKey,
        reply: oneshot::Sender<Vec<Member>>,
    },

    Stats {
        reply: oneshot::Sender<RelayStats>,
    },

    Shutdown,
}
