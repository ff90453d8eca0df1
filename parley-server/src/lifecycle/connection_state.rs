/// Per-connection state machine:
/// `Connecting -> Authenticated -> (Idle | InRoom)* -> Disconnected`.
///
/// `InRoom` counts joined rooms other than the identity room. The hub only
/// keeps entries for live connections; `Disconnected` is reached by removing
/// the entry, and a reconnect is a new connection with a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Authenticated,
    Idle,
    InRoom(usize),
}

impl ConnectionState {
    pub fn authenticated(self) -> Self {
        match self {
            Self::Connecting => Self::Authenticated,
            other => other,
        }
    }

    /// State after a membership change leaving `rooms` non-identity rooms.
    pub fn with_rooms(self, rooms: usize) -> Self {
        match self {
            Self::Connecting => self,
            _ if rooms == 0 => Self::Idle,
            _ => Self::InRoom(rooms),
        }
    }

    pub fn in_room(&self) -> bool {
        matches!(self, Self::InRoom(_))
    }
}
