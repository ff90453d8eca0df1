use parley_core::{ConnectionId, Identity};
use serde::Serialize;

/// Lifecycle of the hub loop, observed by every `RelayHandle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayStatus {
    Starting,
    Running,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub connection_id: ConnectionId,
    pub identity: Identity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayStats {
    pub connections: usize,
    pub rooms: usize,
    /// Connections that are in at least one room besides their identity room.
    pub in_rooms: usize,
}
