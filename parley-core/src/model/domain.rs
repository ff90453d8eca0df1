use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Events pushed by the request-handling layer after a state change is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainEventKind {
    NewMessage,
    NewDirectMessage,
    Mention,
    FriendRequest,
    FriendRequestAccepted,
    SettingsUpdated,
    UserStatusUpdate,
    GroupDmCreated,
    GroupDmUpdated,
    GroupDmDeleted,
}

impl DomainEventKind {
    pub const ALL: [DomainEventKind; 10] = [
        Self::NewMessage,
        Self::NewDirectMessage,
        Self::Mention,
        Self::FriendRequest,
        Self::FriendRequestAccepted,
        Self::SettingsUpdated,
        Self::UserStatusUpdate,
        Self::GroupDmCreated,
        Self::GroupDmUpdated,
        Self::GroupDmDeleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewMessage => "new_message",
            Self::NewDirectMessage => "new_direct_message",
            Self::Mention => "mention",
            Self::FriendRequest => "friend_request",
            Self::FriendRequestAccepted => "friend_request_accepted",
            Self::SettingsUpdated => "settings_updated",
            Self::UserStatusUpdate => "user_status_update",
            Self::GroupDmCreated => "group_dm_created",
            Self::GroupDmUpdated => "group_dm_updated",
            Self::GroupDmDeleted => "group_dm_deleted",
        }
    }
}

impl fmt::Display for DomainEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain event: {0}")]
pub struct UnknownEventKind(pub String);

impl FromStr for DomainEventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventKind(s.to_owned()))
    }
}

/// A domain event as it goes over the wire, payload untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event: DomainEventKind,
    pub data: Value,
}

impl DomainEvent {
    pub fn new(event: DomainEventKind, data: Value) -> Self {
        Self { event, data }
    }
}
