use crate::model::connection::Identity;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const USER_PREFIX: &str = "user:";
const VOICE_PREFIX: &str = "voice:";
const CONVERSATION_PREFIX: &str = "room:";

/// Name of a multicast group.
///
/// The registry treats keys as opaque strings. The prefixes below are the
/// naming convention the relay uses to tell identity, voice and conversation
/// rooms apart.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    Identity,
    Voice,
    Conversation,
    Other,
}

impl RoomKey {
    /// `user:<identity>`, the personal room every connection of a user sits in.
    pub fn user(identity: &Identity) -> Self {
        Self(format!("{USER_PREFIX}{identity}"))
    }

    /// `voice:<channel_id>`
    pub fn voice(channel_id: &str) -> Self {
        Self(format!("{VOICE_PREFIX}{channel_id}"))
    }

    /// `room:<id>`, used for channel and direct-message delivery scoping.
    pub fn conversation(id: &str) -> Self {
        Self(format!("{CONVERSATION_PREFIX}{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> RoomKind {
        if self.0.starts_with(USER_PREFIX) {
            RoomKind::Identity
        } else if self.0.starts_with(VOICE_PREFIX) {
            RoomKind::Voice
        } else if self.0.starts_with(CONVERSATION_PREFIX) {
            RoomKind::Conversation
        } else {
            RoomKind::Other
        }
    }

    /// Channel id of a voice room, `None` for any other kind.
    pub fn voice_channel(&self) -> Option<&str> {
        self.0.strip_prefix(VOICE_PREFIX)
    }

    pub fn is_voice(&self) -> bool {
        self.kind() == RoomKind::Voice
    }
}

impl FromStr for RoomKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for RoomKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
