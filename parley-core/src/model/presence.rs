use crate::model::connection::Identity;
use crate::model::signaling::RelayEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceKind {
    JoinedVoice,
    LeftVoice,
}

/// Voice membership change, broadcast to the other members of the voice room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEvent {
    pub kind: PresenceKind,
    pub identity: Identity,
    pub channel_id: String,
}

impl PresenceEvent {
    pub fn joined(identity: Identity, channel_id: impl Into<String>) -> Self {
        Self {
            kind: PresenceKind::JoinedVoice,
            identity,
            channel_id: channel_id.into(),
        }
    }

    pub fn left(identity: Identity, channel_id: impl Into<String>) -> Self {
        Self {
            kind: PresenceKind::LeftVoice,
            identity,
            channel_id: channel_id.into(),
        }
    }
}

impl From<PresenceEvent> for RelayEvent {
    fn from(event: PresenceEvent) -> Self {
        match event.kind {
            PresenceKind::JoinedVoice => RelayEvent::UserJoinedVoice {
                user_id: event.identity,
                channel_id: event.channel_id,
            },
            PresenceKind::LeftVoice => RelayEvent::UserLeftVoice {
                user_id: event.identity,
                channel_id: event.channel_id,
            },
        }
    }
}
