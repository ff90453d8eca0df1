use crate::model::connection::{ConnectionId, Identity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// WebRTC negotiation message kinds. Payloads stay opaque to the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}

/// A signaling message addressed to every session of `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalEnvelope {
    pub kind: SignalKind,
    pub target: Identity,
    pub payload: Value,
}

impl SignalEnvelope {
    pub fn new(kind: SignalKind, target: Identity, payload: Value) -> Self {
        Self {
            kind,
            target,
            payload,
        }
    }

    /// The event the target receives, stamped with the sender's identity.
    pub fn into_event(self, from_user_id: Identity) -> RelayEvent {
        match self.kind {
            SignalKind::Offer => RelayEvent::Offer {
                offer: self.payload,
                from_user_id,
            },
            SignalKind::Answer => RelayEvent::Answer {
                answer: self.payload,
                from_user_id,
            },
            SignalKind::IceCandidate => RelayEvent::IceCandidate {
                candidate: self.payload,
                from_user_id,
            },
        }
    }
}

/// Frames a client sends to the relay: `{"event": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "join_voice", rename_all = "camelCase")]
    JoinVoice { channel_id: String },

    #[serde(rename = "leave_voice", rename_all = "camelCase")]
    LeaveVoice { channel_id: String },

    #[serde(rename = "offer", rename_all = "camelCase")]
    Offer { target_user_id: Identity, offer: Value },

    #[serde(rename = "answer", rename_all = "camelCase")]
    Answer {
        target_user_id: Identity,
        answer: Value,
    },

    #[serde(rename = "ice-candidate", rename_all = "camelCase")]
    IceCandidate {
        target_user_id: Identity,
        candidate: Value,
    },

    #[serde(rename = "join_room", rename_all = "camelCase")]
    JoinRoom { room_id: String },

    #[serde(rename = "leave_room", rename_all = "camelCase")]
    LeaveRoom { room_id: String },
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinVoice { .. } => "join_voice",
            Self::LeaveVoice { .. } => "leave_voice",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
            Self::JoinRoom { .. } => "join_room",
            Self::LeaveRoom { .. } => "leave_room",
        }
    }
}

/// Frames the relay itself emits (as opposed to pass-through domain events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum RelayEvent {
    #[serde(rename = "ready", rename_all = "camelCase")]
    Ready {
        connection_id: ConnectionId,
        user_id: Identity,
        ice_servers: Vec<IceServerConfig>,
    },

    #[serde(rename = "user_joined_voice", rename_all = "camelCase")]
    UserJoinedVoice {
        user_id: Identity,
        channel_id: String,
    },

    #[serde(rename = "user_left_voice", rename_all = "camelCase")]
    UserLeftVoice {
        user_id: Identity,
        channel_id: String,
    },

    #[serde(rename = "offer", rename_all = "camelCase")]
    Offer { offer: Value, from_user_id: Identity },

    #[serde(rename = "answer", rename_all = "camelCase")]
    Answer {
        answer: Value,
        from_user_id: Identity,
    },

    #[serde(rename = "ice-candidate", rename_all = "camelCase")]
    IceCandidate {
        candidate: Value,
        from_user_id: Identity,
    },
}
