use crate::model::domain::DomainEvent;
use crate::model::signaling::RelayEvent;
use serde::{Deserialize, Serialize};

/// Everything a connection can receive. Both variants share the
/// `{"event": ..., "data": ...}` framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerEvent {
    Relay(RelayEvent),
    Domain(DomainEvent),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Relay(event) => match event {
                RelayEvent::Ready { .. } => "ready",
                RelayEvent::UserJoinedVoice { .. } => "user_joined_voice",
                RelayEvent::UserLeftVoice { .. } => "user_left_voice",
                RelayEvent::Offer { .. } => "offer",
                RelayEvent::Answer { .. } => "answer",
                RelayEvent::IceCandidate { .. } => "ice-candidate",
            },
            Self::Domain(event) => event.event.as_str(),
        }
    }
}

impl From<RelayEvent> for ServerEvent {
    fn from(event: RelayEvent) -> Self {
        Self::Relay(event)
    }
}

impl From<DomainEvent> for ServerEvent {
    fn from(event: DomainEvent) -> Self {
        Self::Domain(event)
    }
}
