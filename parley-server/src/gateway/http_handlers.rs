use crate::auth::token_from_request;
use crate::gateway::{GatewayState, HandshakeParams};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use parley_core::{Identity, RoomKey};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRoster {
    pub channel_id: String,
    pub members: Vec<Identity>,
}

pub async fn healthz(State(state): State<GatewayState>) -> Response {
    match state.relay.stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    }
}

/// Who is in a voice channel right now. Presence events are not replayed to
/// late joiners, so clients call this after `join_voice`.
pub async fn voice_members(
    Path(channel_id): Path<String>,
    Query(params): Query<HandshakeParams>,
    headers: HeaderMap,
    State(state): State<GatewayState>,
) -> Response {
    let token = token_from_request(params.token.as_deref(), &headers);
    if let Err(e) = state.auth.authenticate(token.as_deref()).await {
        warn!(error = %e, "Roster request rejected");
        return (StatusCode::UNAUTHORIZED, e.to_string()).into_response();
    }

    match state.relay.members_of(RoomKey::voice(&channel_id)).await {
        Ok(members) => {
            let mut identities: Vec<Identity> =
                members.into_iter().map(|member| member.identity).collect();
            identities.dedup();

            Json(VoiceRoster {
                channel_id,
                members: identities,
            })
            .into_response()
        }
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    }
}
