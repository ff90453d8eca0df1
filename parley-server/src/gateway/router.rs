use crate::gateway::{GatewayState, healthz, voice_members, ws_handler};
use axum::Router;
use axum::routing::get;

/// `GET /ws?token=...` upgrades to the relay socket.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/healthz", get(healthz))
        .route("/voice/{channel_id}/members", get(voice_members))
        .with_state(state)
}
