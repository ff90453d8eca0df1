use crate::auth::token_from_request;
use crate::error::RelayError;
use crate::gateway::GatewayState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use parley_core::{ClientEvent, Identity};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const MIN_HEARTBEAT: Duration = Duration::from_millis(100);

#[derive(Debug, Default, Deserialize)]
pub struct HandshakeParams {
    pub token: Option<String>,
}

/// Authenticates before upgrading: a rejected client never gets a socket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<HandshakeParams>,
    headers: HeaderMap,
    State(state): State<GatewayState>,
) -> Response {
    if !state.relay.is_ready() {
        return (StatusCode::SERVICE_UNAVAILABLE, "relay is not ready").into_response();
    }

    let token = token_from_request(params.token.as_deref(), &headers);
    let identity = match state.auth.authenticate(token.as_deref()).await {
        Ok(identity) => identity,
        Err(RelayError::AuthenticationFailed(failure)) => {
            warn!(reason = failure.reason(), "Handshake rejected");
            return (StatusCode::UNAUTHORIZED, "authentication failed").into_response();
        }
        Err(e) => {
            error!(error = %e, "Handshake failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, identity, state))
}

async fn handle_socket(socket: WebSocket, identity: Identity, state: GatewayState) {
    let session = match state.relay.connect(identity.clone()).await {
        Ok(session) => session,
        Err(e) => {
            warn!(%identity, error = %e, "Could not register connection");
            return;
        }
    };
    let connection = session.id;
    info!(%connection, %identity, "New WebSocket connection");

    let (mut sender, mut receiver) = socket.split();
    let mut events = session.events;
    let heartbeat = state.config.heartbeat_interval;
    let idle_timeout = state.config.client_timeout;

    let mut send_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(heartbeat.max(MIN_HEARTBEAT));
        ticker.tick().await;

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    match serde_json::to_string(&event) {
                        Ok(json) => {
                            if sender.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            error!(%connection, event = event.name(), error = %e, "Failed to serialize event")
                        }
                    }
                }
                _ = ticker.tick() => {
                    if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }

        let _ = sender.close().await;
    });

    let mut recv_task = tokio::spawn({
        let relay = state.relay.clone();

        async move {
            loop {
                let frame = match tokio::time::timeout(idle_timeout, receiver.next()).await {
                    Ok(Some(Ok(frame))) => frame,
                    Ok(Some(Err(e))) => {
                        debug!(%connection, error = %RelayError::from(e), "Socket read failed");
                        break;
                    }
                    Ok(None) => break,
                    Err(_) => {
                        info!(%connection, "Client idle timeout");
                        break;
                    }
                };

                match frame {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            debug!(%connection, event = event.name(), "Client event");
                            if let Err(e) = relay.dispatch(connection, event).await {
                                error!(%connection, error = %e, "Relay unavailable");
                                break;
                            }
                        }
                        Err(e) => warn!(%connection, error = %e, "Invalid client frame"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    if let Err(e) = state.relay.disconnect(connection).await {
        debug!(%connection, error = %e, "Disconnect not delivered");
    }
    info!(%connection, %identity, "WebSocket disconnected");
}
