use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::relay::{Member, RelayCommand, RelayHub, RelayStats, RelayStatus};
use parley_core::{
    ClientEvent, ConnectionId, DomainEvent, Identity, RoomKey, ServerEvent, SignalEnvelope,
    SignalKind,
};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::info;

/// Constructs the relay service object.
pub struct Relay;

impl Relay {
    /// Builds a handle and the hub loop without starting it. Until
    /// `RelayHub::run` is polled every handle call fails with `RelayNotReady`.
    pub fn new(config: &RelayConfig) -> (RelayHandle, RelayHub) {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let (status_tx, status_rx) = watch::channel(RelayStatus::Starting);

        let hub = RelayHub::new(command_rx, status_tx, config.ice_servers.clone());
        let handle = RelayHandle {
            command_tx,
            status: status_rx,
        };
        (handle, hub)
    }

    /// Spawns the hub loop and waits until it accepts commands.
    pub async fn start(config: &RelayConfig) -> RelayHandle {
        let (handle, hub) = Self::new(config);
        tokio::spawn(hub.run());

        let mut status = handle.status.clone();
        let _ = status
            .wait_for(|status| *status != RelayStatus::Starting)
            .await;
        info!("Relay ready");
        handle
    }
}

/// Receiving side of one registered connection.
#[derive(Debug)]
pub struct ConnectionSession {
    pub id: ConnectionId,
    pub identity: Identity,
    pub events: mpsc::UnboundedReceiver<ServerEvent>,
}

impl ConnectionSession {
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        self.events.recv().await
    }
}

/// Cheap, cloneable handle to the running relay. Passed to the WebSocket
/// gateway and to any request handler that needs to push events.
#[derive(Clone)]
pub struct RelayHandle {
    command_tx: mpsc::Sender<RelayCommand>,
    status: watch::Receiver<RelayStatus>,
}

impl RelayHandle {
    pub fn status(&self) -> RelayStatus {
        *self.status.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.status() == RelayStatus::Running
    }

    async fn send(&self, cmd: RelayCommand) -> Result<()> {
        if !self.is_ready() {
            return Err(RelayError::RelayNotReady);
        }
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| RelayError::RelayNotReady)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> RelayCommand) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.send(build(reply)).await?;
        rx.await.map_err(|_| RelayError::RelayNotReady)
    }

    /// Registers an authenticated connection and places it in its identity room.
    pub async fn connect(&self, identity: Identity) -> Result<ConnectionSession> {
        let id = ConnectionId::new();
        let (outbound, events) = mpsc::unbounded_channel();

        self.send(RelayCommand::Connect {
            connection: id,
            identity: identity.clone(),
            outbound,
        })
        .await?;

        Ok(ConnectionSession {
            id,
            identity,
            events,
        })
    }

    pub async fn join_room(&self, connection: ConnectionId, room: RoomKey) -> Result<()> {
        self.send(RelayCommand::JoinRoom { connection, room }).await
    }

    pub async fn leave_room(&self, connection: ConnectionId, room: RoomKey) -> Result<()> {
        self.send(RelayCommand::LeaveRoom { connection, room }).await
    }

    pub async fn join_voice(
        &self,
        connection: ConnectionId,
        channel_id: impl Into<String>,
    ) -> Result<()> {
        self.send(RelayCommand::JoinVoice {
            connection,
            channel_id: channel_id.into(),
        })
        .await
    }

    pub async fn leave_voice(
        &self,
        connection: ConnectionId,
        channel_id: impl Into<String>,
    ) -> Result<()> {
        self.send(RelayCommand::LeaveVoice {
            connection,
            channel_id: channel_id.into(),
        })
        .await
    }

    /// Fire-and-forget: an offline target is not an error.
    pub async fn relay(&self, connection: ConnectionId, envelope: SignalEnvelope) -> Result<()> {
        self.send(RelayCommand::Signal {
            connection,
            envelope,
        })
        .await
    }

    pub async fn publish(&self, room: RoomKey, event: DomainEvent) -> Result<()> {
        self.send(RelayCommand::Publish { room, event }).await
    }

    /// Safe to call more than once; later calls are no-ops.
    pub async fn disconnect(&self, connection: ConnectionId) -> Result<()> {
        self.send(RelayCommand::Disconnect { connection }).await
    }

    pub async fn members_of(&self, room: RoomKey) -> Result<Vec<Member>> {
        self.request(|reply| RelayCommand::MembersOf { room, reply })
            .await
    }

    pub async fn stats(&self) -> Result<RelayStats> {
        self.request(|reply| RelayCommand::Stats { reply }).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(RelayCommand::Shutdown).await
    }

    /// Applies one client frame on behalf of `connection`.
    pub async fn dispatch(&self, connection: ConnectionId, event: ClientEvent) -> Result<()> {
        match event {
            ClientEvent::JoinVoice { channel_id } => self.join_voice(connection, channel_id).await,
            ClientEvent::LeaveVoice { channel_id } => {
                self.leave_voice(connection, channel_id).await
            }
            ClientEvent::Offer {
                target_user_id,
                offer,
            } => {
                let envelope = SignalEnvelope::new(SignalKind::Offer, target_user_id, offer);
                self.relay(connection, envelope).await
            }
            ClientEvent::Answer {
                target_user_id,
                answer,
            } => {
                let envelope = SignalEnvelope::new(SignalKind::Answer, target_user_id, answer);
                self.relay(connection, envelope).await
            }
            ClientEvent::IceCandidate {
                target_user_id,
                candidate,
            } => {
                let envelope =
                    SignalEnvelope::new(SignalKind::IceCandidate, target_user_id, candidate);
                self.relay(connection, envelope).await
            }
            ClientEvent::JoinRoom { room_id } => {
                self.join_room(connection, RoomKey::conversation(&room_id))
                    .await
            }
            ClientEvent::LeaveRoom { room_id } => {
                self.leave_room(connection, RoomKey::conversation(&room_id))
                    .await
            }
        }
    }
}
