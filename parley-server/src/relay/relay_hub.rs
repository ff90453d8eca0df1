use crate::lifecycle::{ConnectionState, evict};
use crate::registry::RoomRegistry;
use crate::relay::{Member, RelayCommand, RelayStats, RelayStatus};
use parley_core::{
    ConnectionId, DomainEvent, Identity, IceServerConfig, PresenceEvent, RelayEvent, RoomKey,
    RoomKind, ServerEvent, SignalEnvelope,
};
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

struct ConnectionEntry {
    identity: Identity,
    outbound: mpsc::UnboundedSender<ServerEvent>,
    state: ConnectionState,
}

/// The relay's single dispatch loop.
///
/// Owns the room registry and the outbound channel of every live
/// connection. Commands are applied one at a time, so a membership change and
/// the presence broadcast that goes with it are never interleaved with
/// anything else touching the same room.
pub struct RelayHub {
    registry: RoomRegistry,
    connections: HashMap<ConnectionId, ConnectionEntry>,
    command_rx: mpsc::Receiver<RelayCommand>,
    status: watch::Sender<RelayStatus>,
    ice_servers: Vec<IceServerConfig>,
}

impl RelayHub {
    pub(crate) fn new(
        command_rx: mpsc::Receiver<RelayCommand>,
        status: watch::Sender<RelayStatus>,
        ice_servers: Vec<IceServerConfig>,
    ) -> Self {
        Self {
            registry: RoomRegistry::new(),
            connections: HashMap::new(),
            command_rx,
            status,
            ice_servers,
        }
    }

    pub async fn run(mut self) {
        self.status.send_replace(RelayStatus::Running);
        info!("Relay event loop started");

        loop {
            match self.command_rx.recv().await {
                Some(RelayCommand::Shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                Some(cmd) => self.handle_command(cmd),
                None => {
                    info!("Command channel closed. Shutting down relay.");
                    break;
                }
            }
        }

        self.status.send_replace(RelayStatus::Stopped);
        self.command_rx.close();
        info!(
            connections = self.connections.len(),
            "Relay event loop finished"
        );
    }

    fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Connect {
                connection,
                identity,
                outbound,
            } => self.connect(connection, identity, outbound),

            RelayCommand::JoinRoom { connection, room } => {
                if room.is_voice() {
                    if let Some(channel) = room.voice_channel() {
                        self.join_voice(connection, channel.to_owned());
                    }
                    return;
                }
                if !self.is_live(connection) {
                    return;
                }
                if self.registry.join(connection, room.clone()) {
                    debug!(%connection, %room, "Joined room");
                    self.refresh_state(connection);
                }
            }

            RelayCommand::LeaveRoom { connection, room } => {
                if room.is_voice() {
                    if let Some(channel) = room.voice_channel() {
                        self.leave_voice(connection, channel.to_owned());
                    }
                    return;
                }
                if self.registry.leave(connection, &room) {
                    debug!(%connection, %room, "Left room");
                    self.refresh_state(connection);
                }
            }

            RelayCommand::JoinVoice {
                connection,
                channel_id,
            } => self.join_voice(connection, channel_id),

            RelayCommand::LeaveVoice {
                connection,
                channel_id,
            } => self.leave_voice(connection, channel_id),

            RelayCommand::Signal {
                connection,
                envelope,
            } => self.relay_signal(connection, envelope),

            RelayCommand::Publish { room, event } => self.publish(room, event),

            RelayCommand::Disconnect { connection } => self.disconnect(connection),

            RelayCommand::MembersOf { room, reply } => {
                let _ = reply.send(self.members_of(&room));
            }

            RelayCommand::Stats { reply } => {
                let _ = reply.send(self.stats());
            }

            // Consumed by `run` before it gets here.
            RelayCommand::Shutdown => {}
        }
    }

    fn connect(
        &mut self,
        connection: ConnectionId,
        identity: Identity,
        outbound: mpsc::UnboundedSender<ServerEvent>,
    ) {
        if self.connections.contains_key(&connection) {
            warn!(%connection, "Duplicate connection id ignored");
            return;
        }

        info!(%connection, %identity, "Connection registered");
        self.connections.insert(
            connection,
            ConnectionEntry {
                identity: identity.clone(),
                outbound,
                state: ConnectionState::Connecting.authenticated(),
            },
        );
        self.registry.join(connection, RoomKey::user(&identity));

        let ready = RelayEvent::Ready {
            connection_id: connection,
            user_id: identity,
            ice_servers: self.ice_servers.clone(),
        };
        self.deliver(connection, ready.into());
    }

    fn join_voice(&mut self, connection: ConnectionId, channel_id: String) {
        let Some(identity) = self.identity_of(connection) else {
            return;
        };
        let room = RoomKey::voice(&channel_id);

        if !self.registry.join(connection, room.clone()) {
            return;
        }
        info!(%connection, %identity, %room, "Joined voice");
        self.refresh_state(connection);

        let event = PresenceEvent::joined(identity, channel_id);
        self.broadcast(&room, RelayEvent::from(event).into(), Some(connection));
    }

    fn leave_voice(&mut self, connection: ConnectionId, channel_id: String) {
        let Some(identity) = self.identity_of(connection) else {
            return;
        };
        let room = RoomKey::voice(&channel_id);

        if !self.registry.leave(connection, &room) {
            return;
        }
        info!(%connection, %identity, %room, "Left voice");
        self.refresh_state(connection);

        let event = PresenceEvent::left(identity, channel_id);
        self.broadcast(&room, RelayEvent::from(event).into(), None);
    }

    fn relay_signal(&mut self, connection: ConnectionId, envelope: SignalEnvelope) {
        let Some(from) = self.identity_of(connection) else {
            return;
        };
        let room = RoomKey::user(&envelope.target);
        let kind = envelope.kind;
        let target = envelope.target.clone();

        let delivered = self.broadcast(&room, envelope.into_event(from.clone()).into(), None);
        if delivered == 0 {
            debug!(%from, %target, ?kind, "Signal target unreachable, dropped");
        }
    }

    fn publish(&mut self, room: RoomKey, event: DomainEvent) {
        let name = event.event;
        let delivered = self.broadcast(&room, ServerEvent::Domain(event), None);
        debug!(%room, event = %name, delivered, "Published domain event");
    }

    fn disconnect(&mut self, connection: ConnectionId) {
        let Some(entry) = self.connections.remove(&connection) else {
            debug!(%connection, "Disconnect for unknown connection");
            return;
        };

        let eviction = evict(&mut self.registry, connection, entry.identity);
        for (room, departure) in eviction.departures() {
            self.broadcast(room, RelayEvent::from(departure).into(), None);
        }

        info!(
            %connection,
            identity = %eviction.identity,
            rooms = eviction.rooms.len(),
            "Connection evicted"
        );
    }

    /// Sends `event` to every member of `room` except `skip`. Returns the
    /// number of connections it was handed to.
    fn broadcast(&self, room: &RoomKey, event: ServerEvent, skip: Option<ConnectionId>) -> usize {
        let mut delivered = 0;
        for member in self.registry.members(room) {
            if Some(*member) == skip {
                continue;
            }
            if self.deliver(*member, event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    fn deliver(&self, connection: ConnectionId, event: ServerEvent) -> bool {
        let Some(entry) = self.connections.get(&connection) else {
            return false;
        };
        match entry.outbound.send(event) {
            Ok(()) => true,
            Err(_) => {
                // Writer already gone; its Disconnect is on the way.
                debug!(%connection, "Outbound channel closed");
                false
            }
        }
    }

    fn identity_of(&self, connection: ConnectionId) -> Option<Identity> {
        let identity = self
            .connections
            .get(&connection)
            .map(|entry| entry.identity.clone());
        if identity.is_none() {
            debug!(%connection, "Command from unknown connection dropped");
        }
        identity
    }

    fn is_live(&self, connection: ConnectionId) -> bool {
        self.identity_of(connection).is_some()
    }

    fn refresh_state(&mut self, connection: ConnectionId) {
        let rooms = self
            .registry
            .rooms_of(connection)
            .iter()
            .filter(|room| room.kind() != RoomKind::Identity)
            .count();
        if let Some(entry) = self.connections.get_mut(&connection) {
            entry.state = entry.state.with_rooms(rooms);
        }
    }

    fn members_of(&self, room: &RoomKey) -> Vec<Member> {
        let mut members: Vec<Member> = self
            .registry
            .members_of(room)
            .into_iter()
            .filter_map(|connection| {
                self.connections.get(&connection).map(|entry| Member {
                    connection_id: connection,
                    identity: entry.identity.clone(),
                })
            })
            .collect();
        members.sort_by(|a, b| a.identity.cmp(&b.identity));
        members
    }

    fn stats(&self) -> RelayStats {
        RelayStats {
            connections: self.connections.len(),
            rooms: self.registry.room_count(),
            in_rooms: self
                .connections
                .values()
                .filter(|entry| entry.state.in_room())
                .count(),
        }
    }
}
