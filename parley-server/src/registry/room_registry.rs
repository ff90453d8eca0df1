use parley_core::{ConnectionId, RoomKey};
use std::collections::{HashMap, HashSet};

/// Room membership state.
///
/// Rooms exist only while they have members: the last `leave` drops the
/// entry. The registry is owned by the relay hub loop, so every operation
/// (including the multi-room `leave_all`) is applied as a whole before any
/// other read or write is seen.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomKey, HashSet<ConnectionId>>,
    memberships: HashMap<ConnectionId, HashSet<RoomKey>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the connection was already a member.
    pub fn join(&mut self, connection: ConnectionId, room: RoomKey) -> bool {
        let inserted = self
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(connection);

        if inserted {
            self.memberships.entry(connection).or_default().insert(room);
        }
        inserted
    }

    /// Returns `false` if the connection was not a member.
    pub fn leave(&mut self, connection: ConnectionId, room: &RoomKey) -> bool {
        let Some(members) = self.rooms.get_mut(room) else {
            return false;
        };
        if !members.remove(&connection) {
            return false;
        }
        if members.is_empty() {
            self.rooms.remove(room);
        }

        if let Some(joined) = self.memberships.get_mut(&connection) {
            joined.remove(room);
            if joined.is_empty() {
                self.memberships.remove(&connection);
            }
        }
        true
    }

    /// Removes the connection from every room it is in and returns those
    /// rooms in key order.
    pub fn leave_all(&mut self, connection: ConnectionId) -> Vec<RoomKey> {
        let Some(joined) = self.memberships.remove(&connection) else {
            return Vec::new();
        };

        let mut left: Vec<RoomKey> = joined.into_iter().collect();
        left.sort();

        for room in &left {
            if let Some(members) = self.rooms.get_mut(room) {
                members.remove(&connection);
                if members.is_empty() {
                    self.rooms.remove(room);
                }
            }
        }
        left
    }

    pub fn members_of(&self, room: &RoomKey) -> HashSet<ConnectionId> {
        self.rooms.get(room).cloned().unwrap_or_default()
    }

    pub fn members(&self, room: &RoomKey) -> impl Iterator<Item = &ConnectionId> {
        self.rooms.get(room).into_iter().flatten()
    }

    pub fn rooms_of(&self, connection: ConnectionId) -> Vec<RoomKey> {
        let mut rooms: Vec<RoomKey> = self
            .memberships
            .get(&connection)
            .map(|joined| joined.iter().cloned().collect())
            .unwrap_or_default();
        rooms.sort();
        rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
