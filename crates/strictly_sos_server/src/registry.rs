//! Room matchmaking: fill the oldest open room, otherwise create one.

use crate::actor::RoomHandle;
use crate::error::ServerError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_sos::{RoomId, RoomOptions};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Connections a room admits.
pub const MAX_OCCUPANTS: usize = 2;

#[derive(Debug)]
struct RoomEntry {
    handle: RoomHandle,
    occupants: usize,
}

/// Live rooms in creation order.
#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<Mutex<Vec<RoomEntry>>>,
    defaults: RoomOptions,
}

impl RoomRegistry {
    /// Creates an empty registry. `defaults` fill options a client omits.
    pub fn new(defaults: RoomOptions) -> Self {
        Self {
            rooms: Arc::new(Mutex::new(Vec::new())),
            defaults,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RoomEntry>> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserves a slot in the oldest room with space, creating a room from
    /// `options` when none has space.
    ///
    /// # Errors
    ///
    /// Fails when a new room is needed and `options` do not resolve.
    #[instrument(skip(self))]
    pub fn join_or_create(&self, options: RoomOptions) -> Result<RoomHandle, ServerError> {
        let mut rooms = self.lock();
        if let Some(entry) = rooms.iter_mut().find(|e| e.occupants < MAX_OCCUPANTS) {
            entry.occupants += 1;
            debug!(room_id = %entry.handle.room_id(), occupants = entry.occupants, "Joined existing room");
            return Ok(entry.handle.clone());
        }

        let config = options.or(&self.defaults).resolve()?;
        let room_id = new_room_id();
        let handle = RoomHandle::spawn(room_id.clone(), config);
        rooms.push(RoomEntry {
            handle: handle.clone(),
            occupants: 1,
        });
        info!(room_id = %room_id, rooms = rooms.len(), "Created room");
        Ok(handle)
    }

    /// Frees a slot. The room is forgotten once its last occupant leaves.
    #[instrument(skip(self))]
    pub fn release(&self, room_id: &str) {
        let mut rooms = self.lock();
        let Some(index) = rooms.iter().position(|e| e.handle.room_id() == room_id) else {
            debug!("Release for unknown room");
            return;
        };
        let entry = &mut rooms[index];
        entry.occupants = entry.occupants.saturating_sub(1);
        if entry.occupants == 0 {
            rooms.remove(index);
            info!(rooms = rooms.len(), "Disposed empty room");
        }
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.lock().len()
    }

    /// Reserved slots in `room_id`, if the room is live.
    pub fn occupants(&self, room_id: &str) -> Option<usize> {
        self.lock()
            .iter()
            .find(|e| e.handle.room_id() == room_id)
            .map(|e| e.occupants)
    }
}

fn new_room_id() -> RoomId {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id
}

/// Fresh session identity for a connection.
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_join_shares_room() {
        let registry = RoomRegistry::default();
        let first = registry.join_or_create(RoomOptions::default()).unwrap();
        let second = registry.join_or_create(RoomOptions::default()).unwrap();
        assert_eq!(first.room_id(), second.room_id());
        assert_eq!(registry.occupants(first.room_id()), Some(2));
        assert_eq!(first.room_id().len(), 9);
    }

    #[tokio::test]
    async fn test_third_join_creates_new_room() {
        let registry = RoomRegistry::default();
        let a = registry.join_or_create(RoomOptions::default()).unwrap();
        registry.join_or_create(RoomOptions::default()).unwrap();
        let c = registry.join_or_create(RoomOptions::default()).unwrap();
        assert_ne!(a.room_id(), c.room_id());
        assert_eq!(registry.room_count(), 2);
    }

    #[tokio::test]
    async fn test_release_frees_slot_then_disposes() {
        let registry = RoomRegistry::default();
        let a = registry.join_or_create(RoomOptions::default()).unwrap();
        registry.join_or_create(RoomOptions::default()).unwrap();

        registry.release(a.room_id());
        assert_eq!(registry.occupants(a.room_id()), Some(1));
        let back = registry.join_or_create(RoomOptions::default()).unwrap();
        assert_eq!(back.room_id(), a.room_id());

        registry.release(a.room_id());
        registry.release(a.room_id());
        assert_eq!(registry.room_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_options_create_nothing() {
        let registry = RoomRegistry::default();
        let options = RoomOptions {
            grid_size_x: Some(0),
            ..RoomOptions::default()
        };
        assert!(matches!(
            registry.join_or_create(options),
            Err(ServerError::Config(_))
        ));
        assert_eq!(registry.room_count(), 0);
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
        assert_eq!(new_session_id().len(), 32);
    }
}
