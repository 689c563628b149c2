//! Session store state - the map the registry actor owns exclusively

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How recently a session must have been heard from to count as online,
/// in milliseconds.
pub const ONLINE_WINDOW_MS: i64 = 10_000;

/// One record per known session identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Last known network origin of the session
    pub remote_addr: String,
    /// Milliseconds since epoch of the last liveness signal
    pub last_contact_ms: i64,
    /// Ordinal position at creation time; a display counter, not an identity
    pub session_number: usize,
}

/// The session map and its state transitions.
///
/// Owned exclusively by the registry actor; no reference to it ever leaves
/// the actor task. Methods take `now_ms` explicitly so the online-window
/// logic is testable without sleeping.
#[derive(Debug, Default)]
pub(crate) struct SessionStore {
    sessions: HashMap<String, SessionRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Insert a fresh record under `id`.
    ///
    /// `session_number` is the map size at insertion time, so numbers can
    /// repeat after destroys. Callers rely on that exact behavior.
    pub fn insert_new(&mut self, id: String, remote_addr: String, now_ms: i64) {
        let record = SessionRecord {
            remote_addr,
            last_contact_ms: now_ms,
            session_number: self.sessions.len(),
        };
        self.sessions.insert(id, record);
    }

    /// Remove a record; returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&SessionRecord> {
        self.sessions.get(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Refresh the last-contact time for a live session; returns false for
    /// unknown ids and creates nothing.
    pub fn touch(&mut self, id: &str, now_ms: i64) -> bool {
        match self.sessions.get_mut(id) {
            Some(record) => {
                record.last_contact_ms = now_ms;
                true
            }
            None => false,
        }
    }

    /// Idempotent upsert: refresh an existing record in place, or create one
    /// under the caller-supplied id. `session_number` survives updates.
    pub fn log_in(&mut self, id: &str, remote_addr: String, now_ms: i64) {
        if let Some(record) = self.sessions.get_mut(id) {
            record.remote_addr = remote_addr;
            record.last_contact_ms = now_ms;
        } else {
            self.insert_new(id.to_string(), remote_addr, now_ms);
        }
    }

    /// Count records heard from within the online window. Full scan per
    /// call; reads are infrequent relative to store size.
    pub fn count_online(&self, now_ms: i64) -> usize {
        self.sessions
            .values()
            .filter(|record| now_ms - record.last_contact_ms < ONLINE_WINDOW_MS)
            .count()
    }
}
