//! Server-side session cache with TTL and bounded size.
//!
//! Entries live in insertion order: the front of the deque is always the
//! oldest entry, which is the one evicted when the cache is full. Updating
//! a live entry keeps both its position and its original timestamp, so the
//! list stays ordered by timestamp as well.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{TlsSession, MASTER_SECRET_LEN};

/// Default entry lifetime: one day, in seconds.
pub const DEFAULT_TIMEOUT: u64 = 86400;

/// Default maximum number of cached sessions.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

struct CacheEntry {
    timestamp: u64,
    session: TlsSession,
}

/// A session cache keyed by session identifier.
pub struct SessionCache {
    timeout: u64,
    max_entries: usize,
    entries: VecDeque<CacheEntry>,
}

impl SessionCache {
    /// Create a cache with the default timeout and size cap.
    pub fn new() -> Self {
        SessionCache {
            timeout: DEFAULT_TIMEOUT,
            max_entries: DEFAULT_MAX_ENTRIES,
            entries: VecDeque::new(),
        }
    }

    /// Set the entry lifetime in seconds. Zero disables expiry.
    pub fn set_timeout(&mut self, timeout: u64) {
        self.timeout = timeout;
    }

    /// Set the maximum number of entries. Zero disables the cap.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max;
    }

    /// Number of cached sessions, expired entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the master secret for a session.
    ///
    /// Misses on an unknown id, an expired entry, or when the ciphersuite
    /// or compression of the stored session differ from the query.
    pub fn get(&self, session: &TlsSession) -> Option<[u8; MASTER_SECRET_LEN]> {
        self.get_at(session, now())
    }

    /// Insert or update a session. The peer certificate is never stored.
    pub fn set(&mut self, session: &TlsSession) {
        self.set_at(session, now());
    }

    fn get_at(&self, session: &TlsSession, now: u64) -> Option<[u8; MASTER_SECRET_LEN]> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.session.id == session.id)?;

        if self.timeout != 0 && now.saturating_sub(entry.timestamp) > self.timeout {
            return None;
        }

        if session.ciphersuite != entry.session.ciphersuite
            || session.compression != entry.session.compression
        {
            return None;
        }

        Some(entry.session.master)
    }

    fn set_at(&mut self, session: &TlsSession, now: u64) {
        let found = self.entries.iter().position(|e| e.session.id == session.id);

        match found {
            None => {
                // Fresh id: evict the oldest entry when the cap is reached,
                // then append at the tail.
                if self.max_entries > 0 && self.entries.len() >= self.max_entries {
                    self.entries.pop_front();
                }
                self.entries.push_back(CacheEntry {
                    timestamp: now,
                    session: strip_peer_cert(session),
                });
            }
            Some(idx) => {
                let live = self.timeout == 0
                    || now.saturating_sub(self.entries[idx].timestamp) <= self.timeout;

                if live {
                    // Overwrite in place; position and timestamp stay, so
                    // the list remains in timestamp order.
                    self.entries[idx].session = strip_peer_cert(session);
                } else if let Some(mut entry) = self.entries.remove(idx) {
                    // Expired: refresh the timestamp and move to the tail.
                    // The entry is re-keyed by its own session id.
                    entry.timestamp = now;
                    entry.session = strip_peer_cert(session);
                    self.entries.push_back(entry);
                }
            }
        }
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_peer_cert(session: &TlsSession) -> TlsSession {
    let mut stored = session.clone();
    stored.peer_cert = None;
    stored
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
