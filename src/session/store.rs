//! In-memory session store.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::observability::metrics;

/// Identifier of a session, `<host>-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Server-side state of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Creation time, milliseconds since the Unix epoch.
    pub created: u64,
    /// Number of requests that resolved to this session.
    pub call_counter: u64,
}

impl Session {
    fn new() -> Self {
        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            created,
            call_counter: 0,
        }
    }
}

/// A thread-safe, process-wide session map.
///
/// Cloning is cheap and every clone shares the same sessions and id counter.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, Session>>,
    next_id: Arc<AtomicU64>,
    host: Arc<str>,
}

impl SessionStore {
    /// Create an empty store minting ids prefixed with `host`.
    pub fn new(host: &str) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(0)),
            host: Arc::from(host),
        }
    }

    /// Look up a session by id.
    pub fn resolve(&self, id: &str) -> Option<(SessionId, Session)> {
        self.sessions
            .get(id)
            .map(|r| (r.key().clone(), r.value().clone()))
    }

    /// Mint a new id and insert a fresh session under it.
    pub fn create(&self) -> (SessionId, Session) {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let id = SessionId(format!("{}-{}", self.host, n));
        let session = Session::new();

        self.sessions.insert(id.clone(), session.clone());
        metrics::record_session_created(self.sessions.len());
        tracing::debug!(session_id = %id, "Session created");

        (id, session)
    }

    /// Increment the call counter and return a snapshot of the session.
    ///
    /// The increment happens under the shard lock, so concurrent requests on
    /// the same session never lose an update.
    pub fn record_call(&self, id: &SessionId) -> Option<Session> {
        self.sessions.get_mut(id.as_str()).map(|mut entry| {
            entry.call_counter += 1;
            entry.value().clone()
        })
    }

    /// Number of sessions held.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
