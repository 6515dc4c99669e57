//! Per-client session storage keyed by an opaque session id
use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::game::Session;

/// Opaque per-client identifier, carried in the session cookie
pub type SessionId = String;

pub fn new_session_id() -> SessionId {
    Uuid::new_v4().to_string()
}

/// Get/set storage for game sessions - the HTTP layer owns the lifecycle
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current session for `id`, if one exists and has not expired
    async fn load(&self, id: &str) -> Option<Session>;

    /// Create or replace the session for `id`
    async fn save(&self, id: &str, session: Session);

    /// Destroy the session for `id`, returning it if it existed
    async fn remove(&self, id: &str) -> Option<Session>;
}

#[derive(Debug, Clone)]
struct StoredSession {
    session: Session,
    touched: Instant,
}

/// In-memory store with idle expiry.
///
/// Expired entries are dropped lazily: on lookup, and in a sweep whenever a
/// session is saved.
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, StoredSession>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn expired(&self, entry: &StoredSession, now: Instant) -> bool {
        now.duration_since(entry.touched) > self.ttl
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &str) -> Option<Session> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let expired = self.expired(sessions.get(id)?, now);
        if expired {
            sessions.remove(id);
            tracing::debug!(session = %id, "session expired");
            return None;
        }

        let entry = sessions.get_mut(id)?;
        entry.touched = now;
        Some(entry.session.clone())
    }

    async fn save(&self, id: &str, session: Session) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.expired(entry, now));
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "purged expired sessions");
        }
        sessions.insert(
            id.to_string(),
            StoredSession {
                session,
                touched: now,
            },
        );
    }

    async fn remove(&self, id: &str) -> Option<Session> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|entry| entry.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl MemorySessionStore {
        async fn len(&self) -> usize {
            self.sessions.read().await.len()
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let mut session = Session::with_secret(42);
        session.record_guess(10).unwrap();

        store.save("a", session.clone()).await;
        assert_eq!(store.load("a").await, Some(session));
        assert_eq!(store.load("b").await, None);
    }

    #[tokio::test]
    async fn remove_destroys_session() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        store.save("a", Session::with_secret(1)).await;
        assert!(store.remove("a").await.is_some());
        assert!(store.load("a").await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn expired_sessions_are_dropped() {
        let store = MemorySessionStore::new(Duration::ZERO);
        store.save("a", Session::with_secret(1)).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(store.load("a").await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }
}
