/// In-memory session store.
///
/// A process-wide map of session id -> individually locked session.
/// The outer map lock is held only long enough to fetch or insert a
/// handle; the per-session lock is what serializes whole turns. Sessions
/// are never evicted — the map grows for the lifetime of the process,
/// which is the retention decision recorded in DESIGN.md.
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::models::Session;
use crate::domain::ports::{SessionHandle, SessionStore};

pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn checkout(&self, session_id: &str, user_id: &str) -> SessionHandle {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(session_id, user_id))))
            .clone()
    }

    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_checkout_creates_on_first_reference() {
        let store = MemorySessionStore::new();
        assert_eq!(store.len().await, 0);

        let handle = store.checkout("s1", "coach-1").await;
        assert_eq!(store.len().await, 1);
        assert_eq!(handle.lock().await.id, "s1");
    }

    #[tokio::test]
    async fn test_checkout_returns_same_session() {
        let store = MemorySessionStore::new();
        let first = store.checkout("s1", "coach-1").await;
        first.lock().await.turns = 5;

        let second = store.checkout("s1", "coach-1").await;
        assert_eq!(second.lock().await.turns, 5);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_same_session_turns_serialize() {
        let store = Arc::new(MemorySessionStore::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let handle = store.checkout("s1", "coach-1").await;
                let mut session = handle.lock().await;
                // Read-modify-write under the per-session lock.
                let turns = session.turns;
                tokio::task::yield_now().await;
                session.turns = turns + 1;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let handle = store.checkout("s1", "coach-1").await;
        assert_eq!(handle.lock().await.turns, 8);
    }
}
