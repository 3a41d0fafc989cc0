/// Session store port.
///
/// Hands out per-session handles guarded by their own async lock, so a
/// turn holds exclusive access to its session for the whole
/// read-modify-write — concurrent requests against the same session id
/// queue instead of racing on the turn counter and stage state.
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::models::Session;

/// Shared, individually locked session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Port trait for session storage.
///
/// Implementations decide retention; the in-memory store keeps every
/// session for process lifetime.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the handle for `session_id`, creating the session on
    /// first reference.
    async fn checkout(&self, session_id: &str, user_id: &str) -> SessionHandle;

    /// Number of sessions currently held.
    async fn len(&self) -> usize;
}
