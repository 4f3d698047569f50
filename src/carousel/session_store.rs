//! Per-user session storage
//!
//! Handlers never keep session state themselves: every update loads the
//! session of its sender, applies one transition and stores it back.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use super::session::CollectionSession;

/// Platform user id the session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserKey(pub u64);

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the user's session, or a fresh idle one.
    async fn load(&self, user: UserKey) -> Result<CollectionSession, StoreError>;

    async fn save(&self, user: UserKey, session: CollectionSession) -> Result<(), StoreError>;
}

/// Loads the session, applies `f` and saves the result.
pub async fn update_session<S, F, R>(store: &S, user: UserKey, f: F) -> Result<R, StoreError>
where
    S: SessionStore + ?Sized,
    F: FnOnce(&mut CollectionSession) -> R + Send,
{
    let mut session = store.load(user).await?;
    let result = f(&mut session);
    store.save(user, session).await?;
    Ok(result)
}

/// Process-memory session store. Sessions are lost on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<UserKey, CollectionSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user: UserKey) -> Result<CollectionSession, StoreError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(&user).cloned().unwrap_or_default())
    }

    async fn save(&self, user: UserKey, session: CollectionSession) -> Result<(), StoreError> {
        self.sessions.lock().await.insert(user, session);
        Ok(())
    }
}
