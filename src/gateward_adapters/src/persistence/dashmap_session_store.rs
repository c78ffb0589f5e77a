use std::sync::Arc;

use dashmap::DashMap;

use gateward_core::{SessionId, SessionStore, SessionStoreError, UserId};

/// In-memory session store over a concurrent map.
#[derive(Default, Clone)]
pub struct DashMapSessionStore {
    sessions: Arc<DashMap<SessionId, UserId>>,
}

impl DashMapSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for DashMapSessionStore {
    async fn bind(&self, session: SessionId, user: UserId) -> Result<(), SessionStoreError> {
        self.sessions.insert(session, user);
        Ok(())
    }

    async fn lookup(&self, session: &SessionId) -> Result<Option<UserId>, SessionStoreError> {
        Ok(self.sessions.get(session).map(|entry| *entry.value()))
    }

    async fn invalidate(&self, session: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.remove(session);
        Ok(())
    }
}
