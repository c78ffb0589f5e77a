use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{session_id::SessionId, user_id::UserId};

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Server-side mapping from opaque session identifiers to user ids.
/// Expiry and rotation policy belong to the store, not to this core.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn bind(&self, session: SessionId, user: UserId) -> Result<(), SessionStoreError>;

    async fn lookup(&self, session: &SessionId) -> Result<Option<UserId>, SessionStoreError>;

    async fn invalidate(&self, session: &SessionId) -> Result<(), SessionStoreError>;
}
