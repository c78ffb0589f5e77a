//! In-memory fakes shared by the use-case tests. The repository fake
//! enforces the same unique constraints a real repository would, so the
//! race-translation paths are exercised for real.

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::Secret;
use tokio::sync::RwLock;

use gateward_core::{
    CredentialHasher, Email, Notification, Notifier, NotifierError, Password, Provider, SessionId,
    SessionStore, SessionStoreError, UniqueField, User, UserId, UserRepository,
    UserRepositoryError, Username,
};

pub fn secret(raw: &str) -> Secret<String> {
    Secret::from(raw.to_string())
}

pub fn password(raw: &str) -> Password {
    Password::try_from(secret(raw)).unwrap()
}

pub fn local_user(username: &str, email: &str, pw: &str) -> User {
    User::register_local(
        Username::parse(username).unwrap(),
        Email::parse(email).unwrap(),
        &password(pw),
        &CredentialHasher::new(),
    )
    .unwrap()
}

#[derive(Default, Clone)]
pub struct MemoryUsers {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, user: User) {
        self.users.write().await.insert(*user.id(), user);
    }

    pub async fn get(&self, id: &UserId) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    fn conflict(candidate: &User, existing: &User) -> Option<UniqueField> {
        if let (Some(a), Some(b)) = (candidate.local(), existing.local()) {
            if a.email().normalized() == b.email().normalized() {
                return Some(UniqueField::Email);
            }
            if a.username() == b.username() {
                return Some(UniqueField::Username);
            }
        }
        if candidate.api_token().as_str() == existing.api_token().as_str() {
            return Some(UniqueField::ApiToken);
        }
        for identity in candidate.federated_identities() {
            if existing
                .federated_identity(&identity.provider, &identity.external_id)
                .is_some()
            {
                return Some(UniqueField::FederatedId);
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let needle = email.normalized();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.local().is_some_and(|l| l.email().normalized() == needle))
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.local().is_some_and(|l| l.username() == username))
            .cloned())
    }

    async fn find_by_federated(
        &self,
        provider: &Provider,
        external_id: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.federated_identity(provider, external_id).is_some())
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, UserRepositoryError> {
        let mut users = self.users.write().await;
        for existing in users.values() {
            if let Some(field) = Self::conflict(&user, existing) {
                return Err(UserRepositoryError::UniqueViolation(field));
            }
        }
        users.insert(*user.id(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if !users.contains_key(user.id()) {
            return Err(UserRepositoryError::Unavailable("user vanished".into()));
        }
        for (id, existing) in users.iter() {
            if id != user.id() {
                if let Some(field) = Self::conflict(user, existing) {
                    return Err(UserRepositoryError::UniqueViolation(field));
                }
            }
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemorySessions {
    sessions: Arc<RwLock<HashMap<SessionId, UserId>>>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn bound(&self, session: &SessionId) -> Option<UserId> {
        self.sessions.read().await.get(session).copied()
    }

    pub async fn seed(&self, session: SessionId, user: UserId) {
        self.sessions.write().await.insert(session, user);
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessions {
    async fn bind(&self, session: SessionId, user: UserId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.insert(session, user);
        Ok(())
    }

    async fn lookup(&self, session: &SessionId) -> Result<Option<UserId>, SessionStoreError> {
        Ok(self.sessions.read().await.get(session).copied())
    }

    async fn invalidate(&self, session: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(session);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentNotification {
    pub recipient_name: String,
    pub recipient_email: String,
    pub kind: &'static str,
}

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    pub sent: Arc<RwLock<Vec<SentNotification>>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn kinds(&self) -> Vec<&'static str> {
        self.sent.read().await.iter().map(|s| s.kind).collect()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        recipient_name: &str,
        recipient_email: &Email,
        notification: Notification,
    ) -> Result<(), NotifierError> {
        if self.fail {
            return Err(NotifierError::Unavailable("simulated outage".into()));
        }
        self.sent.write().await.push(SentNotification {
            recipient_name: recipient_name.to_owned(),
            recipient_email: recipient_email.as_str().to_owned(),
            kind: notification.kind(),
        });
        Ok(())
    }
}

/// Let fire-and-forget notification tasks run to completion on the
/// current-thread test runtime.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
