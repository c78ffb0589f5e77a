use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::hashing::{CredentialHasher, HasherError, PasswordDigest, Salt};

use super::{
    api_token::ApiToken,
    email::Email,
    federated::{FederatedIdentity, Provider},
    password::Password,
    user_id::UserId,
    username::Username,
};

/// The username/email/password binding of a locally registered account.
#[derive(Debug, Clone)]
pub struct LocalCredentials {
    username: Username,
    email: Email,
    salt: Salt,
    password_digest: PasswordDigest,
}

impl LocalCredentials {
    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("account has no local credentials")]
    NoLocalCredentials,
    #[error(transparent)]
    Hasher(#[from] HasherError),
}

/// The account aggregate.
///
/// # Invariants
/// - A user carries at least one credential binding (local or federated)
///   from creation onward.
/// - `api_token` is minted exactly once, at creation, and never rotated.
/// - `version` increases on every mutation; clients use it to detect that
///   their cached view is stale.
/// - A blocked user must be rejected by every authentication strategy.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    version: u64,
    api_token: ApiToken,
    blocked: bool,
    local: Option<LocalCredentials>,
    federated: Vec<FederatedIdentity>,
    created_at: DateTime<Utc>,
    last_logged_in: DateTime<Utc>,
}

impl User {
    /// Create a locally registered account with a fresh salt, digest and
    /// api token. Both timestamps are set to now.
    pub fn register_local(
        username: Username,
        email: Email,
        password: &Password,
        hasher: &CredentialHasher,
    ) -> Result<Self, UserError> {
        let salt = Salt::generate();
        let password_digest = hasher.digest(password, &salt)?;
        let now = Utc::now();

        Ok(Self {
            id: UserId::new(),
            version: 0,
            api_token: ApiToken::mint(),
            blocked: false,
            local: Some(LocalCredentials {
                username,
                email,
                salt,
                password_digest,
            }),
            federated: Vec::new(),
            created_at: now,
            last_logged_in: now,
        })
    }

    /// Create an account bound only to a federated identity. No local
    /// credentials; the api token is still minted up front.
    pub fn register_federated(identity: FederatedIdentity) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            version: 0,
            api_token: ApiToken::mint(),
            blocked: false,
            local: None,
            federated: vec![identity],
            created_at: now,
            last_logged_in: now,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn local(&self) -> Option<&LocalCredentials> {
        self.local.as_ref()
    }

    pub fn federated_identities(&self) -> &[FederatedIdentity] {
        &self.federated
    }

    pub fn federated_identity(
        &self,
        provider: &Provider,
        external_id: &str,
    ) -> Option<&FederatedIdentity> {
        self.federated
            .iter()
            .find(|f| &f.provider == provider && f.external_id == external_id)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_logged_in(&self) -> DateTime<Utc> {
        self.last_logged_in
    }

    /// Best available human name for notifications: local username, then
    /// federated display name, then the email address itself.
    pub fn display_name(&self) -> &str {
        if let Some(local) = &self.local {
            return local.username.as_str();
        }
        if let Some(name) = self.federated.iter().find_map(|f| f.display_name.as_deref()) {
            return name;
        }
        self.notification_email()
            .map(Email::as_str)
            .unwrap_or_default()
    }

    /// The address notifications go to: the local email, or the first
    /// federated identity that carries one.
    pub fn notification_email(&self) -> Option<&Email> {
        self.local
            .as_ref()
            .map(LocalCredentials::email)
            .or_else(|| self.federated.iter().find_map(|f| f.email.as_ref()))
    }

    /// Full-value comparison of a presented bearer token against the stored
    /// one. Never short-circuits.
    pub fn token_matches(&self, presented: &str) -> bool {
        self.api_token.matches(presented)
    }

    /// Check a password candidate against the stored digest, re-hashing
    /// with the stored salt. A user without local credentials matches
    /// nothing.
    pub fn verify_password(&self, hasher: &CredentialHasher, candidate: &Password) -> bool {
        match &self.local {
            Some(local) => hasher.verify(candidate, &local.salt, &local.password_digest),
            None => false,
        }
    }

    /// Whether a client holding `client_version` is behind this record.
    /// An absent client version always counts as stale.
    pub fn was_modified_since(&self, client_version: Option<u64>) -> bool {
        match client_version {
            Some(v) => v != self.version,
            None => true,
        }
    }

    /// Replace the password with a fresh salt (reset flow).
    pub fn reset_password(
        &mut self,
        hasher: &CredentialHasher,
        new_password: &Password,
    ) -> Result<(), UserError> {
        let local = self.local.as_mut().ok_or(UserError::NoLocalCredentials)?;
        let salt = Salt::generate();
        local.password_digest = hasher.digest(new_password, &salt)?;
        local.salt = salt;
        self.version += 1;
        Ok(())
    }

    /// Replace the password, keeping the existing salt (change flow).
    pub fn change_password(
        &mut self,
        hasher: &CredentialHasher,
        new_password: &Password,
    ) -> Result<(), UserError> {
        let local = self.local.as_mut().ok_or(UserError::NoLocalCredentials)?;
        local.password_digest = hasher.digest(new_password, &local.salt)?;
        self.version += 1;
        Ok(())
    }

    pub fn change_username(&mut self, new_username: Username) -> Result<(), UserError> {
        let local = self.local.as_mut().ok_or(UserError::NoLocalCredentials)?;
        local.username = new_username;
        self.version += 1;
        Ok(())
    }

    /// Record a successful login.
    pub fn touch_login(&mut self) {
        self.last_logged_in = Utc::now();
        self.version += 1;
    }

    /// Operator-side suspension flag. Authentication never calls this; it
    /// only reads the flag.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
        self.version += 1;
    }
}
