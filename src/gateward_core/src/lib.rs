pub mod domain;
pub mod error;
pub mod hashing;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    api_token::ApiToken,
    email::{Email, EmailError},
    federated::{FederatedIdentity, Provider},
    password::{Password, PasswordError},
    principal::Principal,
    session_id::SessionId,
    user::{LocalCredentials, User, UserError},
    user_id::UserId,
    username::{Username, UsernameError},
};

pub use error::AuthError;

pub use hashing::{CredentialHasher, HasherError, PasswordDigest, Salt, constant_time_eq};

pub use ports::{
    notifier::{Notification, Notifier, NotifierError},
    repositories::{UniqueField, UserRepository, UserRepositoryError},
    session_store::{SessionStore, SessionStoreError},
};
