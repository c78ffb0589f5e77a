use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email, federated::Provider, user::User, user_id::UserId, username::Username,
};

/// The fields the repository enforces uniqueness on. Those constraints are
/// authoritative: pre-checks in the engines are an optimization for
/// friendlier errors, never the sole correctness mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Username,
    ApiToken,
    FederatedId,
}

// UserRepository port trait and errors
#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("unique constraint violated on {0:?}")]
    UniqueViolation(UniqueField),
    #[error("user repository unavailable: {0}")]
    Unavailable(String),
}

impl PartialEq for UserRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UniqueViolation(a), Self::UniqueViolation(b)) => a == b,
            (Self::Unavailable(_), Self::Unavailable(_)) => true,
            _ => false,
        }
    }
}

/// External collaborator holding the user records. Implementations must be
/// concurrency-safe; callers never assume a check-then-act sequence against
/// this trait is atomic.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Case-insensitive match on the local email binding.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;

    /// Case-sensitive match on the local username binding.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_federated(
        &self,
        provider: &Provider,
        external_id: &str,
    ) -> Result<Option<User>, UserRepositoryError>;

    async fn insert(&self, user: User) -> Result<User, UserRepositoryError>;

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;
}
