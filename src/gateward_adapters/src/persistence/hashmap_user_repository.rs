use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gateward_core::{
    Email, Provider, UniqueField, User, UserId, UserRepository, UserRepositoryError, Username,
};

/// In-memory user repository. Enforces the same field-level unique
/// constraints a backing database would (email case-insensitively,
/// username exactly, api token, federated binding), which makes it the
/// authoritative guard against check-then-act races just like a real
/// repository.
#[derive(Default, Clone)]
pub struct HashMapUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl HashMapUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
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
impl UserRepository for HashMapUserRepository {
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
            return Err(UserRepositoryError::Unavailable(
                "cannot update a user that was never inserted".into(),
            ));
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

#[cfg(test)]
mod tests {
    use super::*;
    use gateward_core::{CredentialHasher, FederatedIdentity, Password};
    use secrecy::Secret;

    fn local_user(username: &str, email: &str) -> User {
        User::register_local(
            Username::parse(username).unwrap(),
            Email::parse(email).unwrap(),
            &Password::try_from(Secret::from("p".to_string())).unwrap(),
            &CredentialHasher::new(),
        )
        .unwrap()
    }

    fn federated_user(external_id: &str) -> User {
        User::register_federated(FederatedIdentity {
            provider: Provider::parse("facebook").unwrap(),
            external_id: external_id.into(),
            display_name: None,
            email: None,
        })
    }

    #[tokio::test]
    async fn insert_then_find_by_each_key() {
        let repo = HashMapUserRepository::new();
        let user = repo.insert(local_user("ada", "ada@example.com")).await.unwrap();

        assert!(repo.find_by_id(user.id()).await.unwrap().is_some());
        assert!(
            repo.find_by_email(&Email::parse("Ada@EXAMPLE.com").unwrap())
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.find_by_username(&Username::parse("ada").unwrap())
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.find_by_username(&Username::parse("Ada").unwrap())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn email_uniqueness_is_case_insensitive() {
        let repo = HashMapUserRepository::new();
        repo.insert(local_user("ada", "ada@example.com")).await.unwrap();

        let err = repo
            .insert(local_user("lovelace", "ADA@example.COM"))
            .await
            .unwrap_err();
        assert_eq!(err, UserRepositoryError::UniqueViolation(UniqueField::Email));
    }

    #[tokio::test]
    async fn username_uniqueness_is_exact() {
        let repo = HashMapUserRepository::new();
        repo.insert(local_user("ada", "ada@example.com")).await.unwrap();

        let err = repo
            .insert(local_user("ada", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            UserRepositoryError::UniqueViolation(UniqueField::Username)
        );

        // different case, different username
        assert!(repo.insert(local_user("Ada", "third@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn federated_binding_is_unique_per_provider() {
        let repo = HashMapUserRepository::new();
        repo.insert(federated_user("42")).await.unwrap();

        let err = repo.insert(federated_user("42")).await.unwrap_err();
        assert_eq!(
            err,
            UserRepositoryError::UniqueViolation(UniqueField::FederatedId)
        );

        assert!(repo.insert(federated_user("43")).await.is_ok());
    }

    #[tokio::test]
    async fn update_rejects_stealing_a_taken_username() {
        let repo = HashMapUserRepository::new();
        let mut user = repo.insert(local_user("ada", "ada@example.com")).await.unwrap();
        repo.insert(local_user("lovelace", "l@example.com")).await.unwrap();

        user.change_username(Username::parse("lovelace").unwrap())
            .unwrap();
        let err = repo.update(&user).await.unwrap_err();
        assert_eq!(
            err,
            UserRepositoryError::UniqueViolation(UniqueField::Username)
        );
    }

    #[tokio::test]
    async fn update_of_unknown_user_is_unavailable() {
        let repo = HashMapUserRepository::new();
        let err = repo.update(&local_user("ada", "ada@example.com")).await.unwrap_err();
        assert!(matches!(err, UserRepositoryError::Unavailable(_)));
    }
}
