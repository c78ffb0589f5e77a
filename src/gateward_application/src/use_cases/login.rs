use secrecy::Secret;

use gateward_core::{
    AuthError, CredentialHasher, Email, Password, SessionId, SessionStore, User, UserRepository,
    Username, error::missing,
};

/// A successful local login: the user plus the freshly minted session.
#[derive(Debug)]
pub struct LocalLogin {
    pub user: User,
    pub session: SessionId,
}

/// Local password login. The identifier may be a username or an email
/// address; which one is decided by its format.
pub struct LoginUseCase<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    user_repository: R,
    session_store: S,
    hasher: CredentialHasher,
}

impl<R, S> LoginUseCase<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    pub fn new(user_repository: R, session_store: S, hasher: CredentialHasher) -> Self {
        Self {
            user_repository,
            session_store,
            hasher,
        }
    }

    /// Execute the local login use case.
    ///
    /// "No such identifier" and "wrong password" are reported as the same
    /// undifferentiated denial. Suspension is the one exception: it is
    /// account-level policy and is reported distinctly, before the
    /// password is even compared.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        identifier: Option<String>,
        password: Option<Secret<String>>,
    ) -> Result<LocalLogin, AuthError> {
        let (Some(identifier), Some(password)) = (identifier, password) else {
            return Err(AuthError::MissingCredential(missing::LOGIN_FIELDS));
        };
        let password = Password::try_from(password)
            .map_err(|_| AuthError::MissingCredential(missing::LOGIN_FIELDS))?;

        // Identifiers that look like an email address match the email
        // binding (case-insensitively); everything else matches the
        // username binding exactly.
        let candidate = if identifier.contains('@') && Email::is_valid_syntax(&identifier) {
            let email = Email::parse(&identifier).map_err(|_| AuthError::InvalidCredentials)?;
            self.user_repository.find_by_email(&email).await?
        } else {
            let username =
                Username::parse(&identifier).map_err(|_| AuthError::InvalidCredentials)?;
            self.user_repository.find_by_username(&username).await?
        };

        let user = candidate.ok_or(AuthError::InvalidCredentials)?;

        if user.is_blocked() {
            return Err(AuthError::Suspended(*user.id()));
        }
        if !user.verify_password(&self.hasher, &password) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = SessionId::mint();
        self.session_store.bind(session.clone(), *user.id()).await?;

        Ok(LocalLogin { user, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MemorySessions, MemoryUsers, local_user, secret};

    fn use_case(users: MemoryUsers, sessions: MemorySessions) -> LoginUseCase<MemoryUsers, MemorySessions> {
        LoginUseCase::new(users, sessions, CredentialHasher::new())
    }

    #[tokio::test]
    async fn login_by_username_mints_a_session() {
        let users = MemoryUsers::new();
        let sessions = MemorySessions::new();
        let user = local_user("ada", "ada@example.com", "p");
        users.seed(user.clone()).await;

        let login = use_case(users, sessions.clone())
            .execute(Some("ada".into()), Some(secret("p")))
            .await
            .unwrap();

        assert_eq!(login.user.id(), user.id());
        assert_eq!(sessions.bound(&login.session).await, Some(*user.id()));
    }

    #[tokio::test]
    async fn email_identifier_matches_case_insensitively() {
        let users = MemoryUsers::new();
        let user = local_user("ada", "ada@example.com", "p");
        users.seed(user.clone()).await;

        let login = use_case(users, MemorySessions::new())
            .execute(Some("ada@EXAMPLE.com".into()), Some(secret("p")))
            .await
            .unwrap();
        assert_eq!(login.user.id(), user.id());
    }

    #[tokio::test]
    async fn username_identifier_is_case_sensitive() {
        let users = MemoryUsers::new();
        users.seed(local_user("ada", "ada@example.com", "p")).await;

        let err = use_case(users, MemorySessions::new())
            .execute(Some("Ada".into()), Some(secret("p")))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn unknown_identifier_and_wrong_password_are_indistinguishable() {
        let users = MemoryUsers::new();
        users.seed(local_user("ada", "ada@example.com", "p")).await;
        let use_case = use_case(users, MemorySessions::new());

        let unknown = use_case
            .execute(Some("nobody".into()), Some(secret("p")))
            .await
            .unwrap_err();
        let wrong = use_case
            .execute(Some("ada".into()), Some(secret("wrong")))
            .await
            .unwrap_err();

        assert_eq!(unknown, AuthError::InvalidCredentials);
        assert_eq!(wrong, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_any_lookup() {
        let use_case = use_case(MemoryUsers::new(), MemorySessions::new());

        for (identifier, password) in [
            (None, Some(secret("p"))),
            (Some("ada".to_string()), None),
            (Some("ada".to_string()), Some(secret(""))),
        ] {
            let err = use_case.execute(identifier, password).await.unwrap_err();
            assert_eq!(err.code(), "MISSING_CREDENTIAL");
        }
    }

    #[tokio::test]
    async fn blocked_user_is_reported_suspended_before_password_check() {
        let users = MemoryUsers::new();
        let mut user = local_user("ada", "ada@example.com", "p");
        user.set_blocked(true);
        users.seed(user.clone()).await;
        let use_case = use_case(users, MemorySessions::new());

        // even a wrong password reports the suspension, not the mismatch
        let err = use_case
            .execute(Some("ada".into()), Some(secret("wrong")))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Suspended(*user.id()));
    }
}
