use gateward_core::{AuthError, Principal, SessionId, SessionStore, UserRepository};

/// Session auth - resolves an opaque session identifier to a principal.
pub struct SessionAuthUseCase<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    user_repository: R,
    session_store: S,
}

impl<R, S> SessionAuthUseCase<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    pub fn new(user_repository: R, session_store: S) -> Self {
        Self {
            user_repository,
            session_store,
        }
    }

    /// Execute the session auth use case.
    ///
    /// Suspension is re-checked on every call; a session minted before an
    /// account was blocked does not outlive the block.
    #[tracing::instrument(name = "SessionAuthUseCase::execute", skip_all)]
    pub async fn execute(&self, session: Option<SessionId>) -> Result<Principal, AuthError> {
        let session = session.ok_or(AuthError::NoSession)?;

        let user_id = self
            .session_store
            .lookup(&session)
            .await?
            .ok_or(AuthError::NoSession)?;

        let user = self
            .user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::NoUser)?;

        if user.is_blocked() {
            return Err(AuthError::Suspended(*user.id()));
        }

        Ok(Principal {
            user,
            was_modified: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MemorySessions, MemoryUsers, local_user};

    #[tokio::test]
    async fn bound_session_resolves_to_its_user() {
        let users = MemoryUsers::new();
        let sessions = MemorySessions::new();
        let user = local_user("ada", "ada@example.com", "p");
        users.seed(user.clone()).await;

        let session = SessionId::mint();
        sessions.seed(session.clone(), *user.id()).await;

        let principal = SessionAuthUseCase::new(users, sessions)
            .execute(Some(session))
            .await
            .unwrap();
        assert_eq!(principal.user.id(), user.id());
    }

    #[tokio::test]
    async fn absent_and_unmapped_sessions_are_rejected() {
        let use_case = SessionAuthUseCase::new(MemoryUsers::new(), MemorySessions::new());

        assert_eq!(use_case.execute(None).await.unwrap_err(), AuthError::NoSession);
        assert_eq!(
            use_case
                .execute(Some(SessionId::from_raw("stale-cookie")))
                .await
                .unwrap_err(),
            AuthError::NoSession
        );
    }

    #[tokio::test]
    async fn session_for_a_deleted_user_misses() {
        let sessions = MemorySessions::new();
        let session = SessionId::mint();
        sessions.seed(session.clone(), gateward_core::UserId::new()).await;

        let err = SessionAuthUseCase::new(MemoryUsers::new(), sessions)
            .execute(Some(session))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::NoUser);
    }

    #[tokio::test]
    async fn suspension_is_rechecked_on_session_auth() {
        let users = MemoryUsers::new();
        let sessions = MemorySessions::new();
        let mut user = local_user("ada", "ada@example.com", "p");
        user.set_blocked(true);
        users.seed(user.clone()).await;

        let session = SessionId::mint();
        sessions.seed(session.clone(), *user.id()).await;

        let err = SessionAuthUseCase::new(users, sessions)
            .execute(Some(session))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Suspended(*user.id()));
    }
}
