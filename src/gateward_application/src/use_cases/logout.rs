use gateward_core::{AuthError, SessionId, SessionStore};

/// Logout - destroys the server-side session binding.
pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    session_store: S,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: S) -> Self {
        Self { session_store }
    }

    /// Execute the logout use case. Logging out without a session is a
    /// no-op, not an error.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, session: Option<SessionId>) -> Result<(), AuthError> {
        if let Some(session) = session {
            self.session_store.invalidate(&session).await?;
        }
        Ok(())
    }
}
