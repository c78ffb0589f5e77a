use gateward_core::{
    AuthError, Principal, SessionId, SessionStore, UserRepository, error::missing,
};

/// Credentials presented for bearer-token authentication, either from the
/// `x-api-user`/`x-api-key` headers or from query parameters (the URL
/// variant used where header injection is impractical). Semantics are
/// identical for both sources.
#[derive(Debug, Clone, Default)]
pub struct TokenCredentials {
    pub user_id: Option<String>,
    pub token: Option<String>,
    /// The client's cached user version, when it supplied one.
    pub client_version: Option<u64>,
}

/// Token auth - stateless per request, resolves a (user id, bearer token)
/// pair to a principal.
pub struct TokenAuthUseCase<R, S>
where
    R: UserRepository,
    S: SessionStore,
{
    user_repository: R,
    session_store: S,
}

impl<R, S> TokenAuthUseCase<R, S>
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

    /// Execute the token auth use case.
    ///
    /// A lookup miss and a token mismatch are indistinguishable to the
    /// caller (`NoUser` for both). When a session identifier accompanies
    /// the request the resolved user id is bound to it, but that binding
    /// is advisory; failures are logged and swallowed.
    #[tracing::instrument(name = "TokenAuthUseCase::execute", skip(self, credentials, session))]
    pub async fn execute(
        &self,
        credentials: TokenCredentials,
        session: Option<SessionId>,
    ) -> Result<Principal, AuthError> {
        let (Some(user_id), Some(token)) = (credentials.user_id, credentials.token) else {
            return Err(AuthError::MissingCredential(missing::TOKEN_OR_UID));
        };

        // A malformed id cannot match any record; same denial as a miss.
        let user_id = user_id.parse().map_err(|_| AuthError::NoUser)?;

        let user = self
            .user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::NoUser)?;

        if !user.token_matches(&token) {
            return Err(AuthError::NoUser);
        }
        if user.is_blocked() {
            return Err(AuthError::Suspended(*user.id()));
        }

        let was_modified = user.was_modified_since(credentials.client_version);

        if let Some(session) = session {
            if let Err(error) = self.session_store.bind(session, *user.id()).await {
                tracing::debug!(%error, "advisory session bind failed");
            }
        }

        Ok(Principal { user, was_modified })
    }
}
