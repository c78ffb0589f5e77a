use gateward_core::{
    AuthError, FederatedIdentity, Notification, Notifier, SessionId, SessionStore, UniqueField,
    User, UserRepository, UserRepositoryError,
};

use super::{NotificationSettings, dispatch_notification};

/// Outcome of a federated login: the (possibly just created) user and the
/// freshly minted session.
#[derive(Debug)]
pub struct FederatedLogin {
    pub user: User,
    pub session: SessionId,
    pub created: bool,
}

/// Federated login/link - logs in an externally verified identity,
/// creating the local account on first contact.
///
/// The provider's redirect/token-exchange dance happens out of process; by
/// the time this use case runs, the identity tuple is trusted as verified.
pub struct FederatedLoginUseCase<R, S, N>
where
    R: UserRepository,
    S: SessionStore,
    N: Notifier + Clone + Send + Sync + 'static,
{
    user_repository: R,
    session_store: S,
    notifier: N,
    settings: NotificationSettings,
}

impl<R, S, N> FederatedLoginUseCase<R, S, N>
where
    R: UserRepository,
    S: SessionStore,
    N: Notifier + Clone + Send + Sync + 'static,
{
    pub fn new(
        user_repository: R,
        session_store: S,
        notifier: N,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            user_repository,
            session_store,
            notifier,
            settings,
        }
    }

    /// Execute the federated login use case, idempotently.
    ///
    /// Concurrent first-time logins by the same external identity race on
    /// the insert; the repository's unique constraint on
    /// `(provider, external_id)` decides the winner, and the loser reloads
    /// the winner's record and proceeds as a plain login.
    #[tracing::instrument(
        name = "FederatedLoginUseCase::execute",
        skip_all,
        fields(provider = %identity.provider)
    )]
    pub async fn execute(&self, identity: FederatedIdentity) -> Result<FederatedLogin, AuthError> {
        let existing = self
            .user_repository
            .find_by_federated(&identity.provider, &identity.external_id)
            .await?;

        let (user, created) = match existing {
            Some(user) => (self.login_existing(user).await?, false),
            None => self.create_or_adopt(identity).await?,
        };

        let session = SessionId::mint();
        self.session_store.bind(session.clone(), *user.id()).await?;

        Ok(FederatedLogin {
            user,
            session,
            created,
        })
    }

    async fn login_existing(&self, mut user: User) -> Result<User, AuthError> {
        if user.is_blocked() {
            return Err(AuthError::Suspended(*user.id()));
        }
        user.touch_login();
        self.user_repository.update(&user).await?;
        Ok(user)
    }

    async fn create_or_adopt(
        &self,
        identity: FederatedIdentity,
    ) -> Result<(User, bool), AuthError> {
        let provider = identity.provider.clone();
        let external_id = identity.external_id.clone();

        match self
            .user_repository
            .insert(User::register_federated(identity))
            .await
        {
            Ok(user) => {
                if self.settings.send_welcome {
                    if let Some(email) = user.notification_email() {
                        dispatch_notification(
                            self.notifier.clone(),
                            user.display_name().to_owned(),
                            email.clone(),
                            Notification::Welcome,
                        );
                    }
                }
                Ok((user, true))
            }
            // Someone else just created the binding; reload theirs and
            // proceed as a login.
            Err(UserRepositoryError::UniqueViolation(UniqueField::FederatedId)) => {
                let user = self
                    .user_repository
                    .find_by_federated(&provider, &external_id)
                    .await?
                    .ok_or_else(|| {
                        AuthError::upstream("federated binding vanished after insert conflict")
                    })?;
                Ok((self.login_existing(user).await?, false))
            }
            Err(error) => Err(error.into()),
        }
    }
}
