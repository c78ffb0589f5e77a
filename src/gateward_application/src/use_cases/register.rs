use secrecy::{ExposeSecret, Secret};

use gateward_core::{
    AuthError, CredentialHasher, Email, Notification, Notifier, Password, User, UserRepository,
    Username, error::missing,
};

use super::{NotificationSettings, dispatch_notification};

/// Raw registration input, before any validation.
#[derive(Debug, Default)]
pub struct Registration {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
    pub confirm_password: Option<Secret<String>>,
}

/// Local registration - creates a new account with uniqueness enforcement.
pub struct RegisterUseCase<R, N>
where
    R: UserRepository,
    N: Notifier + Clone + Send + Sync + 'static,
{
    user_repository: R,
    notifier: N,
    hasher: CredentialHasher,
    settings: NotificationSettings,
}

impl<R, N> RegisterUseCase<R, N>
where
    R: UserRepository,
    N: Notifier + Clone + Send + Sync + 'static,
{
    pub fn new(
        user_repository: R,
        notifier: N,
        hasher: CredentialHasher,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            user_repository,
            notifier,
            hasher,
            settings,
        }
    }

    /// Execute the registration use case, returning the persisted user
    /// (including its freshly minted api token).
    ///
    /// The existence pre-checks only buy a friendlier error; the
    /// repository's unique constraints are the authoritative guard, and a
    /// constraint violation surfacing after the pre-checks passed is
    /// reported as the same `EmailTaken`/`UsernameTaken` denial. The
    /// welcome notification goes out strictly after the insert is
    /// confirmed, and its outcome never affects the result.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, registration: Registration) -> Result<User, AuthError> {
        let Registration {
            username: Some(username),
            email: Some(email),
            password: Some(password),
            confirm_password: Some(confirm_password),
        } = registration
        else {
            return Err(AuthError::MissingCredential(missing::REGISTRATION_FIELDS));
        };

        let username = Username::parse(&username)
            .map_err(|_| AuthError::MissingCredential(missing::REGISTRATION_FIELDS))?;
        let password = Password::try_from(password)
            .map_err(|_| AuthError::MissingCredential(missing::REGISTRATION_FIELDS))?;

        if password.as_ref().expose_secret() != confirm_password.expose_secret() {
            return Err(AuthError::ConfirmationMismatch);
        }

        let email = Email::parse(&email).map_err(|_| AuthError::InvalidEmail)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        if self
            .user_repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken);
        }

        let user = User::register_local(username, email, &password, &self.hasher)
            .map_err(AuthError::upstream)?;
        let user = self.user_repository.insert(user).await?;

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

        Ok(user)
    }
}
