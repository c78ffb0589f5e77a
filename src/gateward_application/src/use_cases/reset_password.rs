use gateward_core::{
    AuthError, CredentialHasher, Email, Notification, Notifier, Password, UserRepository,
    error::missing,
};

/// Length of the server-generated replacement password.
const GENERATED_PASSWORD_LEN: usize = 16;

/// Password reset - unauthenticated, keyed by email.
///
/// The account gets a fresh salt and a fresh server-generated password,
/// and the plaintext is mailed to the user. That plaintext-over-email flow
/// (no reset link, no rate limiting) is reproduced from the system this
/// gateway replaces and is a known weakness; see DESIGN.md before
/// extending it. The plaintext itself lives in a `Secret` that is zeroized
/// once the notification has been handed off.
pub struct ResetPasswordUseCase<R, N>
where
    R: UserRepository,
    N: Notifier + Clone + Send + Sync + 'static,
{
    user_repository: R,
    notifier: N,
    hasher: CredentialHasher,
}

impl<R, N> ResetPasswordUseCase<R, N>
where
    R: UserRepository,
    N: Notifier + Clone + Send + Sync + 'static,
{
    pub fn new(user_repository: R, notifier: N, hasher: CredentialHasher) -> Self {
        Self {
            user_repository,
            notifier,
            hasher,
        }
    }

    /// Execute the password reset use case. Email matching is
    /// case-insensitive. Nothing is written and nothing is sent when no
    /// account matches.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Option<String>) -> Result<(), AuthError> {
        let raw = email
            .filter(|e| !e.is_empty())
            .ok_or(AuthError::MissingCredential(missing::EMAIL))?;
        // an address that cannot be parsed cannot match a stored one
        let email = Email::parse(&raw).map_err(|_| AuthError::NoUser)?;

        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::NoUser)?;

        let new_password = Password::random(GENERATED_PASSWORD_LEN);
        user.reset_password(&self.hasher, &new_password)
            .map_err(AuthError::upstream)?;
        self.user_repository.update(&user).await?;

        super::dispatch_notification(
            self.notifier.clone(),
            user.display_name().to_owned(),
            email,
            Notification::PasswordReset {
                new_password: new_password.as_ref().clone(),
            },
        );

        Ok(())
    }
}
