use secrecy::{ExposeSecret, Secret};

use gateward_core::{AuthError, CredentialHasher, Password, User, UserRepository, error::missing};

/// Password change - authenticated, gated on re-verification of the
/// current password. The existing salt is kept; only the digest changes.
pub struct ChangePasswordUseCase<R>
where
    R: UserRepository,
{
    user_repository: R,
    hasher: CredentialHasher,
}

impl<R> ChangePasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repository: R, hasher: CredentialHasher) -> Self {
        Self {
            user_repository,
            hasher,
        }
    }

    /// Execute the password change for an already-authenticated user.
    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        mut user: User,
        old_password: Option<Secret<String>>,
        new_password: Option<Secret<String>>,
        confirm_new_password: Option<Secret<String>>,
    ) -> Result<(), AuthError> {
        let (Some(old_password), Some(new_password), Some(confirm_new_password)) =
            (old_password, new_password, confirm_new_password)
        else {
            return Err(AuthError::MissingCredential(missing::CHANGE_PASSWORD_FIELDS));
        };

        if new_password.expose_secret() != confirm_new_password.expose_secret() {
            return Err(AuthError::ConfirmationMismatch);
        }

        let old_password = Password::try_from(old_password)
            .map_err(|_| AuthError::MissingCredential(missing::CHANGE_PASSWORD_FIELDS))?;
        let new_password = Password::try_from(new_password)
            .map_err(|_| AuthError::MissingCredential(missing::CHANGE_PASSWORD_FIELDS))?;

        if !user.verify_password(&self.hasher, &old_password) {
            return Err(AuthError::WrongPassword);
        }

        user.change_password(&self.hasher, &new_password)
            .map_err(AuthError::upstream)?;
        self.user_repository.update(&user).await?;

        Ok(())
    }
}
