use secrecy::Secret;

use gateward_core::{
    AuthError, CredentialHasher, Password, User, UserRepository, Username, error::missing,
};

/// Username change - authenticated, gated on re-verification of the
/// current password.
pub struct ChangeUsernameUseCase<R>
where
    R: UserRepository,
{
    user_repository: R,
    hasher: CredentialHasher,
}

impl<R> ChangeUsernameUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repository: R, hasher: CredentialHasher) -> Self {
        Self {
            user_repository,
            hasher,
        }
    }

    /// Execute the username change for an already-authenticated user.
    #[tracing::instrument(name = "ChangeUsernameUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        mut user: User,
        password: Option<Secret<String>>,
        new_username: Option<String>,
    ) -> Result<(), AuthError> {
        let (Some(password), Some(new_username)) = (password, new_username) else {
            return Err(AuthError::MissingCredential(missing::CHANGE_USERNAME_FIELDS));
        };
        let password = Password::try_from(password)
            .map_err(|_| AuthError::MissingCredential(missing::CHANGE_USERNAME_FIELDS))?;
        let new_username = Username::parse(&new_username)
            .map_err(|_| AuthError::MissingCredential(missing::CHANGE_USERNAME_FIELDS))?;

        if let Some(existing) = self.user_repository.find_by_username(&new_username).await? {
            if existing.id() != user.id() {
                return Err(AuthError::UsernameTaken);
            }
        }

        if !user.verify_password(&self.hasher, &password) {
            return Err(AuthError::WrongPassword);
        }

        user.change_username(new_username)
            .map_err(AuthError::upstream)?;
        // a racing claim of the same username still loses here
        self.user_repository.update(&user).await?;

        Ok(())
    }
}
