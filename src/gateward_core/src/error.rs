use thiserror::Error;

use crate::domain::user_id::UserId;
use crate::ports::{
    notifier::NotifierError, repositories::UserRepositoryError, session_store::SessionStoreError,
};

/// Canonical messages for [`AuthError::MissingCredential`].
pub mod missing {
    pub const TOKEN_OR_UID: &str = "You must include a token and uid (user id) in your request";
    pub const REGISTRATION_FIELDS: &str = ":username, :email, :password, :confirmPassword required";
    pub const LOGIN_FIELDS: &str =
        "Missing :username or :password in request body, please provide both";
    pub const FEDERATED_ID: &str = "No external identity provided";
    pub const EMAIL: &str = ":email required";
    pub const CHANGE_USERNAME_FIELDS: &str = ":password and :newUsername required";
    pub const CHANGE_PASSWORD_FIELDS: &str =
        ":oldPassword, :newPassword and :confirmNewPassword required";
}

/// The typed denial produced by every authentication and account-mutation
/// path. Each variant carries a stable machine-checkable code
/// ([`AuthError::code`]) next to its human-readable message.
///
/// `InvalidCredentials` is deliberately undifferentiated: it never reveals
/// whether the identifier was unknown or the password wrong. `Suspended` is
/// account-level policy, not secrecy-sensitive, and is always reported
/// distinctly.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    MissingCredential(&'static str),

    #[error(
        "Username or password incorrect. Click 'Forgot Password' for help with either. (Note: usernames are case-sensitive)"
    )]
    InvalidCredentials,

    #[error("No user found.")]
    NoUser,

    #[error("You must be logged in.")]
    NoSession,

    #[error("Account has been suspended, please contact support with your UUID ({0}) for assistance.")]
    Suspended(UserId),

    #[error("Email already taken")]
    EmailTaken,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Password & Confirm don't match")]
    ConfirmationMismatch,

    #[error(":email invalid")]
    InvalidEmail,

    /// Repository or notifier failure. The message stays generic; the
    /// underlying reason is carried for logs only.
    #[error("Something went wrong, please try again later")]
    Upstream { reason: String },
}

impl AuthError {
    pub const fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential(_) => "MISSING_CREDENTIAL",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::NoUser => "NO_USER",
            AuthError::NoSession => "NO_SESSION",
            AuthError::Suspended(_) => "ACCOUNT_SUSPENDED",
            AuthError::EmailTaken => "EMAIL_TAKEN",
            AuthError::UsernameTaken => "USERNAME_TAKEN",
            AuthError::WrongPassword => "WRONG_PASSWORD",
            AuthError::ConfirmationMismatch => "CONFIRMATION_MISMATCH",
            AuthError::InvalidEmail => "INVALID_EMAIL",
            AuthError::Upstream { .. } => "UPSTREAM_FAILURE",
        }
    }

    pub fn upstream(reason: impl ToString) -> Self {
        AuthError::Upstream {
            reason: reason.to_string(),
        }
    }
}

impl PartialEq for AuthError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Upstream { .. }, Self::Upstream { .. }) => true,
            (Self::Suspended(a), Self::Suspended(b)) => a == b,
            (Self::MissingCredential(a), Self::MissingCredential(b)) => a == b,
            _ => self.code() == other.code(),
        }
    }
}

impl From<UserRepositoryError> for AuthError {
    fn from(error: UserRepositoryError) -> Self {
        use crate::ports::repositories::UniqueField;
        match error {
            UserRepositoryError::UniqueViolation(UniqueField::Email) => AuthError::EmailTaken,
            UserRepositoryError::UniqueViolation(UniqueField::Username) => AuthError::UsernameTaken,
            // Api-token and federated-id collisions are either negligible or
            // handled as a lost race by the caller before this conversion.
            UserRepositoryError::UniqueViolation(field) => {
                AuthError::upstream(format!("unexpected unique violation on {field:?}"))
            }
            UserRepositoryError::Unavailable(reason) => AuthError::Upstream { reason },
        }
    }
}

impl From<SessionStoreError> for AuthError {
    fn from(error: SessionStoreError) -> Self {
        AuthError::upstream(error)
    }
}

impl From<NotifierError> for AuthError {
    fn from(error: NotifierError) -> Self {
        AuthError::upstream(error)
    }
}
