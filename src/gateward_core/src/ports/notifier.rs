use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::email::Email;

/// Outbound user-facing notifications. The reset variant carries the
/// freshly generated plaintext password; the [`Secret`] wrapper zeroizes
/// it once the notification is dropped after dispatch.
#[derive(Debug, Clone)]
pub enum Notification {
    Welcome,
    PasswordReset { new_password: Secret<String> },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Welcome => "welcome",
            Notification::PasswordReset { .. } => "password-reset",
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("notifier unavailable: {0}")]
    Unavailable(String),
}

/// External notification sender. At-least-once delivery assumed; delivery
/// failures are the notifier's to log and are invisible to callers, which
/// dispatch fire-and-forget.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        recipient_name: &str,
        recipient_email: &Email,
        notification: Notification,
    ) -> Result<(), NotifierError>;
}
