pub mod change_password;
pub mod change_username;
pub mod federated_login;
pub mod login;
pub mod logout;
pub mod register;
pub mod reset_password;
pub mod session_auth;
pub mod token_auth;

#[cfg(test)]
pub(crate) mod test_support;

use gateward_core::{Email, Notification, Notifier};

/// Notification gating, threaded into the registration and federated-login
/// use cases at construction time instead of a process-wide environment
/// flag.
#[derive(Debug, Clone, Copy)]
pub struct NotificationSettings {
    pub send_welcome: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { send_welcome: true }
    }
}

/// Fire-and-forget notification dispatch. The send runs on its own task so
/// it never blocks or fails the response path; failures are logged and
/// otherwise invisible.
pub(crate) fn dispatch_notification<N>(
    notifier: N,
    recipient_name: String,
    recipient_email: Email,
    notification: Notification,
) where
    N: Notifier + Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let kind = notification.kind();
        if let Err(error) = notifier
            .send(&recipient_name, &recipient_email, notification)
            .await
        {
            tracing::warn!(email = %recipient_email, kind, %error, "notification dispatch failed");
        }
    });
}
