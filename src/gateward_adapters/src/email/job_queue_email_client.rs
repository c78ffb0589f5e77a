use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use gateward_core::{Email, Notification, Notifier, NotifierError};

/// Notifier that enqueues typed email jobs on an external mail server.
///
/// The server owns delivery, retries and failure logging; this client
/// just posts the job. Jobs carry retry options so the queue keeps trying
/// after we have moved on.
#[derive(Clone)]
pub struct JobQueueEmailClient {
    http_client: Client,
    base_url: String,
    auth_user: String,
    auth_password: Secret<String>,
    login_url: String,
}

impl JobQueueEmailClient {
    pub fn new(
        base_url: String,
        auth_user: String,
        auth_password: Secret<String>,
        login_url: String,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            auth_user,
            auth_password,
            login_url,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for JobQueueEmailClient {
    #[tracing::instrument(name = "Enqueue email job", skip_all, fields(kind = notification.kind()))]
    async fn send(
        &self,
        recipient_name: &str,
        recipient_email: &Email,
        notification: Notification,
    ) -> Result<(), NotifierError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| NotifierError::Unavailable(e.to_string()))?;
        let url = base
            .join("/job")
            .map_err(|e| NotifierError::Unavailable(e.to_string()))?;

        let text = match &notification {
            Notification::Welcome => None,
            Notification::PasswordReset { new_password } => Some(format!(
                "Password for {} has been reset to {}. Log in at {}",
                recipient_name,
                new_password.expose_secret(),
                self.login_url
            )),
        };

        let request_body = EmailJobRequest {
            kind: "email",
            data: EmailJobData {
                email_type: notification.kind(),
                to: EmailRecipient {
                    name: recipient_name,
                    email: recipient_email.as_str(),
                },
                text: text.as_deref(),
            },
            options: JobOptions {
                attempts: RETRY_ATTEMPTS,
                backoff: JobBackoff {
                    delay: RETRY_BACKOFF_MS,
                    kind: "fixed",
                },
            },
        };

        self.http_client
            .post(url)
            .basic_auth(&self.auth_user, Some(self.auth_password.expose_secret()))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| NotifierError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| NotifierError::Unavailable(e.to_string()))?;

        Ok(())
    }
}

const RETRY_ATTEMPTS: u32 = 5;
const RETRY_BACKOFF_MS: u64 = 10 * 60 * 1000;

#[derive(serde::Serialize, Debug)]
struct EmailJobRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    data: EmailJobData<'a>,
    options: JobOptions<'a>,
}

#[derive(serde::Serialize, Debug)]
struct EmailJobData<'a> {
    #[serde(rename = "emailType")]
    email_type: &'a str,
    to: EmailRecipient<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(serde::Serialize, Debug)]
struct EmailRecipient<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(serde::Serialize, Debug)]
struct JobOptions<'a> {
    attempts: u32,
    backoff: JobBackoff<'a>,
}

#[derive(serde::Serialize, Debug)]
struct JobBackoff<'a> {
    delay: u64,
    #[serde(rename = "type")]
    kind: &'a str,
}
