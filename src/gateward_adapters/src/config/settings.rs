use gateward_application::NotificationSettings;
use serde::Deserialize;

use super::constants;

/// Service configuration. Everything here can be overridden from the
/// environment with a `GATEWARD__` prefix, e.g.
/// `GATEWARD__NOTIFICATIONS__SEND_WELCOME=true` or
/// `GATEWARD__EMAIL_SERVER__URL=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub address: String,
    pub notifications: NotificationConfig,
    /// Outbound mail server; absent means notifications are dropped into
    /// the mock client.
    pub email_server: Option<EmailServerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    pub send_welcome: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailServerConfig {
    pub url: String,
    pub auth_user: String,
    pub auth_password: String,
    /// Login URL included in password-reset mails.
    pub login_url: String,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        // pick up a .env file when there is one; ignore its absence
        dotenvy::dotenv().ok();

        config::Config::builder()
            .set_default("address", constants::prod::APP_ADDRESS)?
            // welcome mail stays off unless explicitly enabled, so
            // non-production runs never mail real people
            .set_default("notifications.send_welcome", false)?
            .add_source(
                config::Environment::with_prefix("GATEWARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// The slice of configuration the use cases take at construction time.
    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            send_welcome: self.notifications.send_welcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_welcome_mail_off() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.address, constants::prod::APP_ADDRESS);
        assert!(!settings.notifications.send_welcome);
        assert!(settings.email_server.is_none());
    }
}
