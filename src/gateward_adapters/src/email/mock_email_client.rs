use gateward_core::{Email, Notification, Notifier, NotifierError};

#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Notifier for MockEmailClient {
    async fn send(
        &self,
        _recipient_name: &str,
        _recipient_email: &Email,
        _notification: Notification,
    ) -> Result<(), NotifierError> {
        Ok(())
    }
}
