use color_eyre::eyre::Result;
use secrecy::Secret;
use tokio::net::TcpListener;

use gateward_adapters::{
    DashMapSessionStore, HashMapUserRepository, JobQueueEmailClient, MockEmailClient, Settings,
};
use gateward_application::NotificationSettings;
use gateward_core::Notifier;
use gateward_service::{AuthService, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = Settings::load()?;
    init_tracing();

    let listener = TcpListener::bind(&settings.address).await?;
    let notification_settings = settings.notification_settings();

    match settings.email_server.clone() {
        Some(email_server) => {
            let notifier = JobQueueEmailClient::new(
                email_server.url,
                email_server.auth_user,
                Secret::from(email_server.auth_password),
                email_server.login_url,
                reqwest::Client::new(),
            );
            serve(listener, notifier, notification_settings).await
        }
        None => serve(listener, MockEmailClient::new(), notification_settings).await,
    }
}

async fn serve<N>(
    listener: TcpListener,
    notifier: N,
    notification_settings: NotificationSettings,
) -> Result<()>
where
    N: Notifier + Clone + Send + Sync + 'static,
{
    AuthService::new(
        HashMapUserRepository::new(),
        DashMapSessionStore::new(),
        notifier,
        notification_settings,
    )
    .run_standalone(listener)
    .await?;

    Ok(())
}
