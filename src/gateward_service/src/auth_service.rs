use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use gateward_application::NotificationSettings;
use gateward_axum::routes::{
    change_password, change_username, federated_login, login, logout, register, reset_password,
    verify_session, verify_token,
};
use gateward_core::{Notifier, SessionStore, UserRepository};

/// The assembled authentication gateway: every route from the contract,
/// wired to the provided collaborators.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Wire the gateway against a user repository, session store and
    /// notifier.
    ///
    /// # Note on Architecture
    /// Collaborators implement Clone via internal Arcs for thread-safe
    /// sharing. Each route is given exactly the state it needs, so e.g.
    /// logout only ever sees the session store.
    pub fn new<R, S, N>(
        user_repository: R,
        session_store: S,
        notifier: N,
        notification_settings: NotificationSettings,
    ) -> Self
    where
        R: UserRepository + Clone + 'static,
        S: SessionStore + Clone + 'static,
        N: Notifier + Clone + Send + Sync + 'static,
    {
        let router = Router::new()
            // Registration needs the repository, the notifier and the
            // welcome-mail gating
            .route("/register", post(register::<R, N>))
            .with_state((
                user_repository.clone(),
                notifier.clone(),
                notification_settings,
            ))
            // Local login mints a session
            .route("/login", post(login::<R, S>))
            .with_state((user_repository.clone(), session_store.clone()))
            // Federated login may create an account, hence the notifier
            .route("/login/federated", post(federated_login::<R, S, N>))
            .with_state((
                user_repository.clone(),
                session_store.clone(),
                notifier.clone(),
                notification_settings,
            ))
            // Token auth (header and URL variants share the handler)
            .route("/verify-token", get(verify_token::<R, S>))
            .with_state((user_repository.clone(), session_store.clone()))
            // Session auth
            .route("/session", get(verify_session::<R, S>))
            .with_state((user_repository.clone(), session_store.clone()))
            // Password reset is unauthenticated
            .route("/reset-password", post(reset_password::<R, N>))
            .with_state((user_repository.clone(), notifier))
            // Lifecycle operations authenticate via token themselves
            .route("/change-username", post(change_username::<R, S>))
            .with_state((user_repository.clone(), session_store.clone()))
            .route("/change-password", post(change_password::<R, S>))
            .with_state((user_repository, session_store.clone()))
            // Logout only needs the session store
            .route("/logout", post(logout::<S>))
            .with_state(session_store);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(TraceLayer::new_for_http());
        self
    }

    /// Convert into a router that can be nested into a larger application.
    pub fn into_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the gateway as a standalone server.
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!("auth gateway listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
