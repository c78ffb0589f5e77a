use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use gateward_application::{FederatedLoginUseCase, NotificationSettings};
use gateward_core::{
    AuthError, Email, FederatedIdentity, Notifier, Provider, SessionStore, UserRepository,
    error::missing,
};

use crate::{extract, responses::LoginResponse};

use super::error::ApiError;

/// The provider-verified identity tuple. This endpoint sits behind the
/// host's OAuth callback handling; by the time it is called the external
/// provider has already authenticated the subject.
#[derive(Deserialize)]
pub struct FederatedLoginRequest {
    pub provider: Option<String>,
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Federated login/link. Creates the account on first contact, otherwise
/// logs in; responds with `{id, token}` and sets the session cookie.
#[tracing::instrument(name = "Federated login", skip_all)]
pub async fn federated_login<R, S, N>(
    State((user_repository, session_store, notifier, settings)): State<(
        R,
        S,
        N,
        NotificationSettings,
    )>,
    jar: CookieJar,
    Json(request): Json<FederatedLoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let (Some(provider), Some(external_id)) = (request.provider, request.external_id) else {
        return Err(AuthError::MissingCredential(missing::FEDERATED_ID).into());
    };
    let provider = Provider::parse(&provider)
        .map_err(|_| AuthError::MissingCredential(missing::FEDERATED_ID))?;

    let identity = FederatedIdentity {
        provider,
        external_id,
        display_name: request.display_name,
        // profile claims are optional; an unparsable address is treated
        // as absent rather than failing a verified login
        email: request.email.as_deref().and_then(|e| Email::parse(e).ok()),
    };

    let login = FederatedLoginUseCase::new(user_repository, session_store, notifier, settings)
        .execute(identity)
        .await?;

    let jar = jar.add(extract::session_cookie(&login.session));
    Ok((jar, Json(LoginResponse::from(&login.user))))
}
