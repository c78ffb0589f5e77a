use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use gateward_application::LoginUseCase;
use gateward_core::{CredentialHasher, SessionStore, UserRepository};

use crate::{extract, responses::LoginResponse};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Username or email address; disambiguated by format.
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

/// Local password login. Responds with `{id, token}` and sets the session
/// cookie.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<R, S>(
    State((user_repository, session_store)): State<(R, S)>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let identifier = request.username.or(request.email);

    let login = LoginUseCase::new(user_repository, session_store, CredentialHasher::new())
        .execute(identifier, request.password)
        .await?;

    let jar = jar.add(extract::session_cookie(&login.session));
    Ok((jar, Json(LoginResponse::from(&login.user))))
}
