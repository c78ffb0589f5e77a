use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use gateward_application::{ChangeUsernameUseCase, TokenAuthUseCase};
use gateward_core::{CredentialHasher, SessionStore, UserRepository};

use crate::extract;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ChangeUsernameRequest {
    pub password: Option<Secret<String>>,
    #[serde(rename = "newUsername")]
    pub new_username: Option<String>,
}

/// Authenticated username change; the caller re-proves the current
/// password in the body.
#[tracing::instrument(name = "Change username", skip_all)]
pub async fn change_username<R, S>(
    State((user_repository, session_store)): State<(R, S)>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    jar: CookieJar,
    Json(request): Json<ChangeUsernameRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let principal = TokenAuthUseCase::new(user_repository.clone(), session_store)
        .execute(
            extract::token_credentials(&headers, &query),
            extract::session(&jar),
        )
        .await?;

    ChangeUsernameUseCase::new(user_repository, CredentialHasher::new())
        .execute(principal.user, request.password, request.new_username)
        .await?;

    Ok(StatusCode::OK)
}
