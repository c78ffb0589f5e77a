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

use gateward_application::{ChangePasswordUseCase, TokenAuthUseCase};
use gateward_core::{CredentialHasher, SessionStore, UserRepository};

use crate::extract;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "oldPassword")]
    pub old_password: Option<Secret<String>>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<Secret<String>>,
    #[serde(rename = "confirmNewPassword")]
    pub confirm_new_password: Option<Secret<String>>,
}

/// Authenticated password change; keeps the account's existing salt.
#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<R, S>(
    State((user_repository, session_store)): State<(R, S)>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    jar: CookieJar,
    Json(request): Json<ChangePasswordRequest>,
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

    ChangePasswordUseCase::new(user_repository, CredentialHasher::new())
        .execute(
            principal.user,
            request.old_password,
            request.new_password,
            request.confirm_new_password,
        )
        .await?;

    Ok(StatusCode::OK)
}
