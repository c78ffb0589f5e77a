use std::collections::HashMap;

use axum::{Json, extract::Query, extract::State, http::HeaderMap, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use gateward_application::TokenAuthUseCase;
use gateward_core::{SessionStore, UserRepository};

use crate::{extract, responses::UserResponse};

use super::error::ApiError;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub user: UserResponse,
    pub was_modified: bool,
}

/// Token auth endpoint. Credentials come from the `x-api-user`/`x-api-key`
/// headers or, for the URL variant, from the `_id`/`apiToken` query
/// parameters; `_v` carries the client's cached version.
#[tracing::instrument(name = "Verify token", skip_all)]
pub async fn verify_token<R, S>(
    State((user_repository, session_store)): State<(R, S)>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let credentials = extract::token_credentials(&headers, &query);
    let session = extract::session(&jar);

    let principal = TokenAuthUseCase::new(user_repository, session_store)
        .execute(credentials, session)
        .await?;

    Ok(Json(VerifyTokenResponse {
        user: UserResponse::from(&principal.user),
        was_modified: principal.was_modified,
    }))
}
