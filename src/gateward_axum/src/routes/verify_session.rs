use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use gateward_application::SessionAuthUseCase;
use gateward_core::{SessionStore, UserRepository};

use crate::{extract, responses::UserResponse};

use super::error::ApiError;

/// Session auth endpoint: resolves the session cookie to its user.
#[tracing::instrument(name = "Verify session", skip_all)]
pub async fn verify_session<R, S>(
    State((user_repository, session_store)): State<(R, S)>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let principal = SessionAuthUseCase::new(user_repository, session_store)
        .execute(extract::session(&jar))
        .await?;

    Ok(Json(UserResponse::from(&principal.user)))
}
