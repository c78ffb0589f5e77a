use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;

use gateward_application::LogoutUseCase;
use gateward_core::SessionStore;

use crate::extract;

use super::error::ApiError;

/// Logout: drops the server-side session binding and clears the cookie.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<S>(
    State(session_store): State<S>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    S: SessionStore + Clone + 'static,
{
    LogoutUseCase::new(session_store)
        .execute(extract::session(&jar))
        .await?;

    let jar = jar.remove(extract::session_removal_cookie());
    Ok((jar, StatusCode::OK))
}
