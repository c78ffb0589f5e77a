use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum::Json;
use serde::Deserialize;

use gateward_application::ResetPasswordUseCase;
use gateward_core::{CredentialHasher, Notifier, UserRepository};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
}

/// Unauthenticated password reset by email. Failures on this route are
/// reported as server errors, matching the historical contract.
#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<R, N>(
    State((user_repository, notifier)): State<(R, N)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let email = request.email.clone().unwrap_or_default();

    ResetPasswordUseCase::new(user_repository, notifier, CredentialHasher::new())
        .execute(request.email)
        .await
        .map_err(ApiError::server_side)?;

    Ok((StatusCode::OK, format!("New password sent to {email}")))
}
