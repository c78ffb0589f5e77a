use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use gateward_application::{NotificationSettings, RegisterUseCase, Registration};
use gateward_core::{CredentialHasher, Notifier, UserRepository};

use crate::responses::UserResponse;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<Secret<String>>,
}

/// Local registration. Returns the persisted user, api token included.
#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<R, N>(
    State((user_repository, notifier, settings)): State<(R, N, NotificationSettings)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let user = RegisterUseCase::new(
        user_repository,
        notifier,
        CredentialHasher::new(),
        settings,
    )
    .execute(Registration {
        username: request.username,
        email: request.email,
        password: request.password,
        confirm_password: request.confirm_password,
    })
    .await?;

    Ok(Json(UserResponse::from(&user)))
}
