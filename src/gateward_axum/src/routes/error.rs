use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use gateward_core::AuthError;

/// The denial body every failing endpoint returns: the human message plus
/// the stable machine code.
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub err: String,
    pub code: String,
}

/// An [`AuthError`] paired with the HTTP status it surfaces as. Denials
/// are 401 and upstream failures 500, except on the reset route, which
/// reports everything server-side.
pub struct ApiError {
    status: StatusCode,
    error: AuthError,
}

impl ApiError {
    /// The reset route's mapping: any failure is a 500.
    pub fn server_side(error: AuthError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        let status = match &error {
            AuthError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        Self { status, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // the wire message for upstream failures is generic; the real
        // reason only goes to the logs
        if let AuthError::Upstream { reason } = &self.error {
            tracing::error!(%reason, "request failed upstream");
        }

        let body = Json(ErrorResponse {
            err: self.error.to_string(),
            code: self.error.code().to_owned(),
        });

        (self.status, body).into_response()
    }
}
