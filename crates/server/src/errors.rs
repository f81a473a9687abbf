use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::auth::AuthError;
use service::errors::ServiceError;

/// HTTP-facing error: every typed service error maps to exactly one status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized(message: &str) -> Self {
        Self { status: StatusCode::UNAUTHORIZED, message: message.to_string() }
    }

    pub fn bad_request(message: &str) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match err {
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::ExpiredCredential
            | AuthError::MalformedCredential
            | AuthError::RevokedCredential
            | AuthError::UnknownOrInactiveUser => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::RoleNotPresent | AuthError::RoleAlreadyPresent => StatusCode::CONFLICT,
            AuthError::IncompleteProfileData(_) | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::HashFailure(_) | AuthError::TokenFailure(_) | AuthError::StorageFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self { status, message: err.to_string() }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        use models::errors::ModelError;
        let status = match &err {
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) | ServiceError::Model(ModelError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}
