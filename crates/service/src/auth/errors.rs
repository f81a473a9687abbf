use thiserror::Error;

/// Business errors for the auth and provisioning workflows. Each kind maps
/// to one externally observable status in the HTTP crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("credential expired")]
    ExpiredCredential,
    #[error("credential malformed")]
    MalformedCredential,
    #[error("credential revoked")]
    RevokedCredential,
    #[error("user unknown or inactive")]
    UnknownOrInactiveUser,
    #[error("operation not permitted for this principal")]
    Forbidden,
    #[error("role not present on user")]
    RoleNotPresent,
    #[error("role already present on user")]
    RoleAlreadyPresent,
    #[error("incomplete profile data: {0}")]
    IncompleteProfileData(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("hashing error: {0}")]
    HashFailure(String),
    #[error("token error: {0}")]
    TokenFailure(String),
    #[error("storage error: {0}")]
    StorageFailure(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::DuplicateEmail => 1001,
            AuthError::InvalidCredentials => 1002,
            AuthError::ExpiredCredential => 1003,
            AuthError::MalformedCredential => 1004,
            AuthError::RevokedCredential => 1005,
            AuthError::UnknownOrInactiveUser => 1006,
            AuthError::Forbidden => 1007,
            AuthError::RoleNotPresent => 1008,
            AuthError::RoleAlreadyPresent => 1009,
            AuthError::IncompleteProfileData(_) => 1010,
            AuthError::Validation(_) => 1011,
            AuthError::HashFailure(_) => 1101,
            AuthError::TokenFailure(_) => 1102,
            AuthError::StorageFailure(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(err: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match err {
            ModelError::Validation(msg) => AuthError::Validation(msg),
            ModelError::NotFound(_) => AuthError::UnknownOrInactiveUser,
            ModelError::Db(msg) => AuthError::StorageFailure(msg),
        }
    }
}
