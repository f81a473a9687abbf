use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use models::roles::Role;
use models::{client_profile, pro_profile};
use service::auth::domain::{LoginInput, Principal, SignupInput};

use crate::errors::ApiError;
use crate::extract::Bearer;
use crate::state::AppState;

use super::users::UserView;

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_id: Uuid,
    pub roles: Vec<Role>,
}

impl TokenResponse {
    fn new(user: &Principal, token: String) -> Self {
        Self {
            access_token: token,
            token_type: "bearer",
            user_id: user.id,
            roles: user.roles.to_vec(),
        }
    }
}

pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let session = state.auth.signup(input).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse::new(&session.user, session.token))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<TokenResponse>, ApiError> {
    let session = state.auth.login(input).await?;
    Ok(Json(TokenResponse::new(&session.user, session.token)))
}

/// Bumps the caller's revocation counter: every outstanding token dies.
pub async fn logout(State(state): State<AppState>, Bearer(token): Bearer) -> Result<StatusCode, ApiError> {
    state.auth.logout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn refresh(
    State(state): State<AppState>,
    Bearer(token): Bearer,
) -> Result<Json<TokenResponse>, ApiError> {
    let session = state.auth.refresh(&token).await?;
    Ok(Json(TokenResponse::new(&session.user, session.token)))
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user: UserView,
    pub client_profile: Option<client_profile::Model>,
    pub pro_profile: Option<pro_profile::Model>,
}

pub async fn me(State(state): State<AppState>, Bearer(token): Bearer) -> Result<Json<MeResponse>, ApiError> {
    let principal = state.auth.resolve(&token).await?;
    let (client, pro) = state.auth.principal_profiles(&principal).await?;
    Ok(Json(MeResponse { user: principal.into(), client_profile: client, pro_profile: pro }))
}
