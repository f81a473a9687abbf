use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::address::Address;
use models::roles::Role;
use models::{client_profile, pro_profile, user};
use service::account::{self, UserPatch};
use service::auth::domain::{Principal, ProfileData};
use service::auth::AuthError;
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::extract::Bearer;
use crate::state::AppState;

/// User representation over the API; never exposes the password hash.
#[derive(Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub roles: Vec<Role>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<user::Model> for UserView {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            roles: user.roles.to_vec(),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn ensure_self_or_admin(principal: &Principal, target: Uuid) -> Result<(), ApiError> {
    if principal.id != target && !principal.roles.contains(Role::Admin) {
        return Err(AuthError::Forbidden.into());
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    state.auth.require_roles(&token, &[Role::Admin]).await?;
    let defaults = Pagination::default();
    let pagination = Pagination {
        page: params.page.unwrap_or(defaults.page),
        per_page: params.per_page.unwrap_or(defaults.per_page),
    };
    let users = account::list_users(&state.db, pagination).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<UserView>, ApiError> {
    state.auth.resolve(&token).await?;
    let user = account::get_user(&state.db, id)
        .await?
        .ok_or(ApiError { status: StatusCode::NOT_FOUND, message: "user not found".into() })?;
    Ok(Json(user.into()))
}

#[derive(Deserialize)]
pub struct UserPatchBody {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

pub async fn patch_user(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(body): Json<UserPatchBody>,
) -> Result<Json<UserView>, ApiError> {
    let principal = state.auth.resolve(&token).await?;
    ensure_self_or_admin(&principal, id)?;
    // only admins flip the active switch
    if body.is_active.is_some() && !principal.roles.contains(Role::Admin) {
        return Err(AuthError::Forbidden.into());
    }
    let patch = UserPatch { full_name: body.full_name, phone: body.phone, is_active: body.is_active };
    let updated = account::update_user(&state.db, id, patch).await?;
    Ok(Json(updated.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.auth.require_roles(&token, &[Role::Admin]).await?;
    account::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct AddRoleBody {
    pub role: Role,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: Option<String>,
}

pub async fn add_role(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(body): Json<AddRoleBody>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let principal = state.auth.resolve(&token).await?;
    ensure_self_or_admin(&principal, id)?;
    let data = ProfileData {
        business_name: body.business_name,
        website: body.website,
        address: body.address,
        phone: body.phone,
    };
    let updated = state.auth.add_role(id, body.role, data).await?;
    Ok((StatusCode::CREATED, Json(updated.into())))
}

#[derive(Serialize)]
pub struct RoleRemovalResponse {
    pub deleted_user: bool,
    pub user: Option<UserView>,
}

pub async fn remove_role(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path((id, role)): Path<(Uuid, String)>,
) -> Result<Json<RoleRemovalResponse>, ApiError> {
    let principal = state.auth.resolve(&token).await?;
    let role: Role = role.parse().map_err(|_| ApiError::bad_request("unknown role"))?;
    let removal = state.auth.remove_role(&principal, id, role).await?;
    Ok(Json(RoleRemovalResponse {
        deleted_user: removal.deleted_user,
        user: removal.user.map(UserView::from),
    }))
}

pub async fn get_client_profile(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<client_profile::Model>, ApiError> {
    state.auth.resolve(&token).await?;
    let profile = account::get_client_profile(&state.db, id).await?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct ClientProfilePatch {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

pub async fn patch_client_profile(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(body): Json<ClientProfilePatch>,
) -> Result<Json<client_profile::Model>, ApiError> {
    let principal = state.auth.resolve(&token).await?;
    ensure_self_or_admin(&principal, id)?;
    let profile = account::update_client_profile(&state.db, id, body.phone, body.address).await?;
    Ok(Json(profile))
}

pub async fn get_pro_profile(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<pro_profile::Model>, ApiError> {
    state.auth.resolve(&token).await?;
    let profile = account::get_pro_profile(&state.db, id).await?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct ProProfilePatch {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

pub async fn patch_pro_profile(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(body): Json<ProProfilePatch>,
) -> Result<Json<pro_profile::Model>, ApiError> {
    let principal = state.auth.resolve(&token).await?;
    ensure_self_or_admin(&principal, id)?;
    let profile =
        account::update_pro_profile(&state.db, id, body.business_name, body.website, body.address).await?;
    Ok(Json(profile))
}
