use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use models::offering::{self, NewOffering, OfferingPatch, PricingType, PublicFilter};
use models::roles::Role;
use models::{category, service_group};
use service::catalog;

use crate::errors::ApiError;
use crate::extract::Bearer;
use crate::state::AppState;

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CreateOfferingBody {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    pub pricing_type: PricingType,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    pub category_id: Uuid,
    #[serde(default)]
    pub service_group_id: Option<Uuid>,
    #[serde(default)]
    pub options_schema: Option<serde_json::Value>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

pub async fn create_offering(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Json(body): Json<CreateOfferingBody>,
) -> Result<(StatusCode, Json<offering::Model>), ApiError> {
    let pro = state.auth.require_roles(&token, &[Role::Pro]).await?;
    let new = NewOffering {
        title: body.title,
        description: body.description,
        base_price: body.base_price,
        pricing_type: body.pricing_type,
        duration_minutes: body.duration_minutes,
        category_id: body.category_id,
        service_group_id: body.service_group_id,
        options_schema: body.options_schema,
        is_public: body.is_public,
        is_active: body.is_active,
    };
    let created = catalog::create_offering(&state.db, pro.id, new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_my_offerings(
    State(state): State<AppState>,
    Bearer(token): Bearer,
) -> Result<Json<Vec<offering::Model>>, ApiError> {
    let pro = state.auth.require_roles(&token, &[Role::Pro]).await?;
    let offerings = catalog::list_my_offerings(&state.db, pro.id).await?;
    Ok(Json(offerings))
}

#[derive(Deserialize)]
pub struct OfferingPatchBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub pricing_type: Option<PricingType>,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub service_group_id: Option<Uuid>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

pub async fn update_offering(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
    Json(body): Json<OfferingPatchBody>,
) -> Result<Json<offering::Model>, ApiError> {
    let pro = state.auth.require_roles(&token, &[Role::Pro]).await?;
    let patch = OfferingPatch {
        title: body.title,
        description: body.description,
        base_price: body.base_price,
        pricing_type: body.pricing_type,
        duration_minutes: body.duration_minutes,
        service_group_id: body.service_group_id,
        is_public: body.is_public,
        is_active: body.is_active,
    };
    let updated = catalog::update_offering(&state.db, pro.id, id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_offering(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pro = state.auth.require_roles(&token, &[Role::Pro]).await?;
    catalog::delete_offering(&state.db, pro.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize, Default)]
pub struct PublicParams {
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub pro_id: Option<Uuid>,
    #[serde(default)]
    pub service_group_id: Option<Uuid>,
}

/// Anonymous storefront: active, public offerings only.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<PublicParams>,
) -> Result<Json<Vec<offering::Model>>, ApiError> {
    let filter = PublicFilter {
        category_id: params.category_id,
        pro_id: params.pro_id,
        service_group_id: params.service_group_id,
    };
    let offerings = catalog::list_public_offerings(&state.db, filter).await?;
    Ok(Json(offerings))
}

#[derive(Deserialize)]
pub struct CreateGroupBody {
    pub name: String,
    #[serde(default)]
    pub position: i32,
}

pub async fn create_group(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Json(body): Json<CreateGroupBody>,
) -> Result<(StatusCode, Json<service_group::Model>), ApiError> {
    let pro = state.auth.require_roles(&token, &[Role::Pro]).await?;
    let group = catalog::create_group(&state.db, pro.id, &body.name, body.position).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn list_my_groups(
    State(state): State<AppState>,
    Bearer(token): Bearer,
) -> Result<Json<Vec<service_group::Model>>, ApiError> {
    let pro = state.auth.require_roles(&token, &[Role::Pro]).await?;
    let groups = catalog::list_my_groups(&state.db, pro.id).await?;
    Ok(Json(groups))
}

#[derive(Deserialize)]
pub struct CreateCategoryBody {
    pub name: String,
}

pub async fn create_category(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Json(body): Json<CreateCategoryBody>,
) -> Result<(StatusCode, Json<category::Model>), ApiError> {
    state.auth.require_roles(&token, &[Role::Admin]).await?;
    let created = catalog::create_category(&state.db, &body.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<category::Model>>, ApiError> {
    let categories = catalog::list_categories(&state.db).await?;
    Ok(Json(categories))
}
