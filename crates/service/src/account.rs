//! Account administration: listing, lookup, patching and deletion of users,
//! plus the role-specific profile views.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use uuid::Uuid;

use models::address::Address;
use models::{client_profile, pro_profile, user};

use crate::errors::ServiceError;
use crate::pagination::Pagination;

pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_users(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<user::Model>, ServiceError> {
    let (page_idx, per_page) = opts.page_parts();
    user::Entity::find()
        .order_by_asc(user::Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn update_user(db: &DatabaseConnection, id: Uuid, patch: UserPatch) -> Result<user::Model, ServiceError> {
    let mut am: user::ActiveModel = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?
        .into();
    if let Some(full_name) = patch.full_name {
        user::validate_name(&full_name)?;
        am.full_name = Set(full_name);
    }
    if let Some(phone) = patch.phone {
        am.phone = Set(Some(phone));
    }
    if let Some(is_active) = patch.is_active {
        am.is_active = Set(is_active);
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Admin-side hard delete; profile rows cascade via their FKs.
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    user::hard_delete(db, found.id).await?;
    Ok(())
}

pub async fn get_client_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<client_profile::Model, ServiceError> {
    client_profile::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("client profile"))
}

pub async fn update_client_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    phone: Option<String>,
    address: Option<Address>,
) -> Result<client_profile::Model, ServiceError> {
    Ok(client_profile::update(db, user_id, phone, address).await?)
}

pub async fn get_pro_profile(db: &DatabaseConnection, user_id: Uuid) -> Result<pro_profile::Model, ServiceError> {
    pro_profile::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("pro profile"))
}

pub async fn update_pro_profile(
    db: &DatabaseConnection,
    user_id: Uuid,
    business_name: Option<String>,
    website: Option<String>,
    address: Option<Address>,
) -> Result<pro_profile::Model, ServiceError> {
    Ok(pro_profile::update(db, user_id, business_name, website, address).await?)
}
