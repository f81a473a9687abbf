use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::roles::RoleSet;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub password_algorithm: String,
    pub full_name: String,
    pub phone: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub roles: RoleSet,
    pub token_version: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub password_algorithm: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub roles: RoleSet,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, ModelError> {
    validate_email(&new.email)?;
    validate_name(&new.full_name)?;
    if new.roles.is_empty() {
        return Err(ModelError::Validation("at least one role required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(new.email),
        password_hash: Set(new.password_hash),
        password_algorithm: Set(new.password_algorithm),
        full_name: Set(new.full_name),
        phone: Set(new.phone),
        roles: Set(new.roles),
        token_version: Set(0),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Atomic revocation counter bump; every outstanding token for the user
/// becomes invalid once this commits. Returns the new counter value.
pub async fn bump_token_version<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<i32, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::TokenVersion, Expr::col(Column::TokenVersion).add(1))
        .col_expr(Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ModelError::NotFound("user".into()));
    }
    let refreshed = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::NotFound("user".into()))?;
    Ok(refreshed.token_version)
}

pub async fn set_active<C: ConnectionTrait>(db: &C, id: Uuid, active: bool) -> Result<Model, ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::NotFound("user".into()))?
        .into();
    am.is_active = Set(active);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_must_carry_at_sign() {
        assert!(validate_email("nope").is_err());
        assert!(validate_email("a@b.com").is_ok());
    }

    #[test]
    fn name_must_not_be_blank() {
        assert!(validate_name("  ").is_err());
        assert!(validate_name("Ada").is_ok());
    }
}
