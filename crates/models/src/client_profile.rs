use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;
use crate::errors::ModelError;
use crate::user;

/// Client-side extension data, one row per user holding the client role.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub phone: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub address: Option<Address>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    phone: Option<String>,
    address: Option<Address>,
) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        phone: Set(phone),
        address: Set(address),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    phone: Option<String>,
    address: Option<Address>,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ModelError::NotFound("client profile".into()))?
        .into();
    if let Some(phone) = phone {
        am.phone = Set(Some(phone));
    }
    if let Some(address) = address {
        am.address = Set(Some(address));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn delete_by_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<(), ModelError> {
    Entity::delete_many()
        .filter(Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
