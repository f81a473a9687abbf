use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::user;

/// Pro-defined shelf their offerings are arranged into.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pro_id: Uuid,
    pub name: String,
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pro,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pro => Entity::belongs_to(user::Entity)
                .from(Column::ProId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    pro_id: Uuid,
    name: &str,
    position: i32,
) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("group name required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        pro_id: Set(pro_id),
        name: Set(name.to_string()),
        position: Set(position),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn list_by_pro<C: ConnectionTrait>(db: &C, pro_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::ProId.eq(pro_id))
        .order_by_asc(Column::Position)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
