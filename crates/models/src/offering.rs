use chrono::Utc;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category;
use crate::errors::ModelError;
use crate::service_group;
use crate::user;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PricingType {
    #[sea_orm(string_value = "fixed")]
    Fixed,
    #[sea_orm(string_value = "starting_from")]
    StartingFrom,
    #[sea_orm(string_value = "quote")]
    Quote,
}

/// A bookable service published by a pro.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offerings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pro_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub pricing_type: PricingType,
    pub duration_minutes: Option<i32>,
    pub category_id: Uuid,
    pub service_group_id: Option<Uuid>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub options_schema: Option<Json>,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pro,
    Category,
    ServiceGroup,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pro => Entity::belongs_to(user::Entity)
                .from(Column::ProId)
                .to(user::Column::Id)
                .into(),
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::ServiceGroup => Entity::belongs_to(service_group::Entity)
                .from(Column::ServiceGroupId)
                .to(service_group::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub struct NewOffering {
    pub title: String,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub pricing_type: PricingType,
    pub duration_minutes: Option<i32>,
    pub category_id: Uuid,
    pub service_group_id: Option<Uuid>,
    pub options_schema: Option<Json>,
    pub is_public: bool,
    pub is_active: bool,
}

#[derive(Default)]
pub struct OfferingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub pricing_type: Option<PricingType>,
    pub duration_minutes: Option<i32>,
    pub service_group_id: Option<Uuid>,
    pub is_public: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Default, Clone, Copy)]
pub struct PublicFilter {
    pub category_id: Option<Uuid>,
    pub pro_id: Option<Uuid>,
    pub service_group_id: Option<Uuid>,
}

pub async fn create<C: ConnectionTrait>(db: &C, pro_id: Uuid, new: NewOffering) -> Result<Model, ModelError> {
    if new.title.trim().is_empty() {
        return Err(ModelError::Validation("title required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        pro_id: Set(pro_id),
        title: Set(new.title),
        description: Set(new.description),
        base_price: Set(new.base_price),
        pricing_type: Set(new.pricing_type),
        duration_minutes: Set(new.duration_minutes),
        category_id: Set(new.category_id),
        service_group_id: Set(new.service_group_id),
        options_schema: Set(new.options_schema),
        is_public: Set(new.is_public),
        is_active: Set(new.is_active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_owned<C: ConnectionTrait>(db: &C, pro_id: Uuid, id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id)
        .filter(Column::ProId.eq(pro_id))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn list_by_pro<C: ConnectionTrait>(db: &C, pro_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::ProId.eq(pro_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn update_owned<C: ConnectionTrait>(
    db: &C,
    pro_id: Uuid,
    id: Uuid,
    patch: OfferingPatch,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = find_owned(db, pro_id, id)
        .await?
        .ok_or_else(|| ModelError::NotFound("offering".into()))?
        .into();
    if let Some(title) = patch.title {
        if title.trim().is_empty() {
            return Err(ModelError::Validation("title required".into()));
        }
        am.title = Set(title);
    }
    if let Some(description) = patch.description {
        am.description = Set(Some(description));
    }
    if let Some(base_price) = patch.base_price {
        am.base_price = Set(Some(base_price));
    }
    if let Some(pricing_type) = patch.pricing_type {
        am.pricing_type = Set(pricing_type);
    }
    if let Some(duration) = patch.duration_minutes {
        am.duration_minutes = Set(Some(duration));
    }
    if let Some(group_id) = patch.service_group_id {
        am.service_group_id = Set(Some(group_id));
    }
    if let Some(is_public) = patch.is_public {
        am.is_public = Set(is_public);
    }
    if let Some(is_active) = patch.is_active {
        am.is_active = Set(is_active);
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn delete_owned<C: ConnectionTrait>(db: &C, pro_id: Uuid, id: Uuid) -> Result<(), ModelError> {
    let found = find_owned(db, pro_id, id)
        .await?
        .ok_or_else(|| ModelError::NotFound("offering".into()))?;
    Entity::delete_by_id(found.id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

/// Storefront listing: active, public offerings, newest first.
pub async fn list_public<C: ConnectionTrait>(db: &C, filter: PublicFilter) -> Result<Vec<Model>, ModelError> {
    let mut query = Entity::find()
        .filter(Column::IsActive.eq(true))
        .filter(Column::IsPublic.eq(true));
    if let Some(category_id) = filter.category_id {
        query = query.filter(Column::CategoryId.eq(category_id));
    }
    if let Some(pro_id) = filter.pro_id {
        query = query.filter(Column::ProId.eq(pro_id));
    }
    if let Some(group_id) = filter.service_group_id {
        query = query.filter(Column::ServiceGroupId.eq(group_id));
    }
    query
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
