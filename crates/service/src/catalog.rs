//! Catalog services: offerings pros publish, the groups they arrange them
//! into, and the platform-wide categories.

use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::offering::{self, NewOffering, OfferingPatch, PricingType, PublicFilter};
use models::{category, service_group};

use crate::errors::ServiceError;

fn validate_pricing(
    pricing_type: PricingType,
    base_price: Option<f64>,
    duration_minutes: Option<i32>,
) -> Result<(), ServiceError> {
    match pricing_type {
        PricingType::Fixed | PricingType::StartingFrom => {
            if base_price.is_none() || duration_minutes.is_none() {
                return Err(ServiceError::Validation(
                    "base price and duration required for fixed/starting_from pricing".into(),
                ));
            }
            if base_price.is_some_and(|p| p < 0.0) {
                return Err(ServiceError::Validation("base price must not be negative".into()));
            }
            Ok(())
        }
        PricingType::Quote => Ok(()),
    }
}

pub async fn create_offering(
    db: &DatabaseConnection,
    pro_id: Uuid,
    new: NewOffering,
) -> Result<offering::Model, ServiceError> {
    validate_pricing(new.pricing_type, new.base_price, new.duration_minutes)?;
    category::Entity::find_by_id(new.category_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))?;
    if let Some(group_id) = new.service_group_id {
        let group = service_group::Entity::find_by_id(group_id)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("service group"))?;
        if group.pro_id != pro_id {
            return Err(ServiceError::Validation("service group belongs to another pro".into()));
        }
    }
    Ok(offering::create(db, pro_id, new).await?)
}

pub async fn list_my_offerings(db: &DatabaseConnection, pro_id: Uuid) -> Result<Vec<offering::Model>, ServiceError> {
    Ok(offering::list_by_pro(db, pro_id).await?)
}

pub async fn update_offering(
    db: &DatabaseConnection,
    pro_id: Uuid,
    id: Uuid,
    patch: OfferingPatch,
) -> Result<offering::Model, ServiceError> {
    let current = offering::find_owned(db, pro_id, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("offering"))?;
    let pricing_type = patch.pricing_type.unwrap_or(current.pricing_type);
    let base_price = patch.base_price.or(current.base_price);
    let duration = patch.duration_minutes.or(current.duration_minutes);
    validate_pricing(pricing_type, base_price, duration)?;
    Ok(offering::update_owned(db, pro_id, id, patch).await?)
}

pub async fn delete_offering(db: &DatabaseConnection, pro_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
    Ok(offering::delete_owned(db, pro_id, id).await?)
}

/// Anonymous storefront listing.
pub async fn list_public_offerings(
    db: &DatabaseConnection,
    filter: PublicFilter,
) -> Result<Vec<offering::Model>, ServiceError> {
    Ok(offering::list_public(db, filter).await?)
}

pub async fn create_group(
    db: &DatabaseConnection,
    pro_id: Uuid,
    name: &str,
    position: i32,
) -> Result<service_group::Model, ServiceError> {
    Ok(service_group::create(db, pro_id, name, position).await?)
}

pub async fn list_my_groups(db: &DatabaseConnection, pro_id: Uuid) -> Result<Vec<service_group::Model>, ServiceError> {
    Ok(service_group::list_by_pro(db, pro_id).await?)
}

pub async fn create_category(db: &DatabaseConnection, name: &str) -> Result<category::Model, ServiceError> {
    if category::find_by_name(db, name).await?.is_some() {
        return Err(ServiceError::Validation("category already exists".into()));
    }
    Ok(category::create(db, name).await?)
}

pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    Ok(category::list(db).await?)
}
