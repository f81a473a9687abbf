use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Postal address, stored as a JSONB blob on profile rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}
