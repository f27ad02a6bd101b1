use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Tables an audit entry may point at through `(entity_type, entity_id)`.
///
/// The serialized tag is what lands in `audit_logs.entity_type`; the mixed
/// singular/plural spelling is the stored vocabulary and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "products")]
    Product,
    #[serde(rename = "brands")]
    Brand,
    #[serde(rename = "categories")]
    Category,
    #[serde(rename = "locations")]
    Location,
    #[serde(rename = "provider")]
    Provider,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::User,
        EntityType::Product,
        EntityType::Brand,
        EntityType::Category,
        EntityType::Location,
        EntityType::Provider,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Product => "products",
            EntityType::Brand => "brands",
            EntityType::Category => "categories",
            EntityType::Location => "locations",
            EntityType::Provider => "provider",
        }
    }

    /// Backing table of the entity.
    pub fn table(self) -> &'static str {
        match self {
            EntityType::User => "users",
            EntityType::Product => "products",
            EntityType::Brand => "brands",
            EntityType::Category => "categories",
            EntityType::Location => "locations",
            EntityType::Provider => "providers",
        }
    }

    /// Column rendered as the human-readable name of a row.
    pub fn display_column(self) -> &'static str {
        match self {
            EntityType::User
            | EntityType::Product
            | EntityType::Brand
            | EntityType::Category
            | EntityType::Location
            | EntityType::Provider => "name",
        }
    }

    /// Table alias used when the entity is joined into a history query.
    pub fn join_alias(self) -> &'static str {
        match self {
            EntityType::User => "t_user",
            EntityType::Product => "t_product",
            EntityType::Brand => "t_brand",
            EntityType::Category => "t_category",
            EntityType::Location => "t_location",
            EntityType::Provider => "t_provider",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| DomainError::validation(format!("unknown entity type: {tag}")))
    }
}
