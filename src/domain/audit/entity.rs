// src/domain/audit/entity.rs
use crate::domain::audit::entity_type::EntityType;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AuditEntryId(pub i64);

impl From<AuditEntryId> for i64 {
    fn from(value: AuditEntryId) -> Self {
        value.0
    }
}

/// Polymorphic reference carried by an audit entry. The id is dropped
/// (but the type kept) when the referenced row could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    pub entity_type: EntityType,
    pub entity_id: Option<i64>,
}

impl EntityRef {
    pub fn new(entity_type: EntityType, entity_id: Option<i64>) -> Self {
        Self {
            entity_type,
            entity_id,
        }
    }

    pub fn dereferenced(self) -> Self {
        Self {
            entity_id: None,
            ..self
        }
    }
}

/// Audit row as handed to storage. Built only by the recorder, which owns
/// normalization and the `created_at` stamp.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub action_type: String,
    pub performed_by: UserId,
    pub entity: Option<EntityRef>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl NewAuditEntry {
    pub fn entity_type(&self) -> Option<EntityType> {
        self.entity.map(|e| e.entity_type)
    }

    pub fn entity_id(&self) -> Option<i64> {
        self.entity.and_then(|e| e.entity_id)
    }

    /// Denormalized `target_user` column.
    pub fn target_user(&self) -> Option<i64> {
        match self.entity {
            Some(EntityRef {
                entity_type: EntityType::User,
                entity_id,
            }) => entity_id,
            _ => None,
        }
    }

    /// Denormalized `target_product` column.
    pub fn target_product(&self) -> Option<i64> {
        match self.entity {
            Some(EntityRef {
                entity_type: EntityType::Product,
                entity_id,
            }) => entity_id,
            _ => None,
        }
    }
}

/// One rendered line of audit history: every stored column plus the
/// resolved actor and target names.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: AuditEntryId,
    pub action_type: String,
    pub performed_by: i64,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<i64>,
    pub target_user: Option<i64>,
    pub target_product: Option<i64>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub performed_by_name: Option<String>,
    pub target_name: Option<String>,
}
