use crate::domain::audit::{EntityRef, EntityType};
use serde_json::Value;

/// Change event handed to [`super::AuditRecorder::register_log`].
///
/// A reference may be given in the normalized form (`entity_type` +
/// `entity_id`) or through the legacy `target_user` / `target_product`
/// fields. The normalized form wins when both are present; an explicit type
/// without an id takes the id of the legacy field of the same type.
#[derive(Debug, Clone, Default)]
pub struct LogEvent {
    pub action_type: String,
    pub performed_by: i64,
    pub target_user: Option<i64>,
    pub target_product: Option<i64>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<i64>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub description: String,
}

impl LogEvent {
    pub fn new(
        action_type: impl Into<String>,
        performed_by: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            performed_by,
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn on(mut self, entity_type: EntityType, entity_id: i64) -> Self {
        self.entity_type = Some(entity_type);
        self.entity_id = Some(entity_id);
        self
    }

    pub fn target_user(mut self, id: i64) -> Self {
        self.target_user = Some(id);
        self
    }

    pub fn target_product(mut self, id: i64) -> Self {
        self.target_product = Some(id);
        self
    }

    pub fn snapshots(mut self, old_value: Option<Value>, new_value: Option<Value>) -> Self {
        self.old_value = old_value;
        self.new_value = new_value;
        self
    }

    /// Folds the legacy fields into a single normalized reference.
    pub(crate) fn reference(&self) -> Option<EntityRef> {
        if let Some(entity_type) = self.entity_type {
            let legacy_id = match entity_type {
                EntityType::User => self.target_user,
                EntityType::Product => self.target_product,
                _ => None,
            };
            return Some(EntityRef::new(entity_type, self.entity_id.or(legacy_id)));
        }
        if let Some(id) = self.target_user {
            return Some(EntityRef::new(EntityType::User, Some(id)));
        }
        if let Some(id) = self.target_product {
            return Some(EntityRef::new(EntityType::Product, Some(id)));
        }
        if let Some(id) = self.entity_id {
            tracing::warn!(entity_id = id, "entity id given without entity type; discarded");
        }
        None
    }
}
